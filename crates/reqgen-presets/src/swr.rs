//! swr: fetch-flavored requests plus `useSWR` query hooks for every GET
//! operation, emitted into a separate hooks file.

use reqgen_core::preset::Preset;

pub(crate) fn preset() -> Preset {
    Preset {
        name: "swr",
        hooks: true,
        ..super::fetch::preset()
    }
}
