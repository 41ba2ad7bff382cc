//! ofetch: fetch with native `query`/`body` options and a parsed return
//! value, so the wrapper is `Promise<T>` rather than a response object.

use reqgen_core::preset::{
    BodyStrategy, CallShape, ConfigParam, HttpImport, MethodFormat, Preset, QueryStrategy,
    SlotNames,
};

pub(crate) fn preset() -> Preset {
    Preset {
        name: "ofetch",
        http_import: Some(HttpImport {
            default_name: None,
            named: &["ofetch"],
            type_named: &["FetchOptions"],
            from: "ofetch",
        }),
        callee: "ofetch",
        call_shape: CallShape::UrlAndOptions,
        method_format: MethodFormat::Upper,
        slots: SlotNames::default(),
        query: QueryStrategy::Options,
        body: BodyStrategy::Options,
        content_type_header: false,
        response_wrapper: "Promise<T>",
        config_param: Some(ConfigParam {
            name: "options",
            type_expr: "FetchOptions",
        }),
        hooks: false,
    }
}

#[cfg(test)]
mod tests {
    use crate::support::render_main;

    use super::*;

    #[test]
    fn test_render_petstore() {
        insta::assert_snapshot!(render_main(preset()), @r#"
        // Generated by reqgen. Do not edit.
        // Petstore 1.0.0

        import { ofetch, type FetchOptions } from "ofetch";
        import type * as Types from "./api.type";

        export const baseURL = "https://petstore.example.com/v2/";

        /**
         * Find pet by ID
         */
        export function getPetPetId(paths: { petId: number }, query?: Types.GetPetPetIdQuery, options?: FetchOptions): Promise<Types.Pet> {
          return ofetch(`${baseURL}pet/${paths.petId}`, { method: "GET", query, ...options });
        }

        /**
         * Add a new pet
         */
        export function postPet(body: Types.Pet, options?: FetchOptions): Promise<Types.Pet> {
          return ofetch(`${baseURL}pet`, { method: "POST", body, ...options });
        }
        "#);
    }
}
