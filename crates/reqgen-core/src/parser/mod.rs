//! Document-to-graph parsing: per-operation extraction (metadata and
//! location-grouped parameters) and the single pass that assembles the
//! per-scope node graphs.

mod document;
mod metadata;
mod params;

pub use document::parse_document;
pub use metadata::{
    parse_method_metadata, substitute_generic, wrap_response_type, MethodMetadata,
};
pub use params::{parse_method_parameters, MethodParameters};
