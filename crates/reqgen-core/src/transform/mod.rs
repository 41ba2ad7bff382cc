//! Small, independent rewrites applied to each operation's parameter and
//! option drafts before IR nodes are built.

mod base_url;
mod body_stringify;
mod header_options;
mod qualify;
mod query_params;
mod url_syntax;

pub use base_url::transform_base_url;
pub use body_stringify::transform_body_stringify;
pub use header_options::transform_header_options;
pub use qualify::qualify_type;
pub use query_params::transform_query_params;
pub use url_syntax::{transform_url_syntax, UrlDraft, UrlPart};
