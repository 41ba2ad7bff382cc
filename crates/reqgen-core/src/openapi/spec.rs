use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::path::PathItem;
use super::schema::Schema;

/// Info object describing the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Info {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// The unified (v2-shaped) document consumed by the traversal stage.
///
/// Every field is optional: documents are normalized before deserialization
/// and gaps degrade downstream instead of failing here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Swagger {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swagger: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<Info>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(rename = "basePath", skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schemes: Vec<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub paths: IndexMap<String, PathItem>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub definitions: IndexMap<String, Schema>,
}

impl Swagger {
    /// `"<title> <version>"` for generated-file banners, when present.
    pub fn display_name(&self) -> Option<String> {
        let info = self.info.as_ref()?;
        match (&info.title, &info.version) {
            (Some(title), Some(version)) => Some(format!("{title} {version}")),
            (Some(title), None) => Some(title.clone()),
            _ => None,
        }
    }
}
