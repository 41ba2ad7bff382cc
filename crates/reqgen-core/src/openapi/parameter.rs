use serde::{Deserialize, Serialize};

use super::schema::Schema;

/// Where a parameter is carried in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Location {
    Path,
    Query,
    Header,
    Body,
    FormData,
    Cookie,
}

/// A v2 or v3 parameter object.
///
/// v2 inlines the schema keywords (`type`, `format`, `items`, `enum`) on the
/// parameter itself; v3 nests them under `schema`. Both survive here and
/// [`Parameter::effective_schema`] folds them into one shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,

    #[serde(rename = "in")]
    pub location: Location,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub param_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,

    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<serde_json::Value>,
}

impl Parameter {
    /// The schema describing this parameter's value, whichever spec version
    /// supplied it.
    pub fn effective_schema(&self) -> Schema {
        if let Some(schema) = &self.schema {
            return schema.clone();
        }
        Schema {
            schema_type: self.param_type.clone(),
            format: self.format.clone(),
            items: self.items.clone(),
            enum_values: self.enum_values.clone(),
            description: self.description.clone(),
            ..Schema::default()
        }
    }
}
