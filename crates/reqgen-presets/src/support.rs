//! Shared fixtures for preset tests.

use reqgen_core::config::{Config, Input};
use reqgen_core::pipeline::{self, FileFetcher, Run};
use reqgen_core::preset::Preset;

/// A compact document exercising path, query, body, and response mapping.
pub(crate) fn petstore() -> serde_json::Value {
    serde_json::json!({
        "swagger": "2.0",
        "info": { "title": "Petstore", "version": "1.0.0" },
        "host": "petstore.example.com",
        "basePath": "/v2",
        "schemes": ["https"],
        "paths": {
            "/pet/{petId}": {
                "get": {
                    "summary": "Find pet by ID",
                    "parameters": [
                        { "name": "petId", "in": "path", "required": true, "type": "integer" },
                        { "name": "verbose", "in": "query", "type": "boolean" }
                    ],
                    "responses": {
                        "200": { "schema": { "$ref": "#/definitions/Pet" } }
                    }
                }
            },
            "/pet": {
                "post": {
                    "summary": "Add a new pet",
                    "parameters": [
                        {
                            "name": "pet",
                            "in": "body",
                            "required": true,
                            "schema": { "$ref": "#/definitions/Pet" }
                        }
                    ],
                    "responses": {
                        "200": { "schema": { "$ref": "#/definitions/Pet" } }
                    }
                }
            }
        },
        "definitions": {
            "Pet": {
                "type": "object",
                "required": ["name"],
                "properties": {
                    "id": { "type": "integer", "format": "int64" },
                    "name": { "type": "string" }
                }
            }
        }
    })
}

/// Render one emitted scope (0 = requests, then declarations, then hooks)
/// for `preset` against the petstore document, without touching disk.
pub(crate) fn render_scope(preset: Preset, index: usize) -> String {
    let config = Config {
        input: Input::Json { json: petstore() },
        ..Config::default()
    };
    let original = pipeline::fetch(Run::new(config, preset), &FileFetcher).unwrap();
    let parsed = pipeline::parse(original).unwrap();
    let compiled = pipeline::compile(parsed);
    compiled.codes[index].1.clone()
}

/// Render the request scope for `preset` against the petstore document.
pub(crate) fn render_main(preset: Preset) -> String {
    render_scope(preset, 0)
}
