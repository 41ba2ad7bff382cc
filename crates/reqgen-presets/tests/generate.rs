use std::fs;
use std::path::Path;
use std::process::Command;

use reqgen_core::config::{BaseUrl, Config, ImportConfig, Input, Output, TypeOutput};
use reqgen_core::error::{FetchError, PipelineError};
use reqgen_presets::{generate, generate_all};
use serde_json::json;

const PETSTORE: &str = include_str!("fixtures/petstore.yaml");
const LINKS_V3: &str = include_str!("fixtures/links-v3.json");

fn write_fixture(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, content).expect("should write fixture");
    path.to_string_lossy().into_owned()
}

fn config_for(input: String, output: String) -> Config {
    Config {
        input: Input::Path(input),
        output: Some(Output::Path(output)),
        ..Config::default()
    }
}

#[test]
fn generates_split_typescript_files() {
    let dir = tempfile::tempdir().expect("should create tempdir");
    let input = write_fixture(dir.path(), "petstore.yaml", PETSTORE);
    let output = dir.path().join("api.ts");

    let destined = generate(config_for(input, output.to_string_lossy().into_owned()))
        .expect("should generate");
    assert_eq!(destined.files.len(), 2);

    let main = fs::read_to_string(&output).expect("should read main output");
    assert!(main.contains(
        "import axios, { type AxiosResponse, type AxiosRequestConfig } from \"axios\";"
    ));
    assert!(main.contains("export const baseURL = \"https://petstore.swagger.io/v2/\";"));
    assert!(main.contains(
        "export function postPet(data: Types.Pet, config?: AxiosRequestConfig): Promise<AxiosResponse<Types.Pet>>"
    ));
    // Required query group precedes the optional config parameter.
    assert!(main.contains(
        "getPetFindByStatus(params: Types.GetPetFindByStatusParams, config?: AxiosRequestConfig)"
    ));
    // Multipart parameters collapse into one optional FormData argument.
    assert!(main.contains("data?: FormData"));

    let types = fs::read_to_string(dir.path().join("api.type.ts")).expect("should read typings");
    assert!(types.contains("export interface Pet {"));
    assert!(types.contains("photoUrls: string[];"));
    assert!(types.contains("status?: \"available\" | \"pending\" | \"sold\";"));
    assert!(types.contains("export interface GetPetFindByStatusParams {"));
    assert!(types.contains("export type Status = \"available\" | \"pending\" | \"sold\";"));
}

#[test]
fn typings_disabled_inlines_declarations() {
    let dir = tempfile::tempdir().expect("should create tempdir");
    let input = write_fixture(dir.path(), "petstore.yaml", PETSTORE);
    let output = dir.path().join("api.ts");

    let mut config = config_for(input, String::new());
    config.output = Some(Output::Split {
        main: Some(output.to_string_lossy().into_owned()),
        types: Some(TypeOutput::Enabled(false)),
    });
    let destined = generate(config).expect("should generate");
    assert_eq!(destined.files.len(), 1);

    let main = fs::read_to_string(&output).expect("should read main output");
    assert!(main.contains("export interface Pet {"));
    assert!(main.contains("postPet(data: Pet, config?: AxiosRequestConfig)"));
    assert!(!main.contains("Types."));
    assert!(!main.contains("api.type"));

    // Declarations come after the request functions.
    let last_function = main.rfind("export function").expect("should have functions");
    let first_interface = main.find("export interface").expect("should have interfaces");
    assert!(first_interface > last_function);
}

#[test]
fn javascript_output_moves_types_into_jsdoc() {
    let dir = tempfile::tempdir().expect("should create tempdir");
    let input = write_fixture(dir.path(), "petstore.yaml", PETSTORE);
    let output = dir.path().join("api.js");

    let mut config = config_for(input, output.to_string_lossy().into_owned());
    config.pipeline = Some("fetch".to_string());
    generate(config).expect("should generate");

    let main = fs::read_to_string(&output).expect("should read main output");
    assert!(!main.contains("import type"));
    assert!(main.contains("export function getPetPetId(paths, init) {"));
    assert!(main.contains("@param {import(\"./api.type\").Pet} body"));
    assert!(main.contains("@returns {Promise<Response>}"));

    let types = fs::read_to_string(dir.path().join("api.type.js")).expect("should read typings");
    assert!(types.contains("@typedef {Object} Pet"));
    assert!(types.contains("@property {string} name"));
    assert!(types.contains("@property {string[]} photoUrls"));
}

#[test]
fn javascript_inline_types_become_typedef_blocks() {
    let dir = tempfile::tempdir().expect("should create tempdir");
    let input = write_fixture(dir.path(), "petstore.yaml", PETSTORE);
    let output = dir.path().join("api.js");

    let mut config = config_for(input, String::new());
    config.pipeline = Some("fetch".to_string());
    config.output = Some(Output::Split {
        main: Some(output.to_string_lossy().into_owned()),
        types: Some(TypeOutput::Enabled(false)),
    });
    let destined = generate(config).expect("should generate");
    assert_eq!(destined.files.len(), 1);

    let main = fs::read_to_string(&output).expect("should read main output");
    assert!(main.contains("@typedef {Object} Pet"));
    assert!(main.contains("@param {Pet} body"));
    assert!(!main.contains("import(\"./api.type\")"));

    // Typedef blocks follow the request functions.
    let last_function = main.rfind("export function").expect("should have functions");
    let first_typedef = main.find("@typedef").expect("should have typedefs");
    assert!(first_typedef > last_function);
}

#[test]
fn v3_document_normalizes_servers_and_components() {
    let dir = tempfile::tempdir().expect("should create tempdir");
    let input = write_fixture(dir.path(), "links.json", LINKS_V3);
    let output = dir.path().join("links.ts");

    generate(config_for(input, output.to_string_lossy().into_owned()))
        .expect("should generate");

    let main = fs::read_to_string(&output).expect("should read main output");
    assert!(main.contains("export const baseURL = \"https://api.example.com/v1/\";"));
    assert!(main.contains("Promise<AxiosResponse<Types.Link[]>>"));
    // The v3 json request body arrives as a required `data` argument.
    assert!(main.contains("postLinks(data: Types.Link, config?: AxiosRequestConfig)"));

    let types = fs::read_to_string(dir.path().join("links.type.ts")).expect("should read typings");
    assert!(types.contains("export interface Link {"));
    assert!(types.contains("url: string;"));
}

#[test]
fn minimal_spec_round_trips_response_type() {
    let dir = tempfile::tempdir().expect("should create tempdir");
    let output = dir.path().join("api.ts");

    let config = Config {
        input: Input::Json {
            json: json!({
                "swagger": "2.0",
                "info": { "title": "T", "version": "1" },
                "paths": {
                    "/pets": {
                        "get": {
                            "responses": {
                                "200": {
                                    "schema": { "type": "array", "items": { "type": "string" } }
                                }
                            }
                        }
                    }
                }
            }),
        },
        output: Some(Output::Path(output.to_string_lossy().into_owned())),
        ..Config::default()
    };
    generate(config).expect("should generate");

    let main = fs::read_to_string(&output).expect("should read main output");
    assert!(main.contains(
        "export function getPets(config?: AxiosRequestConfig): Promise<AxiosResponse<string[]>>"
    ));
    assert!(main.contains("url: \"/pets\""));
}

#[test]
fn swr_preset_emits_hooks_file() {
    let dir = tempfile::tempdir().expect("should create tempdir");
    let input = write_fixture(dir.path(), "petstore.yaml", PETSTORE);
    let output = dir.path().join("api.ts");

    let mut config = config_for(input, output.to_string_lossy().into_owned());
    config.pipeline = Some("swr".to_string());
    let destined = generate(config).expect("should generate");
    assert_eq!(destined.files.len(), 3);

    let hooks = fs::read_to_string(dir.path().join("api.api.ts")).expect("should read hooks");
    assert!(hooks.contains("import useSWR from \"swr\";"));
    assert!(hooks.contains("import type * as Types from \"./api.type\";"));
    assert!(hooks.contains(
        "return useSWR([\"get /pet/{petId}\", paths], () => getPetPetId(paths, init));"
    ));
    assert!(hooks.contains(
        "return useSWR([\"get /pet/findByStatus\", query], () => getPetFindByStatus(query, init));"
    ));
    // Only GET operations become hooks.
    assert!(!hooks.contains("useDeletePetPetId"));
    assert!(!hooks.contains("usePostPet"));
}

#[test]
fn generate_all_aggregates_failures_and_still_writes_good_runs() {
    let dir = tempfile::tempdir().expect("should create tempdir");
    let input = write_fixture(dir.path(), "petstore.yaml", PETSTORE);

    let first = config_for(input.clone(), dir.path().join("a/api.ts").to_string_lossy().into_owned());
    let mut second = config_for(input.clone(), dir.path().join("b/api.ts").to_string_lossy().into_owned());
    second.pipeline = Some("grpc".to_string());
    let mut third = config_for(input, dir.path().join("c/api.ts").to_string_lossy().into_owned());
    third.pipeline = Some("fetch".to_string());

    let err = generate_all(vec![first, second, third]).expect_err("should aggregate");
    assert_eq!(err.total, 3);
    assert_eq!(err.failures.len(), 1);
    assert_eq!(err.failures[0].index, 1);
    assert!(err.to_string().contains("1 of 3 generation runs failed"));
    assert!(err.to_string().contains("unknown preset: grpc"));

    assert!(dir.path().join("a/api.ts").exists());
    assert!(dir.path().join("c/api.ts").exists());
    assert!(!dir.path().join("b/api.ts").exists());
}

#[test]
fn remote_input_requires_http_fetcher() {
    let config = Config {
        input: Input::Uri {
            uri: "https://example.com/openapi.yaml".to_string(),
        },
        ..Config::default()
    };
    let err = generate(config).expect_err("should fail without http support");
    assert!(matches!(
        err,
        PipelineError::Fetch(FetchError::RemoteUnsupported(_))
    ));
}

#[test]
fn urls_stay_relative_when_base_url_disabled() {
    let dir = tempfile::tempdir().expect("should create tempdir");
    let input = write_fixture(dir.path(), "petstore.yaml", PETSTORE);
    let output = dir.path().join("api.ts");

    let mut config = config_for(input, output.to_string_lossy().into_owned());
    config.base_url = Some(BaseUrl::Enabled(false));
    generate(config).expect("should generate");

    let main = fs::read_to_string(&output).expect("should read main output");
    assert!(!main.contains("baseURL"));
    // Static routes render as a plain string, parameterized ones as a
    // template literal.
    assert!(main.contains("url: \"/pet\""));
    assert!(main.contains("url: `/pet/${paths.petId}`"));
}

#[test]
fn http_import_override_points_at_local_module() {
    let dir = tempfile::tempdir().expect("should create tempdir");
    let input = write_fixture(dir.path(), "petstore.yaml", PETSTORE);
    let output = dir.path().join("api.ts");

    let mut config = config_for(input, output.to_string_lossy().into_owned());
    config.import = Some(ImportConfig {
        http: Some("./axios-instance".to_string()),
        types: None,
    });
    generate(config).expect("should generate");

    let main = fs::read_to_string(&output).expect("should read main output");
    assert!(main.contains("from \"./axios-instance\";"));
    assert!(!main.contains("from \"axios\";"));
}

#[test]
#[ignore] // Requires Node.js
fn generated_typescript_compiles() {
    let dir = tempfile::tempdir().expect("should create tempdir");
    let input = write_fixture(dir.path(), "petstore.yaml", PETSTORE);

    fs::write(
        dir.path().join("package.json"),
        r#"{
  "name": "reqgen-e2e",
  "private": true,
  "type": "module",
  "devDependencies": {
    "typescript": "^5.5.0"
  },
  "dependencies": {
    "axios": "^1.7.0",
    "swr": "^2.2.0",
    "react": "^18.3.0",
    "@types/react": "^18.3.0"
  }
}
"#,
    )
    .expect("should write package.json");
    fs::write(
        dir.path().join("tsconfig.json"),
        r#"{
  "compilerOptions": {
    "strict": true,
    "noEmit": true,
    "target": "ES2020",
    "module": "ESNext",
    "moduleResolution": "Bundler",
    "lib": ["ES2020", "DOM"],
    "skipLibCheck": true
  }
}
"#,
    )
    .expect("should write tsconfig.json");

    for preset in ["axios", "fetch", "swr"] {
        let mut config = config_for(
            input.clone(),
            dir.path()
                .join(preset)
                .join("api.ts")
                .to_string_lossy()
                .into_owned(),
        );
        config.pipeline = Some(preset.to_string());
        generate(config).expect("should generate");
    }

    let install = Command::new("npm")
        .args(["install", "--no-audit", "--no-fund"])
        .current_dir(dir.path())
        .output()
        .expect("failed to run npm install");
    if !install.status.success() {
        panic!(
            "npm install failed:\n{}",
            String::from_utf8_lossy(&install.stderr)
        );
    }

    let tsc = Command::new("npx")
        .args(["tsc", "--noEmit"])
        .current_dir(dir.path())
        .output()
        .expect("failed to run tsc");
    if !tsc.status.success() {
        panic!(
            "tsc failed:\nstdout: {}\nstderr: {}",
            String::from_utf8_lossy(&tsc.stdout),
            String::from_utf8_lossy(&tsc.stderr),
        );
    }
}
