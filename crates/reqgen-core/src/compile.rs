use minijinja::{context, Environment};

use crate::config::Syntax;
use crate::ir::{Function, Graph, Import, Interface, StatementField, TypeAlias, Variable};
use crate::naming::quote_key;

/// Escape `*/` sequences that would prematurely close JSDoc comment blocks.
fn escape_jsdoc(value: String) -> String {
    value.replace("*/", "*\\/")
}

/// Collapse runs of whitespace so a description fits one comment line.
fn flatten_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Renders IR graphs into source-text blocks.
///
/// One read-only pass per scope, in group order: comments, imports,
/// variables, functions, interfaces, type aliases. The print step joins
/// blocks with blank lines. In JavaScript mode typed constructs become
/// JSDoc: signatures lose annotations, interfaces and aliases render as
/// `@typedef` blocks.
pub struct Compiler {
    env: Environment<'static>,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Compiler {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.add_filter("escape_jsdoc", escape_jsdoc);
        env.add_template("function.j2", include_str!("templates/function.j2"))
            .expect("template should be valid");
        env.add_template("interface.j2", include_str!("templates/interface.j2"))
            .expect("template should be valid");
        Compiler { env }
    }

    /// Render one scope's graph into ordered text blocks.
    pub fn compile(&self, graph: &Graph, syntax: Syntax) -> Vec<String> {
        let mut blocks = Vec::new();

        if !graph.comments.is_empty() {
            let lines: Vec<String> = graph
                .comments
                .iter()
                .map(|c| format!("// {c}"))
                .collect();
            blocks.push(lines.join("\n"));
        }

        let imports: Vec<String> = graph
            .imports
            .iter()
            .filter_map(|i| render_import(i, syntax))
            .collect();
        if !imports.is_empty() {
            blocks.push(imports.join("\n"));
        }

        if !graph.variables.is_empty() {
            let lines: Vec<String> = graph
                .variables
                .iter()
                .map(|v| render_variable(v, syntax))
                .collect();
            blocks.push(lines.join("\n"));
        }

        for function in &graph.functions {
            blocks.push(self.render_function(function, syntax));
        }

        for interface in &graph.interfaces {
            blocks.push(match syntax {
                Syntax::Typescript => self.render_interface(interface),
                Syntax::Javascript => render_typedef(interface),
            });
        }

        if !graph.typings.is_empty() {
            let lines: Vec<String> = graph
                .typings
                .iter()
                .map(|t| render_alias(t, syntax))
                .collect();
            blocks.push(lines.join("\n"));
        }

        blocks
    }

    fn render_function(&self, function: &Function, syntax: Syntax) -> String {
        let params: Vec<String> = function
            .params
            .iter()
            .map(|field| match syntax {
                Syntax::Typescript => match &field.type_expr {
                    Some(ty) => {
                        format!("{}{}: {ty}", field.name, field.requiredness.marker())
                    }
                    None => field.name.clone(),
                },
                Syntax::Javascript => field.name.clone(),
            })
            .collect();

        let ret = match (syntax, &function.return_type) {
            (Syntax::Typescript, Some(ty)) => format!(": {ty}"),
            _ => String::new(),
        };

        let tmpl = self.env.get_template("function.j2").unwrap();
        let rendered = tmpl
            .render(context! {
                doc => doc_block(&function.doc),
                export => function.export,
                name => function.name,
                params => params.join(", "),
                ret => ret,
                body => function.body,
            })
            .expect("render should succeed");
        rendered.trim_end().to_string()
    }

    fn render_interface(&self, interface: &Interface) -> String {
        let fields: Vec<minijinja::Value> = interface
            .fields
            .iter()
            .map(|field| {
                context! {
                    key => quote_key(&field.name),
                    marker => field.requiredness.marker(),
                    type => field.type_expr.as_deref().unwrap_or("any"),
                    description => field.description.as_deref().map(flatten_ws),
                }
            })
            .collect();

        let tmpl = self.env.get_template("interface.j2").unwrap();
        let rendered = tmpl
            .render(context! {
                doc => doc_block(&interface.doc),
                export => interface.export,
                name => interface.name,
                fields => fields,
            })
            .expect("render should succeed");
        rendered.trim_end().to_string()
    }
}

/// Join blocks with blank-line separators into the final file text.
pub fn print_blocks(blocks: &[String]) -> String {
    let mut out = blocks.join("\n\n");
    out.push('\n');
    out
}

/// `/** ... */` block from raw lines, `None` when there is nothing to say.
pub fn doc_block(lines: &[String]) -> Option<String> {
    if lines.is_empty() {
        return None;
    }
    let mut out = String::from("/**\n");
    for line in lines {
        if line.is_empty() {
            out.push_str(" *\n");
        } else {
            out.push_str(&format!(" * {}\n", escape_jsdoc(line.clone())));
        }
    }
    out.push_str(" */");
    Some(out)
}

/// A `@param` doc line: `@param {Pet} body the pet to add`.
pub fn param_doc_line(field: &StatementField, with_type: bool) -> String {
    let mut line = String::from("@param ");
    if with_type {
        let ty = field.type_expr.as_deref().unwrap_or("any");
        line.push_str(&format!("{{{ty}}} "));
    }
    if field.requiredness.is_optional() {
        line.push_str(&format!("[{}]", field.name));
    } else {
        line.push_str(&field.name);
    }
    if let Some(description) = &field.description {
        line.push(' ');
        line.push_str(&flatten_ws(description));
    }
    line
}

fn render_import(import: &Import, syntax: Syntax) -> Option<String> {
    if syntax == Syntax::Javascript && import.type_only {
        return None;
    }

    let mut clauses: Vec<String> = Vec::new();
    if let Some(default_name) = &import.default_name {
        clauses.push(default_name.clone());
    }
    if let Some(namespace) = &import.namespace {
        clauses.push(format!("* as {namespace}"));
    }
    let mut named: Vec<String> = import.named.clone();
    if syntax == Syntax::Typescript {
        named.extend(import.type_named.iter().map(|n| format!("type {n}")));
    }
    if !named.is_empty() {
        clauses.push(format!("{{ {} }}", named.join(", ")));
    }
    if clauses.is_empty() {
        return None;
    }

    let keyword = if import.type_only && syntax == Syntax::Typescript {
        "import type"
    } else {
        "import"
    };
    Some(format!(
        "{keyword} {} from \"{}\";",
        clauses.join(", "),
        import.from
    ))
}

fn render_variable(variable: &Variable, syntax: Syntax) -> String {
    let export = if variable.export { "export " } else { "" };
    match (syntax, &variable.type_expr) {
        (Syntax::Typescript, Some(ty)) => {
            format!("{export}const {}: {ty} = {};", variable.name, variable.value)
        }
        _ => format!("{export}const {} = {};", variable.name, variable.value),
    }
}

fn render_alias(alias: &TypeAlias, syntax: Syntax) -> String {
    match syntax {
        Syntax::Typescript => {
            let export = if alias.export { "export " } else { "" };
            match doc_block(&alias.doc) {
                Some(doc) => format!("{doc}\n{export}type {} = {};", alias.name, alias.value),
                None => format!("{export}type {} = {};", alias.name, alias.value),
            }
        }
        Syntax::Javascript => {
            format!("/** @typedef {{{}}} {} */", alias.value, alias.name)
        }
    }
}

/// A JavaScript interface: a `@typedef` block with one `@property` line per
/// field.
fn render_typedef(interface: &Interface) -> String {
    let mut lines: Vec<String> = interface.doc.clone();
    lines.push(format!("@typedef {{Object}} {}", interface.name));
    for field in &interface.fields {
        let ty = field.type_expr.as_deref().unwrap_or("any");
        let name = if field.requiredness.is_optional() {
            format!("[{}]", field.name)
        } else {
            field.name.clone()
        };
        let mut line = format!("@property {{{ty}}} {name}");
        if let Some(description) = &field.description {
            line.push(' ');
            line.push_str(&flatten_ws(description));
        }
        lines.push(line);
    }
    doc_block(&lines).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use crate::ir::Requiredness;

    use super::*;

    #[test]
    fn test_render_function_typescript() {
        let compiler = Compiler::new();
        let function = Function {
            name: "getPetPetId".to_string(),
            doc: vec!["Find pet by ID.".to_string()],
            params: vec![
                StatementField::new("paths", "{ petId: number }"),
                StatementField::new("init", "RequestInit").optional(),
            ],
            return_type: Some("Promise<Response>".to_string()),
            body: vec![
                "return fetch(`${baseURL}pet/${paths.petId}`, { method: \"GET\", ...init });"
                    .to_string(),
            ],
            export: true,
        };
        insta::assert_snapshot!(
            compiler.render_function(&function, Syntax::Typescript),
            @r#"
        /**
         * Find pet by ID.
         */
        export function getPetPetId(paths: { petId: number }, init?: RequestInit): Promise<Response> {
          return fetch(`${baseURL}pet/${paths.petId}`, { method: "GET", ...init });
        }
        "#
        );
    }

    #[test]
    fn test_render_function_javascript_drops_types() {
        let compiler = Compiler::new();
        let function = Function {
            name: "listPets".to_string(),
            doc: vec![
                "@param {ListPetsQuery} [query]".to_string(),
                "@returns {Promise<Response>}".to_string(),
            ],
            params: vec![StatementField::new("query", "ListPetsQuery").optional()],
            return_type: Some("Promise<Response>".to_string()),
            body: vec!["return fetch(\"/pets\", { method: \"GET\" });".to_string()],
            export: true,
        };
        insta::assert_snapshot!(
            compiler.render_function(&function, Syntax::Javascript),
            @r#"
        /**
         * @param {ListPetsQuery} [query]
         * @returns {Promise<Response>}
         */
        export function listPets(query) {
          return fetch("/pets", { method: "GET" });
        }
        "#
        );
    }

    #[test]
    fn test_render_interface() {
        let compiler = Compiler::new();
        let interface = Interface {
            name: "ListPetsQuery".to_string(),
            doc: Vec::new(),
            fields: vec![
                StatementField {
                    name: "limit".to_string(),
                    type_expr: Some("number".to_string()),
                    requiredness: Requiredness::Optional,
                    description: Some("maximum number of results".to_string()),
                },
                StatementField::new("x-order", "\"asc\" | \"desc\"").optional(),
            ],
            export: true,
        };
        insta::assert_snapshot!(
            compiler.render_interface(&interface),
            @r#"
        export interface ListPetsQuery {
          /** maximum number of results */
          limit?: number;
          "x-order"?: "asc" | "desc";
        }
        "#
        );
    }

    #[test]
    fn test_render_typedef() {
        let interface = Interface {
            name: "ListPetsQuery".to_string(),
            doc: Vec::new(),
            fields: vec![StatementField {
                name: "limit".to_string(),
                type_expr: Some("number".to_string()),
                requiredness: Requiredness::Optional,
                description: Some("maximum number of results".to_string()),
            }],
            export: true,
        };
        insta::assert_snapshot!(
            render_typedef(&interface),
            @r"
        /**
         * @typedef {Object} ListPetsQuery
         * @property {number} [limit] maximum number of results
         */
        "
        );
    }

    #[test]
    fn test_render_imports() {
        let import = Import {
            default_name: Some("axios".to_string()),
            type_named: vec!["AxiosResponse".to_string(), "AxiosRequestConfig".to_string()],
            from: "axios".to_string(),
            ..Import::default()
        };
        assert_eq!(
            render_import(&import, Syntax::Typescript).as_deref(),
            Some("import axios, { type AxiosResponse, type AxiosRequestConfig } from \"axios\";")
        );
        assert_eq!(
            render_import(&import, Syntax::Javascript).as_deref(),
            Some("import axios from \"axios\";")
        );

        let types = Import {
            namespace: Some("Types".to_string()),
            type_only: true,
            from: "./api.type".to_string(),
            ..Import::default()
        };
        assert_eq!(
            render_import(&types, Syntax::Typescript).as_deref(),
            Some("import type * as Types from \"./api.type\";")
        );
        assert_eq!(render_import(&types, Syntax::Javascript), None);

        let named_only = Import {
            named: vec!["ofetch".to_string()],
            from: "ofetch".to_string(),
            ..Import::default()
        };
        assert_eq!(
            render_import(&named_only, Syntax::Javascript).as_deref(),
            Some("import { ofetch } from \"ofetch\";")
        );
    }

    #[test]
    fn test_render_variable_and_alias() {
        let variable = Variable {
            name: "baseURL".to_string(),
            type_expr: None,
            value: "\"https://petstore.swagger.io/v2/\"".to_string(),
            export: true,
        };
        assert_eq!(
            render_variable(&variable, Syntax::Typescript),
            "export const baseURL = \"https://petstore.swagger.io/v2/\";"
        );

        let alias = TypeAlias {
            name: "PetList".to_string(),
            doc: Vec::new(),
            value: "Pet[]".to_string(),
            export: true,
        };
        assert_eq!(
            render_alias(&alias, Syntax::Typescript),
            "export type PetList = Pet[];"
        );
        assert_eq!(
            render_alias(&alias, Syntax::Javascript),
            "/** @typedef {Pet[]} PetList */"
        );
    }

    #[test]
    fn test_param_doc_lines() {
        let field = StatementField {
            name: "query".to_string(),
            type_expr: Some("ListPetsQuery".to_string()),
            requiredness: Requiredness::Optional,
            description: Some("filter options".to_string()),
        };
        assert_eq!(
            param_doc_line(&field, true),
            "@param {ListPetsQuery} [query] filter options"
        );
        assert_eq!(param_doc_line(&field, false), "@param [query] filter options");
    }

    #[test]
    fn test_print_blocks_separates_with_blank_lines() {
        let blocks = vec!["// a".to_string(), "const b = 1;".to_string()];
        assert_eq!(print_blocks(&blocks), "// a\n\nconst b = 1;\n");
    }

    #[test]
    fn test_compile_group_order() {
        let compiler = Compiler::new();
        let mut graph = Graph::default();
        graph.comments.push("Generated file.".to_string());
        graph.variables.push(Variable {
            name: "baseURL".to_string(),
            type_expr: None,
            value: "\"/\"".to_string(),
            export: true,
        });
        graph.functions.push(Function {
            name: "ping".to_string(),
            doc: Vec::new(),
            params: Vec::new(),
            return_type: None,
            body: vec!["return fetch(\"/ping\");".to_string()],
            export: true,
        });
        let blocks = compiler.compile(&graph, Syntax::Typescript);
        assert_eq!(blocks.len(), 3);
        assert!(blocks[0].starts_with("// Generated file."));
        assert!(blocks[1].starts_with("export const baseURL"));
        assert!(blocks[2].contains("function ping()"));
    }
}
