/// Whether a parameter position exists, and if so whether it may be omitted.
///
/// `Absent` is a lookup result, not a declaration: it means "no such
/// parameter at all", which templating must treat differently from an
/// optional parameter (no `?` suffix to emit, no fallback to inject).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requiredness {
    Required,
    Optional,
    Absent,
}

impl Requiredness {
    pub fn from_required(required: bool) -> Self {
        if required {
            Requiredness::Required
        } else {
            Requiredness::Optional
        }
    }

    pub fn is_optional(self) -> bool {
        self == Requiredness::Optional
    }

    /// The `?` suffix for signatures and interface fields.
    pub fn marker(self) -> &'static str {
        match self {
            Requiredness::Optional => "?",
            _ => "",
        }
    }
}

/// One named, typed position: a function parameter or an interface field.
#[derive(Debug, Clone, PartialEq)]
pub struct StatementField {
    pub name: String,
    pub type_expr: Option<String>,
    pub requiredness: Requiredness,
    pub description: Option<String>,
}

impl StatementField {
    pub fn new(name: impl Into<String>, type_expr: impl Into<String>) -> Self {
        StatementField {
            name: name.into(),
            type_expr: Some(type_expr.into()),
            requiredness: Requiredness::Required,
            description: None,
        }
    }

    pub fn optional(mut self) -> Self {
        self.requiredness = Requiredness::Optional;
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }
}

/// The requiredness of `name` within `fields`, `Absent` when missing.
pub fn requiredness_of(fields: &[StatementField], name: &str) -> Requiredness {
    fields
        .iter()
        .find(|f| f.name == name)
        .map(|f| f.requiredness)
        .unwrap_or(Requiredness::Absent)
}

/// An `import` statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Import {
    pub default_name: Option<String>,
    /// `import * as <name>` / `import type * as <name>`.
    pub namespace: Option<String>,
    pub named: Vec<String>,
    /// Named imports rendered with an inline `type` keyword.
    pub type_named: Vec<String>,
    /// Render the whole statement as `import type`.
    pub type_only: bool,
    pub from: String,
}

/// A `const` binding.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub type_expr: Option<String>,
    pub value: String,
    pub export: bool,
}

/// A generated function: doc lines, signature fields, and body lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Function {
    pub name: String,
    pub doc: Vec<String>,
    pub params: Vec<StatementField>,
    pub return_type: Option<String>,
    pub body: Vec<String>,
    pub export: bool,
}

/// A generated interface declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Interface {
    pub name: String,
    pub doc: Vec<String>,
    pub fields: Vec<StatementField>,
    pub export: bool,
}

/// A `type X = ...` alias.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAlias {
    pub name: String,
    pub doc: Vec<String>,
    pub value: String,
    pub export: bool,
}

/// A named output-file bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// The request-functions file.
    Main,
    /// The type-declarations file.
    Type,
    /// The hooks file, populated only by hook-emitting presets.
    Api,
}

/// Accumulated nodes for one scope. Append-only during parsing; the
/// compiler reads it once, in group order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    pub comments: Vec<String>,
    pub imports: Vec<Import>,
    pub variables: Vec<Variable>,
    pub functions: Vec<Function>,
    pub interfaces: Vec<Interface>,
    pub typings: Vec<TypeAlias>,
}

impl Graph {
    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
            && self.imports.is_empty()
            && self.variables.is_empty()
            && self.functions.is_empty()
            && self.interfaces.is_empty()
            && self.typings.is_empty()
    }

    /// Names of every interface and type alias declared in this graph.
    pub fn declared_type_names(&self) -> Vec<String> {
        self.interfaces
            .iter()
            .map(|i| i.name.clone())
            .chain(self.typings.iter().map(|t| t.name.clone()))
            .collect()
    }
}

/// One graph per scope, exclusively owned by a single pipeline run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graphs {
    pub main: Graph,
    pub types: Graph,
    pub api: Graph,
}

impl Graphs {
    pub fn new() -> Self {
        Graphs::default()
    }

    pub fn scope(&self, scope: Scope) -> &Graph {
        match scope {
            Scope::Main => &self.main,
            Scope::Type => &self.types,
            Scope::Api => &self.api,
        }
    }

    pub fn scope_mut(&mut self, scope: Scope) -> &mut Graph {
        match scope {
            Scope::Main => &mut self.main,
            Scope::Type => &mut self.types,
            Scope::Api => &mut self.api,
        }
    }
}
