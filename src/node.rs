//! The normalized type tree built from schema fragments.
//!
//! Every schema fragment converts into one [`TypeNode`]; the emitter then
//! renders the finished tree as TypeScript type expressions. The variant set
//! is closed and exhaustively matched at render time.

use serde_json::Value;

/// Descriptive metadata attached to a node.
///
/// Rendered as a block comment ahead of the object property that carries the
/// node. Attaching metadata replaces whatever was attached before.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    pub format: Option<String>,
    pub example: Option<Value>,
    pub description: Option<String>,
}

impl Metadata {
    /// Extract `format`, `example`, and `description` from a schema fragment.
    ///
    /// Values are copied verbatim; anything else in the fragment is ignored.
    pub fn from_fragment(fragment: &Value) -> Self {
        Metadata {
            format: fragment
                .get("format")
                .and_then(|v| v.as_str())
                .map(String::from),
            example: fragment.get("example").cloned(),
            description: fragment
                .get("description")
                .and_then(|v| v.as_str())
                .map(String::from),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.format.is_none() && self.example.is_none() && self.description.is_none()
    }
}

/// One property of an object node: name, type, and optionality.
///
/// Properties render in insertion order; that order is the document's
/// declaration order and is the crate's only ordering guarantee.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub node: TypeNode,
    pub optional: bool,
}

/// The closed set of node shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// An opaque type expression: a primitive name (`string`, `number`,
    /// `boolean`, `null`, `unknown`) or an already-rendered expression such
    /// as `APISchemas['Pet']`.
    Simple(String),
    /// A single string literal, e.g. `"post"`.
    Literal(String),
    /// A fixed set of literal alternatives, in declaration order.
    Enum(Vec<Value>),
    /// An ordered sequence of one element type.
    Array(Box<TypeNode>),
    /// Named properties plus an optional catch-all for unmodeled keys.
    Object {
        properties: Vec<Property>,
        additional: Option<Box<TypeNode>>,
    },
    /// Exactly one of the members. An empty union renders as an empty
    /// alternative set.
    Union(Vec<TypeNode>),
    /// All members hold simultaneously.
    Intersection(Vec<TypeNode>),
    /// A named parametric wrapper over one argument, e.g. `JSONString<T>`.
    Generic {
        name: String,
        argument: Box<TypeNode>,
    },
}

/// A node of the type tree, with optional descriptive metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeNode {
    pub kind: NodeKind,
    pub meta: Metadata,
}

impl TypeNode {
    fn new(kind: NodeKind) -> Self {
        TypeNode {
            kind,
            meta: Metadata::default(),
        }
    }

    pub fn simple(expr: impl Into<String>) -> Self {
        Self::new(NodeKind::Simple(expr.into()))
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Self::new(NodeKind::Literal(value.into()))
    }

    pub fn enumeration(values: Vec<Value>) -> Self {
        Self::new(NodeKind::Enum(values))
    }

    pub fn array(element: TypeNode) -> Self {
        Self::new(NodeKind::Array(Box::new(element)))
    }

    pub fn object() -> Self {
        Self::new(NodeKind::Object {
            properties: Vec::new(),
            additional: None,
        })
    }

    pub fn union(members: Vec<TypeNode>) -> Self {
        Self::new(NodeKind::Union(members))
    }

    pub fn intersection(members: Vec<TypeNode>) -> Self {
        Self::new(NodeKind::Intersection(members))
    }

    pub fn generic(name: impl Into<String>, argument: TypeNode) -> Self {
        Self::new(NodeKind::Generic {
            name: name.into(),
            argument: Box::new(argument),
        })
    }

    /// Attach metadata, replacing any previous metadata.
    ///
    /// Returns a new node value so a sub-node can be reused without shared
    /// mutation.
    pub fn with_meta(mut self, meta: Metadata) -> Self {
        self.meta = meta;
        self
    }

    /// Append a property to an object node. No-op on other kinds.
    pub fn add_property(&mut self, name: impl Into<String>, node: TypeNode, optional: bool) {
        if let NodeKind::Object { properties, .. } = &mut self.kind {
            properties.push(Property {
                name: name.into(),
                node,
                optional,
            });
        }
    }

    /// Set the catch-all type for unmodeled keys of an object node.
    pub fn add_additional_properties(&mut self, node: TypeNode) {
        if let NodeKind::Object { additional, .. } = &mut self.kind {
            *additional = Some(Box::new(node));
        }
    }

    /// Append a member to a union or intersection node.
    pub fn add_subtype(&mut self, node: TypeNode) {
        if let NodeKind::Union(members) | NodeKind::Intersection(members) = &mut self.kind {
            members.push(node);
        }
    }

    /// Render the node as a TypeScript type expression.
    ///
    /// The output is syntactically valid but unformatted; re-indenting is a
    /// downstream formatter's job.
    pub fn render(&self) -> String {
        match &self.kind {
            NodeKind::Simple(expr) => expr.clone(),
            NodeKind::Literal(value) => format!("\"{}\"", value),
            NodeKind::Enum(values) => values
                .iter()
                .map(|v| format!("\"{}\"", literal_text(v)))
                .collect::<Vec<_>>()
                .join("|"),
            NodeKind::Array(element) => format!("Array<{}>", element.render()),
            NodeKind::Object {
                properties,
                additional,
            } => {
                if properties.is_empty() && additional.is_none() {
                    return "{}".to_string();
                }
                let mut entries: Vec<String> = properties
                    .iter()
                    .map(|p| {
                        format!(
                            "{}\"{}\"{}{}",
                            p.node.comment(),
                            p.name,
                            if p.optional { "?:" } else { ":" },
                            p.node.render(),
                        )
                    })
                    .collect();
                if let Some(node) = additional {
                    entries.push(format!("[key: string]:{}", node.render()));
                }
                format!("{{{}}}", entries.join(","))
            }
            NodeKind::Union(members) => members
                .iter()
                .map(TypeNode::render)
                .collect::<Vec<_>>()
                .join("|"),
            NodeKind::Intersection(members) => members
                .iter()
                .map(TypeNode::render)
                .collect::<Vec<_>>()
                .join("&"),
            NodeKind::Generic { name, argument } => format!("{}<{}>", name, argument.render()),
        }
    }

    /// Render the metadata as a leading block comment, or `""` when there is
    /// nothing to say.
    pub fn comment(&self) -> String {
        let mut lines = Vec::new();
        if let Some(description) = &self.meta.description {
            lines.push(description.clone());
        }
        if let Some(format) = &self.meta.format {
            lines.push(format!("Format: {}", format));
        }
        if let Some(example) = &self.meta.example {
            lines.push(format!("@example {}", literal_text(example)));
        }
        match lines.len() {
            0 => String::new(),
            1 => format!("\n/* {} */\n", lines[0]),
            _ => format!("/*\n * {} \n */\n", lines.join("\n * ")),
        }
    }
}

impl std::fmt::Display for TypeNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

/// Text of a literal value as it appears inside quotes or a comment: strings
/// render bare, everything else renders as compact JSON.
fn literal_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
