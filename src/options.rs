//! Resolved generator options.

/// Options controlling the generated declarations.
///
/// This is the already-resolved configuration the generator consumes; reading
/// a config file or CLI flags into it is the caller's job.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Prefix for every generated type name (`APISchemas`, `APIEndpoints`,
    /// `APIPaths`, ...).
    pub type_prefix: String,
    /// When true, JSON media-type envelopes render as `JSONString<T>` to
    /// model JSON transmitted as an opaque string.
    pub json_string_bodies: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        GeneratorOptions {
            type_prefix: "API".to_string(),
            json_string_bodies: false,
        }
    }
}

impl GeneratorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the prefix for generated type names.
    pub fn type_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.type_prefix = prefix.into();
        self
    }

    /// Enable or disable the `JSONString` body dialect.
    pub fn json_string_bodies(mut self, enabled: bool) -> Self {
        self.json_string_bodies = enabled;
        self
    }
}

/// Uppercase the first character, leaving the rest untouched
/// (`schemas` -> `Schemas`, `requestBodies` -> `RequestBodies`).
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
