//! OpenAPI to TypeScript type generator.
//!
//! Converts an OpenAPI 3.0/3.1 document into static TypeScript declarations
//! describing every endpoint's request and response shape, plus lookup
//! helpers over them. The document is an in-memory, order-preserving
//! `serde_json::Value`; schema fragments convert through a recursive walker
//! into a small closed tree of type nodes, which then render as declaration
//! text.
//!
//! # Example
//!
//! ```
//! use openapi_ts::{generate, GeneratorOptions};
//! use serde_json::json;
//!
//! let document = json!({
//!     "components": {
//!         "schemas": {
//!             "Pet": {
//!                 "type": "object",
//!                 "required": ["name"],
//!                 "properties": {
//!                     "name": { "type": "string" },
//!                     "tag": { "type": "string" }
//!                 }
//!             }
//!         }
//!     },
//!     "paths": {
//!         "/pet": {
//!             "get": {
//!                 "responses": {
//!                     "200": {
//!                         "content": {
//!                             "application/json": {
//!                                 "schema": { "$ref": "#/components/schemas/Pet" }
//!                             }
//!                         }
//!                     }
//!                 }
//!             }
//!         }
//!     }
//! });
//!
//! let output = generate(&document, &GeneratorOptions::default()).unwrap();
//! assert!(output.contains("export type APISchemas = {\"Pet\":{\"name\":string,\"tag\"?:string}}"));
//! assert!(output.contains("export type APIPaths = keyof APIEndpoints"));
//! ```
//!
//! # Ordering
//!
//! Property order in every emitted declaration is the document's declaration
//! order (components, then paths, then methods). That is the crate's only
//! ordering guarantee and makes output byte-stable across runs.
//!
//! # Errors
//!
//! Conversion is all-or-nothing: an unresolvable `$ref`, an unconvertible
//! schema shape, or a malformed parameter/operation aborts generation with
//! the failing fragment attached to the error.

mod convert;
mod emit;
mod endpoints;
mod error;
mod loader;
mod node;
mod options;
mod resolver;

pub use convert::convert_schema;
pub use emit::generate;
pub use error::{GenerateError, LoadError};
pub use loader::{load_document, load_document_str, load_document_yaml_str};
pub use node::{Metadata, NodeKind, Property, TypeNode};
pub use options::GeneratorOptions;
pub use resolver::{resolve_if_ref, resolve_ref};
