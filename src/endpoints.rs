//! Endpoint and operation conversion.
//!
//! Walks the document's path table and builds, for each path, one union of
//! request shapes and one method-keyed map of response shapes. Leaf schemas
//! go through [`crate::convert::convert_schema`]; parameter, request-body,
//! and response references resolve one hop through the components table.

use serde_json::{Map, Value};

use crate::convert::convert_schema;
use crate::error::GenerateError;
use crate::node::TypeNode;
use crate::options::GeneratorOptions;
use crate::resolver::resolve_if_ref;

/// Build the object node keyed by path, each value holding `responses` and
/// `requests` for that path's operations. Paths and methods keep document
/// declaration order.
pub fn endpoints_node(
    document: &Value,
    options: &GeneratorOptions,
) -> Result<TypeNode, GenerateError> {
    let mut endpoints = TypeNode::object();

    let Some(paths) = document.get("paths").and_then(Value::as_object) else {
        return Ok(endpoints);
    };

    for (path, methods) in paths {
        let Some(methods) = methods.as_object() else {
            if methods.is_null() {
                continue;
            }
            return Err(GenerateError::UnhandledOperation {
                path: path.clone(),
                method: "*".to_string(),
                fragment: methods.clone(),
            });
        };

        let mut responses = TypeNode::object();
        let mut requests = TypeNode::union(Vec::new());
        for (method, operation) in methods {
            let Some(operation) = operation.as_object() else {
                // A bare string or list where an operation object belongs.
                return Err(GenerateError::UnhandledOperation {
                    path: path.clone(),
                    method: method.clone(),
                    fragment: operation.clone(),
                });
            };
            requests.add_subtype(request_node(document, operation, method, options)?);
            responses.add_property(
                method,
                response_node(document, operation.get("responses"), options)?,
                false,
            );
        }

        let mut endpoint = TypeNode::object();
        endpoint.add_property("responses", responses, false);
        endpoint.add_property("requests", requests, false);
        endpoints.add_property(path, endpoint, false);
    }

    Ok(endpoints)
}

/// Build one request variant: method literal, `query` / `urlParams`
/// sub-objects, and the request body when one is declared.
///
/// The method tag is optional only for `get`, so an untagged request lookup
/// falls through to the `get` variant.
fn request_node(
    document: &Value,
    operation: &Map<String, Value>,
    method: &str,
    options: &GeneratorOptions,
) -> Result<TypeNode, GenerateError> {
    let mut request = TypeNode::object();
    request.add_property("method", TypeNode::literal(method), method == "get");

    if let Some(parameters) = operation.get("parameters").and_then(Value::as_array) {
        let parameters = parameters
            .iter()
            .map(|parameter| resolve_if_ref(document, parameter))
            .collect::<Result<Vec<_>, _>>()?;
        add_params_to_type(&mut request, &parameters, "query", "query", options)?;
        add_params_to_type(&mut request, &parameters, "path", "urlParams", options)?;
    }

    if let Some(request_body) = operation.get("requestBody").filter(|body| !body.is_null()) {
        let request_body = resolve_if_ref(document, request_body)?;
        let content = request_body.get("content");

        let mut body_types = Vec::new();
        if let Some(schema) = content
            .and_then(|content| content.get("application/json"))
            .and_then(|media| media.get("schema"))
        {
            body_types.push(convert_schema(schema, options)?);
        }
        if content
            .and_then(|content| content.get("multipart/form-data"))
            .and_then(|media| media.get("schema"))
            .is_some()
        {
            // Multipart bodies are opaque to the type layer.
            body_types.push(TypeNode::simple("FormData"));
        }

        if !body_types.is_empty() {
            request.add_property("body", TypeNode::union(body_types), false);
        }
    }

    Ok(request)
}

/// Group the parameters with the given `in` location under one sub-object.
///
/// The group is skipped entirely when no parameter matches; the sub-object
/// itself is optional iff none of its parameters are required, and each
/// property is optional iff that parameter is not required.
fn add_params_to_type(
    request: &mut TypeNode,
    parameters: &[&Value],
    location: &str,
    property_name: &str,
    options: &GeneratorOptions,
) -> Result<(), GenerateError> {
    let filtered: Vec<&Value> = parameters
        .iter()
        .copied()
        .filter(|p| p.get("in").and_then(Value::as_str) == Some(location))
        .collect();
    if filtered.is_empty() {
        return Ok(());
    }

    let is_required = |p: &Value| p.get("required").and_then(Value::as_bool) == Some(true);
    let any_required = filtered.iter().any(|p| is_required(p));

    let mut group = TypeNode::object();
    for parameter in &filtered {
        let name = parameter
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| unhandled_parameter(parameter))?;

        let node = if let Some(schema) = parameter.get("schema").filter(|s| !s.is_null()) {
            convert_schema(schema, options)?
        } else if let Some(content) = parameter.get("content").filter(|c| !c.is_null()) {
            convert_schema(content, options)?
        } else if let Some(ty) = parameter.get("type").and_then(Value::as_str) {
            // Swagger-era parameters carry a bare `type` string.
            convert_schema(&serde_json::json!({ "type": ty }), options)?
        } else {
            return Err(unhandled_parameter(parameter));
        };

        group.add_property(name, node, !is_required(parameter));
    }

    request.add_property(property_name, group, !any_required);
    Ok(())
}

/// Build the response node for one operation: the first declared 2xx
/// response's JSON body, or the explicit `null` type.
fn response_node(
    document: &Value,
    responses: Option<&Value>,
    options: &GeneratorOptions,
) -> Result<TypeNode, GenerateError> {
    let null = TypeNode::simple("null");

    let Some(responses) = responses.and_then(Value::as_object) else {
        return Ok(null);
    };
    let Some(response) = success_response(responses) else {
        return Ok(null);
    };
    let response = resolve_if_ref(document, response)?;

    match response
        .get("content")
        .and_then(|content| content.get("application/json"))
        .and_then(|media| media.get("schema"))
    {
        Some(schema) => convert_schema(schema, options),
        None => Ok(null),
    }
}

/// Find a 2xx response among the responses.
///
/// First match in declaration order, not numeric order: `{"201": ..., "200":
/// ...}` selects the `201` entry.
fn success_response(responses: &Map<String, Value>) -> Option<&Value> {
    responses
        .iter()
        .find(|(status, _)| status.starts_with('2'))
        .map(|(_, response)| response)
}

fn unhandled_parameter(parameter: &Value) -> GenerateError {
    GenerateError::UnhandledParameter {
        parameter: parameter.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn endpoints(document: Value) -> Result<TypeNode, GenerateError> {
        endpoints_node(&document, &GeneratorOptions::default())
    }

    fn render(document: Value) -> String {
        endpoints(document).unwrap().render()
    }

    #[test]
    fn bare_get_path() {
        let document = json!({
            "paths": {
                "/pet": {
                    "get": {
                        "responses": {}
                    }
                }
            }
        });
        assert_eq!(
            render(document),
            "{\"/pet\":{\"responses\":{\"get\":null},\"requests\":{\"method\"?:\"get\"}}}"
        );
    }

    #[test]
    fn non_get_method_tag_is_required() {
        let document = json!({
            "paths": {
                "/pet": {
                    "post": {}
                }
            }
        });
        assert_eq!(
            render(document),
            "{\"/pet\":{\"responses\":{\"post\":null},\"requests\":{\"method\":\"post\"}}}"
        );
    }

    #[test]
    fn query_and_url_params_group_by_location() {
        let document = json!({
            "paths": {
                "/pet/{petId}": {
                    "get": {
                        "parameters": [
                            {
                                "name": "petId",
                                "in": "path",
                                "required": true,
                                "schema": {"type": "integer"}
                            },
                            {
                                "name": "verbose",
                                "in": "query",
                                "schema": {"type": "boolean"}
                            }
                        ]
                    }
                }
            }
        });
        assert_eq!(
            render(document),
            "{\"/pet/{petId}\":{\"responses\":{\"get\":null},\"requests\":\
             {\"method\"?:\"get\",\"query\"?:{\"verbose\"?:boolean},\
             \"urlParams\":{\"petId\":number}}}}"
        );
    }

    #[test]
    fn empty_location_group_is_absent() {
        let document = json!({
            "paths": {
                "/search": {
                    "get": {
                        "parameters": [
                            {"name": "q", "in": "query", "schema": {"type": "string"}}
                        ]
                    }
                }
            }
        });
        // No `urlParams` key at all, not an empty object.
        let rendered = render(document);
        assert!(rendered.contains("\"query\"?:{\"q\"?:string}"));
        assert!(!rendered.contains("urlParams"));
    }

    #[test]
    fn parameter_group_required_when_any_member_is() {
        let document = json!({
            "paths": {
                "/search": {
                    "get": {
                        "parameters": [
                            {"name": "q", "in": "query", "required": true, "schema": {"type": "string"}},
                            {"name": "page", "in": "query", "schema": {"type": "integer"}}
                        ]
                    }
                }
            }
        });
        assert!(render(document).contains("\"query\":{\"q\":string,\"page\"?:number}"));
    }

    #[test]
    fn parameter_reference_resolves_one_hop() {
        let document = json!({
            "components": {
                "parameters": {
                    "PetId": {
                        "name": "petId",
                        "in": "path",
                        "required": true,
                        "schema": {"type": "integer"}
                    }
                }
            },
            "paths": {
                "/pet/{petId}": {
                    "get": {
                        "parameters": [{"$ref": "#/components/parameters/PetId"}]
                    }
                }
            }
        });
        assert!(render(document).contains("\"urlParams\":{\"petId\":number}"));
    }

    #[test]
    fn swagger_style_bare_type_parameter() {
        let document = json!({
            "paths": {
                "/pet": {
                    "get": {
                        "parameters": [
                            {"name": "limit", "in": "query", "type": "integer"}
                        ]
                    }
                }
            }
        });
        assert!(render(document).contains("\"query\"?:{\"limit\"?:number}"));
    }

    #[test]
    fn parameter_without_schema_content_or_type_fails() {
        let document = json!({
            "paths": {
                "/pet": {
                    "get": {
                        "parameters": [{"name": "broken", "in": "query"}]
                    }
                }
            }
        });
        let err = endpoints(document).unwrap_err();
        assert!(matches!(err, GenerateError::UnhandledParameter { .. }));
    }

    #[test]
    fn json_body_is_converted() {
        let document = json!({
            "paths": {
                "/pet": {
                    "post": {
                        "requestBody": {
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "object",
                                        "properties": {"name": {"type": "string"}}
                                    }
                                }
                            }
                        }
                    }
                }
            }
        });
        assert!(render(document).contains("\"body\":{\"name\"?:string}"));
    }

    #[test]
    fn multipart_body_is_form_data() {
        let document = json!({
            "paths": {
                "/upload": {
                    "post": {
                        "requestBody": {
                            "content": {
                                "multipart/form-data": {
                                    "schema": {"type": "object"}
                                }
                            }
                        }
                    }
                }
            }
        });
        assert!(render(document).contains("\"body\":FormData"));
    }

    #[test]
    fn json_and_multipart_bodies_union() {
        let document = json!({
            "paths": {
                "/upload": {
                    "post": {
                        "requestBody": {
                            "content": {
                                "application/json": {
                                    "schema": {"type": "string"}
                                },
                                "multipart/form-data": {
                                    "schema": {"type": "object"}
                                }
                            }
                        }
                    }
                }
            }
        });
        assert!(render(document).contains("\"body\":string|FormData"));
    }

    #[test]
    fn request_body_reference_resolves_one_hop() {
        let document = json!({
            "components": {
                "requestBodies": {
                    "NewPet": {
                        "content": {
                            "application/json": {
                                "schema": {"type": "object", "properties": {"name": {"type": "string"}}}
                            }
                        }
                    }
                }
            },
            "paths": {
                "/pet": {
                    "post": {
                        "requestBody": {"$ref": "#/components/requestBodies/NewPet"}
                    }
                }
            }
        });
        assert!(render(document).contains("\"body\":{\"name\"?:string}"));
    }

    #[test]
    fn first_2xx_by_declaration_order() {
        let document = json!({
            "paths": {
                "/pet": {
                    "get": {
                        "responses": {
                            "400": {"content": {"application/json": {"schema": {"type": "boolean"}}}},
                            "200": {"content": {"application/json": {"schema": {"type": "string"}}}},
                            "201": {"content": {"application/json": {"schema": {"type": "number"}}}}
                        }
                    }
                }
            }
        });
        assert!(render(document).contains("\"responses\":{\"get\":string}"));
    }

    #[test]
    fn declaration_order_beats_numeric_order() {
        let document = json!({
            "paths": {
                "/pet": {
                    "get": {
                        "responses": {
                            "201": {"content": {"application/json": {"schema": {"type": "number"}}}},
                            "200": {"content": {"application/json": {"schema": {"type": "string"}}}}
                        }
                    }
                }
            }
        });
        assert!(render(document).contains("\"responses\":{\"get\":number}"));
    }

    #[test]
    fn response_without_2xx_or_json_body_is_null() {
        let document = json!({
            "paths": {
                "/pet": {
                    "get": {
                        "responses": {
                            "404": {"description": "not found"}
                        }
                    },
                    "post": {
                        "responses": {
                            "204": {"description": "no content"}
                        }
                    }
                }
            }
        });
        let rendered = render(document);
        assert!(rendered.contains("\"responses\":{\"get\":null,\"post\":null}"));
    }

    #[test]
    fn response_reference_resolves_one_hop() {
        let document = json!({
            "components": {
                "responses": {
                    "PetResponse": {
                        "content": {
                            "application/json": {"schema": {"type": "string"}}
                        }
                    }
                }
            },
            "paths": {
                "/pet": {
                    "get": {
                        "responses": {
                            "200": {"$ref": "#/components/responses/PetResponse"}
                        }
                    }
                }
            }
        });
        assert!(render(document).contains("\"responses\":{\"get\":string}"));
    }

    #[test]
    fn string_operation_entry_fails() {
        let document = json!({
            "paths": {
                "/pet": {
                    "get": "not an operation"
                }
            }
        });
        let err = endpoints(document).unwrap_err();
        match err {
            GenerateError::UnhandledOperation { path, method, .. } => {
                assert_eq!(path, "/pet");
                assert_eq!(method, "get");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn list_operation_entry_fails() {
        let document = json!({
            "paths": {
                "/pet": {
                    "get": ["not", "an", "operation"]
                }
            }
        });
        let err = endpoints(document).unwrap_err();
        assert!(matches!(err, GenerateError::UnhandledOperation { .. }));
    }

    #[test]
    fn document_without_paths_is_empty_object() {
        assert_eq!(render(json!({})), "{}");
    }
}
