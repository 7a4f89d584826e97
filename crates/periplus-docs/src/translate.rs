//! Operation translator.
//!
//! Turns one [`RouteContract`] plus its resolved security requirements into
//! one OpenAPI [`Operation`]. Pure: the output depends only on the inputs and
//! on what the contract's schemas compile to.

use indexmap::IndexMap;
use periplus_core::{
    HttpMethod, RequestContract, ResponseContract, ResponseSpec, RouteContract, Schema, SchemaRef,
};

use crate::builder::{status_description, DEFAULT_CONTENT_TYPE};
use crate::openapi::{
    MediaType, Operation, Parameter, ParameterIn, RequestBody, Response, SecurityRequirement,
};

/// Translates a route contract into an operation.
///
/// `security` lists the requirements resolved for the route. When empty, the
/// operation carries no `security` field at all.
///
/// # Example
///
/// ```
/// use periplus_core::{HttpMethod, RouteContract, ValidationSchema};
/// use periplus_docs::translate;
///
/// let contract = RouteContract::builder()
///     .params(ValidationSchema::object(vec![("id", ValidationSchema::string().optional())]))
///     .build();
/// let op = translate(HttpMethod::Get, &contract, &[]);
///
/// assert!(op.parameters[0].required);
/// assert!(op.security.is_none());
/// assert_eq!(op.responses["200"].description, "Successful response");
/// ```
#[must_use]
pub fn translate(
    method: HttpMethod,
    contract: &RouteContract,
    security: &[SecurityRequirement],
) -> Operation {
    let request = contract.request.as_ref();

    let mut parameters = Vec::new();
    if let Some(request) = request {
        parameters.extend(parameters_from(request.query.as_ref(), ParameterIn::Query));
        parameters.extend(parameters_from(request.params.as_ref(), ParameterIn::Path));
        parameters.extend(parameters_from(request.headers.as_ref(), ParameterIn::Header));
    }

    let request_body = request
        .filter(|_| method.is_body_bearing())
        .and_then(request_body_from);

    let responses = match &contract.response {
        Some(response) => responses_from(response),
        None => default_responses(),
    };

    Operation {
        operation_id: contract.operation_id.clone(),
        summary: contract.summary.clone(),
        description: contract.description.clone(),
        tags: contract.tags.clone(),
        deprecated: contract.deprecated,
        parameters,
        request_body,
        responses,
        security: if security.is_empty() {
            None
        } else {
            Some(security.to_vec())
        },
    }
}

/// One parameter per declared property; nothing unless the schema compiles
/// to an object with properties.
fn parameters_from(schema: Option<&SchemaRef>, location: ParameterIn) -> Vec<Parameter> {
    let Some(compiled) = schema.map(SchemaRef::compile) else {
        return Vec::new();
    };
    if !compiled.is_object_with_properties() {
        return Vec::new();
    }

    compiled
        .properties
        .iter()
        .map(|(name, property)| Parameter {
            name: name.clone(),
            location,
            required: location == ParameterIn::Path || compiled.is_required(name),
            schema: property.clone(),
        })
        .collect()
}

fn request_body_from(request: &RequestContract) -> Option<RequestBody> {
    let schema = request.body.as_ref()?.compile();

    let mut content = IndexMap::new();
    if request.content_types.is_empty() {
        content.insert(
            DEFAULT_CONTENT_TYPE.to_string(),
            MediaType::with_schema(schema),
        );
    } else {
        for content_type in &request.content_types {
            content.insert(
                content_type.clone(),
                MediaType::with_schema(schema.clone()),
            );
        }
    }

    Some(RequestBody {
        description: None,
        required: true,
        content,
    })
}

fn responses_from(contract: &ResponseContract) -> IndexMap<String, Response> {
    let content_type = contract
        .content_type
        .as_deref()
        .unwrap_or(DEFAULT_CONTENT_TYPE);

    contract
        .content
        .iter()
        .map(|(status, spec)| (status.clone(), response_from(status, spec, content_type)))
        .collect()
}

fn response_from(status: &str, spec: &ResponseSpec, content_type: &str) -> Response {
    let description = spec
        .description()
        .map_or_else(|| status_description(status).to_string(), str::to_string);

    let mut content = IndexMap::new();
    if let Some(schema) = spec.schema_ref() {
        content.insert(
            content_type.to_string(),
            MediaType::with_schema(schema.compile()),
        );
    }

    Response {
        description,
        content,
    }
}

fn default_responses() -> IndexMap<String, Response> {
    let mut content = IndexMap::new();
    content.insert(
        DEFAULT_CONTENT_TYPE.to_string(),
        MediaType::with_schema(Schema::object()),
    );

    let mut responses = IndexMap::new();
    responses.insert(
        "200".to_string(),
        Response {
            description: status_description("200").to_string(),
            content,
        },
    );
    responses
}
