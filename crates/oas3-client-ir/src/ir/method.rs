use std::collections::BTreeMap;

use strum::Display;

use super::types::TypeReference;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum MethodKind {
  Constructor,
  ClientConstructor,
  /// Sends the request and deserializes the selected response.
  RequestExecutor,
  /// Builds the request information without sending it.
  RequestGenerator,
  /// Instantiates the concrete subtype selected by a discriminator value.
  Factory,
  Deserializer,
  Serializer,
}

#[derive(Debug, Clone, bon::Builder)]
pub struct ParameterDef {
  #[builder(into)]
  pub name: String,
  #[builder(into)]
  pub wire_name: String,
  pub type_ref: TypeReference,
  #[builder(default)]
  pub optional: bool,
  pub description: Option<String>,
}

#[derive(Debug, Clone, bon::Builder)]
pub struct MethodDef {
  #[builder(into)]
  pub name: String,
  pub kind: MethodKind,
  /// Set for request executors and generators.
  pub http_method: Option<http::Method>,
  #[builder(default)]
  pub parameters: Vec<ParameterDef>,
  /// `None` is a void return (a true no-content operation).
  pub return_type: Option<TypeReference>,
  /// Status code (or `4XX`/`5XX` range) to error type.
  #[builder(default)]
  pub error_mappings: BTreeMap<String, TypeReference>,
  /// Wire name of the property carrying the next-page link, when pageable.
  pub paging_link: Option<String>,
  /// Ordered response content types this method accepts.
  #[builder(default)]
  pub acceptable_media_types: Vec<String>,
  /// Content type of the request body, when one is sent.
  pub request_content_type: Option<String>,
  pub description: Option<String>,
  #[builder(default)]
  pub deprecated: bool,
}
