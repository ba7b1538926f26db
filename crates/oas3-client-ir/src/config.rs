use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Supported target languages. The core never renders language syntax; the
/// tag only parameterizes naming overrides and the languages side-channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
pub enum Language {
  #[default]
  CSharp,
  Go,
  Java,
  Php,
  Python,
  Ruby,
  Swift,
  TypeScript,
}

/// The generation configuration value object handed in at the boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerationConfiguration {
  /// Name of the root client class.
  pub client_class_name: String,
  /// Root namespace; the `models` sub-namespace hangs below it.
  pub client_namespace_name: String,
  /// Structured mime types in priority order. Order decides content
  /// negotiation and accept-header generation.
  pub structured_mime_types: Vec<String>,
  /// Glob patterns selecting paths to include; an optional
  /// `#METHOD[,METHOD...]` suffix restricts the operations matched.
  pub include_patterns: Vec<String>,
  /// Glob patterns removing paths/operations, evaluated after includes.
  pub exclude_patterns: Vec<String>,
  pub language: Language,
  /// Whether generated model classes hold undeclared wire members.
  pub include_additional_data: bool,
}

impl Default for GenerationConfiguration {
  fn default() -> Self {
    Self {
      client_class_name: "ApiClient".to_string(),
      client_namespace_name: "ApiSdk".to_string(),
      structured_mime_types: vec![
        "application/json".to_string(),
        "text/plain".to_string(),
        "application/x-www-form-urlencoded".to_string(),
        "multipart/form-data".to_string(),
      ],
      include_patterns: Vec::new(),
      exclude_patterns: Vec::new(),
      language: Language::default(),
      include_additional_data: true,
    }
  }
}

impl GenerationConfiguration {
  /// Position of a declared content type in the priority list, if it matches
  /// any configured structured mime type.
  pub(crate) fn mime_priority(&self, declared: &str) -> Option<usize> {
    self
      .structured_mime_types
      .iter()
      .position(|configured| crate::utils::media::matches_structured(declared, configured))
  }
}
