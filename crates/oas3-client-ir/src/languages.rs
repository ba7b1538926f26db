use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Per-language generation information sourced from the document's
/// `x-sdk-languages` extension block. The document-acquisition collaborator
/// extracts the raw value; this type owns its shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguagesInformation(pub BTreeMap<String, LanguageInformation>);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LanguageInformation {
  pub dependencies: Vec<LanguageDependency>,
  pub dependency_install_command: String,
  /// Overrides the configured client class name for this language.
  pub client_class_name: Option<String>,
  /// Overrides the configured root namespace for this language.
  pub client_namespace_name: Option<String>,
  pub structured_mime_types: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LanguageDependency {
  pub name: String,
  pub version: String,
}

impl LanguagesInformation {
  /// Parses the side-channel from the raw extension value.
  pub fn from_extension_value(value: &serde_json::Value) -> anyhow::Result<Self> {
    Ok(serde_json::from_value(value.clone())?)
  }

  pub fn get(&self, language: &str) -> Option<&LanguageInformation> {
    self
      .0
      .iter()
      .find(|(name, _)| name.eq_ignore_ascii_case(language))
      .map(|(_, info)| info)
  }
}
