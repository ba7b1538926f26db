use strum::Display;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationStats {
  pub classes_created: usize,
  pub enumerations_created: usize,
  pub request_builders_created: usize,
  pub indexers_created: usize,
  pub operations_converted: usize,
  pub mappings_dropped: usize,
  pub classes_pruned: usize,
  pub warnings: Vec<GenerationWarning>,
}

impl GenerationStats {
  pub fn record_class(&mut self) {
    self.classes_created += 1;
  }

  pub fn record_enumeration(&mut self) {
    self.enumerations_created += 1;
  }

  pub fn record_request_builder(&mut self) {
    self.request_builders_created += 1;
  }

  pub fn record_indexer(&mut self) {
    self.indexers_created += 1;
  }

  pub fn record_operation(&mut self) {
    self.operations_converted += 1;
  }

  pub fn record_mapping_dropped(&mut self) {
    self.mappings_dropped += 1;
  }

  pub fn record_pruned(&mut self, count: usize) {
    self.classes_pruned += count;
  }

  pub fn record_warning(&mut self, warning: GenerationWarning) {
    log::warn!("{warning}");
    self.warnings.push(warning);
  }

  pub fn record_warnings(&mut self, warnings: impl IntoIterator<Item = GenerationWarning>) {
    for warning in warnings {
      self.record_warning(warning);
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GenerationWarning {
  #[strum(to_string = "Failed to convert schema '{schema_name}': {error}")]
  SchemaConversionFailed { schema_name: String, error: String },
  #[strum(to_string = "Failed to convert operation '{method} {path}': {error}")]
  OperationConversionFailed {
    method: String,
    path: String,
    error: String,
  },
  #[strum(
    to_string = "Schema '{schema_name}': discriminator value '{value}' maps to '{target}', which does not derive from it"
  )]
  DiscriminatorMappingDropped {
    schema_name: String,
    value: String,
    target: String,
  },
  #[strum(to_string = "Invalid path filter pattern '{pattern}': {error}")]
  InvalidFilterPattern { pattern: String, error: String },
}
