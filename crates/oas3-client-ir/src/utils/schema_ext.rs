use oas3::spec::{ObjectSchema, SchemaType, SchemaTypeSet};

/// Extension methods for `ObjectSchema` to query its shape conveniently.
pub(crate) trait SchemaExt {
  /// Returns true if the schema is explicitly the null type.
  fn is_null(&self) -> bool;

  /// Returns true if the schema is a `oneOf`/`anyOf` filler member: a pure
  /// null schema, or an empty object schema that constrains nothing.
  fn is_filler(&self) -> bool;

  /// Returns true if the schema is an array type.
  fn is_array(&self) -> bool;

  /// Returns true if the schema describes an object shape (declared object
  /// type, properties, or additional properties).
  fn has_object_shape(&self) -> bool;

  /// Returns true if the schema carries `oneOf`, `anyOf` or `allOf` members.
  fn has_composition(&self) -> bool;

  /// Returns true if the schema has enum values defined.
  fn has_enum_values(&self) -> bool;

  /// Returns the single `SchemaType` if exactly one is defined.
  fn single_type(&self) -> Option<SchemaType>;

  /// Returns the non-null type from a two-type nullable set
  /// (e.g. `["string", "null"]` -> `string`).
  fn non_null_type(&self) -> Option<SchemaType>;
}

impl SchemaExt for ObjectSchema {
  fn is_null(&self) -> bool {
    matches!(self.schema_type, Some(SchemaTypeSet::Single(SchemaType::Null)))
  }

  fn is_filler(&self) -> bool {
    if self.is_null() {
      return true;
    }
    if !self.properties.is_empty() || self.has_composition() || self.has_enum_values() {
      return false;
    }
    match &self.schema_type {
      None => self.additional_properties.is_none() && self.items.is_none(),
      Some(SchemaTypeSet::Single(SchemaType::Object)) => self.additional_properties.is_none(),
      Some(SchemaTypeSet::Multiple(types)) => types.iter().all(|t| matches!(t, SchemaType::Null | SchemaType::Object)),
      _ => false,
    }
  }

  fn is_array(&self) -> bool {
    match &self.schema_type {
      Some(SchemaTypeSet::Single(SchemaType::Array)) => true,
      Some(SchemaTypeSet::Multiple(types)) => types.contains(&SchemaType::Array),
      _ => self.items.is_some(),
    }
  }

  fn has_object_shape(&self) -> bool {
    !self.properties.is_empty()
      || self.additional_properties.is_some()
      || matches!(self.single_type(), Some(SchemaType::Object))
      || matches!(self.non_null_type(), Some(SchemaType::Object))
  }

  fn has_composition(&self) -> bool {
    !self.all_of.is_empty() || !self.one_of.is_empty() || !self.any_of.is_empty()
  }

  fn has_enum_values(&self) -> bool {
    !self.enum_values.is_empty()
  }

  fn single_type(&self) -> Option<SchemaType> {
    match &self.schema_type {
      Some(SchemaTypeSet::Single(typ)) => Some(*typ),
      _ => None,
    }
  }

  fn non_null_type(&self) -> Option<SchemaType> {
    match &self.schema_type {
      Some(SchemaTypeSet::Multiple(types)) if types.len() == 2 && types.contains(&SchemaType::Null) => {
        types.iter().find(|t| **t != SchemaType::Null).copied()
      }
      _ => None,
    }
  }
}
