use oas3::spec::SchemaType;

use crate::ir::Primitive;

/// Maps a schema type plus optional format to a primitive symbol, per the
/// fixed table. Unknown formats fall back to the bare type's default.
pub(crate) fn primitive_for(schema_type: SchemaType, format: Option<&str>) -> Option<Primitive> {
  let primitive = match schema_type {
    SchemaType::String => match format {
      Some("date-time") => Primitive::DateTime,
      Some("date") => Primitive::DateOnly,
      Some("time") => Primitive::TimeOnly,
      Some("duration") => Primitive::Duration,
      Some("uuid" | "guid") => Primitive::Guid,
      Some("byte" | "base64" | "base64url") => Primitive::Base64,
      Some("binary") => Primitive::Binary,
      _ => Primitive::String,
    },
    SchemaType::Number => match format {
      Some("int32" | "int16") => Primitive::Integer,
      Some("int64") => Primitive::Int64,
      Some("int8") => Primitive::SignedByte,
      Some("uint8") => Primitive::Byte,
      Some("float") => Primitive::Float,
      _ => Primitive::Double,
    },
    SchemaType::Integer => match format {
      Some("int64") => Primitive::Int64,
      Some("int8") => Primitive::SignedByte,
      Some("uint8") => Primitive::Byte,
      _ => Primitive::Integer,
    },
    SchemaType::Boolean => Primitive::Boolean,
    SchemaType::Object | SchemaType::Array | SchemaType::Null => return None,
  };
  Some(primitive)
}
