use std::collections::BTreeMap;

use serde_json::Value;

/// Marks an enumeration schema as a bit-flags enumeration.
pub(crate) const EXT_FLAGS_ENUM: &str = "x-flags-enum";

/// Declares an operation as pageable; the object's `nextLinkName` member
/// names the property carrying the next-page link.
pub(crate) const EXT_PAGEABLE: &str = "x-pageable";

/// Marks a property schema as the primary human-readable error message.
pub(crate) const EXT_PRIMARY_ERROR_MESSAGE: &str = "x-primary-error-message";

/// Document-level block describing per-language generation information.
pub(crate) const EXT_SDK_LANGUAGES: &str = "x-sdk-languages";

pub(crate) fn bool_extension(extensions: &BTreeMap<String, Value>, name: &str) -> bool {
  extensions.get(name).and_then(Value::as_bool).unwrap_or(false)
}

/// Extracts the paging link name from an operation's extension map.
///
/// Accepts either `{"nextLinkName": "..."}` or a bare string value.
pub(crate) fn paging_link(extensions: &BTreeMap<String, Value>) -> Option<String> {
  let value = extensions.get(EXT_PAGEABLE)?;
  match value {
    Value::String(name) => Some(name.clone()),
    Value::Object(fields) => fields
      .get("nextLinkName")
      .and_then(Value::as_str)
      .map(String::from),
    _ => None,
  }
}
