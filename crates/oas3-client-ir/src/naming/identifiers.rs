use std::{collections::HashSet, sync::LazyLock};

use any_ascii::any_ascii;
use inflections::Inflect;
use regex::Regex;

/// Member names owned by the generated-class machinery itself. A schema
/// property whose cleaned symbol collides with one of these is renamed with a
/// `Property` suffix and kept as a plain custom property.
static RESERVED_MEMBER_NAMES: LazyLock<HashSet<&str>> = LazyLock::new(|| {
  ["additionaldata", "backingstore", "fieldserializers", "urltemplate", "pathparameters"]
    .into_iter()
    .collect()
});

static INVALID_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]+").unwrap());
static MULTI_UNDERSCORE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_+").unwrap());

/// Base sanitization shared by every symbol role: transliterates to ASCII,
/// replaces invalid characters with underscores, collapses consecutive
/// underscores, and trims any leading or trailing underscores.
pub(crate) fn sanitize(input: &str) -> String {
  if input.is_empty() {
    return String::new();
  }

  let ascii = any_ascii(input);
  let replaced = INVALID_CHARS_RE.replace_all(&ascii, "_");
  let collapsed = MULTI_UNDERSCORE_RE.replace_all(&replaced, "_");

  collapsed.trim_matches('_').to_string()
}

/// Converts a raw name into a type symbol (`PascalCase`).
///
/// # Rules:
/// 1. Sanitizes the base string; a fully invalid or empty input becomes `Unnamed`.
/// 2. All-caps inputs keep their capitalization with separators dropped
///    (`MV22X/MV72X` becomes `MV22XMV72X`).
/// 3. Mixed-case inputs without separators keep their capitalization apart
///    from an uppercased first letter.
/// 4. A result starting with a digit is prefixed with `V`.
pub(crate) fn to_type_symbol(raw: &str) -> String {
  let has_separators = raw.contains(['-', '_', '.', ' ', '/']);
  let has_upper = raw.chars().any(|c| c.is_ascii_uppercase());
  let has_lower = raw.chars().any(|c| c.is_ascii_lowercase());

  let mut symbol = if has_upper && !has_lower {
    any_ascii(raw).chars().filter(char::is_ascii_alphanumeric).collect()
  } else if !has_separators && has_upper && has_lower {
    let cleaned: String = any_ascii(raw).chars().filter(char::is_ascii_alphanumeric).collect();
    let mut chars = cleaned.chars();
    match chars.next() {
      None => String::new(),
      Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
  } else {
    sanitize(raw).to_pascal_case()
  };

  if symbol.is_empty() {
    return "Unnamed".to_string();
  }

  if symbol.starts_with(|c: char| c.is_ascii_digit()) {
    symbol.insert(0, 'V');
  }
  symbol
}

/// Converts a raw wire name into a member symbol (`PascalCase`), preserving
/// nothing of the original separators. The wire name is kept separately for
/// serialization.
pub(crate) fn to_member_symbol(raw: &str) -> String {
  let mut symbol = sanitize(raw).to_pascal_case();
  if symbol.is_empty() {
    return "UnnamedMember".to_string();
  }
  if symbol.starts_with(|c: char| c.is_ascii_digit()) {
    symbol.insert(0, 'V');
  }
  symbol
}

/// Converts a raw name into a parameter symbol (`camelCase`).
pub(crate) fn to_parameter_symbol(raw: &str) -> String {
  let mut symbol = sanitize(raw).to_camel_case();
  if symbol.is_empty() {
    return "parameter".to_string();
  }
  if symbol.starts_with(|c: char| c.is_ascii_digit()) {
    symbol.insert(0, 'v');
  }
  symbol
}

/// Escapes a member symbol that collides with a framework-owned member name.
///
/// A property serialized as `additionalData` would shadow the built-in
/// extension-data property, so it becomes `AdditionalDataProperty` instead.
pub(crate) fn escape_reserved_member(symbol: &str) -> String {
  if RESERVED_MEMBER_NAMES.contains(symbol.to_ascii_lowercase().as_str()) {
    format!("{symbol}Property")
  } else {
    symbol.to_string()
  }
}
