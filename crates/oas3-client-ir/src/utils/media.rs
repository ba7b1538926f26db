use mediatype::MediaTypeBuf;

pub(crate) const MULTIPART_FORM_DATA: &str = "multipart/form-data";
pub(crate) const TEXT_PLAIN: &str = "text/plain";
pub(crate) const WILDCARD: &str = "*/*";

/// Strips media-type parameters (`;charset=...`) from a raw content type,
/// returning the bare `type/subtype[+suffix]` essence.
pub(crate) fn strip_parameters(raw: &str) -> String {
  match raw.trim().parse::<MediaTypeBuf>() {
    Ok(parsed) => {
      let suffix = parsed
        .suffix()
        .map(|s| format!("+{s}"))
        .unwrap_or_default();
      format!("{}/{}{}", parsed.ty(), parsed.subty(), suffix)
    }
    Err(_) => raw.trim().to_string(),
  }
}

/// Checks whether a declared content type satisfies a configured structured
/// mime type.
///
/// Parameters are stripped before comparison, and vendor trees are matched by
/// suffix: `application/vnd.api+json` satisfies `application/json`.
pub(crate) fn matches_structured(declared: &str, configured: &str) -> bool {
  let Ok(declared) = declared.trim().parse::<MediaTypeBuf>() else {
    return declared.trim().eq_ignore_ascii_case(configured);
  };
  let Ok(configured) = configured.trim().parse::<MediaTypeBuf>() else {
    return false;
  };

  if declared.ty() != configured.ty() {
    return false;
  }

  if declared.subty() == configured.subty() && declared.suffix() == configured.suffix() {
    return true;
  }

  // application/vnd.something+json against application/json
  declared
    .suffix()
    .is_some_and(|suffix| suffix.as_str() == configured.subty().as_str() && configured.suffix().is_none())
}

pub(crate) fn is_multipart(raw: &str) -> bool {
  strip_parameters(raw).eq_ignore_ascii_case(MULTIPART_FORM_DATA)
}

pub(crate) fn is_json(raw: &str) -> bool {
  matches_structured(raw, "application/json")
}

pub(crate) fn is_plain_text(raw: &str) -> bool {
  strip_parameters(raw).eq_ignore_ascii_case(TEXT_PLAIN)
}

/// Structured-but-not-JSON types we cannot deserialize yet; they degrade to a
/// binary payload.
pub(crate) fn is_structured_non_json(raw: &str) -> bool {
  let essence = strip_parameters(raw);
  let lowered = essence.to_ascii_lowercase();
  lowered.ends_with("+xml")
    || lowered.ends_with("+yaml")
    || lowered == "application/xml"
    || lowered == "text/xml"
    || lowered == "application/yaml"
    || lowered == "text/yaml"
}
