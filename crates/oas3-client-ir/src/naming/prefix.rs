/// Computes the deepest common leading namespace shared by every schema name.
///
/// Schema names are dotted (`microsoft.graph.user`); the final segment is the
/// type name and never participates in the prefix. Any name that disagrees on
/// a leading segment collapses the prefix to the empty string, as does an
/// empty input set.
pub(crate) fn common_namespace_prefix<'a, I>(names: I) -> String
where
  I: IntoIterator<Item = &'a str>,
{
  let mut common: Option<Vec<&str>> = None;

  for name in names {
    let mut segments: Vec<&str> = name.split('.').collect();
    // drop the type-name segment
    segments.pop();

    common = Some(match common {
      None => segments,
      Some(existing) => existing
        .iter()
        .zip(segments.iter())
        .take_while(|(a, b)| a.eq_ignore_ascii_case(b))
        .map(|(a, _)| *a)
        .collect(),
    });

    if common.as_ref().is_some_and(Vec::is_empty) {
      return String::new();
    }
  }

  common.map(|segments| segments.join(".")).unwrap_or_default()
}

/// Strips the common prefix from a schema name, returning the remainder
/// (namespace segments plus the type-name segment).
pub(crate) fn strip_prefix<'a>(name: &'a str, prefix: &str) -> &'a str {
  if prefix.is_empty() {
    return name;
  }
  name
    .strip_prefix(prefix)
    .map(|rest| rest.trim_start_matches('.'))
    .unwrap_or(name)
}
