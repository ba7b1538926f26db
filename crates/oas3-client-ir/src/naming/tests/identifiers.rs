use crate::naming::{escape_reserved_member, sanitize, to_member_symbol, to_parameter_symbol, to_type_symbol};

#[test]
fn sanitize_collapses_invalid_characters() {
  assert_eq!(sanitize("task--id"), "task_id");
  assert_eq!(sanitize("$select"), "select");
  assert_eq!(sanitize("  "), "");
  assert_eq!(sanitize("a/b/c"), "a_b_c");
}

#[test]
fn type_symbol_preserves_mixed_case_without_separators() {
  assert_eq!(to_type_symbol("MV22X/MV72X"), "MV22XMV72X");
  assert_eq!(to_type_symbol("oDataErrors"), "ODataErrors");
}

#[test]
fn type_symbol_pascal_cases_separated_names() {
  assert_eq!(to_type_symbol("task-list"), "TaskList");
  assert_eq!(to_type_symbol("termstore.term"), "TermstoreTerm");
  assert_eq!(to_type_symbol("user"), "User");
}

#[test]
fn type_symbol_handles_degenerate_inputs() {
  assert_eq!(to_type_symbol(""), "Unnamed");
  assert_eq!(to_type_symbol("!!!"), "Unnamed");
  assert_eq!(to_type_symbol("3dObject"), "V3dObject");
}

#[test]
fn member_symbol_is_pascal_case_with_wire_name_kept_apart() {
  assert_eq!(to_member_symbol("display-name"), "DisplayName");
  assert_eq!(to_member_symbol("odata.type"), "OdataType");
  assert_eq!(to_member_symbol("404"), "V404");
}

#[test]
fn parameter_symbol_is_camel_case() {
  assert_eq!(to_parameter_symbol("task-id"), "taskId");
  assert_eq!(to_parameter_symbol("Select"), "select");
}

#[test]
fn reserved_member_names_get_property_suffix() {
  assert_eq!(escape_reserved_member("AdditionalData"), "AdditionalDataProperty");
  assert_eq!(escape_reserved_member("BackingStore"), "BackingStoreProperty");
  assert_eq!(escape_reserved_member("DisplayName"), "DisplayName");
}
