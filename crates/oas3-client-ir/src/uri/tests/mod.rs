mod filters;
mod tree;

use oas3::Spec;

pub(super) fn spec_from_json(json: &str) -> Spec {
  oas3::from_json(json).expect("test spec should parse")
}
