mod discriminator;
mod pruning;

use crate::{
  config::GenerationConfiguration,
  metrics::GenerationStats,
  orchestrator::{Orchestrator, SdkIr},
};

pub(super) fn compile(json: &str) -> (SdkIr, GenerationStats) {
  let spec = oas3::from_json(json).expect("failed to parse test spec");
  let orchestrator = Orchestrator::new(spec, GenerationConfiguration::default()).expect("orchestrator");
  orchestrator.compile().expect("compilation should succeed")
}

pub(super) fn find_class<'a>(
  ir: &'a SdkIr,
  name: &str,
) -> Option<(crate::ir::ClassId, &'a crate::ir::ClassDef)> {
  ir.arena.classes().find(|(_, class)| class.name == name)
}
