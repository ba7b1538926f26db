//! Compiles an OpenAPI v3.1 document into a language-neutral intermediate
//! representation (IR) of a client SDK.
//!
//! The IR is a tree of namespaces containing model classes, request-builder
//! classes, enumerations and typed methods, with resolved inheritance,
//! discriminated unions and error contracts. Per-language text emission,
//! document acquisition and spec validation are external collaborators.
//!
//! ## Usage
//!
//! ```no_run
//! use oas3_client_ir::{GenerationConfiguration, Orchestrator};
//!
//! # fn example() -> anyhow::Result<()> {
//! let spec_json = std::fs::read_to_string("openapi.json")?;
//! let spec = oas3::from_json(spec_json)?;
//!
//! let orchestrator = Orchestrator::new(spec, GenerationConfiguration::default())?;
//! let (ir, stats) = orchestrator.compile()?;
//!
//! println!("{} classes, {} warnings", ir.arena.class_count(), stats.warnings.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod ir;
pub mod languages;
pub mod metrics;
pub mod orchestrator;

pub(crate) mod algebra;
pub(crate) mod builder;
pub(crate) mod linker;
pub(crate) mod naming;
pub(crate) mod resolver;
pub(crate) mod uri;
pub(crate) mod utils;

pub use config::{GenerationConfiguration, Language};
pub use languages::LanguagesInformation;
pub use metrics::{GenerationStats, GenerationWarning};
pub use orchestrator::{CompileError, Orchestrator, SdkIr};

pub(crate) type ConversionResult<T> = anyhow::Result<T>;
