//! The language-neutral intermediate representation.
//!
//! Classes and enumerations live in an [`IrArena`] and refer to one another
//! through copyable ids, so recursive and mutually-referential schema graphs
//! are representable without ownership cycles. Namespaces form a tree over
//! the same arena.

mod arena;
mod class;
mod enums;
mod method;
mod namespace;
mod property;
mod types;

pub use arena::{ClassId, EnumId, IrArena, NamespaceId};
pub use class::{Capability, ClassDef, ClassKind, CompositionKind, DiscriminatorBlock, Indexer, RawDiscriminator};
pub use enums::{EnumOption, EnumerationDef};
pub use method::{MethodDef, MethodKind, ParameterDef};
pub use namespace::Namespace;
pub use property::{PropertyDef, PropertyKind};
pub use types::{CollectionKind, CompositeType, Primitive, TypeKind, TypeReference};
