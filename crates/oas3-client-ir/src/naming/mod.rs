pub(crate) mod identifiers;
pub(crate) mod prefix;
pub(crate) mod scope;

pub(crate) use identifiers::{escape_reserved_member, sanitize, to_member_symbol, to_parameter_symbol, to_type_symbol};
pub(crate) use prefix::common_namespace_prefix;
pub(crate) use scope::NameScope;

#[cfg(test)]
mod tests;
