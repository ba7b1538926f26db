pub(crate) mod filters;
pub(crate) mod tree;

pub(crate) use filters::PathFilterSet;
pub(crate) use tree::{PathOperation, UriNode, build_uri_tree};

#[cfg(test)]
mod tests;
