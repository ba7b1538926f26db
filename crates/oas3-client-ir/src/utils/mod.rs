pub(crate) mod extensions;
pub(crate) mod media;
pub(crate) mod refs;
pub(crate) mod schema_ext;

pub(crate) use refs::{extract_schema_ref_name, parse_schema_ref_path};
pub(crate) use schema_ext::SchemaExt;
