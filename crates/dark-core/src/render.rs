//! YAML rendering
//!
//! Closed enums (`Panel`, `Target`, `Variable`, ...) are written as single-key
//! mappings such as `graph: {...}` rather than YAML tags.

use serde::Serialize;
use std::io::Write;

/// Render a value as a YAML document
pub fn to_yaml<T: Serialize>(value: &T) -> Result<String, serde_yaml::Error> {
    let mut buffer = Vec::new();
    to_writer(&mut buffer, value)?;

    String::from_utf8(buffer).map_err(serde::ser::Error::custom)
}

/// Write a value as a YAML document
pub fn to_writer<W: Write, T: Serialize>(writer: W, value: &T) -> Result<(), serde_yaml::Error> {
    let mut serializer = serde_yaml::Serializer::new(writer);
    serde_yaml::with::singleton_map_recursive::serialize(value, &mut serializer)
}
