//! Static primitive catalog: maps the overview document's primitive and
//! alias names to Rust type expressions. Pure lookup, no behavior.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

static PRIMITIVES: Lazy<BTreeMap<&'static str, &'static str>> = Lazy::new(|| {
    BTreeMap::from([
        ("bool", "bool"),
        ("double", "f64"),
        ("float", "f32"),
        ("int16", "i16"),
        ("int32", "i32"),
        ("int8", "i8"),
        ("string", "String"),
        ("uint16", "u16"),
        ("uint32", "u32"),
        ("uint8", "u8"),
        ("vector", "Vector2<f32>"),
    ])
});

// Fixed aliases the documentation uses interchangeably with primitives.
static ALIASES: Lazy<BTreeMap<&'static str, &'static str>> = Lazy::new(|| {
    BTreeMap::from([
        ("ItemStackIndex", "u16"),
        ("ItemCountType", "u32"),
        ("FileName", "PathBuf"),
    ])
});

/// Rust expression for a primitive or alias name, if the catalog knows it.
pub fn primitive_expr(name: &str) -> Option<&'static str> {
    PRIMITIVES
        .get(name)
        .or_else(|| ALIASES.get(name))
        .copied()
}

pub fn is_primitive(name: &str) -> bool {
    primitive_expr(name).is_some()
}
