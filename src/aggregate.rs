//! Module aggregation: turns the generated units and the undeclared-name
//! accumulator into a deterministic file set.
//!
//! The set is: one `.rs` file per unit (named by snake_case identifier), a
//! `stubs.rs` closing the type universe for names the document referenced
//! but never described, and a `mod.rs` manifest. Units are ordered by
//! identifier and stubs by name, so two runs over the same schema produce
//! byte-identical output.

use crate::catalog;
use crate::codegen::{FieldDef, GeneratedUnit, UndeclaredTypes};

/// The complete generated output, as (file name, contents) pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSet {
    /// `mod.rs`: module index, re-exports, and the by-name lookup table.
    pub manifest: String,
    /// `stubs.rs`: placeholder definitions for undeclared names.
    pub stubs: String,
    /// One entry per unit, sorted by identifier.
    pub units: Vec<(String, String)>,
    /// The stub names actually emitted, for diagnostics.
    pub stub_names: Vec<String>,
}

pub fn aggregate(units: &[GeneratedUnit], undeclared: UndeclaredTypes) -> ModuleSet {
    let mut sorted: Vec<&GeneratedUnit> = units.iter().collect();
    sorted.sort_by(|a, b| a.identifier.cmp(&b.identifier));

    // stub every undeclared name that is not itself a generated unit
    // (catalog names never reach the accumulator, but filter anyway)
    let stub_names: Vec<String> = undeclared
        .into_names()
        .into_iter()
        .filter(|name| !catalog::is_primitive(name))
        .filter(|name| !sorted.iter().any(|u| u.identifier == *name))
        .collect();

    let rendered_units = sorted
        .iter()
        .map(|unit| {
            (
                format!("{}.rs", snake_case(&unit.identifier)),
                render_unit(unit),
            )
        })
        .collect();

    ModuleSet {
        manifest: render_manifest(&sorted),
        stubs: render_stubs(&stub_names),
        units: rendered_units,
        stub_names,
    }
}

// ------------------------------ Rendering --------------------------------- //

fn render_unit(unit: &GeneratedUnit) -> String {
    let mut out = String::new();
    out.push_str("use serde::{Deserialize, Serialize};\n");
    out.push_str("use super::*;\n\n");

    out.push_str("#[derive(Clone, Debug, Serialize, Deserialize)]\n");
    out.push_str(&format!("pub struct {} {{\n", unit.identifier));
    for field in &unit.fields {
        push_field(&mut out, field);
    }
    out.push_str("}\n");
    out
}

fn push_field(out: &mut String, field: &FieldDef) {
    for line in field.doc.lines() {
        let line = line.trim();
        if !line.is_empty() {
            out.push_str(&format!("    /// {line}\n"));
        }
    }
    if field.optional {
        out.push_str("    #[serde(default, skip_serializing_if = \"Option::is_none\")]\n");
    }
    out.push_str(&format!("    pub {}: {},\n", field.ident, field.ty_expr));
}

fn render_stubs(names: &[String]) -> String {
    let mut out = String::new();
    out.push_str("//! Placeholder definitions for types the overview document references\n");
    out.push_str("//! but never describes as prototypes.\n\n");
    out.push_str("use serde::{Deserialize, Serialize};\n\n");
    out.push_str("pub use std::path::PathBuf;\n");
    out.push_str("pub use nalgebra::Vector2;\n");
    for name in names {
        out.push('\n');
        out.push_str("#[derive(Clone, Debug, Serialize, Deserialize)]\n");
        out.push_str(&format!("pub struct {name};\n"));
    }
    out
}

fn render_manifest(sorted: &[&GeneratedUnit]) -> String {
    let mut out = String::new();
    out.push_str("pub mod stubs;\n");
    for unit in sorted {
        out.push_str(&format!("pub mod {};\n", snake_case(&unit.identifier)));
    }
    out.push('\n');
    out.push_str("pub use stubs::*;\n");
    for unit in sorted {
        out.push_str(&format!(
            "pub use {}::{};\n",
            snake_case(&unit.identifier),
            unit.identifier
        ));
    }

    // by-name lookup; abstract prototypes have no declared name and are
    // left out
    out.push('\n');
    out.push_str("/// Non-abstract prototypes by declared name.\n");
    out.push_str("pub const DECLARED: &[(&str, &str)] = &[\n");
    for unit in sorted {
        if let Some(declared) = &unit.declared_name {
            out.push_str(&format!("    ({declared:?}, {:?}),\n", unit.identifier));
        }
    }
    out.push_str("];\n");
    out
}

/// UpperCamelCase to snake_case, keeping acronym runs together
/// (`CurvedRail` → `curved_rail`, `NPCForce` → `npc_force`).
pub fn snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev_lower = i > 0 && chars[i - 1].is_lowercase();
            let next_lower = i + 1 < chars.len() && chars[i + 1].is_lowercase();
            if i > 0 && (prev_lower || (chars[i - 1].is_uppercase() && next_lower)) {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

// ------------------------------- Tests ------------------------------------ //
