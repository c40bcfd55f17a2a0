//! Schema-driven code generation: one `GeneratedUnit` per prototype.
//!
//! Type resolution goes through the primitive catalog; any name the catalog
//! does not know is passed through as-is and recorded in the explicit
//! `UndeclaredTypes` accumulator, which the aggregator later turns into
//! stub definitions. The accumulator is threaded by `&mut`, never held as
//! global state, so two generation runs cannot interfere.

use std::collections::BTreeSet;

use crate::catalog;
use crate::schema::Prototype;
use crate::ty::Ty;

/// Marker emitted where a type expression could not be derived: union
/// alternatives the generator deliberately does not synthesize code for,
/// and tables whose element type the phrase never named. The marker name
/// itself gets a stub so the generated module set still resolves.
pub const UNRESOLVED: &str = "Unresolved";

/// One generated struct definition plus its metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    /// Rust struct name; equals the prototype's class name.
    pub identifier: String,
    /// Runtime name the prototype is instantiated under; `None` for
    /// abstract prototypes, which never appear in by-name lookups.
    pub declared_name: Option<String>,
    pub fields: Vec<FieldDef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub ident: String,
    pub ty_expr: String,
    pub optional: bool,
    pub doc: String,
}

/// Referenced names with no primitive mapping, accumulated across a
/// generation run and consumed once by the aggregator.
#[derive(Debug, Default)]
pub struct UndeclaredTypes {
    names: BTreeSet<String>,
}

impl UndeclaredTypes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, name: &str) {
        self.names.insert(name.to_string());
    }

    /// Sorted names, consumed for stub emission.
    pub fn into_names(self) -> BTreeSet<String> {
        self.names
    }
}

/// Generate the unit for one prototype, recording unresolved references.
pub fn generate(proto: &Prototype, undeclared: &mut UndeclaredTypes) -> GeneratedUnit {
    let fields = proto
        .properties
        .iter()
        .map(|prop| {
            let mut unresolved = false;
            let resolved = resolve(&prop.ty, undeclared, &mut unresolved);
            let mut doc = prop.comment.clone();
            if unresolved {
                if !doc.is_empty() {
                    doc.push('\n');
                }
                doc.push_str(&format!("Unresolved type phrase: {}", prop.ty));
            }
            FieldDef {
                ident: escape_ident(&prop.name),
                ty_expr: if prop.optional {
                    format!("Option<{resolved}>")
                } else {
                    resolved
                },
                optional: prop.optional,
                doc,
            }
        })
        .collect();

    GeneratedUnit {
        identifier: proto.class_name.clone(),
        declared_name: proto.name.clone(),
        fields,
    }
}

/// Resolve a `Ty` to a Rust type expression. `unresolved` is set whenever a
/// placeholder marker ends up in the expression.
fn resolve(ty: &Ty, undeclared: &mut UndeclaredTypes, unresolved: &mut bool) -> String {
    match ty {
        Ty::Prim(name) => match catalog::primitive_expr(name) {
            Some(expr) => expr.to_string(),
            None => {
                undeclared.record(name);
                name.clone()
            }
        },
        Ty::TableOf(Some(elem)) => format!("Vec<{}>", resolve(elem, undeclared, unresolved)),
        Ty::TableOf(None) => {
            undeclared.record(UNRESOLVED);
            *unresolved = true;
            format!("Vec<{UNRESOLVED}>")
        }
        Ty::Tuple { elem, arity } => {
            format!("[{}; {arity}]", resolve(elem, undeclared, unresolved))
        }
        // heterogeneous alternatives stay a surfaced placeholder, not a guess
        Ty::Union(_) => {
            undeclared.record(UNRESOLVED);
            *unresolved = true;
            UNRESOLVED.to_string()
        }
    }
}

// Strict Rust keywords that can occur as property names. `self`, `super`,
// `crate` and `Self` cannot be raw identifiers, but none of them appear as
// table column names.
const RESERVED: &[&str] = &[
    "as", "break", "const", "continue", "dyn", "else", "enum", "extern", "false", "fn", "for",
    "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return",
    "static", "struct", "trait", "true", "type", "unsafe", "use", "where", "while", "async",
    "await", "box", "final", "macro", "override", "priv", "try", "typeof", "unsized", "virtual",
    "yield",
];

/// Property names colliding with a Rust keyword become raw identifiers;
/// serde strips the `r#` prefix when deriving the wire name.
fn escape_ident(name: &str) -> String {
    if RESERVED.contains(&name) {
        format!("r#{name}")
    } else {
        name.to_string()
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Property;

    fn proto(class_name: &str, name: Option<&str>, properties: Vec<Property>) -> Prototype {
        Prototype {
            class_name: class_name.to_string(),
            name: name.map(str::to_string),
            extends: None,
            properties,
        }
    }

    fn prop(name: &str, ty: Ty, optional: bool) -> Property {
        Property {
            name: name.to_string(),
            comment: format!("{name} doc"),
            ty,
            optional,
            transparent: false,
        }
    }

    #[test]
    fn primitives_resolve_through_the_catalog() {
        let mut undeclared = UndeclaredTypes::new();
        let unit = generate(
            &proto(
                "Fluid",
                Some("fluid"),
                vec![
                    prop("heat_capacity", Ty::prim("float"), false),
                    prop("icon", Ty::prim("FileName"), false),
                ],
            ),
            &mut undeclared,
        );
        assert_eq!(unit.fields[0].ty_expr, "f32");
        assert_eq!(unit.fields[1].ty_expr, "PathBuf");
        assert!(undeclared.into_names().is_empty());
    }

    #[test]
    fn optional_wraps_in_option() {
        let mut undeclared = UndeclaredTypes::new();
        let unit = generate(
            &proto(
                "Fluid",
                Some("fluid"),
                vec![prop("gas_temperature", Ty::prim("double"), true)],
            ),
            &mut undeclared,
        );
        assert_eq!(unit.fields[0].ty_expr, "Option<f64>");
        assert!(unit.fields[0].optional);
    }

    #[test]
    fn collections_and_tuples() {
        let mut undeclared = UndeclaredTypes::new();
        let unit = generate(
            &proto(
                "Rail",
                Some("rail"),
                vec![
                    prop("pictures", Ty::TableOf(Some(Box::new(Ty::prim("float")))), false),
                    prop(
                        "shift",
                        Ty::Tuple {
                            elem: Box::new(Ty::prim("Position")),
                            arity: 2,
                        },
                        false,
                    ),
                ],
            ),
            &mut undeclared,
        );
        assert_eq!(unit.fields[0].ty_expr, "Vec<f32>");
        assert_eq!(unit.fields[1].ty_expr, "[Position; 2]");
        let names: Vec<String> = undeclared.into_names().into_iter().collect();
        assert_eq!(names, ["Position"]);
    }

    #[test]
    fn unknown_names_are_recorded_once() {
        let mut undeclared = UndeclaredTypes::new();
        generate(
            &proto(
                "Car",
                Some("car"),
                vec![
                    prop("color", Ty::prim("Color"), false),
                    prop("alt_color", Ty::prim("Color"), true),
                ],
            ),
            &mut undeclared,
        );
        let names: Vec<String> = undeclared.into_names().into_iter().collect();
        assert_eq!(names, ["Color"]);
    }

    #[test]
    fn unions_emit_the_unresolved_marker() {
        let mut undeclared = UndeclaredTypes::new();
        let unit = generate(
            &proto(
                "Lamp",
                Some("lamp"),
                vec![prop(
                    "glow",
                    Ty::Union(vec![Ty::prim("float"), Ty::prim("string")]),
                    false,
                )],
            ),
            &mut undeclared,
        );
        assert_eq!(unit.fields[0].ty_expr, UNRESOLVED);
        assert!(unit.fields[0].doc.contains("float or string"));
        assert!(undeclared.into_names().contains(UNRESOLVED));
    }

    #[test]
    fn unknown_table_element_is_flagged_not_defaulted() {
        let mut undeclared = UndeclaredTypes::new();
        let unit = generate(
            &proto(
                "Lamp",
                Some("lamp"),
                vec![prop("signals", Ty::TableOf(None), false)],
            ),
            &mut undeclared,
        );
        assert_eq!(unit.fields[0].ty_expr, "Vec<Unresolved>");
        assert!(undeclared.into_names().contains(UNRESOLVED));
    }

    #[test]
    fn reserved_keyword_names_become_raw_identifiers() {
        let mut undeclared = UndeclaredTypes::new();
        let unit = generate(
            &proto(
                "Base",
                Some("base"),
                vec![prop("type", Ty::prim("string"), false)],
            ),
            &mut undeclared,
        );
        assert_eq!(unit.fields[0].ident, "r#type");
    }

    #[test]
    fn abstract_prototypes_have_no_declared_name() {
        let mut undeclared = UndeclaredTypes::new();
        let unit = generate(&proto("Entity", None, vec![]), &mut undeclared);
        assert_eq!(unit.declared_name, None);
    }
}
