//! The extracted entity/property schema, as it lives in the schema document.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::ty::Ty;

/// One described entity type with its ordered properties.
///
/// `name` is the declared (runtime) name; it is absent for abstract
/// prototypes that exist only to be extended. `extends` is a reference by
/// class name into the prototype table, never an owning link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prototype {
    pub class_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    pub properties: Vec<Property>,
}

impl Prototype {
    pub fn is_abstract(&self) -> bool {
        self.name.is_none()
    }
}

/// One named, typed field of a prototype, with its free-text origin comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub comment: String,
    #[serde(rename = "type")]
    pub ty: Ty,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub transparent: bool,
}

/// Prototype-by-class-name table, insertion order preserved.
/// Class names must be unique across the document.
pub fn by_class_name(prototypes: &[Prototype]) -> Result<IndexMap<&str, &Prototype>, Error> {
    let mut table = IndexMap::with_capacity(prototypes.len());
    for proto in prototypes {
        if table.insert(proto.class_name.as_str(), proto).is_some() {
            return Err(Error::DuplicateClassName(proto.class_name.clone()));
        }
    }
    Ok(table)
}

/// Distinct bare type names referenced by any property, sorted. This is the
/// companion `types.txt` diagnostic; structured types are not descended into,
/// only properties whose whole type is a plain name count.
pub fn referenced_names(prototypes: &[Prototype]) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    for proto in prototypes {
        for prop in &proto.properties {
            if let Some(name) = prop.ty.as_bare_name() {
                names.insert(name.to_string());
            }
        }
    }
    names
}

// ------------------------------- Tests ------------------------------------ //
