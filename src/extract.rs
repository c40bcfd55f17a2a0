//! Schema extraction: walks the overview table's rows in document order and
//! groups them into `Prototype` records.
//!
//! A section-title row opens a new prototype (closing any open one); every
//! item row contributes one property to the currently open prototype. All
//! violations abort extraction; nothing is emitted for a document that was
//! only partially understood.

use crate::error::Error;
use crate::phrase;
use crate::schema::{Property, Prototype};
use crate::ty::Ty;

/// Class names in the document carry this prefix; the schema stores them bare.
pub const PROTOTYPE_PREFIX: &str = "Prototype/";

const ABSTRACT_MARKER: &str = "abstract";
const EXTENDS_MARKER: &str = "extends";
const OPTIONAL_MARKER: &str = "(optional)";

/// Marker type whose presence renames the property to a canonical identifier.
const TRANSPARENT_MARKER_TYPE: &str = "IconSpecification";
const TRANSPARENT_NAME: &str = "icon_spec";

/// One table row, as delivered by the markup walk.
#[derive(Debug, Clone)]
pub enum Row {
    /// Section-title row: the title cell's text fragments.
    Section { fields: Vec<String> },
    /// Item row: whole-row visible text, the name cell's first fragment,
    /// and the type-info cell's fragments.
    Item {
        comment: String,
        name: String,
        info: Vec<String>,
    },
}

/// Walk rows in order and emit prototypes in source order.
pub fn extract(rows: &[Row]) -> Result<Vec<Prototype>, Error> {
    let mut prototypes: Vec<Prototype> = Vec::new();
    let mut open: Option<Prototype> = None;

    for row in rows {
        match row {
            Row::Section { fields } => {
                if let Some(done) = open.take() {
                    prototypes.push(done);
                }
                open = Some(open_section(fields)?);
            }
            Row::Item {
                comment,
                name,
                info,
            } => {
                let Some(proto) = open.as_mut() else {
                    return Err(Error::OrphanItemRow(name.clone()));
                };
                proto.properties.push(parse_item(comment, name, info)?);
            }
        }
    }
    if let Some(done) = open.take() {
        prototypes.push(done);
    }

    // class_name must be unique across the document
    crate::schema::by_class_name(&prototypes)?;

    Ok(prototypes)
}

fn strip_prototype_prefix(s: &str) -> &str {
    s.strip_prefix(PROTOTYPE_PREFIX).unwrap_or(s)
}

fn open_section(fields: &[String]) -> Result<Prototype, Error> {
    if fields.len() > 4 {
        return Err(Error::OversizedSectionTitle(fields.len()));
    }
    let [class_name, declared, rest @ ..] = fields else {
        return Err(Error::TruncatedSectionTitle(fields.to_vec()));
    };

    let mut proto = Prototype {
        class_name: strip_prototype_prefix(class_name).to_string(),
        name: None,
        extends: None,
        properties: Vec::new(),
    };
    if !declared.eq_ignore_ascii_case(ABSTRACT_MARKER) {
        proto.name = Some(declared.clone());
    }
    if let [keyword, parent] = rest {
        if keyword.eq_ignore_ascii_case(EXTENDS_MARKER) {
            proto.extends = Some(strip_prototype_prefix(parent).to_string());
        }
    }
    Ok(proto)
}

fn parse_item(comment: &str, name: &str, info: &[String]) -> Result<Property, Error> {
    let mut info = info;
    let mut optional = false;
    if let [head @ .., last] = info {
        if last.eq_ignore_ascii_case(OPTIONAL_MARKER) {
            optional = true;
            info = head;
        }
    }

    let ty = phrase::parse_phrase(info)?;

    let transparent = matches!(&ty, Ty::Prim(n) if n == TRANSPARENT_MARKER_TYPE);
    let name = if transparent {
        TRANSPARENT_NAME.to_string()
    } else {
        name.to_string()
    };

    // a comma would break downstream identifier generation
    if name.contains(',') {
        return Err(Error::SeparatorInName(name));
    }

    Ok(Property {
        name,
        comment: comment.to_string(),
        ty,
        optional,
        transparent,
    })
}

// ------------------------------- Tests ------------------------------------ //
