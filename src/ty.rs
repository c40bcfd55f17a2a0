// Strongly-typed grammar for property types. No serde_json::Value here.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The recursive type grammar behind a property's informal type phrase.
///
/// Serializes to the schema document's wire forms: a bare string for `Prim`,
/// `{"tuple": {"of": T, "n": 1|2}}`, `{"or": [T, T]}`, `{"table_of": T|null}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TyRepr", into = "TyRepr")]
pub enum Ty {
    /// An atomic name: a primitive, an alias, a prototype reference, or a
    /// name that will end up as a stub.
    Prim(String),
    /// Unbounded ordered collection. `None` when the phrase named no
    /// element type at all (a bare "table").
    TableOf(Option<Box<Ty>>),
    /// Fixed-size collection; arity is 1 or 2.
    Tuple { elem: Box<Ty>, arity: u8 },
    /// Ordered alternatives. Never directly contains another `Union`;
    /// the phrase parser only attaches alternatives at the outermost level.
    Union(Vec<Ty>),
}

impl Ty {
    pub fn prim(name: impl Into<String>) -> Self {
        Ty::Prim(name.into())
    }

    /// The bare name when this type is a plain reference, for the
    /// companion type-name listing.
    pub fn as_bare_name(&self) -> Option<&str> {
        match self {
            Ty::Prim(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::Prim(name) => write!(f, "{name}"),
            Ty::TableOf(None) => write!(f, "table"),
            Ty::TableOf(Some(elem)) => write!(f, "table of {elem}"),
            Ty::Tuple { elem, arity } => write!(f, "table of {arity} {elem}"),
            Ty::Union(alts) => {
                for (i, alt) in alts.iter().enumerate() {
                    if i > 0 {
                        write!(f, " or ")?;
                    }
                    write!(f, "{alt}")?;
                }
                Ok(())
            }
        }
    }
}

// ------------------------------ Wire form --------------------------------- //

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TyRepr {
    Name(String),
    Tuple { tuple: TupleRepr },
    Union { or: Vec<TyRepr> },
    Table { table_of: Option<Box<TyRepr>> },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TupleRepr {
    pub of: Box<TyRepr>,
    pub n: u8,
}

impl From<Ty> for TyRepr {
    fn from(ty: Ty) -> Self {
        match ty {
            Ty::Prim(name) => TyRepr::Name(name),
            Ty::TableOf(elem) => TyRepr::Table {
                table_of: elem.map(|e| Box::new(TyRepr::from(*e))),
            },
            Ty::Tuple { elem, arity } => TyRepr::Tuple {
                tuple: TupleRepr {
                    of: Box::new(TyRepr::from(*elem)),
                    n: arity,
                },
            },
            Ty::Union(alts) => TyRepr::Union {
                or: alts.into_iter().map(TyRepr::from).collect(),
            },
        }
    }
}

impl TryFrom<TyRepr> for Ty {
    type Error = Error;

    fn try_from(repr: TyRepr) -> Result<Self, Error> {
        Ok(match repr {
            TyRepr::Name(name) => Ty::Prim(name),
            TyRepr::Table { table_of } => Ty::TableOf(match table_of {
                None => None,
                Some(elem) => Some(Box::new(Ty::try_from(*elem)?)),
            }),
            TyRepr::Tuple { tuple } => {
                if !(1..=2).contains(&tuple.n) {
                    return Err(Error::BadArity(tuple.n));
                }
                Ty::Tuple {
                    elem: Box::new(Ty::try_from(*tuple.of)?),
                    arity: tuple.n,
                }
            }
            TyRepr::Union { or } => Ty::Union(
                or.into_iter()
                    .map(Ty::try_from)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
        })
    }
}

// ------------------------------- Tests ------------------------------------ //
