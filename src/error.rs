use thiserror::Error;

/// Hard failures. Each one aborts the whole run; the pipeline never writes
/// output derived from input it could not fully understand.
#[derive(Debug, Error)]
pub enum Error {
    // ---- grammar violations (type phrases) ----
    #[error("empty type phrase")]
    EmptyPhrase,

    #[error("unrecognized collection shape {fragment:?} in type phrase {phrase:?}")]
    BadCollectionShape { fragment: String, phrase: Vec<String> },

    #[error("type phrase {0:?} ends before its element type")]
    TruncatedPhrase(Vec<String>),

    #[error("trailing fragments {trailing:?} after type phrase {phrase:?}")]
    TrailingFragments { phrase: Vec<String>, trailing: Vec<String> },

    #[error("tuple arity {0} is out of range (only 1 and 2 occur)")]
    BadArity(u8),

    // ---- schema violations (table rows) ----
    #[error("property name {0:?} contains a comma")]
    SeparatorInName(String),

    #[error("section title row has {0} fields; at most 4 are allowed")]
    OversizedSectionTitle(usize),

    #[error("section title row {0:?} is missing its name field")]
    TruncatedSectionTitle(Vec<String>),

    #[error("duplicate prototype class name {0:?}")]
    DuplicateClassName(String),

    // ---- structural assumptions ----
    #[error("document contains no prototype overview table")]
    MissingOverviewTable,

    #[error("item row for {0:?} appears before any section title")]
    OrphanItemRow(String),

    #[error("item row has an empty name cell")]
    EmptyItemName,
}
