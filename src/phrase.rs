//! Recursive-descent parser for informal type phrases.
//!
//! The overview table describes property types in loose prose fragments like
//! `["Table", "of one or two", "Position"]` or `["Array of", "floats"]`.
//! Each production gets its own branch; anything that matches no production
//! is a hard error rather than a guess, since the output is compiled as
//! source downstream.
//!
//! Union alternatives (`… or …`) attach only at the outermost call, so a
//! `Ty::Union` can never directly contain another union.

use crate::error::Error;
use crate::ty::Ty;

/// Parse a full phrase. All fragments must be consumed.
pub fn parse_phrase(fragments: &[String]) -> Result<Ty, Error> {
    let (ty, used) = parse(fragments, false)?;
    if used < fragments.len() {
        return Err(Error::TrailingFragments {
            phrase: fragments.to_vec(),
            trailing: fragments[used..].to_vec(),
        });
    }
    Ok(ty)
}

/// One production, one token of lookahead, no backtracking.
/// Returns the parsed type and how many fragments it consumed.
fn parse(fragments: &[String], nested: bool) -> Result<(Ty, usize), Error> {
    let Some(head) = fragments.first() else {
        return Err(Error::EmptyPhrase);
    };

    // The source documents spell the same collection two ways; fold the
    // two-word "Array of" fragment into the "array" + "of" form.
    if head.eq_ignore_ascii_case("array of") {
        let mut normalized = Vec::with_capacity(fragments.len() + 1);
        normalized.push("array".to_string());
        normalized.push("of".to_string());
        normalized.extend(fragments[1..].iter().cloned());
        let (ty, used) = parse(&normalized, nested)?;
        return Ok((ty, used - 1));
    }

    let lowered = head.to_ascii_lowercase();
    let (ty, used) = if lowered == "table" || lowered == "array" {
        parse_collection(fragments)?
    } else {
        (Ty::Prim(head.clone()), 1)
    };

    // Union attachment happens in outermost calls only; a nested sub-parse
    // leaves a trailing "or" for its caller.
    if !nested {
        if let Some(next) = fragments.get(used) {
            if next.eq_ignore_ascii_case("or") {
                let (alt, alt_used) = parse(&fragments[used + 1..], true)?;
                return Ok((Ty::Union(vec![ty, alt]), used + 1 + alt_used));
            }
        }
    }

    Ok((ty, used))
}

/// The collection productions: `table`/`array` followed by a shape fragment.
fn parse_collection(fragments: &[String]) -> Result<(Ty, usize), Error> {
    let Some(shape) = fragments.get(1) else {
        // bare "table": element type unknowable from the phrase
        return Ok((Ty::TableOf(None), 1));
    };

    match shape.to_ascii_lowercase().as_str() {
        "of two" => {
            let (elem, _) = parse(element_fragment(fragments)?, true)?;
            let ty = Ty::Tuple {
                elem: Box::new(elem),
                arity: 2,
            };
            Ok((ty, 3))
        }
        "of one or two" => {
            // Each alternative re-parses the element fragment independently;
            // the alternatives do not share one parse result.
            let elem = element_fragment(fragments)?;
            let (one, _) = parse(elem, true)?;
            let (two, _) = parse(elem, true)?;
            let ty = Ty::Union(vec![
                Ty::Tuple {
                    elem: Box::new(one),
                    arity: 1,
                },
                Ty::Tuple {
                    elem: Box::new(two),
                    arity: 2,
                },
            ]);
            Ok((ty, 3))
        }
        "of" | "(array) of" => {
            let (elem, used) = parse(&fragments[2..], true)?;
            Ok((Ty::TableOf(Some(Box::new(elem))), 2 + used))
        }
        _ => Err(Error::BadCollectionShape {
            fragment: shape.clone(),
            phrase: fragments.to_vec(),
        }),
    }
}

fn element_fragment(fragments: &[String]) -> Result<&[String], Error> {
    match fragments.get(2) {
        Some(_) => Ok(&fragments[2..3]),
        None => Err(Error::TruncatedPhrase(fragments.to_vec())),
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;

    fn frags(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|p| p.to_string()).collect()
    }

    fn tuple(elem: Ty, arity: u8) -> Ty {
        Ty::Tuple {
            elem: Box::new(elem),
            arity,
        }
    }

    #[test]
    fn bare_identifiers_parse_as_prim() {
        for p in ["float", "string", "Position", "IconSpecification"] {
            assert_eq!(parse_phrase(&frags(&[p])).unwrap(), Ty::prim(p));
        }
    }

    #[test]
    fn array_of_floats() {
        assert_eq!(
            parse_phrase(&frags(&["Array", "of", "floats"])).unwrap(),
            Ty::TableOf(Some(Box::new(Ty::prim("floats"))))
        );
    }

    #[test]
    fn two_word_array_of_fragment_is_normalized() {
        assert_eq!(
            parse_phrase(&frags(&["Array of", "floats"])).unwrap(),
            Ty::TableOf(Some(Box::new(Ty::prim("floats"))))
        );
    }

    #[test]
    fn parenthesized_collection_prefix() {
        assert_eq!(
            parse_phrase(&frags(&["Table", "(array) of", "float"])).unwrap(),
            Ty::TableOf(Some(Box::new(Ty::prim("float"))))
        );
    }

    #[test]
    fn table_of_two() {
        assert_eq!(
            parse_phrase(&frags(&["Table", "of two", "Position"])).unwrap(),
            tuple(Ty::prim("Position"), 2)
        );
    }

    #[test]
    fn table_of_one_or_two() {
        assert_eq!(
            parse_phrase(&frags(&["Table", "of one or two", "Position"])).unwrap(),
            Ty::Union(vec![
                tuple(Ty::prim("Position"), 1),
                tuple(Ty::prim("Position"), 2),
            ])
        );
    }

    #[test]
    fn shape_matching_is_case_insensitive() {
        assert_eq!(
            parse_phrase(&frags(&["TABLE", "Of Two", "Position"])).unwrap(),
            tuple(Ty::prim("Position"), 2)
        );
    }

    #[test]
    fn bare_table_has_unknown_element() {
        assert_eq!(parse_phrase(&frags(&["Table"])).unwrap(), Ty::TableOf(None));
    }

    #[test]
    fn top_level_union() {
        assert_eq!(
            parse_phrase(&frags(&["float", "or", "string"])).unwrap(),
            Ty::Union(vec![Ty::prim("float"), Ty::prim("string")])
        );
    }

    #[test]
    fn union_attaches_outside_a_collection() {
        // the element parse is nested, so "or" binds to the whole table
        assert_eq!(
            parse_phrase(&frags(&["Table", "of", "float", "or", "string"])).unwrap(),
            Ty::Union(vec![
                Ty::TableOf(Some(Box::new(Ty::prim("float")))),
                Ty::prim("string"),
            ])
        );
    }

    #[test]
    fn chained_or_would_nest_unions_and_is_rejected() {
        let err = parse_phrase(&frags(&["a", "or", "b", "or", "c"])).unwrap_err();
        assert!(matches!(err, Error::TrailingFragments { .. }));
    }

    #[test]
    fn unrecognized_shape_is_a_hard_error() {
        let err = parse_phrase(&frags(&["Table", "of three", "Position"])).unwrap_err();
        assert!(matches!(err, Error::BadCollectionShape { .. }));
    }

    #[test]
    fn collection_without_element_is_a_hard_error() {
        let err = parse_phrase(&frags(&["Table", "of two"])).unwrap_err();
        assert!(matches!(err, Error::TruncatedPhrase(_)));

        let err = parse_phrase(&frags(&["Table", "of"])).unwrap_err();
        assert!(matches!(err, Error::EmptyPhrase));
    }

    #[test]
    fn empty_phrase_is_a_hard_error() {
        assert!(matches!(parse_phrase(&[]).unwrap_err(), Error::EmptyPhrase));
    }
}
