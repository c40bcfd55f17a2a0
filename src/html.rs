//! Thin wrapper over the markup document: finds the prototype overview
//! table and yields its rows. No interpretation happens here; rows go to
//! `extract` as-is.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::error::Error;
use crate::extract::Row;

static TOC: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table.prototype-toc").expect("static selector"));
static TR: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("static selector"));
static SECTION_TITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td.prototype-toc-section-title").expect("static selector"));
static ITEM_NAME: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td.prototype-toc-item-name").expect("static selector"));
static ITEM_INFO: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td.prototype-toc-item-info").expect("static selector"));

/// All rows of the overview table, in document order. Rows carrying neither
/// a section title nor an item-name/item-info cell pair are dropped, as the
/// table interleaves purely presentational rows.
pub fn rows(document: &str) -> Result<Vec<Row>, Error> {
    let doc = Html::parse_document(document);
    let toc = doc.select(&TOC).next().ok_or(Error::MissingOverviewTable)?;

    let mut out = Vec::new();
    for tr in toc.select(&TR) {
        if let Some(title) = tr.select(&SECTION_TITLE).next() {
            out.push(Row::Section {
                fields: stripped_strings(title),
            });
            continue;
        }

        let (Some(name_cell), Some(info_cell)) = (
            tr.select(&ITEM_NAME).next(),
            tr.select(&ITEM_INFO).next(),
        ) else {
            continue;
        };
        let name = stripped_strings(name_cell)
            .into_iter()
            .next()
            .ok_or(Error::EmptyItemName)?;
        out.push(Row::Item {
            comment: stripped_strings(tr).join(" "),
            name,
            info: stripped_strings(info_cell),
        });
    }
    Ok(out)
}

/// Non-empty, whitespace-trimmed text fragments of an element, in order.
fn stripped_strings(el: ElementRef) -> Vec<String> {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"
    <html><body>
    <table class="prototype-toc">
      <tr>
        <td class="prototype-toc-section-title">
          <a>Prototype/Fluid</a> <b>fluid</b> extends <a>Prototype/Entity</a>
        </td>
      </tr>
      <tr><td colspan="2">decorative divider</td></tr>
      <tr>
        <td class="prototype-toc-item-name">heat_capacity</td>
        <td class="prototype-toc-item-info"><a>string</a> <i>(optional)</i></td>
      </tr>
      <tr>
        <td class="prototype-toc-item-name">shift</td>
        <td class="prototype-toc-item-info"><a>Table</a> of two <a>Position</a></td>
      </tr>
    </table>
    </body></html>
    "#;

    #[test]
    fn section_and_item_rows_come_out_in_order() {
        let rows = rows(FIXTURE).unwrap();
        assert_eq!(rows.len(), 3);

        let Row::Section { fields } = &rows[0] else {
            panic!("expected section row");
        };
        assert_eq!(fields, &["Prototype/Fluid", "fluid", "extends", "Prototype/Entity"]);

        let Row::Item {
            comment,
            name,
            info,
        } = &rows[1]
        else {
            panic!("expected item row");
        };
        assert_eq!(name, "heat_capacity");
        assert_eq!(info, &["string", "(optional)"]);
        assert_eq!(comment, "heat_capacity string (optional)");

        let Row::Item { info, .. } = &rows[2] else {
            panic!("expected item row");
        };
        assert_eq!(info, &["Table", "of two", "Position"]);
    }

    #[test]
    fn missing_overview_table_is_a_structural_error() {
        let err = rows("<html><body><p>nothing here</p></body></html>").unwrap_err();
        assert!(matches!(err, Error::MissingOverviewTable));
    }
}
