// src/directory/page.rs
// Pure parsing of one search-result page. Knows where the ground truth
// lives in the HTML and nothing about networking or traversal, so it is
// testable offline against captured fixtures.
//
// Page shape:
// - Result rows live in `<tr>` blocks carrying `<span class="name">` with
//   "Last, First" text, optionally alongside `<span class="class">` with
//   the class year.
// - A results page carries three `<td class="pagination">` cells; the
//   third holds the range line, "30 of more than 30" on overflow.
// - No pagination cells at all means zero matches.

use crate::core::html::{class_blocks, inner_after_open_tag, next_tag_block_in, strip_tags, to_lower};
use crate::core::sanitize::{normalize_entities, normalize_ws};
use crate::engine::types::{Record, ResultPage};

/// Position of the range line among the pagination cells.
const RANGE_CELL: usize = 2;

pub fn parse(doc: &str) -> ResultPage {
    let pagination = class_blocks(doc, "td", "pagination");
    let Some(range_cell) = pagination.get(RANGE_CELL) else {
        return ResultPage::Empty;
    };

    let range = normalize_ws(&strip_tags(normalize_entities(&inner_after_open_tag(range_cell))));
    if range.contains("more") {
        return ResultPage::Overflow;
    }

    ResultPage::Exact(collect_records(doc))
}

fn collect_records(doc: &str) -> Vec<Record> {
    let lc = to_lower(doc); // lowered once; row scanning reuses it
    let mut records = Vec::new();
    let mut pos = 0usize;
    while let Some((tr_s, tr_e)) = next_tag_block_in(doc, &lc, "<tr", "</tr>", pos) {
        let tr = &doc[tr_s..tr_e];
        pos = tr_e;

        let Some(name_cell) = class_blocks(tr, "span", "name").into_iter().next() else {
            continue;
        };
        let listed = strip_tags(normalize_entities(&inner_after_open_tag(name_cell)));
        let Some(first) = first_name(&listed) else {
            continue;
        };

        let year = class_blocks(tr, "span", "class")
            .into_iter()
            .next()
            .and_then(|cell| parse_year(&inner_after_open_tag(cell)));

        records.push(Record::new(first, year));
    }
    records
}

/// Split a "Last, First" listing and return the first-name half.
///
/// Deliberately NOT trimmed: the one known export defect (a first name
/// with a trailing space) must survive parsing so the downstream
/// correction rule stays observable and testable.
fn first_name(listed: &str) -> Option<String> {
    let (_, first) = listed.split_once(", ")?;
    if first.is_empty() {
        return None;
    }
    Some(s!(first))
}

/// Pull a 4-digit year out of a class cell ("2016", "Class of 2016", "'16"
/// is not supported; the directory prints full years).
fn parse_year(cell: &str) -> Option<u16> {
    let text = normalize_ws(&strip_tags(normalize_entities(cell)));
    text.split_whitespace().rev().find_map(|tok| tok.parse::<u16>().ok())
}
