// src/core/html.rs
// Tolerant tag-block scanning. Case-insensitive, no full-document parse;
// we only ever look inside known blocks of a known page shape.

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

/// Find the next `<tag ...>...</tag>` block at or after `from`, scanning
/// `lc` = `to_lower(s)` (computed once by the caller; `to_lower` only
/// folds ASCII, so byte offsets in `lc` are valid in `s`). The patterns
/// must already be lowercase. Returns (start of open tag, end just past
/// the close tag).
pub fn next_tag_block_in(
    s: &str,
    lc: &str,
    open_lc: &str,
    close_lc: &str,
    from: usize,
) -> Option<(usize, usize)> {
    let start = lc.get(from..)?.find(open_lc)? + from;
    let open_end = s[start..].find('>')? + start + 1;
    let end_rel = lc[open_end..].find(close_lc)?;
    Some((start, open_end + end_rel + close_lc.len()))
}

/// Inner text span of a block: everything between the first `>` and the
/// last `<`. Returns an empty string for degenerate blocks.
pub fn inner_after_open_tag(block: &str) -> String {
    if let Some(oe) = block.find('>') {
        if let Some(cs) = block.rfind('<') {
            if cs > oe {
                return block[oe + 1..cs].to_string();
            }
        }
    }
    s!()
}

/// Does the open tag of `block` carry `class="{class}"` (either quote style)?
pub fn open_tag_has_class(block: &str, class: &str) -> bool {
    let open_end = block.find('>').unwrap_or(block.len());
    let open = to_lower(&block[..open_end]);
    let cl = to_lower(class);
    open.contains(&format!("class=\"{cl}\"")) || open.contains(&format!("class='{cl}'"))
}

/// Collect every `<tag class="{class}">…</tag>` block, in document order.
pub fn class_blocks<'a>(s: &'a str, tag: &str, class: &str) -> Vec<&'a str> {
    let lc = to_lower(s);
    let open = format!("<{}", to_lower(tag));
    let close = format!("</{}>", to_lower(tag));
    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some((bs, be)) = next_tag_block_in(s, &lc, &open, &close, pos) {
        let block = &s[bs..be];
        if open_tag_has_class(block, class) {
            out.push(block);
        }
        pos = be;
    }
    out
}

/// Strip all tags from a fragment, leaving the raw text. Whitespace is
/// left untouched; the caller decides whether to normalize it.
pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}
