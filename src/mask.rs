//! Masked views of Coq text.
//!
//! A masked view blanks out every balanced parenthesis group and every atom
//! run, so that searching for a delimiter only ever finds occurrences at the
//! top syntactic level. The blanks are the same byte length as what they
//! cover, which keeps offsets into the original text valid.

use crate::error::Error;

fn is_atom_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '\'' || c == '\\'
}

// Byte ranges of the regions the mask blanks: each balanced group, and each
// maximal atom run outside one. A group that never closes is an error; a
// stray `)` at depth zero is just punctuation.
fn regions(text: &str) -> Result<Vec<(usize, usize)>, Error> {
    let mut regions = vec![];
    let mut iter = text.char_indices().peekable();
    while let Some(&(start, c)) = iter.peek() {
        if c == '(' {
            iter.next();
            let mut depth = 1;
            let mut end = None;
            for (i, c) in iter.by_ref() {
                match c {
                    '(' => depth += 1,
                    ')' => {
                        depth -= 1;
                        if depth == 0 {
                            end = Some(i + 1);
                            break;
                        }
                    }
                    _ => (),
                }
            }
            match end {
                Some(end) => regions.push((start, end)),
                None => return Err(Error::Unbalanced(String::from(text))),
            }
        } else if is_atom_char(c) {
            iter.next();
            let mut end = start + c.len_utf8();
            while let Some(&(i, c)) = iter.peek() {
                if !is_atom_char(c) {
                    break;
                }
                end = i + c.len_utf8();
                iter.next();
            }
            regions.push((start, end));
        } else {
            iter.next();
        }
    }
    Ok(regions)
}

/// The masked view itself: same byte length as `text`, with every blanked
/// region replaced by spaces.
pub fn mask(text: &str) -> Result<String, Error> {
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    for (start, end) in regions(text)? {
        out.push_str(&text[pos..start]);
        for _ in 0..end - start {
            out.push(' ');
        }
        pos = end;
    }
    out.push_str(&text[pos..]);
    Ok(out)
}

/// The blanked regions themselves, in order: each parenthesis group or atom
/// run of `text`. This is the token walk the extractor does over `forall`
/// clauses and raw declarations.
pub fn segments(text: &str) -> Result<Vec<&str>, Error> {
    Ok(regions(text)?
        .into_iter()
        .map(|(start, end)| &text[start..end])
        .collect())
}

/// Split `text` on `delim`, but only where the delimiter occurs at the top
/// syntactic level. The returned slices cover the original text exactly:
/// rejoining them with `delim` reproduces the input.
pub fn split_masked<'a>(text: &'a str, delim: &str) -> Result<Vec<&'a str>, Error> {
    let masked = mask(text)?;
    let mut parts = vec![];
    let mut start = 0;
    for (i, _) in masked.match_indices(delim) {
        parts.push(&text[start..i]);
        start = i + delim.len();
    }
    parts.push(&text[start..]);
    Ok(parts)
}
