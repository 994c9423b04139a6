//! parse — сегментация сырого GraphQL-документа в черновик Item.
//!
//! Разделение по подмодулям:
//! - mod.rs  — 4-состоянийная машина (Section) + flush-правило + fragment_name
//! - scan.rs — лексический сканер (токены с байтовыми оффсетами)
//!
//! A submitted document may interleave, in any order, separated only by
//! whitespace/comments:
//! - a leading comment block,
//! - a `variables` JSON block,
//! - exactly one operation body (query/mutation/subscription),
//! - zero or more fragment definitions.
//!
//! No full grammar parse here: a single left-to-right scan keyed on a handful
//! of top-level trigger tokens is enough, because the four regions never nest
//! within each other at the top level. Trigger tokens are honored only at
//! brace depth 0; a field inside a body that happens to be named
//! `subscription` must not split the document.

pub mod scan;

use anyhow::{bail, Result};

use crate::item::{Frag, Item};
use scan::{Scanner, TokKind};

/// Region currently being accumulated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Section {
    Comment,
    Variables,
    Query,
    Fragment,
}

/// Partition a raw document into comment / variables / query / fragments.
///
/// Pure function: no I/O, no shared state. Failures are malformed-input
/// errors (a non-blank braced region with no closing brace).
pub fn segment(text: &str) -> Result<Item> {
    let mut item = Item::default();
    let mut st = Section::Comment;
    let mut sp = 0usize; // split point: start of the span owned by `st`
    let mut prev_end = 0usize; // byte end of the previous token
    let mut depth = 0u32;

    for tok in Scanner::new(text) {
        match tok.kind {
            TokKind::Punct => match tok.text {
                "{" => depth += 1,
                "}" => depth = depth.saturating_sub(1),
                _ => {}
            },
            TokKind::Ident if depth == 0 => match tok.text {
                "variables" => {
                    set_value(st, &text[sp..prev_end], &mut item)?;
                    // The keyword itself is not part of the vars block.
                    sp = tok.end;
                    st = Section::Variables;
                }
                "query" | "mutation" | "subscription" => {
                    set_value(st, &text[sp..prev_end], &mut item)?;
                    // The operation keeps its own leading position.
                    sp = prev_end;
                    st = Section::Query;
                }
                "fragment" => {
                    set_value(st, &text[sp..prev_end], &mut item)?;
                    sp = prev_end;
                    st = Section::Fragment;
                }
                _ => {}
            },
            _ => {}
        }
        prev_end = tok.end;
    }

    // Trailing span. Comment/variables-only documents are not an error at
    // this layer: they yield an item with only those fields set.
    set_value(st, &text[sp..], &mut item)?;

    Ok(item)
}

/// Flush rule: assign a captured span to the field owned by `st`.
///
/// Braced regions (variables/query/fragment) are cut at their last `}`
/// (trailing whitespace/comments before the next trigger are discarded), and
/// a non-blank span without any `}` is malformed. The comment region is kept
/// verbatim (whitespace-trimmed only).
fn set_value(st: Section, span: &str, item: &mut Item) -> Result<()> {
    if st == Section::Comment {
        let v = span.trim();
        if !v.is_empty() {
            item.comment = v.to_string();
        }
        return Ok(());
    }

    if span.trim().is_empty() {
        return Ok(());
    }

    let v = match span.rfind('}') {
        Some(i) => span[..=i].trim(),
        None => bail!(
            "malformed document: unterminated {:?} block near {:?}",
            st,
            span.trim().chars().take(32).collect::<String>()
        ),
    };

    match st {
        Section::Variables => item.vars = v.to_string(),
        Section::Query => item.query = v.to_string(),
        Section::Fragment => item.frags.push(Frag {
            name: fragment_name(v),
            value: v.to_string(),
        }),
        Section::Comment => unreachable!(),
    }
    Ok(())
}

/// Extract a fragment's declared name: the identifier immediately following
/// the `fragment` keyword. Degenerate bodies yield an empty name.
pub fn fragment_name(body: &str) -> String {
    let mut toks = Scanner::new(body).filter(|t| t.kind != TokKind::Comment);
    while let Some(t) = toks.next() {
        if t.kind == TokKind::Ident && t.text == "fragment" {
            return match toks.next() {
                Some(n) if n.kind == TokKind::Ident => n.text.to_string(),
                _ => String::new(),
            };
        }
    }
    String::new()
}
