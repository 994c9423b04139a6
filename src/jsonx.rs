//! jsonx — variables-template cleaning.
//!
//! A submitted variables block is JSON-with-liberties: it may carry `#`,
//! `//` and `/* */` comments, trailing commas and `$var` placeholders.
//! clean() strips the non-value tokens (placeholders become null so the key
//! survives); pretty() validates the result and re-encodes it as indented
//! JSON for persistence.

use anyhow::{Context, Result};

/// Strip comments and trailing commas, replace bare `$var` placeholders with
/// null. String contents are copied verbatim.
pub fn clean(text: &str) -> String {
    let cs: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < cs.len() {
        match cs[i] {
            '"' => {
                out.push('"');
                i += 1;
                while i < cs.len() {
                    out.push(cs[i]);
                    if cs[i] == '\\' && i + 1 < cs.len() {
                        out.push(cs[i + 1]);
                        i += 2;
                        continue;
                    }
                    let done = cs[i] == '"';
                    i += 1;
                    if done {
                        break;
                    }
                }
            }
            '#' => {
                while i < cs.len() && cs[i] != '\n' {
                    i += 1;
                }
            }
            '/' if i + 1 < cs.len() && cs[i + 1] == '/' => {
                while i < cs.len() && cs[i] != '\n' {
                    i += 1;
                }
            }
            '/' if i + 1 < cs.len() && cs[i + 1] == '*' => {
                i += 2;
                while i + 1 < cs.len() && !(cs[i] == '*' && cs[i + 1] == '/') {
                    i += 1;
                }
                i = (i + 2).min(cs.len());
            }
            '$' => {
                i += 1;
                let mut ate = false;
                while i < cs.len() && (cs[i] == '_' || cs[i].is_ascii_alphanumeric()) {
                    i += 1;
                    ate = true;
                }
                out.push_str(if ate { "null" } else { "$" });
            }
            c @ ('}' | ']') => {
                while out.ends_with(|ch: char| ch.is_whitespace()) {
                    out.pop();
                }
                if out.ends_with(',') {
                    out.pop();
                }
                out.push(c);
                i += 1;
            }
            c => {
                out.push(c);
                i += 1;
            }
        }
    }
    out
}

/// Re-encode cleaned JSON text as indented JSON.
pub fn pretty(text: &str) -> Result<String> {
    let v: serde_json::Value =
        serde_json::from_str(text).context("variables template is not valid json")?;
    serde_json::to_string_pretty(&v).context("variables template re-encode")
}
