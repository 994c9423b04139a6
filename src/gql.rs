//! gql — canonicalization and fast operation-header parse.
//!
//! Two collaborators of the write path live here:
//! - canonicalize(): full-grammar parse via the graphql-parser crate,
//!   re-emitted through its Display impl. Used by the background writer to
//!   validate the operation before extracting its authoritative name.
//! - fast_parse(): lexical read of the operation header (type + optional
//!   name) without building an AST. A bare selection set is an anonymous
//!   query.

use anyhow::{anyhow, bail, Result};

use crate::parse::scan::{Scanner, TokKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpType {
    Query,
    Mutation,
    Subscription,
}

/// Operation header: type plus declared name (empty for anonymous).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Op {
    pub op_type: OpType,
    pub name: String,
}

/// Re-parse and re-emit a query in normalized form. Errors propagate to the
/// caller (the writer logs and drops such records).
pub fn canonicalize(query: &str) -> Result<String> {
    let doc = graphql_parser::parse_query::<String>(query)
        .map_err(|e| anyhow!("graphql parse: {}", e))?;
    Ok(doc.to_string())
}

/// Extract the operation header lexically. Rejects text that does not start
/// with an operation keyword or a selection set.
pub fn fast_parse(query: &str) -> Result<Op> {
    let mut toks = Scanner::new(query).filter(|t| t.kind != TokKind::Comment);

    let first = toks
        .next()
        .ok_or_else(|| anyhow!("empty graphql document"))?;

    match (first.kind, first.text) {
        (TokKind::Ident, "query") => header(OpType::Query, toks.next()),
        (TokKind::Ident, "mutation") => header(OpType::Mutation, toks.next()),
        (TokKind::Ident, "subscription") => header(OpType::Subscription, toks.next()),
        (TokKind::Punct, "{") => Ok(Op {
            op_type: OpType::Query,
            name: String::new(),
        }),
        (_, other) => bail!("expected operation, found {:?}", other),
    }
}

fn header(op_type: OpType, tok: Option<crate::parse::scan::Token<'_>>) -> Result<Op> {
    let name = match tok {
        Some(t) if t.kind == TokKind::Ident => t.text.to_string(),
        _ => String::new(),
    };
    Ok(Op { op_type, name })
}
