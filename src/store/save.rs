//! store/save — the write path.
//!
//! set() does only synchronous validation (read-only check, empty query,
//! segmentation) and hands the draft to the queue; everything after that is
//! the background writer's business and is reported out-of-band. Callers
//! must not assume Ok(()) from set() means the record is durably stored.
//!
//! Writer, per item (strictly one at a time):
//! - canonicalize the query via the full-grammar parser;
//! - extract the operation header from the canonical form; unnamed or
//!   unparsable operations are rejected: only named operations are
//!   persisted;
//! - persist the main record (YAML, fragments excluded), then each fragment
//!   as its own file. A fragment failure aborts the remaining fragment
//!   writes but nothing already written is rolled back.

use anyhow::{anyhow, bail, Context, Result};
use std::sync::mpsc::Receiver;

use crate::config::SaveObserver;
use crate::gql;
use crate::item::{Item, Metadata};
use crate::jsonx;
use crate::metrics::{record_save, record_save_error};
use crate::parse;
use crate::vfs::Vfs;

use super::core::{file_name, AllowList, SaveOutcome, FRAGMENT_PATH, QUERY_PATH};

impl AllowList {
    /// Validate and enqueue one operation for the allow list.
    ///
    /// With the default unbuffered queue this blocks until the background
    /// writer accepts the item. The returned Ok reflects validation only,
    /// never the persistence outcome.
    pub fn set(&self, vars: &str, query: &str, metadata: Metadata, namespace: &str) -> Result<()> {
        let tx = self
            .tx
            .as_ref()
            .ok_or_else(|| anyhow!("allow list is read-only"))?;

        if query.is_empty() {
            bail!("empty query");
        }

        let mut item = parse::segment(query)?;
        item.namespace = namespace.to_string();
        if !vars.is_empty() {
            item.vars = vars.to_string();
        }
        item.metadata = metadata;

        tx.send(item).map_err(|_| anyhow!("allow list writer stopped"))?;
        Ok(())
    }
}

pub(crate) fn writer_loop(rx: &Receiver<Item>, fs: &dyn Vfs, observer: Option<&SaveObserver>) {
    // recv() keeps draining buffered items after the sender is dropped, so
    // close() never discards accepted work.
    while let Ok(item) = rx.recv() {
        let outcome = match save(fs, item) {
            Ok((namespace, name)) => {
                record_save();
                SaveOutcome::Saved { namespace, name }
            }
            Err(e) => {
                record_save_error();
                SaveOutcome::Rejected {
                    error: format!("{:#}", e),
                }
            }
        };
        match observer {
            Some(obs) => obs(&outcome),
            None => match &outcome {
                SaveOutcome::Saved { namespace, name } => {
                    log::debug!("allow list save: {}", file_name(namespace, name, ""));
                }
                SaveOutcome::Rejected { error } => {
                    log::warn!("allow list save: {}", error);
                }
            },
        }
    }
}

fn save(fs: &dyn Vfs, mut item: Item) -> Result<(String, String)> {
    let canonical = gql::canonicalize(&item.query)?;

    let op = gql::fast_parse(&canonical)?;
    if op.name.is_empty() {
        bail!("no query name defined. only named queries are saved to the allow list");
    }
    item.name = op.name;

    save_item(fs, &item)?;
    Ok((item.namespace, item.name))
}

pub(crate) fn save_item(fs: &dyn Vfs, item: &Item) -> Result<()> {
    let mut item = item.clone();

    if !item.vars.is_empty() {
        item.vars = jsonx::pretty(&jsonx::clean(&item.vars))
            .with_context(|| format!("variables of {}", item.name))?;
    }

    let doc = serde_yaml::to_string(&item).context("encode record")?;
    let fname = file_name(&item.namespace, &item.name, "yaml");
    fs.write(&format!("{QUERY_PATH}/{fname}"), doc.as_bytes())?;

    for fv in &item.frags {
        let fname = file_name(&item.namespace, &fv.name, "");
        fs.write(&format!("{FRAGMENT_PATH}/{fname}"), fv.value.as_bytes())?;
    }

    Ok(())
}
