//! store/core — the AllowList handle, path constants, shutdown.
//!
//! A writable AllowList owns one background writer thread fed by a bounded
//! sync channel; a read-only one has neither. Two fixed namespaces on disk:
//! queries/ (one record file per operation) and fragments/ (one extensionless
//! file per fragment).

use anyhow::{anyhow, Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::mpsc::SyncSender;
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::item::Item;
use crate::metrics::record_fragment_read;
use crate::vfs::Vfs;

pub(crate) const QUERY_PATH: &str = "queries";
pub(crate) const FRAGMENT_PATH: &str = "fragments";
pub(crate) const LOCK_FILE: &str = "LOCK";

pub(crate) fn open_lock_file(root: &Path) -> Result<std::fs::File> {
    let p = root.join(LOCK_FILE);
    let f = OpenOptions::new()
        .create(true)
        .read(true)
        .write(true)
        .open(&p)
        .with_context(|| format!("open lock file {}", p.display()))?;
    Ok(f)
}

/// Compose the on-disk file name for a (namespace, name) pair. Extension is
/// appended when non-empty; fragment files pass "".
pub(crate) fn file_name(namespace: &str, name: &str, ext: &str) -> String {
    let mut fname = String::new();
    if !namespace.is_empty() {
        fname.push_str(namespace);
        fname.push('.');
    }
    fname.push_str(name);
    if !ext.is_empty() {
        fname.push('.');
        fname.push_str(ext);
    }
    fname
}

/// Outcome of one background save, delivered to the configured observer
/// (or log::warn! for rejections when none is set). set() itself never
/// reports persistence results.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved { namespace: String, name: String },
    Rejected { error: String },
}

pub struct AllowList {
    pub(crate) fs: Arc<dyn Vfs>,
    pub(crate) tx: Option<SyncSender<Item>>,
    pub(crate) worker: Option<JoinHandle<()>>,
    pub(crate) _lock: Option<std::fs::File>, // держим дескриптор (path-backed stores)
}

impl AllowList {
    #[inline]
    pub fn is_readonly(&self) -> bool {
        self.tx.is_none()
    }

    /// Stop the write path: drop the queue, let the writer drain whatever it
    /// still holds, and join it. Items accepted by set() are never silently
    /// lost. Read operations remain usable until the value is dropped.
    pub fn close(mut self) -> Result<()> {
        self.shutdown()
    }

    pub(crate) fn shutdown(&mut self) -> Result<()> {
        drop(self.tx.take());
        if let Some(h) = self.worker.take() {
            h.join().map_err(|_| anyhow!("allow list writer panicked"))?;
        }
        Ok(())
    }

    /// Lookup function bound to a namespace: name -> raw fragment body.
    /// Fragments are shared by name, independent of which record(s)
    /// reference them.
    pub fn fragment_fetcher(
        &self,
        namespace: &str,
    ) -> impl Fn(&str) -> Result<String> + Send + Sync + 'static {
        let fs = Arc::clone(&self.fs);
        let ns = namespace.to_string();
        move |name: &str| {
            let path = format!("{}/{}", FRAGMENT_PATH, file_name(&ns, name, ""));
            let data = fs.read(&path)?;
            record_fragment_read();
            String::from_utf8(data).with_context(|| format!("fragment {} is not utf-8", path))
        }
    }
}

impl Drop for AllowList {
    fn drop(&mut self) {
        let _ = self.shutdown();
    }
}
