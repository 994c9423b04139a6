//! store/open — constructors (writable/read-only) with config and locks.
//!
//! Path-backed opens mirror the single-writing-process assumption with an
//! advisory LOCK file: exclusive for writable, shared for read-only. Vfs
//! embedders (with_vfs*) get no lock; the assumption is theirs to uphold.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::path::Path;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use crate::config::AllowConfig;
use crate::item::Item;
use crate::vfs::{OsFs, Vfs};

use super::core::{open_lock_file, AllowList, FRAGMENT_PATH, LOCK_FILE, QUERY_PATH};
use super::save::writer_loop;

impl AllowList {
    /// Writable store at a real directory (created if missing), exclusive
    /// advisory lock held for the store's lifetime.
    pub fn open(root: &Path) -> Result<Self> {
        Self::open_with_config(root, AllowConfig::from_env())
    }

    pub fn open_with_config(root: &Path, cfg: AllowConfig) -> Result<Self> {
        std::fs::create_dir_all(root)
            .with_context(|| format!("create store root {}", root.display()))?;
        let lock = open_lock_file(root)?;
        lock.lock_exclusive()
            .with_context(|| format!("lock_exclusive {}", root.join(LOCK_FILE).display()))?;

        let mut al = Self::writable(cfg, Arc::new(OsFs::new(root)))?;
        al._lock = Some(lock);
        Ok(al)
    }

    /// Read-only store at a real directory: load/get/get_by_name and the
    /// fragment fetcher work, set() always fails.
    pub fn open_ro(root: &Path) -> Result<Self> {
        Self::open_ro_with_config(root, AllowConfig::from_env())
    }

    pub fn open_ro_with_config(root: &Path, _cfg: AllowConfig) -> Result<Self> {
        let lock = open_lock_file(root)?;
        lock.lock_shared()
            .with_context(|| format!("lock_shared {}", root.join(LOCK_FILE).display()))?;

        Ok(Self {
            fs: Arc::new(OsFs::new(root)),
            tx: None,
            worker: None,
            _lock: Some(lock),
        })
    }

    /// Writable store over a caller-supplied filesystem.
    pub fn with_vfs(cfg: AllowConfig, fs: Arc<dyn Vfs>) -> Result<Self> {
        Self::writable(cfg, fs)
    }

    /// Read-only store over a caller-supplied filesystem.
    pub fn with_vfs_ro(fs: Arc<dyn Vfs>) -> Self {
        Self {
            fs,
            tx: None,
            worker: None,
            _lock: None,
        }
    }

    fn writable(cfg: AllowConfig, fs: Arc<dyn Vfs>) -> Result<Self> {
        fs.mkdir_all(QUERY_PATH)?;
        fs.mkdir_all(FRAGMENT_PATH)?;

        let (tx, rx) = mpsc::sync_channel::<Item>(cfg.queue_cap);
        let worker_fs = Arc::clone(&fs);
        let observer = cfg.observer.clone();
        let worker = thread::Builder::new()
            .name("arbalest-writer".into())
            .spawn(move || writer_loop(&rx, worker_fs.as_ref(), observer.as_ref()))
            .context("spawn allow list writer")?;

        Ok(Self {
            fs,
            tx: Some(tx),
            worker: Some(worker),
            _lock: None,
        })
    }
}
