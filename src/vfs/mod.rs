//! vfs — abstract hierarchical filesystem the store reads/writes through.
//!
//! The store never touches std::fs directly: all I/O goes through the Vfs
//! trait, rooted at a store directory with `/`-separated relative paths.
//! Two implementations:
//! - OsFs  — a real directory subtree; rejects paths escaping the root.
//! - MemFs — in-memory map, for tests and embedders.
//!
//! list_files returns base names of non-directory entries, sorted, so bulk
//! loads are deterministic across platforms.

use anyhow::{anyhow, Context, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::Mutex;

pub trait Vfs: Send + Sync {
    fn read(&self, path: &str) -> Result<Vec<u8>>;
    fn write(&self, path: &str, data: &[u8]) -> Result<()>;
    fn exists(&self, path: &str) -> Result<bool>;
    fn dir_exists(&self, path: &str) -> Result<bool>;
    /// Base names of non-directory entries of `dir`, sorted.
    fn list_files(&self, dir: &str) -> Result<Vec<String>>;
    fn mkdir_all(&self, path: &str) -> Result<()>;
}

// -------------------- OsFs --------------------

/// Vfs over a real directory subtree.
pub struct OsFs {
    root: PathBuf,
}

impl OsFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let rel = Path::new(path.trim_start_matches('/'));
        if rel.is_absolute()
            || rel
                .components()
                .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            return Err(anyhow!("path escapes store root: {}", path));
        }
        Ok(self.root.join(rel))
    }
}

impl Vfs for OsFs {
    fn read(&self, path: &str) -> Result<Vec<u8>> {
        let p = self.resolve(path)?;
        fs::read(&p).with_context(|| format!("read {}", p.display()))
    }

    fn write(&self, path: &str, data: &[u8]) -> Result<()> {
        let p = self.resolve(path)?;
        fs::write(&p, data).with_context(|| format!("write {}", p.display()))
    }

    fn exists(&self, path: &str) -> Result<bool> {
        Ok(self.resolve(path)?.exists())
    }

    fn dir_exists(&self, path: &str) -> Result<bool> {
        Ok(self.resolve(path)?.is_dir())
    }

    fn list_files(&self, dir: &str) -> Result<Vec<String>> {
        let p = self.resolve(dir)?;
        let mut names = Vec::new();
        let rd = fs::read_dir(&p).with_context(|| format!("read_dir {}", p.display()))?;
        for entry in rd {
            let entry = entry.with_context(|| format!("read_dir {}", p.display()))?;
            if entry.file_type()?.is_dir() {
                continue;
            }
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }

    fn mkdir_all(&self, path: &str) -> Result<()> {
        let p = self.resolve(path)?;
        fs::create_dir_all(&p).with_context(|| format!("mkdir {}", p.display()))
    }
}

// -------------------- MemFs --------------------

#[derive(Default)]
struct MemInner {
    files: BTreeMap<String, Vec<u8>>,
    dirs: BTreeSet<String>,
}

/// In-memory Vfs. Paths are normalized to no leading/trailing slash.
#[derive(Default)]
pub struct MemFs {
    inner: Mutex<MemInner>,
}

fn norm(path: &str) -> String {
    path.trim_matches('/').to_string()
}

impl MemFs {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Vfs for MemFs {
    fn read(&self, path: &str) -> Result<Vec<u8>> {
        let g = self.inner.lock().unwrap();
        g.files
            .get(&norm(path))
            .cloned()
            .ok_or_else(|| anyhow!("memfs: no such file: {}", path))
    }

    fn write(&self, path: &str, data: &[u8]) -> Result<()> {
        let p = norm(path);
        if p.is_empty() {
            return Err(anyhow!("memfs: empty path"));
        }
        self.inner.lock().unwrap().files.insert(p, data.to_vec());
        Ok(())
    }

    fn exists(&self, path: &str) -> Result<bool> {
        let p = norm(path);
        let g = self.inner.lock().unwrap();
        Ok(g.files.contains_key(&p) || g.dirs.contains(&p))
    }

    fn dir_exists(&self, path: &str) -> Result<bool> {
        let p = norm(path);
        let g = self.inner.lock().unwrap();
        Ok(g.dirs.contains(&p)
            || g.files.keys().any(|k| k.starts_with(&format!("{p}/"))))
    }

    fn list_files(&self, dir: &str) -> Result<Vec<String>> {
        let prefix = format!("{}/", norm(dir));
        let g = self.inner.lock().unwrap();
        let mut names: Vec<String> = g
            .files
            .keys()
            .filter_map(|k| k.strip_prefix(&prefix))
            .filter(|rest| !rest.contains('/'))
            .map(str::to_string)
            .collect();
        names.sort();
        Ok(names)
    }

    fn mkdir_all(&self, path: &str) -> Result<()> {
        let p = norm(path);
        if !p.is_empty() {
            self.inner.lock().unwrap().dirs.insert(p);
        }
        Ok(())
    }
}
