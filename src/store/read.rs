//! store/read — load/get/get_by_name and extension dispatch.
//!
//! Dispatch is a small registry mapping extension -> decoder; its entry
//! order is also the probe order of get_by_name (.gql, .graphql, .yml,
//! .yaml). Raw GraphQL files are segmented on read with namespace/name taken
//! from the filename; YAML files decode into a record directly. Anything
//! else is UnknownFileType, a typed error so bulk loads can skip where
//! single gets fail.

use anyhow::{bail, Context, Result};
use std::fmt;

use crate::item::Item;
use crate::metrics::{record_items_loaded, record_unknown_skipped};
use crate::parse;
use crate::vfs::Vfs;

use super::core::{file_name, AllowList, QUERY_PATH};

/// Distinguished error: the file's extension maps to no decoder. load()
/// skips these entries; get()/get_by_name() surface them.
#[derive(Debug)]
pub struct UnknownFileType(pub String);

impl fmt::Display for UnknownFileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown filetype: {}", self.0)
    }
}

impl std::error::Error for UnknownFileType {}

type Decoder = fn(&dyn Vfs, &str) -> Result<Item>;

/// Extension registry. Entry order is the get_by_name probe order.
const DECODERS: &[(&str, Decoder)] = &[
    ("gql", item_from_gql),
    ("graphql", item_from_gql),
    ("yml", item_from_yaml),
    ("yaml", item_from_yaml),
];

impl AllowList {
    /// Read every record under queries/. A missing queries/ directory is an
    /// empty result, not an error. Entries with an unknown extension are
    /// skipped; any other failure aborts the whole load.
    pub fn load(&self) -> Result<Vec<Item>> {
        let mut items = Vec::new();

        if !self.fs.dir_exists(QUERY_PATH).context("allow list")? {
            return Ok(items);
        }

        for name in self.fs.list_files(QUERY_PATH).context("allow list")? {
            match self.get(&format!("{QUERY_PATH}/{name}")) {
                Ok(item) => items.push(item),
                Err(e) if e.downcast_ref::<UnknownFileType>().is_some() => {
                    record_unknown_skipped();
                }
                Err(e) => return Err(e),
            }
        }

        record_items_loaded(items.len() as u64);
        Ok(items)
    }

    /// Read a single record file, dispatching on its extension.
    pub fn get(&self, path: &str) -> Result<Item> {
        let ext = ext_of(path);
        let dec = DECODERS
            .iter()
            .find(|(e, _)| *e == ext)
            .map(|(_, d)| *d)
            .ok_or_else(|| anyhow::Error::new(UnknownFileType(path.to_string())))?;
        dec(self.fs.as_ref(), path)
    }

    /// Look a record up by (namespace, name), probing the accepted
    /// extensions in registry order. A miss is an empty item, not an error.
    pub fn get_by_name(&self, namespace: &str, name: &str) -> Result<Item> {
        for &(ext, _) in DECODERS {
            let path = format!("{}/{}", QUERY_PATH, file_name(namespace, name, ext));
            if self.fs.exists(&path)? {
                return self.get(&path);
            }
        }
        Ok(Item::default())
    }
}

fn item_from_gql(fs: &dyn Vfs, path: &str) -> Result<Item> {
    let base = base_name(path);
    let stem = match base.rfind('.') {
        Some(i) => &base[..i],
        None => base,
    };
    let (namespace, name) = split_name(stem);
    if name.is_empty() {
        bail!("invalid filename: {}", path);
    }

    let data = fs.read(path)?;
    let text = String::from_utf8(data).with_context(|| format!("{} is not utf-8", path))?;

    let mut item = parse::segment(&text).with_context(|| format!("segment {}", path))?;
    item.namespace = namespace.to_string();
    item.name = name.to_string();
    Ok(item)
}

fn item_from_yaml(fs: &dyn Vfs, path: &str) -> Result<Item> {
    let data = fs.read(path)?;
    serde_yaml::from_slice(&data).with_context(|| format!("decode {}", path))
}

#[inline]
fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[inline]
fn ext_of(path: &str) -> &str {
    let base = base_name(path);
    match base.rfind('.') {
        Some(i) => &base[i + 1..],
        None => "",
    }
}

/// Split a file stem into (namespace, name) on its last dot. No dot means
/// no namespace; a trailing dot yields nothing.
pub(crate) fn split_name(v: &str) -> (&str, &str) {
    match v.rfind('.') {
        None => ("", v),
        Some(i) if i < v.len() - 1 => (&v[..i], &v[i + 1..]),
        Some(_) => ("", ""),
    }
}
