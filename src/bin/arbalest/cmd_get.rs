use anyhow::{bail, Result};
use std::path::PathBuf;

use Arbalest::AllowList;

pub fn exec(path: PathBuf, name: String, namespace: String, query_only: bool) -> Result<()> {
    let al = AllowList::open_ro(&path)?;
    let item = al.get_by_name(&namespace, &name)?;
    if item.is_empty() {
        bail!("no such operation: {}", name);
    }

    if query_only {
        println!("{}", item.query);
    } else {
        print!("{}", serde_yaml::to_string(&item)?);
    }
    Ok(())
}
