use anyhow::Result;
use std::path::PathBuf;

use Arbalest::AllowList;

pub fn exec(path: PathBuf, name: String, namespace: String) -> Result<()> {
    let al = AllowList::open_ro(&path)?;
    let fetch = al.fragment_fetcher(&namespace);
    println!("{}", fetch(&name)?);
    Ok(())
}
