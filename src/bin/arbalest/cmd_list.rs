use anyhow::Result;
use std::path::PathBuf;

use Arbalest::AllowList;

pub fn exec(path: PathBuf) -> Result<()> {
    let al = AllowList::open_ro(&path)?;
    let items = al.load()?;

    for item in &items {
        if item.namespace.is_empty() {
            println!("{}", item.name);
        } else {
            println!("{}.{}", item.namespace, item.name);
        }
    }
    println!("total: {}", items.len());
    Ok(())
}
