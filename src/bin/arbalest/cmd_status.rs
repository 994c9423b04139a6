use anyhow::Result;
use std::collections::BTreeMap;
use std::path::PathBuf;

use Arbalest::{metrics_snapshot, AllowList};

pub fn exec(path: PathBuf) -> Result<()> {
    let al = AllowList::open_ro(&path)?;
    let items = al.load()?;

    let mut per_ns: BTreeMap<&str, usize> = BTreeMap::new();
    for item in &items {
        *per_ns.entry(item.namespace.as_str()).or_default() += 1;
    }

    println!("operations: {}", items.len());
    for (ns, n) in per_ns {
        let ns = if ns.is_empty() { "(default)" } else { ns };
        println!("  {:<20} {}", ns, n);
    }

    let m = metrics_snapshot();
    println!("metrics:");
    println!("  items_loaded    {}", m.items_loaded);
    println!("  unknown_skipped {}", m.unknown_skipped);
    println!("  saves_total     {}", m.saves_total);
    println!("  save_errors     {}", m.save_errors);
    println!("  fragment_reads  {}", m.fragment_reads);
    Ok(())
}
