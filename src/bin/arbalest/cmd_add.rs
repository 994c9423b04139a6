use anyhow::{bail, Context, Result};
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use Arbalest::{AllowConfig, AllowList, Metadata, SaveOutcome};

pub fn exec(path: PathBuf, file: PathBuf, namespace: String, vars: Option<PathBuf>) -> Result<()> {
    let query =
        fs::read_to_string(&file).with_context(|| format!("read {}", file.display()))?;
    let vars_text = match vars {
        Some(p) => fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?,
        None => String::new(),
    };

    // set() is fire-and-forget; collect the writer's outcome so the command
    // can report whether the record actually landed.
    let outcomes: Arc<Mutex<Vec<SaveOutcome>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = outcomes.clone();
    let cfg = AllowConfig::from_env().observer(move |o: &SaveOutcome| {
        sink.lock().unwrap().push(o.clone());
    });

    let al = AllowList::open_with_config(&path, cfg)?;
    al.set(&vars_text, &query, Metadata::default(), &namespace)?;
    al.close()?;

    let outcomes = outcomes.lock().unwrap();
    match outcomes.as_slice() {
        [SaveOutcome::Saved { namespace, name }] if namespace.is_empty() => {
            println!("saved {}", name);
        }
        [SaveOutcome::Saved { namespace, name }] => {
            println!("saved {}.{}", namespace, name);
        }
        [SaveOutcome::Rejected { error }] => bail!("not saved: {}", error),
        _ => bail!("writer reported no outcome"),
    }
    Ok(())
}
