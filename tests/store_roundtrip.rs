use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use Arbalest::{AllowConfig, AllowList, MemFs, Metadata, Order, SaveOutcome, Vfs};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn unique_root(prefix: &str) -> PathBuf {
    let pid = std::process::id();
    let t = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("arbtest-{prefix}-{pid}-{t}-{id}"))
}

const DOC: &str = r#"# Primary user lookup.
variables {
  "id": 1,
}
query GetUser {
  user(id: $id) {
    ...UserFields
  }
}
fragment UserFields on User {
  name
  email
}"#;

#[test]
fn set_close_then_read_back() -> Result<()> {
    let root = unique_root("roundtrip");

    // 1) writer: set one full document, drain on close
    {
        let al = AllowList::open(&root)?;
        let md = Metadata {
            order: Order {
                var: "id".into(),
                values: vec!["1".into(), "2".into()],
            },
        };
        al.set("", DOC, md, "web")?;
        al.close()?;
    }

    // 2) reader: record came back with the same identity and body
    {
        let al = AllowList::open_ro(&root)?;
        let item = al.get_by_name("web", "GetUser")?;
        assert_eq!(item.namespace, "web");
        assert_eq!(item.name, "GetUser");
        assert_eq!(item.key(), "getuser");
        assert_eq!(item.comment, "# Primary user lookup.");
        assert!(item.query.starts_with("query GetUser {"));
        assert!(item.query.ends_with('}'));
        assert_eq!(item.metadata.order.var, "id");
        assert_eq!(item.metadata.order.values, vec!["1", "2"]);

        // vars survive modulo JSON re-formatting (comments/trailing commas
        // cleaned, pretty-printed)
        let v: serde_json::Value = serde_json::from_str(&item.vars)?;
        assert_eq!(v, serde_json::json!({ "id": 1 }));
    }

    // 3) fragments live as their own files, shared by name
    {
        let al = AllowList::open_ro(&root)?;
        let fetch = al.fragment_fetcher("web");
        let body = fetch("UserFields")?;
        assert!(body.starts_with("fragment UserFields on User"));
        assert!(root.join("fragments/web.UserFields").is_file());
    }

    Ok(())
}

#[test]
fn get_by_name_probe_order() -> Result<()> {
    let root = unique_root("probe");

    // yaml record via the store
    {
        let al = AllowList::open(&root)?;
        al.set("", "query GetInvoice { invoice { id } }", Metadata::default(), "billing")?;
        al.close()?;
    }

    // only a .yaml exists -> found through the .yml/.yaml probes
    {
        let al = AllowList::open_ro(&root)?;
        let item = al.get_by_name("billing", "GetInvoice")?;
        assert_eq!(item.name, "GetInvoice");
        assert_eq!(item.query, "query GetInvoice { invoice { id } }");
    }

    // a raw .gql with the same name wins the probe order
    fs::write(
        root.join("queries/billing.GetInvoice.gql"),
        "query GetInvoice { invoice { id total } }",
    )?;
    {
        let al = AllowList::open_ro(&root)?;
        let item = al.get_by_name("billing", "GetInvoice")?;
        assert!(item.query.contains("total"), "gql must shadow yaml");
        // namespace/name derive from the filename for raw files
        assert_eq!(item.namespace, "billing");
        assert_eq!(item.name, "GetInvoice");
    }

    // miss is an empty item, not an error
    {
        let al = AllowList::open_ro(&root)?;
        let item = al.get_by_name("billing", "Nope")?;
        assert!(item.is_empty());
    }

    Ok(())
}

#[test]
fn load_skips_unknown_and_aborts_on_broken() -> Result<()> {
    let root = unique_root("load");

    {
        let al = AllowList::open(&root)?;
        al.set("", "query A { a { id } }", Metadata::default(), "")?;
        al.set("", "query B { b { id } }", Metadata::default(), "ns")?;
        al.close()?;
    }

    // unknown extension is skipped, directories are skipped
    fs::write(root.join("queries/README.txt"), "not a record")?;
    fs::create_dir_all(root.join("queries/archive"))?;

    {
        let al = AllowList::open_ro(&root)?;
        let items = al.load()?;
        let mut names: Vec<String> = items.iter().map(|i| i.key()).collect();
        names.sort();
        assert_eq!(names, vec!["a", "b"]);
    }

    // a corrupt yaml record aborts the whole load
    fs::write(root.join("queries/broken.yaml"), "query: [unterminated")?;
    {
        let al = AllowList::open_ro(&root)?;
        assert!(al.load().is_err());
    }

    Ok(())
}

#[test]
fn load_without_queries_dir_is_empty() -> Result<()> {
    let root = unique_root("nodir");
    fs::create_dir_all(&root)?;

    let al = AllowList::open_ro(&root)?;
    let items = al.load()?;
    assert!(items.is_empty());
    Ok(())
}

#[test]
fn set_validation_is_synchronous() -> Result<()> {
    let root = unique_root("validate");

    {
        let al = AllowList::open(&root)?;
        // empty query never reaches the queue
        assert!(al.set("", "", Metadata::default(), "").is_err());
        // malformed document fails segmentation
        assert!(al.set("", "query Broken { x ", Metadata::default(), "").is_err());
        al.close()?;
    }

    // read-only store refuses writes
    {
        let al = AllowList::open_ro(&root)?;
        let err = al
            .set("", "query Q { x }", Metadata::default(), "")
            .unwrap_err();
        assert!(err.to_string().contains("read-only"));
    }

    Ok(())
}

#[test]
fn anonymous_operations_never_persist() -> Result<()> {
    let root = unique_root("anon");

    let outcomes: Arc<Mutex<Vec<SaveOutcome>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = outcomes.clone();
    let cfg = AllowConfig::default().observer(move |o: &SaveOutcome| {
        sink.lock().unwrap().push(o.clone());
    });

    {
        let al = AllowList::open_with_config(&root, cfg)?;
        // passes segmentation, dropped by the writer
        al.set("", "query { user { id } }", Metadata::default(), "")?;
        al.set("", "query Named { user { id } }", Metadata::default(), "")?;
        al.close()?;
    }

    let got = outcomes.lock().unwrap().clone();
    assert_eq!(got.len(), 2);
    assert!(matches!(got[0], SaveOutcome::Rejected { .. }));
    assert_eq!(
        got[1],
        SaveOutcome::Saved {
            namespace: String::new(),
            name: "Named".into()
        }
    );

    let al = AllowList::open_ro(&root)?;
    let items = al.load()?;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "Named");
    Ok(())
}

#[test]
fn fragments_are_shared_between_records() -> Result<()> {
    let root = unique_root("frags");

    {
        let al = AllowList::open(&root)?;
        al.set(
            "",
            "query A { u { ...UserFields } } fragment UserFields on User { name }",
            Metadata::default(),
            "app",
        )?;
        al.set(
            "",
            "query B { v { ...UserFields } } fragment UserFields on User { name }",
            Metadata::default(),
            "app",
        )?;
        al.close()?;
    }

    let al = AllowList::open_ro(&root)?;
    let fetch = al.fragment_fetcher("app");
    let a = fetch("UserFields")?;
    let b = fetch("UserFields")?;
    assert_eq!(a, b);

    // one file backs both records
    let frag_files: Vec<_> = fs::read_dir(root.join("fragments"))?
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(frag_files, vec!["app.UserFields"]);

    // unknown fragment propagates the read error
    assert!(fetch("Missing").is_err());
    Ok(())
}

#[test]
fn memfs_backed_store() -> Result<()> {
    let fs: Arc<MemFs> = Arc::new(MemFs::new());

    {
        let al = AllowList::with_vfs(
            AllowConfig::default().queue_cap(4),
            fs.clone() as Arc<dyn Vfs>,
        )?;
        al.set(
            "{\"id\": 7}",
            "query GetThing { thing(id: $id) { id } }",
            Metadata::default(),
            "",
        )?;
        al.close()?;
    }

    let al = AllowList::with_vfs_ro(fs.clone() as Arc<dyn Vfs>);
    assert!(al.is_readonly());
    let item = al.get_by_name("", "GetThing")?;
    assert_eq!(item.name, "GetThing");
    let v: serde_json::Value = serde_json::from_str(&item.vars)?;
    assert_eq!(v, serde_json::json!({ "id": 7 }));
    Ok(())
}
