//! Cross-crate scenarios: providers, loaders and nodes working together

use std::sync::Arc;
use std::thread;

use cfgtree_content::{FormatLoader, LoaderRegistry, Mapping};
use cfgtree_core::{ConfigNode, TreeOptions};
use cfgtree_fs::{FsResource, MemoryResource};
use cfgtree_test_utils::{ReadOnceResource, TestTree};
use pretty_assertions::assert_eq;
use serde_json::json;

fn memory_tree() -> MemoryResource {
    MemoryResource::container(
        "root",
        [MemoryResource::container(
            "app",
            [
                MemoryResource::leaf(".ini", "debug = true\n"),
                MemoryResource::container(
                    "db",
                    [MemoryResource::leaf("main.json", r#"{"host": "local"}"#)],
                ),
                MemoryResource::leaf("cache.yaml", "ttl: 60\n"),
            ],
        )],
    )
}

fn disk_tree() -> TestTree {
    let tree = TestTree::new();
    tree.file("app/.ini", "debug = true\n")
        .file("app/db/main.json", r#"{"host": "local"}"#)
        .file("app/cache.yaml", "ttl: 60\n");
    tree
}

#[test]
fn test_memory_and_disk_trees_agree() {
    let disk = disk_tree();
    let from_disk = ConfigNode::new(FsResource::open(disk.root()).unwrap(), &TreeOptions::default())
        .unwrap();
    let from_memory = ConfigNode::new(memory_tree(), &TreeOptions::default()).unwrap();

    assert_eq!(from_disk.to_json().unwrap(), from_memory.to_json().unwrap());
    assert_eq!(
        from_memory.to_json().unwrap(),
        json!({"app": {"cache": {"ttl": 60}, "db": {"main": {"host": "local"}}, "debug": true}})
    );
}

#[test]
fn test_repeated_queries_never_reread() {
    let config = ConfigNode::new(ReadOnceResource::new(memory_tree()), &TreeOptions::default())
        .unwrap();

    for path in ["app/debug", "App/Db/Main/Host", "/app//cache/ttl/", "app/missing"] {
        config.find(path).unwrap();
        config.find(path).unwrap();
    }
    config.to_json().unwrap();
    config.to_json().unwrap();
}

#[test]
fn test_concurrent_first_access() {
    let config = Arc::new(
        ConfigNode::new(ReadOnceResource::new(memory_tree()), &TreeOptions::default()).unwrap(),
    );

    let handles: Vec<_> = (0..8)
        .map(|idx| {
            let config = Arc::clone(&config);
            thread::spawn(move || {
                let path = if idx % 2 == 0 { "app/db/main/host" } else { "APP/DB/MAIN/HOST" };
                config.get(path).unwrap().to_json().unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), json!("local"));
    }
}

/// Reads `key: value` lines
#[derive(Debug)]
struct ColonLoader;

impl FormatLoader for ColonLoader {
    fn name(&self) -> &str {
        "colon pairs"
    }

    fn load(&self, source: &[u8]) -> cfgtree_content::Result<Mapping> {
        let text = String::from_utf8_lossy(source);
        Ok(text
            .lines()
            .filter_map(|line| line.split_once(':'))
            .map(|(key, value)| (key.trim().to_string(), json!(value.trim())))
            .collect())
    }
}

#[test]
fn test_custom_loader_registration() {
    let mut registry = LoaderRegistry::with_builtins();
    registry.register("pairs", Arc::new(ColonLoader));

    let root = MemoryResource::container(
        "app",
        [MemoryResource::leaf("env.pairs", "HOME: /srv\nSHELL: /bin/sh\n")],
    );
    let config = ConfigNode::with_registry(Box::new(root), registry);

    assert_eq!(config.get("env/home").unwrap(), json!("/srv"));
    assert_eq!(config.get("ENV/SHELL").unwrap(), json!("/bin/sh"));
}

#[test]
fn test_nested_container_defaults_chain() {
    let tree = TestTree::new();
    tree.file("app/.ini", "level = 1\n")
        .file("app/modules/.ini", "level = 2\n")
        .file("app/modules/auth/.ini", "level = 3\n")
        .file("app/modules/auth/providers.json", r#"{"github": {"enabled": true}}"#);
    let config = ConfigNode::open(tree.root()).unwrap();

    assert_eq!(config.get("app/level").unwrap(), json!(1));
    assert_eq!(config.get("app/modules/level").unwrap(), json!(2));
    assert_eq!(config.get("app/modules/auth/level").unwrap(), json!(3));
    assert_eq!(
        config.get("app/modules/auth/providers/github/enabled").unwrap(),
        json!(true)
    );
}

#[test]
fn test_hidden_files_are_not_children() {
    let tree = TestTree::new();
    tree.file("app/.ini", "debug = true\n")
        .file("app/.secret.json", r#"{"token": "x"}"#)
        .file("app/visible.json", r#"{"a": 1}"#);
    let config = ConfigNode::open(tree.root()).unwrap();

    let app = config.find("app").unwrap().unwrap().as_node().unwrap();
    assert_eq!(app.keys().unwrap(), vec!["debug", "visible"]);
}

#[test]
fn test_same_base_name_takes_first_file() {
    let tree = TestTree::new();
    tree.file("app/db.ini", "driver = ini\n")
        .file("app/db.json", r#"{"driver": "json"}"#);
    let config = ConfigNode::open(tree.root()).unwrap();

    assert_eq!(config.get("app/db/driver").unwrap(), json!("ini"));
}
