//! Queries against the checked-in fixture tree
//!
//! `test-fixtures/trees/app` mixes every built-in format, an unknown file
//! type and a sub-directory holding a malformed file.

use std::path::PathBuf;

use cfgtree_core::{ConfigNode, Error};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde::Deserialize;
use serde_json::{Value, json};

fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../test-fixtures/trees")
}

fn open() -> ConfigNode {
    ConfigNode::open(fixtures_root()).unwrap()
}

#[rstest]
#[case("app/debug", json!(true))]
#[case("app/name", json!("Demo App"))]
#[case("app/workers", json!(4))]
#[case("app/log/level", json!("warning"))]
#[case("app/log/channels/1", json!("syslog"))]
#[case("app/db/main/host", json!("local"))]
#[case("app/db/main/options/sslmode", json!("prefer"))]
#[case("app/db/main/replicas/0", json!("replica-1"))]
#[case("app/db/replica/pool/max", json!(8))]
#[case("app/cache/@attributes/driver", json!("redis"))]
#[case("app/cache/server/1", json!("10.0.0.2"))]
#[case("app/cache/prefix", json!("demo:&"))]
#[case("app/routes/login", json!("/auth/login"))]
#[case("app/routes/api/throttle/window", json!(1.5))]
#[case("app/mail/smtp/port", json!(587))]
fn test_fixture_values(#[case] path: &str, #[case] expected: Value) {
    let config = open();
    assert_eq!(config.get(path).unwrap(), expected);
}

#[test]
fn test_fixture_directory_overrides_default_key() {
    let config = open();
    assert!(config.get("app/db").unwrap().is_node());
}

#[test]
fn test_fixture_present_null() {
    let config = open();
    assert!(config.exists("app/db/main/options/timeout").unwrap());
    assert!(config.get("app/db/main/options/timeout").unwrap().is_null());
    assert!(!config.exists("app/db/main/options/retries").unwrap());
}

#[test]
fn test_fixture_unknown_type_is_empty() {
    let config = open();
    let notes = config.find("app/notes").unwrap().unwrap().as_node().unwrap();
    assert!(notes.is_empty().unwrap());
}

#[test]
fn test_fixture_malformed_file_is_isolated() {
    let config = open();

    assert_eq!(config.get("app/broken/enabled").unwrap(), json!(true));

    let err = config.get("app/broken/settings/unterminated").unwrap_err();
    match err {
        Error::Content(inner) => {
            let path = inner.path().unwrap_or_default();
            assert!(path.ends_with("broken/settings.json"), "got path {path}");
        }
        other => panic!("expected a parse error, got {other:?}"),
    }

    assert_eq!(config.get("app/mail/from").unwrap(), json!("noreply@example.com"));
}

#[test]
fn test_fixture_app_keys() {
    let config = open();
    let app = config.find("app").unwrap().unwrap().as_node().unwrap();
    assert_eq!(
        app.keys().unwrap(),
        vec!["broken", "cache", "db", "debug", "log", "mail", "name", "notes", "routes", "workers"]
    );
}

#[test]
fn test_fixture_typed_fetch() {
    #[derive(Debug, Deserialize, PartialEq)]
    struct Smtp {
        host: String,
        port: u16,
        tls: bool,
    }

    let config = open();
    let smtp: Smtp = config.get_as("app/mail/smtp").unwrap().unwrap();
    assert_eq!(
        smtp,
        Smtp {
            host: "mail.local".to_string(),
            port: 587,
            tls: true,
        }
    );
}
