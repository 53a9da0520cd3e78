//! Command line tests
//!
//! Each test runs the `catalog-sync` binary against an in-process book
//! collection server and inspects its output and the server state.

mod support;

use assert_cmd::Command;
use serde_json::{json, Value};
use tokio::runtime::Runtime;

use support::{spawn_server, store_with, Shared};

struct Harness {
    _runtime: Runtime,
    base_url: String,
    store: Shared,
}

impl Harness {
    fn start(books: Vec<Value>) -> Self {
        let runtime = Runtime::new().expect("Failed to start runtime");
        let store = store_with(books);
        let base_url = runtime.block_on(spawn_server(store.clone()));
        Self {
            _runtime: runtime,
            base_url,
            store,
        }
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::cargo_bin("catalog-sync").expect("Binary not built");
        cmd.env("RUST_LOG", "off")
            .arg("--base-url")
            .arg(&self.base_url)
            .args(args);
        cmd
    }

    fn titles(&self) -> Vec<String> {
        self.store
            .lock()
            .unwrap()
            .books
            .iter()
            .map(|b| b["title"].as_str().unwrap_or_default().to_string())
            .collect()
    }
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().clone();
    String::from_utf8(output.stdout).expect("stdout is not UTF-8")
}

fn two_books() -> Vec<Value> {
    vec![
        json!({"id": 1, "title": "Dune", "author": "Herbert", "isbn": "123", "releaseDate": "1965-08-01", "available": true}),
        json!({"id": 2, "title": "Emma", "author": "Austen", "isbn": "9", "releaseDate": null, "available": false}),
    ]
}

#[test]
fn test_list_prints_table() {
    let harness = Harness::start(two_books());

    let stdout = stdout_of(&mut harness.command(&["list"]));

    assert!(stdout.contains("Book Name"));
    assert!(stdout.contains("Dune"));
    assert!(stdout.contains("1965-08-01"));
    assert!(stdout.contains("Emma"));
    assert!(stdout.contains("Not Available"));
    assert_eq!(harness.store.lock().unwrap().list_calls, 1);
}

#[test]
fn test_edit_title_keeps_other_fields() {
    // Server that hands out string ids
    let harness = Harness::start(vec![
        json!({"id": "5", "title": "Dune", "author": "Herbert", "isbn": "123", "releaseDate": "1965-08-01", "available": true}),
    ]);

    let stdout = stdout_of(&mut harness.command(&["edit", "5", "--title", "Dune Messiah"]));

    assert!(stdout.contains("Dune Messiah"));
    let store = harness.store.lock().unwrap();
    let book = &store.books[0];
    assert_eq!(book["id"], json!("5"));
    assert_eq!(book["title"], json!("Dune Messiah"));
    assert_eq!(book["author"], json!("Herbert"));
    assert_eq!(book["releaseDate"], json!("1965-08-01"));
    assert_eq!(store.list_calls, 2);
}

#[test]
fn test_edit_unknown_id_fails() {
    let harness = Harness::start(two_books());

    let output = harness
        .command(&["edit", "99", "--title", "X"])
        .assert()
        .failure()
        .get_output()
        .clone();

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No book with id 99"));
    assert_eq!(harness.titles(), vec!["Dune", "Emma"]);
}

#[test]
fn test_add_posts_new_book() {
    let harness = Harness::start(vec![]);

    let stdout = stdout_of(&mut harness.command(&[
        "add",
        "--title",
        "Persuasion",
        "--author",
        "Austen",
        "--available",
        "true",
    ]));

    assert!(stdout.contains("Persuasion"));
    let store = harness.store.lock().unwrap();
    assert_eq!(store.posted.len(), 1);
    assert!(store.posted[0].get("id").is_none());
    assert_eq!(store.books[0]["id"], json!(1));
}

#[test]
fn test_delete_with_yes_removes_book() {
    let harness = Harness::start(two_books());

    let stdout = stdout_of(&mut harness.command(&["delete", "1", "--yes"]));

    assert!(!stdout.contains("Dune"));
    assert!(stdout.contains("Emma"));
    assert_eq!(harness.titles(), vec!["Emma"]);
}

#[test]
fn test_delete_declined_leaves_catalog_alone() {
    let harness = Harness::start(two_books());

    let stdout = stdout_of(harness.command(&["delete", "1"]).write_stdin("n\n"));

    assert!(stdout.contains("Are you sure you want to delete \"Dune\"?"));
    assert!(stdout.contains("Cancelled"));
    assert_eq!(harness.titles(), vec!["Dune", "Emma"]);
}
