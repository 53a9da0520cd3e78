//! API integration tests
//!
//! Each test starts an in-process book collection server on an ephemeral port
//! and drives the real HTTP client through the sync controller.

mod support;

use serde_json::json;

use catalog_sync::{
    api::BooksClient,
    config::ApiConfig,
    error::AppError,
    models::{BookId, DraftForm, FieldEdit},
    services::{AlwaysConfirm, CatalogEditor, RemoveOutcome, ResourceSyncController},
};

use support::{books_client, spawn_server, store_with};

fn dune_draft() -> DraftForm {
    let mut draft = DraftForm::blank();
    for (name, value) in [
        ("title", "Dune"),
        ("author", "Herbert"),
        ("isbn", "123"),
        ("releaseDate", "1965-08-01"),
        ("available", "true"),
    ] {
        draft.apply(FieldEdit::from_input(name, value).unwrap());
    }
    draft
}

#[tokio::test]
async fn test_empty_collection() {
    let store = store_with(vec![]);
    let mut controller = ResourceSyncController::new(books_client(&spawn_server(store).await));

    let snapshot = controller.load_all().await.expect("Failed to load");
    assert!(snapshot.is_empty());
    assert_eq!(controller.error(), None);
}

#[tokio::test]
async fn test_load_keeps_server_order_and_normalizes_dates() {
    let store = store_with(vec![
        json!({"id": 2, "title": "Emma", "author": "Austen", "isbn": "9", "releaseDate": "1815-12-23T00:00:00.000Z", "available": false}),
        json!({"id": 1, "bookName": "Dune", "author": "Herbert", "ISBN": "123", "realeaseDate": "1965-08-01", "available": true}),
    ]);
    let mut controller = ResourceSyncController::new(books_client(&spawn_server(store).await));
    controller.load_all().await.expect("Failed to load");

    let titles: Vec<&str> = controller.snapshot().iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["Emma", "Dune"]);

    let rows = CatalogEditor::new(controller).rows();
    assert_eq!(rows[0].release_date, "1815-12-23");
    assert_eq!(rows[0].status, "Not Available");
    assert_eq!(rows[1].isbn, "123");
}

#[tokio::test]
async fn test_create_assigns_server_id() {
    let store = store_with(vec![]);
    let mut controller = ResourceSyncController::new(books_client(&spawn_server(store.clone()).await));

    let mut draft = dune_draft();
    draft.id = Some(BookId::Text("client-side".to_string()));
    controller.create(&draft).await.expect("Failed to create");

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.len(), 1);
    let book = &snapshot[0];
    assert_eq!(book.id, Some(BookId::Number(1)));
    assert_eq!(book.title, "Dune");
    assert_eq!(book.author, "Herbert");
    assert_eq!(book.isbn, "123");
    assert_eq!(book.release_date.map(|d| d.to_string()), Some("1965-08-01".to_string()));
    assert!(book.available);

    let store = store.lock().unwrap();
    assert_eq!(store.list_calls, 1);
    assert_eq!(
        store.posted,
        vec![json!({
            "title": "Dune",
            "author": "Herbert",
            "isbn": "123",
            "releaseDate": "1965-08-01",
            "available": true
        })]
    );
}

#[tokio::test]
async fn test_update_through_editor() {
    let store = store_with(vec![
        json!({"id": 1, "title": "Dune", "author": "Herbert", "isbn": "123", "releaseDate": "1965-08-01", "available": true}),
    ]);
    let client = books_client(&spawn_server(store.clone()).await);
    let mut editor = CatalogEditor::new(ResourceSyncController::new(client));
    editor.refresh().await.expect("Failed to load");

    let book = editor.controller().snapshot()[0].clone();
    editor.open_edit(&book);
    editor.edit_field(FieldEdit::from_input("available", "off").unwrap());
    editor.submit().await.expect("Failed to update");

    assert!(editor.modal().is_none());
    assert!(!editor.controller().snapshot()[0].available);
    assert_eq!(store.lock().unwrap().list_calls, 2);
}

#[tokio::test]
async fn test_remove_missing_book_keeps_snapshot() {
    let store = store_with(vec![
        json!({"id": 1, "title": "Dune", "author": "Herbert", "isbn": "123", "releaseDate": null, "available": true}),
    ]);
    let mut controller = ResourceSyncController::new(books_client(&spawn_server(store.clone()).await));
    controller.load_all().await.expect("Failed to load");
    let before = controller.snapshot().to_vec();

    let err = controller
        .remove(&BookId::Number(5), &AlwaysConfirm)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(controller.snapshot(), before.as_slice());
    assert_eq!(controller.error(), Some("API request failed with status 404"));
    assert_eq!(store.lock().unwrap().list_calls, 1);
}

#[tokio::test]
async fn test_remove_existing_book() {
    let store = store_with(vec![
        json!({"id": 1, "title": "Dune", "author": "Herbert", "isbn": "123", "available": true}),
        json!({"id": 2, "title": "Emma", "author": "Austen", "isbn": "9", "available": true}),
    ]);
    let mut controller = ResourceSyncController::new(books_client(&spawn_server(store.clone()).await));
    controller.load_all().await.expect("Failed to load");

    let outcome = controller
        .remove(&BookId::Number(1), &AlwaysConfirm)
        .await
        .expect("Failed to delete");

    assert_eq!(outcome, RemoveOutcome::Removed);
    assert_eq!(controller.snapshot().len(), 1);
    assert_eq!(controller.snapshot()[0].title, "Emma");
    assert_eq!(store.lock().unwrap().list_calls, 2);
}

#[tokio::test]
async fn test_failed_load_keeps_previous_snapshot() {
    let store = store_with(vec![
        json!({"id": 1, "title": "Dune", "author": "Herbert", "isbn": "123", "available": true}),
    ]);
    let mut controller = ResourceSyncController::new(books_client(&spawn_server(store.clone()).await));
    controller.load_all().await.expect("Failed to load");

    store.lock().unwrap().fail_list = true;
    let err = controller.load_all().await.unwrap_err();

    assert!(matches!(err, AppError::Network(_)));
    assert_eq!(controller.snapshot().len(), 1);
    assert_eq!(controller.error(), Some("API request failed with status 500"));
    assert!(!controller.is_loading());
}

#[tokio::test]
async fn test_unreachable_server_is_a_network_error() {
    // Bind then drop to get a port nobody listens on
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = BooksClient::new(&ApiConfig {
        base_url: format!("http://{}", addr),
        books_path: "/api/books".to_string(),
        timeout_secs: Some(2),
    })
    .unwrap();
    let mut controller = ResourceSyncController::new(client);

    assert!(matches!(
        controller.load_all().await,
        Err(AppError::Network(_))
    ));
    assert!(controller.error().is_some());
    assert!(controller.snapshot().is_empty());
}
