//! Integration tests for the sync adapter and controller.
//!
//! Each test starts an in-process backend on 127.0.0.1 with an ephemeral
//! port, so no external services are needed.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use futures::stream::{FuturesUnordered, StreamExt};
use serde_json::json;
use shelf_client::{Config, HttpBooksApi, NoticeLevel, RemoteSync, SyncStatus};
use shelf_engine::{demo_books, Book, BookDraft, BookId, BookStore};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// In-memory books backend.
#[derive(Clone)]
struct Backend {
    books: Arc<Mutex<Vec<Book>>>,
    next_id: Arc<AtomicI64>,
    /// Held updates wait here until the test releases them
    gate: Arc<Notify>,
}

impl Backend {
    fn with_books(books: Vec<Book>) -> Self {
        let next = books.iter().map(|b| b.id).max().unwrap_or(0) + 1;
        Self {
            books: Arc::new(Mutex::new(books)),
            next_id: Arc::new(AtomicI64::new(next)),
            gate: Arc::new(Notify::new()),
        }
    }

    fn snapshot(&self) -> Vec<Book> {
        self.books.lock().unwrap().clone()
    }

    fn router(&self) -> Router {
        Router::new()
            .route("/books", get(list_books).post(create_book))
            .route("/books/{id}", axum::routing::put(update_book).delete(delete_book))
            .with_state(self.clone())
    }
}

async fn list_books(State(backend): State<Backend>) -> Json<Vec<Book>> {
    Json(backend.snapshot())
}

async fn create_book(
    State(backend): State<Backend>,
    Json(draft): Json<BookDraft>,
) -> (StatusCode, Json<Book>) {
    let id = backend.next_id.fetch_add(1, Ordering::SeqCst);
    let book = Book::from_draft(id, draft);
    backend.books.lock().unwrap().push(book.clone());
    (StatusCode::CREATED, Json(book))
}

/// Titles starting with "held" are not answered until the gate opens.
async fn update_book(
    State(backend): State<Backend>,
    Path(id): Path<BookId>,
    Json(book): Json<Book>,
) -> Result<Json<Book>, StatusCode> {
    if book.title.starts_with("held") {
        backend.gate.notified().await;
    }
    let mut books = backend.books.lock().unwrap();
    let slot = books
        .iter_mut()
        .find(|b| b.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    *slot = Book::new(id, book.title, book.author);
    Ok(Json(slot.clone()))
}

async fn delete_book(State(backend): State<Backend>, Path(id): Path<BookId>) -> StatusCode {
    let mut books = backend.books.lock().unwrap();
    let before = books.len();
    books.retain(|b| b.id != id);
    if books.len() < before {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn serve(router: Router) -> Config {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    Config::default()
        .with_api_base(&format!("http://{}", addr))
        .unwrap()
}

/// A base URL nothing is listening on.
async fn closed_port() -> Config {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Config::default()
        .with_api_base(&format!("http://{}", addr))
        .unwrap()
}

fn titles(books: &[Book]) -> Vec<&str> {
    books.iter().map(|b| b.title.as_str()).collect()
}

// ============================================================================
// Backend reachable
// ============================================================================

#[tokio::test]
async fn load_from_backend() {
    let backend = Backend::with_books(vec![
        Book::new(1, "Dune", "Frank Herbert"),
        Book::new(2, "Hyperion", "Dan Simmons"),
    ]);
    let config = serve(backend.router()).await;
    let mut controller = shelf_client::connect(&config).unwrap();

    let frame = controller.load().await;

    assert!(frame.status.is_none());
    assert_eq!(controller.store().as_slice(), backend.snapshot().as_slice());
    // Default sort is newest first
    assert_eq!(titles(&frame.items), ["Hyperion", "Dune"]);
}

#[tokio::test]
async fn create_update_delete_roundtrip() {
    let backend = Backend::with_books(demo_books());
    let config = serve(backend.router()).await;
    let mut controller = shelf_client::connect(&config).unwrap();
    controller.load().await;

    let frame = controller.request_create(" Dune ", "Frank Herbert").await.unwrap();
    let toast = frame.toast.unwrap();
    assert_eq!(toast.level, NoticeLevel::Success);
    assert_eq!(toast.message, "Book added");
    assert_eq!(controller.book(11), Some(&Book::new(11, "Dune", "Frank Herbert")));

    let frame = controller
        .request_update(11, "Dune Messiah", "Frank Herbert")
        .await
        .unwrap();
    assert_eq!(frame.toast.unwrap().message, "Book updated");
    assert_eq!(controller.book(11).unwrap().title, "Dune Messiah");

    let frame = controller.request_delete(11).await;
    assert_eq!(frame.toast.unwrap().message, "Book deleted");
    assert!(controller.book(11).is_none());

    assert_eq!(controller.store().as_slice(), backend.snapshot().as_slice());
}

#[tokio::test]
async fn delete_three_leaves_others_unchanged() {
    let backend = Backend::with_books(demo_books());
    let config = serve(backend.router()).await;
    let sync = RemoteSync::new(HttpBooksApi::new(&config).unwrap());

    let mut store = BookStore::from(demo_books());
    let outcome = sync.delete(3).await;
    assert_eq!(outcome.status, SyncStatus::Ok);
    outcome.apply_to(&mut store);

    let expected: Vec<Book> = demo_books().into_iter().filter(|b| b.id != 3).collect();
    assert_eq!(store.as_slice(), expected.as_slice());
}

#[tokio::test]
async fn non_array_listing_is_empty_and_clean() {
    let router = Router::new().route(
        "/books",
        get(|| async { Json(json!({"message": "not a list"})) }),
    );
    let config = serve(router).await;
    let mut controller = shelf_client::connect(&config).unwrap();

    let frame = controller.load().await;
    assert!(frame.status.is_none());
    assert!(controller.store().is_empty());
    assert_eq!(frame.total_pages, 1);
}

#[tokio::test]
async fn last_resolved_update_wins() {
    let backend = Backend::with_books(demo_books());
    let config = serve(backend.router()).await;
    let sync = RemoteSync::new(HttpBooksApi::new(&config).unwrap());
    let mut store = BookStore::from(demo_books());

    let mut in_flight = FuturesUnordered::new();
    in_flight.push(sync.update(5, BookDraft::new("held edit", "Erich Gamma")));
    in_flight.push(sync.update(5, BookDraft::new("quick edit", "Erich Gamma")));

    let mut resolved = Vec::new();
    while let Some(outcome) = in_flight.next().await {
        resolved.push(outcome.data.title.clone());
        outcome.apply_to(&mut store);
        // The held request may only answer once the quick one has been applied
        backend.gate.notify_one();
    }

    assert_eq!(resolved, ["quick edit", "held edit"]);
    assert_eq!(store.get(5).unwrap().title, "held edit");
    assert_eq!(backend.snapshot()[4].title, "held edit");
}

// ============================================================================
// Backend unreachable or failing
// ============================================================================

#[tokio::test]
async fn unreachable_backend_falls_back_everywhere() {
    let config = closed_port().await;
    let mut controller = shelf_client::connect(&config).unwrap();

    let frame = controller.load().await;
    let status = frame.status.unwrap();
    assert_eq!(status.level, NoticeLevel::Degraded);
    assert_eq!(
        status.message,
        format!(
            "Using demo data (API unreachable). Start your backend at {} to enable live CRUD.",
            config.api_base
        )
    );
    assert_eq!(controller.store().as_slice(), demo_books().as_slice());

    let frame = controller.request_create("Foo", "Bar").await.unwrap();
    assert_eq!(frame.toast.unwrap().level, NoticeLevel::Degraded);
    assert_eq!(controller.store().len(), 11);
    let local = controller.store().as_slice().last().unwrap().clone();
    assert_eq!((local.title.as_str(), local.author.as_str()), ("Foo", "Bar"));
    assert!(local.id > 10);

    let frame = controller.request_update(2, "Clean Code 2e", "Robert C. Martin").await.unwrap();
    assert_eq!(
        frame.toast.unwrap().message,
        "Book updated locally (API unreachable)"
    );
    assert_eq!(controller.book(2).unwrap().title, "Clean Code 2e");

    let frame = controller.request_delete(3).await;
    assert_eq!(
        frame.toast.unwrap().message,
        "Book deleted locally (API unreachable)"
    );
    assert!(controller.book(3).is_none());
}

#[tokio::test]
async fn server_errors_are_treated_as_unreachable() {
    let router = Router::new()
        .route(
            "/books",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR })
                .post(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        )
        .route(
            "/books/{id}",
            axum::routing::put(|| async { StatusCode::NOT_FOUND })
                .delete(|| async { StatusCode::BAD_GATEWAY }),
        );
    let config = serve(router).await;
    let sync = RemoteSync::new(HttpBooksApi::new(&config).unwrap()).with_id_clock(|| 77);

    assert_eq!(sync.load().await.status, SyncStatus::Degraded);

    let created = sync.create(BookDraft::new("Foo", "Bar")).await;
    assert_eq!(created.status, SyncStatus::Degraded);
    assert_eq!(created.data, Book::new(77, "Foo", "Bar"));

    assert_eq!(
        sync.update(1, BookDraft::new("Foo", "Bar")).await.status,
        SyncStatus::Degraded
    );
    assert_eq!(sync.delete(1).await.status, SyncStatus::Degraded);
}

#[tokio::test]
async fn undecodable_listing_falls_back() {
    let router = Router::new().route(
        "/books",
        get(|| async { Json(json!([{"id": "first", "name": "?"}])) }),
    );
    let config = serve(router).await;
    let mut controller = shelf_client::connect(&config).unwrap();

    let frame = controller.load().await;
    assert_eq!(frame.status.unwrap().level, NoticeLevel::Degraded);
    assert_eq!(controller.store().len(), 10);
}
