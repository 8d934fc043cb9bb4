use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use bookshelf::{
    error::ErrorVerbosity,
    server,
    state::ApiState,
    store::{memory::MemoryBookStore, Book, BookStore},
};

fn power_up() -> Book {
    Book {
        isbn: "0691161518".to_string(),
        amazon_url: "http://a.co/eobPtX2".to_string(),
        author: "Matthew Lane".to_string(),
        language: "english".to_string(),
        pages: 264,
        publisher: "Princeton University Press".to_string(),
        title: "Power-Up: Unlocking the Hidden Mathematics in Video Games".to_string(),
        year: 2017,
    }
}

fn money_payload() -> Value {
    json!({
        "isbn": "0783904090",
        "amazon_url": "http://a.co/djfkldc",
        "author": "Matthew Maddock",
        "language": "english",
        "pages": 600,
        "publisher": "Stanford University Press",
        "title": "How to get this money!",
        "year": 2019
    })
}

async fn app_with_books(books: &[Book]) -> (Router, Arc<MemoryBookStore>) {
    let store = Arc::new(MemoryBookStore::new());

    for book in books {
        store.create(book.clone()).await.expect("seeding failed");
    }

    let state = ApiState::new(ErrorVerbosity::Full, store.clone());

    (server::app(state), store)
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("failed to build request");

    let response = app.oneshot(request).await.expect("request failed");
    let status = response.status();

    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to read body")
        .to_bytes();

    let body = match bytes.is_empty() {
        true => Value::Null,
        false => serde_json::from_slice(&bytes).expect("body is not json"),
    };

    (status, body)
}

#[tokio::test]
async fn get_books_lists_all_stored_books() {
    let (app, _) = app_with_books(&[power_up()]).await;

    let (status, body) = send(app, Method::GET, "/books", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "books": [power_up()] }));
}

#[tokio::test]
async fn get_book_returns_a_single_book() {
    let (app, _) = app_with_books(&[power_up()]).await;

    let (status, body) = send(app, Method::GET, "/books/0691161518", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "book": power_up() }));
}

#[tokio::test]
async fn get_book_responds_404_for_unknown_isbn() {
    let (app, _) = app_with_books(&[power_up()]).await;

    let (status, _) = send(app, Method::GET, "/books/58490", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn post_creates_a_new_book() {
    let (app, _) = app_with_books(&[power_up()]).await;

    let (status, body) = send(
        app.clone(),
        Method::POST,
        "/books",
        Some(money_payload()),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "book": money_payload() }));

    let (status, body) = send(app, Method::GET, "/books/0783904090", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "book": money_payload() }));
}

#[tokio::test]
async fn post_responds_400_for_non_numeric_year() {
    let (app, store) = app_with_books(&[power_up()]).await;

    let mut payload = money_payload();
    payload["year"] = json!("two thousand and nineteen");

    let (status, _) = send(app, Method::POST, "/books", Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(store.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn post_responds_400_for_non_numeric_pages() {
    let (app, store) = app_with_books(&[power_up()]).await;

    let mut payload = money_payload();
    payload["pages"] = json!("six hundred");

    let (status, _) = send(app, Method::POST, "/books", Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(store.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn post_responds_400_when_a_required_field_is_left_off() {
    let (app, store) = app_with_books(&[power_up()]).await;

    let mut payload = money_payload();
    payload.as_object_mut().unwrap().remove("publisher");

    let (status, _) = send(app, Method::POST, "/books", Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(store.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn post_responds_400_for_an_unknown_field() {
    let (app, store) = app_with_books(&[power_up()]).await;

    let mut payload = money_payload();
    payload["rating"] = json!(5);

    let (status, _) = send(app, Method::POST, "/books", Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(store.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn post_responds_500_for_a_duplicate_isbn() {
    let (app, store) = app_with_books(&[power_up()]).await;

    let mut payload = money_payload();
    payload["isbn"] = json!("0691161518");

    let (status, _) = send(app, Method::POST, "/books", Some(payload)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(store.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn put_replaces_an_existing_book() {
    let (app, _) = app_with_books(&[power_up()]).await;

    let mut payload = money_payload();
    payload["isbn"] = json!("0691161518");

    let (status, body) = send(
        app.clone(),
        Method::PUT,
        "/books/0691161518",
        Some(payload.clone()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "book": payload }));

    let (status, body) = send(app, Method::GET, "/books/0691161518", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "book": payload }));
}

#[tokio::test]
async fn put_responds_400_when_fields_are_missing_and_leaves_the_row_unchanged() {
    let (app, _) = app_with_books(&[power_up()]).await;

    let payload = json!({
        "isbn": "0691161518",
        "title": "How to get this money!"
    });

    let (status, _) = send(app.clone(), Method::PUT, "/books/0691161518", Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(app, Method::GET, "/books/0691161518", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "book": power_up() }));
}

#[tokio::test]
async fn put_responds_404_for_unknown_isbn() {
    let (app, _) = app_with_books(&[power_up()]).await;

    let (status, _) = send(app, Method::PUT, "/books/58490", Some(money_payload())).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_a_book_exactly_once() {
    let (app, store) = app_with_books(&[power_up()]).await;

    let (status, body) = send(app.clone(), Method::DELETE, "/books/0691161518", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Book deleted" }));
    assert!(store.list_all().await.unwrap().is_empty());

    let (status, _) = send(app, Method::DELETE, "/books/0691161518", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_routes_respond_404() {
    let (app, _) = app_with_books(&[]).await;

    let (status, _) = send(app, Method::GET, "/authors", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unsupported_methods_respond_405() {
    let (app, _) = app_with_books(&[power_up()]).await;

    let (status, _) = send(app, Method::PATCH, "/books/0691161518", None).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
