//! End-to-end tests over the assembled router: two users review a third
//! user's book, and the read paths report consistent aggregates.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use shelfmark_app::db::Database;
use shelfmark_kernel::settings::Settings;

fn app() -> Router {
    let settings = Settings::default();
    let db = Database::new();
    let registry = shelfmark_app::build_registry(&db, &settings);
    shelfmark_http::build_router(&registry, &settings)
}

fn request(
    method: Method,
    uri: &str,
    identity: Option<(&str, &str)>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some((user_id, username)) = identity {
        builder = builder
            .header("x-user-id", user_id)
            .header("x-username", username);
    }
    match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

fn book_payload(title: &str) -> Value {
    json!({
        "title": title,
        "author": "Ursula K. Le Guin",
        "genre": "Science Fiction",
        "year": 1974,
        "description": "An ambiguous utopia."
    })
}

#[tokio::test]
async fn mutations_require_identity() {
    let app = app();
    let (status, body) = send(
        &app,
        request(Method::POST, "/api/books/", None, Some(book_payload("Nope"))),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "unauthorized");
}

#[tokio::test]
async fn listing_tolerates_garbage_paging_params() {
    let app = app();
    let (status, body) = send(
        &app,
        request(
            Method::GET,
            "/api/books/?page=abc&limit=-4",
            None,
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current_page"], 1);
    assert_eq!(body["total"], 0);
    assert_eq!(body["total_pages"], 0);
}

#[tokio::test]
async fn review_scenario_aggregates_consistently() {
    let app = app();
    let ada = Some(("user-a", "ada"));
    let carol = Some(("user-c", "carol"));
    let dan = Some(("user-d", "dan"));

    // Ada catalogs a book.
    let (status, book) = send(
        &app,
        request(Method::POST, "/api/books/", ada, Some(book_payload("Book B"))),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let book_id = book["id"].as_str().unwrap().to_string();
    assert!(book["image_url"].as_str().unwrap().contains("placeholder"));

    // Carol and Dan review it.
    let (status, _) = send(
        &app,
        request(
            Method::POST,
            "/api/reviews/",
            carol,
            Some(json!({"book_id": book_id, "rating": 5, "comment": "Great"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        request(
            Method::POST,
            "/api/reviews/",
            dan,
            Some(json!({"book_id": book_id, "rating": 3, "comment": "OK"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // Carol cannot review twice.
    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/reviews/",
            carol,
            Some(json!({"book_id": book_id, "rating": 4, "comment": "Again"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "conflict");

    // The detail view aggregates both reviews.
    let (status, detail) = send(
        &app,
        request(Method::GET, &format!("/api/books/{book_id}"), None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["average_rating"], 4.0);
    assert_eq!(detail["reviews"].as_array().unwrap().len(), 2);

    // Ada's profile sees both received reviews and the distribution.
    let (status, profile) = send(&app, request(Method::GET, "/api/profile/", ada, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["reviews_received"].as_array().unwrap().len(), 2);
    assert_eq!(
        profile["stats"]["rating_distribution"],
        json!({"1": 0, "2": 0, "3": 1, "4": 0, "5": 1})
    );
    assert_eq!(profile["stats"]["total_books"], 1);
    assert_eq!(profile["stats"]["total_reviews_received"], 2);

    // Deleting the book cascades to its reviews.
    let (status, _) = send(
        &app,
        request(Method::DELETE, &format!("/api/books/{book_id}"), ada, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        request(Method::GET, &format!("/api/books/{book_id}"), None, None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, profile) = send(&app, request(Method::GET, "/api/profile/", ada, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["stats"]["total_reviews_received"], 0);
}

#[tokio::test]
async fn non_owner_mutation_is_forbidden() {
    let app = app();
    let ada = Some(("user-a", "ada"));
    let eve = Some(("user-e", "eve"));

    let (_, book) = send(
        &app,
        request(Method::POST, "/api/books/", ada, Some(book_payload("Hers"))),
    )
    .await;
    let book_id = book["id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        request(
            Method::PUT,
            &format!("/api/books/{book_id}"),
            eve,
            Some(json!({"title": "Mine now"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "forbidden");

    let (status, _) = send(
        &app,
        request(Method::DELETE, &format!("/api/books/{book_id}"), eve, None),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn rating_bounds_are_enforced_at_the_edge() {
    let app = app();
    let ada = Some(("user-a", "ada"));

    let (_, book) = send(
        &app,
        request(Method::POST, "/api/books/", ada, Some(book_payload("Rated"))),
    )
    .await;
    let book_id = book["id"].as_str().unwrap().to_string();

    for (user, rating, expected) in [
        ("user-z", 0, StatusCode::UNPROCESSABLE_ENTITY),
        ("user-z", 6, StatusCode::UNPROCESSABLE_ENTITY),
        ("user-one", 1, StatusCode::CREATED),
        ("user-five", 5, StatusCode::CREATED),
    ] {
        let (status, _) = send(
            &app,
            request(
                Method::POST,
                "/api/reviews/",
                Some((user, user)),
                Some(json!({"book_id": book_id, "rating": rating, "comment": "x"})),
            ),
        )
        .await;
        assert_eq!(status, expected, "rating {rating} for {user}");
    }
}
