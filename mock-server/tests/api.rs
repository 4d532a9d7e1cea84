use axum::http::{self, Request, StatusCode};
use axum::response::Response;
use http_body_util::BodyExt;
use mock_server::{app, Item, Tag, User, MOCK_TOKEN};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder()
        .uri(uri)
        .header(http::header::HOST, "qiita.test")
        .body(String::new())
        .unwrap()
}

fn authed_get(uri: &str) -> Request<String> {
    Request::builder()
        .uri(uri)
        .header(http::header::AUTHORIZATION, format!("Bearer {MOCK_TOKEN}"))
        .body(String::new())
        .unwrap()
}

async fn send(request: Request<String>) -> Response {
    app().oneshot(request).await.unwrap()
}

fn header<'a>(response: &'a Response, name: &str) -> Option<&'a str> {
    response.headers().get(name).and_then(|v| v.to_str().ok())
}

// --- single resources ---

#[tokio::test]
async fn get_tag_is_case_insensitive() {
    let resp = send(get("/tags/react")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let tag: Tag = body_json(resp).await;
    assert_eq!(tag.id, "React");
    assert_eq!(tag.items_count, 2693);
    assert_eq!(tag.followers_count, 2403);
}

#[tokio::test]
async fn unknown_tag_returns_404_envelope() {
    let resp = send(get("/tags/nonexistent")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["type"], "not_found");
}

#[tokio::test]
async fn get_user_and_item() {
    let resp = send(get("/users/bob")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let bob: User = body_json(resp).await;
    assert_eq!(bob.name.as_deref(), Some("Bob"));

    let resp = send(get("/items/00000000000000c0ffee")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let item: Item = body_json(resp).await;
    assert_eq!(item.title, "Post 1");
    assert_eq!(item.user.id, "alice");
}

// --- pagination headers ---

#[tokio::test]
async fn tags_page_carries_link_and_total() {
    let resp = send(get("/tags?page=3&per_page=2&sort=count")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(header(&resp, "total-count"), Some("25"));
    let link = header(&resp, "link").unwrap().to_string();
    assert!(link.contains("<http://qiita.test/tags?page=1&per_page=2&sort=count>; rel=\"first\""));
    assert!(link.contains("rel=\"prev\""));
    assert!(link.contains("rel=\"next\""));
    assert!(link.contains("<http://qiita.test/tags?page=13&per_page=2&sort=count>; rel=\"last\""));

    let tags: Vec<Tag> = body_json(resp).await;
    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0].id, "Python");
    assert_eq!(tags[1].id, "topic01");
}

#[tokio::test]
async fn single_page_omits_last() {
    let resp = send(get("/users/alice/followees")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(header(&resp, "total-count"), Some("2"));
    let link = header(&resp, "link").unwrap();
    assert!(link.contains("rel=\"first\""));
    assert!(!link.contains("rel=\"last\""));
}

#[tokio::test]
async fn out_of_range_page_returns_400() {
    let resp = send(get("/users?page=101&per_page=20")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let resp = send(get("/users?page=1&per_page=0")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_sort_returns_400() {
    let resp = send(get("/tags?sort=popularity")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn followers_of_alice_span_three_pages() {
    let resp = send(get("/users/alice/followers?page=3&per_page=10")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(header(&resp, "total-count"), Some("23"));
    let users: Vec<User> = body_json(resp).await;
    assert_eq!(users.len(), 3);
}

#[tokio::test]
async fn items_query_filters_by_tag() {
    let resp = send(get("/items?query=tag%3AGo")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let items: Vec<Item> = body_json(resp).await;
    assert_eq!(items.len(), 4);
    assert!(items.iter().all(|item| item.tags[0].name == "Go"));
}

// --- auth-scoped routes ---

#[tokio::test]
async fn following_requires_token() {
    let resp = send(get("/users/bob/following")).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn following_answers_with_status_only() {
    let resp = send(authed_get("/users/bob/following")).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    let resp = send(authed_get("/users/erin/following")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = send(authed_get("/tags/rust/following")).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = send(authed_get("/tags/Go/following")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn authenticated_user_is_alice() {
    let resp = send(authed_get("/authenticated_user")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let me: User = body_json(resp).await;
    assert_eq!(me.id, "alice");

    let resp = send(get("/authenticated_user")).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// --- comments ---

#[tokio::test]
async fn item_comments_and_single_comment() {
    let resp = send(get("/items/00000000000000c0ffee/comments")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let comments: Vec<serde_json::Value> = body_json(resp).await;
    assert_eq!(comments.len(), 2);
    let id = comments[0]["id"].as_str().unwrap().to_string();

    let resp = send(get(&format!("/comments/{id}"))).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = send(get("/items/missing/comments")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
