use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::net::TcpListener;

mod fixtures;

pub use fixtures::{Comment, Fixtures, Item, ItemTag, Tag, User, AUTHENTICATED_USER};

/// Bearer token accepted by the auth-scoped routes.
pub const MOCK_TOKEN: &str = "mock-token";

const TOTAL_COUNT: HeaderName = HeaderName::from_static("total-count");
const DEFAULT_PER_PAGE: u32 = 20;
const MAX_PAGE: u32 = 100;

pub type Db = Arc<Fixtures>;

pub fn app() -> Router {
    app_with(Fixtures::seeded())
}

pub fn app_with(fixtures: Fixtures) -> Router {
    Router::new()
        .route("/authenticated_user", get(authenticated_user))
        .route("/users", get(list_users))
        .route("/users/{id}", get(get_user))
        .route("/users/{id}/followees", get(list_followees))
        .route("/users/{id}/followers", get(list_followers))
        .route("/users/{id}/following", get(user_following))
        .route("/users/{id}/items", get(list_user_items))
        .route("/users/{id}/stocks", get(list_user_stocks))
        .route("/users/{id}/following_tags", get(list_following_tags))
        .route("/items", get(list_items))
        .route("/items/{id}", get(get_item))
        .route("/items/{id}/comments", get(list_item_comments))
        .route("/items/{id}/stockers", get(list_item_stockers))
        .route("/comments/{id}", get(get_comment))
        .route("/tags", get(list_tags))
        .route("/tags/{id}", get(get_tag))
        .route("/tags/{id}/items", get(list_tag_items))
        .route("/tags/{id}/following", get(tag_following))
        .with_state(Arc::new(fixtures))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub sort: Option<String>,
    pub query: Option<String>,
}

fn error(status: StatusCode, message: &str, kind: &str) -> Response {
    (status, Json(json!({ "message": message, "type": kind }))).into_response()
}

fn not_found() -> Response {
    error(StatusCode::NOT_FOUND, "Not found", "not_found")
}

fn found<T: Serialize>(value: Option<&T>) -> Response {
    match value {
        Some(value) => Json(value).into_response(),
        None => not_found(),
    }
}

fn authenticate(headers: &HeaderMap) -> Result<&'static str, Response> {
    let expected = format!("Bearer {MOCK_TOKEN}");
    match headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
    {
        Some(value) if value == expected => Ok(AUTHENTICATED_USER),
        _ => Err(error(
            StatusCode::UNAUTHORIZED,
            "Unauthorized",
            "unauthorized",
        )),
    }
}

/// Slice `all` to the requested page and attach `Total-Count` and `Link`.
///
/// `rel="last"` is only emitted when there is more than one page.
fn paginate<T: Serialize>(
    headers: &HeaderMap,
    uri: &Uri,
    params: &ListParams,
    all: Vec<T>,
) -> Response {
    let page = params.page.unwrap_or(1);
    let per_page = params.per_page.unwrap_or(DEFAULT_PER_PAGE);
    if !(1..=MAX_PAGE).contains(&page) || !(1..=MAX_PAGE).contains(&per_page) {
        return error(StatusCode::BAD_REQUEST, "Bad request", "bad_request");
    }

    let total = all.len();
    let per = per_page as usize;
    let last_page = (total.div_ceil(per).max(1) as u32).min(MAX_PAGE);
    let entries: Vec<T> = all
        .into_iter()
        .skip((page as usize - 1) * per)
        .take(per)
        .collect();

    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("localhost");
    let base = format!("http://{host}{}", uri.path());
    let sort = params
        .sort
        .as_deref()
        .map(|sort| format!("&sort={sort}"))
        .unwrap_or_default();
    let link = |n: u32, rel: &str| {
        format!("<{base}?page={n}&per_page={per_page}{sort}>; rel=\"{rel}\"")
    };

    let mut links = vec![link(1, "first")];
    if page > 1 {
        links.push(link(page - 1, "prev"));
    }
    if page < last_page {
        links.push(link(page + 1, "next"));
    }
    if last_page > 1 {
        links.push(link(last_page, "last"));
    }

    let mut response_headers = HeaderMap::new();
    response_headers.insert(TOTAL_COUNT, HeaderValue::from(total));
    if let Ok(value) = HeaderValue::from_str(&links.join(", ")) {
        response_headers.insert(header::LINK, value);
    }
    (response_headers, Json(entries)).into_response()
}

// --- users ---

async fn authenticated_user(State(db): State<Db>, headers: HeaderMap) -> Response {
    match authenticate(&headers) {
        Ok(id) => found(db.user(id)),
        Err(response) => response,
    }
}

async fn list_users(
    State(db): State<Db>,
    headers: HeaderMap,
    uri: Uri,
    Query(params): Query<ListParams>,
) -> Response {
    paginate(&headers, &uri, &params, db.users.clone())
}

async fn get_user(State(db): State<Db>, Path(id): Path<String>) -> Response {
    found(db.user(&id))
}

async fn list_followees(
    State(db): State<Db>,
    Path(id): Path<String>,
    headers: HeaderMap,
    uri: Uri,
    Query(params): Query<ListParams>,
) -> Response {
    if db.user(&id).is_none() {
        return not_found();
    }
    let users: Vec<User> = db
        .follows
        .iter()
        .filter(|(follower, _)| *follower == id)
        .filter_map(|(_, followee)| db.user(followee).cloned())
        .collect();
    paginate(&headers, &uri, &params, users)
}

async fn list_followers(
    State(db): State<Db>,
    Path(id): Path<String>,
    headers: HeaderMap,
    uri: Uri,
    Query(params): Query<ListParams>,
) -> Response {
    if db.user(&id).is_none() {
        return not_found();
    }
    let users: Vec<User> = db
        .follows
        .iter()
        .filter(|(_, followee)| *followee == id)
        .filter_map(|(follower, _)| db.user(follower).cloned())
        .collect();
    paginate(&headers, &uri, &params, users)
}

/// 204 when the authenticated user follows `id`, 404 otherwise.
async fn user_following(
    State(db): State<Db>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let me = match authenticate(&headers) {
        Ok(me) => me,
        Err(response) => return response,
    };
    let follows = db
        .follows
        .iter()
        .any(|(follower, followee)| follower == me && *followee == id);
    if follows {
        StatusCode::NO_CONTENT.into_response()
    } else {
        not_found()
    }
}

async fn list_user_items(
    State(db): State<Db>,
    Path(id): Path<String>,
    headers: HeaderMap,
    uri: Uri,
    Query(params): Query<ListParams>,
) -> Response {
    if db.user(&id).is_none() {
        return not_found();
    }
    let items: Vec<Item> = db
        .items
        .iter()
        .filter(|item| item.user.id == id)
        .cloned()
        .collect();
    paginate(&headers, &uri, &params, items)
}

async fn list_user_stocks(
    State(db): State<Db>,
    Path(id): Path<String>,
    headers: HeaderMap,
    uri: Uri,
    Query(params): Query<ListParams>,
) -> Response {
    if db.user(&id).is_none() {
        return not_found();
    }
    let items: Vec<Item> = db
        .stocks
        .iter()
        .filter(|(user, _)| *user == id)
        .filter_map(|(_, item)| db.item(item).cloned())
        .collect();
    paginate(&headers, &uri, &params, items)
}

async fn list_following_tags(
    State(db): State<Db>,
    Path(id): Path<String>,
    headers: HeaderMap,
    uri: Uri,
    Query(params): Query<ListParams>,
) -> Response {
    if db.user(&id).is_none() {
        return not_found();
    }
    let tags: Vec<Tag> = db
        .tag_follows
        .iter()
        .filter(|(user, _)| *user == id)
        .filter_map(|(_, tag)| db.tag(tag).cloned())
        .collect();
    paginate(&headers, &uri, &params, tags)
}

// --- items ---

/// Space-separated terms, all of which must match. `tag:<name>` matches a
/// tag name; anything else is a substring of the title or body.
fn matches_query(item: &Item, query: &str) -> bool {
    query.split_whitespace().all(|term| match term.strip_prefix("tag:") {
        Some(tag) => item.tags.iter().any(|t| t.name.eq_ignore_ascii_case(tag)),
        None => item.title.contains(term) || item.body.contains(term),
    })
}

async fn list_items(
    State(db): State<Db>,
    headers: HeaderMap,
    uri: Uri,
    Query(params): Query<ListParams>,
) -> Response {
    let query = params.query.as_deref().unwrap_or_default();
    let items: Vec<Item> = db
        .items
        .iter()
        .filter(|item| matches_query(item, query))
        .cloned()
        .collect();
    paginate(&headers, &uri, &params, items)
}

async fn get_item(State(db): State<Db>, Path(id): Path<String>) -> Response {
    found(db.item(&id))
}

async fn list_item_comments(State(db): State<Db>, Path(id): Path<String>) -> Response {
    if db.item(&id).is_none() {
        return not_found();
    }
    let comments: Vec<&Comment> = db.comments.iter().filter(|c| c.item_id == id).collect();
    Json(comments).into_response()
}

async fn list_item_stockers(
    State(db): State<Db>,
    Path(id): Path<String>,
    headers: HeaderMap,
    uri: Uri,
    Query(params): Query<ListParams>,
) -> Response {
    if db.item(&id).is_none() {
        return not_found();
    }
    let users: Vec<User> = db
        .stocks
        .iter()
        .filter(|(_, item)| *item == id)
        .filter_map(|(user, _)| db.user(user).cloned())
        .collect();
    paginate(&headers, &uri, &params, users)
}

async fn get_comment(State(db): State<Db>, Path(id): Path<String>) -> Response {
    found(db.comment(&id))
}

// --- tags ---

async fn list_tags(
    State(db): State<Db>,
    headers: HeaderMap,
    uri: Uri,
    Query(params): Query<ListParams>,
) -> Response {
    let mut tags = db.tags.clone();
    match params.sort.as_deref() {
        None | Some("count") => tags.sort_by(|a, b| b.items_count.cmp(&a.items_count)),
        Some("name") => tags.sort_by(|a, b| a.id.cmp(&b.id)),
        Some(_) => return error(StatusCode::BAD_REQUEST, "Bad request", "bad_request"),
    }
    paginate(&headers, &uri, &params, tags)
}

async fn get_tag(State(db): State<Db>, Path(id): Path<String>) -> Response {
    found(db.tag(&id))
}

async fn list_tag_items(
    State(db): State<Db>,
    Path(id): Path<String>,
    headers: HeaderMap,
    uri: Uri,
    Query(params): Query<ListParams>,
) -> Response {
    let Some(tag) = db.tag(&id) else {
        return not_found();
    };
    let items: Vec<Item> = db
        .items
        .iter()
        .filter(|item| item.tags.iter().any(|t| t.name.eq_ignore_ascii_case(&tag.id)))
        .cloned()
        .collect();
    paginate(&headers, &uri, &params, items)
}

async fn tag_following(
    State(db): State<Db>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let me = match authenticate(&headers) {
        Ok(me) => me,
        Err(response) => return response,
    };
    let Some(tag) = db.tag(&id) else {
        return not_found();
    };
    let follows = db
        .tag_follows
        .iter()
        .any(|(user, followed)| user == me && *followed == tag.id);
    if follows {
        StatusCode::NO_CONTENT.into_response()
    } else {
        not_found()
    }
}
