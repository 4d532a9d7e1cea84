//! Verify the request pipeline against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, the expected request line, a simulated
//! response and either the expected decoded result or an expected error
//! message fragment. Cases without a simulated response must fail before the
//! transport is reached.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use qiita_core::{
    HttpMethod, HttpRequest, HttpResponse, QiitaClient, RequestContext, Tag, TagSort, Transport,
    TransportError,
};
use serde_json::Value;

const BASE_URL: &str = "https://qiita.com/api/v2";

/// Replays the vector's simulated response and records what was sent.
#[derive(Default)]
struct Replay {
    responses: Mutex<VecDeque<HttpResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl Transport for Replay {
    fn send(
        &self,
        request: HttpRequest,
        _ctx: &RequestContext,
    ) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| TransportError::Connection("no simulated response".to_string()))
    }
}

/// A client wired to a replay transport primed with the case's response, if any.
fn client(case: &Value) -> (QiitaClient, Arc<Replay>) {
    let replay = Arc::new(Replay::default());
    if let Some(sim) = case.get("simulated_response") {
        replay.responses.lock().unwrap().push_back(simulated(sim));
    }
    let client = QiitaClient::builder()
        .base_url(BASE_URL)
        .transport(replay.clone())
        .build()
        .unwrap();
    (client, replay)
}

fn simulated(sim: &Value) -> HttpResponse {
    let headers = sim["headers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let pair = h.as_array().unwrap();
            (pair[0].as_str().unwrap().to_string(), pair[1].as_str().unwrap().to_string())
        })
        .collect();
    let body = match &sim["body"] {
        Value::String(raw) => raw.clone(),
        json => serde_json::to_string(json).unwrap(),
    };
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers,
        body: body.into_bytes(),
    }
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn check_request(name: &str, case: &Value, replay: &Replay) {
    let requests = replay.requests.lock().unwrap();
    match case.get("expected_request") {
        Some(expected) => {
            assert_eq!(requests.len(), 1, "{name}: one request sent");
            let req = &requests[0];
            let method = parse_method(expected["method"].as_str().unwrap());
            let url = format!("{BASE_URL}{}", expected["path"].as_str().unwrap());
            assert_eq!(req.method, method, "{name}: method");
            assert_eq!(req.url, url, "{name}: url");
            assert_eq!(req.header("Accept"), Some("application/json"), "{name}: accept");
            assert!(req.header("Authorization").is_none(), "{name}: no token configured");
            assert!(req.body.is_none(), "{name}: body should be None");
        }
        None => assert!(requests.is_empty(), "{name}: transport must not be reached"),
    }
}

fn check_pagination(name: &str, case: &Value, got: &[u64]) {
    let expected = &case["expected_pagination"];
    let want: Vec<u64> = ["page", "per_page", "first_page", "last_page", "total_count"]
        .iter()
        .map(|key| expected[key].as_u64().unwrap())
        .collect();
    assert_eq!(got, want.as_slice(), "{name}: pagination");
}

fn check_error(name: &str, case: &Value, err: qiita_core::ApiError) {
    let fragment = case["expected_error"].as_str().unwrap();
    let message = err.to_string();
    assert!(message.contains(fragment), "{name}: '{message}' should contain '{fragment}'");
}

// ---------------------------------------------------------------------------
// GET /tags/:tag_id
// ---------------------------------------------------------------------------

#[test]
fn get_tag_test_vectors() {
    let raw = include_str!("../../test-vectors/get_tag.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let (c, replay) = client(case);
        let result = c.get_tag(&RequestContext::background(), case["input_id"].as_str().unwrap());
        check_request(name, case, &replay);

        if case.get("expected_error").is_some() {
            check_error(name, case, result.unwrap_err());
        } else {
            let expected: Tag = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// GET /tags
// ---------------------------------------------------------------------------

#[test]
fn get_tags_test_vectors() {
    let raw = include_str!("../../test-vectors/get_tags.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let sort = match case["input_sort"].as_str().unwrap() {
            "count" => TagSort::Count,
            "name" => TagSort::Name,
            other => panic!("{name}: unknown sort: {other}"),
        };
        let (c, replay) = client(case);
        let result = c.get_tags(
            &RequestContext::background(),
            case["input_page"].as_u64().unwrap() as u32,
            case["input_per_page"].as_u64().unwrap() as u32,
            sort,
        );
        check_request(name, case, &replay);

        if case.get("expected_error").is_some() {
            check_error(name, case, result.unwrap_err());
        } else {
            let tags = result.unwrap();
            assert_eq!(tags.len() as u64, case["expected_len"].as_u64().unwrap(), "{name}: len");
            let got = [
                tags.page() as u64,
                tags.per_page() as u64,
                tags.first_page() as u64,
                tags.last_page() as u64,
                tags.total_count(),
            ];
            check_pagination(name, case, &got);
        }
    }
}

// ---------------------------------------------------------------------------
// GET /tags/:tag_id/items
// ---------------------------------------------------------------------------

#[test]
fn get_tag_items_test_vectors() {
    let raw = include_str!("../../test-vectors/get_tag_items.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let (c, replay) = client(case);
        let result = c.get_tag_items(
            &RequestContext::background(),
            case["input_id"].as_str().unwrap(),
            case["input_page"].as_u64().unwrap() as u32,
            case["input_per_page"].as_u64().unwrap() as u32,
        );
        check_request(name, case, &replay);

        if case.get("expected_error").is_some() {
            check_error(name, case, result.unwrap_err());
        } else {
            let items = result.unwrap();
            assert_eq!(items.len() as u64, case["expected_len"].as_u64().unwrap(), "{name}: len");
            assert!(
                items.entries().iter().all(|item| item.tags.iter().any(|t| t.name == "React")),
                "{name}: every item is tagged React"
            );
            let got = [
                items.page() as u64,
                items.per_page() as u64,
                items.first_page() as u64,
                items.last_page() as u64,
                items.total_count(),
            ];
            check_pagination(name, case, &got);
        }
    }
}
