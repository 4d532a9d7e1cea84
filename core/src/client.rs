//! Client configuration and the generic request pipeline.
//!
//! # Design
//! `QiitaClient` holds immutable configuration only: base URL, transport,
//! optional token, optional logger. Every accessor in `users`, `items`,
//! `tags` and `comments` describes its call as an `ApiRequest` plus a
//! `Subject`, then hands it to one of three executors:
//!
//! - `fetch` for single resources (classify, then decode),
//! - `fetch_page` for paginated collections (bounds check, classify,
//!   extract pagination, decode),
//! - `probe` for status-only endpoints.
//!
//! The logger is an injected `tracing::Dispatch`. Events are emitted only
//! through it, so a client built without one stays silent even when the
//! process has a global subscriber.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, warn, Dispatch};
use url::Url;

use crate::context::RequestContext;
use crate::error::ApiError;
use crate::http::{HttpResponse, Transport};
use crate::pagination::{extract_pagination, PageRequest, QIITA_PAGE_BOUNDS};
use crate::request::{build_request, ApiRequest};
use crate::response::{classify, decode_body, Status, Subject};
use crate::transport::UreqTransport;
use crate::types::Paginated;

pub const DEFAULT_BASE_URL: &str = "https://qiita.com/api/v2";
pub const DEFAULT_USER_AGENT: &str = concat!("qiita-core/", env!("CARGO_PKG_VERSION"));

/// Blocking client for the Qiita API v2. Cheap to clone, safe to share.
#[derive(Clone)]
pub struct QiitaClient {
    base_url: Url,
    user_agent: String,
    access_token: Option<String>,
    logger: Option<Dispatch>,
    transport: Arc<dyn Transport>,
}

impl QiitaClient {
    /// A client for `https://qiita.com/api/v2` with no token and no logger.
    pub fn new() -> Result<Self, ApiError> {
        Self::builder().build()
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// Run `f` with the configured logger as the default dispatcher.
    fn log(&self, f: impl FnOnce()) {
        if let Some(dispatch) = &self.logger {
            tracing::dispatcher::with_default(dispatch, f);
        }
    }

    fn send(&self, ctx: &RequestContext, request: ApiRequest) -> Result<HttpResponse, ApiError> {
        let request = build_request(
            &self.base_url,
            &self.user_agent,
            self.access_token.as_deref(),
            request,
        )?;
        self.log(|| debug!(method = %request.method, url = %request.url, "send request"));

        ctx.check()?;
        let method = request.method;
        let url = request.url.clone();
        let response = self.transport.send(request, ctx)?;
        ctx.check()?;

        self.log(|| debug!(%method, %url, status = response.status, "received response"));
        Ok(response)
    }

    /// Fetch one resource. Anything but 200 is an error.
    pub(crate) fn fetch<T: DeserializeOwned>(
        &self,
        ctx: &RequestContext,
        request: ApiRequest,
        subject: Option<&Subject>,
    ) -> Result<T, ApiError> {
        let response = self.send(ctx, request)?;
        match classify(response.status, subject)? {
            Status::Ok => decode_body(response),
            Status::NoContent => Err(ApiError::UnknownStatus {
                status: response.status,
            }),
        }
    }

    /// Fetch one page of a collection.
    ///
    /// `page` and `per_page` are validated before anything is sent and are
    /// added to the request's query.
    pub(crate) fn fetch_page<T: DeserializeOwned>(
        &self,
        ctx: &RequestContext,
        request: ApiRequest,
        subject: Option<&Subject>,
        page: PageRequest,
    ) -> Result<Paginated<T>, ApiError> {
        QIITA_PAGE_BOUNDS.validate(page)?;
        let request = request
            .query("page", page.page)
            .query("per_page", page.per_page);

        let response = self.send(ctx, request)?;
        if classify(response.status, subject)? != Status::Ok {
            return Err(ApiError::UnknownStatus {
                status: response.status,
            });
        }

        let pagination = extract_pagination(&response.headers, page)?;
        if pagination.page() > pagination.last_page() {
            self.log(|| {
                warn!(
                    page = pagination.page(),
                    last_page = pagination.last_page(),
                    "requested page is past the last page"
                )
            });
        }
        let entries: Vec<T> = decode_body(response)?;
        Paginated::new(entries, pagination)
    }

    /// Send a request whose answer is carried by the status code alone.
    pub(crate) fn probe(
        &self,
        ctx: &RequestContext,
        request: ApiRequest,
        subject: Option<&Subject>,
    ) -> Result<Status, ApiError> {
        let response = self.send(ctx, request)?;
        classify(response.status, subject)
    }
}

impl fmt::Debug for QiitaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QiitaClient")
            .field("base_url", &self.base_url.as_str())
            .field("user_agent", &self.user_agent)
            .field("has_access_token", &self.access_token.is_some())
            .field("has_logger", &self.logger.is_some())
            .finish_non_exhaustive()
    }
}

/// Builder for `QiitaClient`.
#[derive(Default)]
pub struct ClientBuilder {
    base_url: Option<String>,
    user_agent: Option<String>,
    access_token: Option<String>,
    logger: Option<Dispatch>,
    transport: Option<Arc<dyn Transport>>,
}

impl ClientBuilder {
    /// Override the API root, e.g. a Qiita Team endpoint or a local mock.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Send request diagnostics to `dispatch`.
    pub fn logger(mut self, dispatch: Dispatch) -> Self {
        self.logger = Some(dispatch);
        self
    }

    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(self) -> Result<QiitaClient, ApiError> {
        let raw = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let base_url = Url::parse(raw)
            .map_err(|e| ApiError::InvalidRequest(format!("invalid base URL '{raw}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidRequest(format!(
                "base URL '{raw}' cannot carry a path"
            )));
        }

        Ok(QiitaClient {
            base_url,
            user_agent: self
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            access_token: self.access_token.filter(|token| !token.is_empty()),
            logger: self.logger,
            transport: self
                .transport
                .unwrap_or_else(|| Arc::new(UreqTransport::new())),
        })
    }
}


#[cfg(test)]
mod tests {
    use std::io::{self, Write};
    use std::sync::Mutex;

    use super::testing::{client, StubTransport};
    use super::*;
    use crate::error::TransportError;
    use crate::response::ResourceKind;
    use crate::types::Tag;

    const TAG_JSON: &str = r#"{"id":"React","icon_url":null,"items_count":2693,"followers_count":2403}"#;

    #[test]
    fn default_client_points_at_qiita() {
        let client = QiitaClient::new().unwrap();
        assert_eq!(client.base_url().as_str(), "https://qiita.com/api/v2");
        assert!(!client.is_authenticated());
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = QiitaClient::builder().base_url("::nope").build().unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));

        let err = QiitaClient::builder()
            .base_url("mailto:qiita@example.com")
            .build()
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }

    #[test]
    fn empty_token_means_unauthenticated() {
        let client = QiitaClient::builder().access_token("").build().unwrap();
        assert!(!client.is_authenticated());
    }

    #[test]
    fn debug_hides_token() {
        let client = QiitaClient::builder()
            .access_token("very-secret")
            .build()
            .unwrap();
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("very-secret"));
        assert!(rendered.contains("has_access_token: true"));
    }

    #[test]
    fn fetch_does_not_decode_error_bodies() {
        let stub = StubTransport::new();
        stub.push(404, &[], r#"{"message":"Not found","type":"not_found"}"#);
        let subject = Subject::new(ResourceKind::Tag, "nonexistent");
        let err = client(&stub)
            .fetch::<Tag>(
                &RequestContext::background(),
                ApiRequest::get("tags/nonexistent"),
                Some(&subject),
            )
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn fetch_treats_no_content_as_unexpected() {
        let stub = StubTransport::new();
        stub.push(204, &[], "");
        let err = client(&stub)
            .fetch::<Tag>(&RequestContext::background(), ApiRequest::get("tags/x"), None)
            .unwrap_err();
        assert!(matches!(err, ApiError::UnknownStatus { status: 204 }));
    }

    #[test]
    fn cancelled_context_never_reaches_transport() {
        let stub = StubTransport::new();
        stub.push(200, &[], TAG_JSON);
        let ctx = RequestContext::background();
        ctx.cancel();
        let err = client(&stub)
            .fetch::<Tag>(&ctx, ApiRequest::get("tags/react"), None)
            .unwrap_err();
        assert!(matches!(err, ApiError::Transport(TransportError::Cancelled)));
        assert_eq!(stub.calls(), 0);
    }

    #[test]
    fn transport_failures_surface_as_is() {
        let stub = StubTransport::new();
        let err = client(&stub)
            .fetch::<Tag>(&RequestContext::background(), ApiRequest::get("tags/react"), None)
            .unwrap_err();
        assert!(matches!(err, ApiError::Transport(TransportError::Connection(_))));
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn injected_logger_sees_target_url() {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(captured.clone())
            .finish();

        let stub = StubTransport::new();
        stub.push(200, &[], TAG_JSON);
        let client = QiitaClient::builder()
            .base_url("https://qiita.com/api/v2")
            .logger(Dispatch::new(subscriber))
            .transport(stub.clone())
            .build()
            .unwrap();
        client
            .fetch::<Tag>(&RequestContext::background(), ApiRequest::get("tags/react"), None)
            .unwrap();

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("https://qiita.com/api/v2/tags/react"));
        assert!(output.contains("send request"));
        assert!(output.contains("status=200"));
    }

    #[test]
    fn page_past_the_end_is_logged_as_warning() {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(captured.clone())
            .finish();

        let stub = StubTransport::new();
        stub.push(
            200,
            &[
                ("Link", "<https://qiita.com/api/v2/tags?page=3&per_page=20>; rel=\"last\""),
                ("Total-Count", "45"),
            ],
            "[]",
        );
        let client = QiitaClient::builder()
            .logger(Dispatch::new(subscriber))
            .transport(stub.clone())
            .build()
            .unwrap();
        let page: Paginated<Tag> = client
            .fetch_page(
                &RequestContext::background(),
                ApiRequest::get("tags"),
                None,
                PageRequest::new(5, 20),
            )
            .unwrap();
        assert!(page.is_empty());

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("WARN"));
        assert!(output.contains("requested page is past the last page"));
        assert!(!output.contains("send request"));
    }
}
