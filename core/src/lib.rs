//! Blocking client for the Qiita API v2.
//!
//! # Overview
//! Every endpoint runs through one pipeline: build the request, send it over
//! an injectable `Transport`, classify the status, decode the body, and for
//! collections extract pagination from the `Total-Count` and `Link` headers.
//! Accessors such as `QiitaClient::get_tag` or `QiitaClient::get_users` are
//! thin typed wrappers over that pipeline.
//!
//! # Design
//! - `QiitaClient` is immutable after construction and shared freely.
//! - Calls are bound to a `RequestContext` carrying an optional deadline and
//!   a cancellation flag.
//! - Status codes are classified before any body is decoded.
//! - Pagination bounds are checked locally, before any network traffic.
//!
//! ```no_run
//! use qiita_core::{QiitaClient, RequestContext, TagSort};
//!
//! let client = QiitaClient::new()?;
//! let tags = client.get_tags(&RequestContext::background(), 1, 20, TagSort::Count)?;
//! println!("{} tags in total", tags.total_count());
//! # Ok::<(), qiita_core::ApiError>(())
//! ```

pub mod client;
mod comments;
pub mod context;
pub mod error;
pub mod http;
mod items;
pub mod pagination;
pub mod request;
pub mod response;
mod tags;
pub mod transport;
pub mod types;
mod users;

pub use client::{ClientBuilder, QiitaClient, DEFAULT_BASE_URL};
pub use context::RequestContext;
pub use error::{ApiError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use pagination::{PageRequest, PaginationInfo};
pub use response::{ResourceKind, Subject};
pub use transport::UreqTransport;
pub use types::{
    Comment, Item, ItemTag, ItemsResponse, Paginated, Tag, TagSort, TagsResponse, User,
    UsersResponse,
};
