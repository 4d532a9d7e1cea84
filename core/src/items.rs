//! Item (post) endpoints.

use crate::client::QiitaClient;
use crate::context::RequestContext;
use crate::error::ApiError;
use crate::pagination::PageRequest;
use crate::request::ApiRequest;
use crate::response::{ResourceKind, Subject};
use crate::types::{Item, ItemsResponse, UsersResponse};

impl QiitaClient {
    /// `GET /items/:item_id`
    pub fn get_item(&self, ctx: &RequestContext, item_id: &str) -> Result<Item, ApiError> {
        let subject = Subject::new(ResourceKind::Item, item_id);
        self.fetch(ctx, ApiRequest::get_segments(&["items", item_id]), Some(&subject))
    }

    /// `GET /items`, newest first, optionally narrowed by a search `query`
    /// such as `"tag:Rust stocks:>10"`.
    pub fn get_items(
        &self,
        ctx: &RequestContext,
        page: u32,
        per_page: u32,
        query: Option<&str>,
    ) -> Result<ItemsResponse, ApiError> {
        let mut request = ApiRequest::get("items");
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            request = request.query("query", query);
        }
        self.fetch_page(ctx, request, None, PageRequest::new(page, per_page))
    }

    /// `GET /users/:user_id/items`
    pub fn get_user_items(
        &self,
        ctx: &RequestContext,
        user_id: &str,
        page: u32,
        per_page: u32,
    ) -> Result<ItemsResponse, ApiError> {
        let subject = Subject::new(ResourceKind::User, user_id);
        self.fetch_page(
            ctx,
            ApiRequest::get_segments(&["users", user_id, "items"]),
            Some(&subject),
            PageRequest::new(page, per_page),
        )
    }

    /// `GET /users/:user_id/stocks`
    pub fn get_user_stocks(
        &self,
        ctx: &RequestContext,
        user_id: &str,
        page: u32,
        per_page: u32,
    ) -> Result<ItemsResponse, ApiError> {
        let subject = Subject::new(ResourceKind::User, user_id);
        self.fetch_page(
            ctx,
            ApiRequest::get_segments(&["users", user_id, "stocks"]),
            Some(&subject),
            PageRequest::new(page, per_page),
        )
    }

    /// `GET /items/:item_id/stockers`
    pub fn get_item_stockers(
        &self,
        ctx: &RequestContext,
        item_id: &str,
        page: u32,
        per_page: u32,
    ) -> Result<UsersResponse, ApiError> {
        let subject = Subject::new(ResourceKind::Item, item_id);
        self.fetch_page(
            ctx,
            ApiRequest::get_segments(&["items", item_id, "stockers"]),
            Some(&subject),
            PageRequest::new(page, per_page),
        )
    }
}
