//! Tag endpoints.

use crate::client::QiitaClient;
use crate::context::RequestContext;
use crate::error::ApiError;
use crate::pagination::PageRequest;
use crate::request::ApiRequest;
use crate::response::{ResourceKind, Subject};
use crate::types::{ItemsResponse, Tag, TagSort, TagsResponse};
use crate::users::following;

impl QiitaClient {
    /// `GET /tags/:tag_id`
    pub fn get_tag(&self, ctx: &RequestContext, tag_id: &str) -> Result<Tag, ApiError> {
        let subject = Subject::new(ResourceKind::Tag, tag_id);
        self.fetch(ctx, ApiRequest::get_segments(&["tags", tag_id]), Some(&subject))
    }

    /// `GET /tags`
    pub fn get_tags(
        &self,
        ctx: &RequestContext,
        page: u32,
        per_page: u32,
        sort: TagSort,
    ) -> Result<TagsResponse, ApiError> {
        self.fetch_page(
            ctx,
            ApiRequest::get("tags").query("sort", sort.as_str()),
            None,
            PageRequest::new(page, per_page),
        )
    }

    /// `GET /tags/:tag_id/items`
    pub fn get_tag_items(
        &self,
        ctx: &RequestContext,
        tag_id: &str,
        page: u32,
        per_page: u32,
    ) -> Result<ItemsResponse, ApiError> {
        let subject = Subject::new(ResourceKind::Tag, tag_id);
        self.fetch_page(
            ctx,
            ApiRequest::get_segments(&["tags", tag_id, "items"]),
            Some(&subject),
            PageRequest::new(page, per_page),
        )
    }

    /// Whether the authenticated user follows `tag_id`.
    ///
    /// `GET /tags/:tag_id/following`. Requires an access token.
    pub fn is_following_tag(&self, ctx: &RequestContext, tag_id: &str) -> Result<bool, ApiError> {
        let subject = Subject::new(ResourceKind::Tag, tag_id);
        following(self.probe(
            ctx,
            ApiRequest::get_segments(&["tags", tag_id, "following"]),
            Some(&subject),
        ))
    }

    /// `GET /users/:user_id/following_tags`
    pub fn get_following_tags(
        &self,
        ctx: &RequestContext,
        user_id: &str,
        page: u32,
        per_page: u32,
    ) -> Result<TagsResponse, ApiError> {
        let subject = Subject::new(ResourceKind::User, user_id);
        self.fetch_page(
            ctx,
            ApiRequest::get_segments(&["users", user_id, "following_tags"]),
            Some(&subject),
            PageRequest::new(page, per_page),
        )
    }
}
