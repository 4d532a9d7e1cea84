//! User endpoints.

use crate::client::QiitaClient;
use crate::context::RequestContext;
use crate::error::ApiError;
use crate::pagination::PageRequest;
use crate::request::ApiRequest;
use crate::response::{ResourceKind, Status, Subject};
use crate::types::{User, UsersResponse};

impl QiitaClient {
    /// `GET /users/:user_id`
    pub fn get_user(&self, ctx: &RequestContext, user_id: &str) -> Result<User, ApiError> {
        let subject = Subject::new(ResourceKind::User, user_id);
        self.fetch(ctx, ApiRequest::get_segments(&["users", user_id]), Some(&subject))
    }

    /// `GET /users`, newest registrations first.
    pub fn get_users(
        &self,
        ctx: &RequestContext,
        page: u32,
        per_page: u32,
    ) -> Result<UsersResponse, ApiError> {
        self.fetch_page(
            ctx,
            ApiRequest::get("users"),
            None,
            PageRequest::new(page, per_page),
        )
    }

    /// `GET /users/:user_id/followees`
    pub fn get_followees(
        &self,
        ctx: &RequestContext,
        user_id: &str,
        page: u32,
        per_page: u32,
    ) -> Result<UsersResponse, ApiError> {
        let subject = Subject::new(ResourceKind::User, user_id);
        self.fetch_page(
            ctx,
            ApiRequest::get_segments(&["users", user_id, "followees"]),
            Some(&subject),
            PageRequest::new(page, per_page),
        )
    }

    /// `GET /users/:user_id/followers`
    pub fn get_followers(
        &self,
        ctx: &RequestContext,
        user_id: &str,
        page: u32,
        per_page: u32,
    ) -> Result<UsersResponse, ApiError> {
        let subject = Subject::new(ResourceKind::User, user_id);
        self.fetch_page(
            ctx,
            ApiRequest::get_segments(&["users", user_id, "followers"]),
            Some(&subject),
            PageRequest::new(page, per_page),
        )
    }

    /// Whether the authenticated user follows `user_id`.
    ///
    /// `GET /users/:user_id/following` answers 204 when following and 404
    /// when not. Requires an access token.
    pub fn is_following_user(&self, ctx: &RequestContext, user_id: &str) -> Result<bool, ApiError> {
        let subject = Subject::new(ResourceKind::User, user_id);
        following(self.probe(
            ctx,
            ApiRequest::get_segments(&["users", user_id, "following"]),
            Some(&subject),
        ))
    }

    /// `GET /authenticated_user`. Requires an access token.
    pub fn get_authenticated_user(&self, ctx: &RequestContext) -> Result<User, ApiError> {
        self.fetch(ctx, ApiRequest::get("authenticated_user"), None)
    }
}

/// Interpret the outcome of a "following" probe.
pub(crate) fn following(outcome: Result<Status, ApiError>) -> Result<bool, ApiError> {
    match outcome {
        Ok(Status::NoContent) => Ok(true),
        Ok(Status::Ok) => Err(ApiError::UnknownStatus { status: 200 }),
        Err(ApiError::NotFound { .. }) => Ok(false),
        Err(err) => Err(err),
    }
}
