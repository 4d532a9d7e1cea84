//! Comment endpoints. Read-only; posting and editing comments is not exposed.

use crate::client::QiitaClient;
use crate::context::RequestContext;
use crate::error::ApiError;
use crate::request::ApiRequest;
use crate::response::{ResourceKind, Subject};
use crate::types::Comment;

impl QiitaClient {
    /// `GET /comments/:comment_id`
    pub fn get_comment(&self, ctx: &RequestContext, comment_id: &str) -> Result<Comment, ApiError> {
        let subject = Subject::new(ResourceKind::Comment, comment_id);
        self.fetch(
            ctx,
            ApiRequest::get_segments(&["comments", comment_id]),
            Some(&subject),
        )
    }

    /// `GET /items/:item_id/comments`, oldest first. Not paginated.
    pub fn get_item_comments(
        &self,
        ctx: &RequestContext,
        item_id: &str,
    ) -> Result<Vec<Comment>, ApiError> {
        let subject = Subject::new(ResourceKind::Item, item_id);
        self.fetch(
            ctx,
            ApiRequest::get_segments(&["items", item_id, "comments"]),
            Some(&subject),
        )
    }
}
