//! Resource DTOs for the Qiita API.
//!
//! # Design
//! Field names follow the snake_case wire keys. Fields Qiita documents as
//! nullable are `Option`s. The mock-server crate defines its own copies of
//! these shapes; the integration tests catch drift between the two.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::pagination::PaginationInfo;

/// A Qiita user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub permanent_id: u64,
    pub name: Option<String>,
    pub profile_image_url: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub organization: Option<String>,
    pub website_url: Option<String>,
    #[serde(default)]
    pub team_only: bool,
    pub items_count: u64,
    pub followees_count: u64,
    pub followers_count: u64,
    pub github_login_name: Option<String>,
    pub linkedin_id: Option<String>,
    pub twitter_screen_name: Option<String>,
}

/// A post, called "item" by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub id: String,
    pub title: String,
    pub url: String,
    pub body: String,
    pub rendered_body: String,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub coediting: bool,
    pub likes_count: u64,
    pub comments_count: u64,
    /// Only visible to the author; null otherwise.
    pub page_views_count: Option<u64>,
    pub tags: Vec<ItemTag>,
    pub user: User,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

/// Tag reference embedded in an item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemTag {
    pub name: String,
    #[serde(default)]
    pub versions: Vec<String>,
}

/// A tag which can be attached to items.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    pub id: String,
    pub icon_url: Option<String>,
    pub items_count: u64,
    pub followers_count: u64,
}

/// A comment on an item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    pub id: String,
    pub body: String,
    pub rendered_body: String,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
    pub user: User,
}

/// Ordering accepted by `GET /tags`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagSort {
    /// Most-used tags first.
    #[default]
    Count,
    Name,
}

impl TagSort {
    pub fn as_str(self) -> &'static str {
        match self {
            TagSort::Count => "count",
            TagSort::Name => "name",
        }
    }
}

/// One page of a collection together with its pagination info.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Paginated<T> {
    entries: Vec<T>,
    #[serde(flatten)]
    pagination: PaginationInfo,
}

pub type UsersResponse = Paginated<User>;
pub type ItemsResponse = Paginated<Item>;
pub type TagsResponse = Paginated<Tag>;

impl<T> Paginated<T> {
    /// Pair `entries` with `pagination`, rejecting pages larger than `per_page`.
    pub fn new(entries: Vec<T>, pagination: PaginationInfo) -> Result<Self, ApiError> {
        if entries.len() > pagination.per_page() as usize {
            return Err(ApiError::MalformedPagination(format!(
                "received {} entries for per_page {}",
                entries.len(),
                pagination.per_page()
            )));
        }
        Ok(Self {
            entries,
            pagination,
        })
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<T> {
        self.entries
    }

    pub fn pagination(&self) -> &PaginationInfo {
        &self.pagination
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn page(&self) -> u32 {
        self.pagination.page()
    }

    pub fn per_page(&self) -> u32 {
        self.pagination.per_page()
    }

    pub fn first_page(&self) -> u32 {
        self.pagination.first_page()
    }

    pub fn last_page(&self) -> u32 {
        self.pagination.last_page()
    }

    pub fn total_count(&self) -> u64 {
        self.pagination.total_count()
    }
}
