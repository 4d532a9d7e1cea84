//! CLI commands and argument parsing

use clap::{Args, Parser, Subcommand, ValueEnum};
use qiita_core::TagSort;

/// Read-only command-line client for the Qiita API v2
#[derive(Parser, Debug)]
#[command(name = "qiita")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// API root; every endpoint path is appended to it
    #[arg(
        long,
        global = true,
        env = "QIITA_BASE_URL",
        default_value = qiita_core::DEFAULT_BASE_URL
    )]
    pub base_url: String,

    /// Access token sent as a bearer credential
    #[arg(long, global = true, env = "QIITA_ACCESS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Give up after this many seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Log requests and responses to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Page selection shared by every collection command.
#[derive(Args, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageArgs {
    /// Page number, 1 to 100
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Entries per page, 1 to 100
    #[arg(long, default_value_t = 20)]
    pub per_page: u32,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a user
    User { id: String },

    /// List all users, newest first
    Users {
        #[command(flatten)]
        page: PageArgs,
    },

    /// List the users a user follows
    Followees {
        id: String,
        #[command(flatten)]
        page: PageArgs,
    },

    /// List a user's followers
    Followers {
        id: String,
        #[command(flatten)]
        page: PageArgs,
    },

    /// Check whether the authenticated user follows a user
    FollowingUser { id: String },

    /// Show the authenticated user
    Me,

    /// Show an item
    Item { id: String },

    /// List items, newest first
    Items {
        /// Search query, e.g. "tag:Rust"
        #[arg(short, long)]
        query: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },

    /// List a user's items
    UserItems {
        id: String,
        #[command(flatten)]
        page: PageArgs,
    },

    /// List the items a user has stocked
    Stocks {
        id: String,
        #[command(flatten)]
        page: PageArgs,
    },

    /// List the users who stocked an item
    Stockers {
        id: String,
        #[command(flatten)]
        page: PageArgs,
    },

    /// Show a tag
    Tag { id: String },

    /// List tags
    Tags {
        #[arg(long, value_enum, default_value_t = SortArg::Count)]
        sort: SortArg,
        #[command(flatten)]
        page: PageArgs,
    },

    /// List the items carrying a tag
    TagItems {
        id: String,
        #[command(flatten)]
        page: PageArgs,
    },

    /// Check whether the authenticated user follows a tag
    FollowingTag { id: String },

    /// List the tags a user follows
    FollowingTags {
        id: String,
        #[command(flatten)]
        page: PageArgs,
    },

    /// Show a comment
    Comment { id: String },

    /// List the comments on an item
    Comments { id: String },
}

/// Tag ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    /// Most-used first
    Count,
    /// Alphabetical
    Name,
}

impl From<SortArg> for TagSort {
    fn from(sort: SortArg) -> Self {
        match sort {
            SortArg::Count => TagSort::Count,
            SortArg::Name => TagSort::Name,
        }
    }
}
