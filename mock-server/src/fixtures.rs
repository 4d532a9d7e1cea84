use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub permanent_id: u64,
    pub name: Option<String>,
    pub profile_image_url: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub organization: Option<String>,
    pub website_url: Option<String>,
    pub team_only: bool,
    pub items_count: u64,
    pub followees_count: u64,
    pub followers_count: u64,
    pub github_login_name: Option<String>,
    pub linkedin_id: Option<String>,
    pub twitter_screen_name: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub icon_url: Option<String>,
    pub items_count: u64,
    pub followers_count: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ItemTag {
    pub name: String,
    pub versions: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub title: String,
    pub url: String,
    pub body: String,
    pub rendered_body: String,
    pub private: bool,
    pub coediting: bool,
    pub likes_count: u64,
    pub comments_count: u64,
    pub page_views_count: Option<u64>,
    pub tags: Vec<ItemTag>,
    pub user: User,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    #[serde(skip)]
    pub item_id: String,
    pub body: String,
    pub rendered_body: String,
    pub created_at: String,
    pub updated_at: String,
    pub user: User,
}

/// Read-only dataset served by the mock API.
#[derive(Clone, Debug, Default)]
pub struct Fixtures {
    pub users: Vec<User>,
    pub tags: Vec<Tag>,
    /// Newest first.
    pub items: Vec<Item>,
    pub comments: Vec<Comment>,
    /// `(follower, followee)` pairs.
    pub follows: Vec<(String, String)>,
    /// `(user, tag)` pairs.
    pub tag_follows: Vec<(String, String)>,
    /// `(user, item)` pairs.
    pub stocks: Vec<(String, String)>,
}

/// The user `MOCK_TOKEN` authenticates as.
pub const AUTHENTICATED_USER: &str = "alice";

const NAMED_USERS: [&str; 5] = ["alice", "bob", "carol", "dave", "erin"];
const MEMBERS: u64 = 20;
const TOPICS: u64 = 20;
const ITEMS: u64 = 12;

impl Fixtures {
    /// 25 users, 25 tags, 12 items and a handful of comments.
    ///
    /// `alice` follows `bob` and `carol` and is followed by everyone except
    /// `erin`, which gives her 23 followers. The `React` tag carries the
    /// counts used throughout the client tests.
    pub fn seeded() -> Self {
        let mut follows = vec![
            pair("alice", "bob"),
            pair("alice", "carol"),
            pair("bob", "alice"),
            pair("carol", "alice"),
            pair("dave", "alice"),
        ];
        let mut user_ids: Vec<String> = NAMED_USERS.iter().map(|id| id.to_string()).collect();
        for n in 1..=MEMBERS {
            let id = format!("member{n:02}");
            follows.push(pair(&id, "alice"));
            user_ids.push(id);
        }

        let authors = ["alice", "bob", "carol"];
        let item_tags = ["Rust", "React", "Go"];
        let item_meta: Vec<(String, &str, &str, u64)> = (0..ITEMS)
            .map(|n| {
                let slot = n as usize % 3;
                (format!("{:020x}", 0xc0ffee_u64 + n), authors[slot], item_tags[slot], n)
            })
            .collect();

        let items_count = |author: &str| {
            item_meta.iter().filter(|(_, a, _, _)| *a == author).count() as u64
        };
        let users: Vec<User> = user_ids
            .iter()
            .enumerate()
            .map(|(i, id)| User {
                id: id.clone(),
                permanent_id: 42 + i as u64,
                name: NAMED_USERS.contains(&id.as_str()).then(|| capitalize(id)),
                profile_image_url: format!("https://qiita-image-store.example.com/{id}.png"),
                description: None,
                location: (id == "alice").then(|| "Kyoto, Japan".to_string()),
                organization: None,
                website_url: None,
                team_only: false,
                items_count: items_count(id),
                followees_count: follows.iter().filter(|(f, _)| f == id).count() as u64,
                followers_count: follows.iter().filter(|(_, f)| f == id).count() as u64,
                github_login_name: None,
                linkedin_id: None,
                twitter_screen_name: None,
            })
            .collect();
        let user = |id: &str| users.iter().find(|u| u.id == id).cloned();

        let mut tags = vec![
            Tag {
                id: "React".to_string(),
                icon_url: Some(
                    "https://s3-ap-northeast-1.amazonaws.com/qiita-tag-image/c4d0439277f132acce23de37f694617b95af5475/medium.jpg?1513495262"
                        .to_string(),
                ),
                items_count: 2693,
                followers_count: 2403,
            },
            tag("Rust", 2100, 1800),
            tag("Go", 1900, 1500),
            tag("Ruby", 1700, 1300),
            tag("Python", 1500, 1200),
        ];
        for n in 1..=TOPICS {
            tags.push(tag(&format!("topic{n:02}"), 100 - n, 50 - n));
        }

        let mut items: Vec<Item> = item_meta
            .iter()
            .filter_map(|(id, author, tag_name, n)| {
                let day = n + 1;
                Some(Item {
                    id: id.clone(),
                    title: format!("Post {day}"),
                    url: format!("https://qiita.com/{author}/items/{id}"),
                    body: format!("# Post {day}"),
                    rendered_body: format!("<h1>Post {day}</h1>"),
                    private: false,
                    coediting: false,
                    likes_count: n * 3,
                    comments_count: if *n == 0 { 2 } else { 0 },
                    page_views_count: None,
                    tags: vec![ItemTag {
                        name: tag_name.to_string(),
                        versions: Vec::new(),
                    }],
                    user: user(*author)?,
                    created_at: format!("2024-01-{day:02}T09:00:00+09:00"),
                    updated_at: format!("2024-01-{day:02}T09:30:00+09:00"),
                })
            })
            .collect();
        items.reverse();

        let first_item = item_meta[0].0.clone();
        let comments = [("bob", 0), ("carol", 1)]
            .into_iter()
            .filter_map(|(author, n)| {
                Some(Comment {
                    id: format!("{:020x}", 0xbeef_u64 + n),
                    item_id: first_item.clone(),
                    body: format!("Comment {n}"),
                    rendered_body: format!("<p>Comment {n}</p>"),
                    created_at: format!("2024-02-0{}T12:00:00+09:00", n + 1),
                    updated_at: format!("2024-02-0{}T12:00:00+09:00", n + 1),
                    user: user(author)?,
                })
            })
            .collect();

        let stocks = vec![
            pair("alice", &item_meta[0].0),
            pair("alice", &item_meta[1].0),
            pair("bob", &item_meta[0].0),
        ];

        Self {
            users,
            tags,
            items,
            comments,
            follows,
            tag_follows: vec![pair("alice", "Rust"), pair("alice", "React")],
            stocks,
        }
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Tag ids are matched case-insensitively, as on Qiita.
    pub fn tag(&self, id: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.id.eq_ignore_ascii_case(id))
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn comment(&self, id: &str) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == id)
    }
}

fn pair(a: &str, b: &str) -> (String, String) {
    (a.to_string(), b.to_string())
}

fn tag(id: &str, items_count: u64, followers_count: u64) -> Tag {
    Tag {
        id: id.to_string(),
        icon_url: None,
        items_count,
        followers_count,
    }
}

fn capitalize(id: &str) -> String {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
