//! Wire types for the social API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The fixed set of reaction symbols, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReactionSymbol {
    ThumbsUp,
    Heart,
    Smile,
    Astonished,
    ThumbsDown,
}

impl ReactionSymbol {
    /// Every symbol, in the order reactions are rendered.
    pub const ALL: [Self; 5] = [
        Self::ThumbsUp,
        Self::Heart,
        Self::Smile,
        Self::Astonished,
        Self::ThumbsDown,
    ];

    /// The emoji sent to and received from the server.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ThumbsUp => "\u{1F44D}",       // 👍
            Self::Heart => "\u{2764}\u{FE0F}",   // ❤️
            Self::Smile => "\u{1F600}",          // 😀
            Self::Astonished => "\u{1F632}",     // 😲
            Self::ThumbsDown => "\u{1F44E}",     // 👎
        }
    }

    /// Look up a symbol by its emoji. The heart matches with or without the
    /// variation selector.
    #[must_use]
    pub fn from_emoji(s: &str) -> Option<Self> {
        if s == "\u{2764}" {
            return Some(Self::Heart);
        }
        Self::ALL.into_iter().find(|sym| sym.as_str() == s)
    }

    /// Look up a symbol by emoji or by a short ASCII name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::from_emoji(s).or_else(|| match s.to_lowercase().as_str() {
            "thumbsup" | "+1" | "like" => Some(Self::ThumbsUp),
            "heart" | "love" => Some(Self::Heart),
            "smile" | "grin" => Some(Self::Smile),
            "astonished" | "wow" => Some(Self::Astonished),
            "thumbsdown" | "-1" | "dislike" => Some(Self::ThumbsDown),
            _ => None,
        })
    }
}

impl std::fmt::Display for ReactionSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to a user who authored a post or comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub banner: Option<String>,
}

/// A comment on a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub post_id: Option<u64>,
    #[serde(default)]
    pub reply_to_id: Option<u64>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub author: Option<Author>,
}

impl Comment {
    /// The commenter's display name, if the server supplied one.
    #[must_use]
    pub fn author_name(&self) -> Option<&str> {
        self.author
            .as_ref()
            .and_then(|a| a.name.as_deref())
            .filter(|n| !n.is_empty())
    }
}

/// Tally of one symbol on a post. A missing record means a count of zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reaction {
    #[serde(deserialize_with = "canonical_symbol")]
    pub symbol: String,
    #[serde(default)]
    pub count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_id: Option<u64>,
}

/// Store known emoji in the form [`ReactionSymbol::as_str`] uses; anything
/// else is kept as sent.
fn canonical_symbol<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(ReactionSymbol::from_emoji(&raw).map_or(raw, |sym| sym.as_str().to_string()))
}

/// Totals the server attaches when asked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostCounts {
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub reactions: u64,
}

/// A post as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub media: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub reactions: Vec<Reaction>,
    #[serde(rename = "_count", default, skip_serializing_if = "Option::is_none")]
    pub count: Option<PostCounts>,
}

impl Post {
    /// The author's display name, if the server supplied one.
    #[must_use]
    pub fn author_name(&self) -> Option<&str> {
        self.author
            .as_ref()
            .and_then(|a| a.name.as_deref())
            .filter(|n| !n.is_empty())
    }

    /// The author's email, used as the ownership identifier.
    #[must_use]
    pub fn author_email(&self) -> Option<&str> {
        self.author.as_ref().and_then(|a| a.email.as_deref())
    }

    /// Whether `viewer_id` owns this post.
    #[must_use]
    pub fn is_owned_by(&self, viewer_id: &str) -> bool {
        self.author_email() == Some(viewer_id)
    }

    /// Media URL, treating an empty string as absent.
    #[must_use]
    pub fn media_url(&self) -> Option<&str> {
        self.media.as_deref().filter(|m| !m.trim().is_empty())
    }
}

/// Body of a create-post request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatePost {
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,
}

/// Body of an update-post request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdatePost {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct NewComment<'a> {
    pub body: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ReactionRequest<'a> {
    pub reaction: &'a str,
}

/// Credentials for the login endpoint.
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Payload for the register endpoint.
#[derive(Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Successful login response.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
}

impl std::fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginResponse")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("has_token", &self.access_token.is_some())
            .finish_non_exhaustive()
    }
}

/// Profile returned by the register endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub banner: Option<String>,
}
