//! The post feed: client-side search, limiting, filtering and the new-post
//! form.

use std::str::FromStr;

use maud::{html, Markup, Render};
use thiserror::Error;

use crate::api::{CreatePost, Post, PostQuery};
use crate::components::{Alert, BaseLayout, Button, FeedGrid, Form, FormGroup, Input, TextArea};

/// Posts whose title, body, author name or tags contain `query`,
/// ignoring case.
#[must_use]
pub fn search_posts<'a>(posts: &'a [Post], query: &str) -> Vec<&'a Post> {
    let query = query.to_lowercase();
    posts
        .iter()
        .filter(|post| {
            let body = post.body.as_deref().unwrap_or_default();
            let author = post.author_name().unwrap_or_default();
            post.title.to_lowercase().contains(&query)
                || body.to_lowercase().contains(&query)
                || author.to_lowercase().contains(&query)
                || post.tags.join(" ").to_lowercase().contains(&query)
        })
        .collect()
}

#[derive(Debug, Error)]
#[error("invalid post limit '{0}': expected 'all' or a number")]
pub struct ParseLimitError(String);

/// How many posts the feed shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PostLimit {
    #[default]
    All,
    Count(usize),
}

impl PostLimit {
    /// The first posts up to the limit.
    #[must_use]
    pub fn apply<T>(self, posts: &[T]) -> &[T] {
        match self {
            Self::All => posts,
            Self::Count(n) => &posts[..n.min(posts.len())],
        }
    }
}

impl FromStr for PostLimit {
    type Err = ParseLimitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse()
            .map(Self::Count)
            .map_err(|_| ParseLimitError(s.to_string()))
    }
}

/// Tag and activity filter applied server-side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedFilter {
    pub tag: Option<String>,
    pub active: bool,
}

impl FeedFilter {
    /// Build from a tag selection (`"all"` for none) and the active flag.
    #[must_use]
    pub fn new(tag_selection: &str, active: bool) -> Self {
        let tag = tag_selection.trim().to_lowercase();
        Self {
            tag: (!tag.is_empty() && tag != "all").then_some(tag),
            active,
        }
    }

    /// Query for the list endpoint with author, comments and reactions.
    #[must_use]
    pub fn to_query(&self) -> PostQuery {
        let mut query = PostQuery::full().active(self.active);
        if let Some(tag) = &self.tag {
            query = query.tag(tag.clone());
        }
        query
    }
}

/// Raw values from the new-post form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPostForm {
    pub title: String,
    pub body: String,
    /// Space-separated tags.
    pub tags: String,
    pub media: String,
}

impl NewPostForm {
    /// Convert into a create request. Blank tags and an empty media URL are
    /// dropped.
    #[must_use]
    pub fn into_request(self) -> CreatePost {
        let tags = self
            .tags
            .split(' ')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        let media = Some(self.media.trim().to_string()).filter(|m| !m.is_empty());

        CreatePost {
            title: self.title,
            body: self.body,
            tags,
            media,
        }
    }
}

/// Empty form for composing a post, shown above the feed.
#[must_use]
pub fn new_post_form() -> Markup {
    let content = html! {
        (FormGroup::new(html! {
            (Input::text("title").placeholder("Title").required().class("form-control mb-2"))
        }))
        (FormGroup::new(html! {
            (TextArea::new("body").placeholder("What's on your mind?").rows(3).class("form-control mb-2"))
        }))
        (FormGroup::new(html! {
            (Input::text("tags").placeholder("Tags, separated by spaces").class("form-control mb-2"))
        }))
        (FormGroup::new(html! {
            (Input::url("media").placeholder("Image URL").class("form-control mb-2"))
        }))
        (Button::primary("Post").r#type("submit"))
    };
    Form::new(content).class("create-post-form mb-4").render()
}

/// A full feed page.
#[derive(Debug, Clone)]
pub struct FeedPage<'a> {
    pub posts: Vec<&'a Post>,
    pub viewer: Option<&'a str>,
    pub notice: Option<Alert<'a>>,
}

impl<'a> FeedPage<'a> {
    #[must_use]
    pub fn new(posts: Vec<&'a Post>) -> Self {
        Self {
            posts,
            viewer: None,
            notice: None,
        }
    }

    #[must_use]
    pub fn with_viewer(mut self, viewer: Option<&'a str>) -> Self {
        self.viewer = viewer;
        self
    }

    #[must_use]
    pub fn with_notice(mut self, notice: Alert<'a>) -> Self {
        self.notice = Some(notice);
        self
    }

    #[must_use]
    pub fn render(&self) -> Markup {
        let content = html! {
            h1 { "Feed" }
            @if let Some(notice) = &self.notice {
                (notice)
            }
            (new_post_form())
            (FeedGrid::new(&self.posts))
        };
        BaseLayout::new("Feed").with_viewer(self.viewer).render(content)
    }
}
