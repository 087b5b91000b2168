//! Card components for post summaries in the feed.

use maud::{html, Markup, Render};

use crate::api::Post;
use crate::components::badge::TagList;
use crate::components::alert::Alert;
use crate::constants::{UNKNOWN_AUTHOR, VIEW_POST_PATH};

/// A feed card linking to the full post view.
///
/// # Example
///
/// ```ignore
/// use crate::components::card::FeedCard;
///
/// let card = FeedCard::new(&post);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FeedCard<'a> {
    pub post: &'a Post,
}

impl<'a> FeedCard<'a> {
    #[must_use]
    pub const fn new(post: &'a Post) -> Self {
        Self { post }
    }
}

impl Render for FeedCard<'_> {
    fn render(&self) -> Markup {
        let post = self.post;
        let href = format!("{VIEW_POST_PATH}?id={}", post.id);
        let author = post.author_name().unwrap_or(UNKNOWN_AUTHOR);

        html! {
            div class="post card mb-3" data-post-id=(post.id) {
                a href=(href) class="text-decoration-none text-dark" {
                    div class="card-body" {
                        h5 class="card-title post-title" { (post.title) }
                        p class="card-text post-author" {
                            small class="text-muted" { (author) }
                        }
                        p class="card-text post-body" { (post.body.as_deref().unwrap_or_default()) }
                        @if let Some(media) = post.media_url() {
                            img src=(media) alt="Media content for post" class="card-img-top";
                        }
                        (TagList::new(&post.tags).class("mt-2 post-tags"))
                    }
                }
            }
        }
    }
}

/// A list of feed cards, or a notice when there are none.
#[derive(Debug, Clone, Copy)]
pub struct FeedGrid<'a> {
    pub posts: &'a [&'a Post],
}

impl<'a> FeedGrid<'a> {
    #[must_use]
    pub const fn new(posts: &'a [&'a Post]) -> Self {
        Self { posts }
    }
}

impl Render for FeedGrid<'_> {
    fn render(&self) -> Markup {
        html! {
            div id="posts-container" {
                @if self.posts.is_empty() {
                    (Alert::info("No posts to show."))
                }
                @for post in self.posts {
                    (FeedCard::new(post))
                }
            }
        }
    }
}
