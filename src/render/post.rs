//! Markup for a single post and its independently re-rendered fragments.

use maud::{html, Markup, Render};

use super::view::{CommentView, PostView, ReactionTally};
use crate::components::{Button, CountBadge, Form, FormGroup, Input, TagList, TextArea};

/// Element id of a rendered post.
#[must_use]
pub fn post_element_id(post_id: u64) -> String {
    format!("post-{post_id}")
}

impl Render for PostView<'_> {
    fn render(&self) -> Markup {
        html! {
            div class="post card mb-3" id=(post_element_id(self.id)) data-post-id=(self.id) {
                div class="card-body" {
                    h1 class="post-title card-title" { (self.title) }
                    h3 class="post-author card-subtitle mb-2 text-muted" { (self.author_name) }
                    p class="post-body card-text" { (self.body) }
                    @if let Some(media) = self.media {
                        img src=(media) class="img-fluid" alt="Media content for post";
                    }
                    (TagList::new(self.tags))
                    (CommentList::new(&self.comments))
                    (ReactionsFragment::new(&self.reactions))
                    (CommentForm::new(self.id))
                    @if self.owner_controls {
                        (OwnerControls::new(self.id))
                    }
                }
            }
        }
    }
}

/// A single comment line.
#[derive(Debug, Clone, Copy)]
pub struct CommentItem<'a> {
    pub comment: CommentView<'a>,
}

impl<'a> CommentItem<'a> {
    #[must_use]
    pub const fn new(comment: CommentView<'a>) -> Self {
        Self { comment }
    }
}

impl Render for CommentItem<'_> {
    fn render(&self) -> Markup {
        html! {
            div class="comment card-text" {
                (self.comment.body)
                " - "
                span class="comment-author" { (self.comment.author_name) }
            }
        }
    }
}

/// The comments section.
#[derive(Debug, Clone, Copy)]
pub struct CommentList<'a> {
    pub comments: &'a [CommentView<'a>],
}

impl<'a> CommentList<'a> {
    #[must_use]
    pub const fn new(comments: &'a [CommentView<'a>]) -> Self {
        Self { comments }
    }
}

impl Render for CommentList<'_> {
    fn render(&self) -> Markup {
        html! {
            div class="comments mt-3" {
                h4 { "Comments" }
                @for comment in self.comments {
                    (CommentItem::new(*comment))
                }
            }
        }
    }
}

/// The reactions section: one count and one button per symbol.
///
/// Rendered on its own after a reaction so the rest of the post, including
/// any half-typed comment, is left alone.
#[derive(Debug, Clone, Copy)]
pub struct ReactionsFragment<'a> {
    pub tallies: &'a [ReactionTally; 5],
}

impl<'a> ReactionsFragment<'a> {
    #[must_use]
    pub const fn new(tallies: &'a [ReactionTally; 5]) -> Self {
        Self { tallies }
    }
}

impl Render for ReactionsFragment<'_> {
    fn render(&self) -> Markup {
        html! {
            div class="reactions mt-3" {
                h4 { "Reactions" }
                div class="reaction-counts mb-2" {
                    @for tally in self.tallies {
                        (CountBadge::new(tally.count, tally.symbol.as_str()))
                    }
                }
                div class="reaction-buttons" {
                    @for tally in self.tallies {
                        (Button::light(tally.symbol.as_str())
                            .class("give-reaction mr-1")
                            .symbol(tally.symbol.as_str()))
                    }
                }
            }
        }
    }
}

/// The add-comment form.
#[derive(Debug, Clone, Copy)]
pub struct CommentForm {
    pub post_id: u64,
}

impl CommentForm {
    #[must_use]
    pub const fn new(post_id: u64) -> Self {
        Self { post_id }
    }
}

impl Render for CommentForm {
    fn render(&self) -> Markup {
        let content = html! {
            (FormGroup::new(html! {
                (Input::text("comment")
                    .placeholder("Add a comment...")
                    .class("form-control new-comment-text"))
            }))
            (Button::primary("Add Comment").r#type("submit").class("mt-2"))
        };
        Form::new(content)
            .class("add-comment-form mt-3")
            .post_id(self.post_id)
            .render()
    }
}

/// Delete and update buttons, shown to the post's author only.
#[derive(Debug, Clone, Copy)]
pub struct OwnerControls {
    pub post_id: u64,
}

impl OwnerControls {
    #[must_use]
    pub const fn new(post_id: u64) -> Self {
        Self { post_id }
    }
}

impl Render for OwnerControls {
    fn render(&self) -> Markup {
        html! {
            div class="mt-3 post-controls" {
                (Button::danger("Delete").class("delete-post mr-2").post_id(self.post_id))
                (Button::warning("Update").class("update-post").post_id(self.post_id))
            }
        }
    }
}

/// Inline edit form pre-filled with the current title and body.
#[derive(Debug, Clone, Copy)]
pub struct EditForm<'a> {
    pub post_id: u64,
    pub title: &'a str,
    pub body: &'a str,
}

impl<'a> EditForm<'a> {
    #[must_use]
    pub const fn new(post_id: u64, title: &'a str, body: &'a str) -> Self {
        Self {
            post_id,
            title,
            body,
        }
    }
}

impl Render for EditForm<'_> {
    fn render(&self) -> Markup {
        let content = html! {
            (Input::text("title").value(self.title).class("form-control mb-2"))
            (TextArea::new("body").value(self.body).class("form-control mb-2"))
            (Button::primary("Submit").r#type("submit"))
        };
        html! {
            div class="card mb-3 update-post-card" {
                div class="card-body" {
                    (Form::new(content).class("update-post-form mb-3").post_id(self.post_id))
                }
            }
        }
    }
}
