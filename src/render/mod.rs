//! Post rendering.
//!
//! [`view`] turns API records into a view model; [`post`] turns the view
//! model into HTML. Fragments that change after a mutation (reactions, a new
//! comment, the edit form) render independently of the whole post.

pub mod post;
pub mod view;

use maud::{Markup, Render};

use crate::api::{Comment, Post, Reaction};

pub use post::{
    post_element_id, CommentForm, CommentItem, CommentList, EditForm, OwnerControls,
    ReactionsFragment,
};
pub use view::{tally_reactions, CommentView, PostView, ReactionTally};

/// Render a whole post for `viewer_id`.
#[must_use]
pub fn render_post(post: &Post, viewer_id: &str) -> Markup {
    PostView::build(post, viewer_id).render()
}

/// Render only the reactions section from a reaction sequence.
#[must_use]
pub fn render_reactions(reactions: &[Reaction]) -> Markup {
    ReactionsFragment::new(&tally_reactions(reactions)).render()
}

/// Render one comment line.
#[must_use]
pub fn render_comment(comment: &Comment) -> Markup {
    CommentItem::new(CommentView::build(comment)).render()
}

/// Render the inline edit form for `post`.
#[must_use]
pub fn render_edit_form(post: &Post) -> Markup {
    EditForm::new(post.id, &post.title, post.body.as_deref().unwrap_or_default()).render()
}
