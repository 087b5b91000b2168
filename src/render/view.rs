//! View model for a single post.
//!
//! [`PostView::build`] is a pure mapping from a post record and the viewer's
//! identity to everything the markup needs. Defaults for missing data and the
//! ownership decision are made here, not in the templates.

use crate::api::{Comment, Post, Reaction, ReactionSymbol};
use crate::constants::{UNKNOWN_AUTHOR, UNKNOWN_COMMENTER};

/// Count of one symbol on a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReactionTally {
    pub symbol: ReactionSymbol,
    pub count: u64,
}

/// Tally every symbol in display order; symbols without a record count 0.
#[must_use]
pub fn tally_reactions(reactions: &[Reaction]) -> [ReactionTally; 5] {
    ReactionSymbol::ALL.map(|symbol| ReactionTally {
        symbol,
        count: reactions
            .iter()
            .find(|r| r.symbol == symbol.as_str())
            .map_or(0, |r| r.count),
    })
}

/// One comment as displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentView<'a> {
    pub body: &'a str,
    pub author_name: &'a str,
}

impl<'a> CommentView<'a> {
    #[must_use]
    pub fn build(comment: &'a Comment) -> Self {
        Self {
            body: &comment.body,
            author_name: comment.author_name().unwrap_or(UNKNOWN_COMMENTER),
        }
    }
}

/// Everything needed to render one post for one viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostView<'a> {
    pub id: u64,
    pub title: &'a str,
    pub author_name: &'a str,
    pub body: &'a str,
    pub media: Option<&'a str>,
    pub tags: &'a [String],
    pub comments: Vec<CommentView<'a>>,
    pub reactions: [ReactionTally; 5],
    /// Delete and update controls are shown.
    pub owner_controls: bool,
}

impl<'a> PostView<'a> {
    #[must_use]
    pub fn build(post: &'a Post, viewer_id: &str) -> Self {
        Self {
            id: post.id,
            title: &post.title,
            author_name: post.author_name().unwrap_or(UNKNOWN_AUTHOR),
            body: post.body.as_deref().unwrap_or_default(),
            media: post.media_url(),
            tags: &post.tags,
            comments: post.comments.iter().map(CommentView::build).collect(),
            reactions: tally_reactions(&post.reactions),
            owner_controls: post.is_owned_by(viewer_id),
        }
    }
}
