//! Interaction handling for a rendered post.
//!
//! A [`PostController`] owns the snapshot of one post. User actions and API
//! results arrive as [`Msg`] values and go through [`PostController::update`],
//! which returns the [`Patch`]es the host UI must apply plus at most one
//! [`Effect`] to run. Running an effect yields the next message.
//!
//! Results are applied in the order they arrive. Two reactions in flight for
//! the same post are not serialized, so the later response wins for its
//! symbol.

mod effect;

use maud::{Markup, Render};
use tracing::{debug, error, info, warn};

use crate::api::{ApiError, Comment, Post, PostsApi, Reaction, ReactionSymbol};
use crate::render::{self, PostView};
use crate::session::{Session, SessionError};

pub use effect::Effect;

const REACT_FAILED: &str = "Error reacting to the post. Please try again.";
const DELETE_FAILED: &str = "Error deleting the post. Please try again.";
const UPDATE_FAILED: &str = "Error updating the post. Please try again.";
const DELETED: &str = "Post deleted successfully!";
const UPDATED: &str = "Post updated successfully!";

/// Input to a post controller.
#[derive(Debug)]
pub enum Msg {
    /// The comment form was submitted with this text.
    SubmitComment(String),
    CommentAdded(Result<Comment, ApiError>),
    /// A reaction button was clicked.
    React(ReactionSymbol),
    Reacted {
        symbol: ReactionSymbol,
        result: Result<Reaction, ApiError>,
    },
    /// The delete button was clicked.
    Delete,
    Deleted(Result<(), ApiError>),
    /// The update button was clicked.
    OpenEdit,
    /// The edit form was submitted.
    SubmitEdit { title: String, body: String },
    Updated {
        title: String,
        body: String,
        result: Result<Post, ApiError>,
    },
}

/// A change the host UI applies to the rendered post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch {
    /// Append a comment line (rendered HTML) to the comment list.
    AppendComment(String),
    /// Empty the comment input.
    ClearCommentInput,
    /// Replace the reactions section with this HTML.
    ReplaceReactions(String),
    /// Remove the post element.
    RemovePost,
    /// Show the inline edit form (rendered HTML).
    ShowEditForm(String),
    /// Replace the displayed title text.
    SetTitle(String),
    /// Replace the displayed body text.
    SetBody(String),
    /// Remove the inline edit form.
    CloseEditForm,
    /// Report a failure to the user.
    Alert(String),
    /// Report a success to the user.
    Notice(String),
}

/// Result of one [`PostController::update`] step.
#[derive(Debug, Default)]
pub struct Update {
    pub patches: Vec<Patch>,
    pub effect: Option<Effect>,
}

impl Update {
    fn none() -> Self {
        Self::default()
    }

    fn patches(patches: Vec<Patch>) -> Self {
        Self {
            patches,
            effect: None,
        }
    }

    fn effect(effect: Effect) -> Self {
        Self {
            patches: Vec::new(),
            effect: Some(effect),
        }
    }
}

/// State of one rendered post.
#[derive(Debug, Clone)]
pub struct PostController {
    post: Post,
    viewer_id: String,
    editing: bool,
    removed: bool,
}

impl PostController {
    /// Take ownership of a post snapshot for the session's viewer.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotLoggedIn`] if the session has no viewer.
    pub fn new(post: Post, session: &Session) -> Result<Self, SessionError> {
        let viewer_id = session.viewer_id()?.to_string();
        Ok(Self {
            post,
            viewer_id,
            editing: false,
            removed: false,
        })
    }

    #[must_use]
    pub fn post(&self) -> &Post {
        &self.post
    }

    #[must_use]
    pub fn reactions(&self) -> &[Reaction] {
        &self.post.reactions
    }

    #[must_use]
    pub fn is_owner(&self) -> bool {
        self.post.is_owned_by(&self.viewer_id)
    }

    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    #[must_use]
    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// Render the whole post in its current state.
    #[must_use]
    pub fn render(&self) -> Markup {
        PostView::build(&self.post, &self.viewer_id).render()
    }

    /// Apply one message.
    #[allow(clippy::too_many_lines)]
    pub fn update(&mut self, msg: Msg) -> Update {
        let post_id = self.post.id;

        if self.removed {
            debug!(post_id, ?msg, "Ignoring message for removed post");
            return Update::none();
        }

        match msg {
            Msg::SubmitComment(text) => {
                if text.trim().is_empty() {
                    debug!(post_id, "Ignoring empty comment");
                    return Update::none();
                }
                Update::effect(Effect::AddComment {
                    post_id,
                    body: text,
                })
            }
            Msg::CommentAdded(Ok(comment)) => {
                info!(post_id, "Comment added");
                let markup = render::render_comment(&comment).into_string();
                self.post.comments.push(comment);
                Update::patches(vec![Patch::AppendComment(markup), Patch::ClearCommentInput])
            }
            Msg::CommentAdded(Err(e)) => {
                error!(post_id, error = %e, "Error adding the comment to the post");
                Update::none()
            }

            Msg::React(symbol) => Update::effect(Effect::React { post_id, symbol }),
            Msg::Reacted {
                symbol,
                result: Ok(reaction),
            } => {
                self.apply_reaction(symbol, &reaction);
                info!(post_id, %symbol, count = reaction.count, "Reaction recorded");
                Update::patches(vec![Patch::ReplaceReactions(
                    render::render_reactions(&self.post.reactions).into_string(),
                )])
            }
            Msg::Reacted {
                symbol,
                result: Err(e),
            } => {
                warn!(post_id, %symbol, error = %e, "Reaction failed");
                Update::patches(vec![Patch::Alert(REACT_FAILED.to_string())])
            }

            Msg::Delete => {
                if !self.is_owner() {
                    warn!(post_id, "Delete requested by non-owner");
                    return Update::none();
                }
                Update::effect(Effect::Delete { post_id })
            }
            Msg::Deleted(Ok(())) => {
                self.removed = true;
                Update::patches(vec![Patch::Notice(DELETED.to_string()), Patch::RemovePost])
            }
            Msg::Deleted(Err(e)) => {
                warn!(post_id, error = %e, "Delete failed");
                Update::patches(vec![Patch::Alert(DELETE_FAILED.to_string())])
            }

            Msg::OpenEdit => {
                if !self.is_owner() {
                    warn!(post_id, "Edit requested by non-owner");
                    return Update::none();
                }
                if self.editing {
                    return Update::none();
                }
                self.editing = true;
                Update::patches(vec![Patch::ShowEditForm(
                    render::render_edit_form(&self.post).into_string(),
                )])
            }
            Msg::SubmitEdit { title, body } => {
                if !self.editing {
                    warn!(post_id, "Edit submitted without an open form");
                    return Update::none();
                }
                Update::effect(Effect::Update {
                    post_id,
                    title,
                    body,
                })
            }
            Msg::Updated {
                title,
                body,
                result: Ok(_),
            } => {
                info!(post_id, "Post updated");
                self.editing = false;
                self.post.title.clone_from(&title);
                self.post.body = Some(body.clone());
                Update::patches(vec![
                    Patch::Notice(UPDATED.to_string()),
                    Patch::SetTitle(title),
                    Patch::SetBody(body),
                    Patch::CloseEditForm,
                ])
            }
            Msg::Updated { result: Err(e), .. } => {
                warn!(post_id, error = %e, "Update failed");
                Update::patches(vec![Patch::Alert(UPDATE_FAILED.to_string())])
            }
        }
    }

    /// Apply `msg`, run any resulting effect against `api`, and apply its
    /// result. Returns every patch produced along the way.
    pub async fn dispatch(&mut self, api: &dyn PostsApi, msg: Msg) -> Vec<Patch> {
        let mut update = self.update(msg);
        let mut patches = std::mem::take(&mut update.patches);

        while let Some(effect) = update.effect.take() {
            let next = effect.run(api).await;
            update = self.update(next);
            patches.append(&mut update.patches);
        }

        patches
    }

    /// Overwrite the count of an existing record, or append a new one.
    fn apply_reaction(&mut self, symbol: ReactionSymbol, reaction: &Reaction) {
        let reactions = &mut self.post.reactions;
        if let Some(existing) = reactions.iter_mut().find(|r| r.symbol == symbol.as_str()) {
            existing.count = reaction.count;
        } else {
            reactions.push(Reaction {
                symbol: symbol.as_str().to_string(),
                count: reaction.count,
                post_id: reaction.post_id.or(Some(self.post.id)),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    fn session(email: &str) -> Session {
        Session::new("tok", Some(email.to_string()))
    }

    fn post(json: &str) -> Post {
        serde_json::from_str(json).unwrap()
    }

    fn owned_post() -> Post {
        post(r#"{"id": 1, "title": "T", "body": "B", "author": {"name": "A", "email": "a@x.no"}}"#)
    }

    fn status_error() -> ApiError {
        ApiError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "boom".to_string(),
        }
    }

    fn reaction(symbol: &str, count: u64) -> Reaction {
        Reaction {
            symbol: symbol.to_string(),
            count,
            post_id: Some(1),
        }
    }

    #[test]
    fn test_requires_viewer() {
        let result = PostController::new(owned_post(), &Session::new("tok", None));
        assert!(matches!(result, Err(SessionError::NotLoggedIn)));
    }

    #[test]
    fn test_empty_comment_is_ignored() {
        let mut controller = PostController::new(owned_post(), &session("a@x.no")).unwrap();
        for text in ["", "   ", "\n\t"] {
            let update = controller.update(Msg::SubmitComment(text.to_string()));
            assert!(update.patches.is_empty());
            assert!(update.effect.is_none());
        }
    }

    #[test]
    fn test_comment_success_appends_and_clears() {
        let mut controller = PostController::new(owned_post(), &session("b@x.no")).unwrap();
        let update = controller.update(Msg::SubmitComment("hello".to_string()));
        assert!(matches!(
            update.effect,
            Some(Effect::AddComment { post_id: 1, ref body }) if body == "hello"
        ));

        let comment: Comment =
            serde_json::from_str(r#"{"body": "hello", "author": {"name": "Bo"}}"#).unwrap();
        let update = controller.update(Msg::CommentAdded(Ok(comment)));
        assert_eq!(update.patches.len(), 2);
        match &update.patches[0] {
            Patch::AppendComment(markup) => assert!(markup.contains("hello - ")),
            other => panic!("unexpected patch {other:?}"),
        }
        assert_eq!(update.patches[1], Patch::ClearCommentInput);
        assert_eq!(controller.post().comments.len(), 1);
    }

    #[test]
    fn test_comment_failure_leaves_input() {
        let mut controller = PostController::new(owned_post(), &session("b@x.no")).unwrap();
        let update = controller.update(Msg::CommentAdded(Err(status_error())));
        assert!(update.patches.is_empty());
        assert!(controller.post().comments.is_empty());
    }

    #[test]
    fn test_reaction_appends_then_overwrites() {
        let mut controller = PostController::new(owned_post(), &session("a@x.no")).unwrap();

        controller.update(Msg::Reacted {
            symbol: ReactionSymbol::Heart,
            result: Ok(reaction("❤️", 1)),
        });
        assert_eq!(controller.reactions(), &[reaction("❤️", 1)]);

        let update = controller.update(Msg::Reacted {
            symbol: ReactionSymbol::Heart,
            result: Ok(reaction("❤️", 5)),
        });
        assert_eq!(controller.reactions(), &[reaction("❤️", 5)]);
        match &update.patches[..] {
            [Patch::ReplaceReactions(markup)] => assert!(markup.contains(">5❤️<")),
            other => panic!("unexpected patches {other:?}"),
        }
    }

    #[test]
    fn test_reaction_patch_compares_by_html() {
        let mut controller = PostController::new(owned_post(), &session("a@x.no")).unwrap();
        let update = controller.update(Msg::Reacted {
            symbol: ReactionSymbol::Astonished,
            result: Ok(reaction("😲", 2)),
        });
        let expected = render::render_reactions(&[reaction("😲", 2)]).into_string();
        assert_eq!(update.patches, vec![Patch::ReplaceReactions(expected)]);
    }

    #[test]
    fn test_reaction_failure_keeps_state() {
        let mut p = owned_post();
        p.reactions.push(reaction("👍", 2));
        let mut controller = PostController::new(p, &session("a@x.no")).unwrap();

        let update = controller.update(Msg::Reacted {
            symbol: ReactionSymbol::ThumbsUp,
            result: Err(status_error()),
        });
        assert_eq!(update.patches, vec![Patch::Alert(REACT_FAILED.to_string())]);
        assert_eq!(controller.reactions(), &[reaction("👍", 2)]);
    }

    #[test]
    fn test_out_of_order_reaction_results_last_write_wins() {
        let mut controller = PostController::new(owned_post(), &session("a@x.no")).unwrap();
        controller.update(Msg::Reacted {
            symbol: ReactionSymbol::Smile,
            result: Ok(reaction("😀", 3)),
        });
        controller.update(Msg::Reacted {
            symbol: ReactionSymbol::Smile,
            result: Ok(reaction("😀", 2)),
        });
        assert_eq!(controller.reactions(), &[reaction("😀", 2)]);
    }

    #[test]
    fn test_delete_requires_owner() {
        let mut controller = PostController::new(owned_post(), &session("b@x.no")).unwrap();
        let update = controller.update(Msg::Delete);
        assert!(update.effect.is_none());
        let update = controller.update(Msg::OpenEdit);
        assert!(update.patches.is_empty());
    }

    #[test]
    fn test_delete_success_removes_post() {
        let mut controller = PostController::new(owned_post(), &session("a@x.no")).unwrap();
        assert!(matches!(
            controller.update(Msg::Delete).effect,
            Some(Effect::Delete { post_id: 1 })
        ));
        let update = controller.update(Msg::Deleted(Ok(())));
        assert_eq!(update.patches.last(), Some(&Patch::RemovePost));
        assert!(controller.is_removed());

        // Nothing applies once the post is gone.
        let update = controller.update(Msg::React(ReactionSymbol::ThumbsUp));
        assert!(update.effect.is_none());
    }

    #[test]
    fn test_delete_failure_keeps_post() {
        let mut controller = PostController::new(owned_post(), &session("a@x.no")).unwrap();
        let update = controller.update(Msg::Deleted(Err(status_error())));
        assert_eq!(update.patches, vec![Patch::Alert(DELETE_FAILED.to_string())]);
        assert!(!controller.is_removed());
    }

    #[test]
    fn test_edit_flow() {
        let mut controller = PostController::new(owned_post(), &session("a@x.no")).unwrap();

        let update = controller.update(Msg::OpenEdit);
        match &update.patches[..] {
            [Patch::ShowEditForm(markup)] => {
                assert!(markup.contains("value=\"T\""));
                assert!(markup.contains(">B</textarea>"));
            }
            other => panic!("unexpected patches {other:?}"),
        }
        assert!(controller.is_editing());

        let update = controller.update(Msg::SubmitEdit {
            title: "T2".to_string(),
            body: "B2".to_string(),
        });
        assert!(matches!(update.effect, Some(Effect::Update { post_id: 1, .. })));

        let update = controller.update(Msg::Updated {
            title: "T2".to_string(),
            body: "B2".to_string(),
            result: Ok(owned_post()),
        });
        assert!(update.patches.contains(&Patch::SetTitle("T2".to_string())));
        assert!(update.patches.contains(&Patch::SetBody("B2".to_string())));
        assert_eq!(update.patches.last(), Some(&Patch::CloseEditForm));
        assert!(!controller.is_editing());
        assert_eq!(controller.post().title, "T2");
    }

    #[test]
    fn test_edit_failure_keeps_form_open() {
        let mut controller = PostController::new(owned_post(), &session("a@x.no")).unwrap();
        controller.update(Msg::OpenEdit);
        let update = controller.update(Msg::Updated {
            title: "T2".to_string(),
            body: "B2".to_string(),
            result: Err(status_error()),
        });
        assert_eq!(update.patches, vec![Patch::Alert(UPDATE_FAILED.to_string())]);
        assert!(controller.is_editing());
        assert_eq!(controller.post().title, "T");
    }
}
