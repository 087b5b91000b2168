use tracing::debug;

use super::Msg;
use crate::api::{PostsApi, ReactionSymbol, UpdatePost};

/// An API call requested by a post controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    AddComment { post_id: u64, body: String },
    React { post_id: u64, symbol: ReactionSymbol },
    Delete { post_id: u64 },
    Update { post_id: u64, title: String, body: String },
}

impl Effect {
    /// Perform the call and wrap its outcome as the follow-up message.
    pub async fn run(self, api: &dyn PostsApi) -> Msg {
        debug!(effect = ?self, "Running effect");
        match self {
            Self::AddComment { post_id, body } => {
                Msg::CommentAdded(api.add_comment(post_id, &body).await)
            }
            Self::React { post_id, symbol } => Msg::Reacted {
                symbol,
                result: api.react(post_id, symbol).await,
            },
            Self::Delete { post_id } => Msg::Deleted(api.delete_post(post_id).await),
            Self::Update {
                post_id,
                title,
                body,
            } => {
                let update = UpdatePost { title, body };
                let result = api.update_post(post_id, &update).await;
                Msg::Updated {
                    title: update.title,
                    body: update.body,
                    result,
                }
            }
        }
    }
}
