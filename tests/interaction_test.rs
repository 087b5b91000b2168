//! Integration tests for post interactions driven through `dispatch`.

use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::json;
use usernest::api::{
    ApiClient, ApiError, Comment, Post, PostsApi, Reaction, ReactionSymbol, UpdatePost,
};
use usernest::binder::{Msg, Patch, PostController};
use usernest::config::Config;
use usernest::session::Session;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Records every call and answers from canned values.
#[derive(Default)]
struct FakeApi {
    calls: Mutex<Vec<String>>,
    fail: bool,
    reaction_count: u64,
}

impl FakeApi {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call);
        if self.fail {
            return Err(ApiError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "boom".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl PostsApi for FakeApi {
    async fn add_comment(&self, post_id: u64, body: &str) -> Result<Comment, ApiError> {
        self.record(format!("comment {post_id} {body}"))?;
        Ok(serde_json::from_value(json!({"body": body, "author": {"name": "Me"}})).unwrap())
    }

    async fn react(&self, post_id: u64, symbol: ReactionSymbol) -> Result<Reaction, ApiError> {
        self.record(format!("react {post_id} {symbol}"))?;
        Ok(Reaction {
            symbol: symbol.as_str().to_string(),
            count: self.reaction_count,
            post_id: Some(post_id),
        })
    }

    async fn delete_post(&self, post_id: u64) -> Result<(), ApiError> {
        self.record(format!("delete {post_id}"))
    }

    async fn update_post(&self, post_id: u64, update: &UpdatePost) -> Result<Post, ApiError> {
        self.record(format!("update {post_id} {}", update.title))?;
        Ok(serde_json::from_value(json!({"id": post_id, "title": update.title})).unwrap())
    }
}

fn owned_post() -> Post {
    serde_json::from_value(json!({
        "id": 1,
        "title": "T",
        "body": "B",
        "tags": ["x"],
        "author": {"name": "A", "email": "a@x.no"}
    }))
    .unwrap()
}

fn controller(viewer: &str) -> PostController {
    PostController::new(owned_post(), &Session::new("tok", Some(viewer.to_string()))).unwrap()
}

#[tokio::test]
async fn test_empty_comment_makes_no_call() {
    let api = FakeApi::default();
    let mut c = controller("b@x.no");
    let patches = c.dispatch(&api, Msg::SubmitComment("   ".to_string())).await;
    assert!(patches.is_empty());
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_comment_round_trip() {
    let api = FakeApi::default();
    let mut c = controller("b@x.no");
    let patches = c.dispatch(&api, Msg::SubmitComment("Nice post".to_string())).await;

    assert_eq!(api.calls(), vec!["comment 1 Nice post"]);
    assert_eq!(patches.len(), 2);
    assert!(matches!(&patches[0], Patch::AppendComment(m) if m.contains("Nice post - ")));
    assert_eq!(patches[1], Patch::ClearCommentInput);
    assert!(c.render().0.contains("Nice post"));
}

#[tokio::test]
async fn test_reaction_failure_alerts() {
    let api = FakeApi::failing();
    let mut c = controller("b@x.no");
    let patches = c.dispatch(&api, Msg::React(ReactionSymbol::ThumbsDown)).await;
    assert_eq!(
        patches,
        vec![Patch::Alert("Error reacting to the post. Please try again.".to_string())]
    );
    assert!(c.reactions().is_empty());
}

#[tokio::test]
async fn test_non_owner_delete_makes_no_call() {
    let api = FakeApi::default();
    let mut c = controller("b@x.no");
    assert!(c.dispatch(&api, Msg::Delete).await.is_empty());
    assert!(c.dispatch(&api, Msg::OpenEdit).await.is_empty());
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_update_round_trip() {
    let api = FakeApi::default();
    let mut c = controller("a@x.no");

    let patches = c.dispatch(&api, Msg::OpenEdit).await;
    assert!(matches!(&patches[..], [Patch::ShowEditForm(_)]));
    // A second click does not open another form.
    assert!(c.dispatch(&api, Msg::OpenEdit).await.is_empty());

    let patches = c
        .dispatch(
            &api,
            Msg::SubmitEdit {
                title: "New".to_string(),
                body: "Text".to_string(),
            },
        )
        .await;
    assert_eq!(api.calls(), vec!["update 1 New"]);
    assert_eq!(
        patches,
        vec![
            Patch::Notice("Post updated successfully!".to_string()),
            Patch::SetTitle("New".to_string()),
            Patch::SetBody("Text".to_string()),
            Patch::CloseEditForm,
        ]
    );
    assert_eq!(c.post().body.as_deref(), Some("Text"));
}

#[tokio::test]
async fn test_delete_failure_keeps_post() {
    let api = FakeApi::failing();
    let mut c = controller("a@x.no");
    let patches = c.dispatch(&api, Msg::Delete).await;
    assert_eq!(
        patches,
        vec![Patch::Alert("Error deleting the post. Please try again.".to_string())]
    );
    assert!(!c.is_removed());
}

#[tokio::test]
async fn test_react_and_delete_against_http() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/social/posts/1/react/%F0%9F%91%8D"))
        .and(body_json(json!({"reaction": "👍"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "postId": 1,
            "symbol": "👍",
            "count": 3
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/social/posts/1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let session = Session::new("tok", Some("a@x.no".to_string()));
    let api = ApiClient::new(&Config::for_testing(&server.uri()))
        .unwrap()
        .with_session(session.clone());
    let mut c = PostController::new(owned_post(), &session).unwrap();

    let patches = c.dispatch(&api, Msg::React(ReactionSymbol::ThumbsUp)).await;
    match &patches[..] {
        [Patch::ReplaceReactions(markup)] => {
            assert!(markup.contains(">3👍<"));
            assert!(markup.contains(">0❤️<"));
        }
        other => panic!("unexpected patches {other:?}"),
    }

    let patches = c.dispatch(&api, Msg::Delete).await;
    assert_eq!(
        patches,
        vec![
            Patch::Notice("Post deleted successfully!".to_string()),
            Patch::RemovePost,
        ]
    );
    assert!(c.is_removed());
}
