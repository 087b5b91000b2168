//! Shared constants used across the application.

/// Default base URL of the social API (no trailing slash).
pub const DEFAULT_API_BASE_URL: &str = "https://api.noroff.dev/api/v1";

/// Email domains accepted at registration.
pub const ALLOWED_EMAIL_DOMAINS: &[&str] = &["noroff.no", "stud.noroff.no"];

/// Placeholder shown when a post has no author name.
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Placeholder shown when a comment has no author name.
pub const UNKNOWN_COMMENTER: &str = "Unknown";

/// Link target for feed cards; the post id is appended as `?id=`.
pub const VIEW_POST_PATH: &str = "../pages/viewPost.html";
