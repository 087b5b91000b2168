//! Maud HTML components shared by post and feed views.
//!
//! - `layout`: Base page layout and navigation
//! - `badge`: Tag and reaction count badges
//! - `button`: Buttons carrying post/symbol data attributes
//! - `alert`: Alert messages
//! - `card`: Feed summary cards
//! - `form`: Form elements and input components

pub mod alert;
pub mod badge;
pub mod button;
pub mod card;
pub mod form;
pub mod layout;

pub use layout::BaseLayout;

pub use badge::{CountBadge, TagBadge, TagList};

pub use button::{Button, ButtonVariant};

pub use alert::{Alert, AlertVariant};

pub use card::{FeedCard, FeedGrid};

pub use form::{Form, FormGroup, Input, TextArea};

/// Re-export maud for convenience
pub use maud::{html, Markup, PreEscaped, Render};
