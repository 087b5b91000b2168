//! UserNest social client library.
//!
//! A typed client for the social posts API, HTML rendering of posts and the
//! feed, and an update loop that turns user interactions on a rendered post
//! into API calls and UI patches.

// Allow raw string hashes for safety - they're harmless and prevent issues if content changes
#![allow(clippy::needless_raw_string_hashes)]

pub mod api;
pub mod auth;
pub mod binder;
pub mod components;
pub mod config;
pub mod constants;
pub mod feed;
pub mod render;
pub mod session;
