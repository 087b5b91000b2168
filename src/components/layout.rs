//! Base layout for standalone pages.
//!
//! Provides the HTML skeleton and navigation bar wrapped around feed and
//! single-post views.

use maud::{html, Markup, DOCTYPE};

const BOOTSTRAP_CSS: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.2/dist/css/bootstrap.min.css";

/// Base page layout builder.
///
/// # Example
///
/// ```ignore
/// use maud::html;
/// use crate::components::layout::BaseLayout;
///
/// let content = html! { h1 { "Hello World" } };
/// let page = BaseLayout::new("Feed").render(content);
/// ```
#[derive(Debug, Clone)]
pub struct BaseLayout<'a> {
    title: &'a str,
    viewer: Option<&'a str>,
}

impl<'a> BaseLayout<'a> {
    /// Create a new base layout with the given page title.
    #[must_use]
    pub fn new(title: &'a str) -> Self {
        Self {
            title,
            viewer: None,
        }
    }

    /// Show the signed-in viewer in the navigation bar.
    #[must_use]
    pub fn with_viewer(mut self, viewer: Option<&'a str>) -> Self {
        self.viewer = viewer;
        self
    }

    /// Render the complete HTML page with the given content.
    ///
    /// The content is placed inside `<main class="container">`.
    #[must_use]
    pub fn render(self, content: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="UTF-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    title { (self.title) " - UserNest" }
                    link rel="stylesheet" href=(BOOTSTRAP_CSS);
                }
                body {
                    (self.render_nav())
                    main class="container mt-4" {
                        (content)
                    }
                }
            }
        }
    }

    fn render_nav(&self) -> Markup {
        html! {
            nav class="navbar navbar-expand-lg navbar-light bg-light" {
                div class="container-fluid" {
                    a class="navbar-brand" href="../pages/feed.html" { "UserNest" }
                    ul class="navbar-nav me-auto mb-2 mb-lg-0" {
                        li class="nav-item" {
                            a class="nav-link active" aria-current="page" href="../pages/feed.html" { "Feed" }
                        }
                    }
                    @if let Some(viewer) = self.viewer {
                        span class="navbar-text" { (viewer) }
                    } @else {
                        a class="nav-link" href="../pages/login.html" { "Log in" }
                    }
                }
            }
        }
    }
}
