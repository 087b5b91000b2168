//! Badge components for tags and reaction tallies.

use maud::{html, Markup, Render};

/// A tag badge.
#[derive(Debug, Clone, Copy)]
pub struct TagBadge<'a> {
    pub tag: &'a str,
}

impl<'a> TagBadge<'a> {
    #[must_use]
    pub const fn new(tag: &'a str) -> Self {
        Self { tag }
    }
}

impl Render for TagBadge<'_> {
    fn render(&self) -> Markup {
        html! {
            span class="badge bg-primary" { (self.tag) }
        }
    }
}

/// The list of tag badges for one post, in the given order.
#[derive(Debug, Clone, Copy)]
pub struct TagList<'a> {
    pub tags: &'a [String],
    pub class: &'a str,
}

impl<'a> TagList<'a> {
    #[must_use]
    pub const fn new(tags: &'a [String]) -> Self {
        Self {
            tags,
            class: "post-tags mt-3",
        }
    }

    /// Override the container class.
    #[must_use]
    pub const fn class(mut self, class: &'a str) -> Self {
        self.class = class;
        self
    }
}

impl Render for TagList<'_> {
    fn render(&self) -> Markup {
        html! {
            ul class=(self.class) {
                @for tag in self.tags {
                    li { (TagBadge::new(tag)) }
                }
            }
        }
    }
}

/// A count next to a reaction symbol, e.g. `3❤️`.
#[derive(Debug, Clone, Copy)]
pub struct CountBadge<'a> {
    pub count: u64,
    pub symbol: &'a str,
}

impl<'a> CountBadge<'a> {
    #[must_use]
    pub const fn new(count: u64, symbol: &'a str) -> Self {
        Self { count, symbol }
    }
}

impl Render for CountBadge<'_> {
    fn render(&self) -> Markup {
        html! {
            span class="reaction mr-2" data-symbol=(self.symbol) data-count=(self.count) {
                (self.count) (self.symbol)
            }
        }
    }
}
