//! Button component for post views.
//!
//! Renders a `<button>` carrying the data attributes the host UI uses to
//! route clicks back to a post controller.

use maud::{html, Markup, Render};

/// Button style variants matching Bootstrap classes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    /// Primary button (default) - `.btn-primary`
    #[default]
    Primary,
    /// Danger button - `.btn-danger`
    Danger,
    /// Warning button - `.btn-warning`
    Warning,
    /// Light, small button used for reactions
    Light,
}

impl ButtonVariant {
    /// Returns the CSS class(es) for this variant.
    #[must_use]
    pub fn class(&self) -> &'static str {
        match self {
            Self::Primary => "btn btn-primary",
            Self::Danger => "btn btn-danger",
            Self::Warning => "btn btn-warning",
            Self::Light => "btn btn-light btn-sm",
        }
    }
}

/// A configurable button component.
///
/// # Example
///
/// ```ignore
/// use crate::components::button::Button;
///
/// let delete = Button::danger("Delete").class("delete-post mr-2").post_id(42);
/// let react = Button::light("👍").class("give-reaction mr-1").symbol("👍");
/// ```
#[derive(Debug, Clone)]
pub struct Button<'a> {
    /// Button label text
    pub label: &'a str,
    /// Button style variant
    pub variant: ButtonVariant,
    /// Button type attribute
    pub r#type: Option<&'a str>,
    /// Additional CSS classes
    pub class: Option<&'a str>,
    /// `data-post-id` attribute
    pub post_id: Option<u64>,
    /// `data-symbol` attribute
    pub symbol: Option<&'a str>,
}

impl<'a> Button<'a> {
    /// Creates a new button with the given label and variant.
    #[must_use]
    pub fn new(label: &'a str, variant: ButtonVariant) -> Self {
        Self {
            label,
            variant,
            r#type: None,
            class: None,
            post_id: None,
            symbol: None,
        }
    }

    /// Creates a primary button.
    #[must_use]
    pub fn primary(label: &'a str) -> Self {
        Self::new(label, ButtonVariant::Primary)
    }

    /// Creates a danger button.
    #[must_use]
    pub fn danger(label: &'a str) -> Self {
        Self::new(label, ButtonVariant::Danger)
    }

    /// Creates a warning button.
    #[must_use]
    pub fn warning(label: &'a str) -> Self {
        Self::new(label, ButtonVariant::Warning)
    }

    /// Creates a light button.
    #[must_use]
    pub fn light(label: &'a str) -> Self {
        Self::new(label, ButtonVariant::Light)
    }

    /// Sets the button type attribute.
    #[must_use]
    pub fn r#type(mut self, r#type: &'a str) -> Self {
        self.r#type = Some(r#type);
        self
    }

    /// Adds additional CSS classes.
    #[must_use]
    pub fn class(mut self, class: &'a str) -> Self {
        self.class = Some(class);
        self
    }

    /// Sets the `data-post-id` attribute.
    #[must_use]
    pub fn post_id(mut self, post_id: u64) -> Self {
        self.post_id = Some(post_id);
        self
    }

    /// Sets the `data-symbol` attribute.
    #[must_use]
    pub fn symbol(mut self, symbol: &'a str) -> Self {
        self.symbol = Some(symbol);
        self
    }

    /// Builds the full CSS class string.
    fn build_class(&self) -> String {
        let mut classes = self.variant.class().to_string();
        if let Some(extra) = self.class {
            classes.push(' ');
            classes.push_str(extra);
        }
        classes
    }
}

impl Render for Button<'_> {
    fn render(&self) -> Markup {
        let classes = self.build_class();

        html! {
            button
                class=(classes)
                type=(self.r#type.unwrap_or("button"))
                data-post-id=[self.post_id]
                data-symbol=[self.symbol]
            {
                (self.label)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_button() {
        let html = Button::primary("Add Comment").render().into_string();
        assert!(html.contains("btn btn-primary"));
        assert!(html.contains("Add Comment"));
        assert!(html.contains("type=\"button\""));
    }

    #[test]
    fn test_submit_type() {
        let html = Button::primary("Submit").r#type("submit").render().into_string();
        assert!(html.contains("type=\"submit\""));
    }

    #[test]
    fn test_danger_button_with_post_id() {
        let html = Button::danger("Delete")
            .class("delete-post")
            .post_id(42)
            .render()
            .into_string();
        assert!(html.contains("btn btn-danger delete-post"));
        assert!(html.contains("data-post-id=\"42\""));
        assert!(!html.contains("data-symbol"));
    }

    #[test]
    fn test_light_button_with_symbol() {
        let html = Button::light("😀").symbol("😀").render().into_string();
        assert!(html.contains("btn-light btn-sm"));
        assert!(html.contains("data-symbol=\"😀\""));
    }
}
