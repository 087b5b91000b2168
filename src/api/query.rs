//! Query-string construction for post listing and lookup.

/// Options for listing or fetching posts.
///
/// Each field maps to one query parameter. `None` leaves the parameter out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostQuery {
    pub include_author: Option<bool>,
    pub include_comments: Option<bool>,
    pub include_reactions: Option<bool>,
    pub tag: Option<String>,
    pub active: Option<bool>,
}

impl PostQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Author, comments and reactions all included.
    #[must_use]
    pub fn full() -> Self {
        Self::new().author(true).comments(true).reactions(true)
    }

    #[must_use]
    pub fn author(mut self, include: bool) -> Self {
        self.include_author = Some(include);
        self
    }

    #[must_use]
    pub fn comments(mut self, include: bool) -> Self {
        self.include_comments = Some(include);
        self
    }

    #[must_use]
    pub fn reactions(mut self, include: bool) -> Self {
        self.include_reactions = Some(include);
        self
    }

    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    #[must_use]
    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    /// Parameters for the list endpoint.
    ///
    /// Set booleans are sent as `"true"` or `"false"`.
    #[must_use]
    pub fn list_params(&self) -> Vec<(&'static str, String)> {
        let flags = [
            ("_author", self.include_author),
            ("_comments", self.include_comments),
            ("_reactions", self.include_reactions),
        ];

        let mut params: Vec<(&'static str, String)> = flags
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key, v.to_string())))
            .collect();

        if let Some(tag) = &self.tag {
            params.push(("_tag", tag.clone()));
        }
        if let Some(active) = self.active {
            params.push(("_active", active.to_string()));
        }
        params
    }

    /// Parameters for the single-post endpoint.
    ///
    /// Only include flags that are set to `true` are sent.
    #[must_use]
    pub fn single_post_params(&self) -> Vec<(&'static str, String)> {
        [
            ("_author", self.include_author),
            ("_comments", self.include_comments),
            ("_reactions", self.include_reactions),
        ]
        .into_iter()
        .filter(|(_, value)| *value == Some(true))
        .map(|(key, _)| (key, "true".to_string()))
        .collect()
    }
}

/// Join a base URL, an endpoint and percent-encoded query parameters.
#[must_use]
pub fn build_url(base: &str, endpoint: &str, params: &[(&str, String)]) -> String {
    let base = base.trim_end_matches('/');
    let endpoint = endpoint.trim_start_matches('/');

    if params.is_empty() {
        return format!("{base}/{endpoint}");
    }

    let query = params
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&");

    format!("{base}/{endpoint}?{query}")
}
