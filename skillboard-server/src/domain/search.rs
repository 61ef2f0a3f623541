use super::post::Post;

/// Upper bound on suggestion results.
pub(crate) const SUGGEST_LIMIT: usize = 10;

/// Case-insensitive substring predicates over posts.
///
/// Each variant names the fields it looks at; matching is OR across those fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PostFilter {
    /// `title`, `description`, `category`.
    Search(String),
    /// `title`, `category`.
    Suggest(String),
    /// `category` only.
    Category(String),
}

impl PostFilter {
    pub(crate) fn needle(&self) -> &str {
        match self {
            Self::Search(q) | Self::Suggest(q) | Self::Category(q) => q,
        }
    }

    pub(crate) fn matches(&self, post: &Post) -> bool {
        let needle = self.needle().to_lowercase();
        let hit = |haystack: &str| haystack.to_lowercase().contains(&needle);

        match self {
            Self::Search(_) => {
                hit(&post.title) || hit(&post.description) || hit(post.category.as_str())
            }
            Self::Suggest(_) => hit(&post.title) || hit(post.category.as_str()),
            Self::Category(_) => hit(post.category.as_str()),
        }
    }
}

/// Escapes `%`, `_` and `\` so user text is matched literally by `LIKE`/`ILIKE ... ESCAPE '\'`.
pub(crate) fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
