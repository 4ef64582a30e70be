//! News preferences: headline category, search query, saved articles.

use super::UniqueList;

/// Category shown when nothing else was chosen.
pub const DEFAULT_CATEGORY: &str = "technology";

/// Categories offered by the news widget, in tab order.
pub const CATEGORIES: [&str; 5] = ["technology", "business", "sports", "health", "entertainment"];

/// News slice state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsPreferences {
    /// Active headline category.
    pub category: String,
    /// Free-text search. Empty means "show top headlines".
    pub search_query: String,
    /// Ids of articles the user saved, oldest first.
    pub saved_articles: UniqueList<String>,
}

impl Default for NewsPreferences {
    fn default() -> Self {
        Self {
            category: DEFAULT_CATEGORY.to_string(),
            search_query: String::new(),
            saved_articles: UniqueList::new(),
        }
    }
}

/// Actions accepted by [`reduce`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewsAction {
    /// Switch the headline category.
    SetCategory(String),
    /// Replace the search query.
    SetSearchQuery(String),
    /// Save an article by id (no-op if already saved).
    SaveArticle(String),
    /// Forget a saved article (no-op if absent).
    UnsaveArticle(String),
}

/// Applies `action` to `state`, returning the next state.
pub fn reduce(state: &NewsPreferences, action: NewsAction) -> NewsPreferences {
    let mut next = state.clone();
    match action {
        NewsAction::SetCategory(category) => next.category = category,
        NewsAction::SetSearchQuery(query) => next.search_query = query,
        NewsAction::SaveArticle(id) => {
            next.saved_articles.insert(id);
        }
        NewsAction::UnsaveArticle(id) => {
            next.saved_articles.remove(&id);
        }
    }
    next
}

/// Returns the category after `current` in [`CATEGORIES`], wrapping around.
///
/// Unknown categories restart the cycle at the first entry.
pub fn next_category(current: &str) -> &'static str {
    let idx = CATEGORIES
        .iter()
        .position(|c| c.eq_ignore_ascii_case(current))
        .map_or(0, |i| (i + 1) % CATEGORIES.len());
    CATEGORIES[idx]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_category_is_technology() {
        assert_eq!(NewsPreferences::default().category, "technology");
    }

    #[test]
    fn test_set_category_and_query() {
        let state = reduce(
            &NewsPreferences::default(),
            NewsAction::SetCategory("sports".to_string()),
        );
        let state = reduce(&state, NewsAction::SetSearchQuery("finals".to_string()));
        assert_eq!(state.category, "sports");
        assert_eq!(state.search_query, "finals");
    }

    #[test]
    fn test_save_article_twice_keeps_one() {
        let mut state = NewsPreferences::default();
        state = reduce(&state, NewsAction::SaveArticle("3".to_string()));
        state = reduce(&state, NewsAction::SaveArticle("3".to_string()));
        assert_eq!(state.saved_articles.as_slice(), &["3"]);
    }

    #[test]
    fn test_unsave_article() {
        let mut state = NewsPreferences::default();
        state = reduce(&state, NewsAction::SaveArticle("1".to_string()));
        state = reduce(&state, NewsAction::SaveArticle("2".to_string()));
        state = reduce(&state, NewsAction::UnsaveArticle("1".to_string()));
        assert_eq!(state.saved_articles.as_slice(), &["2"]);
    }

    #[test]
    fn test_next_category_wraps() {
        assert_eq!(next_category("technology"), "business");
        assert_eq!(next_category("entertainment"), "technology");
        assert_eq!(next_category("Sports"), "health");
        assert_eq!(next_category("unknown"), "technology");
    }
}
