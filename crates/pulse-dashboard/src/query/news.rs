//! Headline and article search queries, plus the demo news source.

use super::{DataSource, QueryError};
use async_trait::async_trait;
use std::time::Duration;

/// Articles per page unless the request says otherwise.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Parameters of a news query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NewsRequest {
    /// Top headlines in a category.
    TopHeadlines {
        /// Category name, matched case-insensitively.
        category: String,
        /// Articles per page.
        page_size: u32,
        /// One-based page number.
        page: u32,
    },
    /// Free-text search over all categories.
    Search {
        /// Search terms.
        query: String,
        /// Articles per page.
        page_size: u32,
        /// One-based page number.
        page: u32,
    },
}

impl NewsRequest {
    /// First page of headlines for `category`.
    pub fn top_headlines(category: impl Into<String>) -> Self {
        NewsRequest::TopHeadlines {
            category: category.into(),
            page_size: DEFAULT_PAGE_SIZE,
            page: 1,
        }
    }

    /// First page of results for `query`.
    pub fn search(query: impl Into<String>) -> Self {
        NewsRequest::Search {
            query: query.into(),
            page_size: DEFAULT_PAGE_SIZE,
            page: 1,
        }
    }

    fn paging(&self) -> (u32, u32) {
        match self {
            NewsRequest::TopHeadlines {
                page_size, page, ..
            }
            | NewsRequest::Search {
                page_size, page, ..
            } => (*page_size, *page),
        }
    }
}

/// A news article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    /// Stable article id.
    pub id: String,
    /// Headline.
    pub title: String,
    /// Publisher name.
    pub source: String,
    /// One-sentence summary.
    pub summary: String,
    /// Link to the full story.
    pub url: String,
    /// Category the article was filed under.
    pub category: String,
}

/// One page of articles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsPage {
    /// Matches across all pages.
    pub total_results: usize,
    /// Articles on this page.
    pub articles: Vec<Article>,
}

// (id, category, title, source, summary)
const ARTICLES: [(&str, &str, &str, &str, &str); 7] = [
    (
        "1",
        "technology",
        "New AI breakthrough changes how machines learn",
        "Tech Daily",
        "Researchers have developed a new approach to machine learning that could revolutionize AI applications.",
    ),
    (
        "2",
        "technology",
        "Tech giants announce collaboration on open-source project",
        "Silicon Valley News",
        "Major technology companies are joining forces to develop a new open-source framework.",
    ),
    (
        "3",
        "business",
        "Global markets react to new economic policies",
        "Financial Times",
        "Stock markets worldwide showed mixed reactions to the newly announced economic policies.",
    ),
    (
        "4",
        "business",
        "Startup raises $50M in Series B funding",
        "Venture Beat",
        "The fintech startup plans to use the funding to expand into new markets and develop new products.",
    ),
    (
        "5",
        "sports",
        "Championship finals set after thrilling semifinals",
        "Sports Network",
        "The stage is set for an exciting championship final after both semifinals went into overtime.",
    ),
    (
        "6",
        "health",
        "New study reveals benefits of intermittent fasting",
        "Health Journal",
        "Researchers found significant health improvements in participants who practiced intermittent fasting.",
    ),
    (
        "7",
        "entertainment",
        "Award-winning director announces new project",
        "Entertainment Weekly",
        "The acclaimed director is teaming up with A-list actors for an anticipated new film.",
    ),
];

fn article(row: &(&str, &str, &str, &str, &str)) -> Article {
    let (id, category, title, source, summary) = *row;
    Article {
        id: id.to_string(),
        title: title.to_string(),
        source: source.to_string(),
        summary: summary.to_string(),
        url: format!("https://news.example.com/articles/{}", id),
        category: category.to_string(),
    }
}

/// Demo source serving a fixed set of articles.
#[derive(Debug, Clone)]
pub struct MockNewsSource {
    latency: Duration,
}

impl Default for MockNewsSource {
    fn default() -> Self {
        Self::with_latency(Duration::from_millis(1800))
    }
}

impl MockNewsSource {
    /// Source that answers after `latency`.
    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }

    /// Builds the page without waiting.
    pub fn page(request: &NewsRequest) -> NewsPage {
        let matches: Vec<Article> = match request {
            NewsRequest::TopHeadlines { category, .. } => ARTICLES
                .iter()
                .filter(|row| row.1.eq_ignore_ascii_case(category))
                .map(article)
                .collect(),
            NewsRequest::Search { query, .. } => {
                let needle = query.trim().to_lowercase();
                ARTICLES
                    .iter()
                    .filter(|row| {
                        !needle.is_empty()
                            && (row.2.to_lowercase().contains(&needle)
                                || row.4.to_lowercase().contains(&needle))
                    })
                    .map(article)
                    .collect()
            }
        };

        let (page_size, page) = request.paging();
        let skip = page.saturating_sub(1).saturating_mul(page_size) as usize;
        NewsPage {
            total_results: matches.len(),
            articles: matches
                .into_iter()
                .skip(skip)
                .take(page_size as usize)
                .collect(),
        }
    }
}

#[async_trait]
impl DataSource<NewsRequest, NewsPage> for MockNewsSource {
    async fn fetch(&self, params: NewsRequest) -> Result<NewsPage, QueryError> {
        tokio::time::sleep(self.latency).await;
        Ok(Self::page(&params))
    }
}
