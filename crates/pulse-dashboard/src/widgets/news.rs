//! News widget: one headline per row for the selected category.
//!
//! A non-empty search query takes precedence over the category. Saved
//! articles are marked with `*`.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use super::{pending_line, put_line, Widget, WidgetContext, WidgetKind};
use crate::query::{NewsPage, NewsRequest};
use crate::store::RootState;

/// Headline or search query for the current news preferences.
pub fn request(state: &RootState) -> NewsRequest {
    let query = state.news.search_query.trim();
    if query.is_empty() {
        NewsRequest::top_headlines(state.news.category.clone())
    } else {
        NewsRequest::search(query)
    }
}

/// Widget listing headlines.
pub struct NewsWidget;

/// Factory registered for [`WidgetKind::News`].
pub fn create() -> Box<dyn Widget> {
    Box::new(NewsWidget)
}

impl Widget for NewsWidget {
    fn render(&self, area: Rect, buf: &mut Buffer, context: &WidgetContext) {
        let params = request(context.state);
        let heading = match &params {
            NewsRequest::TopHeadlines { category, .. } => format!("Category: {category}"),
            NewsRequest::Search { query, .. } => format!("Search: {query}"),
        };
        put_line(
            buf,
            area,
            0,
            &Line::styled(heading, Style::default().fg(Color::DarkGray)),
        );

        let result = context.state.news_api.read(&params);
        if let Some(line) = pending_line(&result, "headlines") {
            put_line(buf, area, 1, &line);
            return;
        }
        if let Some(page) = result.data() {
            for (y, line) in page_lines(page, context).iter().enumerate() {
                put_line(buf, area, y as u16 + 1, line);
            }
        }
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::News
    }

    fn min_height(&self) -> u16 {
        3
    }
}

fn page_lines(page: &NewsPage, context: &WidgetContext) -> Vec<Line<'static>> {
    if page.articles.is_empty() {
        return vec![Line::styled(
            "No articles",
            Style::default().fg(Color::DarkGray),
        )];
    }
    page.articles
        .iter()
        .map(|article| {
            let marker = if context.is_saved_article(&article.id) {
                Span::styled("* ", Style::default().fg(Color::Yellow))
            } else {
                Span::raw("  ")
            };
            Line::from(vec![
                marker,
                Span::raw(article.title.clone()),
                Span::styled(
                    format!("  {}", article.source),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::FeedState;
    use crate::query::{CacheAction, MockNewsSource};
    use crate::slices::NewsAction;
    use crate::store::{reduce, Action};
    use crate::tui::test_utils::{find_row_with_text, row_text};

    fn render(state: &RootState) -> Buffer {
        let feed = FeedState::default();
        let ctx = WidgetContext::new(state, &feed);
        let area = Rect::new(0, 0, 90, 6);
        let mut buf = Buffer::empty(area);
        NewsWidget.render(area, &mut buf, &ctx);
        buf
    }

    fn resolved(state: RootState) -> RootState {
        let params = request(&state);
        let page = MockNewsSource::page(&params);
        reduce(
            &state,
            Action::NewsApi(CacheAction::Resolved {
                params,
                result: Ok(page),
            }),
        )
    }

    #[test]
    fn test_request_follows_category_until_search() {
        let state = RootState::default();
        assert_eq!(request(&state), NewsRequest::top_headlines("technology"));

        let state = reduce(
            &state,
            Action::News(NewsAction::SetSearchQuery("  markets ".into())),
        );
        assert_eq!(request(&state), NewsRequest::search("markets"));
    }

    #[test]
    fn test_renders_heading_and_loading() {
        let buf = render(&RootState::default());
        assert!(row_text(&buf, 0).starts_with("Category: technology"));
        assert!(row_text(&buf, 1).starts_with("Loading headlines..."));
    }

    #[test]
    fn test_renders_headlines_with_saved_marker() {
        let state = resolved(RootState::default());
        let state = reduce(&state, Action::News(NewsAction::SaveArticle("2".into())));
        let buf = render(&state);

        assert!(row_text(&buf, 1).starts_with("  New AI breakthrough"));
        assert!(row_text(&buf, 2).starts_with("* Tech giants announce collaboration"));
        assert!(row_text(&buf, 2).contains("Silicon Valley News"));
        assert!(find_row_with_text(&buf, "Global markets").is_none());
    }

    #[test]
    fn test_empty_search_renders_no_articles() {
        let state = reduce(
            &RootState::default(),
            Action::News(NewsAction::SetSearchQuery("zzzz".into())),
        );
        let buf = render(&resolved(state));
        assert!(row_text(&buf, 0).starts_with("Search: zzzz"));
        assert!(row_text(&buf, 1).starts_with("No articles"));
    }
}
