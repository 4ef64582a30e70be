pub(crate) use super::*;
pub(crate) use crate::WidgetId;


/// App over the default config with sources that answer immediately.
pub(crate) fn make_app() -> App {
    make_app_with(&Config::default())
}

pub(crate) fn make_app_with(config: &Config) -> App {
    App::with_sources(config, Sources::instant()).expect("test config is valid")
}

/// Ids of the layout currently on screen.
pub(crate) fn visible_ids(app: &App) -> Vec<WidgetId> {
    app.visible_layout().ids().to_vec()
}

pub(crate) fn ids(raw: &[&str]) -> Vec<WidgetId> {
    raw.iter().map(|id| WidgetId::from(*id)).collect()
}

/// Lets background tasks run and applies what they report, until `done`
/// holds or the attempts run out.
pub(crate) async fn settle(app: &mut App, done: impl Fn(&App) -> bool) {
    for _ in 0..200 {
        app.drain_messages();
        if done(app) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("background work did not settle");
}
