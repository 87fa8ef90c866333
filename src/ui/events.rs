//! Application event handling.
//!
//! Applies results delivered by the feed load task.

use crate::app::{App, AppEvent};

/// Handle an event from a background task.
pub(super) fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::FeedLoaded { generation, result } => {
            if app.apply_load(generation, result) {
                tracing::debug!(
                    generation,
                    count = app.view_state.articles().len(),
                    "Applied feed result"
                );
            }
        }
        AppEvent::TaskPanicked {
            generation,
            task,
            error,
        } => {
            if app.apply_panic(generation, task, &error) {
                app.set_status("Error interno al cargar las noticias");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ViewState;
    use crate::config::Config;
    use crate::feed::{FetchError, LOAD_FAILED_MESSAGE};

    #[tokio::test]
    async fn test_feed_loaded_settles_view() {
        let mut app = App::new(Config::default()).unwrap();
        let generation = app.begin_mount();

        handle_app_event(
            &mut app,
            AppEvent::FeedLoaded {
                generation,
                result: Err(FetchError::HttpStatus(503)),
            },
        );
        assert_eq!(
            app.view_state,
            ViewState::Error(LOAD_FAILED_MESSAGE.to_string())
        );
    }

    #[tokio::test]
    async fn test_stale_event_is_ignored() {
        let mut app = App::new(Config::default()).unwrap();
        let stale = app.begin_mount();
        app.begin_mount();

        handle_app_event(
            &mut app,
            AppEvent::FeedLoaded {
                generation: stale,
                result: Ok(vec![]),
            },
        );
        assert_eq!(app.view_state, ViewState::Loading);
    }

    #[tokio::test]
    async fn test_panic_event_sets_status() {
        let mut app = App::new(Config::default()).unwrap();
        let generation = app.begin_mount();

        handle_app_event(
            &mut app,
            AppEvent::TaskPanicked {
                generation,
                task: "feed_load",
                error: "boom".to_string(),
            },
        );
        assert!(app.view_state.is_settled());
        assert!(app.status_message.is_some());
    }
}
