use crate::config::Config;
use crate::feed::{load_articles, FetchError, NewsArticle, LOAD_FAILED_MESSAGE};
use crate::theme::{StyleMap, ThemeVariant};
use anyhow::Result;
use futures::FutureExt;
use ratatui::style::Style;
use reqwest::redirect::Policy;
use std::borrow::Cow;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

// ============================================================================
// HTTP Client Configuration
// ============================================================================

/// Create a custom redirect policy with loop detection and limited hops.
fn create_redirect_policy() -> Policy {
    Policy::custom(|attempt| {
        if attempt.previous().len() >= 3 {
            return attempt.error("Too many redirects (max 3)");
        }

        let url = attempt.url();
        for prev in attempt.previous() {
            if prev.as_str() == url.as_str() {
                return attempt.error("Redirect loop detected");
            }
        }

        tracing::debug!(
            from = %attempt.previous().last().map(|u| u.as_str()).unwrap_or("initial"),
            to = %url,
            hop = attempt.previous().len() + 1,
            "Following redirect"
        );

        attempt.follow()
    })
}

/// Build the HTTP client used for feed loads.
///
/// No client-wide timeout: the feed request waits indefinitely unless
/// `request_timeout_secs` is configured.
pub fn build_http_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .redirect(create_redirect_policy())
        .user_agent(concat!("isonews/", env!("CARGO_PKG_VERSION")))
        .build()
}

// ============================================================================
// View State
// ============================================================================

/// What the news view is currently showing. Exactly one holds at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Loading,
    Error(String),
    /// Deduplicated articles, in feed order.
    Ready(Arc<Vec<NewsArticle>>),
}

impl ViewState {
    /// Map a finished load to its settled state.
    ///
    /// Every failure becomes the same message; the cause is only logged.
    pub fn from_load(result: Result<Vec<NewsArticle>, FetchError>) -> Self {
        match result {
            Ok(articles) => ViewState::Ready(Arc::new(articles)),
            Err(e) => {
                tracing::warn!(error = %e, "News feed load failed");
                ViewState::Error(e.user_message().to_string())
            }
        }
    }

    /// True once the load has finished, successfully or not.
    pub fn is_settled(&self) -> bool {
        !matches!(self, ViewState::Loading)
    }

    /// Articles to render. Empty unless `Ready`.
    pub fn articles(&self) -> &[NewsArticle] {
        match self {
            ViewState::Ready(articles) => articles,
            _ => &[],
        }
    }
}

// ============================================================================
// Event Types
// ============================================================================

/// Events from background tasks.
///
/// `generation` identifies the mount that spawned the task; results from an
/// older mount are dropped.
#[derive(Debug)]
pub enum AppEvent {
    FeedLoaded {
        generation: u64,
        result: Result<Vec<NewsArticle>, FetchError>,
    },
    /// The load task panicked.
    TaskPanicked {
        generation: u64,
        task: &'static str,
        error: String,
    },
}

// ============================================================================
// Application State
// ============================================================================

/// Central application state
pub struct App {
    pub config: Config,
    pub http_client: reqwest::Client,

    /// Current render state. Only results of the current mount change it.
    pub view_state: ViewState,

    // Theme
    pub theme_variant: ThemeVariant,
    pub theme: StyleMap,

    /// First visible card row.
    pub scroll_row: usize,
    /// Card rows laid out in the last frame (for scroll clamping).
    pub grid_rows: usize,

    pub status_message: Option<(Cow<'static, str>, Instant)>,
    pub needs_redraw: bool,
    pub spinner_frame: usize,

    /// Current mount. Bumped on every mount and on unmount.
    generation: u64,
    load_handle: Option<JoinHandle<()>>,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let http_client = build_http_client()?;

        let theme_variant = ThemeVariant::from_str_name(&config.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %config.theme, "Unknown theme, falling back to dark");
            ThemeVariant::Dark
        });

        Ok(Self {
            config,
            http_client,
            view_state: ViewState::Loading,
            theme_variant,
            theme: StyleMap::from_palette(&theme_variant.palette()),
            scroll_row: 0,
            grid_rows: 0,
            status_message: None,
            needs_redraw: true,
            spinner_frame: 0,
            generation: 0,
            load_handle: None,
        })
    }

    /// Resolve a semantic role name to its `Style`.
    pub fn style(&self, role: &str) -> Style {
        self.theme.resolve(role)
    }

    /// Switch to a different theme variant at runtime.
    pub fn set_theme(&mut self, variant: ThemeVariant) {
        self.theme_variant = variant;
        self.theme = StyleMap::from_palette(&variant.palette());
        self.needs_redraw = true;
    }

    /// Cycle to the next theme variant. Returns the new theme's name.
    pub fn cycle_theme(&mut self) -> &'static str {
        let next = self.theme_variant.next();
        self.set_theme(next);
        next.name()
    }

    /// Generation of the current mount.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start a mount: reset to `Loading` and spawn exactly one feed load.
    ///
    /// Any previous mount is unmounted first, so its result can no longer
    /// reach the view. Returns the new generation.
    pub fn mount(&mut self, event_tx: &mpsc::Sender<AppEvent>) -> u64 {
        let generation = self.begin_mount();

        let client = self.http_client.clone();
        let url = self.config.feed_url.clone();
        let timeout = self.config.request_timeout();
        let tx = event_tx.clone();

        tracing::debug!(generation, url = %url, "Spawning feed load");

        self.load_handle = Some(tokio::spawn(async move {
            let event = match catch_task_panic(load_articles(&client, &url, timeout)).await {
                Ok(result) => AppEvent::FeedLoaded { generation, result },
                Err(error) => AppEvent::TaskPanicked {
                    generation,
                    task: "feed_load",
                    error,
                },
            };

            if let Err(e) = tx.send(event).await {
                tracing::debug!(error = %e, generation, "Feed result dropped (receiver closed)");
            }
        }));

        generation
    }

    /// State half of [`App::mount`], without spawning.
    pub(crate) fn begin_mount(&mut self) -> u64 {
        self.unmount();
        self.view_state = ViewState::Loading;
        self.scroll_row = 0;
        self.grid_rows = 0;
        self.spinner_frame = 0;
        self.needs_redraw = true;
        self.generation
    }

    /// End the current mount: abort the load and invalidate its generation.
    pub fn unmount(&mut self) {
        if let Some(handle) = self.load_handle.take() {
            handle.abort();
            tracing::debug!(generation = self.generation, "Aborted in-flight feed load");
        }
        self.generation = self.generation.wrapping_add(1);
    }

    /// Apply a finished load. Returns false if the result was stale.
    pub fn apply_load(
        &mut self,
        generation: u64,
        result: Result<Vec<NewsArticle>, FetchError>,
    ) -> bool {
        if !self.accepts(generation) {
            return false;
        }

        self.view_state = ViewState::from_load(result);
        self.load_handle = None;
        self.needs_redraw = true;
        true
    }

    /// Settle the view after the load task panicked.
    pub fn apply_panic(&mut self, generation: u64, task: &'static str, error: &str) -> bool {
        tracing::error!(task, error, generation, "Background task panicked");
        if !self.accepts(generation) {
            return false;
        }

        self.view_state = ViewState::Error(LOAD_FAILED_MESSAGE.to_string());
        self.load_handle = None;
        self.needs_redraw = true;
        true
    }

    fn accepts(&self, generation: u64) -> bool {
        if generation != self.generation {
            tracing::debug!(
                generation,
                current = self.generation,
                "Ignoring result from a previous mount"
            );
            return false;
        }
        if self.view_state.is_settled() {
            tracing::debug!(generation, "Ignoring result for an already settled view");
            return false;
        }
        true
    }

    /// Scroll up by `rows` card rows.
    pub fn scroll_up(&mut self, rows: usize) {
        self.scroll_row = self.scroll_row.saturating_sub(rows);
    }

    /// Scroll down by `rows` card rows, stopping at the last row.
    pub fn scroll_down(&mut self, rows: usize) {
        self.scroll_row = self.scroll_row.saturating_add(rows);
        self.clamp_scroll();
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_row = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_row = self.grid_rows.saturating_sub(1);
    }

    /// Keep the first visible row inside the laid-out grid.
    pub fn clamp_scroll(&mut self) {
        self.scroll_row = self.scroll_row.min(self.grid_rows.saturating_sub(1));
    }

    /// Set status message (will auto-expire after 3 seconds)
    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    /// Clear status message if expired (older than 3 seconds)
    /// Returns true if a message was actually cleared
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed().as_secs() >= 3 {
                self.status_message = None;
                return true;
            }
        }
        false
    }
}

/// Abort the in-flight load when the view goes away.
impl Drop for App {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Wraps a future to catch panics and convert them to errors.
async fn catch_task_panic<F, T>(future: F) -> Result<T, String>
where
    F: std::future::Future<Output = T>,
{
    AssertUnwindSafe(future)
        .catch_unwind()
        .await
        .map_err(|panic| {
            if let Some(s) = panic.downcast_ref::<&'static str>() {
                s.to_string()
            } else if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            }
        })
}
