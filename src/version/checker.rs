//! User-triggered update checking for a single view

use std::ops::Deref;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[cfg(test)]
use mockall::automock;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::version::error::CheckError;
use crate::version::parse::{ParsedVersion, is_newer, parse_version};
use crate::version::source::LatestSource;
use crate::version::state::{UpdateCheckResult, UpdateCheckState, Visibility, render};

/// Trait for whatever displays the update regions
#[cfg_attr(test, automock)]
pub trait Renderer: Send + Sync + 'static {
    /// Called once after every state transition
    fn render(&self, visibility: &Visibility);
}

/// State owned by the view. Only touched under the checker's lock.
#[derive(Debug, Default)]
struct View {
    state: UpdateCheckState,
    closed: bool,
}

/// Drives `Idle -> Checking -> {UpdateAvailable | UpToDate | Error}` for one view.
///
/// At most one check is in flight at a time; triggers arriving while a check is
/// outstanding are ignored. Results arriving after [`UpdateChecker::close`] are
/// dropped without rendering. A check whose future is dropped before the fetch
/// completes ends in `Error`, so the next trigger is accepted again.
pub struct UpdateChecker {
    current_version: String,
    source: Arc<dyn LatestSource>,
    renderer: Arc<dyn Renderer>,
    view: Mutex<View>,
    /// Held from a transition until its render returns, never while the
    /// renderer could need `view`.
    render_order: Mutex<()>,
}

impl UpdateChecker {
    pub fn new(
        current_version: &str,
        source: Arc<dyn LatestSource>,
        renderer: Arc<dyn Renderer>,
    ) -> Self {
        if !parse_version(current_version).is_valid() {
            warn!(
                "Current version {:?} is not major.minor.patch; updates will never be reported",
                current_version
            );
        }

        Self {
            current_version: current_version.to_string(),
            source,
            renderer,
            view: Mutex::new(View::default()),
            render_order: Mutex::new(()),
        }
    }

    pub fn current_version(&self) -> &str {
        &self.current_version
    }

    pub fn state(&self) -> UpdateCheckState {
        self.lock_view().state.clone()
    }

    pub fn is_closed(&self) -> bool {
        self.lock_view().closed
    }

    /// Render the current state without transitioning (page load)
    pub fn show(&self) {
        let _order = self.lock_render_order();
        let visibility = {
            let view = self.lock_view();
            (!view.closed).then(|| render(&view.state))
        };

        if let Some(visibility) = visibility {
            self.renderer.render(&visibility);
        }
    }

    /// Detach the view. Later transitions are not rendered.
    pub fn close(&self) {
        let mut view = self.lock_view();
        if !view.closed {
            debug!("Update checker view closed in state {:?}", view.state);
        }
        view.closed = true;
    }

    /// Run one check to completion.
    ///
    /// Returns `None` when the trigger was ignored because a check is already
    /// in flight or the view is closed.
    pub async fn check_for_update(&self) -> Option<UpdateCheckResult> {
        if !self.begin() {
            return None;
        }
        Some(InFlight::new(self).run().await)
    }

    /// Start a check in the background, as a click handler would.
    ///
    /// Returns `None` when the trigger was ignored.
    pub fn trigger(self: &Arc<Self>) -> Option<JoinHandle<UpdateCheckResult>> {
        if !self.begin() {
            return None;
        }
        let in_flight = InFlight::new(Arc::clone(self));
        Some(tokio::spawn(in_flight.run()))
    }

    /// Enter `Checking` unless a check is outstanding or the view is gone
    fn begin(&self) -> bool {
        let _order = self.lock_render_order();
        let visibility = {
            let mut view = self.lock_view();

            if view.closed {
                debug!("Ignoring update check trigger: view is closed");
                return false;
            }

            if view.state.is_checking() {
                debug!("Ignoring update check trigger: a check is already in flight");
                return false;
            }

            view.state = UpdateCheckState::Checking;
            render(&view.state)
        };

        self.renderer.render(&visibility);
        true
    }

    fn finish(&self, result: UpdateCheckResult) {
        let _order = self.lock_render_order();
        let visibility = {
            let mut view = self.lock_view();
            if view.closed {
                debug!("Dropping update check result {:?}: view is closed", result);
            }

            view.state = result.into();
            (!view.closed).then(|| render(&view.state))
        };

        if let Some(visibility) = visibility {
            self.renderer.render(&visibility);
        }
    }

    fn lock_view(&self) -> MutexGuard<'_, View> {
        // View holds plain data, so a poisoned lock is still consistent
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_render_order(&self) -> MutexGuard<'_, ()> {
        self.render_order
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// A started check. Dropping it before the fetch resolves records `Error`.
struct InFlight<C: Deref<Target = UpdateChecker>> {
    checker: C,
    finished: bool,
}

impl<C: Deref<Target = UpdateChecker>> InFlight<C> {
    fn new(checker: C) -> Self {
        Self {
            checker,
            finished: false,
        }
    }

    async fn run(mut self) -> UpdateCheckResult {
        let fetched = self.checker.source.fetch_latest().await;
        let result = resolve(&self.checker.current_version, fetched);
        self.finished = true;
        self.checker.finish(result.clone());
        result
    }
}

impl<C: Deref<Target = UpdateChecker>> Drop for InFlight<C> {
    fn drop(&mut self) {
        if !self.finished {
            warn!("Update check abandoned before the fetch completed");
            self.checker.finish(UpdateCheckResult::Error);
        }
    }
}

impl std::fmt::Debug for UpdateChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateChecker")
            .field("current_version", &self.current_version)
            .field("view", &*self.lock_view())
            .finish_non_exhaustive()
    }
}

/// Turn a fetch outcome into the result shown to the user
pub fn resolve(current_version: &str, fetched: Result<String, CheckError>) -> UpdateCheckResult {
    match fetched {
        Ok(latest) => {
            if let ParsedVersion::Invalid = parse_version(&latest) {
                warn!("Published latest version {:?} is not major.minor.patch", latest);
            }

            if is_newer(current_version, &latest) {
                info!("Update available: {} -> {}", current_version, latest);
                UpdateCheckResult::UpdateAvailable(latest)
            } else {
                info!("Up to date: {} (latest {})", current_version, latest);
                UpdateCheckResult::UpToDate
            }
        }
        Err(e) => {
            warn!("Update check failed: {}", e);
            UpdateCheckResult::Error
        }
    }
}
