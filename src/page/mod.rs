//! Results page glue
//!
//! Turns page events into host commands or update checks.
//!
//! # Modules
//!
//! - [`host`]: Host commands and the trait that executes them
//! - [`links`]: Filtering of `open-external` links

pub mod host;
pub mod links;

use std::path::PathBuf;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::page::host::{Host, HostCommand};
use crate::page::links::LinkFilter;
use crate::version::checker::UpdateChecker;
use crate::version::state::UpdateCheckResult;

/// Key code of the Escape key
pub const ESCAPE_KEY_CODE: u32 = 27;

/// Events the results page reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    KeyDown { key_code: u32 },
    /// Click on a link carrying the `open-external` class
    ExternalLinkClicked { href: String },
    VisibilityChanged { hidden: bool },
    UpdateCheckClicked,
}

/// What handling an event did
#[derive(Debug)]
pub enum PageAction {
    /// Nothing to do for this event
    Ignored,
    /// A host command was issued
    Host(HostCommand),
    /// An update check was started in the background
    UpdateCheck(JoinHandle<UpdateCheckResult>),
}

/// One open results page
pub struct Page {
    host: Arc<dyn Host>,
    checker: Arc<UpdateChecker>,
    links: LinkFilter,
    marker_file: Option<PathBuf>,
}

impl Page {
    /// Open a page and render its initial update region
    pub fn open(
        host: Arc<dyn Host>,
        checker: Arc<UpdateChecker>,
        marker_file: Option<PathBuf>,
    ) -> Self {
        checker.show();
        Self {
            host,
            checker,
            links: LinkFilter::new(),
            // An empty path means the command did not create a marker
            marker_file: marker_file.filter(|path| !path.as_os_str().is_empty()),
        }
    }

    pub fn checker(&self) -> &Arc<UpdateChecker> {
        &self.checker
    }

    /// Text for the version element of the page: the bare version, no prefix
    pub fn version_label(&self) -> &str {
        self.checker.current_version()
    }

    /// Handle one event. Host failures are logged and never propagate.
    pub fn handle(&self, event: PageEvent) -> PageAction {
        debug!("Page event {:?}", event);

        let command = match event {
            PageEvent::KeyDown { key_code } if key_code == ESCAPE_KEY_CODE => {
                Some(HostCommand::CloseWindow)
            }
            PageEvent::KeyDown { .. } => None,
            PageEvent::ExternalLinkClicked { href } => self.links.open_command(&href),
            PageEvent::VisibilityChanged { hidden: true } => {
                self.marker_file.clone().map(HostCommand::RemoveMarker)
            }
            PageEvent::VisibilityChanged { hidden: false } => None,
            PageEvent::UpdateCheckClicked => {
                return match self.checker.trigger() {
                    Some(handle) => PageAction::UpdateCheck(handle),
                    None => PageAction::Ignored,
                };
            }
        };

        match command {
            Some(command) => {
                if let Err(e) = self.host.run(&command) {
                    error!("Host command {:?} failed: {}", command, e);
                }
                PageAction::Host(command)
            }
            None => PageAction::Ignored,
        }
    }

    /// Close the page. A check still in flight will not render.
    pub fn close(&self) {
        self.checker.close();
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("checker", &self.checker)
            .field("marker_file", &self.marker_file)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::host::{HostError, MockHost};
    use crate::version::checker::MockRenderer;
    use crate::version::source::MockLatestSource;

    fn checker() -> Arc<UpdateChecker> {
        let mut renderer = MockRenderer::new();
        renderer.expect_render().return_const(());
        Arc::new(UpdateChecker::new(
            "3.0.2",
            Arc::new(MockLatestSource::new()),
            Arc::new(renderer),
        ))
    }

    fn host_expecting(command: HostCommand) -> Arc<MockHost> {
        let mut host = MockHost::new();
        host.expect_run()
            .withf(move |c| *c == command)
            .times(1)
            .returning(|_| Ok(()));
        Arc::new(host)
    }

    fn silent_host() -> Arc<MockHost> {
        let mut host = MockHost::new();
        host.expect_run().never();
        Arc::new(host)
    }

    #[test]
    fn escape_closes_window() {
        let page = Page::open(host_expecting(HostCommand::CloseWindow), checker(), None);

        let action = page.handle(PageEvent::KeyDown {
            key_code: ESCAPE_KEY_CODE,
        });

        assert!(matches!(action, PageAction::Host(HostCommand::CloseWindow)));
    }

    #[test]
    fn other_keys_are_ignored() {
        let page = Page::open(silent_host(), checker(), None);

        let action = page.handle(PageEvent::KeyDown { key_code: 13 });

        assert!(matches!(action, PageAction::Ignored));
    }

    #[test]
    fn web_link_opens_in_browser() {
        let url = "https://eslint.org/docs/rules/no-undef";
        let page = Page::open(
            host_expecting(HostCommand::OpenExternal(url.to_string())),
            checker(),
            None,
        );

        let action = page.handle(PageEvent::ExternalLinkClicked {
            href: url.to_string(),
        });

        assert!(matches!(action, PageAction::Host(HostCommand::OpenExternal(_))));
    }

    #[test]
    fn non_web_link_is_ignored() {
        let page = Page::open(silent_host(), checker(), None);

        let action = page.handle(PageEvent::ExternalLinkClicked {
            href: "txmt://open?line=3".to_string(),
        });

        assert!(matches!(action, PageAction::Ignored));
    }

    #[test]
    fn hiding_page_removes_marker_file() {
        let marker = PathBuf::from("/tmp/eslint-marker");
        let page = Page::open(
            host_expecting(HostCommand::RemoveMarker(marker.clone())),
            checker(),
            Some(marker),
        );

        let action = page.handle(PageEvent::VisibilityChanged { hidden: true });

        assert!(matches!(action, PageAction::Host(HostCommand::RemoveMarker(_))));
    }

    #[test]
    fn hiding_page_without_marker_does_nothing() {
        let page = Page::open(silent_host(), checker(), Some(PathBuf::new()));

        let action = page.handle(PageEvent::VisibilityChanged { hidden: true });

        assert!(matches!(action, PageAction::Ignored));
    }

    #[test]
    fn showing_page_does_not_remove_marker() {
        let page = Page::open(
            silent_host(),
            checker(),
            Some(PathBuf::from("/tmp/eslint-marker")),
        );

        let action = page.handle(PageEvent::VisibilityChanged { hidden: false });

        assert!(matches!(action, PageAction::Ignored));
    }

    #[test]
    fn host_failure_does_not_propagate() {
        let mut host = MockHost::new();
        host.expect_run().times(1).returning(|_| {
            Err(HostError::Spawn {
                program: "osascript",
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
        });
        let page = Page::open(Arc::new(host), checker(), None);

        let action = page.handle(PageEvent::KeyDown {
            key_code: ESCAPE_KEY_CODE,
        });

        assert!(matches!(action, PageAction::Host(HostCommand::CloseWindow)));
    }

    #[test]
    fn version_label_uses_checker_version() {
        let page = Page::open(silent_host(), checker(), None);

        assert_eq!(page.version_label(), "3.0.2");
    }

    #[tokio::test]
    async fn update_click_after_close_is_ignored() {
        let page = Page::open(silent_host(), checker(), None);
        page.close();

        let action = page.handle(PageEvent::UpdateCheckClicked);

        assert!(matches!(action, PageAction::Ignored));
    }
}
