//! Shared automation session.
//!
//! The session bundles the driver with an explicit mirror of the frame
//! context. The remote side tracks which embedded document is addressable;
//! page objects that switch frames keep the mirror in step through
//! [`Session::switch_to_top`], [`Session::enter_app_frame`] and
//! [`Session::enter_frame`], and frame-scoped operations assert their
//! expected path with [`Session::require_frame`]. A mismatch surfaces as
//! [`TocarError::StaleFrameContext`] instead of a misleading
//! element-not-found.
//!
//! Usage is strictly sequential from a single caller; the interior mutex
//! exists so page objects can share the handle, not to support concurrency.

use crate::driver::{Driver, ElementHandle};
use crate::gesture::Gesture;
use crate::locator::{Locator, Selector, DEFAULT_POLL_INTERVAL_MS, LAUNCH_TIMEOUT_MS};
use crate::result::{TocarError, TocarResult};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::debug;

/// Semantic identifier for one level of the frame stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameId {
    /// The application's own frame inside the system document
    App,
    /// The sign-in iframe embedded in the application
    Identity,
    /// A `#test-iframe` whose src contains the given hint
    Test(String),
}

impl FrameId {
    /// Test-iframe identifier for the given src hint
    #[must_use]
    pub fn test(hint: impl Into<String>) -> Self {
        Self::Test(hint.into())
    }
}

impl std::fmt::Display for FrameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::App => write!(f, "app"),
            Self::Identity => write!(f, "identity"),
            Self::Test(hint) => write!(f, "test:{hint}"),
        }
    }
}

fn format_path(path: &[FrameId]) -> String {
    if path.is_empty() {
        return "top".to_string();
    }
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" > ")
}

struct SessionInner {
    driver: Arc<dyn Driver>,
    frames: Mutex<Vec<FrameId>>,
}

impl std::fmt::Debug for SessionInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionInner")
            .field("frames", &self.frames)
            .finish_non_exhaustive()
    }
}

/// Cheaply cloneable handle to the shared automation session.
///
/// Page objects hold a clone; none of them owns the driver.
#[derive(Debug, Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

impl Session {
    /// Create a session over the given driver, starting at the top document
    #[must_use]
    pub fn new(driver: Arc<dyn Driver>) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                driver,
                frames: Mutex::new(Vec::new()),
            }),
        }
    }

    fn frames(&self) -> std::sync::MutexGuard<'_, Vec<FrameId>> {
        self.inner.frames.lock().expect("frame stack poisoned")
    }

    /// Launch the named application and wait for its first paint,
    /// up to [`LAUNCH_TIMEOUT_MS`]
    pub fn launch(&self, app: &str) -> TocarResult<()> {
        self.launch_with_timeout(app, Duration::from_millis(LAUNCH_TIMEOUT_MS))
    }

    /// Launch with an explicit first-paint budget
    pub fn launch_with_timeout(&self, app: &str, timeout: Duration) -> TocarResult<()> {
        debug!(app, ?timeout, "launching application");
        self.inner.driver.launch_app(app)?;
        let start = Instant::now();
        let poll = Duration::from_millis(DEFAULT_POLL_INTERVAL_MS);
        loop {
            if self.inner.driver.is_app_ready(app)? {
                debug!(app, elapsed_ms = start.elapsed().as_millis() as u64, "application ready");
                return Ok(());
            }
            if start.elapsed() >= timeout {
                return Err(TocarError::LaunchTimeout {
                    app: app.to_string(),
                    ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                });
            }
            std::thread::sleep(poll);
        }
    }

    /// Reset the frame context to the top-level document
    pub fn switch_to_top(&self) -> TocarResult<()> {
        debug!("switching to top frame");
        self.inner.driver.switch_to_top_frame()?;
        self.frames().clear();
        Ok(())
    }

    /// Descend into the application's own frame
    pub fn enter_app_frame(&self) -> TocarResult<()> {
        let frame = self.inner.driver.app_frame()?;
        debug!(frame = %frame.id, "entering app frame");
        self.inner.driver.switch_to_frame(&frame)?;
        self.frames().push(FrameId::App);
        Ok(())
    }

    /// Find the iframe matching the selector and descend into it
    pub fn enter_frame(&self, selector: &Selector, frame_id: FrameId) -> TocarResult<()> {
        let frame = self.find(selector)?;
        debug!(frame = %frame_id, element = %frame.id, "entering frame");
        self.inner.driver.switch_to_frame(&frame)?;
        self.frames().push(frame_id);
        Ok(())
    }

    /// Snapshot of the current frame path (empty = top document)
    #[must_use]
    pub fn frame_path(&self) -> Vec<FrameId> {
        self.frames().clone()
    }

    /// Fail with [`TocarError::StaleFrameContext`] unless the current frame
    /// path equals `expected`
    pub fn require_frame(&self, expected: &[FrameId]) -> TocarResult<()> {
        let actual = self.frame_path();
        if actual == expected {
            Ok(())
        } else {
            Err(TocarError::StaleFrameContext {
                expected: format_path(expected),
                actual: format_path(&actual),
            })
        }
    }

    /// Find the first element matching the selector
    pub fn find(&self, selector: &Selector) -> TocarResult<ElementHandle> {
        self.inner
            .driver
            .find_element(selector)?
            .ok_or_else(|| TocarError::ElementNotFound {
                selector: selector.to_string(),
            })
    }

    /// Find all elements matching the selector
    pub fn find_all(&self, selector: &Selector) -> TocarResult<Vec<ElementHandle>> {
        self.inner.driver.find_elements(selector)
    }

    /// Poll until the locator's element exists and reports displayed
    pub fn wait_for_displayed(&self, locator: &Locator) -> TocarResult<ElementHandle> {
        let options = locator.options();
        let start = Instant::now();
        loop {
            if let Some(element) = self.inner.driver.find_element(locator.selector())? {
                if element.displayed || !options.visible {
                    return Ok(element);
                }
            }
            if start.elapsed() >= options.timeout {
                return Err(TocarError::VisibilityTimeout {
                    selector: locator.selector().to_string(),
                    ms: u64::try_from(options.timeout.as_millis()).unwrap_or(u64::MAX),
                });
            }
            std::thread::sleep(options.poll_interval);
        }
    }

    /// Poll a condition until it holds or the timeout elapses.
    ///
    /// The condition may query the driver and propagate its failures.
    pub fn wait_until<F>(
        &self,
        condition: &str,
        timeout: Duration,
        poll_interval: Duration,
        mut predicate: F,
    ) -> TocarResult<()>
    where
        F: FnMut(&Self) -> TocarResult<bool>,
    {
        let start = Instant::now();
        loop {
            if predicate(self)? {
                return Ok(());
            }
            if start.elapsed() >= timeout {
                return Err(TocarError::WaitTimeout {
                    condition: condition.to_string(),
                    ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                });
            }
            std::thread::sleep(poll_interval);
        }
    }

    /// Tap the element
    pub fn tap(&self, element: &ElementHandle) -> TocarResult<()> {
        debug!(element = %element.id, "tap");
        self.inner.driver.tap(element)
    }

    /// Evaluate a script in the current frame
    pub fn execute_script(
        &self,
        script: &str,
        args: &[serde_json::Value],
    ) -> TocarResult<serde_json::Value> {
        self.inner.driver.execute_script(script, args)
    }

    /// Scroll the element into view from underneath any overlapping chrome
    pub fn scroll_into_view(&self, element: &ElementHandle) -> TocarResult<()> {
        debug!(element = %element.id, "scroll into view");
        let arg = serde_json::to_value(element)?;
        self.execute_script("arguments[0].scrollIntoView(false);", &[arg])?;
        Ok(())
    }

    /// Read an element attribute
    pub fn attribute(&self, element: &ElementHandle, name: &str) -> TocarResult<Option<String>> {
        self.inner.driver.attribute(element, name)
    }

    /// Perform a composite gesture as a single driver action
    pub fn perform(&self, gesture: &Gesture) -> TocarResult<()> {
        debug!(steps = gesture.steps().len(), "performing gesture");
        self.inner.driver.perform_gesture(gesture.steps())
    }
}
