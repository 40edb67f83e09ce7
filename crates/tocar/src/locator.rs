//! Locator abstraction for element selection.
//!
//! A [`Locator`] pairs a [`Selector`] with wait options. Page objects build
//! their locator tables once at construction and never mutate them; every
//! named UI target in the application under test has exactly one locator.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default timeout for visibility waits (30 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 30_000;

/// Extended timeout for elements revealed asynchronously (2 minutes)
pub const EXTENDED_WAIT_TIMEOUT_MS: u64 = 120_000;

/// Budget for the application's first paint at launch (2 minutes)
pub const LAUNCH_TIMEOUT_MS: u64 = 120_000;

/// Default polling interval for waits (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Selector strategy for locating elements.
///
/// Only the strategies used by the UI Tests screens appear here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selector {
    /// CSS selector (e.g., `a[href="#UI"]`)
    Css(String),
    /// Exact link text (e.g., `navigator.mozId`)
    LinkText(String),
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create a link-text selector
    #[must_use]
    pub fn link_text(text: impl Into<String>) -> Self {
        Self::LinkText(text.into())
    }

    /// The raw selector value
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Css(s) | Self::LinkText(s) => s,
        }
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Css(s) => write!(f, "css={s}"),
            Self::LinkText(s) => write!(f, "link text={s}"),
        }
    }
}

/// Options controlling how a locator is waited on
#[derive(Debug, Clone)]
pub struct LocatorOptions {
    /// Timeout for visibility waits
    pub timeout: Duration,
    /// Polling interval between re-queries
    pub poll_interval: Duration,
    /// Whether the element must report itself displayed
    pub visible: bool,
}

impl Default for LocatorOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_WAIT_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            visible: true,
        }
    }
}

/// A locator for one named on-screen target.
#[derive(Debug, Clone)]
pub struct Locator {
    selector: Selector,
    options: LocatorOptions,
}

impl Locator {
    /// Create a locator with default wait options
    #[must_use]
    pub fn new(selector: Selector) -> Self {
        Self {
            selector,
            options: LocatorOptions::default(),
        }
    }

    /// Shorthand for a CSS locator
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::new(Selector::css(selector))
    }

    /// Shorthand for a link-text locator
    #[must_use]
    pub fn link_text(text: impl Into<String>) -> Self {
        Self::new(Selector::link_text(text))
    }

    /// Set a custom wait timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = timeout;
        self
    }

    /// Use the extended timeout for asynchronously revealed elements
    #[must_use]
    pub const fn with_extended_timeout(self) -> Self {
        self.with_timeout(Duration::from_millis(EXTENDED_WAIT_TIMEOUT_MS))
    }

    /// Set the polling interval
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.options.poll_interval = poll_interval;
        self
    }

    /// Set the visibility requirement
    #[must_use]
    pub const fn with_visible(mut self, visible: bool) -> Self {
        self.options.visible = visible;
        self
    }

    /// Get the selector
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Get the wait options
    #[must_use]
    pub const fn options(&self) -> &LocatorOptions {
        &self.options
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    mod selector_tests {
        use super::*;

        #[test]
        fn test_css_constructor() {
            let sel = Selector::css("a[href=\"#API\"]");
            assert_eq!(sel, Selector::Css("a[href=\"#API\"]".to_string()));
            assert_eq!(sel.value(), "a[href=\"#API\"]");
        }

        #[test]
        fn test_link_text_constructor() {
            let sel = Selector::link_text("Keyboard");
            assert_eq!(sel, Selector::LinkText("Keyboard".to_string()));
        }

        #[test]
        fn test_display() {
            assert_eq!(Selector::css("li.ready").to_string(), "css=li.ready");
            assert_eq!(
                Selector::link_text("Contextmenu").to_string(),
                "link text=Contextmenu"
            );
        }

        #[test]
        fn test_serde_round_trip() {
            let sel = Selector::css("iframe[src*=\"identity\"]");
            let json = serde_json::to_string(&sel).unwrap();
            let back: Selector = serde_json::from_str(&json).unwrap();
            assert_eq!(sel, back);
        }
    }

    mod locator_tests {
        use super::*;

        #[test]
        fn test_default_options() {
            let loc = Locator::css("#t-request");
            assert_eq!(
                loc.options().timeout,
                Duration::from_millis(DEFAULT_WAIT_TIMEOUT_MS)
            );
            assert_eq!(
                loc.options().poll_interval,
                Duration::from_millis(DEFAULT_POLL_INTERVAL_MS)
            );
            assert!(loc.options().visible);
        }

        #[test]
        fn test_extended_timeout() {
            let loc = Locator::link_text("navigator.mozId").with_extended_timeout();
            assert_eq!(
                loc.options().timeout,
                Duration::from_millis(EXTENDED_WAIT_TIMEOUT_MS)
            );
        }

        #[test]
        fn test_custom_timeout_and_poll() {
            let loc = Locator::css("li.logout")
                .with_timeout(Duration::from_millis(10))
                .with_poll_interval(Duration::from_millis(1));
            assert_eq!(loc.options().timeout, Duration::from_millis(10));
            assert_eq!(loc.options().poll_interval, Duration::from_millis(1));
        }
    }
}
