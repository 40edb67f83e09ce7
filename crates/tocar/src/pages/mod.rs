//! Page objects for the UI Tests application.
//!
//! Each page type bundles an immutable locator table with the interaction
//! methods for one screen or frame. Navigation methods never name the next
//! page's constructor directly; they materialize it through [`FromSession`],
//! so page types stay decoupled from each other's construction.

use crate::session::{FrameId, Session};
use std::collections::HashMap;

mod contextmenu;
mod handles;
mod keyboard;

pub use contextmenu::ContextmenuPage;
pub use handles::{Activities, Keyboard, Persona};
pub use keyboard::KeyboardPage;
pub use ui_tests::{UiTests, UI_TESTS};

/// Trait for page objects representing one screen or frame.
pub trait Page {
    /// Human-readable page name for logging
    fn name(&self) -> &str;

    /// Frame path this page's locators are scoped to (empty = top document)
    fn frame_path(&self) -> Vec<FrameId>;

    /// Wait budget for the page to become interactable, in milliseconds
    fn load_timeout_ms(&self) -> u64 {
        crate::locator::DEFAULT_WAIT_TIMEOUT_MS
    }
}

/// Construction seam for page objects.
///
/// Whichever method causes navigation into a frame creates the next page
/// through this trait; the page borrows the session, it never owns it.
pub trait FromSession: Sized {
    /// Bind a page object to the shared session
    fn from_session(session: Session) -> Self;
}

/// Materialize the page object for the frame a navigation method just entered
pub(crate) fn next_page<T: FromSession>(session: &Session) -> T {
    T::from_session(session.clone())
}

/// Type-erased page metadata, for registry lookups
pub trait PageInfo: std::fmt::Debug + Send + Sync {
    /// Human-readable page name
    fn name(&self) -> &str;

    /// Frame path the page is scoped to
    fn frame_path(&self) -> Vec<FrameId>;

    /// Wait budget in milliseconds
    fn load_timeout_ms(&self) -> u64;
}

impl<T: Page + std::fmt::Debug + Send + Sync> PageInfo for T {
    fn name(&self) -> &str {
        Page::name(self)
    }

    fn frame_path(&self) -> Vec<FrameId> {
        Page::frame_path(self)
    }

    fn load_timeout_ms(&self) -> u64 {
        Page::load_timeout_ms(self)
    }
}

/// Registry of known pages, keyed by name.
///
/// Test setups register the pages they drive so diagnostics can report which
/// frame each one expects without touching concrete page types.
#[derive(Debug, Default)]
pub struct PageRegistry {
    pages: HashMap<String, Box<dyn PageInfo>>,
}

impl PageRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a page object
    pub fn register<T: Page + std::fmt::Debug + Send + Sync + 'static>(
        &mut self,
        name: impl Into<String>,
        page: T,
    ) {
        let _ = self.pages.insert(name.into(), Box::new(page));
    }

    /// Get a page's metadata by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn PageInfo> {
        self.pages.get(name).map(|p| p.as_ref())
    }

    /// List all registered page names
    #[must_use]
    pub fn list(&self) -> Vec<&str> {
        self.pages.keys().map(String::as_str).collect()
    }

    /// Number of registered pages
    #[must_use]
    pub fn count(&self) -> usize {
        self.pages.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::driver::MockDriver;
    use std::sync::Arc;

    fn session() -> Session {
        Session::new(Arc::new(MockDriver::new()))
    }

    #[test]
    fn test_registry_register_and_get() {
        let mut registry = PageRegistry::new();
        registry.register("ui-tests", UiTests::from_session(session()));

        assert_eq!(registry.count(), 1);
        let info = registry.get("ui-tests").unwrap();
        assert_eq!(info.name(), UI_TESTS);
        assert_eq!(info.frame_path(), vec![FrameId::App]);
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn test_registry_lists_pages() {
        let mut registry = PageRegistry::new();
        registry.register("keyboard", KeyboardPage::from_session(session()));
        registry.register("contextmenu", ContextmenuPage::from_session(session()));

        let pages = registry.list();
        assert_eq!(pages.len(), 2);
        assert!(pages.contains(&"keyboard"));
        assert!(pages.contains(&"contextmenu"));
    }

    #[test]
    fn test_frame_paths_per_page() {
        assert_eq!(
            Page::frame_path(&KeyboardPage::from_session(session())),
            vec![FrameId::App, FrameId::test("keyboard")]
        );
        assert_eq!(
            Page::frame_path(&ContextmenuPage::from_session(session())),
            vec![FrameId::App, FrameId::test("contextmenu")]
        );
    }
}
