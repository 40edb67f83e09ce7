//! Abstract automation driver.
//!
//! The wire protocol to the device is out of scope; everything the page
//! objects need from it is captured by the [`Driver`] trait. Swapping the
//! remote client for another transport means implementing this trait, nothing
//! else. [`MockDriver`] is the in-process implementation used by the crate's
//! own tests.

use crate::gesture::GestureStep;
use crate::locator::Selector;
use crate::result::{TocarError, TocarResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;

/// Handle to one DOM element, as issued by the driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementHandle {
    /// Driver-assigned element identifier
    pub id: String,
    /// Element tag name
    pub tag_name: String,
    /// Text content at query time, if any
    pub text_content: Option<String>,
    /// Whether the element reported itself displayed at query time
    pub displayed: bool,
}

impl ElementHandle {
    /// Create a new element handle
    #[must_use]
    pub fn new(id: impl Into<String>, tag_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag_name: tag_name.into(),
            text_content: None,
            displayed: true,
        }
    }

    /// Set the text content
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text_content = Some(text.into());
        self
    }

    /// Set the displayed flag
    #[must_use]
    pub const fn with_displayed(mut self, displayed: bool) -> Self {
        self.displayed = displayed;
        self
    }

    /// Text content, or the empty string when none was reported
    #[must_use]
    pub fn text(&self) -> &str {
        self.text_content.as_deref().unwrap_or("")
    }
}

/// Synchronous automation driver.
///
/// Every call blocks until the remote side replies. The driver holds the
/// real frame context; [`crate::session::Session`] mirrors it so that
/// stale-context mistakes surface as a distinct error instead of a puzzling
/// element-not-found.
pub trait Driver: Send + Sync {
    /// Launch the named application
    fn launch_app(&self, name: &str) -> TocarResult<()>;

    /// Whether the named application has reached first paint
    fn is_app_ready(&self, name: &str) -> TocarResult<bool>;

    /// Handle of the running application's own frame
    fn app_frame(&self) -> TocarResult<ElementHandle>;

    /// Find the first element matching the selector in the current frame
    fn find_element(&self, selector: &Selector) -> TocarResult<Option<ElementHandle>>;

    /// Find all elements matching the selector in the current frame
    fn find_elements(&self, selector: &Selector) -> TocarResult<Vec<ElementHandle>>;

    /// Descend into the frame owned by the given iframe element
    fn switch_to_frame(&self, frame: &ElementHandle) -> TocarResult<()>;

    /// Reset the frame context to the top-level document
    fn switch_to_top_frame(&self) -> TocarResult<()>;

    /// Evaluate a script in the current frame
    fn execute_script(
        &self,
        script: &str,
        args: &[serde_json::Value],
    ) -> TocarResult<serde_json::Value>;

    /// Tap the element
    fn tap(&self, element: &ElementHandle) -> TocarResult<()>;

    /// Read an element attribute
    fn attribute(&self, element: &ElementHandle, name: &str) -> TocarResult<Option<String>>;

    /// Perform a composite gesture as a single driver action
    fn perform_gesture(&self, steps: &[GestureStep]) -> TocarResult<()>;
}

#[derive(Debug, Default)]
struct MockState {
    elements: HashMap<Selector, Vec<ElementHandle>>,
    /// Selector -> number of queries before matches report displayed
    displayed_after: HashMap<Selector, u32>,
    query_counts: HashMap<Selector, u32>,
    attributes: HashMap<(String, String), String>,
    ready_polls_needed: u32,
    ready_polls_seen: u32,
    gesture_failure: Option<String>,
    script_results: Vec<serde_json::Value>,
    call_history: Vec<String>,
}

/// Scripted driver for unit testing page objects.
///
/// Elements are keyed by selector; visibility can be deferred for a number of
/// queries to exercise polling waits, and gestures can be made to fail to
/// exercise the all-or-nothing gesture contract. Every trait call is recorded
/// in a history that tests inspect with [`MockDriver::was_called`].
#[derive(Debug, Default)]
pub struct MockDriver {
    state: Mutex<MockState>,
}

impl MockDriver {
    /// Create a new mock driver with no scripted elements
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a single element for a selector
    pub fn add_element(&self, selector: Selector, element: ElementHandle) {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.elements.entry(selector).or_default().push(element);
    }

    /// Script the full match list for a selector
    pub fn set_elements(&self, selector: Selector, elements: Vec<ElementHandle>) {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.elements.insert(selector, elements);
    }

    /// Remove all matches for a selector (element disappeared)
    pub fn remove_elements(&self, selector: &Selector) {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.elements.remove(selector);
    }

    /// Defer visibility: matches report displayed only after `queries`
    /// lookups of this selector
    pub fn set_displayed_after(&self, selector: Selector, queries: u32) {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.displayed_after.insert(selector, queries);
    }

    /// Script an attribute value for an element id
    pub fn set_attribute(
        &self,
        element_id: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) {
        let mut state = self.state.lock().expect("mock state poisoned");
        state
            .attributes
            .insert((element_id.into(), name.into()), value.into());
    }

    /// Require `polls` readiness checks before the app reports first paint
    pub fn set_ready_after(&self, polls: u32) {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.ready_polls_needed = polls;
    }

    /// Make the next gesture fail with the given message
    pub fn fail_gesture_with(&self, message: impl Into<String>) {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.gesture_failure = Some(message.into());
    }

    /// Script the result of the next script evaluation
    pub fn set_script_result(&self, result: serde_json::Value) {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.script_results.push(result);
    }

    /// Full call history
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.state
            .lock()
            .expect("mock state poisoned")
            .call_history
            .clone()
    }

    /// Check if a call with the given prefix was recorded
    #[must_use]
    pub fn was_called(&self, prefix: &str) -> bool {
        self.state
            .lock()
            .expect("mock state poisoned")
            .call_history
            .iter()
            .any(|c| c.starts_with(prefix))
    }

    fn record(&self, call: String) {
        self.state
            .lock()
            .expect("mock state poisoned")
            .call_history
            .push(call);
    }

    fn lookup(&self, selector: &Selector) -> Vec<ElementHandle> {
        let mut state = self.state.lock().expect("mock state poisoned");
        let count = state.query_counts.entry(selector.clone()).or_insert(0);
        *count += 1;
        let seen = *count;
        let visible = state
            .displayed_after
            .get(selector)
            .map_or(true, |after| seen > *after);
        state
            .elements
            .get(selector)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .map(|e| {
                let shown = e.displayed && visible;
                e.with_displayed(shown)
            })
            .collect()
    }
}

impl Driver for MockDriver {
    fn launch_app(&self, name: &str) -> TocarResult<()> {
        self.record(format!("launch_app:{name}"));
        Ok(())
    }

    fn is_app_ready(&self, name: &str) -> TocarResult<bool> {
        self.record(format!("is_app_ready:{name}"));
        let mut state = self.state.lock().expect("mock state poisoned");
        state.ready_polls_seen += 1;
        Ok(state.ready_polls_seen > state.ready_polls_needed)
    }

    fn app_frame(&self) -> TocarResult<ElementHandle> {
        self.record("app_frame".to_string());
        Ok(ElementHandle::new("app-frame", "iframe"))
    }

    fn find_element(&self, selector: &Selector) -> TocarResult<Option<ElementHandle>> {
        self.record(format!("find_element:{selector}"));
        Ok(self.lookup(selector).into_iter().next())
    }

    fn find_elements(&self, selector: &Selector) -> TocarResult<Vec<ElementHandle>> {
        self.record(format!("find_elements:{selector}"));
        Ok(self.lookup(selector))
    }

    fn switch_to_frame(&self, frame: &ElementHandle) -> TocarResult<()> {
        self.record(format!("switch_to_frame:{}", frame.id));
        Ok(())
    }

    fn switch_to_top_frame(&self) -> TocarResult<()> {
        self.record("switch_to_top_frame".to_string());
        Ok(())
    }

    fn execute_script(
        &self,
        script: &str,
        args: &[serde_json::Value],
    ) -> TocarResult<serde_json::Value> {
        self.record(format!("execute_script:{script}:{}", args.len()));
        let mut state = self.state.lock().expect("mock state poisoned");
        Ok(state
            .script_results
            .pop()
            .unwrap_or(serde_json::Value::Null))
    }

    fn tap(&self, element: &ElementHandle) -> TocarResult<()> {
        self.record(format!("tap:{}", element.id));
        Ok(())
    }

    fn attribute(&self, element: &ElementHandle, name: &str) -> TocarResult<Option<String>> {
        self.record(format!("attribute:{}:{name}", element.id));
        let state = self.state.lock().expect("mock state poisoned");
        Ok(state
            .attributes
            .get(&(element.id.clone(), name.to_string()))
            .cloned())
    }

    fn perform_gesture(&self, steps: &[GestureStep]) -> TocarResult<()> {
        self.record(format!("perform_gesture:{}", steps.len()));
        let mut state = self.state.lock().expect("mock state poisoned");
        if let Some(message) = state.gesture_failure.take() {
            return Err(TocarError::GestureFailure { message });
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    mod element_handle_tests {
        use super::*;

        #[test]
        fn test_new_defaults_displayed() {
            let el = ElementHandle::new("e1", "a");
            assert!(el.displayed);
            assert_eq!(el.text(), "");
        }

        #[test]
        fn test_with_text() {
            let el = ElementHandle::new("e1", "div").with_text("assertion-token");
            assert_eq!(el.text(), "assertion-token");
        }

        #[test]
        fn test_serde_round_trip() {
            let el = ElementHandle::new("e2", "iframe").with_displayed(false);
            let json = serde_json::to_string(&el).unwrap();
            let back: ElementHandle = serde_json::from_str(&json).unwrap();
            assert_eq!(el, back);
        }
    }

    mod mock_driver_tests {
        use super::*;

        #[test]
        fn test_find_element_returns_scripted() {
            let driver = MockDriver::new();
            let sel = Selector::css("#t-request");
            driver.add_element(sel.clone(), ElementHandle::new("req", "button"));

            let found = driver.find_element(&sel).unwrap();
            assert_eq!(found.unwrap().id, "req");
            assert!(driver.was_called("find_element:css=#t-request"));
        }

        #[test]
        fn test_find_element_missing() {
            let driver = MockDriver::new();
            let found = driver.find_element(&Selector::css("#nope")).unwrap();
            assert!(found.is_none());
        }

        #[test]
        fn test_displayed_after_defers_visibility() {
            let driver = MockDriver::new();
            let sel = Selector::link_text("Keyboard");
            driver.add_element(sel.clone(), ElementHandle::new("kb", "a"));
            driver.set_displayed_after(sel.clone(), 2);

            assert!(!driver.find_element(&sel).unwrap().unwrap().displayed);
            assert!(!driver.find_element(&sel).unwrap().unwrap().displayed);
            assert!(driver.find_element(&sel).unwrap().unwrap().displayed);
        }

        #[test]
        fn test_ready_after_polls() {
            let driver = MockDriver::new();
            driver.set_ready_after(2);
            assert!(!driver.is_app_ready("UI Tests").unwrap());
            assert!(!driver.is_app_ready("UI Tests").unwrap());
            assert!(driver.is_app_ready("UI Tests").unwrap());
        }

        #[test]
        fn test_gesture_failure_is_one_shot() {
            let driver = MockDriver::new();
            driver.fail_gesture_with("target detached");
            let err = driver.perform_gesture(&[]).unwrap_err();
            assert!(matches!(err, TocarError::GestureFailure { .. }));
            assert!(driver.perform_gesture(&[]).is_ok());
        }

        #[test]
        fn test_remove_elements_simulates_disappearance() {
            let driver = MockDriver::new();
            let sel = Selector::css("body > section");
            driver.add_element(sel.clone(), ElementHandle::new("body", "section"));
            assert!(driver.find_element(&sel).unwrap().is_some());

            driver.remove_elements(&sel);
            assert!(driver.find_element(&sel).unwrap().is_none());
        }

        #[test]
        fn test_script_result_is_returned_once() {
            let driver = MockDriver::new();
            driver.set_script_result(serde_json::json!({"ok": true}));
            let first = driver.execute_script("return probe();", &[]).unwrap();
            assert_eq!(first, serde_json::json!({"ok": true}));
            let second = driver.execute_script("return probe();", &[]).unwrap();
            assert_eq!(second, serde_json::Value::Null);
        }

        #[test]
        fn test_attribute_lookup() {
            let driver = MockDriver::new();
            driver.set_attribute("num", "value", "42");
            let el = ElementHandle::new("num", "input");
            assert_eq!(driver.attribute(&el, "value").unwrap().as_deref(), Some("42"));
            assert_eq!(driver.attribute(&el, "placeholder").unwrap(), None);
        }
    }
}
