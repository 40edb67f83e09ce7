//! Contextmenu demo page.
//!
//! One interactive body region that responds to a long press by opening the
//! system activity chooser.

use super::{next_page, Activities, FromSession, Page};
use crate::gesture::Gesture;
use crate::locator::Locator;
use crate::result::{TocarError, TocarResult};
use crate::session::{FrameId, Session};

#[derive(Debug)]
struct ContextmenuLocators {
    body: Locator,
}

impl ContextmenuLocators {
    fn new() -> Self {
        Self {
            body: Locator::css("body > section"),
        }
    }
}

/// Page object for the contextmenu demo screen, scoped to the contextmenu
/// test iframe.
#[derive(Debug)]
pub struct ContextmenuPage {
    session: Session,
    locators: ContextmenuLocators,
}

impl FromSession for ContextmenuPage {
    fn from_session(session: Session) -> Self {
        Self {
            session,
            locators: ContextmenuLocators::new(),
        }
    }
}

impl Page for ContextmenuPage {
    fn name(&self) -> &str {
        "Contextmenu"
    }

    fn frame_path(&self) -> Vec<FrameId> {
        vec![FrameId::App, FrameId::test("contextmenu")]
    }
}

impl ContextmenuPage {
    /// Long-press the body region and hand control to the activity chooser.
    ///
    /// Blocks until the region reports itself displayed, then performs
    /// press / 1 s dwell / release as one composite driver action. Any fault
    /// along the way is a gesture failure; no chooser handle is returned.
    pub fn long_press_contextmenu_body(&self) -> TocarResult<Activities> {
        self.session.require_frame(&self.frame_path())?;
        let body_locator = &self.locators.body;
        self.session.wait_until(
            "contextmenu body displayed",
            body_locator.options().timeout,
            body_locator.options().poll_interval,
            |session| {
                Ok(session
                    .find_all(body_locator.selector())?
                    .first()
                    .is_some_and(|el| el.displayed))
            },
        )?;
        let body = self.session.find(body_locator.selector())?;
        self.session
            .perform(&Gesture::long_press(&body))
            .map_err(|err| match err {
                gesture @ TocarError::GestureFailure { .. } => gesture,
                other => TocarError::GestureFailure {
                    message: other.to_string(),
                },
            })?;
        Ok(next_page(&self.session))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::driver::{ElementHandle, MockDriver};
    use crate::locator::Selector;
    use std::sync::Arc;

    fn scoped_page() -> (Arc<MockDriver>, ContextmenuPage) {
        let driver = Arc::new(MockDriver::new());
        let session = Session::new(driver.clone());
        session.enter_app_frame().unwrap();
        driver.add_element(
            Selector::css("#test-iframe[src*='contextmenu']"),
            ElementHandle::new("cm-frame", "iframe"),
        );
        session
            .enter_frame(
                &Selector::css("#test-iframe[src*='contextmenu']"),
                FrameId::test("contextmenu"),
            )
            .unwrap();
        let page = ContextmenuPage::from_session(session);
        (driver, page)
    }

    #[test]
    fn test_long_press_performs_composite_gesture() {
        let (driver, page) = scoped_page();
        driver.add_element(
            Selector::css("body > section"),
            ElementHandle::new("body-section", "section"),
        );

        let activities: Activities = page.long_press_contextmenu_body().unwrap();

        // press + pause + release issued as one driver action
        assert!(driver.was_called("perform_gesture:3"));
        assert_eq!(
            activities.session().frame_path(),
            vec![FrameId::App, FrameId::test("contextmenu")]
        );
    }

    #[test]
    fn test_long_press_waits_for_body_visibility() {
        let (driver, page) = scoped_page();
        let sel = Selector::css("body > section");
        driver.add_element(sel.clone(), ElementHandle::new("body-section", "section"));
        driver.set_displayed_after(sel, 2);

        assert!(page.long_press_contextmenu_body().is_ok());
    }

    #[test]
    fn test_disappearing_target_is_gesture_failure() {
        let (driver, page) = scoped_page();
        driver.add_element(
            Selector::css("body > section"),
            ElementHandle::new("body-section", "section"),
        );
        driver.fail_gesture_with("target detached during gesture");

        let err = page.long_press_contextmenu_body().unwrap_err();
        match err {
            TocarError::GestureFailure { message } => {
                assert!(message.contains("target detached"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_unscoped_session_is_stale_context() {
        let driver = Arc::new(MockDriver::new());
        let page = ContextmenuPage::from_session(Session::new(driver));
        let err = page.long_press_contextmenu_body().unwrap_err();
        assert!(matches!(err, TocarError::StaleFrameContext { .. }));
    }
}
