//! Keyboard demo page.
//!
//! Three typed input fields; tapping any of them summons the software
//! keyboard, which is owned by an external page object. Text entry is
//! delegated entirely to that keyboard, this page only reads values back.

use super::{next_page, FromSession, Keyboard, Page};
use crate::locator::Locator;
use crate::result::TocarResult;
use crate::session::{FrameId, Session};

#[derive(Debug)]
struct KeyboardLocators {
    number_input: Locator,
    text_input: Locator,
    url_input: Locator,
}

impl KeyboardLocators {
    fn new() -> Self {
        Self {
            number_input: Locator::css("input[type=\"number\"]"),
            text_input: Locator::css("input[type=\"text\"]"),
            url_input: Locator::css("input[type=\"url\"]"),
        }
    }
}

/// Page object for the keyboard demo screen, scoped to the keyboard
/// test iframe.
#[derive(Debug)]
pub struct KeyboardPage {
    session: Session,
    locators: KeyboardLocators,
}

impl FromSession for KeyboardPage {
    fn from_session(session: Session) -> Self {
        Self {
            session,
            locators: KeyboardLocators::new(),
        }
    }
}

impl Page for KeyboardPage {
    fn name(&self) -> &str {
        "Keyboard"
    }

    fn frame_path(&self) -> Vec<FrameId> {
        vec![FrameId::App, FrameId::test("keyboard")]
    }
}

impl KeyboardPage {
    fn tap_input(&self, locator: &Locator) -> TocarResult<Keyboard> {
        self.session.require_frame(&self.frame_path())?;
        let input = self.session.find(locator.selector())?;
        self.session.tap(&input)?;
        Ok(next_page(&self.session))
    }

    fn input_value(&self, locator: &Locator) -> TocarResult<String> {
        self.session.require_frame(&self.frame_path())?;
        let input = self.session.find(locator.selector())?;
        Ok(self
            .session
            .attribute(&input, "value")?
            .unwrap_or_default())
    }

    /// Tap the number field; the software keyboard takes over
    pub fn tap_number_input(&self) -> TocarResult<Keyboard> {
        self.tap_input(&self.locators.number_input)
    }

    /// Current value of the number field
    pub fn number_input(&self) -> TocarResult<String> {
        self.input_value(&self.locators.number_input)
    }

    /// Tap the text field; the software keyboard takes over
    pub fn tap_text_input(&self) -> TocarResult<Keyboard> {
        self.tap_input(&self.locators.text_input)
    }

    /// Current value of the text field
    pub fn text_input(&self) -> TocarResult<String> {
        self.input_value(&self.locators.text_input)
    }

    /// Tap the url field; the software keyboard takes over
    pub fn tap_url_input(&self) -> TocarResult<Keyboard> {
        self.tap_input(&self.locators.url_input)
    }

    /// Current value of the url field
    pub fn url_input(&self) -> TocarResult<String> {
        self.input_value(&self.locators.url_input)
    }
}
