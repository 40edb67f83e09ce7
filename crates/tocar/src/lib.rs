//! Tocar: page-object layer for mobile UI-test automation.
//!
//! Tocar (Spanish: "to touch/tap") models the screens of the UI Tests
//! application as page objects over a remote automation driver. Each page
//! bundles an immutable locator table with the taps, frame switches, and
//! polling waits that drive its screen; navigation methods return the page
//! object for whichever frame they entered.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     TOCAR Architecture                       │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐    ┌───────────────┐    ┌─────────────────┐   │
//! │  │ Page      │    │ Session       │    │ Driver          │   │
//! │  │ objects   │───►│ (frame stack, │───►│ (remote device, │   │
//! │  │           │    │  waits)       │    │  blocking RPC)  │   │
//! │  └───────────┘    └───────────────┘    └─────────────────┘   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The driver is an external collaborator behind the [`Driver`] trait; its
//! wire protocol is out of scope. The session mirrors the driver's frame
//! context explicitly, so a frame-scoped method used in the wrong context
//! fails with [`TocarError::StaleFrameContext`] rather than a misleading
//! element-not-found.
//!
//! Everything is synchronous and single-threaded: each call blocks until the
//! remote side replies, and failures propagate unmodified to the calling
//! test.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tocar::{FromSession, MockDriver, Session, UiTests};
//!
//! let driver = Arc::new(MockDriver::new());
//! let session = Session::new(driver);
//! let ui_tests = UiTests::from_session(session);
//! ui_tests.launch().expect("app launches");
//! ```

#![warn(missing_docs)]

mod driver;
mod gesture;
mod locator;
mod pages;
mod result;
mod session;

pub use driver::{Driver, ElementHandle, MockDriver};
pub use gesture::{Gesture, GestureStep, LONG_PRESS_DWELL_MS};
pub use locator::{
    Locator, LocatorOptions, Selector, DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_MS,
    EXTENDED_WAIT_TIMEOUT_MS, LAUNCH_TIMEOUT_MS,
};
pub use pages::{
    Activities, ContextmenuPage, FromSession, Keyboard, KeyboardPage, Page, PageInfo,
    PageRegistry, Persona, UiTests, UI_TESTS,
};
pub use result::{TocarError, TocarResult};
pub use session::{FrameId, Session};
