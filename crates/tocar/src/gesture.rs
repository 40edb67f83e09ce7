//! Composite pointer gestures.
//!
//! A [`Gesture`] is built step by step (press, pause, release) and performed
//! as a single driver action with no intermediate observation point. The only
//! caller-visible outcome is success or a [`crate::result::TocarError::GestureFailure`];
//! there is no partial-completion signal.

use crate::driver::ElementHandle;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Dwell used for long-press gestures (1 second)
pub const LONG_PRESS_DWELL_MS: u64 = 1_000;

/// One step of a composite gesture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GestureStep {
    /// Press and hold at the element
    Press {
        /// Element the pointer goes down on
        element: ElementHandle,
    },
    /// Keep the pointer down for the given duration
    Pause {
        /// Hold duration in milliseconds
        duration_ms: u64,
    },
    /// Lift the pointer
    Release,
}

/// Builder for an ordered sequence of gesture steps.
#[derive(Debug, Clone, Default)]
pub struct Gesture {
    steps: Vec<GestureStep>,
}

impl Gesture {
    /// Start an empty gesture
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A press / 1 s dwell / release sequence on the element
    #[must_use]
    pub fn long_press(element: &ElementHandle) -> Self {
        Self::new()
            .press(element)
            .pause(Duration::from_millis(LONG_PRESS_DWELL_MS))
            .release()
    }

    /// Press and hold at the element
    #[must_use]
    pub fn press(mut self, element: &ElementHandle) -> Self {
        self.steps.push(GestureStep::Press {
            element: element.clone(),
        });
        self
    }

    /// Hold for the given duration
    #[must_use]
    pub fn pause(mut self, duration: Duration) -> Self {
        self.steps.push(GestureStep::Pause {
            duration_ms: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
        });
        self
    }

    /// Lift the pointer
    #[must_use]
    pub fn release(mut self) -> Self {
        self.steps.push(GestureStep::Release);
        self
    }

    /// The ordered steps
    #[must_use]
    pub fn steps(&self) -> &[GestureStep] {
        &self.steps
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_long_press_shape() {
        let body = ElementHandle::new("body-section", "section");
        let gesture = Gesture::long_press(&body);

        assert_eq!(gesture.steps().len(), 3);
        assert!(matches!(gesture.steps()[0], GestureStep::Press { .. }));
        assert_eq!(
            gesture.steps()[1],
            GestureStep::Pause {
                duration_ms: LONG_PRESS_DWELL_MS
            }
        );
        assert_eq!(gesture.steps()[2], GestureStep::Release);
    }

    #[test]
    fn test_press_records_element() {
        let el = ElementHandle::new("e9", "section");
        let gesture = Gesture::new().press(&el).release();
        match &gesture.steps()[0] {
            GestureStep::Press { element } => assert_eq!(element.id, "e9"),
            other => panic!("unexpected step {other:?}"),
        }
    }
}
