//! Result and error types for Tocar.

use thiserror::Error;

/// Result type for Tocar operations
pub type TocarResult<T> = Result<T, TocarError>;

/// Errors that can occur while driving the application under test.
///
/// No error is caught or retried inside this layer; every failure propagates
/// unmodified to the calling test.
#[derive(Debug, Error)]
pub enum TocarError {
    /// Locator resolved to zero elements
    #[error("Element not found: {selector}")]
    ElementNotFound {
        /// Selector that matched nothing
        selector: String,
    },

    /// Element exists but did not become visible within the allotted time
    #[error("Element {selector} not visible within {ms}ms")]
    VisibilityTimeout {
        /// Selector that was waited on
        selector: String,
        /// Wait budget in milliseconds
        ms: u64,
    },

    /// Application did not reach first paint within the launch budget
    #[error("Application {app} failed to launch within {ms}ms")]
    LaunchTimeout {
        /// Name of the application under test
        app: String,
        /// Launch budget in milliseconds
        ms: u64,
    },

    /// A polled condition did not become true within the allotted time
    #[error("Timed out after {ms}ms waiting for {condition}")]
    WaitTimeout {
        /// Description of the awaited condition
        condition: String,
        /// Wait budget in milliseconds
        ms: u64,
    },

    /// A composite press/hold/release sequence failed partway
    #[error("Gesture failed: {message}")]
    GestureFailure {
        /// Driver-reported failure detail
        message: String,
    },

    /// A frame-scoped operation ran while the frame stack did not match
    /// its expected prefix
    #[error("Stale frame context: expected [{expected}], current [{actual}]")]
    StaleFrameContext {
        /// Frame path the operation requires
        expected: String,
        /// Frame path the session is actually in
        actual: String,
    },

    /// `get_assertion` was called before a logout event guaranteed the
    /// event log had settled
    #[error("Login assertions have not settled: wait for a logout event first")]
    AssertionsNotSettled,

    /// Script evaluation in the page failed
    #[error("Script execution failed: {message}")]
    ScriptError {
        /// Driver-reported failure detail
        message: String,
    },

    /// Driver-level fault outside the taxonomy above
    #[error("Driver error: {message}")]
    DriverError {
        /// Driver-reported failure detail
        message: String,
    },

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
