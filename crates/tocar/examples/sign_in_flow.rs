//! Drives the identity sign-in flow end to end against the mock driver.
//!
//! Usage:
//!   cargo run --example sign_in_flow
//!   RUST_LOG=tocar=debug cargo run --example sign_in_flow

use std::sync::Arc;

use tocar::{
    ElementHandle, FromSession, MockDriver, PageRegistry, Selector, Session, TocarResult, UiTests,
};

fn scripted_driver() -> Arc<MockDriver> {
    let driver = Arc::new(MockDriver::new());
    driver.add_element(
        Selector::css("iframe[src*=\"identity\"]"),
        ElementHandle::new("identity-frame", "iframe"),
    );
    driver.add_element(
        Selector::css("#t-request"),
        ElementHandle::new("request-button", "button"),
    );
    driver.add_element(
        Selector::css("#t-logout"),
        ElementHandle::new("logout-button", "button"),
    );
    driver.add_element(
        Selector::css("li.logout"),
        ElementHandle::new("logout-event", "li"),
    );
    driver.set_elements(
        Selector::css("li.login div.assertion"),
        vec![
            ElementHandle::new("assertion-1", "div").with_text("eyJhbGciOi...first"),
            ElementHandle::new("assertion-2", "div").with_text("eyJhbGciOi...latest"),
        ],
    );
    driver
}

fn main() -> TocarResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tocar=info".into()),
        )
        .init();

    let driver = scripted_driver();
    let session = Session::new(driver.clone());
    let ui_tests = UiTests::from_session(session);

    let mut registry = PageRegistry::new();
    registry.register("ui-tests", UiTests::from_session(Session::new(driver.clone())));
    println!("registered pages: {:?}", registry.list());

    println!("launching {}...", tocar::UI_TESTS);
    ui_tests.launch()?;

    println!("requesting standard sign-in...");
    let _persona = ui_tests.launch_standard_sign_in()?;

    println!("logging out and reading the final assertion...");
    ui_tests.tap_logout_button()?;
    ui_tests.wait_for_logout_event()?;
    let assertion = ui_tests.get_assertion()?;
    println!("last login assertion: {assertion}");

    println!("\ndriver calls recorded: {}", driver.history().len());
    Ok(())
}
