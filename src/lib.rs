#![doc(test(attr(deny(warnings))))]

//! Onboarding Core offers the step models, flow control, and submission
//! primitives that power Saturn's KYC onboarding wizard and CLIs.

pub mod camera;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod flow;
pub mod gateway;
pub mod steps;
pub mod upload;
pub mod utils;
pub mod validation;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Onboarding Core tracing initialized.");
    });
}
