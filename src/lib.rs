//! Site language switcher library
//!
//! Swaps the visible text of a static page between pre-translated
//! bundles without a reload. Compiled to wasm32 for the browser; native
//! builds back the tests and the demo binary.

pub mod applier;
pub mod controller;
pub mod core;
pub mod dom;
pub mod i18n;
pub mod prefs;
pub mod switcher;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use controller::{ClickTarget, Controller, Phase};
