//! Client-side view state.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each module is a plain struct with transition methods. Pages wrap them in
//! `RwSignal`s (shared ones via context) so rendering stays reactive while the
//! rules themselves are testable without a browser.

pub mod application;
pub mod auth;
pub mod auth_wizard;
pub mod nav;
pub mod officer;
pub mod profile;
pub mod subsidies;
pub mod ui;
