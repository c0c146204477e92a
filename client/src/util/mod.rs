//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns from page and component
//! logic so validation, formatting and session storage stay testable natively.

pub mod auth;
pub mod format;
pub mod storage;
pub mod validate;
