//! Networking modules for the portal REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` issues HTTP calls, `error` classifies their failures, and `types`
//! defines the wire schema.

pub mod api;
pub mod error;
pub mod types;
