//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`.

pub mod apply;
pub mod auth;
pub mod change_password;
pub mod home;
pub mod officer;
pub mod profile;
pub mod role_landing;
pub mod subsidies;
