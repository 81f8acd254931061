//! Domain services used by page, API and live-feed routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own business logic and persistence concerns so route
//! handlers can stay focused on protocol translation and auth plumbing.

pub mod auth;
pub mod feed;
pub mod forum;
pub mod recommend;
pub mod session;
