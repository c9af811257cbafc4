//! # userdesk
//!
//! Client library and terminal console for a user/role administration
//! backend: authentication, a self-service profile, and admin management of
//! users and roles over a REST API.
//!
//! ## Architecture
//! The crate is organized into modules:
//! - `auth`: the session core — token store, claims decoding, session
//!   evaluation, and the access guard
//! - `client`: the HTTP gateway that attaches the bearer token and handles
//!   authorization failures
//! - `api`: typed endpoint wrappers over the backend's response envelope
//! - `cli`: the subcommand surface of the console binary
//! - `config`: environment variable configuration
//!
//! Authorization is purely token-derived: every guarded check re-reads the
//! persisted token, decodes its claims, and compares expiry and role. A 401
//! from the backend clears the session and redirects to login.

pub mod api;
pub mod auth;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;

pub use client::ApiClient;
pub use error::{Error, Result};
