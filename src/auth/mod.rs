//! # Session and Authorization Module
//!
//! The client-side session core: the persisted token slot, claims decoding,
//! session evaluation, and the guard that gates protected surfaces. No
//! component here performs network calls; authorization is derived from the
//! stored token on every check.

pub mod claims;
pub mod guard;
pub mod session;
pub mod store;
