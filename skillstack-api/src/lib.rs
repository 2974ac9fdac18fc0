//! SkillStack API client library
//!
//! An async client for the JSON endpoints the SkillStack pages call while the
//! user types: username availability, link previews, the unread-message count
//! and a couple of fire-and-forget updates. The username endpoint plugs into
//! [`fieldcheck`] as a [`fieldcheck::field::RemoteCheck`].

pub mod api;
pub mod config;
pub mod error;
pub mod poll;

mod client;

pub use client::*;
