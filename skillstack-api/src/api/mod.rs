//! Endpoint calls, one module per page feature.

mod messages;
mod preview;
mod projects;
mod username;

pub use preview::*;
pub use username::*;
