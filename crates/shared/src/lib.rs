//! Types shared by the game core and its front-ends.

pub mod domain;
pub mod error;
pub mod protocol;
