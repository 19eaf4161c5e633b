//! Background Tasks Module
//!
//! Contains background tasks that run periodically during proxy operation.
//!
//! # Tasks
//! - Expiry sweeper: removes expired local cache entries at configured intervals

mod cleanup;

pub use cleanup::spawn_expiry_sweeper;
