//! Background Tasks Module
//!
//! # Tasks
//! - Cache purge: drops expired cached responses at a configured interval

mod cleanup;

pub use cleanup::spawn_cleanup_task;
