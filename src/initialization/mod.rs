//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - Logger (plain or JSON lines)
//! - HTTP sessions for archive requests
//! - The batch concurrency gate

mod client;
mod logger;

use std::sync::Arc;

use tokio::sync::Semaphore;

pub use client::init_client;
pub use logger::init_logger_with;

/// Initializes a semaphore bounding the number of domains analyzed at once.
pub fn init_semaphore(count: usize) -> Arc<Semaphore> {
    Arc::new(Semaphore::new(count.max(1)))
}
