// Library surface for the binary, headless integration tests and reuse.
pub mod analyzer;
pub mod app;
pub mod classify;
pub mod clock;
pub mod config;
pub mod error;
pub mod input;
pub mod metrics;
pub mod render;
pub mod runtime;
pub mod session;
pub mod snippets;
pub mod speed;
pub mod ui;

pub use error::{Error, Result};
