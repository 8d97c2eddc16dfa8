//! Embassy tasks

pub mod display_tx;
pub mod engine;
