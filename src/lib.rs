pub mod api;
pub mod config;
pub mod core;
pub mod export;
pub mod gui;
pub mod narration;
pub mod persistence;

pub use crate::core::ReaderError;
