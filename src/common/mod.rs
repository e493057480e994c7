//! Common types shared across the replacer.
//!
//! This module contains the primitives the policy engine is built on:
//! - Configuration ([`ReplacerConfig`])
//! - Error types
//! - Identifiers ([`FrameId`])

pub mod config;
pub mod error;
mod frame_id;

pub use config::ReplacerConfig;
pub use error::{Error, Result};
pub use frame_id::FrameId;
