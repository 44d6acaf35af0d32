//! # hwbot-core
//!
//! Core types, traits, configuration, and error handling for the homework bot.

pub mod clock;
pub mod config;
pub mod error;
pub mod homework;
pub mod traits;
