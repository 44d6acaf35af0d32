//! # hwbot-practicum
//!
//! Client for the Yandex Practicum `homework_statuses` API.

mod client;

pub use client::PracticumClient;
