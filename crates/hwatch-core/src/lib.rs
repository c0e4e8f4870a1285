//! # hwatch-core
//!
//! Core types, traits, configuration, and error handling for hwatch.

pub mod catalog;
pub mod config;
pub mod error;
pub mod message;
pub mod review;
pub mod traits;
