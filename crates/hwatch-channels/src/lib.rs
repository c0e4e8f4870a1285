//! # hwatch-channels
//!
//! Notification channels for hwatch.

pub mod notifier;
pub mod telegram;

pub use notifier::{DeliveryResult, Notifier};
