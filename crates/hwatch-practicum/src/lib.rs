//! # hwatch-practicum
//!
//! Client for the Practicum homework status API.

mod client;

pub use client::PracticumClient;
