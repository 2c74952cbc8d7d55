//! Server API
//!
//! Browser transport for the chat endpoints.

pub mod client;

pub use client::GlooChatApi;
