//! Learning site server: JSON API, server-rendered lesson pages, and CLI glue.

pub mod api;
pub mod config;
