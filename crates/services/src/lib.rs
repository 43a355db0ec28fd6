#![forbid(unsafe_code)]

pub mod app_services;
pub mod content_service;
pub mod error;
pub mod progress_tracker;

pub use app_services::{AppServices, ProgressBackend, SharedProgress};
pub use content_service::ContentService;
pub use error::{AppServicesError, ContentError, ProgressError};
pub use progress_tracker::ProgressTracker;
