// Request/response models for the HTTP API
pub mod common;
pub mod items;
