//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Apply platform gates before destructive operations.

pub mod admin_service;
