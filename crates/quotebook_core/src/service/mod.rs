//! Core use-case services.
//!
//! # Responsibility
//! - Compose validation and repository calls into use-case level APIs.
//! - Keep boundary layers decoupled from storage details.

pub mod quote_service;
