//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate fetch, reconciliation and persistence into use-case APIs.
//! - Keep CLI and other front ends decoupled from storage and transport.

pub mod archive_service;
