//! Core library for the Gummy Mummy maternal-care advisory service.
//!
//! The advice engine maps per-topic questionnaire submissions ("sections")
//! to a scored, diagnosed, textual recommendation. Everything around it is
//! deliberately thin plumbing: registration, opaque bearer credentials, and
//! an append-only SQLite archive of submissions and results.

pub mod auth;
pub mod config;
pub mod engine;
pub mod error;
pub mod profile;
pub mod service;
pub mod store;
pub mod telemetry;
