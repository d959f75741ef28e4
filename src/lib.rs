//! Legal computation engines for Brazilian labor and criminal law.
//!
//! This crate provides deterministic calculators for labor-termination
//! settlements, criminal sentence dosimetry and statute-of-limitations
//! deadlines, plus an HTTP API exposing them.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
