//! Common library for the ripple application
//!
//! This crate provides shared infrastructure used by the ripple services:
//! database connectivity, configuration, and error handling.

pub mod database;
pub mod error;
