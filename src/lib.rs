//! Core library for the `apiping` CLI.
//!
//! This crate provides the building blocks used by the binary: CLI argument
//! types, configuration loading, the HTTP transport port, run counters and
//! statistics, console reporting, and the paced request loop itself. The
//! primary user-facing interface is the `apiping` command-line application.
pub mod args;
pub mod config;
pub mod error;
pub mod http;
pub mod metrics;
pub mod report;
pub mod shutdown;
pub mod shutdown_handlers;
pub mod tester;
