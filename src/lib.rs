//! Reporting backend for AI-assisted debugging runs: ingests debug reports
//! and serves per-configuration averages and run-to-run stability.

pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod errors;
pub mod ingest;
pub mod models;
pub mod stats;
