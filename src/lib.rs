pub mod apis;
pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod filter;
pub mod grouping;
pub mod infra;
pub mod logging;
pub mod parser;
pub mod pipeline;
pub mod reconcile;
pub mod storage;
pub mod types;
