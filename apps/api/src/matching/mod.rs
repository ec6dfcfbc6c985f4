//! Match-request orchestration: contract models, the orchestrator, the
//! presentation formatter, and the HTTP handler.

pub mod formatter;
pub mod handlers;
pub mod models;
pub mod orchestrator;
