pub mod action_executor;
pub mod config;
pub mod contract;
pub mod error;
pub mod icons;
pub mod logging;
pub mod model;
pub mod parser;
pub mod projection;
pub mod query_dsl;
pub mod query_router;
pub mod ranking_tool;
pub mod runtime;
pub mod transport;
