pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::{agent, tooling, tools};
pub use domain::types;
pub use infrastructure::{model, retrieval, server};
