pub mod article;
pub mod config;
pub mod error;
pub mod llm;
pub mod models;
pub mod prompts;
pub mod service;
pub mod synthesis;
pub mod tasks;
pub mod transcript;
pub mod validator;
pub mod workflow;

#[cfg(test)]
mod testing;

pub use config::ServiceConfig;
pub use service::{AppState, build_app, create_app};
pub use workflow::{build_review_workflow, create_flow_runner, create_review_session};
pub use models::*;
