pub mod config;
pub mod errors;
pub mod extraction;
pub mod intake;
pub mod llm_client;
pub mod models;
pub mod routes;
pub mod state;
pub mod summarize;
