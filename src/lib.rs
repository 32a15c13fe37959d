pub mod bank;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod keyboard;
pub mod matcher;
pub mod replies;
pub mod runner;
pub mod schema;
pub mod selector;
pub mod state;
pub mod store;
pub mod transport;

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync + 'static>>;
