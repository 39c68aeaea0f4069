#![doc = "The `taskdesk` library crate."]
#![doc = ""]
#![doc = "Domain models, credential checks, data access, routing configuration and error"]
#![doc = "handling for the task board backend. The binary (`main.rs`) loads configuration,"]
#![doc = "picks a store and serves the routes defined here."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;

pub use crate::error::AppError;
pub use crate::state::AppState;
