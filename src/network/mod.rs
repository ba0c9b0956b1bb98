pub mod client;
pub mod error;
pub mod worker;

pub use client::ApiClient;
pub use error::ApiError;
pub use worker::ApiWorker;
