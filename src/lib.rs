pub mod config;
pub mod document_verifier;
pub mod models;
pub mod processing;
pub mod report;
pub mod utils;
pub mod validation;

pub use config::Config;
pub use document_verifier::DocumentVerifier;
