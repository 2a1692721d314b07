//! # Chatbot Store Errors
//!
//! Error types shared by the configuration, knowledge and prompt crates.
//!
//! - Uses `thiserror` for structured error definitions
//! - Every variant carries named fields so messages stay self-describing
//! - Secret values never appear in any message

use thiserror::Error;

/// Errors raised while assembling the chatbot settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing secret: environment variable {variable} is not set or empty")]
    MissingSecret { variable: String },

    #[error("Invalid value for {key}: {value:?} ({reason})")]
    InvalidEnvValue {
        key: String,
        value: String,
        reason: String
    },

    #[error("Configuration validation failed: {message}")]
    Validation { message: String },

    #[error("Config file {path}: {reason}")]
    File { path: String, reason: String },

    #[error(transparent)]
    Knowledge(#[from] KnowledgeError)
}

/// Errors raised while loading or serializing the knowledge base.
#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("Knowledge file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse {format} knowledge file: {reason}")]
    Parse { format: String, reason: String },

    #[error("Unsupported knowledge file format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Knowledge file has no extension")]
    NoExtension,

    #[error("Knowledge serialization failed: {reason}")]
    Serialization { reason: String }
}

/// Errors raised when looking up prompt templates.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromptError {
    #[error("Unknown prompt context: {name}")]
    UnknownContext { name: String }
}
