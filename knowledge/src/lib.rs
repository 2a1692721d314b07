//! # Knowledge
//!
//! Knowledge base and system prompts of the Data Pizza chatbot.
//!
//! This crate provides:
//! - The typed knowledge tree and the shipped knowledge about Datapizza AI
//! - Loading an alternative knowledge base from JSON/TOML/YAML
//! - The four system prompts, rendered once from a knowledge base

pub mod loader;
pub mod prompts;
mod shipped;
pub mod types;

pub use loader::load_knowledge;
pub use prompts::{PromptContext, SystemPrompts, render_knowledge};
pub use types::{KnowledgeBase, SECTION_NAMES};
