//! # Knowledge File Loading
//!
//! Loads a knowledge base from a JSON, TOML or YAML file. The file must use
//! the same schema as the shipped knowledge.

use crate::types::KnowledgeBase;
use errors::KnowledgeError;
use std::path::Path;
use tracing::{debug, info};

/// Load the knowledge base from `path`, or the shipped knowledge when `path`
/// is `None`.
///
/// ## Supported Formats
/// - `.json`
/// - `.toml`
/// - `.yaml` / `.yml`
///
/// ## Error Handling
/// Returns `KnowledgeError` for a missing file, an unsupported or missing
/// extension, and parse failures of the detected format.
pub fn load_knowledge(path: Option<&Path>) -> Result<KnowledgeBase, KnowledgeError> {
    let Some(path) = path else {
        debug!("Using shipped knowledge base");
        return Ok(KnowledgeBase::default());
    };

    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or(KnowledgeError::NoExtension)?
        .to_lowercase();

    let contents = std::fs::read_to_string(path).map_err(|_e| KnowledgeError::FileNotFound {
        path: path.display().to_string()
    })?;

    let knowledge = parse_knowledge(&contents, &extension)?;
    info!(
        "Loaded knowledge base '{}' from {}",
        knowledge.framework.name,
        path.display()
    );
    Ok(knowledge)
}

fn parse_knowledge(contents: &str, extension: &str) -> Result<KnowledgeBase, KnowledgeError> {
    match extension {
        "json" => serde_json::from_str(contents).map_err(|e| KnowledgeError::Parse {
            format: "JSON".to_string(),
            reason: e.to_string()
        }),
        "toml" => toml::from_str(contents).map_err(|e| KnowledgeError::Parse {
            format: "TOML".to_string(),
            reason: e.to_string()
        }),
        "yaml" | "yml" => serde_yaml::from_str(contents).map_err(|e| KnowledgeError::Parse {
            format: "YAML".to_string(),
            reason: e.to_string()
        }),
        other => Err(KnowledgeError::UnsupportedFormat {
            extension: other.to_string()
        })
    }
}
