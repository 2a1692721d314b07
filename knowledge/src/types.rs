//! # Knowledge Base Structures
//!
//! Typed tree describing the Datapizza AI framework. The tree is purely
//! descriptive: no field references another sub-tree.
//!
//! Field declaration order is the serialization order, so the JSON dump
//! embedded in the prompts keeps the section order below.

use serde::{Deserialize, Serialize};

/// Top-level section names, in serialization order.
pub const SECTION_NAMES: [&str; 9] = [
    "framework",
    "quick_start",
    "core_concepts",
    "providers",
    "integrations",
    "best_practices",
    "troubleshooting",
    "resources",
    "data_pizza_skills"
];

/// Knowledge injected into the chatbot system prompts.
///
/// `Default` yields the shipped knowledge (see `shipped.rs`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    pub framework: Framework,
    pub quick_start: QuickStart,
    pub core_concepts: CoreConcepts,
    pub providers: Providers,
    pub integrations: Integrations,
    pub best_practices: BestPractices,
    pub troubleshooting: Troubleshooting,
    pub resources: Resources,
    pub data_pizza_skills: Skills
}

impl KnowledgeBase {
    /// Returns one top-level section as a JSON value, or `None` for an
    /// unknown section name.
    pub fn section(&self, name: &str) -> Option<serde_json::Value> {
        if !SECTION_NAMES.contains(&name) {
            return None;
        }
        serde_json::to_value(self)
            .ok()
            .and_then(|mut value| value.get_mut(name).map(serde_json::Value::take))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Framework {
    pub name: String,
    pub description: String,
    pub url: String,
    pub version: String,
    pub license: String,
    pub language: String
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickStart {
    pub installation: String,
    pub basic_example: String
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreConcepts {
    pub agents: AgentsConcept,
    pub tools: ToolsConcept,
    pub rag: RagConcept
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentsConcept {
    pub definition: String,
    pub use_cases: Vec<String>,
    pub key_features: Vec<String>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolsConcept {
    pub definition: String,
    pub available_tools: Vec<String>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RagConcept {
    pub definition: String,
    pub components: Vec<String>,
    pub vector_stores: Vec<String>,
    pub use_cases: Vec<String>
}

/// Capability table of the supported LLM providers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Providers {
    pub openai: ProviderProfile,
    pub anthropic: ProviderProfile,
    pub google: ProviderProfile,
    pub mistral: ProviderProfile,
    pub azure: ProviderProfile
}

impl Providers {
    /// Provider profiles keyed by provider name, in serialization order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ProviderProfile)> {
        [
            ("openai", &self.openai),
            ("anthropic", &self.anthropic),
            ("google", &self.google),
            ("mistral", &self.mistral),
            ("azure", &self.azure)
        ]
        .into_iter()
    }

    /// Finds the provider whose client class is `client`.
    pub fn by_client(&self, client: &str) -> Option<&ProviderProfile> {
        self.iter()
            .map(|(_, profile)| profile)
            .find(|profile| profile.client == client)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderProfile {
    pub models: Vec<String>,
    pub client: String,
    pub features: Vec<String>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Integrations {
    pub document_parsers: Vec<String>,
    pub caching: Vec<String>,
    pub monitoring: Vec<String>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestPractices {
    pub development: Vec<String>,
    pub production: Vec<String>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Troubleshooting {
    pub common_issues: Vec<Issue>
}

/// A troubleshooting question/answer pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub problem: String,
    pub solution: String
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resources {
    pub documentation: String,
    pub examples: String,
    pub api_reference: String,
    pub community: String
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skills {
    pub agent_creator: AgentCreatorSkill,
    pub tool_builder: ToolBuilderSkill
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentCreatorSkill {
    pub description: String,
    pub features: Vec<String>,
    pub templates: Vec<String>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolBuilderSkill {
    pub description: String,
    pub features: Vec<String>,
    pub patterns: Vec<String>
}
