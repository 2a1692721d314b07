//! # System Prompts
//!
//! The four chatbot system prompts. Two of them embed a pretty-printed JSON
//! dump of the whole knowledge base; the dump is rendered once, when the
//! prompts are built.

use crate::types::KnowledgeBase;
use errors::{KnowledgeError, PromptError};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Conversation context selecting a system prompt.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    Default,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PromptContext {
    #[default]
    General,
    WithWebSearch,
    TechnicalHelp,
    BeginnerFriendly
}

impl PromptContext {
    /// Parse a context from its snake_case name.
    pub fn from_name(name: &str) -> Result<Self, PromptError> {
        name.parse::<Self>().map_err(|_| PromptError::UnknownContext {
            name: name.to_string()
        })
    }

    /// Whether the rendered prompt embeds the knowledge dump.
    pub fn embeds_knowledge(self) -> bool {
        matches!(self, Self::General | Self::WithWebSearch)
    }

    fn template(self) -> &'static str {
        match self {
            Self::General => GENERAL,
            Self::WithWebSearch => WITH_WEB_SEARCH,
            Self::TechnicalHelp => TECHNICAL_HELP,
            Self::BeginnerFriendly => BEGINNER_FRIENDLY
        }
    }
}

/// Rendered system prompts, one per [`PromptContext`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemPrompts {
    pub general: String,
    pub with_web_search: String,
    pub technical_help: String,
    pub beginner_friendly: String
}

impl SystemPrompts {
    /// Render every prompt against `knowledge`.
    pub fn build(knowledge: &KnowledgeBase) -> Result<Self, KnowledgeError> {
        let dump = render_knowledge(knowledge)?;
        let render = |context: PromptContext| context.template().replace("{knowledge}", &dump);

        Ok(Self {
            general: render(PromptContext::General),
            with_web_search: render(PromptContext::WithWebSearch),
            technical_help: render(PromptContext::TechnicalHelp),
            beginner_friendly: render(PromptContext::BeginnerFriendly)
        })
    }

    pub fn get(&self, context: PromptContext) -> &str {
        match context {
            PromptContext::General => &self.general,
            PromptContext::WithWebSearch => &self.with_web_search,
            PromptContext::TechnicalHelp => &self.technical_help,
            PromptContext::BeginnerFriendly => &self.beginner_friendly
        }
    }

    /// Look a prompt up by context name.
    pub fn by_name(&self, name: &str) -> Result<&str, PromptError> {
        PromptContext::from_name(name).map(|context| self.get(context))
    }

    /// The prompt the widget sends by default: the web-search variant when
    /// web search is on, the general one otherwise.
    pub fn for_web_search(&self, web_search_enabled: bool) -> &str {
        if web_search_enabled {
            &self.with_web_search
        } else {
            &self.general
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (PromptContext, &str)> {
        PromptContext::iter().map(move |context| (context, self.get(context)))
    }
}

/// Pretty JSON with two-space indentation, keys in declaration order.
pub fn render_knowledge(knowledge: &KnowledgeBase) -> Result<String, KnowledgeError> {
    serde_json::to_string_pretty(knowledge).map_err(|e| KnowledgeError::Serialization {
        reason: e.to_string()
    })
}

const GENERAL: &str = "\
Sei un assistente AI esperto di Data Pizza AI framework.
Informazioni chiave su Data Pizza:
{knowledge}

Rispondi sempre in italiano. Sii preciso, utile e professionale.
Usa le informazioni fornite per rispondere alle domande.
Se non conosci la risposta, suggerisci dove trovare l'informazione.";

const WITH_WEB_SEARCH: &str = "\
Sei un assistente AI esperto di Data Pizza AI framework con accesso alla ricerca web.
Informazioni chiave su Data Pizza:
{knowledge}

Rispondi sempre in italiano. Sii preciso, utile e professionale.
Usa le informazioni fornite e i risultati della ricerca web per rispondere alle domande.
Quando usi informazioni dalla ricerca, cita le fonti.
Se non conosci la risposta, suggerisci dove trovare l'informazione.";

const TECHNICAL_HELP: &str = "\
Sei un assistente tecnico specializzato in Data Pizza AI framework.
Fornisci soluzioni tecniche dettagliate, codice di esempio e best practices.
Usa le informazioni fornite per dare risposte tecniche precise.
Rispondi sempre in italiano.";

const BEGINNER_FRIENDLY: &str = "\
Sei un assistente AI che spiega Data Pizza AI framework in modo semplice e chiaro.
Usa analogie e esempi pratici per aiutare i principianti.
Rispondi sempre in italiano con un tono amichevole e incoraggiante.";

#[cfg(test)]
mod tests {
    use super::*;

    fn shipped() -> SystemPrompts {
        SystemPrompts::build(&KnowledgeBase::default()).unwrap()
    }

    #[test]
    fn test_general_prompt_frame() {
        let prompts = shipped();
        assert!(
            prompts
                .general
                .starts_with("Sei un assistente AI esperto di Data Pizza AI framework.")
        );
        assert!(prompts.general.contains("Rispondi sempre in italiano."));
        assert!(
            prompts
                .general
                .ends_with("Se non conosci la risposta, suggerisci dove trovare l'informazione.")
        );
    }

    #[test]
    fn test_knowledge_dump_embedded() {
        let prompts = shipped();
        let dump = render_knowledge(&KnowledgeBase::default()).unwrap();

        assert!(prompts.general.contains(&dump));
        assert!(prompts.with_web_search.contains(&dump));
        assert!(prompts.general.contains("\"name\": \"Datapizza AI\""));
        assert!(prompts.with_web_search.contains("Datapizza AI"));
    }

    #[test]
    fn test_short_prompts_skip_dump() {
        let prompts = shipped();
        assert!(!prompts.technical_help.contains("Datapizza AI"));
        assert!(!prompts.beginner_friendly.contains("Datapizza AI"));
        assert!(!prompts.technical_help.contains("{knowledge}"));
    }

    #[test]
    fn test_dump_layout() {
        let dump = render_knowledge(&KnowledgeBase::default()).unwrap();
        assert!(dump.starts_with("{\n  \"framework\": {\n    \"name\": \"Datapizza AI\","));
        assert!(dump.contains("\"basic_example\": \"\\nfrom datapizza.agents import Agent\\n"));
        assert!(dump.contains("Entità AI"));
        assert!(dump.ends_with("\n}"));

        let framework = dump.find("\"framework\"").unwrap();
        let providers = dump.find("\"providers\"").unwrap();
        let skills = dump.find("\"data_pizza_skills\"").unwrap();
        assert!(framework < providers && providers < skills);
    }

    #[test]
    fn test_dump_follows_knowledge() {
        let mut kb = KnowledgeBase::default();
        kb.framework.name = "Pizza Engine".to_string();

        let prompts = SystemPrompts::build(&kb).unwrap();
        assert!(prompts.general.contains("\"name\": \"Pizza Engine\""));
        assert!(!prompts.general.contains("\"name\": \"Datapizza AI\""));
    }

    #[test]
    fn test_context_names() {
        assert_eq!(PromptContext::General.to_string(), "general");
        assert_eq!(PromptContext::WithWebSearch.to_string(), "with_web_search");
        assert_eq!(
            PromptContext::from_name("beginner_friendly").unwrap(),
            PromptContext::BeginnerFriendly
        );
        assert_eq!(
            PromptContext::from_name("pirate"),
            Err(PromptError::UnknownContext {
                name: "pirate".to_string()
            })
        );
    }

    #[test]
    fn test_embeds_knowledge() {
        let embedding: Vec<_> = PromptContext::iter()
            .filter(|context| context.embeds_knowledge())
            .collect();
        assert_eq!(
            embedding,
            [PromptContext::General, PromptContext::WithWebSearch]
        );
    }

    #[test]
    fn test_by_name() {
        let prompts = shipped();
        assert_eq!(
            prompts.by_name("technical_help").unwrap(),
            prompts.technical_help
        );
        assert!(prompts.by_name("unknown").is_err());
    }

    #[test]
    fn test_for_web_search() {
        let prompts = shipped();
        assert_eq!(prompts.for_web_search(false), prompts.general);
        assert_eq!(prompts.for_web_search(true), prompts.with_web_search);
    }

    #[test]
    fn test_iter_covers_all_contexts() {
        let prompts = shipped();
        let contexts: Vec<_> = prompts.iter().map(|(context, _)| context).collect();
        assert_eq!(contexts.len(), 4);
        assert_eq!(contexts[0], PromptContext::General);
        assert!(prompts.iter().all(|(_, text)| text.contains("Rispondi sempre in italiano")));
    }

    #[test]
    fn test_build_is_deterministic() {
        assert_eq!(shipped(), shipped());
    }
}
