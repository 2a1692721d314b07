//! Shipped knowledge about the Datapizza AI framework.

use crate::types::{
    AgentCreatorSkill, AgentsConcept, BestPractices, CoreConcepts, Framework, Integrations, Issue,
    KnowledgeBase, ProviderProfile, Providers, QuickStart, RagConcept, Resources, Skills,
    ToolBuilderSkill, ToolsConcept, Troubleshooting
};

const BASIC_EXAMPLE: &str = r#"
from datapizza.agents import Agent
from datapizza.clients.openai import OpenAIClient
from datapizza.tools import tool

@tool
def get_weather(city: str) -> str:
    return f"The weather in {city} is sunny"

client = OpenAIClient(api_key="YOUR_API_KEY")
agent = Agent(name="assistant", client=client, tools=[get_weather])
response = agent.run("What is the weather in Rome?")"#;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn provider(models: &[&str], client: &str, features: &[&str]) -> ProviderProfile {
    ProviderProfile {
        models: strings(models),
        client: client.to_string(),
        features: strings(features)
    }
}

fn issue(problem: &str, solution: &str) -> Issue {
    Issue {
        problem: problem.to_string(),
        solution: solution.to_string()
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self {
            framework: Framework {
                name: "Datapizza AI".to_string(),
                description: "Framework GenAI Python con design 'less abstraction, more control'"
                    .to_string(),
                url: "https://github.com/datapizza-labs/datapizza-ai".to_string(),
                version: "Latest".to_string(),
                license: "MIT".to_string(),
                language: "Python".to_string()
            },
            quick_start: QuickStart {
                installation: "pip install datapizza-ai".to_string(),
                basic_example: BASIC_EXAMPLE.to_string()
            },
            core_concepts: CoreConcepts {
                agents: AgentsConcept {
                    definition: "Entità AI con capacità di utilizzare strumenti per compiti \
                                 specifici"
                        .to_string(),
                    use_cases: strings(&[
                        "Customer service",
                        "Research assistant",
                        "Code generation",
                        "Data analysis"
                    ]),
                    key_features: strings(&[
                        "Tool integration",
                        "Multi-provider support",
                        "Observability"
                    ])
                },
                tools: ToolsConcept {
                    definition: "Funzioni che gli agenti possono chiamare per interagire con \
                                 sistemi esterni"
                        .to_string(),
                    available_tools: strings(&[
                        "SQLDatabase - Operazioni database",
                        "DuckDuckGo - Ricerca web",
                        "FileSystem - Operazioni file",
                        "WebFetch - Contenuti web"
                    ])
                },
                rag: RagConcept {
                    definition: "Retrieval-Augmented Generation".to_string(),
                    components: strings(&["Vector stores", "Embeddings", "Rerankers"]),
                    vector_stores: strings(&["Qdrant", "ChromaDB"]),
                    use_cases: strings(&["Knowledge base", "Document Q&A", "Research"])
                }
            },
            providers: Providers {
                openai: provider(
                    &["gpt-4", "gpt-4-turbo", "gpt-3.5-turbo"],
                    "OpenAIClient",
                    &["Chat completions", "Function calling", "Embeddings"]
                ),
                anthropic: provider(
                    &["claude-3-opus", "claude-3-sonnet", "claude-3-haiku"],
                    "AnthropicClient",
                    &["Chat completions", "Vision"]
                ),
                google: provider(
                    &["gemini-pro", "gemini-pro-vision"],
                    "GoogleClient",
                    &["Chat completions", "Vision", "Function calling"]
                ),
                mistral: provider(
                    &["mistral-7b", "mixtral-8x7b", "magistral-medium-2507"],
                    "MistralClient",
                    &["Chat completions", "Function calling", "OCR"]
                ),
                azure: provider(
                    &["gpt-4", "gpt-35-turbo"],
                    "AzureOpenAIClient",
                    &["Chat completions", "Enterprise features"]
                )
            },
            integrations: Integrations {
                document_parsers: strings(&[
                    "Azure AI Document Intelligence",
                    "Docling",
                    "Custom parsers"
                ]),
                caching: strings(&["Redis integration", "In-memory caching"]),
                monitoring: strings(&[
                    "OpenTelemetry tracing",
                    "Performance metrics",
                    "Error tracking"
                ])
            },
            best_practices: BestPractices {
                development: strings(&[
                    "Use type hints for tool functions",
                    "Include proper error handling",
                    "Add comprehensive docstrings",
                    "Test tools with various inputs",
                    "Use environment variables for API keys"
                ]),
                production: strings(&[
                    "Implement logging and monitoring",
                    "Use connection pooling",
                    "Set appropriate timeouts",
                    "Implement rate limiting",
                    "Use proper error handling"
                ])
            },
            troubleshooting: Troubleshooting {
                common_issues: vec![
                    issue(
                        "API Key not found",
                        "Check environment variables and API key format"
                    ),
                    issue("Tool not working", "Verify tool syntax and imports"),
                    issue(
                        "Agent not responding",
                        "Check client configuration and network connectivity"
                    ),
                ]
            },
            resources: Resources {
                documentation: "https://docs.datapizza.ai".to_string(),
                examples: "https://github.com/datapizza-labs/datapizza-ai/tree/main/examples"
                    .to_string(),
                api_reference: "https://docs.datapizza.ai/api-reference".to_string(),
                community: "https://github.com/datapizza-labs/datapizza-ai/discussions".to_string()
            },
            data_pizza_skills: Skills {
                agent_creator: AgentCreatorSkill {
                    description: "Skill per creare agenti AI con Claude Code".to_string(),
                    features: strings(&[
                        "5+ pre-built templates",
                        "Multi-provider support",
                        "Production-ready error handling",
                        "Quick setup"
                    ]),
                    templates: strings(&[
                        "Customer service agent",
                        "E-commerce assistant",
                        "Research assistant",
                        "Document processor",
                        "RAG agent",
                        "Multi-agent system"
                    ])
                },
                tool_builder: ToolBuilderSkill {
                    description: "Skill per creare tools personalizzati".to_string(),
                    features: strings(&[
                        "Database tools",
                        "API integration tools",
                        "File system tools",
                        "Business logic tools",
                        "Utility tools"
                    ]),
                    patterns: strings(&[
                        "CRUD operations",
                        "REST API calls",
                        "File operations",
                        "Calculations and validation"
                    ])
                }
            }
        }
    }
}
