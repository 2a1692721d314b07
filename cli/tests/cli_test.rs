use assert_cmd::{Command, cargo_bin_cmd};
use knowledge::{KnowledgeBase, SystemPrompts};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn chatbot() -> Command {
    let mut cmd = cargo_bin_cmd!("datapizza-chatbot");
    cmd.env("NO_COLOR", "1")
        .env_remove("MISTRAL_API_KEY")
        .env_remove("CHATBOT_CONFIG_FILE")
        .env_remove("CHATBOT_API_MODEL")
        .env_remove("CHATBOT_API_KEY_ENV")
        .env_remove("CHATBOT_API_TEMPERATURE")
        .env_remove("CHATBOT_WEB_SEARCH_ENABLED");
    cmd
}

#[test]
fn test_help_lists_commands() {
    chatbot()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("prompt"))
        .stdout(predicate::str::contains("knowledge"))
        .stdout(predicate::str::contains("contexts"));
}

#[test]
fn test_show_defaults() {
    chatbot()
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Chatbot Settings"))
        .stdout(predicate::str::contains("magistral-medium-2507"))
        .stdout(predicate::str::contains("DuckDuckGo"))
        .stdout(predicate::str::contains("missing"))
        .stdout(predicate::str::contains("MISTRAL_API_KEY"));
}

#[test]
fn test_show_json_never_prints_key() {
    chatbot()
        .env("MISTRAL_API_KEY", "sk-very-secret")
        .args(["show", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"model\": \"magistral-medium-2507\""))
        .stdout(predicate::str::contains("\"api_key_present\": true"))
        .stdout(predicate::str::contains("sk-very-secret").not());
}

#[test]
fn test_show_precedence() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("chatbot.yaml");
    fs::write(
        &config_file,
        "api:\n  model: file-model\n  max_tokens: 321\nui:\n  position: top-left\n"
    )
    .unwrap();

    chatbot()
        .env("CHATBOT_API_MODEL", "env-model")
        .args(["show", "--json", "--config"])
        .arg(&config_file)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"model\": \"env-model\""))
        .stdout(predicate::str::contains("\"max_tokens\": 321"))
        .stdout(predicate::str::contains("\"position\": \"top-left\""));

    chatbot()
        .env("CHATBOT_API_MODEL", "env-model")
        .args(["show", "--json", "--model", "flag-model", "--config"])
        .arg(&config_file)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"model\": \"flag-model\""));
}

#[test]
fn test_show_invalid_env_value() {
    chatbot()
        .env("CHATBOT_API_TEMPERATURE", "warm")
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("CHATBOT_API_TEMPERATURE"));
}

#[test]
fn test_validate_requires_key() {
    chatbot()
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("API key not found in MISTRAL_API_KEY"));
}

#[test]
fn test_validate_ok() {
    chatbot()
        .env("MISTRAL_API_KEY", "sk-test")
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("https://api.mistral.ai/v1/chat/completions"));
}

#[test]
fn test_validate_counts_prompt_characters() {
    let prompts = SystemPrompts::build(&KnowledgeBase::default()).unwrap();
    let chars = prompts.general.chars().count();
    assert_ne!(chars, prompts.general.len());

    chatbot()
        .env("MISTRAL_API_KEY", "sk-test")
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("{chars} chars")));

    chatbot()
        .env("MISTRAL_API_KEY", "sk-test")
        .args(["validate", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("\"general\": {chars}")));
}

#[test]
fn test_validate_rejects_nan_temperature() {
    chatbot()
        .env("MISTRAL_API_KEY", "sk-test")
        .args(["validate", "--json", "--temperature", "NaN"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"valid\": false"));
}

#[test]
fn test_validate_rejects_out_of_range_flag() {
    chatbot()
        .env("MISTRAL_API_KEY", "sk-test")
        .args(["validate", "--json", "--temperature", "3.5"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"valid\": false"))
        .stdout(predicate::str::contains("temperature"));
}

#[test]
fn test_validate_unsupported_knowledge_file() {
    let temp_dir = TempDir::new().unwrap();
    let knowledge_file = temp_dir.path().join("knowledge.ini");
    fs::write(&knowledge_file, "name = x").unwrap();

    chatbot()
        .env("MISTRAL_API_KEY", "sk-test")
        .args(["validate", "--knowledge"])
        .arg(&knowledge_file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot load the knowledge base"));
}

#[test]
fn test_prompt_general() {
    chatbot()
        .args(["prompt", "general"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Sei un assistente AI esperto di Data Pizza AI framework."
        ))
        .stdout(predicate::str::contains("\"name\": \"Datapizza AI\""))
        .stdout(predicate::str::contains("Rispondi sempre in italiano."));
}

#[test]
fn test_prompt_beginner_has_no_dump() {
    chatbot()
        .args(["prompt", "beginner_friendly"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"framework\"").not());
}

#[test]
fn test_prompt_unknown_context() {
    chatbot()
        .args(["prompt", "casual"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown prompt context: 'casual'"))
        .stderr(predicate::str::contains("with_web_search"));
}

#[test]
fn test_knowledge_section_json() {
    chatbot()
        .args(["knowledge", "--json", "--section", "framework"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"Datapizza AI\""))
        .stdout(predicate::str::contains("\"quick_start\"").not());
}

#[test]
fn test_knowledge_unknown_section() {
    chatbot()
        .args(["knowledge", "--section", "menu"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown knowledge section: 'menu'"));
}

#[test]
fn test_knowledge_summary() {
    chatbot()
        .arg("knowledge")
        .assert()
        .success()
        .stdout(predicate::str::contains("Datapizza AI"))
        .stdout(predicate::str::contains("pip install datapizza-ai"));
}

#[test]
fn test_contexts() {
    chatbot()
        .args(["contexts", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"general\""))
        .stdout(predicate::str::contains("\"name\": \"technical_help\""))
        .stdout(predicate::str::contains("\"embeds_knowledge\": false"));
}
