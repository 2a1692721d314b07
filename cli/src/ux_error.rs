use colored::Colorize;
use errors::{ConfigError, KnowledgeError};

#[derive(Debug)]
pub struct UxError {
    pub what: String,
    pub why: Option<String>,
    pub how_to_fix: Vec<String>,
    pub suggested_command: Option<String>
}

impl UxError {
    pub fn new(what: impl Into<String>) -> Self {
        Self {
            what: what.into(),
            why: None,
            how_to_fix: Vec::new(),
            suggested_command: None
        }
    }

    pub fn why(mut self, reason: impl Into<String>) -> Self {
        self.why = Some(reason.into());
        self
    }

    pub fn fix(mut self, suggestion: impl Into<String>) -> Self {
        self.how_to_fix.push(suggestion.into());
        self
    }

    pub fn suggest(mut self, cmd: impl Into<String>) -> Self {
        self.suggested_command = Some(cmd.into());
        self
    }

    pub fn display(&self) {
        eprintln!();
        eprintln!("{} {}", "error:".red().bold(), self.what.white().bold());

        if let Some(why) = &self.why {
            eprintln!("       {}", why.dimmed());
        }

        if !self.how_to_fix.is_empty() {
            eprintln!();
            eprintln!("{}", "How to fix:".yellow().bold());
            for (i, fix) in self.how_to_fix.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, fix);
            }
        }

        if let Some(cmd) = &self.suggested_command {
            eprintln!();
            eprintln!("{}", "Try this:".green().bold());
            eprintln!("  $ {}", cmd.cyan());
        }
        eprintln!();
    }

    /// Print to stderr and terminate with exit code 1.
    pub fn exit(&self) -> ! {
        self.display();
        std::process::exit(1)
    }
}

impl std::fmt::Display for UxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.what)
    }
}

impl std::error::Error for UxError {}

pub fn from_config_error(error: &ConfigError) -> UxError {
    match error {
        ConfigError::MissingSecret { variable } => missing_api_key(variable),
        ConfigError::InvalidEnvValue { key, reason, .. } => invalid_env_value(key, reason),
        ConfigError::Validation { message } => invalid_settings(message),
        ConfigError::File { path, reason } => settings_file_error(path, reason),
        ConfigError::Knowledge(inner) => knowledge_file_error(inner)
    }
}

pub fn missing_api_key(variable: &str) -> UxError {
    UxError::new(format!("API key not found in {}", variable))
        .why("The chatbot needs a language-model API key and none was supplied")
        .fix(format!("Export the key: export {}=<your-key>", variable))
        .fix("Or point CHATBOT_API_KEY_ENV at the variable that holds it")
        .suggest("datapizza-chatbot validate")
}

pub fn invalid_env_value(key: &str, reason: &str) -> UxError {
    UxError::new(format!("Invalid value in {}", key))
        .why(reason.to_string())
        .fix(format!("Correct or unset {}", key))
        .suggest("datapizza-chatbot show")
}

pub fn invalid_settings(message: &str) -> UxError {
    UxError::new("Settings failed validation")
        .why(message.to_string())
        .fix("Check the settings file and CHATBOT_* variables")
        .suggest("datapizza-chatbot show --json")
}

pub fn settings_file_error(path: &str, reason: &str) -> UxError {
    UxError::new(format!("Cannot load settings from '{}'", path))
        .why(reason.to_string())
        .fix("Settings files must be TOML (.toml) or YAML (.yaml, .yml)")
        .fix("Check that the file exists and is readable")
}

pub fn knowledge_file_error(error: &KnowledgeError) -> UxError {
    UxError::new("Cannot load the knowledge base")
        .why(error.to_string())
        .fix("Knowledge files must be JSON, TOML or YAML with the shipped schema")
        .suggest("datapizza-chatbot knowledge --json")
}

pub fn unknown_context(name: &str, valid: &[String]) -> UxError {
    UxError::new(format!("Unknown prompt context: '{}'", name))
        .why(format!("Valid contexts are: {}", valid.join(", ")))
        .fix("Use one of the listed context names")
        .suggest("datapizza-chatbot contexts")
}

pub fn unknown_section(name: &str, valid: &[&str]) -> UxError {
    let err = UxError::new(format!("Unknown knowledge section: '{}'", name))
        .why(format!("Valid sections are: {}", valid.join(", ")))
        .fix("Use one of the listed section names");
    match valid.first() {
        Some(first) => err.suggest(format!("datapizza-chatbot knowledge --section {}", first)),
        None => err
    }
}
