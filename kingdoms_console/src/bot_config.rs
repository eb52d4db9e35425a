use anyhow::{Context, ensure};
use log::{info, warn};
use serde::{Deserialize, Serialize};


// Set by the hosting platform. Without it we are running locally and read secrets from `.env`.
pub const DEPLOYMENT_FLAG: &str = "HEROKU";
pub const DEFAULT_TOKEN_VAR: &str = "DISCORD_TOKEN";

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum StringSource {
    Literal(String),
    EnvVar(String),
    File(String),
}

impl StringSource {
    pub fn get(&self) -> anyhow::Result<String> {
        match self {
            Self::Literal(s) => Ok(s.clone()),
            Self::EnvVar(v) => {
                std::env::var(v).context(format!("Missing environment variable '{v}'."))
            }
            Self::File(f) => {
                std::fs::read_to_string(f).context(format!("Failed to read file '{f}'."))
            }
        }
    }
}

fn default_token_source() -> StringSource { StringSource::EnvVar(DEFAULT_TOKEN_VAR.to_owned()) }

fn default_channel() -> String { "#kingdoms".to_owned() }

fn accepts_direct_messages_by_default() -> bool { true }

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct MemberConfig {
    pub id: u64,
    pub name: String,
    #[serde(default = "accepts_direct_messages_by_default")]
    pub accepts_direct_messages: bool,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct BotConfig {
    #[serde(default = "default_token_source")]
    pub token: StringSource,
    #[serde(default = "default_channel")]
    pub channel: String,
    // Who is speaking when an input line has no `Name:` prefix.
    pub default_invoker: String,
    pub members: Vec<MemberConfig>,
}

pub fn read_config_file(filename: &str) -> anyhow::Result<BotConfig> {
    let contents = std::fs::read_to_string(filename)
        .context(format!("Failed to read config file '{filename}'."))?;
    parse_config(&contents).context(format!("Failed to parse config file '{filename}'."))
}

pub fn parse_config(contents: &str) -> anyhow::Result<BotConfig> {
    let config: BotConfig = serde_yaml::from_str(contents)?;
    ensure!(
        config.members.iter().any(|m| m.name == config.default_invoker),
        "Default invoker '{}' is not a member.",
        config.default_invoker
    );
    Ok(config)
}

pub fn load_token(source: &StringSource) -> anyhow::Result<String> {
    if std::env::var_os(DEPLOYMENT_FLAG).is_none() {
        info!("Loading debug environment!");
        if let Err(err) = dotenvy::dotenv() {
            warn!("Could not load .env file: {err}");
        }
    }
    let token = source.get().context("Cannot read bot token.")?;
    validate_token(&token)
}

pub fn validate_token(token: &str) -> anyhow::Result<String> {
    let token = token.trim();
    ensure!(!token.is_empty(), "Bot token is empty.");
    ensure!(!token.contains(char::is_whitespace), "Bot token must not contain whitespace.");
    Ok(token.to_owned())
}
