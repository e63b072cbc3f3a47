use crate::event::ItemKind;
use crate::run::GateError;
use anyhow::Result;

/// Action inputs understood by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    DebugMode,
    IssueMessage,
    IssueLabels,
    PrMessage,
    PrLabels,
    RepoToken,
    MaxPages,
}

impl ConfigKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::DebugMode => "debug-mode",
            ConfigKey::IssueMessage => "issue-message",
            ConfigKey::IssueLabels => "issue-labels",
            ConfigKey::PrMessage => "pr-message",
            ConfigKey::PrLabels => "pr-labels",
            ConfigKey::RepoToken => "repo-token",
            ConfigKey::MaxPages => "max-pages",
        }
    }

    /// Environment variable the runner exposes the input under.
    ///
    /// Spaces become underscores and the name is upper-cased; hyphens stay.
    pub fn env_var(&self) -> String {
        format!("INPUT_{}", self.as_str().replace(' ', "_").to_uppercase())
    }

    /// Get all config keys
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::DebugMode,
            ConfigKey::IssueMessage,
            ConfigKey::IssueLabels,
            ConfigKey::PrMessage,
            ConfigKey::PrLabels,
            ConfigKey::RepoToken,
            ConfigKey::MaxPages,
        ]
    }
}

/// What to say, and which labels to attach, for one kind of item.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Response {
    pub message: Option<String>,
    pub labels: Vec<String>,
}

impl Response {
    pub fn new(message: &str, labels: &str) -> Response {
        Response {
            message: Some(message.to_string()).filter(|m| !m.is_empty()),
            labels: parse_labels(labels),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub debug_mode: bool,
    pub issue: Response,
    pub pull_request: Response,
    pub repo_token: String,
    /// Upper bound on history pages per scan. `None` scans to exhaustion.
    pub max_pages: Option<u32>,
}

impl Config {
    pub fn message_for(&self, kind: ItemKind) -> Option<&str> {
        self.response_for(kind).message.as_deref()
    }

    pub fn labels_for(&self, kind: ItemKind) -> &[String] {
        &self.response_for(kind).labels
    }

    fn response_for(&self, kind: ItemKind) -> &Response {
        match kind {
            ItemKind::Issue => &self.issue,
            ItemKind::PullRequest => &self.pull_request,
        }
    }

    /// At least one kind must have a message, otherwise the action can never do anything.
    pub fn ensure_message(&self) -> Result<()> {
        if self.issue.message.is_none() && self.pull_request.message.is_none() {
            return Err(GateError::Config(
                "Action must have at least one of issue-message or pr-message set".to_string(),
            )
            .into());
        }
        Ok(())
    }
}

/// Splits a comma-separated label input.
///
/// Segments are trimmed and empty ones dropped. Order and duplicates are kept.
pub fn parse_labels(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(key: ConfigKey, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "false" => Ok(false),
        "true" => Ok(true),
        other => Err(GateError::Config(format!(
            "Input {} must be true or false, got '{other}'",
            key.as_str()
        ))
        .into()),
    }
}

fn parse_max_pages(raw: &str) -> Result<Option<u32>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<u32>() {
        Ok(0) | Err(_) => Err(GateError::Config(format!(
            "Input {} must be a positive integer, got '{raw}'",
            ConfigKey::MaxPages.as_str()
        ))
        .into()),
        Ok(pages) => Ok(Some(pages)),
    }
}

/// Builds the run configuration from action inputs.
///
/// `lookup` resolves an environment variable name to its value, so callers
/// pass `std::env::var` in production and a map in tests. The message check
/// runs before the token check.
pub fn load_config<F>(lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let input = |key: ConfigKey| lookup(&key.env_var()).unwrap_or_default();

    let config = Config {
        debug_mode: parse_bool(ConfigKey::DebugMode, &input(ConfigKey::DebugMode))?,
        issue: Response::new(
            &input(ConfigKey::IssueMessage),
            &input(ConfigKey::IssueLabels),
        ),
        pull_request: Response::new(&input(ConfigKey::PrMessage), &input(ConfigKey::PrLabels)),
        repo_token: input(ConfigKey::RepoToken).trim().to_string(),
        max_pages: parse_max_pages(&input(ConfigKey::MaxPages))?,
    };

    config.ensure_message()?;

    if config.repo_token.is_empty() {
        return Err(GateError::Config(format!(
            "Input required and not supplied: {}",
            ConfigKey::RepoToken.as_str()
        ))
        .into());
    }

    Ok(config)
}
