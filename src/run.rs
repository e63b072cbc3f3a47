use crate::config::Config;
use crate::event::{Event, ItemKind, Trigger};
use crate::execute::execute;
use crate::github::classify::is_first_contribution;
use crate::github::client::{DEFAULT_API_URL, GitHubApi, RestClient};
use crate::plan::{self, ActionPlan, Decision};
use anyhow::{Context, Result};
use std::fmt;
use tracing::info;

/// Why a run ended without doing anything. None of these are failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotOpened,
    NotIssueOrPullRequest,
    NotFirstContribution,
    NoMessage(ItemKind),
}

impl SkipReason {
    pub fn message(&self) -> &'static str {
        match self {
            SkipReason::NotOpened => "No issue or PR was opened, skipping",
            SkipReason::NotIssueOrPullRequest => {
                "The event that triggered this action was not a pull request or issue, skipping."
            }
            SkipReason::NotFirstContribution => "Not the users first contribution",
            SkipReason::NoMessage(_) => "No message provided for this type of contribution",
        }
    }
}

/// Fatal conditions detected by the gate itself, as opposed to remote failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateError {
    /// Inputs are unusable. Raised before any remote call.
    Config(String),
    /// The platform delivered an event that qualifies but lacks required fields.
    MalformedTrigger(String),
}

impl fmt::Display for GateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateError::Config(message) | GateError::MalformedTrigger(message) => {
                write!(f, "{message}")
            }
        }
    }
}

impl std::error::Error for GateError {}

#[derive(Debug, Clone, PartialEq)]
pub enum Validation {
    Skip(SkipReason),
    Proceed(Event),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Skipped(SkipReason),
    Responded(ActionPlan),
}

impl Outcome {
    pub fn message(&self) -> String {
        match self {
            Outcome::Skipped(reason) => reason.message().to_string(),
            Outcome::Responded(plan) if plan.labels_to_add.is_empty() => {
                "Greeted first-time contributor".to_string()
            }
            Outcome::Responded(plan) => format!(
                "Greeted first-time contributor and added labels [{}]",
                plan.labels_to_add.join(",")
            ),
        }
    }
}

/// Applies the event guards in order: action verb, payload shape, sender.
///
/// The first two are skips. A qualifying event without a sender, number or
/// repository is a malformed trigger.
pub fn validate(trigger: &Trigger, debug_mode: bool) -> Result<Validation> {
    if trigger.action.as_deref() != Some("opened") && !debug_mode {
        return Ok(Validation::Skip(SkipReason::NotOpened));
    }

    let Some(subject) = trigger.subject else {
        return Ok(Validation::Skip(SkipReason::NotIssueOrPullRequest));
    };

    let Some(sender) = trigger.sender.clone() else {
        return Err(GateError::MalformedTrigger(
            "Internal error, no sender provided by GitHub".to_string(),
        )
        .into());
    };

    let Some(number) = subject.number else {
        return Err(GateError::MalformedTrigger(format!(
            "Internal error, no {} number provided by GitHub",
            subject.kind.as_str()
        ))
        .into());
    };

    let Some(repository) = trigger.repository.clone() else {
        return Err(GateError::MalformedTrigger(
            "Internal error, no repository provided by GitHub".to_string(),
        )
        .into());
    };

    Ok(Validation::Proceed(Event {
        kind: subject.kind,
        action: trigger.action.clone().unwrap_or_default(),
        number,
        sender,
        repository,
    }))
}

/// One full pass: validate, classify, plan, execute.
///
/// Any error leaves already-applied side effects in place.
pub async fn run<A: GitHubApi>(api: &A, config: &Config, trigger: &Trigger) -> Result<Outcome> {
    config.ensure_message()?;

    let event = match validate(trigger, config.debug_mode)? {
        Validation::Skip(reason) => return Ok(Outcome::Skipped(reason)),
        Validation::Proceed(event) => event,
    };

    info!(
        action = %event.action,
        sender = %event.sender,
        number = event.number,
        "Checking if its the users first contribution"
    );
    let is_first = is_first_contribution(
        api,
        &event.repository,
        event.kind,
        &event.sender,
        event.number,
        config.max_pages,
    )
    .await?;

    let action_plan = match plan::plan(event.kind, is_first, config.debug_mode, config) {
        Decision::Skip(reason) => return Ok(Outcome::Skipped(reason)),
        Decision::Respond(action_plan) => action_plan,
    };

    execute(api, &event, &action_plan).await?;
    Ok(Outcome::Responded(action_plan))
}

/// Reads the payload and API location from the runner environment, then runs.
pub async fn run_from_env<F>(config: &Config, lookup: F) -> Result<Outcome>
where
    F: Fn(&str) -> Option<String>,
{
    let event_path = lookup("GITHUB_EVENT_PATH").context("GITHUB_EVENT_PATH is not set")?;
    let content = tokio::fs::read_to_string(&event_path)
        .await
        .with_context(|| format!("Failed to read event payload {event_path}"))?;
    let payload: serde_json::Value =
        serde_json::from_str(&content).context("Failed to parse event payload JSON")?;
    let trigger = Trigger::from_payload(&payload, lookup("GITHUB_REPOSITORY").as_deref());

    let api_url = lookup("GITHUB_API_URL")
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let api = RestClient::new(&api_url, &config.repo_token)?;

    run(&api, config, &trigger).await
}
