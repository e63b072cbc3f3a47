use serde_json::Value;

/// The two kinds of item that can trigger a greeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Issue,
    PullRequest,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Issue => "issue",
            ItemKind::PullRequest => "pull request",
        }
    }
}

/// Repository coordinates used in every API path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub owner: String,
    pub name: String,
}

impl Repository {
    /// Parses `owner/name` as found in `GITHUB_REPOSITORY`.
    pub fn parse(full_name: &str) -> Option<Repository> {
        let (owner, name) = full_name.trim().split_once('/')?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return None;
        }
        Some(Repository {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

/// The triggering item: what was opened and under which number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subject {
    pub kind: ItemKind,
    pub number: Option<u64>,
}

/// Raw view of the webhook payload, before any guard has been applied.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Trigger {
    pub action: Option<String>,
    pub subject: Option<Subject>,
    pub sender: Option<String>,
    pub repository: Option<Repository>,
}

/// A trigger that passed every guard. Immutable for the rest of the run.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub kind: ItemKind,
    pub action: String,
    pub number: u64,
    pub sender: String,
    pub repository: Repository,
}

impl Trigger {
    /// Reads the fields the gate cares about out of a webhook payload.
    ///
    /// `issue` wins over `pull_request` when both are present. The repository
    /// is taken from the payload first and from `repository_env`
    /// (`owner/name`) otherwise.
    pub fn from_payload(payload: &Value, repository_env: Option<&str>) -> Trigger {
        let subject = if payload["issue"].is_object() {
            Some(Subject {
                kind: ItemKind::Issue,
                number: payload["issue"]["number"]
                    .as_u64()
                    .or_else(|| payload["number"].as_u64()),
            })
        } else if payload["pull_request"].is_object() {
            Some(Subject {
                kind: ItemKind::PullRequest,
                number: payload["pull_request"]["number"]
                    .as_u64()
                    .or_else(|| payload["number"].as_u64()),
            })
        } else {
            None
        };

        let repository = match (
            payload["repository"]["owner"]["login"].as_str(),
            payload["repository"]["name"].as_str(),
        ) {
            (Some(owner), Some(name)) if !owner.is_empty() && !name.is_empty() => {
                Some(Repository {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => repository_env.and_then(Repository::parse),
        };

        Trigger {
            action: payload["action"].as_str().map(str::to_string),
            subject,
            sender: payload["sender"]["login"]
                .as_str()
                .filter(|login| !login.is_empty())
                .map(str::to_string),
            repository,
        }
    }
}
