use crate::event::Repository;
use crate::github::history::{HistoryItem, parse_history_items};
use anyhow::{Context, Result};
use serde::Serialize;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
const PER_PAGE: u32 = 100;
const USER_AGENT: &str = "greet-action";

/// Review type submitted alongside a pull request greeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewEvent {
    Comment,
}

/// The remote operations a run may perform.
///
/// Every method fails on an unexpected status instead of returning an empty value.
#[allow(async_fn_in_trait)]
pub trait GitHubApi {
    /// One page of issues, all states, optionally restricted to `creator`.
    async fn list_issues(
        &self,
        repository: &Repository,
        creator: Option<&str>,
        page: u32,
    ) -> Result<Vec<HistoryItem>>;

    /// One page of pull requests, all states. There is no author filter.
    async fn list_pull_requests(&self, repository: &Repository, page: u32)
    -> Result<Vec<HistoryItem>>;

    async fn create_issue_comment(
        &self,
        repository: &Repository,
        number: u64,
        body: &str,
    ) -> Result<()>;

    async fn create_pull_request_review(
        &self,
        repository: &Repository,
        number: u64,
        body: &str,
        event: ReviewEvent,
    ) -> Result<()>;

    async fn add_labels(&self, repository: &Repository, number: u64, labels: &[String])
    -> Result<()>;
}

#[derive(Serialize, Debug)]
struct CommentRequest<'a> {
    body: &'a str,
}

#[derive(Serialize, Debug)]
struct ReviewRequest<'a> {
    body: &'a str,
    event: ReviewEvent,
}

#[derive(Serialize, Debug)]
struct LabelsRequest<'a> {
    labels: &'a [String],
}

/// REST implementation of [`GitHubApi`].
pub struct RestClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl RestClient {
    pub fn new(base_url: &str, token: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(RestClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    fn repo_url(&self, repository: &Repository, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.base_url, repository.owner, repository.name, path
        )
    }

    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT)
    }

    async fn list(&self, url: &str, query: &[(&str, String)]) -> Result<Vec<HistoryItem>> {
        let response = self
            .request(reqwest::Method::GET, url)
            .query(query)
            .send()
            .await
            .with_context(|| format!("Failed to request {url}"))?;

        if response.status() != reqwest::StatusCode::OK {
            return Err(anyhow::anyhow!(
                "Received unexpected API status code {}",
                response.status().as_u16()
            ));
        }

        let items = response
            .json::<Vec<serde_json::Value>>()
            .await
            .context("Failed to parse listing response")?;
        parse_history_items(&items)
    }

    async fn submit<T: Serialize>(&self, url: &str, body: &T, operation: &str) -> Result<()> {
        let response = self
            .request(reqwest::Method::POST, url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to {operation}"))?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "Failed to {operation}: HTTP {}",
                response.status()
            ));
        }
        Ok(())
    }
}

impl GitHubApi for RestClient {
    async fn list_issues(
        &self,
        repository: &Repository,
        creator: Option<&str>,
        page: u32,
    ) -> Result<Vec<HistoryItem>> {
        let mut query = vec![
            ("state", "all".to_string()),
            ("per_page", PER_PAGE.to_string()),
            ("page", page.to_string()),
        ];
        if let Some(creator) = creator {
            query.push(("creator", creator.to_string()));
        }
        self.list(&self.repo_url(repository, "issues"), &query)
            .await
    }

    async fn list_pull_requests(
        &self,
        repository: &Repository,
        page: u32,
    ) -> Result<Vec<HistoryItem>> {
        let query = [
            ("state", "all".to_string()),
            ("per_page", PER_PAGE.to_string()),
            ("page", page.to_string()),
        ];
        self.list(&self.repo_url(repository, "pulls"), &query).await
    }

    async fn create_issue_comment(
        &self,
        repository: &Repository,
        number: u64,
        body: &str,
    ) -> Result<()> {
        let url = self.repo_url(repository, &format!("issues/{number}/comments"));
        self.submit(&url, &CommentRequest { body }, "create issue comment")
            .await
    }

    async fn create_pull_request_review(
        &self,
        repository: &Repository,
        number: u64,
        body: &str,
        event: ReviewEvent,
    ) -> Result<()> {
        let url = self.repo_url(repository, &format!("pulls/{number}/reviews"));
        self.submit(
            &url,
            &ReviewRequest { body, event },
            "create pull request review",
        )
        .await
    }

    async fn add_labels(
        &self,
        repository: &Repository,
        number: u64,
        labels: &[String],
    ) -> Result<()> {
        let url = self.repo_url(repository, &format!("issues/{number}/labels"));
        self.submit(&url, &LabelsRequest { labels }, "add labels")
            .await
    }
}
