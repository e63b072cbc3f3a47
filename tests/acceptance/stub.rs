use anyhow::Result;
use greet::event::Repository;
use greet::github::client::{GitHubApi, ReviewEvent};
use greet::github::history::{HistoryItem, parse_history_items};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListIssues { creator: Option<String>, page: u32 },
    ListPullRequests { page: u32 },
    Comment { number: u64, body: String },
    Review { number: u64, body: String, event: ReviewEvent },
    AddLabels { number: u64, labels: Vec<String> },
}

impl Call {
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Call::Comment { .. } | Call::Review { .. } | Call::AddLabels { .. }
        )
    }
}

/// In-memory repository that pages like the REST API and records every call.
#[derive(Debug)]
pub struct StubApi {
    pub issues: Vec<HistoryItem>,
    pub pulls: Vec<HistoryItem>,
    pub per_page: usize,
    pub issue_listing_status: Option<u16>,
    /// Raw entries served instead of `issues`, mapped the way the REST client maps them.
    pub issue_listing_body: Option<Vec<serde_json::Value>>,
    pub calls: Mutex<Vec<Call>>,
}

impl Default for StubApi {
    fn default() -> Self {
        StubApi {
            issues: Vec::new(),
            pulls: Vec::new(),
            per_page: 100,
            issue_listing_status: None,
            issue_listing_body: None,
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl StubApi {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn writes(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_write).collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().expect("calls lock").push(call);
    }

    fn page(&self, items: Vec<HistoryItem>, page: u32) -> Vec<HistoryItem> {
        items
            .chunks(self.per_page)
            .nth(page as usize - 1)
            .map(<[HistoryItem]>::to_vec)
            .unwrap_or_default()
    }
}

impl GitHubApi for StubApi {
    async fn list_issues(
        &self,
        _repository: &Repository,
        creator: Option<&str>,
        page: u32,
    ) -> Result<Vec<HistoryItem>> {
        self.record(Call::ListIssues {
            creator: creator.map(str::to_string),
            page,
        });
        if let Some(status) = self.issue_listing_status {
            return Err(anyhow::anyhow!(
                "Received unexpected API status code {status}"
            ));
        }
        if let Some(body) = &self.issue_listing_body {
            return parse_history_items(body);
        }
        let items = self
            .issues
            .iter()
            .filter(|item| creator.is_none_or(|creator| item.author == creator))
            .cloned()
            .collect();
        Ok(self.page(items, page))
    }

    async fn list_pull_requests(
        &self,
        _repository: &Repository,
        page: u32,
    ) -> Result<Vec<HistoryItem>> {
        self.record(Call::ListPullRequests { page });
        Ok(self.page(self.pulls.clone(), page))
    }

    async fn create_issue_comment(
        &self,
        _repository: &Repository,
        number: u64,
        body: &str,
    ) -> Result<()> {
        self.record(Call::Comment {
            number,
            body: body.to_string(),
        });
        Ok(())
    }

    async fn create_pull_request_review(
        &self,
        _repository: &Repository,
        number: u64,
        body: &str,
        event: ReviewEvent,
    ) -> Result<()> {
        self.record(Call::Review {
            number,
            body: body.to_string(),
            event,
        });
        Ok(())
    }

    async fn add_labels(
        &self,
        _repository: &Repository,
        number: u64,
        labels: &[String],
    ) -> Result<()> {
        self.record(Call::AddLabels {
            number,
            labels: labels.to_vec(),
        });
        Ok(())
    }
}
