use crate::event::{ItemKind, Repository};
use crate::github::client::GitHubApi;
use crate::github::history::{HistoryItem, HistorySource, scan};
use anyhow::Result;

/// Issues listing, filtered server-side by creator. May contain pull requests.
pub struct IssueHistory<'a, A> {
    pub api: &'a A,
    pub repository: &'a Repository,
    pub creator: &'a str,
}

impl<A: GitHubApi> HistorySource for IssueHistory<'_, A> {
    fn supports_author_filter(&self) -> bool {
        true
    }

    async fn fetch_page(&self, page: u32) -> Result<Vec<HistoryItem>> {
        self.api
            .list_issues(self.repository, Some(self.creator), page)
            .await
    }
}

/// Pull request listing. Every item has to be checked for authorship.
pub struct PullRequestHistory<'a, A> {
    pub api: &'a A,
    pub repository: &'a Repository,
}

impl<A: GitHubApi> HistorySource for PullRequestHistory<'_, A> {
    fn supports_author_filter(&self) -> bool {
        false
    }

    async fn fetch_page(&self, page: u32) -> Result<Vec<HistoryItem>> {
        self.api.list_pull_requests(self.repository, page).await
    }
}

/// Whether `number` is the earliest item of `kind` that `author` opened in `repository`.
pub async fn is_first_contribution<A: GitHubApi>(
    api: &A,
    repository: &Repository,
    kind: ItemKind,
    author: &str,
    number: u64,
    max_pages: Option<u32>,
) -> Result<bool> {
    match kind {
        ItemKind::Issue => {
            let source = IssueHistory {
                api,
                repository,
                creator: author,
            };
            scan(&source, author, number, max_pages).await
        }
        ItemKind::PullRequest => {
            let source = PullRequestHistory { api, repository };
            scan(&source, author, number, max_pages).await
        }
    }
}
