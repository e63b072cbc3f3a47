use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, warn};

/// A prior issue or pull request, as returned by a listing endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryItem {
    pub number: u64,
    pub author: String,
    /// Set for entries of the issues listing that are really pull requests.
    pub is_pull_request: bool,
}

#[derive(Deserialize, Debug)]
struct ListingUser {
    login: String,
}

/// One entry of an issues or pull requests listing.
#[derive(Deserialize, Debug)]
struct ListingItem {
    number: u64,
    user: ListingUser,
    #[serde(default)]
    pull_request: Option<serde_json::Value>,
}

/// Maps a listing page to history items.
///
/// Any entry without a number or an author login fails the whole page.
pub fn parse_history_items(items_json: &[serde_json::Value]) -> Result<Vec<HistoryItem>> {
    items_json
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let item = ListingItem::deserialize(item)
                .with_context(|| format!("Unexpected listing entry at index {index}"))?;
            Ok(HistoryItem {
                number: item.number,
                author: item.user.login,
                is_pull_request: item.pull_request.is_some(),
            })
        })
        .collect()
}

/// A paged collection of issues or pull requests for one repository.
#[allow(async_fn_in_trait)]
pub trait HistorySource {
    /// Whether `fetch_page` already restricts results to the author being scanned.
    fn supports_author_filter(&self) -> bool;

    /// Fetches one page, starting at 1. An empty page means the collection is exhausted.
    async fn fetch_page(&self, page: u32) -> Result<Vec<HistoryItem>>;
}

/// True when `item` is a strictly earlier contribution by `author`.
///
/// The triggering item itself never matches because of the strict `<`.
pub fn precedes(item: &HistoryItem, author: &str, triggering_number: u64, filtered: bool) -> bool {
    item.number < triggering_number && !item.is_pull_request && (filtered || item.author == author)
}

/// Walks `source` page by page and reports whether `author` has no earlier item.
///
/// Returns `false` as soon as a page holds an earlier item by the author, and
/// `true` once a page comes back empty. When `max_pages` is reached first the
/// scan gives up and answers `false`, so nothing gets posted on a guess.
pub async fn scan<S>(
    source: &S,
    author: &str,
    triggering_number: u64,
    max_pages: Option<u32>,
) -> Result<bool>
where
    S: HistorySource,
{
    let filtered = source.supports_author_filter();
    let mut page = 1;

    loop {
        if max_pages.is_some_and(|limit| page > limit) {
            warn!(
                author,
                pages = page - 1,
                "Page limit reached before history was exhausted, treating as returning contributor"
            );
            return Ok(false);
        }

        debug!(author, page, "Checking...");
        let items = source.fetch_page(page).await?;

        if items.is_empty() {
            return Ok(true);
        }

        if let Some(prior) = items
            .iter()
            .find(|item| precedes(item, author, triggering_number, filtered))
        {
            debug!(author, prior = prior.number, "Found earlier contribution");
            return Ok(false);
        }

        page += 1;
    }
}
