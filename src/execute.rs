use crate::event::{Event, ItemKind};
use crate::github::client::{GitHubApi, ReviewEvent};
use crate::plan::ActionPlan;
use anyhow::Result;
use tracing::info;

/// Applies `plan` to the triggering item. The comment always goes out before the labels.
///
/// Each step is a single call. A failure stops the run without undoing what
/// was already posted.
pub async fn execute<A: GitHubApi>(api: &A, event: &Event, plan: &ActionPlan) -> Result<()> {
    if let (true, Some(body)) = (plan.should_comment, plan.comment_body.as_deref()) {
        info!(
            "Adding message: {body} to {} {}",
            event.kind.as_str(),
            event.number
        );
        match event.kind {
            ItemKind::Issue => {
                api.create_issue_comment(&event.repository, event.number, body)
                    .await?
            }
            ItemKind::PullRequest => {
                api.create_pull_request_review(
                    &event.repository,
                    event.number,
                    body,
                    ReviewEvent::Comment,
                )
                .await?
            }
        }
    }

    if !plan.labels_to_add.is_empty() {
        info!(
            "Adding labels: [{}] to first-time {}",
            plan.labels_to_add.join(","),
            event.kind.as_str()
        );
        api.add_labels(&event.repository, event.number, &plan.labels_to_add)
            .await?;
    }

    Ok(())
}
