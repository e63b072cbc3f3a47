use crate::config::Config;
use crate::event::ItemKind;
use crate::run::SkipReason;

/// The side effects a run will apply.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ActionPlan {
    pub should_comment: bool,
    pub comment_body: Option<String>,
    pub labels_to_add: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    Skip(SkipReason),
    Respond(ActionPlan),
}

/// Decides what to do for an item of `kind` given the classification result.
///
/// `debug_mode` gets past the first-contribution check but never past a
/// missing message.
pub fn plan(kind: ItemKind, is_first: bool, debug_mode: bool, config: &Config) -> Decision {
    if !is_first && !debug_mode {
        return Decision::Skip(SkipReason::NotFirstContribution);
    }

    match config.message_for(kind) {
        None | Some("") => Decision::Skip(SkipReason::NoMessage(kind)),
        Some(message) => Decision::Respond(ActionPlan {
            should_comment: true,
            comment_body: Some(message.to_string()),
            labels_to_add: config.labels_for(kind).to_vec(),
        }),
    }
}
