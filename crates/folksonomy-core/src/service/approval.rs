//! Approval workflow for tag-like records.
//!
//! `accept` and `reject` are unconditional: any state can move to any other
//! state, there is no idempotency guard and no optimistic locking. Each
//! transition is one write of the approval columns. Bulk actions repeat that
//! write per record, without a surrounding transaction.

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use folksonomy_types::error::{RepositoryError, TagError};
use folksonomy_types::tag::Taggable;

use crate::repository::approval::ApprovalStore;

/// One of the two approval operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalAction {
    Accept,
    Reject,
}

impl ApprovalAction {
    /// Imperative verb, as used in action descriptions ("Accept selected tags").
    pub fn verb(&self) -> &'static str {
        match self {
            ApprovalAction::Accept => "Accept",
            ApprovalAction::Reject => "Reject",
        }
    }

    /// Past tense, as used in result messages ("Accepted 3 tags.").
    pub fn past_tense(&self) -> &'static str {
        match self {
            ApprovalAction::Accept => "Accepted",
            ApprovalAction::Reject => "Rejected",
        }
    }

    fn apply<P>(&self, tag: &mut Taggable<P>) {
        let now = Utc::now();
        match self {
            ApprovalAction::Accept => tag.accept(now),
            ApprovalAction::Reject => tag.reject(now),
        }
    }
}

impl fmt::Display for ApprovalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApprovalAction::Accept => write!(f, "accept"),
            ApprovalAction::Reject => write!(f, "reject"),
        }
    }
}

impl FromStr for ApprovalAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "accept" => Ok(ApprovalAction::Accept),
            "reject" => Ok(ApprovalAction::Reject),
            other => Err(format!("unknown action: '{other}'")),
        }
    }
}

/// Outcome of a bulk action that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkActionReport {
    pub action: ApprovalAction,
    /// Number of records transitioned.
    pub processed: usize,
}

impl BulkActionReport {
    /// Admin message, e.g. "Accepted 3 tags.".
    pub fn message(&self, verbose_name_plural: &str) -> String {
        format!(
            "{} {} {}.",
            self.action.past_tense(),
            self.processed,
            verbose_name_plural
        )
    }
}

fn map_repo_error(e: RepositoryError) -> TagError {
    match e {
        RepositoryError::NotFound => TagError::NotFound,
        other => TagError::StorageError(other.to_string()),
    }
}

/// Apply one approval operation to a stored record and persist it.
pub async fn transition<S: ApprovalStore>(
    store: &S,
    id: &S::Id,
    action: ApprovalAction,
) -> Result<Taggable<S::Id>, TagError> {
    let mut tag = store
        .find_taggable(id)
        .await
        .map_err(map_repo_error)?
        .ok_or(TagError::NotFound)?;

    action.apply(&mut tag);

    store
        .save_approval(id, &tag)
        .await
        .map_err(map_repo_error)?;

    tracing::info!(%id, name = %tag.name, state = %tag.state, "{action} applied");
    Ok(tag)
}

/// Apply one approval operation to each record in turn.
///
/// Stops at the first failure. Records handled before it keep their new
/// state; the error carries how many that was.
pub async fn transition_many<S: ApprovalStore>(
    store: &S,
    ids: &[S::Id],
    action: ApprovalAction,
) -> Result<BulkActionReport, TagError> {
    let mut processed = 0;
    for id in ids {
        if let Err(e) = transition(store, id, action).await {
            tracing::warn!(%id, completed = processed, error = %e, "bulk {action} stopped");
            return Err(TagError::BulkActionAborted {
                completed: processed,
                reason: e.to_string(),
            });
        }
        processed += 1;
    }

    tracing::info!(processed, "bulk {action} finished");
    Ok(BulkActionReport { action, processed })
}
