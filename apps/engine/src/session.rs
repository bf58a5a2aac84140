//! Tailoring sessions: one generation-and-review cycle against a specific
//! job description.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::apply::{apply_suggestions, ApplyOutcome};
use crate::generation::SuggestionBatch;
use crate::models::cv::ParsedCV;
use crate::models::suggestion::{CVSection, Suggestion, SuggestionStatus};

/// AI sessions included in the free tier, per calendar month.
pub const FREE_TIER_SESSIONS_PER_MONTH: u32 = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionSession {
    pub id: Uuid,
    pub user_id: Uuid,
    pub cv_id: Uuid,
    pub job_description: String,
    pub company_name: Option<String>,
    pub position: Option<String>,
    pub job_url: Option<String>,
    pub suggestions: Vec<Suggestion>,
    pub tokens_used: u32,
    pub created_at: DateTime<Utc>,
}

/// Inputs for opening a session, minus what the generation result carries.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub user_id: Uuid,
    pub cv_id: Uuid,
    pub job_description: String,
    pub company_name: Option<String>,
    pub position: Option<String>,
    pub job_url: Option<String>,
}

/// One review decision to merge into a stored session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub id: String,
    pub status: SuggestionStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionStats {
    pub accepted: usize,
    pub rejected: usize,
    pub pending: usize,
    pub total: usize,
}

impl SuggestionSession {
    /// Opens a session around a freshly generated batch. The analysis block
    /// is returned to the caller separately and is not stored.
    pub fn new(params: NewSession, batch: SuggestionBatch) -> SuggestionSession {
        SuggestionSession {
            id: Uuid::new_v4(),
            user_id: params.user_id,
            cv_id: params.cv_id,
            job_description: params.job_description,
            company_name: params.company_name,
            position: params.position,
            job_url: params.job_url,
            suggestions: batch.suggestions,
            tokens_used: batch.tokens_used,
            created_at: Utc::now(),
        }
    }

    /// Records one decision. Returns false when the id is not in the batch.
    pub fn set_status(&mut self, id: &str, status: SuggestionStatus) -> bool {
        match self.suggestions.iter_mut().find(|s| s.id == id) {
            Some(suggestion) => {
                suggestion.status = status;
                true
            }
            None => false,
        }
    }

    /// Applies one decision to every suggestion still pending. Suggestions
    /// the user already decided are left alone.
    pub fn decide_pending(&mut self, status: SuggestionStatus) {
        for suggestion in &mut self.suggestions {
            if suggestion.status == SuggestionStatus::Pending {
                suggestion.status = status;
            }
        }
    }

    /// Merges review decisions by id. Updates naming unknown ids are
    /// dropped; stored suggestions without an update keep their status.
    pub fn merge_statuses(&mut self, updates: &[StatusUpdate]) {
        let mut merged = 0;
        for update in updates {
            if self.set_status(&update.id, update.status) {
                merged += 1;
            }
        }
        debug!("Merged {}/{} status updates", merged, updates.len());
    }

    pub fn stats(&self) -> DecisionStats {
        decision_stats(&self.suggestions)
    }

    /// Applies the accepted subset of this session to `cv`.
    pub fn apply_to(&self, cv: &ParsedCV) -> ApplyOutcome {
        apply_suggestions(cv, &self.suggestions)
    }
}

/// Tallies review decisions over a suggestion batch.
pub fn decision_stats(suggestions: &[Suggestion]) -> DecisionStats {
    let mut stats = DecisionStats {
        total: suggestions.len(),
        ..Default::default()
    };
    for suggestion in suggestions {
        match suggestion.status {
            SuggestionStatus::Accepted => stats.accepted += 1,
            SuggestionStatus::Rejected => stats.rejected += 1,
            SuggestionStatus::Pending => stats.pending += 1,
        }
    }
    stats
}

/// Groups suggestions by section in canonical display order, skipping
/// sections with none.
pub fn group_by_section(suggestions: &[Suggestion]) -> Vec<(CVSection, Vec<&Suggestion>)> {
    CVSection::ALL
        .iter()
        .filter_map(|&section| {
            let group: Vec<&Suggestion> = suggestions
                .iter()
                .filter(|s| s.section == section)
                .collect();
            if group.is_empty() {
                None
            } else {
                Some((section, group))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::MatchAnalysis;
    use crate::models::suggestion::SuggestionType;

    fn make_suggestion(id: &str, section: CVSection, target: &str) -> Suggestion {
        Suggestion {
            id: id.to_string(),
            suggestion_type: SuggestionType::Modify,
            section,
            target: target.to_string(),
            target_label: "Test".to_string(),
            original: None,
            suggested: format!("updated by {}", id),
            reasoning: "test".to_string(),
            confidence: 0.8,
            status: SuggestionStatus::Pending,
        }
    }

    fn make_session() -> SuggestionSession {
        let batch = SuggestionBatch {
            suggestions: vec![
                make_suggestion("sugg-1", CVSection::Summary, "summary"),
                make_suggestion("sugg-2", CVSection::Skills, "skills.0"),
                make_suggestion("sugg-3", CVSection::Contact, "contact.email"),
            ],
            analysis: MatchAnalysis::default(),
            tokens_used: 1200,
        };
        SuggestionSession::new(
            NewSession {
                user_id: Uuid::new_v4(),
                cv_id: Uuid::new_v4(),
                job_description: "A long enough job description".to_string(),
                company_name: Some("Initech".to_string()),
                position: None,
                job_url: None,
            },
            batch,
        )
    }

    #[test]
    fn test_new_session_copies_batch_and_stamps_metadata() {
        let session = make_session();
        assert_eq!(session.suggestions.len(), 3);
        assert_eq!(session.tokens_used, 1200);
        assert_eq!(session.company_name.as_deref(), Some("Initech"));
        assert!(!session.id.is_nil());
    }

    #[test]
    fn test_set_status_by_id() {
        let mut session = make_session();
        assert!(session.set_status("sugg-2", SuggestionStatus::Accepted));
        assert_eq!(session.suggestions[1].status, SuggestionStatus::Accepted);
        assert!(!session.set_status("sugg-99", SuggestionStatus::Accepted));
    }

    #[test]
    fn test_decide_pending_skips_decided_suggestions() {
        let mut session = make_session();
        session.set_status("sugg-1", SuggestionStatus::Rejected);
        session.decide_pending(SuggestionStatus::Accepted);
        assert_eq!(session.suggestions[0].status, SuggestionStatus::Rejected);
        assert_eq!(session.suggestions[1].status, SuggestionStatus::Accepted);
        assert_eq!(session.suggestions[2].status, SuggestionStatus::Accepted);
    }

    #[test]
    fn test_reset_to_pending() {
        let mut session = make_session();
        session.set_status("sugg-1", SuggestionStatus::Accepted);
        session.set_status("sugg-1", SuggestionStatus::Pending);
        assert_eq!(session.suggestions[0].status, SuggestionStatus::Pending);
    }

    #[test]
    fn test_merge_statuses_ignores_unknown_ids() {
        let mut session = make_session();
        session.merge_statuses(&[
            StatusUpdate {
                id: "sugg-1".to_string(),
                status: SuggestionStatus::Accepted,
            },
            StatusUpdate {
                id: "sugg-404".to_string(),
                status: SuggestionStatus::Accepted,
            },
            StatusUpdate {
                id: "sugg-3".to_string(),
                status: SuggestionStatus::Rejected,
            },
        ]);
        assert_eq!(session.suggestions[0].status, SuggestionStatus::Accepted);
        assert_eq!(session.suggestions[1].status, SuggestionStatus::Pending);
        assert_eq!(session.suggestions[2].status, SuggestionStatus::Rejected);
    }

    #[test]
    fn test_decision_stats() {
        let mut session = make_session();
        session.set_status("sugg-1", SuggestionStatus::Accepted);
        session.set_status("sugg-2", SuggestionStatus::Rejected);
        let stats = session.stats();
        assert_eq!(
            stats,
            DecisionStats {
                accepted: 1,
                rejected: 1,
                pending: 1,
                total: 3,
            }
        );
    }

    #[test]
    fn test_group_by_section_uses_display_order_and_skips_empty() {
        let suggestions = vec![
            make_suggestion("sugg-1", CVSection::Skills, "skills.0"),
            make_suggestion("sugg-2", CVSection::Contact, "contact.email"),
            make_suggestion("sugg-3", CVSection::Skills, "skills.1"),
        ];
        let groups = group_by_section(&suggestions);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, CVSection::Contact);
        assert_eq!(groups[1].0, CVSection::Skills);
        assert_eq!(groups[1].1.len(), 2);
    }

    #[test]
    fn test_apply_to_uses_accepted_subset() {
        let mut session = make_session();
        session.set_status("sugg-1", SuggestionStatus::Accepted);
        let cv = ParsedCV {
            summary: "before".to_string(),
            ..Default::default()
        };
        let outcome = session.apply_to(&cv);
        assert_eq!(outcome.cv.summary, "updated by sugg-1");
        assert_eq!(outcome.applied_count(), 1);
        assert_eq!(cv.summary, "before");
    }
}
