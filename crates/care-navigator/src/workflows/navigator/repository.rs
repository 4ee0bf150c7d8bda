use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{QuestionnaireResponse, ResponseId};
use super::vocabulary::{Concern, Urgency};
use crate::workflows::repository::RepositoryError;

/// Append-only storage for submitted questionnaires.
pub trait ResponseRepository: Send + Sync {
    fn insert(
        &self,
        response: QuestionnaireResponse,
    ) -> Result<QuestionnaireResponse, RepositoryError>;
    fn fetch(&self, id: &ResponseId) -> Result<Option<QuestionnaireResponse>, RepositoryError>;
    /// Matching responses in submission order.
    fn list(&self, filter: &ResponseFilter) -> Result<Vec<QuestionnaireResponse>, RepositoryError>;
}

/// Back-office filter over stored responses. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseFilter {
    #[serde(default)]
    pub urgency: Option<Urgency>,
    #[serde(default)]
    pub primary_concern: Option<Concern>,
    #[serde(default)]
    pub since: Option<DateTime<Utc>>,
    #[serde(default)]
    pub until: Option<DateTime<Utc>>,
}

impl ResponseFilter {
    pub fn matches(&self, response: &QuestionnaireResponse) -> bool {
        self.urgency.map_or(true, |urgency| response.urgency == urgency)
            && self
                .primary_concern
                .map_or(true, |concern| response.primary_concern == concern)
            && self.since.map_or(true, |since| response.submitted_at >= since)
            && self.until.map_or(true, |until| response.submitted_at < until)
    }
}
