use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::domain::{AnswerBag, CompletedAnswers, QuestionnaireResponse, ResponseId, SessionId};
use super::repository::ResponseRepository;
use super::service_area::ServiceAreaCatalog;
use super::session::{ResponseSubmitter, SubmissionFailure};
use super::steps::{NavigatorStep, StepAnswer, StepSubmission};
use super::validation::{validate_step, FieldErrors};
use crate::config::NavigatorConfig;
use crate::error::ErrorKind;
use crate::pagination::{Page, PageRequest, PagingPolicy};
use crate::workflows::directory::domain::ListingSummary;
use crate::workflows::directory::filter::MatchQuery;
use crate::workflows::directory::repository::DirectoryRepository;
use crate::workflows::repository::RepositoryError;

/// Body of a one-shot questionnaire submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionnaireSubmission {
    #[serde(default)]
    pub session_id: Option<SessionId>,
    pub steps: Vec<StepSubmission>,
}

/// Service composing validation, persistence, and directory matching.
pub struct NavigatorService<R, D> {
    responses: Arc<R>,
    directory: Arc<D>,
    areas: Arc<ServiceAreaCatalog>,
    service_area: String,
    paging: PagingPolicy,
}

impl<R, D> NavigatorService<R, D>
where
    R: ResponseRepository + 'static,
    D: DirectoryRepository + 'static,
{
    pub fn new(
        responses: Arc<R>,
        directory: Arc<D>,
        areas: ServiceAreaCatalog,
        config: &NavigatorConfig,
    ) -> Self {
        Self {
            responses,
            directory,
            areas: Arc::new(areas),
            service_area: config.service_area.clone(),
            paging: PagingPolicy::from(config),
        }
    }

    pub fn areas(&self) -> &ServiceAreaCatalog {
        &self.areas
    }

    /// Validates a single step without touching storage.
    pub fn validate(
        &self,
        step: NavigatorStep,
        submission: &StepSubmission,
    ) -> Result<StepAnswer, FieldErrors> {
        validate_step(step, submission, &self.areas)
    }

    /// Validates every step of a one-shot submission and assembles the bag.
    ///
    /// Each step may appear at most once; errors are reported as
    /// `<step>.<field>`, and unanswered steps as `<step>`.
    pub fn collect_answers(
        &self,
        steps: &[StepSubmission],
    ) -> Result<CompletedAnswers, FieldErrors> {
        let mut errors = FieldErrors::new();
        let mut bag = AnswerBag::default();
        let mut seen = Vec::new();

        for submission in steps {
            let step = submission.step();
            if seen.contains(&step) {
                errors.insert(step.label(), "answered more than once");
                continue;
            }
            seen.push(step);
            match validate_step(step, submission, &self.areas) {
                Ok(answer) => bag.merge(answer),
                Err(step_errors) => errors.extend_scoped(step.label(), step_errors),
            }
        }

        for step in NavigatorStep::ALL {
            if !seen.contains(&step) {
                errors.insert(step.label(), "this step has not been answered");
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        bag.completed()
            .map_err(|step| FieldErrors::single(step.label(), "this step has not been answered"))
    }

    /// Persists a completed questionnaire. Every call mints a new id.
    pub fn submit(
        &self,
        answers: CompletedAnswers,
        session_id: SessionId,
    ) -> Result<QuestionnaireResponse, NavigatorServiceError> {
        let area = self.areas.find(&self.service_area).ok_or_else(|| {
            warn!(service_area = %self.service_area, "default service area is not configured");
            NavigatorServiceError::ServiceAreaNotFound(self.service_area.clone())
        })?;

        let response = QuestionnaireResponse::from_answers(
            ResponseId::generate(),
            session_id,
            area.slug.clone(),
            Utc::now(),
            answers,
        );

        let stored = self.responses.insert(response).map_err(|err| {
            warn!(error = %err, "questionnaire response could not be stored");
            err
        })?;
        info!(
            response_id = %stored.id,
            session_id = %stored.session_id,
            urgency = %stored.urgency,
            "navigator questionnaire submitted"
        );
        Ok(stored)
    }

    pub fn get(&self, id: &ResponseId) -> Result<QuestionnaireResponse, NavigatorServiceError> {
        self.responses
            .fetch(id)?
            .ok_or_else(|| NavigatorServiceError::ResponseNotFound(id.clone()))
    }

    /// Matching listings for a stored response, paged in insertion order.
    pub fn results_for(
        &self,
        id: &ResponseId,
        request: PageRequest,
    ) -> Result<Page<ListingSummary>, NavigatorServiceError> {
        let response = self.get(id)?;
        self.results_for_response(&response, request)
    }

    pub fn results_for_response(
        &self,
        response: &QuestionnaireResponse,
        request: PageRequest,
    ) -> Result<Page<ListingSummary>, NavigatorServiceError> {
        let filter = MatchQuery::for_response(response);
        let candidates = self
            .directory
            .query(&filter)
            .map_err(NavigatorServiceError::Retrieval)?;
        let summaries = candidates.iter().map(|listing| listing.summary()).collect();
        Ok(self.paging.paginate(summaries, request))
    }
}

impl<R, D> ResponseSubmitter for NavigatorService<R, D>
where
    R: ResponseRepository + 'static,
    D: DirectoryRepository + 'static,
{
    fn submit_answers(
        &self,
        answers: CompletedAnswers,
        session_id: &SessionId,
    ) -> Result<ResponseId, SubmissionFailure> {
        self.submit(answers, session_id.clone())
            .map(|response| response.id)
            .map_err(|err| SubmissionFailure::new(err.kind(), err.user_message()))
    }
}

/// Error raised by the navigator service.
#[derive(Debug, thiserror::Error)]
pub enum NavigatorServiceError {
    #[error("service area '{0}' is not configured")]
    ServiceAreaNotFound(String),
    #[error("questionnaire response {0} not found")]
    ResponseNotFound(ResponseId),
    #[error("could not retrieve matching listings: {0}")]
    Retrieval(RepositoryError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl NavigatorServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            NavigatorServiceError::ServiceAreaNotFound(_) => ErrorKind::Configuration,
            NavigatorServiceError::ResponseNotFound(_) => ErrorKind::NotFound,
            NavigatorServiceError::Retrieval(err) | NavigatorServiceError::Repository(err) => {
                err.kind()
            }
        }
    }

    /// Message safe to show a seeker.
    pub fn user_message(&self) -> String {
        match self.kind() {
            ErrorKind::TransientStore => {
                "we could not save or load your answers right now; please try again".to_string()
            }
            ErrorKind::Configuration => {
                "the navigator is temporarily unavailable; please contact support".to_string()
            }
            _ => self.to_string(),
        }
    }
}
