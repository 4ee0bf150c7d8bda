//! Seven-step navigator state machine.
//!
//! A session is owned by exactly one seeker (the caller holds it between
//! requests); nothing here is shared across users.

use serde::Serialize;

use super::domain::{AnswerBag, CompletedAnswers, ResponseId, SessionId};
use super::service_area::ServiceAreaCatalog;
use super::steps::{NavigatorStep, StepSubmission};
use super::validation::{validate_step, FieldErrors};
use crate::error::ErrorKind;

/// Persists a completed answer bag and hands back its reference id.
pub trait ResponseSubmitter {
    fn submit_answers(
        &self,
        answers: CompletedAnswers,
        session_id: &SessionId,
    ) -> Result<ResponseId, SubmissionFailure>;
}

/// Why a submission did not go through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct SubmissionFailure {
    #[serde(skip)]
    pub kind: ErrorKind,
    pub code: &'static str,
    pub message: String,
}

impl SubmissionFailure {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: kind.code(),
            message: message.into(),
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    InProgress(NavigatorStep),
    Submitted(ResponseId),
    /// Submission failed; the answer bag is kept so the seeker can retry.
    Failed(SubmissionFailure),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("answers for this step are invalid: {0}")]
    Invalid(FieldErrors),
    #[error("already on the first step")]
    AtFirstStep,
    #[error("questionnaire was already submitted")]
    AlreadySubmitted,
    #[error("cannot submit from the {} step", .0.label())]
    NotReady(NavigatorStep),
    #[error("the {} step has not been answered", .0.label())]
    Incomplete(NavigatorStep),
    #[error(transparent)]
    Submission(SubmissionFailure),
}

/// The navigator state a presentation layer renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub current_step: u8,
    pub step: NavigatorStep,
    pub answers: AnswerBag,
    pub errors: FieldErrors,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_id: Option<ResponseId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<SubmissionFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigatorSession {
    session_id: SessionId,
    state: SessionState,
    answers: AnswerBag,
    errors: FieldErrors,
}

impl NavigatorSession {
    pub fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            state: SessionState::InProgress(NavigatorStep::FIRST),
            answers: AnswerBag::default(),
            errors: FieldErrors::new(),
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn answers(&self) -> &AnswerBag {
        &self.answers
    }

    /// Field errors from the most recent rejected `advance`.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// The step being shown. A failed submission returns to the last step.
    pub fn current_step(&self) -> NavigatorStep {
        match &self.state {
            SessionState::InProgress(step) => *step,
            SessionState::Submitted(_) | SessionState::Failed(_) => NavigatorStep::LAST,
        }
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self.state, SessionState::Submitted(_))
    }

    /// Validates the current step and moves forward. On the last step the
    /// answers are merged and the session stays put, ready to submit.
    pub fn advance(
        &mut self,
        submission: &StepSubmission,
        areas: &ServiceAreaCatalog,
    ) -> Result<NavigatorStep, SessionError> {
        self.ensure_open()?;
        let step = self.current_step();

        let answer = match validate_step(step, submission, areas) {
            Ok(answer) => answer,
            Err(errors) => {
                self.errors = errors.clone();
                return Err(SessionError::Invalid(errors));
            }
        };

        self.answers.merge(answer);
        self.errors = FieldErrors::new();
        let next = step.next().unwrap_or(step);
        self.state = SessionState::InProgress(next);
        Ok(next)
    }

    /// Steps back without discarding any answers.
    pub fn retreat(&mut self) -> Result<NavigatorStep, SessionError> {
        self.ensure_open()?;
        let previous = self
            .current_step()
            .previous()
            .ok_or(SessionError::AtFirstStep)?;
        self.errors = FieldErrors::new();
        self.state = SessionState::InProgress(previous);
        Ok(previous)
    }

    /// Submits the accumulated answers. Allowed from the last step or after a
    /// failed attempt, in which case the same answers are sent again.
    pub fn submit<S>(&mut self, submitter: &S) -> Result<ResponseId, SessionError>
    where
        S: ResponseSubmitter + ?Sized,
    {
        match &self.state {
            SessionState::Submitted(_) => return Err(SessionError::AlreadySubmitted),
            SessionState::InProgress(step) if *step != NavigatorStep::LAST => {
                return Err(SessionError::NotReady(*step));
            }
            SessionState::InProgress(_) | SessionState::Failed(_) => {}
        }

        let completed = self.answers.completed().map_err(SessionError::Incomplete)?;
        match submitter.submit_answers(completed, &self.session_id) {
            Ok(response_id) => {
                self.errors = FieldErrors::new();
                self.state = SessionState::Submitted(response_id.clone());
                Ok(response_id)
            }
            Err(failure) => {
                self.state = SessionState::Failed(failure.clone());
                Err(SessionError::Submission(failure))
            }
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let step = self.current_step();
        let (response_id, error) = match &self.state {
            SessionState::Submitted(id) => (Some(id.clone()), None),
            SessionState::Failed(failure) => (None, Some(failure.clone())),
            SessionState::InProgress(_) => (None, None),
        };
        SessionSnapshot {
            session_id: self.session_id.clone(),
            current_step: step.number(),
            step,
            answers: self.answers.clone(),
            errors: self.errors.clone(),
            response_id,
            error,
        }
    }

    fn ensure_open(&self) -> Result<(), SessionError> {
        if self.is_submitted() {
            Err(SessionError::AlreadySubmitted)
        } else {
            Ok(())
        }
    }
}
