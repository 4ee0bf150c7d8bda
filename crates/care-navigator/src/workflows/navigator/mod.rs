//! Seven-step intake questionnaire, its persistence, and directory matching.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;
pub mod service_area;
pub mod session;
pub mod steps;
pub mod validation;
pub mod vocabulary;

#[cfg(test)]
mod tests;

pub use domain::{AnswerBag, CompletedAnswers, QuestionnaireResponse, ResponseId, SessionId};
pub use repository::{ResponseFilter, ResponseRepository};
pub use router::navigator_router;
pub use service::{NavigatorService, NavigatorServiceError, QuestionnaireSubmission};
pub use service_area::{ServiceArea, ServiceAreaCatalog, ZipCode};
pub use session::{
    NavigatorSession, ResponseSubmitter, SessionError, SessionSnapshot, SessionState,
    SubmissionFailure,
};
pub use steps::{NavigatorStep, StepAnswer, StepSubmission};
pub use validation::{validate_step, FieldErrors};
pub use vocabulary::{
    Concern, GenderPreference, HelpFor, Language, PaymentType, ServiceFormat, Urgency, Vocabulary,
};
