use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::service_area::ZipCode;
use super::steps::{NavigatorStep, StepAnswer};
use super::vocabulary::{
    Concern, GenderPreference, HelpFor, Language, PaymentType, ServiceFormat, Urgency,
};

/// Opaque reference returned to the seeker after submission.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseId(pub String);

impl ResponseId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for ResponseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Analytics correlation token; never used as an identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn generate() -> Self {
        Self(format!("nav_{}", Uuid::new_v4().simple()))
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Answers accumulated so far; one slot per step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerBag {
    pub primary_concern: Option<Concern>,
    pub help_for: Option<HelpFor>,
    pub urgency: Option<Urgency>,
    pub service_format: Option<BTreeSet<ServiceFormat>>,
    pub payment_type: Option<PaymentType>,
    pub insurance_provider: Option<String>,
    pub zip_code: Option<ZipCode>,
    pub service_area: Option<String>,
    pub provider_gender_preference: Option<GenderPreference>,
    pub language_preference: Option<Language>,
    pub open_to_community_programs: Option<bool>,
}

impl AnswerBag {
    /// Stores a validated answer, replacing any earlier answer for the same step.
    pub fn merge(&mut self, answer: StepAnswer) {
        match answer {
            StepAnswer::Concern { primary_concern } => self.primary_concern = Some(primary_concern),
            StepAnswer::Recipient { help_for } => self.help_for = Some(help_for),
            StepAnswer::Urgency { urgency } => self.urgency = Some(urgency),
            StepAnswer::Format { service_format } => self.service_format = Some(service_format),
            StepAnswer::Payment {
                payment_type,
                insurance_provider,
            } => {
                self.payment_type = Some(payment_type);
                self.insurance_provider = insurance_provider;
            }
            StepAnswer::Location {
                zip_code,
                service_area,
            } => {
                self.zip_code = Some(zip_code);
                self.service_area = Some(service_area);
            }
            StepAnswer::Preferences {
                provider_gender_preference,
                language_preference,
                open_to_community_programs,
            } => {
                self.provider_gender_preference = provider_gender_preference;
                self.language_preference = language_preference;
                self.open_to_community_programs = Some(open_to_community_programs);
            }
        }
    }

    /// Converts a fully answered bag; otherwise names the first missing step.
    pub fn completed(&self) -> Result<CompletedAnswers, NavigatorStep> {
        Ok(CompletedAnswers {
            primary_concern: self.primary_concern.ok_or(NavigatorStep::Concern)?,
            help_for: self.help_for.ok_or(NavigatorStep::Recipient)?,
            urgency: self.urgency.ok_or(NavigatorStep::Urgency)?,
            service_format: self.service_format.clone().ok_or(NavigatorStep::Format)?,
            payment_type: self.payment_type.ok_or(NavigatorStep::Payment)?,
            insurance_provider: self.insurance_provider.clone(),
            zip_code: self.zip_code.clone().ok_or(NavigatorStep::Location)?,
            provider_gender_preference: self.provider_gender_preference,
            language_preference: self.language_preference,
            open_to_community_programs: self
                .open_to_community_programs
                .ok_or(NavigatorStep::Preferences)?,
        })
    }
}

/// A bag in which every required answer is present and vocabulary-checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedAnswers {
    pub primary_concern: Concern,
    pub help_for: HelpFor,
    pub urgency: Urgency,
    pub service_format: BTreeSet<ServiceFormat>,
    pub payment_type: PaymentType,
    pub insurance_provider: Option<String>,
    pub zip_code: ZipCode,
    pub provider_gender_preference: Option<GenderPreference>,
    pub language_preference: Option<Language>,
    pub open_to_community_programs: bool,
}

/// A persisted navigator submission. Never updated once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionnaireResponse {
    pub id: ResponseId,
    pub session_id: SessionId,
    pub service_area: String,
    pub submitted_at: DateTime<Utc>,
    pub primary_concern: Concern,
    pub help_for: HelpFor,
    pub urgency: Urgency,
    pub service_format: BTreeSet<ServiceFormat>,
    pub payment_type: PaymentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance_provider: Option<String>,
    pub zip_code: ZipCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_gender_preference: Option<GenderPreference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_preference: Option<Language>,
    pub open_to_community_programs: bool,
}

impl QuestionnaireResponse {
    pub fn from_answers(
        id: ResponseId,
        session_id: SessionId,
        service_area: String,
        submitted_at: DateTime<Utc>,
        answers: CompletedAnswers,
    ) -> Self {
        let CompletedAnswers {
            primary_concern,
            help_for,
            urgency,
            service_format,
            payment_type,
            insurance_provider,
            zip_code,
            provider_gender_preference,
            language_preference,
            open_to_community_programs,
        } = answers;

        Self {
            id,
            session_id,
            service_area,
            submitted_at,
            primary_concern,
            help_for,
            urgency,
            service_format,
            payment_type,
            insurance_provider,
            zip_code,
            provider_gender_preference,
            language_preference,
            open_to_community_programs,
        }
    }
}
