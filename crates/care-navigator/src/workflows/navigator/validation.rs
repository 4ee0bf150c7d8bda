//! Pure per-step validation of navigator answers.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::service_area::{ServiceAreaCatalog, ZipCode};
use super::steps::{NavigatorStep, StepAnswer, StepSubmission};
use super::vocabulary::{
    Concern, GenderPreference, HelpFor, Language, PaymentType, ServiceFormat, Urgency, Vocabulary,
};

/// Field name to human-readable message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.insert(field, message);
        errors
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(field, message)| (field.as_str(), message.as_str()))
    }

    /// Folds another set of errors in, prefixing each field with `scope.`.
    pub fn extend_scoped(&mut self, scope: &str, other: FieldErrors) {
        for (field, message) in other.0 {
            self.0.insert(format!("{scope}.{field}"), message);
        }
    }

    /// `Ok(value)` when nothing was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .0
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect();
        f.write_str(&rendered.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

/// Validates `submission` as the answer to `step`.
pub fn validate_step(
    step: NavigatorStep,
    submission: &StepSubmission,
    areas: &ServiceAreaCatalog,
) -> Result<StepAnswer, FieldErrors> {
    if submission.step() != step {
        return Err(FieldErrors::single(
            "step",
            format!(
                "expected answers for the {} step, received {}",
                step.label(),
                submission.step().label()
            ),
        ));
    }

    let mut errors = FieldErrors::new();
    let answer = match submission {
        StepSubmission::Concern { primary_concern } => {
            required_term::<Concern>("primary_concern", primary_concern.as_deref(), &mut errors)
                .map(|primary_concern| StepAnswer::Concern { primary_concern })
        }
        StepSubmission::Recipient { help_for } => {
            required_term::<HelpFor>("help_for", help_for.as_deref(), &mut errors)
                .map(|help_for| StepAnswer::Recipient { help_for })
        }
        StepSubmission::Urgency { urgency } => {
            required_term::<Urgency>("urgency", urgency.as_deref(), &mut errors)
                .map(|urgency| StepAnswer::Urgency { urgency })
        }
        StepSubmission::Format { service_format } => {
            service_formats(service_format.as_deref(), &mut errors)
                .map(|service_format| StepAnswer::Format { service_format })
        }
        StepSubmission::Payment {
            payment_type,
            insurance_provider,
        } => required_term::<PaymentType>("payment_type", payment_type.as_deref(), &mut errors)
            .map(|payment_type| StepAnswer::Payment {
                payment_type,
                insurance_provider: match payment_type {
                    PaymentType::Insurance => non_blank(insurance_provider.as_deref()),
                    _ => None,
                },
            }),
        StepSubmission::Location { zip_code } => location(zip_code.as_deref(), areas, &mut errors),
        StepSubmission::Preferences {
            provider_gender_preference,
            language_preference,
            open_to_community_programs,
        } => {
            let gender = optional_term::<GenderPreference>(
                "provider_gender_preference",
                provider_gender_preference.as_deref(),
                &mut errors,
            );
            let language = optional_term::<Language>(
                "language_preference",
                language_preference.as_deref(),
                &mut errors,
            );
            if open_to_community_programs.is_none() {
                errors.insert(
                    "open_to_community_programs",
                    "let us know whether community programs are an option",
                );
            }
            match (gender, language, open_to_community_programs) {
                (Some(provider_gender_preference), Some(language_preference), Some(open)) => {
                    Some(StepAnswer::Preferences {
                        provider_gender_preference,
                        language_preference,
                        open_to_community_programs: *open,
                    })
                }
                _ => None,
            }
        }
    };

    match answer {
        Some(answer) => errors.into_result(answer),
        None => Err(errors),
    }
}

fn required_term<T: Vocabulary>(
    field: &str,
    raw: Option<&str>,
    errors: &mut FieldErrors,
) -> Option<T> {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        None => {
            errors.insert(field, format!("please choose a {}", T::LABEL));
            None
        }
        Some(value) => {
            let parsed = T::parse(value);
            if parsed.is_none() {
                errors.insert(field, unknown_term::<T>(value));
            }
            parsed
        }
    }
}

/// `Some(None)` for a blank optional answer, `None` when the value is invalid.
fn optional_term<T: Vocabulary>(
    field: &str,
    raw: Option<&str>,
    errors: &mut FieldErrors,
) -> Option<Option<T>> {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        None => Some(None),
        Some(value) => match T::parse(value) {
            Some(term) => Some(Some(term)),
            None => {
                errors.insert(field, unknown_term::<T>(value));
                None
            }
        },
    }
}

fn unknown_term<T: Vocabulary>(value: &str) -> String {
    format!(
        "'{value}' is not a recognised {}; expected one of: {}",
        T::LABEL,
        T::accepted_terms()
    )
}

fn service_formats(
    raw: Option<&[String]>,
    errors: &mut FieldErrors,
) -> Option<BTreeSet<ServiceFormat>> {
    let Some(values) = raw else {
        errors.insert(
            "service_format",
            "please choose the formats that work for you (an empty list means no preference)",
        );
        return None;
    };

    let mut formats = BTreeSet::new();
    let mut rejected = Vec::new();
    for value in values {
        match ServiceFormat::parse(value) {
            Some(format) => {
                formats.insert(format);
            }
            None => rejected.push(value.trim().to_string()),
        }
    }

    if rejected.is_empty() {
        Some(formats)
    } else {
        errors.insert(
            "service_format",
            format!(
                "unrecognised service format(s) {}; expected any of: {}",
                rejected.join(", "),
                ServiceFormat::accepted_terms()
            ),
        );
        None
    }
}

fn location(
    raw: Option<&str>,
    areas: &ServiceAreaCatalog,
    errors: &mut FieldErrors,
) -> Option<StepAnswer> {
    let Some(raw) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        errors.insert("zip_code", "please enter your ZIP code");
        return None;
    };
    let Some(zip_code) = ZipCode::parse(raw) else {
        errors.insert("zip_code", "ZIP code must be exactly five digits");
        return None;
    };
    match areas.area_for_zip(&zip_code) {
        Some(area) => Some(StepAnswer::Location {
            service_area: area.slug.clone(),
            zip_code,
        }),
        None => {
            errors.insert(
                "zip_code",
                format!("{zip_code} is outside the areas we currently serve"),
            );
            None
        }
    }
}

fn non_blank(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
