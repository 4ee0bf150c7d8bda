use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::service_area::ZipCode;
use super::vocabulary::{
    Concern, GenderPreference, HelpFor, Language, PaymentType, ServiceFormat, Urgency,
};

/// The seven navigator steps in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigatorStep {
    Concern,
    Recipient,
    Urgency,
    Format,
    Payment,
    Location,
    Preferences,
}

impl NavigatorStep {
    pub const ALL: [NavigatorStep; 7] = [
        NavigatorStep::Concern,
        NavigatorStep::Recipient,
        NavigatorStep::Urgency,
        NavigatorStep::Format,
        NavigatorStep::Payment,
        NavigatorStep::Location,
        NavigatorStep::Preferences,
    ];

    pub const FIRST: NavigatorStep = NavigatorStep::Concern;
    pub const LAST: NavigatorStep = NavigatorStep::Preferences;

    /// 1-based position shown to the user.
    pub const fn number(self) -> u8 {
        match self {
            NavigatorStep::Concern => 1,
            NavigatorStep::Recipient => 2,
            NavigatorStep::Urgency => 3,
            NavigatorStep::Format => 4,
            NavigatorStep::Payment => 5,
            NavigatorStep::Location => 6,
            NavigatorStep::Preferences => 7,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.get(usize::from(number).checked_sub(1)?).copied()
    }

    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn previous(self) -> Option<Self> {
        Self::from_number(self.number() - 1)
    }

    pub const fn label(self) -> &'static str {
        match self {
            NavigatorStep::Concern => "concern",
            NavigatorStep::Recipient => "recipient",
            NavigatorStep::Urgency => "urgency",
            NavigatorStep::Format => "format",
            NavigatorStep::Payment => "payment",
            NavigatorStep::Location => "location",
            NavigatorStep::Preferences => "preferences",
        }
    }
}

/// Raw, unvalidated fields for one step as received from a client.
///
/// Every field is optional here so that absence can be reported per field
/// instead of failing deserialization of the whole body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum StepSubmission {
    Concern {
        #[serde(default)]
        primary_concern: Option<String>,
    },
    Recipient {
        #[serde(default)]
        help_for: Option<String>,
    },
    Urgency {
        #[serde(default)]
        urgency: Option<String>,
    },
    Format {
        #[serde(default)]
        service_format: Option<Vec<String>>,
    },
    Payment {
        #[serde(default)]
        payment_type: Option<String>,
        #[serde(default)]
        insurance_provider: Option<String>,
    },
    Location {
        #[serde(default)]
        zip_code: Option<String>,
    },
    Preferences {
        #[serde(default)]
        provider_gender_preference: Option<String>,
        #[serde(default)]
        language_preference: Option<String>,
        #[serde(default)]
        open_to_community_programs: Option<bool>,
    },
}

impl StepSubmission {
    pub fn step(&self) -> NavigatorStep {
        match self {
            StepSubmission::Concern { .. } => NavigatorStep::Concern,
            StepSubmission::Recipient { .. } => NavigatorStep::Recipient,
            StepSubmission::Urgency { .. } => NavigatorStep::Urgency,
            StepSubmission::Format { .. } => NavigatorStep::Format,
            StepSubmission::Payment { .. } => NavigatorStep::Payment,
            StepSubmission::Location { .. } => NavigatorStep::Location,
            StepSubmission::Preferences { .. } => NavigatorStep::Preferences,
        }
    }
}

/// A validated, normalized answer for one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum StepAnswer {
    Concern {
        primary_concern: Concern,
    },
    Recipient {
        help_for: HelpFor,
    },
    Urgency {
        urgency: Urgency,
    },
    Format {
        service_format: BTreeSet<ServiceFormat>,
    },
    Payment {
        payment_type: PaymentType,
        insurance_provider: Option<String>,
    },
    Location {
        zip_code: ZipCode,
        service_area: String,
    },
    Preferences {
        provider_gender_preference: Option<GenderPreference>,
        language_preference: Option<Language>,
        open_to_community_programs: bool,
    },
}

impl StepAnswer {
    pub fn step(&self) -> NavigatorStep {
        match self {
            StepAnswer::Concern { .. } => NavigatorStep::Concern,
            StepAnswer::Recipient { .. } => NavigatorStep::Recipient,
            StepAnswer::Urgency { .. } => NavigatorStep::Urgency,
            StepAnswer::Format { .. } => NavigatorStep::Format,
            StepAnswer::Payment { .. } => NavigatorStep::Payment,
            StepAnswer::Location { .. } => NavigatorStep::Location,
            StepAnswer::Preferences { .. } => NavigatorStep::Preferences,
        }
    }
}
