use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::navigator::vocabulary::{Concern, Language, PaymentType, ServiceFormat};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(pub String);

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Individual practitioner or agency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingKind {
    Provider,
    Organization,
}

impl ListingKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "provider" | "practitioner" => Some(Self::Provider),
            "organization" | "organisation" | "agency" => Some(Self::Organization),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ListingKind::Provider => "provider",
            ListingKind::Organization => "organization",
        }
    }
}

/// Directory entry as held by the data-access layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub kind: ListingKind,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub issues: BTreeSet<Concern>,
    pub formats: BTreeSet<ServiceFormat>,
    pub payment_types: BTreeSet<PaymentType>,
    #[serde(default)]
    pub languages: BTreeSet<Language>,
    pub postal_code: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    pub active: bool,
    pub verified: bool,
    /// Account that successfully claimed this entry, if any.
    #[serde(default)]
    pub claimed_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Listing {
    pub fn is_listed(&self) -> bool {
        self.active && self.verified
    }

    pub fn summary(&self) -> ListingSummary {
        ListingSummary {
            id: self.id.clone(),
            kind: self.kind,
            name: self.name.clone(),
            issues: self.issues.clone(),
            formats: self.formats.clone(),
            payment_types: self.payment_types.clone(),
            languages: self.languages.clone(),
            postal_code: self.postal_code.clone(),
            phone: self.phone.clone(),
            website: self.website.clone(),
            verified: self.verified,
        }
    }
}

/// Public card shown in search and navigator results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingSummary {
    pub id: ListingId,
    pub kind: ListingKind,
    pub name: String,
    pub issues: BTreeSet<Concern>,
    pub formats: BTreeSet<ServiceFormat>,
    pub payment_types: BTreeSet<PaymentType>,
    pub languages: BTreeSet<Language>,
    pub postal_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub verified: bool,
}

/// Public profile page payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingProfile {
    #[serde(flatten)]
    pub listing: ListingSummary,
    pub description: String,
    pub claimed: bool,
    pub reviews: ReviewSummary,
}

/// Aggregate over published reviews.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ReviewSummary {
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f32>,
}

impl ReviewSummary {
    pub fn from_ratings<I>(ratings: I) -> Self
    where
        I: IntoIterator<Item = u8>,
    {
        let (count, total) = ratings
            .into_iter()
            .fold((0usize, 0u32), |(count, total), rating| {
                (count + 1, total + u32::from(rating))
            });
        let average_rating = if count == 0 {
            None
        } else {
            Some(total as f32 / count as f32)
        };
        Self {
            count,
            average_rating,
        }
    }
}
