//! Typed listing predicates.
//!
//! Filters are values handed to the data-access layer, which evaluates them
//! with its own query capability; user input never becomes query text.

use std::collections::BTreeSet;

use serde::Serialize;

use super::domain::{Listing, ListingKind};
use crate::workflows::navigator::domain::QuestionnaireResponse;
use crate::workflows::navigator::vocabulary::{Concern, Language, PaymentType, ServiceFormat};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "predicate", content = "value", rename_all = "snake_case")]
pub enum ListingPredicate {
    Active(bool),
    Verified(bool),
    Claimed(bool),
    Kind(ListingKind),
    /// Listing shares at least one issue tag.
    IssuesAny(BTreeSet<Concern>),
    /// Listing offers at least one of the formats.
    FormatsAny(BTreeSet<ServiceFormat>),
    AcceptsPayment(PaymentType),
    SpeaksLanguage(Language),
    PostalPrefix(String),
    /// Case-insensitive substring of the name.
    NameContains(String),
}

impl ListingPredicate {
    pub fn matches(&self, listing: &Listing) -> bool {
        match self {
            ListingPredicate::Active(active) => listing.active == *active,
            ListingPredicate::Verified(verified) => listing.verified == *verified,
            ListingPredicate::Claimed(claimed) => listing.claimed_by.is_some() == *claimed,
            ListingPredicate::Kind(kind) => listing.kind == *kind,
            ListingPredicate::IssuesAny(issues) => !listing.issues.is_disjoint(issues),
            ListingPredicate::FormatsAny(formats) => !listing.formats.is_disjoint(formats),
            ListingPredicate::AcceptsPayment(payment) => listing.payment_types.contains(payment),
            ListingPredicate::SpeaksLanguage(language) => listing.languages.contains(language),
            ListingPredicate::PostalPrefix(prefix) => {
                listing.postal_code.starts_with(prefix.as_str())
            }
            ListingPredicate::NameContains(needle) => listing
                .name
                .to_lowercase()
                .contains(&needle.to_lowercase()),
        }
    }
}

/// Conjunction of predicates; an empty filter matches every listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListingFilter {
    predicates: Vec<ListingPredicate>,
}

impl ListingFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Active and verified listings only.
    pub fn listed() -> Self {
        Self::new()
            .and(ListingPredicate::Active(true))
            .and(ListingPredicate::Verified(true))
    }

    pub fn and(mut self, predicate: ListingPredicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn and_if(self, predicate: Option<ListingPredicate>) -> Self {
        match predicate {
            Some(predicate) => self.and(predicate),
            None => self,
        }
    }

    pub fn predicates(&self) -> &[ListingPredicate] {
        &self.predicates
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        self.predicates
            .iter()
            .all(|predicate| predicate.matches(listing))
    }
}

/// Builds the candidate filter for a submitted questionnaire.
pub struct MatchQuery;

impl MatchQuery {
    pub fn for_response(response: &QuestionnaireResponse) -> ListingFilter {
        let formats = (!response.service_format.is_empty())
            .then(|| ListingPredicate::FormatsAny(response.service_format.clone()));

        ListingFilter::listed()
            .and(ListingPredicate::IssuesAny(Self::issue_tags(response)))
            .and(ListingPredicate::PostalPrefix(
                response.zip_code.prefix().to_string(),
            ))
            .and_if(formats)
            .and(ListingPredicate::AcceptsPayment(response.payment_type))
    }

    fn issue_tags(response: &QuestionnaireResponse) -> BTreeSet<Concern> {
        BTreeSet::from([response.primary_concern])
    }
}
