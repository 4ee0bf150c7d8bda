use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{
    Claim, ClaimId, ClaimRequest, ClaimStatus, ContactId, ContactMessage, ContactRequest,
    Notification, Review, ReviewId, ReviewRequest, ReviewStatus,
};
use super::repository::{InboxRepository, Notifier};
use crate::error::ErrorKind;
use crate::pagination::{Page, PageRequest, PagingPolicy};
use crate::workflows::directory::domain::{Listing, ListingId};
use crate::workflows::directory::repository::DirectoryRepository;
use crate::workflows::navigator::validation::FieldErrors;
use crate::workflows::repository::RepositoryError;

const MAX_MESSAGE_CHARS: usize = 2000;
const MAX_NAME_CHARS: usize = 120;

/// Validate-then-insert flows for contact messages, reviews, and claims.
pub struct InboxService<D, I, N> {
    directory: Arc<D>,
    inbox: Arc<I>,
    notifier: Arc<N>,
    paging: PagingPolicy,
}

impl<D, I, N> InboxService<D, I, N>
where
    D: DirectoryRepository + 'static,
    I: InboxRepository + 'static,
    N: Notifier + 'static,
{
    pub fn new(directory: Arc<D>, inbox: Arc<I>, notifier: Arc<N>, paging: PagingPolicy) -> Self {
        Self {
            directory,
            inbox,
            notifier,
            paging,
        }
    }

    pub fn submit_contact(
        &self,
        listing_id: &ListingId,
        request: ContactRequest,
    ) -> Result<ContactMessage, InboxServiceError> {
        let mut errors = FieldErrors::new();
        let name = required_text("name", request.name, MAX_NAME_CHARS, &mut errors);
        let email = email("email", request.email, &mut errors);
        let message = required_text("message", request.message, MAX_MESSAGE_CHARS, &mut errors);
        let phone = optional_text(request.phone);
        let (name, email, message) = match (name, email, message) {
            (Some(name), Some(email), Some(message)) if errors.is_empty() => (name, email, message),
            _ => return Err(InboxServiceError::Validation(errors)),
        };

        let listing = self.listed(listing_id)?;
        let stored = self.inbox.insert_contact(ContactMessage {
            id: ContactId::generate(),
            listing_id: listing.id.clone(),
            name,
            email,
            phone,
            message,
            created_at: Utc::now(),
        })?;
        info!(contact_id = %stored.id, listing_id = %listing.id, "contact message received");

        let mut details = BTreeMap::new();
        details.insert("contact_id".to_string(), stored.id.to_string());
        details.insert("from".to_string(), stored.email.clone());
        self.notify_best_effort(Notification {
            template: "listing_contact".to_string(),
            listing_id: listing.id.clone(),
            recipient: listing.email.clone(),
            details,
        });

        Ok(stored)
    }

    /// Stores a review as pending moderation.
    pub fn submit_review(
        &self,
        listing_id: &ListingId,
        request: ReviewRequest,
    ) -> Result<Review, InboxServiceError> {
        let mut errors = FieldErrors::new();
        let rating = match request.rating {
            Some(rating @ 1..=5) => u8::try_from(rating).ok(),
            Some(_) => {
                errors.insert("rating", "rating must be between 1 and 5");
                None
            }
            None => {
                errors.insert("rating", "please choose a rating");
                None
            }
        };
        let body = bounded_text("body", request.body, MAX_MESSAGE_CHARS, &mut errors);
        let author_name = bounded_text(
            "author_name",
            request.author_name,
            MAX_NAME_CHARS,
            &mut errors,
        );
        let rating = match rating {
            Some(rating) if errors.is_empty() => rating,
            _ => return Err(InboxServiceError::Validation(errors)),
        };

        let listing = self.listed(listing_id)?;
        let stored = self.inbox.insert_review(Review {
            id: ReviewId::generate(),
            listing_id: listing.id,
            rating,
            author_name,
            body: body.unwrap_or_default(),
            status: ReviewStatus::Pending,
            created_at: Utc::now(),
        })?;
        info!(
            review_id = %stored.id,
            listing_id = %stored.listing_id,
            "review queued for moderation"
        );
        Ok(stored)
    }

    /// Stores a pending claim on an unclaimed listing.
    pub fn submit_claim(
        &self,
        listing_id: &ListingId,
        request: ClaimRequest,
    ) -> Result<Claim, InboxServiceError> {
        let mut errors = FieldErrors::new();
        let user_id = required_text("user_id", request.user_id, MAX_NAME_CHARS, &mut errors);
        let name = required_text("name", request.name, MAX_NAME_CHARS, &mut errors);
        let email = email("email", request.email, &mut errors);
        let message = bounded_text("message", request.message, MAX_MESSAGE_CHARS, &mut errors);
        let (user_id, name, email) = match (user_id, name, email) {
            (Some(user_id), Some(name), Some(email)) if errors.is_empty() => (user_id, name, email),
            _ => return Err(InboxServiceError::Validation(errors)),
        };

        let listing = self
            .directory
            .fetch(listing_id)?
            .ok_or_else(|| InboxServiceError::ListingNotFound(listing_id.clone()))?;
        if listing.claimed_by.is_some() {
            return Err(InboxServiceError::AlreadyClaimed(listing.id));
        }
        let duplicate = self
            .inbox
            .claims(Some(&listing.id), Some(ClaimStatus::Pending))?
            .into_iter()
            .any(|claim| claim.user_id == user_id);
        if duplicate {
            return Err(InboxServiceError::DuplicateClaim(listing.id));
        }

        let stored = self.inbox.insert_claim(Claim {
            id: ClaimId::generate(),
            listing_id: listing.id.clone(),
            user_id,
            name,
            email,
            message,
            status: ClaimStatus::Pending,
            created_at: Utc::now(),
            resolved_at: None,
        })?;
        info!(claim_id = %stored.id, listing_id = %listing.id, "listing claim submitted");

        let mut details = BTreeMap::new();
        details.insert("claim_id".to_string(), stored.id.to_string());
        details.insert("listing_name".to_string(), listing.name.clone());
        self.notify_best_effort(Notification {
            template: "claim_submitted".to_string(),
            listing_id: listing.id,
            recipient: None,
            details,
        });

        Ok(stored)
    }

    /// Published reviews for a listed entry, oldest first.
    pub fn published_reviews(
        &self,
        listing_id: &ListingId,
        request: PageRequest,
    ) -> Result<Page<Review>, InboxServiceError> {
        let listing = self.listed(listing_id)?;
        let reviews = self
            .inbox
            .reviews(Some(&listing.id), Some(ReviewStatus::Published))?;
        Ok(self.paging.paginate(reviews, request))
    }

    fn listed(&self, listing_id: &ListingId) -> Result<Listing, InboxServiceError> {
        self.directory
            .fetch(listing_id)?
            .filter(Listing::is_listed)
            .ok_or_else(|| InboxServiceError::ListingNotFound(listing_id.clone()))
    }

    fn notify_best_effort(&self, notification: Notification) {
        let template = notification.template.clone();
        if let Err(err) = self.notifier.notify(notification) {
            warn!(%template, error = %err, "notification delivery failed");
        }
    }
}

/// Error raised by the inbox service.
#[derive(Debug, thiserror::Error)]
pub enum InboxServiceError {
    #[error("submission is invalid: {0}")]
    Validation(FieldErrors),
    #[error("listing {0} not found")]
    ListingNotFound(ListingId),
    #[error("listing {0} has already been claimed")]
    AlreadyClaimed(ListingId),
    #[error("a claim for listing {0} is already pending for this account")]
    DuplicateClaim(ListingId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl InboxServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            InboxServiceError::Validation(_) => ErrorKind::Validation,
            InboxServiceError::ListingNotFound(_) => ErrorKind::NotFound,
            InboxServiceError::AlreadyClaimed(_) | InboxServiceError::DuplicateClaim(_) => {
                ErrorKind::Conflict
            }
            InboxServiceError::Repository(err) => err.kind(),
        }
    }
}

fn optional_text(raw: Option<String>) -> Option<String> {
    raw.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn bounded_text(
    field: &str,
    raw: Option<String>,
    max_chars: usize,
    errors: &mut FieldErrors,
) -> Option<String> {
    let value = optional_text(raw)?;
    if value.chars().count() > max_chars {
        errors.insert(field, format!("must be at most {max_chars} characters"));
        return None;
    }
    Some(value)
}

fn required_text(
    field: &str,
    raw: Option<String>,
    max_chars: usize,
    errors: &mut FieldErrors,
) -> Option<String> {
    let present = raw.as_deref().map(str::trim).is_some_and(|value| !value.is_empty());
    if !present {
        errors.insert(field, "this field is required");
        return None;
    }
    bounded_text(field, raw, max_chars, errors)
}

fn email(field: &str, raw: Option<String>, errors: &mut FieldErrors) -> Option<String> {
    let value = required_text(field, raw, MAX_NAME_CHARS * 2, errors)?;
    let well_formed = value.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty()
            && domain.contains('.')
            && !domain.starts_with('.')
            && !domain.ends_with('.')
    });
    if well_formed && !value.contains(char::is_whitespace) {
        Some(value)
    } else {
        errors.insert(field, "please enter a valid e-mail address");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_requires_local_part_and_dotted_domain() {
        let mut errors = FieldErrors::new();
        assert!(email("email", Some("sam@example.org".to_string()), &mut errors).is_some());
        assert!(email("email", Some("sam@localhost".to_string()), &mut errors).is_none());
        assert!(email("email", Some("@example.org".to_string()), &mut errors).is_none());
        assert!(email("email", Some("sam @example.org".to_string()), &mut errors).is_none());
        assert!(errors.contains("email"));
    }

    #[test]
    fn required_text_rejects_blank_and_oversized_values() {
        let mut errors = FieldErrors::new();
        assert!(required_text("name", Some("   ".to_string()), 10, &mut errors).is_none());
        assert_eq!(errors.get("name"), Some("this field is required"));

        let mut errors = FieldErrors::new();
        assert!(required_text("name", Some("x".repeat(11)), 10, &mut errors).is_none());
        assert!(errors.get("name").unwrap_or_default().contains("10"));
    }
}
