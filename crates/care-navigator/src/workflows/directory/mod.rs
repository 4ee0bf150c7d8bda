//! Provider and organization directory: listings, typed filters, CSV import,
//! and the public search/profile endpoints.

pub mod domain;
pub mod filter;
pub mod import;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{Listing, ListingId, ListingKind, ListingProfile, ListingSummary, ReviewSummary};
pub use filter::{ListingFilter, ListingPredicate, MatchQuery};
pub use import::{DirectoryImportError, DirectoryImporter};
pub use repository::DirectoryRepository;
pub use router::directory_router;
pub use service::{DirectoryQuery, DirectoryService, DirectoryServiceError};
