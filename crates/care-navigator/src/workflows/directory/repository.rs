use super::domain::{Listing, ListingId};
use super::filter::ListingFilter;
use crate::workflows::repository::RepositoryError;

/// Data-access seam over the provider/organization collection.
pub trait DirectoryRepository: Send + Sync {
    fn insert(&self, listing: Listing) -> Result<Listing, RepositoryError>;
    fn update(&self, listing: Listing) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ListingId) -> Result<Option<Listing>, RepositoryError>;
    /// Listings matching every predicate, in insertion order.
    fn query(&self, filter: &ListingFilter) -> Result<Vec<Listing>, RepositoryError>;
}
