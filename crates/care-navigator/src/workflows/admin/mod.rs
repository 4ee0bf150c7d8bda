//! Back-office panels: questionnaire analytics, contact messages, and
//! listing, claim, and review moderation.

pub mod analytics;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use analytics::ResponseAnalytics;
pub use router::admin_router;
pub use service::{
    AdminService, AdminServiceError, ClaimDecision, ContactsQuery, ListingStatusUpdate,
    ListingsQuery, ResponsesQuery, ReviewDecision, StatusQuery,
};
