use std::sync::Arc;

pub(super) use crate::workflows::test_support::*;

use crate::config::NavigatorConfig;
use crate::workflows::directory::domain::Listing;
use crate::workflows::directory::repository::DirectoryRepository;
use crate::workflows::navigator::repository::ResponseRepository;
use crate::workflows::navigator::service_area::ServiceAreaCatalog;
use crate::workflows::navigator::NavigatorService;

pub(super) fn navigator_config() -> NavigatorConfig {
    NavigatorConfig::default()
}

pub(super) fn service_with<R, D>(responses: Arc<R>, directory: Arc<D>) -> NavigatorService<R, D>
where
    R: ResponseRepository + 'static,
    D: DirectoryRepository + 'static,
{
    NavigatorService::new(
        responses,
        directory,
        ServiceAreaCatalog::standard(),
        &navigator_config(),
    )
}

pub(super) fn build_service(
    listings: Vec<Listing>,
) -> (
    NavigatorService<MemoryResponses, MemoryDirectory>,
    Arc<MemoryResponses>,
) {
    let responses = Arc::new(MemoryResponses::default());
    let service = service_with(responses.clone(), Arc::new(MemoryDirectory::with(listings)));
    (service, responses)
}

/// `count` matching listings named `Practice 01..`.
pub(super) fn matching_listings(count: usize) -> Vec<Listing> {
    (1..=count)
        .map(|n| listing(&format!("prov-{n:02}"), &format!("Practice {n:02}")))
        .collect()
}
