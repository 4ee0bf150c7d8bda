use super::common::*;
use crate::error::ErrorKind;
use crate::workflows::directory::domain::ListingId;
use crate::workflows::directory::{DirectoryQuery, DirectoryServiceError};
use crate::workflows::inbox::domain::ReviewStatus;

fn names(query: &DirectoryQuery) -> Vec<String> {
    let (service, _) = build_service(catalog());
    service
        .search(query)
        .expect("search succeeds")
        .items
        .into_iter()
        .map(|summary| summary.name)
        .collect()
}

#[test]
fn search_hides_inactive_and_unverified_listings() {
    assert_eq!(
        names(&DirectoryQuery::default()),
        vec![
            "Harbor Counseling",
            "Family Services Agency",
            "Towson Trauma Center"
        ]
    );
}

#[test]
fn search_applies_each_supplied_filter() {
    let by_kind = DirectoryQuery {
        kind: Some("organization".to_string()),
        ..DirectoryQuery::default()
    };
    assert_eq!(names(&by_kind), vec!["Family Services Agency"]);

    let by_concern_and_payment = DirectoryQuery {
        concern: Some("Trauma".to_string()),
        payment: Some("self-pay".to_string()),
        ..DirectoryQuery::default()
    };
    assert_eq!(names(&by_concern_and_payment), vec!["Towson Trauma Center"]);

    let by_language = DirectoryQuery {
        language: Some("spanish".to_string()),
        ..DirectoryQuery::default()
    };
    assert_eq!(names(&by_language), vec!["Harbor Counseling"]);

    let by_zip_prefix = DirectoryQuery {
        zip: Some("2120".to_string()),
        ..DirectoryQuery::default()
    };
    assert_eq!(
        names(&by_zip_prefix),
        vec!["Family Services Agency", "Towson Trauma Center"]
    );

    let by_text = DirectoryQuery {
        q: Some("HARBOR".to_string()),
        ..DirectoryQuery::default()
    };
    assert_eq!(names(&by_text), vec!["Harbor Counseling"]);
}

#[test]
fn search_rejects_unknown_terms_per_field() {
    let (service, _) = build_service(catalog());
    let query = DirectoryQuery {
        kind: Some("clinic".to_string()),
        format: Some("carrier pigeon".to_string()),
        zip: Some("21".to_string()),
        ..DirectoryQuery::default()
    };

    let err = service.search(&query).expect_err("invalid query");

    match &err {
        DirectoryServiceError::Validation(errors) => {
            assert!(errors.contains("kind"));
            assert!(errors.contains("format"));
            assert!(errors.contains("zip"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn search_is_paginated() {
    let listings = (1..=30)
        .map(|n| listing(&format!("l-{n}"), &format!("Listing {n}")))
        .collect();
    let (service, _) = build_service(listings);

    let page = service
        .search(&DirectoryQuery {
            page: Some(2),
            limit: Some(25),
            ..DirectoryQuery::default()
        })
        .expect("search");

    assert_eq!(page.items.len(), 5);
    assert_eq!(page.total_count, 30);
    assert!(!page.has_more);
}

#[test]
fn profile_summarizes_published_reviews_only() {
    let (service, inbox) = build_service(catalog());
    add_review(&inbox, "harbor", 5, ReviewStatus::Published);
    add_review(&inbox, "harbor", 4, ReviewStatus::Published);
    add_review(&inbox, "harbor", 1, ReviewStatus::Pending);
    add_review(&inbox, "towson", 2, ReviewStatus::Published);

    let profile = service
        .profile(&ListingId("harbor".to_string()))
        .expect("profile");

    assert_eq!(profile.listing.name, "Harbor Counseling");
    assert_eq!(profile.reviews.count, 2);
    assert_eq!(profile.reviews.average_rating, Some(4.5));
    assert!(!profile.claimed);
}

#[test]
fn profile_of_hidden_listing_is_not_found() {
    let (service, _) = build_service(catalog());

    for id in ["closed", "unverified", "nope"] {
        let err = service
            .profile(&ListingId(id.to_string()))
            .expect_err("hidden");
        assert!(matches!(err, DirectoryServiceError::NotFound(_)), "{id}");
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
