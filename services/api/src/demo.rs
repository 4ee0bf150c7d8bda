use crate::infra::AppServices;
use care_navigator::config::NavigatorConfig;
use care_navigator::error::AppError;
use care_navigator::pagination::PageRequest;
use care_navigator::workflows::directory::{
    DirectoryImporter, Listing, ListingId, ListingKind,
};
use care_navigator::workflows::navigator::{
    Concern, Language, NavigatorSession, PaymentType, ServiceFormat, SessionId, StepSubmission,
};
use chrono::Utc;
use clap::Args;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Directory CSV to search instead of the built-in Baltimore sample.
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// ZIP code answered on the location step (defaults to 21231).
    #[arg(long)]
    pub(crate) zip: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    /// Directory CSV export to validate
    #[arg(long)]
    pub(crate) csv: PathBuf,
}

/// Parses a directory export and prints what a seed would load.
pub(crate) fn run_directory_check(args: CheckArgs) -> Result<(), AppError> {
    let listings = DirectoryImporter::from_path(&args.csv, Utc::now())?;

    println!("Directory import check: {}", args.csv.display());
    println!("- {} listings parsed", listings.len());

    let mut by_kind: BTreeMap<&'static str, usize> = BTreeMap::new();
    for listing in &listings {
        *by_kind.entry(listing.kind.label()).or_default() += 1;
    }
    for (kind, count) in by_kind {
        println!("  - {kind}: {count}");
    }

    let listed = listings.iter().filter(|listing| listing.is_listed()).count();
    println!(
        "- {} publicly listed | {} hidden (inactive or unverified)",
        listed,
        listings.len() - listed
    );
    Ok(())
}

/// Walks one seeker through the questionnaire and prints their matches.
pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { csv, zip } = args;
    let config = NavigatorConfig::default();
    let services = AppServices::in_memory(&config);

    let listings = match csv {
        Some(path) => DirectoryImporter::from_path(path, Utc::now())?,
        None => sample_listings(),
    };
    let seeded = services.directory_store.seed(listings)?;

    println!("Care navigator demo");
    println!("- {seeded} directory listings loaded");

    let mut session = NavigatorSession::new(SessionId::generate());
    let zip = zip.unwrap_or_else(|| "21231".to_string());
    for submission in demo_answers(&zip) {
        let step = session.current_step();
        match session.advance(&submission, services.navigator.areas()) {
            Ok(_) => println!("  [{}/7] {} answered", step.number(), step.label()),
            Err(err) => {
                println!("  [{}/7] {} rejected: {}", step.number(), step.label(), err);
                for (field, message) in session.errors().iter() {
                    println!("    - {field}: {message}");
                }
                return Ok(());
            }
        }
    }

    let response_id = session.submit(services.navigator.as_ref())?;
    println!("\nQuestionnaire submitted as {}", response_id);

    let results = services
        .navigator
        .results_for(&response_id, PageRequest::new(1, 5))?;
    println!(
        "Matching listings: {} (showing {})",
        results.total_count,
        results.items.len()
    );
    for listing in &results.items {
        println!(
            "  - {} [{}] {} | {}",
            listing.name,
            listing.kind.label(),
            listing.postal_code,
            listing.phone.as_deref().unwrap_or("no phone listed")
        );
    }
    if results.has_more {
        println!("  ...more results on the next page");
    }

    let stored = services.navigator.get(&response_id)?;
    println!(
        "\nStored for follow-up: {} urgency | {} service area | submitted {}",
        stored.urgency,
        stored.service_area,
        stored.submitted_at.format("%Y-%m-%d %H:%M UTC")
    );

    Ok(())
}

fn demo_answers(zip: &str) -> Vec<StepSubmission> {
    vec![
        StepSubmission::Concern {
            primary_concern: Some("anxiety".to_string()),
        },
        StepSubmission::Recipient {
            help_for: Some("self".to_string()),
        },
        StepSubmission::Urgency {
            urgency: Some("soon".to_string()),
        },
        StepSubmission::Format {
            service_format: Some(vec!["video".to_string(), "in_person".to_string()]),
        },
        StepSubmission::Payment {
            payment_type: Some("sliding_scale".to_string()),
            insurance_provider: None,
        },
        StepSubmission::Location {
            zip_code: Some(zip.to_string()),
        },
        StepSubmission::Preferences {
            provider_gender_preference: None,
            language_preference: None,
            open_to_community_programs: Some(true),
        },
    ]
}

struct SampleListing {
    id: &'static str,
    kind: ListingKind,
    name: &'static str,
    description: &'static str,
    issues: &'static [Concern],
    formats: &'static [ServiceFormat],
    payment_types: &'static [PaymentType],
    languages: &'static [Language],
    postal_code: &'static str,
    phone: &'static str,
}

const SAMPLE_DIRECTORY: &[SampleListing] = &[
    SampleListing {
        id: "harbor-counseling",
        kind: ListingKind::Provider,
        name: "Harbor Counseling",
        description: "Individual therapy for adults working through anxiety and trauma.",
        issues: &[Concern::Anxiety, Concern::Trauma, Concern::Stress],
        formats: &[ServiceFormat::Video, ServiceFormat::InPerson],
        payment_types: &[PaymentType::Insurance, PaymentType::SlidingScale],
        languages: &[Language::English, Language::Spanish],
        postal_code: "21231",
        phone: "410-555-0142",
    },
    SampleListing {
        id: "charm-city-family-services",
        kind: ListingKind::Organization,
        name: "Charm City Family Services",
        description: "Community agency offering family, grief, and youth programs.",
        issues: &[Concern::Grief, Concern::Relationships, Concern::Depression],
        formats: &[ServiceFormat::InPerson, ServiceFormat::Group],
        payment_types: &[PaymentType::Free, PaymentType::SlidingScale],
        languages: &[Language::English, Language::Amharic],
        postal_code: "21201",
        phone: "410-555-0178",
    },
    SampleListing {
        id: "hampden-mindful-therapy",
        kind: ListingKind::Provider,
        name: "Hampden Mindful Therapy",
        description: "Telehealth-first practice focused on anxiety, OCD, and life transitions.",
        issues: &[Concern::Anxiety, Concern::Ocd, Concern::LifeTransitions],
        formats: &[ServiceFormat::Video, ServiceFormat::Phone],
        payment_types: &[PaymentType::SelfPay, PaymentType::SlidingScale],
        languages: &[Language::English],
        postal_code: "21211",
        phone: "410-555-0113",
    },
    SampleListing {
        id: "towson-recovery-center",
        kind: ListingKind::Organization,
        name: "Towson Recovery Center",
        description: "Outpatient substance use treatment and peer support groups.",
        issues: &[Concern::SubstanceUse, Concern::Depression, Concern::Trauma],
        formats: &[ServiceFormat::InPerson, ServiceFormat::Group],
        payment_types: &[PaymentType::Insurance, PaymentType::Free],
        languages: &[Language::English],
        postal_code: "21204",
        phone: "410-555-0190",
    },
    SampleListing {
        id: "glen-burnie-wellness",
        kind: ListingKind::Provider,
        name: "Glen Burnie Wellness",
        description: "Adult and adolescent therapy for mood disorders and ADHD.",
        issues: &[Concern::Bipolar, Concern::Adhd, Concern::Anxiety],
        formats: &[ServiceFormat::InPerson, ServiceFormat::Video],
        payment_types: &[PaymentType::Insurance],
        languages: &[Language::English, Language::Korean],
        postal_code: "21061",
        phone: "410-555-0165",
    },
    SampleListing {
        id: "fells-point-collective",
        kind: ListingKind::Organization,
        name: "Fells Point Wellness Collective",
        description: "Low-cost group and individual sessions run by licensed clinicians.",
        issues: &[Concern::Anxiety, Concern::Stress, Concern::EatingDisorders],
        formats: &[ServiceFormat::Group, ServiceFormat::Video],
        payment_types: &[PaymentType::SlidingScale, PaymentType::Free],
        languages: &[Language::English, Language::French],
        postal_code: "21231",
        phone: "410-555-0127",
    },
];

/// Built-in Baltimore-area directory used when no CSV is configured.
pub(crate) fn sample_listings() -> Vec<Listing> {
    let created_at = Utc::now();
    SAMPLE_DIRECTORY
        .iter()
        .map(|sample| Listing {
            id: ListingId(sample.id.to_string()),
            kind: sample.kind,
            name: sample.name.to_string(),
            description: sample.description.to_string(),
            issues: sample.issues.iter().copied().collect::<BTreeSet<_>>(),
            formats: sample.formats.iter().copied().collect(),
            payment_types: sample.payment_types.iter().copied().collect(),
            languages: sample.languages.iter().copied().collect(),
            postal_code: sample.postal_code.to_string(),
            phone: Some(sample.phone.to_string()),
            email: Some(format!("intake@{}.example.org", sample.id)),
            website: None,
            active: true,
            verified: true,
            claimed_by: None,
            created_at,
        })
        .collect()
}
