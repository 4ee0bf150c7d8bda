//! CSV seeding for the directory.

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use super::domain::{Listing, ListingId, ListingKind};
use crate::workflows::navigator::vocabulary::Vocabulary;

#[derive(Debug)]
pub enum DirectoryImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidRow {
        row: usize,
        field: &'static str,
        message: String,
    },
    DuplicateId {
        row: usize,
        id: String,
    },
}

impl fmt::Display for DirectoryImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectoryImportError::Io(err) => write!(f, "failed to read directory export: {}", err),
            DirectoryImportError::Csv(err) => write!(f, "invalid directory CSV data: {}", err),
            DirectoryImportError::InvalidRow {
                row,
                field,
                message,
            } => write!(f, "row {row}: {field}: {message}"),
            DirectoryImportError::DuplicateId { row, id } => {
                write!(f, "row {row}: listing id '{id}' appears more than once")
            }
        }
    }
}

impl std::error::Error for DirectoryImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DirectoryImportError::Io(err) => Some(err),
            DirectoryImportError::Csv(err) => Some(err),
            DirectoryImportError::InvalidRow { .. } | DirectoryImportError::DuplicateId { .. } => {
                None
            }
        }
    }
}

impl From<std::io::Error> for DirectoryImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for DirectoryImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct DirectoryImporter;

impl DirectoryImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        imported_at: DateTime<Utc>,
    ) -> Result<Vec<Listing>, DirectoryImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, imported_at)
    }

    /// Parses every row, failing on the first invalid one. Row numbers count
    /// the header as row 1.
    pub fn from_reader<R: Read>(
        reader: R,
        imported_at: DateTime<Utc>,
    ) -> Result<Vec<Listing>, DirectoryImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut seen = HashSet::new();
        let mut listings = Vec::new();

        for (index, record) in csv_reader.deserialize::<DirectoryRow>().enumerate() {
            let row_number = index + 2;
            let row = record?;
            let listing = row.into_listing(row_number, imported_at)?;
            if !seen.insert(listing.id.clone()) {
                return Err(DirectoryImportError::DuplicateId {
                    row: row_number,
                    id: listing.id.0,
                });
            }
            listings.push(listing);
        }

        Ok(listings)
    }
}

#[derive(Debug, Deserialize)]
struct DirectoryRow {
    id: String,
    kind: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    issues: String,
    #[serde(default)]
    formats: String,
    #[serde(default)]
    payment_types: String,
    #[serde(default)]
    languages: String,
    postal_code: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    phone: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    email: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    website: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    active: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    verified: Option<String>,
}

impl DirectoryRow {
    fn into_listing(
        self,
        row: usize,
        imported_at: DateTime<Utc>,
    ) -> Result<Listing, DirectoryImportError> {
        let invalid = |field: &'static str, message: String| DirectoryImportError::InvalidRow {
            row,
            field,
            message,
        };

        if self.id.is_empty() {
            return Err(invalid("id", "must not be empty".to_string()));
        }
        if self.name.is_empty() {
            return Err(invalid("name", "must not be empty".to_string()));
        }
        let kind = ListingKind::parse(&self.kind)
            .ok_or_else(|| invalid("kind", format!("unknown listing kind '{}'", self.kind)))?;
        let postal_code = self.postal_code;
        if postal_code.len() != 5 || !postal_code.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(invalid(
                "postal_code",
                format!("'{postal_code}' is not a five digit ZIP code"),
            ));
        }

        Ok(Listing {
            id: ListingId(self.id),
            kind,
            name: self.name,
            description: self.description,
            issues: parse_terms(&self.issues).map_err(|msg| invalid("issues", msg))?,
            formats: parse_terms(&self.formats).map_err(|msg| invalid("formats", msg))?,
            payment_types: parse_terms(&self.payment_types)
                .map_err(|msg| invalid("payment_types", msg))?,
            languages: parse_terms(&self.languages).map_err(|msg| invalid("languages", msg))?,
            postal_code,
            phone: self.phone,
            email: self.email,
            website: self.website,
            active: parse_flag(self.active.as_deref(), true).map_err(|msg| invalid("active", msg))?,
            verified: parse_flag(self.verified.as_deref(), false)
                .map_err(|msg| invalid("verified", msg))?,
            claimed_by: None,
            created_at: imported_at,
        })
    }
}

/// `;`-separated vocabulary terms.
fn parse_terms<T: Vocabulary + Ord>(raw: &str) -> Result<BTreeSet<T>, String> {
    raw.split(';')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(|term| {
            T::parse(term).ok_or_else(|| {
                format!(
                    "unknown {} '{term}' (expected {})",
                    T::LABEL,
                    T::accepted_terms()
                )
            })
        })
        .collect()
}

fn parse_flag(raw: Option<&str>, default: bool) -> Result<bool, String> {
    match raw.map(str::to_ascii_lowercase).as_deref() {
        None => Ok(default),
        Some("true" | "yes" | "y" | "1") => Ok(true),
        Some("false" | "no" | "n" | "0") => Ok(false),
        Some(other) => Err(format!("'{other}' is not a yes/no value")),
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
