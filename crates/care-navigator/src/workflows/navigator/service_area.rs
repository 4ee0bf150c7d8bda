use std::fmt;

use serde::{Deserialize, Serialize};

/// Five-digit US postal code.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZipCode(String);

impl ZipCode {
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.len() == 5 && trimmed.bytes().all(|byte| byte.is_ascii_digit()) {
            Some(Self(trimmed.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Three-digit sectional prefix used as the locality proxy when matching.
    pub fn prefix(&self) -> &str {
        &self.0[..3]
    }
}

impl fmt::Display for ZipCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Geographic scope that every record of a deployment belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceArea {
    pub slug: String,
    pub name: String,
    pub zip_prefixes: Vec<String>,
}

impl ServiceArea {
    pub fn covers(&self, zip: &ZipCode) -> bool {
        self.zip_prefixes
            .iter()
            .any(|prefix| prefix.as_str() == zip.prefix())
    }
}

/// The known service areas, consulted by validation and submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceAreaCatalog {
    areas: Vec<ServiceArea>,
}

impl ServiceAreaCatalog {
    pub fn new(areas: Vec<ServiceArea>) -> Self {
        Self { areas }
    }

    pub fn standard() -> Self {
        Self::new(vec![ServiceArea {
            slug: "baltimore-metro".to_string(),
            name: "Baltimore Metropolitan Area".to_string(),
            zip_prefixes: ["210", "211", "212", "214"]
                .into_iter()
                .map(str::to_string)
                .collect(),
        }])
    }

    pub fn find(&self, slug: &str) -> Option<&ServiceArea> {
        self.areas.iter().find(|area| area.slug == slug)
    }

    pub fn area_for_zip(&self, zip: &ZipCode) -> Option<&ServiceArea> {
        self.areas.iter().find(|area| area.covers(zip))
    }

    pub fn areas(&self) -> &[ServiceArea] {
        &self.areas
    }
}
