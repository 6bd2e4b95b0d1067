//! Portfolio content records.
//!
//! The bundled content lives in `content/portfolio.json` and is compiled
//! into the crate; `SiteContent::load` reads an alternative file from disk.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::ContentError;

const BUNDLED: &str = include_str!("../content/portfolio.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub title: String,
    pub description: String,
    pub image: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Source repository; an empty string in the JSON means none.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub github: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub live: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "AWS")]
    Aws,
    #[serde(rename = "Azure")]
    Azure,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Aws => "AWS",
            Self::Azure => "Azure",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateEntry {
    pub title: String,
    pub provider: String,
    /// Path of the certificate document.
    pub pdf: String,
    pub platform: Platform,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillEntry {
    pub name: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEntry {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub offerings: Vec<String>,
}

/// Which certificates the certificates section lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificateFilter {
    /// Overview mode: only the per-platform summary cards are shown.
    #[default]
    All,
    Platform(Platform),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteContent {
    pub skills: Vec<SkillEntry>,
    pub services: Vec<ServiceEntry>,
    pub projects: Vec<ProjectEntry>,
    pub certificates: Vec<CertificateEntry>,
}

impl SiteContent {
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load content from a JSON file on disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ContentError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ContentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// The content bundled with the crate.
    pub fn portfolio() -> Result<Self, ContentError> {
        Self::from_json(BUNDLED)
    }

    /// Certificates listed under `filter`, in content order.
    ///
    /// `All` lists none: the overview only shows the platform cards.
    pub fn filter_certificates(&self, filter: CertificateFilter) -> Vec<&CertificateEntry> {
        match filter {
            CertificateFilter::All => Vec::new(),
            CertificateFilter::Platform(platform) => self
                .certificates
                .iter()
                .filter(|c| c.platform == platform)
                .collect(),
        }
    }

    /// Count shown on a platform's summary card.
    pub fn platform_count(&self, platform: Platform) -> usize {
        self.certificates.iter().filter(|c| c.platform == platform).count()
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
