use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use url::Url;

use crate::normalize::{normalize_field, Normalized};

/// A release date that survived coercion, or the verbatim string when the
/// upstream value did not match `YYYY/MM/DD`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PatchDate {
    Date(NaiveDate),
    Raw(String),
}

impl Default for PatchDate {
    fn default() -> Self {
        PatchDate::Raw(String::new())
    }
}

impl std::fmt::Display for PatchDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatchDate::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            PatchDate::Raw(raw) if raw.is_empty() => write!(f, "-"),
            PatchDate::Raw(raw) => write!(f, "{}", raw),
        }
    }
}

impl<'de> Deserialize<'de> for PatchDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(match normalize_field("ReleaseDate", &raw) {
            Normalized::Date(date) => PatchDate::Date(date),
            _ => PatchDate::Raw(raw),
        })
    }
}

/// Criticality flag: a real boolean when the upstream value is `true` /
/// `false` (as a JSON boolean or the string form), otherwise the verbatim
/// string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CriticalFlag {
    Flag(bool),
    Raw(String),
}

impl Default for CriticalFlag {
    fn default() -> Self {
        CriticalFlag::Raw(String::new())
    }
}

impl std::fmt::Display for CriticalFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CriticalFlag::Flag(flag) => write!(f, "{}", flag),
            CriticalFlag::Raw(raw) if raw.is_empty() => write!(f, "-"),
            CriticalFlag::Raw(raw) => write!(f, "{}", raw),
        }
    }
}

impl<'de> Deserialize<'de> for CriticalFlag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Flag(bool),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Flag(flag) => CriticalFlag::Flag(flag),
            Raw::Text(text) => match normalize_field("Critical", &text) {
                Normalized::Bool(flag) => CriticalFlag::Flag(flag),
                _ => CriticalFlag::Raw(text),
            },
        })
    }
}

/// A `filename:digest` pair from the catalog's checksum lists.
///
/// The upstream encoding is split on the first colon only; the digest is
/// opaque and not validated for length or charset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checksum {
    pub file: String,
    pub digest: String,
}

impl std::fmt::Display for Checksum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.digest.is_empty() {
            write!(f, "{}", self.file)
        } else {
            write!(f, "{}:{}", self.file, self.digest)
        }
    }
}

impl Serialize for Checksum {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Checksum {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.split_once(':') {
            Some((file, digest)) => Checksum {
                file: file.to_owned(),
                digest: digest.to_owned(),
            },
            None => Checksum {
                file: raw,
                digest: String::new(),
            },
        })
    }
}

/// One vendor patch entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Patch {
    pub name: String,

    /// Affected product names, encoded upstream as a comma-separated string.
    #[serde(deserialize_with = "products_list")]
    pub products: Vec<String>,

    pub platform: String,

    /// Detail page for the patch.
    #[serde(rename = "url", skip_serializing_if = "Option::is_none")]
    pub url: Option<Url>,

    #[serde(rename = "QFE_ID")]
    pub qfe_id: String,

    pub release_date: PatchDate,

    pub critical: CriticalFlag,

    /// Download locations for the patch files.
    pub patch_files: Vec<Url>,

    #[serde(rename = "SHA256sums")]
    pub sha256_sums: Vec<Checksum>,

    #[serde(rename = "MD5sums")]
    pub md5_sums: Vec<Checksum>,
}

/// A product version and the patches published for it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    pub version: String,
    pub patches: Vec<Patch>,
}

/// The catalog envelope: products in document order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    #[serde(rename = "Product")]
    pub products: Vec<Product>,
}

/// Parses the catalog JSON body into typed entities, applying the field
/// coercion rules as values are deserialized.
pub fn parse_catalog(body: &str) -> Result<Catalog> {
    serde_json::from_str(body).context("Failed to parse patch catalog JSON")
}

fn products_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    // The feed writes a joined string, but an already-split array passes
    // through unchanged.
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Joined(String),
        List(Vec<String>),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Joined(joined) => crate::normalize::split_products(&joined),
        Raw::List(list) => list,
    })
}
