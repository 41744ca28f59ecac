use crate::error::StorageError;
use crate::id::ServerId;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

/// Flat field-name to value mapping, the unit the record store reads and writes.
pub type FieldMap = BTreeMap<String, String>;

/// Maximum length of a short description, in characters.
pub const SHORT_DESCRIPTION_MAX_CHARS: usize = 80;

/// Field names of a stored record.
pub mod field {
    pub const ID: &str = "id";
    pub const NAME: &str = "name";
    pub const REPOSITORY_URL: &str = "github_url";
    pub const DESCRIPTION: &str = "description";
    pub const SHORT_DESCRIPTION: &str = "short_description";
    pub const STATUS: &str = "status";
    pub const ERROR: &str = "error";
    pub const CREATED_AT: &str = "created_at";
    pub const UPDATED_AT: &str = "updated_at";
    pub const STARS: &str = "stars";
    pub const FORKS: &str = "forks";
    pub const VIEWS: &str = "views";
    pub const TAGS: &str = "tags";
    pub const LANGUAGE: &str = "language";
}

/// Enrichment state of a record.
///
/// Records start as `Processing`; `Completed` and `Failed` are only left
/// again when the record is explicitly re-enriched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    Processing,
    Completed,
    Failed,
}

impl RecordStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::Processing => "processing",
            RecordStatus::Completed => "completed",
            RecordStatus::Failed => "failed",
        }
    }
}

impl Display for RecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordStatus {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "processing" => Ok(RecordStatus::Processing),
            "completed" => Ok(RecordStatus::Completed),
            "failed" => Ok(RecordStatus::Failed),
            other => Err(StorageError::InvalidData(format!(
                "unknown record status '{other}'"
            ))),
        }
    }
}

/// One directory entry as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerRecord {
    pub id: ServerId,
    pub name: String,
    #[serde(rename = "github_url")]
    pub repository_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    pub status: RecordStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub created_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stars: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forks: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl ServerRecord {
    /// Creates a freshly submitted record in the `Processing` state.
    pub fn new(
        id: ServerId,
        name: impl Into<String>,
        repository_url: impl Into<String>,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            repository_url: repository_url.into(),
            description: None,
            short_description: None,
            status: RecordStatus::Processing,
            error: None,
            created_at: now,
            updated_at: Some(now),
            stars: None,
            forks: None,
            views: None,
            tags: None,
            language: None,
        }
    }

    /// Flattens the record into store fields. Absent optional values are omitted.
    pub fn to_fields(&self) -> FieldMap {
        let mut fields = FieldMap::new();
        fields.insert(field::ID.into(), self.id.to_string());
        fields.insert(field::NAME.into(), self.name.clone());
        fields.insert(field::REPOSITORY_URL.into(), self.repository_url.clone());
        fields.insert(field::STATUS.into(), self.status.to_string());
        fields.insert(field::CREATED_AT.into(), self.created_at.to_string());

        let optional = [
            (field::DESCRIPTION, self.description.clone()),
            (field::SHORT_DESCRIPTION, self.short_description.clone()),
            (field::ERROR, self.error.clone()),
            (field::UPDATED_AT, self.updated_at.map(|ts| ts.to_string())),
            (field::STARS, self.stars.map(|v| v.to_string())),
            (field::FORKS, self.forks.map(|v| v.to_string())),
            (field::VIEWS, self.views.map(|v| v.to_string())),
            (field::LANGUAGE, self.language.clone()),
        ];
        for (name, value) in optional {
            if let Some(value) = value {
                fields.insert(name.into(), value);
            }
        }

        if let Some(tags) = &self.tags {
            // serializing a list of strings cannot fail
            if let Ok(encoded) = serde_json::to_string(tags) {
                fields.insert(field::TAGS.into(), encoded);
            }
        }

        fields
    }

    /// Rebuilds a record from store fields.
    ///
    /// Empty values are treated as absent. Missing `status` reads as
    /// `Processing`; a missing or malformed `created_at` is invalid data.
    pub fn from_fields(id: &ServerId, fields: &FieldMap) -> Result<Self, StorageError> {
        let get = |name: &str| {
            fields
                .get(name)
                .map(String::as_str)
                .filter(|value| !value.is_empty())
        };

        let status = match get(field::STATUS) {
            Some(raw) => raw.parse()?,
            None => RecordStatus::Processing,
        };

        let created_at = get(field::CREATED_AT)
            .ok_or_else(|| {
                StorageError::InvalidData(format!("record '{id}' has no created_at field"))
            })
            .and_then(|raw| parse_timestamp(id, field::CREATED_AT, raw))?;

        let updated_at = get(field::UPDATED_AT)
            .map(|raw| parse_timestamp(id, field::UPDATED_AT, raw))
            .transpose()?;

        let tags = get(field::TAGS)
            .map(|raw| {
                serde_json::from_str::<Vec<String>>(raw).map_err(|e| {
                    StorageError::InvalidData(format!("record '{id}' has invalid tags: {e}"))
                })
            })
            .transpose()?;

        Ok(Self {
            id: id.clone(),
            name: get(field::NAME).unwrap_or_default().to_owned(),
            repository_url: get(field::REPOSITORY_URL).unwrap_or_default().to_owned(),
            description: get(field::DESCRIPTION).map(str::to_owned),
            short_description: get(field::SHORT_DESCRIPTION).map(str::to_owned),
            status,
            error: get(field::ERROR).map(str::to_owned),
            created_at,
            updated_at,
            stars: parse_count(id, field::STARS, get(field::STARS))?,
            forks: parse_count(id, field::FORKS, get(field::FORKS))?,
            views: parse_count(id, field::VIEWS, get(field::VIEWS))?,
            tags,
            language: get(field::LANGUAGE).map(str::to_owned),
        })
    }
}

fn parse_timestamp(id: &ServerId, name: &str, raw: &str) -> Result<Timestamp, StorageError> {
    raw.parse::<Timestamp>().map_err(|e| {
        StorageError::InvalidData(format!("record '{id}' has invalid {name} '{raw}': {e}"))
    })
}

fn parse_count(id: &ServerId, name: &str, raw: Option<&str>) -> Result<Option<u64>, StorageError> {
    raw.map(|value| {
        value.parse::<u64>().map_err(|e| {
            StorageError::InvalidData(format!("record '{id}' has invalid {name} '{value}': {e}"))
        })
    })
    .transpose()
}

/// Generated descriptive text for a record.
///
/// The short description is clamped to [`SHORT_DESCRIPTION_MAX_CHARS`] on
/// construction, so every `Enrichment` in circulation honours the limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enrichment {
    description: String,
    short_description: String,
}

impl Enrichment {
    pub fn new(description: impl Into<String>, short_description: impl AsRef<str>) -> Self {
        Self {
            description: description.into().trim().to_owned(),
            short_description: clamp_short_description(short_description.as_ref()),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn short_description(&self) -> &str {
        &self.short_description
    }
}

/// Trims `text` and truncates it to at most [`SHORT_DESCRIPTION_MAX_CHARS`]
/// characters, ending in `…` when something was cut.
pub fn clamp_short_description(text: &str) -> String {
    let text = text.trim();
    if text.chars().count() <= SHORT_DESCRIPTION_MAX_CHARS {
        return text.to_owned();
    }

    let mut clamped: String = text.chars().take(SHORT_DESCRIPTION_MAX_CHARS - 1).collect();
    clamped.truncate(clamped.trim_end().len());
    clamped.push('…');
    clamped
}

/// Outcome of an enrichment run, written back onto the record.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusUpdate {
    Completed(Enrichment),
    Failed { detail: String },
}

impl StatusUpdate {
    pub fn status(&self) -> RecordStatus {
        match self {
            StatusUpdate::Completed(_) => RecordStatus::Completed,
            StatusUpdate::Failed { .. } => RecordStatus::Failed,
        }
    }

    /// The field group this outcome overwrites.
    ///
    /// A completed run writes an empty `error` so a detail left by an
    /// earlier failed run no longer reads back.
    pub fn into_fields(self, now: Timestamp) -> FieldMap {
        let mut fields = FieldMap::new();
        fields.insert(field::STATUS.into(), self.status().to_string());
        fields.insert(field::UPDATED_AT.into(), now.to_string());

        match self {
            StatusUpdate::Completed(enrichment) => {
                fields.insert(field::DESCRIPTION.into(), enrichment.description);
                fields.insert(
                    field::SHORT_DESCRIPTION.into(),
                    enrichment.short_description,
                );
                fields.insert(field::ERROR.into(), String::new());
            }
            StatusUpdate::Failed { detail } => {
                fields.insert(field::ERROR.into(), detail);
            }
        }

        fields
    }
}
