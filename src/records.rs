//! Typed records decoded from the provider's loosely typed JSON collections.
//!
//! A record with a missing or mistyped field becomes a `MalformedRecord`;
//! `decode_collection` logs it and moves on to the next record.
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fmt;

/// Topic marking a repository as a Forge module.
pub const MODULE_TOPIC: &str = "module";
/// Topic marking a repository as a supported module.
pub const SUPPORTED_TOPIC: &str = "supported";
/// Endorsement value carried by supported Forge modules.
pub const SUPPORTED_ENDORSEMENT: &str = "supported";

/// A source repository and its topic tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryRecord {
    pub name: String,
    pub topics: BTreeSet<String>,
}

impl RepositoryRecord {
    pub fn has_topic(&self, topic: &str) -> bool {
        self.topics.contains(topic)
    }
}

/// A published Forge module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageRecord {
    /// Forge identifier, e.g. `puppetlabs-apache`.
    pub slug: String,
    /// Short module name used to build Forge URLs.
    pub name: String,
    /// Support tier; `None` when the Forge reports no endorsement.
    pub endorsement: Option<String>,
    /// Free-text source field, expected to embed a repository URL.
    pub source: String,
}

impl PackageRecord {
    pub fn is_endorsed_supported(&self) -> bool {
        self.endorsement.as_deref() == Some(SUPPORTED_ENDORSEMENT)
    }
}

/// Why a raw record could not be turned into a typed record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedRecord {
    NotAnObject,
    MissingField(&'static str),
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
    /// The module resolves to a repository record that was itself malformed.
    MalformedRepository(String),
}

impl fmt::Display for MalformedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedRecord::NotAnObject => f.write_str("record is not a JSON object"),
            MalformedRecord::MissingField(field) => write!(f, "missing field {field:?}"),
            MalformedRecord::WrongType { field, expected } => {
                write!(f, "field {field:?} is not {expected}")
            }
            MalformedRecord::MalformedRepository(name) => {
                write!(f, "source points at malformed repository {name:?}")
            }
        }
    }
}

impl std::error::Error for MalformedRecord {}

/// A record skipped during decoding, kept for the run summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordFailure {
    pub index: usize,
    pub label: Option<String>,
    /// GitHub or Forge page of the record, when its name is known.
    pub url: Option<String>,
    #[serde(serialize_with = "serialize_display")]
    pub error: MalformedRecord,
}

fn serialize_display<S: serde::Serializer>(
    error: &MalformedRecord,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

/// Records decoded from one collection plus the ones that were skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded<T> {
    pub records: Vec<T>,
    /// Position in the raw collection of each entry of `records`.
    pub indices: Vec<usize>,
    pub failures: Vec<RecordFailure>,
}

/// Decode every record of a collection, logging and skipping malformed ones.
///
/// `locate` turns a record label into the URL logged for the skipped record.
pub fn decode_collection<T, F, L>(
    collection: &str,
    raw: &[Value],
    decode: F,
    locate: L,
) -> Decoded<T>
where
    F: Fn(&Value) -> Result<T, MalformedRecord>,
    L: Fn(&str) -> String,
{
    let mut records = Vec::with_capacity(raw.len());
    let mut indices = Vec::with_capacity(raw.len());
    let mut failures = Vec::new();
    for (index, value) in raw.iter().enumerate() {
        match decode(value) {
            Ok(record) => {
                records.push(record);
                indices.push(index);
            }
            Err(error) => {
                let label = record_label(value);
                let url = label.as_deref().map(&locate);
                tracing::warn!(
                    collection,
                    index,
                    record = label.as_deref().unwrap_or("<unnamed>"),
                    url = url.as_deref().unwrap_or("<unknown>"),
                    error = %error,
                    "skipping malformed record"
                );
                failures.push(RecordFailure {
                    index,
                    label,
                    url,
                    error,
                });
            }
        }
    }
    Decoded {
        records,
        indices,
        failures,
    }
}

/// Decode a repository record: `{ "name": string, "topics": [string] }`.
pub fn decode_repository(value: &Value) -> Result<RepositoryRecord, MalformedRecord> {
    let object = as_object(value)?;
    let name = required_str(object, "name")?.to_string();
    let topics = match object.get("topics") {
        None => return Err(MalformedRecord::MissingField("topics")),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or(MalformedRecord::WrongType {
                        field: "topics",
                        expected: "an array of strings",
                    })
            })
            .collect::<Result<BTreeSet<_>, _>>()?,
        Some(_) => {
            return Err(MalformedRecord::WrongType {
                field: "topics",
                expected: "an array of strings",
            })
        }
    };
    Ok(RepositoryRecord { name, topics })
}

/// Decode a Forge module record.
///
/// The source is read from a top-level `source` key when present, otherwise
/// from `metadata.source` (the shape returned by the Forge API). A missing
/// `name` is derived from the slug by stripping the `<org>-` prefix.
pub fn decode_package(value: &Value, org: &str) -> Result<PackageRecord, MalformedRecord> {
    let object = as_object(value)?;
    let slug = required_str(object, "slug")?.to_string();
    let endorsement = match object.get("endorsement") {
        None => return Err(MalformedRecord::MissingField("endorsement")),
        Some(Value::Null) => None,
        Some(Value::String(endorsement)) => Some(endorsement.clone()),
        Some(_) => {
            return Err(MalformedRecord::WrongType {
                field: "endorsement",
                expected: "a string or null",
            })
        }
    };
    let source = if object.contains_key("source") {
        required_str(object, "source")?.to_string()
    } else {
        let metadata = object
            .get("metadata")
            .ok_or(MalformedRecord::MissingField("metadata"))?
            .as_object()
            .ok_or(MalformedRecord::WrongType {
                field: "metadata",
                expected: "an object",
            })?;
        required_str(metadata, "source")?.to_string()
    };
    let name = match object.get("name") {
        None => module_name(&slug, org).to_string(),
        Some(Value::String(name)) => name.clone(),
        Some(_) => {
            return Err(MalformedRecord::WrongType {
                field: "name",
                expected: "a string",
            })
        }
    };
    Ok(PackageRecord {
        slug,
        name,
        endorsement,
        source,
    })
}

/// Module name from a Forge slug: `puppetlabs-apache` becomes `apache`.
pub fn module_name<'a>(slug: &'a str, org: &str) -> &'a str {
    slug.strip_prefix(org)
        .and_then(|rest| rest.strip_prefix(['-', '/']))
        .filter(|rest| !rest.is_empty())
        .unwrap_or(slug)
}

fn as_object(value: &Value) -> Result<&Map<String, Value>, MalformedRecord> {
    value.as_object().ok_or(MalformedRecord::NotAnObject)
}

fn required_str<'a>(
    object: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, MalformedRecord> {
    match object.get(field) {
        None => Err(MalformedRecord::MissingField(field)),
        Some(Value::String(text)) => Ok(text.as_str()),
        Some(_) => Err(MalformedRecord::WrongType {
            field,
            expected: "a string",
        }),
    }
}

fn record_label(value: &Value) -> Option<String> {
    ["slug", "name"]
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .map(str::to_string)
}

#[cfg(test)]
#[path = "records_tests.rs"]
mod tests;
