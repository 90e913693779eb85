//! Input records as delivered by the record source.
//!
//! Upstream storage is loosely typed: a list field may arrive as a native
//! JSON array, as a JSON-encoded string (`"[\"a\", \"b\"]"`), or as a bare
//! scalar. [`FieldValue`] models all three shapes once at ingestion, so the
//! builder never re-derives the shape at each use site.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

/// Parsed values of a single list-like record field.
/// Most fields carry a handful of entries; 4 inline slots cover the common case.
pub type FieldItems = SmallVec<[String; 4]>;

/// A record field that may be absent, a bare scalar, or a list of strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    List(Vec<String>),
    Scalar(String),
    #[default]
    Absent,
}

impl FieldValue {
    /// Normalize into a flat list of trimmed, non-empty strings.
    ///
    /// A scalar that looks like a JSON array is decoded with `serde_json`;
    /// anything unparsable degrades to a single-element list containing the
    /// raw string. This path never fails — malformed data yields a sparser
    /// graph, not an error.
    pub fn values(&self) -> FieldItems {
        let raw: FieldItems = match self {
            FieldValue::Absent => SmallVec::new(),
            FieldValue::List(items) => items.iter().cloned().collect(),
            FieldValue::Scalar(s) => {
                let trimmed = s.trim();
                if trimmed.starts_with('[') {
                    match serde_json::from_str::<Vec<String>>(trimmed) {
                        Ok(items) => items.into_iter().collect(),
                        Err(err) => {
                            debug!(field = %trimmed, %err, "malformed JSON list, treating as scalar");
                            SmallVec::from_elem(s.clone(), 1)
                        }
                    }
                } else {
                    SmallVec::from_elem(s.clone(), 1)
                }
            }
        };

        raw.into_iter()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .collect()
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Scalar(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Scalar(s)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::List(items)
    }
}

impl<const N: usize> From<[&str; N]> for FieldValue {
    fn from(items: [&str; N]) -> Self {
        FieldValue::List(items.iter().map(|s| s.to_string()).collect())
    }
}

/// One bibliographic record. Every field is optional; absence contributes
/// nothing to the graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaperRecord {
    pub title: Option<String>,
    pub authors: FieldValue,
    pub anode_materials: FieldValue,
    pub cathode_materials: FieldValue,
    pub organism_types: FieldValue,
    pub keywords: FieldValue,
    pub system_type: Option<String>,
    pub doi: Option<String>,
    pub year: Option<i32>,
}

impl PaperRecord {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn with_authors(mut self, authors: impl Into<FieldValue>) -> Self {
        self.authors = authors.into();
        self
    }

    pub fn with_anode_materials(mut self, materials: impl Into<FieldValue>) -> Self {
        self.anode_materials = materials.into();
        self
    }

    pub fn with_cathode_materials(mut self, materials: impl Into<FieldValue>) -> Self {
        self.cathode_materials = materials.into();
        self
    }

    pub fn with_organism_types(mut self, organisms: impl Into<FieldValue>) -> Self {
        self.organism_types = organisms.into();
        self
    }

    pub fn with_keywords(mut self, keywords: impl Into<FieldValue>) -> Self {
        self.keywords = keywords.into();
        self
    }

    pub fn with_system_type(mut self, system_type: impl Into<String>) -> Self {
        self.system_type = Some(system_type.into());
        self
    }
}
