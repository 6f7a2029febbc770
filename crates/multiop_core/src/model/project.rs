//! Project domain model.
//!
//! # Responsibility
//! - Define the project record persisted in the board slot.
//! - Map priority/status enums to their stable wire labels.
//! - Build drafts for the full editor and the quick-capture path.
//!
//! # Invariants
//! - `id` is opaque, immutable once assigned and never blank.
//! - `title` must not be blank after trimming for stored records.
//! - Wire labels (`Alta`, `Média`, `Backlog`, ...) never change; the persisted
//!   slot depends on them.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Category assigned to projects created from the full editor.
pub const DEFAULT_CATEGORY: &str = "Exploratório";
/// Category assigned to quick-capture drafts.
pub const QUICK_CAPTURE_CATEGORY: &str = "Rascunho";
/// Tag attached to every quick-capture draft.
pub const QUICK_CAPTURE_TAG: &str = "quick";
/// Title used when quick-capture text yields no usable title.
pub const QUICK_CAPTURE_FALLBACK_TITLE: &str = "Rascunho rápido";
/// Maximum title length (in characters) derived from quick-capture text.
pub const QUICK_CAPTURE_TITLE_MAX_CHARS: usize = 60;

/// Opaque project identifier.
///
/// Serialized as a bare string so stored slots stay compatible with plain
/// text drag payloads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl Display for ProjectId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ProjectId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Project priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    #[serde(rename = "Alta")]
    High,
    #[serde(rename = "Média", alias = "Media")]
    Medium,
    #[serde(rename = "Baixa")]
    Low,
}

impl Priority {
    /// All priorities in editor display order.
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    /// Stable wire/display label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "Alta",
            Self::Medium => "Média",
            Self::Low => "Baixa",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ProjectValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "Alta" => Ok(Self::High),
            "Média" | "Media" => Ok(Self::Medium),
            "Baixa" => Ok(Self::Low),
            other => Err(ProjectValidationError::UnknownPriority(other.to_string())),
        }
    }
}

/// Workflow stage; one board column per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectStatus {
    Backlog,
    Doing,
    Review,
    Done,
}

impl ProjectStatus {
    /// Board columns in left-to-right order.
    pub const ALL: [ProjectStatus; 4] = [
        ProjectStatus::Backlog,
        ProjectStatus::Doing,
        ProjectStatus::Review,
        ProjectStatus::Done,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Backlog => "Backlog",
            Self::Doing => "Doing",
            Self::Review => "Review",
            Self::Done => "Done",
        }
    }

    /// Zero-based column index, matching `ProjectStatus::ALL`.
    pub fn column_index(self) -> usize {
        match self {
            Self::Backlog => 0,
            Self::Doing => 1,
            Self::Review => 2,
            Self::Done => 3,
        }
    }
}

impl Default for ProjectStatus {
    fn default() -> Self {
        Self::Backlog
    }
}

impl Display for ProjectStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = ProjectValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "Backlog" => Ok(Self::Backlog),
            "Doing" => Ok(Self::Doing),
            "Review" => Ok(Self::Review),
            "Done" => Ok(Self::Done),
            other => Err(ProjectValidationError::UnknownStatus(other.to_string())),
        }
    }
}

/// Validation failures for project input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectValidationError {
    /// Title is empty or whitespace-only.
    BlankTitle,
    /// Identifier is empty or whitespace-only.
    BlankId,
    /// Status label does not name a board column.
    UnknownStatus(String),
    /// Priority label is not one of `Alta|Média|Baixa`.
    UnknownPriority(String),
}

impl Display for ProjectValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "project title must not be blank"),
            Self::BlankId => write!(f, "project id must not be blank"),
            Self::UnknownStatus(value) => write!(
                f,
                "unknown status `{value}`; expected Backlog|Doing|Review|Done"
            ),
            Self::UnknownPriority(value) => {
                write!(f, "unknown priority `{value}`; expected Alta|Média|Baixa")
            }
        }
    }
}

impl Error for ProjectValidationError {}

/// Canonical project record.
///
/// Field set and names mirror the persisted slot layout exactly. `tags` and
/// `notes` tolerate absence in stored data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub category: String,
    pub priority: Priority,
    pub status: ProjectStatus,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub notes: String,
}

impl Project {
    /// Materializes a draft under the given identity.
    pub fn from_draft(id: ProjectId, draft: ProjectDraft) -> Self {
        Self {
            id,
            title: draft.title,
            category: draft.category,
            priority: draft.priority,
            status: draft.status,
            tags: draft.tags,
            notes: draft.notes,
        }
    }

    /// Returns the editable fields of this record as a draft.
    pub fn to_draft(&self) -> ProjectDraft {
        ProjectDraft {
            title: self.title.clone(),
            category: self.category.clone(),
            priority: self.priority,
            status: self.status,
            tags: self.tags.clone(),
            notes: self.notes.clone(),
        }
    }

    /// Validates record-level invariants.
    ///
    /// # Errors
    /// - `BlankId` when `id` is empty or whitespace-only.
    /// - `BlankTitle` when `title` trims to empty.
    pub fn validate(&self) -> Result<(), ProjectValidationError> {
        if self.id.is_blank() {
            return Err(ProjectValidationError::BlankId);
        }
        validate_title(&self.title)
    }
}

/// Project fields before an identity is assigned.
///
/// `Default` yields the values the full editor starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDraft {
    pub title: String,
    pub category: String,
    pub priority: Priority,
    pub status: ProjectStatus,
    pub tags: Vec<String>,
    pub notes: String,
}

impl Default for ProjectDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
            priority: Priority::default(),
            status: ProjectStatus::default(),
            tags: Vec::new(),
            notes: String::new(),
        }
    }
}

impl ProjectDraft {
    /// Creates an editor draft with the given title and default classification.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Builds the quick-capture draft for free text.
    ///
    /// # Contract
    /// - Title is the first 60 characters of `text`, or
    ///   `QUICK_CAPTURE_FALLBACK_TITLE` when that is blank.
    /// - Category `Rascunho`, priority `Baixa`, status `Backlog`, tags `["quick"]`.
    /// - Notes keep the full text.
    pub fn quick_capture(text: &str) -> Self {
        let mut title: String = text.chars().take(QUICK_CAPTURE_TITLE_MAX_CHARS).collect();
        if title.trim().is_empty() {
            title = QUICK_CAPTURE_FALLBACK_TITLE.to_string();
        }

        Self {
            title,
            category: QUICK_CAPTURE_CATEGORY.to_string(),
            priority: Priority::Low,
            status: ProjectStatus::Backlog,
            tags: vec![QUICK_CAPTURE_TAG.to_string()],
            notes: text.to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), ProjectValidationError> {
        validate_title(&self.title)
    }
}

/// Parses comma-separated tag input into an ordered tag list.
///
/// Pieces are trimmed and empty pieces dropped; duplicates are kept.
pub fn parse_tags_input(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

fn validate_title(title: &str) -> Result<(), ProjectValidationError> {
    if title.trim().is_empty() {
        return Err(ProjectValidationError::BlankTitle);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{parse_tags_input, Priority, ProjectDraft, ProjectStatus};

    #[test]
    fn parse_tags_input_trims_and_drops_empty_pieces() {
        assert_eq!(
            parse_tags_input(" IA, educacional ,, ,IA"),
            vec!["IA", "educacional", "IA"]
        );
        assert!(parse_tags_input("  ").is_empty());
    }

    #[test]
    fn column_index_matches_board_order() {
        for (index, status) in ProjectStatus::ALL.iter().enumerate() {
            assert_eq!(status.column_index(), index);
        }
    }

    #[test]
    fn priority_accepts_unaccented_medium_alias() {
        assert_eq!("Media".parse::<Priority>().unwrap(), Priority::Medium);
        assert_eq!(" Média ".parse::<Priority>().unwrap(), Priority::Medium);
    }

    #[test]
    fn quick_capture_truncates_by_characters_not_bytes() {
        let text = "ç".repeat(80);
        let draft = ProjectDraft::quick_capture(&text);
        assert_eq!(draft.title.chars().count(), 60);
        assert_eq!(draft.notes, text);
    }
}
