//! Derived board projections.
//!
//! # Responsibility
//! - Compute category options, filtered/searched subsets, status counts and
//!   column grouping from a project snapshot.
//!
//! # Invariants
//! - Every function here is pure: no mutation, no I/O, no logging.
//! - Derived sequences keep the relative order of the input sequence.
//! - Status counts cover the full collection, never the filtered subset, so
//!   narrowing the filter never makes projects look lost.

use crate::model::project::{Priority, Project, ProjectStatus, ProjectValidationError};
use std::collections::HashSet;

/// Label shown for the "no restriction" filter option.
pub const ALL_FILTER_LABEL: &str = "Todas";

/// Category filter option; `All` is the synthetic sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    /// Builds a filter from a picker value; the sentinel label maps to `All`.
    pub fn from_label(label: &str) -> Self {
        if label == ALL_FILTER_LABEL {
            Self::All
        } else {
            Self::Named(label.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_FILTER_LABEL,
            Self::Named(name) => name.as_str(),
        }
    }

    fn matches(&self, project: &Project) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => project.category == *name,
        }
    }
}

/// Priority filter option; `All` is the synthetic sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriorityFilter {
    #[default]
    All,
    Only(Priority),
}

impl PriorityFilter {
    /// Builds a filter from a picker value; the sentinel label maps to `All`.
    ///
    /// # Errors
    /// - `UnknownPriority` when `label` is neither the sentinel nor a priority.
    pub fn from_label(label: &str) -> Result<Self, ProjectValidationError> {
        if label.trim() == ALL_FILTER_LABEL {
            Ok(Self::All)
        } else {
            label.parse().map(Self::Only)
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => ALL_FILTER_LABEL,
            Self::Only(priority) => priority.as_str(),
        }
    }

    fn matches(&self, project: &Project) -> bool {
        match self {
            Self::All => true,
            Self::Only(priority) => project.priority == *priority,
        }
    }
}

/// Active filter criteria. `Default` is the cleared filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewFilter {
    pub category: CategoryFilter,
    pub priority: PriorityFilter,
    /// Free-text query; matched case-insensitively, not trimmed.
    pub query: String,
}

impl ViewFilter {
    pub fn is_cleared(&self) -> bool {
        *self == Self::default()
    }

    /// Whether `project` passes every criterion.
    pub fn matches(&self, project: &Project) -> bool {
        self.category.matches(project)
            && self.priority.matches(project)
            && query_matches(&self.query, project)
    }
}

/// Per-column project counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCounts {
    by_column: [usize; 4],
}

impl StatusCounts {
    pub fn get(&self, status: ProjectStatus) -> usize {
        self.by_column[status.column_index()]
    }

    pub fn total(&self) -> usize {
        self.by_column.iter().sum()
    }

    /// `(status, count)` pairs in board order.
    pub fn iter(&self) -> impl Iterator<Item = (ProjectStatus, usize)> + '_ {
        ProjectStatus::ALL
            .into_iter()
            .map(move |status| (status, self.get(status)))
    }
}

/// One rendered column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardColumn<'a> {
    pub status: ProjectStatus,
    /// Count over the full collection (header badge).
    pub total: usize,
    /// Filtered cards in sequence order.
    pub cards: Vec<&'a Project>,
}

/// Render-ready board derived from one snapshot and one filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView<'a> {
    pub columns: Vec<BoardColumn<'a>>,
    pub counts: StatusCounts,
    pub categories: Vec<CategoryFilter>,
    /// Number of cards passing the filter.
    pub visible: usize,
}

impl<'a> BoardView<'a> {
    pub fn build(projects: &'a [Project], view_filter: &ViewFilter) -> Self {
        let counts = counts(projects);
        let visible = filter(projects, view_filter);
        let visible_len = visible.len();
        let columns = group_by_status(&visible)
            .into_iter()
            .map(|(status, cards)| BoardColumn {
                status,
                total: counts.get(status),
                cards,
            })
            .collect();

        Self {
            columns,
            counts,
            categories: categories(projects),
            visible: visible_len,
        }
    }

    pub fn column(&self, status: ProjectStatus) -> &BoardColumn<'a> {
        &self.columns[status.column_index()]
    }
}

/// Category options: `All` followed by distinct categories in first-seen order.
pub fn categories(projects: &[Project]) -> Vec<CategoryFilter> {
    std::iter::once(CategoryFilter::All)
        .chain(
            category_names(projects)
                .into_iter()
                .map(|name| CategoryFilter::Named(name.to_string())),
        )
        .collect()
}

/// Distinct categories in first-seen order, without the sentinel.
pub fn category_names(projects: &[Project]) -> Vec<&str> {
    let mut seen = HashSet::new();
    projects
        .iter()
        .map(|project| project.category.as_str())
        .filter(|category| seen.insert(*category))
        .collect()
}

/// Keeps the projects that pass `view_filter`, in sequence order.
pub fn filter<'a>(projects: &'a [Project], view_filter: &ViewFilter) -> Vec<&'a Project> {
    projects
        .iter()
        .filter(|project| view_filter.matches(project))
        .collect()
}

/// Counts projects per column over the whole collection.
pub fn counts(projects: &[Project]) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for project in projects {
        counts.by_column[project.status.column_index()] += 1;
    }
    counts
}

/// Partitions `visible` into the four columns, preserving relative order.
pub fn group_by_status<'a>(visible: &[&'a Project]) -> Vec<(ProjectStatus, Vec<&'a Project>)> {
    let mut columns: Vec<(ProjectStatus, Vec<&'a Project>)> = ProjectStatus::ALL
        .iter()
        .map(|status| (*status, Vec::new()))
        .collect();
    for project in visible {
        columns[project.status.column_index()].1.push(*project);
    }
    columns
}

fn query_matches(query: &str, project: &Project) -> bool {
    if query.is_empty() {
        return true;
    }
    let haystack = format!(
        "{} {} {}",
        project.title,
        project.notes,
        project.tags.join(" ")
    )
    .to_lowercase();
    haystack.contains(&query.to_lowercase())
}
