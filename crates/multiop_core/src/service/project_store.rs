//! Authoritative in-memory project board.
//!
//! # Responsibility
//! - Own the ordered project sequence (newest created first).
//! - Apply create/update/delete/status-change mutations.
//! - Write the full sequence through to persistence after every mutation.
//!
//! # Invariants
//! - Ids are unique across the sequence and never change after assignment.
//! - No stored project has a blank title.
//! - Update and status change keep the record's position.
//! - A failed save never rolls back the in-memory mutation; memory is the
//!   source of truth for the rest of the session.
//! - Rejected operations (validation, not found) leave state and storage
//!   untouched.
//! - Loaded records are repaired one by one, never discarded as a whole:
//!   blank-title records are dropped, blank or duplicate ids are reassigned.

use crate::model::project::{
    Project, ProjectDraft, ProjectId, ProjectStatus, ProjectValidationError,
};
use crate::repo::project_repo::{ProjectPersistence, RepoError};
use crate::service::id_generator::{IdGenerator, TimestampIdGenerator};
use crate::service::seed::sample_projects;
use log::{debug, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that reject a store operation without mutating anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    Validation(ProjectValidationError),
    NotFound(ProjectId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "project not found: {id}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<ProjectValidationError> for StoreError {
    fn from(value: ProjectValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Non-fatal write-through failure attached to a committed mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistenceWarning {
    operation: &'static str,
    message: String,
}

impl PersistenceWarning {
    fn new(operation: &'static str, err: &RepoError) -> Self {
        Self {
            operation,
            message: err.to_string(),
        }
    }

    /// Store operation whose write-through failed (`create`, `move`, ...).
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

impl Display for PersistenceWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "board was updated but not saved after {}: {}",
            self.operation, self.message
        )
    }
}

/// Result of an accepted store operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Committed<T> {
    pub value: T,
    /// `false` when the operation was a benign no-op (stale id).
    pub changed: bool,
    /// Set when the in-memory change stands but could not be saved.
    pub warning: Option<PersistenceWarning>,
}

impl<T> Committed<T> {
    fn applied(value: T, warning: Option<PersistenceWarning>) -> Self {
        Self {
            value,
            changed: true,
            warning,
        }
    }

    pub(crate) fn unchanged(value: T) -> Self {
        Self {
            value,
            changed: false,
            warning: None,
        }
    }

    /// Whether the current state is reflected in storage.
    pub fn is_persisted(&self) -> bool {
        self.warning.is_none()
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

/// Start-up behavior of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    /// Seed the sample board when storage holds no projects.
    pub seed_samples: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self { seed_samples: true }
    }
}

/// Where the initial sequence came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardOrigin {
    /// Loaded from storage.
    Restored,
    /// Storage was empty, absent or unreadable; samples were seeded.
    Seeded,
    /// Storage was empty, absent or unreadable; seeding is disabled.
    Empty,
}

/// Owner of the canonical project sequence.
pub struct ProjectStore<P, G = TimestampIdGenerator> {
    persistence: P,
    ids: G,
    projects: Vec<Project>,
    origin: BoardOrigin,
    open_warning: Option<PersistenceWarning>,
}

impl<P: ProjectPersistence> ProjectStore<P> {
    /// Loads the board from `persistence` using the default id generator.
    pub fn open(persistence: P, options: StoreOptions) -> Self {
        Self::open_with_ids(persistence, TimestampIdGenerator::new(), options)
    }
}

impl<P: ProjectPersistence, G: IdGenerator> ProjectStore<P, G> {
    /// Loads the board from `persistence`, falling back to the sample set.
    ///
    /// Never fails: absent, empty and unreadable slots are all treated as a
    /// fresh board. A seeded board is written through immediately, unless the
    /// slot held records that were all dropped during repair; that slot is
    /// left as stored until the next mutation.
    pub fn open_with_ids(persistence: P, ids: G, options: StoreOptions) -> Self {
        let loaded = match persistence.load() {
            Ok(Some(projects)) => projects,
            Ok(None) => {
                info!("event=board_load module=store status=absent");
                Vec::new()
            }
            Err(err) => {
                warn!(
                    "event=board_load module=store status=error fallback=fresh_board error={}",
                    err
                );
                Vec::new()
            }
        };

        let stored_records = loaded.len();
        let (projects, repaired) = repair_loaded(loaded, &ids);
        let mut store = Self {
            persistence,
            ids,
            projects,
            origin: BoardOrigin::Restored,
            open_warning: None,
        };

        if !store.projects.is_empty() {
            info!(
                "event=board_load module=store status=ok total={} repaired={}",
                store.projects.len(),
                repaired
            );
            if repaired > 0 {
                store.open_warning = store.persist("repair");
            }
            return store;
        }

        if !options.seed_samples {
            store.origin = BoardOrigin::Empty;
            return store;
        }

        store.projects = sample_projects(&store.ids);
        store.origin = BoardOrigin::Seeded;
        info!(
            "event=board_seed module=store status=ok total={}",
            store.projects.len()
        );
        if stored_records > 0 {
            warn!(
                "event=board_seed module=store status=unsaved reason=unrepairable_slot stored={}",
                stored_records
            );
            return store;
        }
        store.open_warning = store.persist("seed");
        store
    }

    /// Write-through failure from opening (seed or repair), if any.
    pub fn open_warning(&self) -> Option<&PersistenceWarning> {
        self.open_warning.as_ref()
    }

    pub fn origin(&self) -> BoardOrigin {
        self.origin
    }

    /// Read-only view of the ordered sequence.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Owned copy of the ordered sequence.
    pub fn snapshot(&self) -> Vec<Project> {
        self.projects.clone()
    }

    pub fn get(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|project| &project.id == id)
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Creates a project from `draft` and prepends it to the board.
    ///
    /// # Errors
    /// - `Validation(BlankTitle)` when the draft title trims to empty.
    pub fn create(&mut self, draft: ProjectDraft) -> StoreResult<Committed<Project>> {
        if let Err(err) = draft.validate() {
            warn!("event=project_create module=store status=rejected reason={err}");
            return Err(err.into());
        }

        let mut id = self.ids.next_id();
        while self.position(&id).is_some() {
            id = self.ids.next_id();
        }

        let project = Project::from_draft(id, draft);
        self.projects.insert(0, project.clone());
        info!(
            "event=project_create module=store status=ok id={} total={}",
            project.id,
            self.projects.len()
        );

        let warning = self.persist("create");
        Ok(Committed::applied(project, warning))
    }

    /// Replaces every field of an existing project, keeping its position.
    ///
    /// # Errors
    /// - `NotFound` when no project has `record.id`.
    /// - `Validation(BlankTitle)` when the new title trims to empty.
    pub fn update(&mut self, record: Project) -> StoreResult<Committed<Project>> {
        let Some(index) = self.position(&record.id) else {
            warn!(
                "event=project_update module=store status=rejected reason=not_found id={}",
                record.id
            );
            return Err(StoreError::NotFound(record.id));
        };
        if let Err(err) = record.validate() {
            warn!(
                "event=project_update module=store status=rejected reason={} id={}",
                err, record.id
            );
            return Err(err.into());
        }

        self.projects[index] = record.clone();
        info!(
            "event=project_update module=store status=ok id={} position={}",
            record.id, index
        );

        let warning = self.persist("update");
        Ok(Committed::applied(record, warning))
    }

    /// Removes a project; a missing id is a no-op.
    ///
    /// Returns the removed record when one existed.
    pub fn delete(&mut self, id: &ProjectId) -> Committed<Option<Project>> {
        let Some(index) = self.position(id) else {
            info!("event=project_delete module=store status=noop id={id}");
            return Committed::unchanged(None);
        };

        let removed = self.projects.remove(index);
        info!(
            "event=project_delete module=store status=ok id={} total={}",
            id,
            self.projects.len()
        );

        let warning = self.persist("delete");
        Committed::applied(Some(removed), warning)
    }

    /// Moves a project to another column; a missing id is a no-op.
    ///
    /// Only `status` changes; position and all other fields are preserved.
    pub fn change_status(
        &mut self,
        id: &ProjectId,
        status: ProjectStatus,
    ) -> Committed<Option<Project>> {
        let Some(index) = self.position(id) else {
            info!("event=project_move module=store status=noop id={id}");
            return Committed::unchanged(None);
        };

        let project = &mut self.projects[index];
        let previous = project.status;
        project.status = status;
        let moved = project.clone();
        info!(
            "event=project_move module=store status=ok id={} from={} to={}",
            id, previous, status
        );

        let warning = self.persist("move");
        Committed::applied(Some(moved), warning)
    }

    /// Status change from a raw column label.
    ///
    /// # Errors
    /// - `Validation(UnknownStatus)` when `label` names no column; checked
    ///   before the id lookup.
    pub fn change_status_label(
        &mut self,
        id: &ProjectId,
        label: &str,
    ) -> StoreResult<Committed<Option<Project>>> {
        let status = label.parse::<ProjectStatus>().map_err(|err| {
            warn!("event=project_move module=store status=rejected reason={err} id={id}");
            StoreError::from(err)
        })?;
        Ok(self.change_status(id, status))
    }

    fn position(&self, id: &ProjectId) -> Option<usize> {
        self.projects.iter().position(|project| &project.id == id)
    }

    fn persist(&self, operation: &'static str) -> Option<PersistenceWarning> {
        let started_at = Instant::now();
        match self.persistence.save(&self.projects) {
            Ok(()) => {
                debug!(
                    "event=board_save module=store status=ok operation={} total={} duration_ms={}",
                    operation,
                    self.projects.len(),
                    started_at.elapsed().as_millis()
                );
                None
            }
            Err(err) => {
                warn!(
                    "event=board_save module=store status=error operation={} duration_ms={} error={}",
                    operation,
                    started_at.elapsed().as_millis(),
                    err
                );
                Some(PersistenceWarning::new(operation, &err))
            }
        }
    }
}

/// Makes loaded records satisfy the store invariants.
///
/// Returns the kept records in stored order and how many were dropped or
/// re-identified.
fn repair_loaded<G: IdGenerator>(loaded: Vec<Project>, ids: &G) -> (Vec<Project>, usize) {
    let mut taken: HashSet<ProjectId> = loaded
        .iter()
        .filter(|project| !project.id.is_blank())
        .map(|project| project.id.clone())
        .collect();
    let mut seen = HashSet::with_capacity(loaded.len());
    let mut repaired = 0;
    let mut kept = Vec::with_capacity(loaded.len());

    for (index, mut project) in loaded.into_iter().enumerate() {
        if project.title.trim().is_empty() {
            warn!(
                "event=board_load module=store status=repaired action=drop reason=blank_title index={} id={}",
                index, project.id
            );
            repaired += 1;
            continue;
        }

        if project.id.is_blank() || seen.contains(&project.id) {
            let mut fresh = ids.next_id();
            while taken.contains(&fresh) {
                fresh = ids.next_id();
            }
            warn!(
                "event=board_load module=store status=repaired action=reassign_id index={} old_id={} new_id={}",
                index, project.id, fresh
            );
            taken.insert(fresh.clone());
            project.id = fresh;
            repaired += 1;
        }

        seen.insert(project.id.clone());
        kept.push(project);
    }

    (kept, repaired)
}
