//! Board controller: translates surface signals into store operations.
//!
//! # Responsibility
//! - Route editor submits to create/update based on id presence.
//! - Resolve drag-drop `(payload, column)` events into status changes.
//! - Turn quick-capture text into a draft and confirmed deletions into deletes.
//! - Hold the active view filter and the open editor session.
//!
//! # Invariants
//! - No business rule lives here; validation and persistence belong to the
//!   store.
//! - A rejected editor submit keeps the editor open with the error attached.
//! - Deletion only happens with an explicit `DeleteConfirmation::Confirmed`.

use crate::model::project::{
    parse_tags_input, Priority, Project, ProjectDraft, ProjectId, ProjectStatus,
};
use crate::repo::project_repo::ProjectPersistence;
use crate::service::id_generator::{IdGenerator, TimestampIdGenerator};
use crate::service::project_store::{Committed, ProjectStore, StoreError, StoreResult};
use crate::view::board_view::{BoardView, CategoryFilter, PriorityFilter, ViewFilter};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Outcome of the external confirmation step preceding a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteConfirmation {
    Confirmed,
    Declined,
}

/// Controller-level errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    Store(StoreError),
    /// Submit requested while no editor session is open.
    EditorClosed,
}

impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::EditorClosed => write!(f, "no project editor is open"),
        }
    }
}

impl Error for BoardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::EditorClosed => None,
        }
    }
}

impl From<StoreError> for BoardError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Field values of the full project editor.
///
/// `id == None` means the form creates a new project on submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorForm {
    pub id: Option<ProjectId>,
    pub title: String,
    pub category: String,
    pub priority: Priority,
    pub status: ProjectStatus,
    pub tags: Vec<String>,
    pub notes: String,
}

impl EditorForm {
    /// Blank form with full-editor defaults.
    pub fn new_project() -> Self {
        Self::from_parts(None, ProjectDraft::default())
    }

    /// Form pre-filled with a copy of `project`.
    pub fn for_project(project: &Project) -> Self {
        Self::from_parts(Some(project.id.clone()), project.to_draft())
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Tags rendered for a single comma-separated text field.
    pub fn tags_input(&self) -> String {
        self.tags.join(", ")
    }

    /// Replaces tags from a comma-separated text field.
    pub fn set_tags_input(&mut self, raw: &str) {
        self.tags = parse_tags_input(raw);
    }

    fn from_parts(id: Option<ProjectId>, draft: ProjectDraft) -> Self {
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

    fn into_parts(self) -> (Option<ProjectId>, ProjectDraft) {
        (
            self.id,
            ProjectDraft {
                title: self.title,
                category: self.category,
                priority: self.priority,
                status: self.status,
                tags: self.tags,
                notes: self.notes,
            },
        )
    }
}

/// Open editor state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSession {
    form: EditorForm,
    last_error: Option<StoreError>,
}

impl EditorSession {
    fn new(form: EditorForm) -> Self {
        Self {
            form,
            last_error: None,
        }
    }

    pub fn form(&self) -> &EditorForm {
        &self.form
    }

    /// Error from the most recent rejected submit, if any.
    pub fn last_error(&self) -> Option<&StoreError> {
        self.last_error.as_ref()
    }
}

/// Entry point for board surfaces (UI, CLI).
pub struct BoardController<P, G = TimestampIdGenerator> {
    store: ProjectStore<P, G>,
    filter: ViewFilter,
    editor: Option<EditorSession>,
}

impl<P: ProjectPersistence, G: IdGenerator> BoardController<P, G> {
    pub fn new(store: ProjectStore<P, G>) -> Self {
        Self {
            store,
            filter: ViewFilter::default(),
            editor: None,
        }
    }

    /// Read-only access to the underlying store.
    pub fn store(&self) -> &ProjectStore<P, G> {
        &self.store
    }

    pub fn into_store(self) -> ProjectStore<P, G> {
        self.store
    }

    /// Opens the editor for a new project, replacing any open session.
    pub fn open_new_editor(&mut self) -> &mut EditorForm {
        &mut self
            .editor
            .insert(EditorSession::new(EditorForm::new_project()))
            .form
    }

    /// Opens the editor on a copy of an existing project.
    ///
    /// Returns `None` (and leaves any open session alone) for unknown ids.
    pub fn open_editor_for(&mut self, id: &ProjectId) -> Option<&mut EditorForm> {
        let form = EditorForm::for_project(self.store.get(id)?);
        Some(&mut self.editor.insert(EditorSession::new(form)).form)
    }

    pub fn editor(&self) -> Option<&EditorSession> {
        self.editor.as_ref()
    }

    pub fn editor_form_mut(&mut self) -> Option<&mut EditorForm> {
        self.editor.as_mut().map(|session| &mut session.form)
    }

    pub fn cancel_editor(&mut self) {
        self.editor = None;
    }

    /// Submits the open editor.
    ///
    /// Closes the session on success. On a store rejection the session stays
    /// open and records the error.
    ///
    /// # Errors
    /// - `EditorClosed` when no session is open.
    /// - `Store(..)` for validation or not-found rejections.
    pub fn submit_editor(&mut self) -> Result<Committed<Project>, BoardError> {
        let form = match &self.editor {
            Some(session) => session.form.clone(),
            None => return Err(BoardError::EditorClosed),
        };

        match self.submit_form(form) {
            Ok(committed) => {
                self.editor = None;
                Ok(committed)
            }
            Err(err) => {
                if let Some(session) = self.editor.as_mut() {
                    session.last_error = Some(err.clone());
                }
                Err(err.into())
            }
        }
    }

    /// Creates or updates from a detached form, without session state.
    pub fn submit_form(&mut self, form: EditorForm) -> StoreResult<Committed<Project>> {
        match form.into_parts() {
            (Some(id), draft) => self.store.update(Project::from_draft(id, draft)),
            (None, draft) => self.store.create(draft),
        }
    }

    /// Handles a resolved drop of the card whose id is `payload` onto `column`.
    ///
    /// # Errors
    /// - `Store(Validation(UnknownStatus))` when `column` names no column.
    pub fn drop_on_column(
        &mut self,
        payload: &str,
        column: &str,
    ) -> Result<Committed<Option<Project>>, BoardError> {
        let id = ProjectId::new(payload.trim());
        debug!("event=board_drop module=controller id={id} column={column}");
        Ok(self.store.change_status_label(&id, column)?)
    }

    /// Moves a card to a typed column.
    pub fn move_project(
        &mut self,
        id: &ProjectId,
        status: ProjectStatus,
    ) -> Committed<Option<Project>> {
        self.store.change_status(id, status)
    }

    /// Creates a quick-capture draft from free text.
    ///
    /// Text is trimmed first; blank text is ignored and yields `Ok(None)`.
    pub fn quick_capture(&mut self, text: &str) -> Result<Option<Committed<Project>>, BoardError> {
        let text = text.trim();
        if text.is_empty() {
            debug!("event=quick_capture module=controller status=noop reason=blank");
            return Ok(None);
        }
        let committed = self.store.create(ProjectDraft::quick_capture(text))?;
        Ok(Some(committed))
    }

    /// Deletes a project after the surface collected confirmation.
    pub fn request_delete(
        &mut self,
        id: &ProjectId,
        confirmation: DeleteConfirmation,
    ) -> Committed<Option<Project>> {
        match confirmation {
            DeleteConfirmation::Confirmed => self.store.delete(id),
            DeleteConfirmation::Declined => {
                debug!("event=project_delete module=controller status=declined id={id}");
                Committed::unchanged(None)
            }
        }
    }

    pub fn filter(&self) -> &ViewFilter {
        &self.filter
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter.query = query.into();
    }

    pub fn set_category_filter(&mut self, category: CategoryFilter) {
        self.filter.category = category;
    }

    pub fn set_priority_filter(&mut self, priority: PriorityFilter) {
        self.filter.priority = priority;
    }

    pub fn clear_filters(&mut self) {
        self.filter = ViewFilter::default();
    }

    /// Derives the current board under the active filter.
    pub fn board(&self) -> BoardView<'_> {
        BoardView::build(self.store.projects(), &self.filter)
    }
}
