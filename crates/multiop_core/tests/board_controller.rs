use multiop_core::{
    BoardController, BoardError, CategoryFilter, DeleteConfirmation, MemorySlotRepository,
    Priority, PriorityFilter, ProjectId, ProjectStatus, ProjectStore, SequentialIdGenerator,
    StoreError, StoreOptions,
};

type TestController<'a> = BoardController<&'a MemorySlotRepository, SequentialIdGenerator>;

fn controller(slot: &MemorySlotRepository) -> TestController<'_> {
    BoardController::new(ProjectStore::open_with_ids(
        slot,
        SequentialIdGenerator::new("p"),
        StoreOptions {
            seed_samples: false,
        },
    ))
}

fn seeded_controller(slot: &MemorySlotRepository) -> TestController<'_> {
    BoardController::new(ProjectStore::open_with_ids(
        slot,
        SequentialIdGenerator::new("seed"),
        StoreOptions::default(),
    ))
}

#[test]
fn new_editor_starts_from_defaults_and_creates_on_submit() {
    let slot = MemorySlotRepository::new();
    let mut board = controller(&slot);

    let form = board.open_new_editor();
    assert!(form.is_new());
    assert_eq!(form.category, "Exploratório");
    assert_eq!(form.priority, Priority::Medium);
    form.title = "Novo projeto".to_string();
    form.set_tags_input("a, b,,c ");

    let created = board.submit_editor().unwrap().into_value();

    assert!(board.editor().is_none());
    assert_eq!(created.id, ProjectId::from("p-1"));
    assert_eq!(created.tags, vec!["a", "b", "c"]);
    assert_eq!(board.store().len(), 1);
}

#[test]
fn rejected_submit_keeps_editor_open_with_error() {
    let slot = MemorySlotRepository::new();
    let mut board = controller(&slot);
    board.open_new_editor().title = "   ".to_string();

    let err = board.submit_editor().unwrap_err();

    assert!(matches!(err, BoardError::Store(StoreError::Validation(_))));
    let session = board.editor().unwrap();
    assert!(matches!(
        session.last_error(),
        Some(StoreError::Validation(_))
    ));
    assert!(board.store().is_empty());

    board.editor_form_mut().unwrap().title = "Fixed".to_string();
    board.submit_editor().unwrap();
    assert!(board.editor().is_none());
    assert_eq!(board.store().len(), 1);
}

#[test]
fn editing_existing_project_updates_in_place() {
    let slot = MemorySlotRepository::new();
    let mut board = controller(&slot);
    board.quick_capture("first").unwrap();
    let target = board.quick_capture("second").unwrap().unwrap().into_value();
    board.quick_capture("third").unwrap();

    let form = board.open_editor_for(&target.id).unwrap();
    assert_eq!(form.id.as_ref(), Some(&target.id));
    assert_eq!(form.tags_input(), "quick");
    form.priority = Priority::High;
    form.status = ProjectStatus::Review;
    let updated = board.submit_editor().unwrap().into_value();

    assert_eq!(updated.id, target.id);
    assert_eq!(board.store().projects()[1], updated);
    assert_eq!(board.store().len(), 3);
}

#[test]
fn open_editor_for_unknown_id_returns_none() {
    let slot = MemorySlotRepository::new();
    let mut board = controller(&slot);
    assert!(board.open_editor_for(&ProjectId::from("ghost")).is_none());
    assert!(board.editor().is_none());
}

#[test]
fn submit_without_open_editor_is_rejected() {
    let slot = MemorySlotRepository::new();
    let mut board = controller(&slot);
    board.open_new_editor();
    board.cancel_editor();

    assert_eq!(board.submit_editor().unwrap_err(), BoardError::EditorClosed);
}

#[test]
fn drop_moves_card_and_rejects_unknown_column() {
    let slot = MemorySlotRepository::new();
    let mut board = controller(&slot);
    let created = board.quick_capture("drag me").unwrap().unwrap().into_value();

    let moved = board.drop_on_column(created.id.as_str(), "Done").unwrap();
    assert_eq!(moved.value.unwrap().status, ProjectStatus::Done);

    let err = board
        .drop_on_column(created.id.as_str(), "Someday")
        .unwrap_err();
    assert!(matches!(err, BoardError::Store(StoreError::Validation(_))));
    assert_eq!(
        board.store().get(&created.id).unwrap().status,
        ProjectStatus::Done
    );

    let stale = board.drop_on_column("gone", "Doing").unwrap();
    assert!(!stale.changed);
}

#[test]
fn quick_capture_builds_draft_record() {
    let slot = MemorySlotRepository::new();
    let mut board = controller(&slot);

    let created = board
        .quick_capture("  Buy milk and eggs for tomorrow morning meeting \n")
        .unwrap()
        .unwrap()
        .into_value();

    assert_eq!(created.title, "Buy milk and eggs for tomorrow morning meeting");
    assert_eq!(created.category, "Rascunho");
    assert_eq!(created.priority, Priority::Low);
    assert_eq!(created.status, ProjectStatus::Backlog);
    assert_eq!(created.tags, vec!["quick".to_string()]);
    assert_eq!(created.notes, "Buy milk and eggs for tomorrow morning meeting");
}

#[test]
fn blank_quick_capture_is_ignored() {
    let slot = MemorySlotRepository::new();
    let mut board = controller(&slot);

    assert!(board.quick_capture(" \n\t").unwrap().is_none());
    assert!(board.store().is_empty());
    assert_eq!(slot.save_count(), 0);
}

#[test]
fn delete_requires_confirmation() {
    let slot = MemorySlotRepository::new();
    let mut board = controller(&slot);
    let created = board.quick_capture("delete me").unwrap().unwrap().into_value();

    let declined = board.request_delete(&created.id, DeleteConfirmation::Declined);
    assert!(!declined.changed);
    assert_eq!(board.store().len(), 1);

    let confirmed = board.request_delete(&created.id, DeleteConfirmation::Confirmed);
    assert!(confirmed.changed);
    assert!(board.store().is_empty());

    let again = board.request_delete(&created.id, DeleteConfirmation::Confirmed);
    assert!(!again.changed);
}

#[test]
fn filters_shape_board_and_clear_restores_everything() {
    let slot = MemorySlotRepository::new();
    let mut board = seeded_controller(&slot);
    board.quick_capture("grocery list").unwrap();

    board.set_category_filter(CategoryFilter::Named("Software/IA".to_string()));
    board.set_priority_filter(PriorityFilter::Only(Priority::High));
    board.set_query("easyit");
    {
        let view = board.board();
        assert_eq!(view.visible, 1);
        assert_eq!(view.column(ProjectStatus::Review).cards.len(), 1);
        assert_eq!(view.counts.total(), 4);
    }

    board.clear_filters();
    assert!(board.filter().is_cleared());
    let view = board.board();
    assert_eq!(view.visible, 4);
    assert_eq!(view.column(ProjectStatus::Backlog).cards.len(), 2);
    assert_eq!(view.column(ProjectStatus::Backlog).cards[0].title, "grocery list");
}
