use multiop_core::{
    Priority, Project, ProjectDraft, ProjectId, ProjectStatus, ProjectValidationError,
};

#[test]
fn editor_draft_defaults() {
    let draft = ProjectDraft::default();

    assert_eq!(draft.title, "");
    assert_eq!(draft.category, "Exploratório");
    assert_eq!(draft.priority, Priority::Medium);
    assert_eq!(draft.status, ProjectStatus::Backlog);
    assert!(draft.tags.is_empty());
    assert_eq!(draft.notes, "");
}

#[test]
fn quick_capture_keeps_short_text_as_title() {
    let text = "Buy milk and eggs for tomorrow morning meeting";
    assert!(text.chars().count() < 60);

    let draft = ProjectDraft::quick_capture(text);

    assert_eq!(draft.title, text);
    assert_eq!(draft.category, "Rascunho");
    assert_eq!(draft.priority, Priority::Low);
    assert_eq!(draft.status, ProjectStatus::Backlog);
    assert_eq!(draft.tags, vec!["quick".to_string()]);
    assert_eq!(draft.notes, text);
}

#[test]
fn quick_capture_truncates_long_text_but_keeps_full_notes() {
    let text = "a".repeat(59) + "bcdef";

    let draft = ProjectDraft::quick_capture(&text);

    assert_eq!(draft.title, "a".repeat(59) + "b");
    assert_eq!(draft.notes, text);
}

#[test]
fn quick_capture_falls_back_when_text_has_no_title() {
    let draft = ProjectDraft::quick_capture("   ");
    assert_eq!(draft.title, "Rascunho rápido");
    assert!(draft.validate().is_ok());
}

#[test]
fn validate_rejects_blank_title_and_id() {
    assert_eq!(
        ProjectDraft::titled(" \t ").validate().unwrap_err(),
        ProjectValidationError::BlankTitle
    );

    let project = Project::from_draft(ProjectId::from("  "), ProjectDraft::titled("ok"));
    assert_eq!(
        project.validate().unwrap_err(),
        ProjectValidationError::BlankId
    );
}

#[test]
fn labels_parse_and_render() {
    for status in ProjectStatus::ALL {
        assert_eq!(status.as_str().parse::<ProjectStatus>().unwrap(), status);
    }
    for priority in Priority::ALL {
        assert_eq!(priority.to_string().parse::<Priority>().unwrap(), priority);
    }

    let err = "Archived".parse::<ProjectStatus>().unwrap_err();
    assert_eq!(
        err,
        ProjectValidationError::UnknownStatus("Archived".to_string())
    );
    assert!("Urgente".parse::<Priority>().is_err());
}

#[test]
fn project_serialization_uses_slot_wire_fields() {
    let mut draft = ProjectDraft::titled("EasyIt (task manager)");
    draft.category = "Software/IA".to_string();
    draft.priority = Priority::Medium;
    draft.status = ProjectStatus::Review;
    draft.tags = vec!["produtividade".to_string()];
    draft.notes = "testar fluxos".to_string();
    let project = Project::from_draft(ProjectId::from("1700000000000_42_0"), draft);

    let json = serde_json::to_value(&project).unwrap();
    let object = json.as_object().unwrap();
    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec!["category", "id", "notes", "priority", "status", "tags", "title"]
    );
    assert_eq!(json["id"], "1700000000000_42_0");
    assert_eq!(json["priority"], "Média");
    assert_eq!(json["status"], "Review");
    assert_eq!(json["tags"], serde_json::json!(["produtividade"]));

    let decoded: Project = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, project);
}

#[test]
fn deserialize_defaults_missing_tags_and_notes() {
    let value = serde_json::json!({
        "id": "legacy-1",
        "title": "Old record",
        "category": "Rascunho",
        "priority": "Baixa",
        "status": "Done"
    });

    let project: Project = serde_json::from_value(value).unwrap();
    assert!(project.tags.is_empty());
    assert_eq!(project.notes, "");
    assert_eq!(project.status, ProjectStatus::Done);
}

#[test]
fn deserialize_rejects_unknown_status_label() {
    let value = serde_json::json!({
        "id": "p-1",
        "title": "x",
        "category": "c",
        "priority": "Alta",
        "status": "Archived",
        "tags": [],
        "notes": ""
    });

    assert!(serde_json::from_value::<Project>(value).is_err());
}
