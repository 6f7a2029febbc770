//! First-run sample board.
//!
//! Convenience data only; nothing else in core depends on these records.

use crate::model::project::{Priority, Project, ProjectStatus};
use crate::service::id_generator::IdGenerator;

/// Number of records in the sample board.
pub const SAMPLE_PROJECT_COUNT: usize = 3;

/// Builds the sample board with fresh ids from `ids`.
pub fn sample_projects(ids: &dyn IdGenerator) -> Vec<Project> {
    vec![
        Project {
            id: ids.next_id(),
            title: "Ql-Gpt-mini".to_string(),
            category: "Software/IA".to_string(),
            priority: Priority::High,
            status: ProjectStatus::Backlog,
            tags: tags(&["IA", "educacional"]),
            notes: "Minigpt educativo — começar arquitetura e dataset".to_string(),
        },
        Project {
            id: ids.next_id(),
            title: "Rapsódia de Silício (Roteiro)".to_string(),
            category: "Narrativa/HQ".to_string(),
            priority: Priority::Medium,
            status: ProjectStatus::Doing,
            tags: tags(&["HQ", "roteiro"]),
            notes: "Revisar capítulo 2 e transformar em script de quadrinhos".to_string(),
        },
        Project {
            id: ids.next_id(),
            title: "EasyIt (task manager)".to_string(),
            category: "Software/IA".to_string(),
            priority: Priority::High,
            status: ProjectStatus::Review,
            tags: tags(&["produtividade"]),
            notes: "Protótipo funcional — testar fluxos de deploy".to_string(),
        },
    ]
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::{sample_projects, SAMPLE_PROJECT_COUNT};
    use crate::service::id_generator::SequentialIdGenerator;

    #[test]
    fn sample_notes_keep_their_original_wording() {
        let projects = sample_projects(&SequentialIdGenerator::new("seed"));

        assert_eq!(projects.len(), SAMPLE_PROJECT_COUNT);
        assert_eq!(
            projects[0].notes,
            "Minigpt educativo \u{2014} começar arquitetura e dataset"
        );
        assert_eq!(
            projects[2].notes,
            "Protótipo funcional \u{2014} testar fluxos de deploy"
        );
    }
}
