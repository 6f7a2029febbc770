//! Command-line board surface.
//!
//! # Responsibility
//! - Map subcommands onto `BoardController` signals.
//! - Print a plain-text rendition of the board.
//! - Collect delete confirmation before asking core to delete.

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use log::info;
use multiop_core::db::open_db;
use multiop_core::{
    core_version, init_logging, BoardConfig, BoardController, BoardView, CategoryFilter,
    Committed, DeleteConfirmation, EditorForm, IdGenerator, MemorySlotRepository,
    PriorityFilter, ProjectId, ProjectPersistence, ProjectStatus, ProjectStore,
    SqliteProjectRepository,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "multiop")]
#[command(about = "Track personal projects across Backlog, Doing, Review and Done")]
struct Cli {
    /// Board database file (overrides MULTIOP_DB_PATH)
    #[arg(long, value_name = "FILE", global = true)]
    db: Option<PathBuf>,

    /// Keep the board in memory only; nothing is written to disk
    #[arg(long, global = true, conflicts_with = "db")]
    ephemeral: bool,

    /// Absolute directory for rolling log files (overrides MULTIOP_LOG_DIR)
    #[arg(long, value_name = "DIR", global = true)]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error (overrides MULTIOP_LOG_LEVEL)
    #[arg(long, value_name = "LEVEL", global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the board, optionally filtered
    List {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        /// Case-insensitive search over title, notes and tags
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Create a project through the full editor
    Add {
        #[arg(long)]
        title: String,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Edit an existing project; omitted fields keep their value
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Capture free text as a draft project
    Quick {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Move a project to another column
    Move { id: String, column: String },
    /// Delete a project
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Per-column counts over the whole board
    Stats,
    /// Categories in use
    Categories,
    /// Print the core version
    Version,
}

#[derive(Args)]
struct FieldArgs {
    #[arg(long)]
    category: Option<String>,
    /// Alta|Média|Baixa
    #[arg(long)]
    priority: Option<String>,
    /// Backlog|Doing|Review|Done
    #[arg(long)]
    status: Option<String>,
    /// Comma-separated tags
    #[arg(long)]
    tags: Option<String>,
    #[arg(long)]
    notes: Option<String>,
}

impl FieldArgs {
    fn apply(self, form: &mut EditorForm) -> anyhow::Result<()> {
        if let Some(category) = self.category {
            form.category = category;
        }
        if let Some(priority) = self.priority {
            form.priority = priority.parse()?;
        }
        if let Some(status) = self.status {
            form.status = status.parse()?;
        }
        if let Some(tags) = self.tags {
            form.set_tags_input(&tags);
        }
        if let Some(notes) = self.notes {
            form.notes = notes;
        }
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = BoardConfig::from_env()?;
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    if let Some(log_dir) = cli.log_dir {
        config.log_dir = Some(log_dir);
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, log_dir).context("logging setup failed")?;
    }

    info!(
        "event=cli_start module=cli ephemeral={} slot={}",
        cli.ephemeral, config.slot_key
    );

    if cli.ephemeral {
        let slot = MemorySlotRepository::new();
        let store = ProjectStore::open(&slot, config.store_options());
        return run(&mut BoardController::new(store), cli.command);
    }

    let conn = open_db(&config.db_path)
        .with_context(|| format!("cannot open board at {}", config.db_path.display()))?;
    let repo = SqliteProjectRepository::try_new(&conn, config.slot_key.clone())?;
    let store = ProjectStore::open(repo, config.store_options());
    run(&mut BoardController::new(store), cli.command)
}

fn run<P, G>(board: &mut BoardController<P, G>, command: Command) -> anyhow::Result<()>
where
    P: ProjectPersistence,
    G: IdGenerator,
{
    if let Some(warning) = board.store().open_warning() {
        eprintln!("warning: {warning}");
    }

    match command {
        Command::List {
            category,
            priority,
            query,
        } => {
            if let Some(category) = category {
                board.set_category_filter(CategoryFilter::from_label(&category));
            }
            if let Some(priority) = priority {
                board.set_priority_filter(PriorityFilter::from_label(&priority)?);
            }
            if let Some(query) = query {
                board.set_query(query);
            }
            print_board(&board.board());
        }
        Command::Add { title, fields } => {
            let form = board.open_new_editor();
            form.title = title;
            fields.apply(form)?;
            let committed = board.submit_editor()?;
            report(&committed);
            println!("created {}", committed.value.id);
        }
        Command::Edit { id, title, fields } => {
            let id = ProjectId::new(id);
            let Some(form) = board.open_editor_for(&id) else {
                bail!("project not found: {id}");
            };
            if let Some(title) = title {
                form.title = title;
            }
            fields.apply(form)?;
            let committed = board.submit_editor()?;
            report(&committed);
            println!("updated {}", committed.value.id);
        }
        Command::Quick { text } => match board.quick_capture(&text.join(" "))? {
            Some(committed) => {
                report(&committed);
                println!("captured {}", committed.value.id);
            }
            None => println!("nothing to capture"),
        },
        Command::Move { id, column } => {
            let committed = board.drop_on_column(&id, &column)?;
            report(&committed);
            match committed.value {
                Some(project) => println!("moved {} to {}", project.id, project.status),
                None => println!("no project {id}; nothing moved"),
            }
        }
        Command::Delete { id, yes } => {
            let id = ProjectId::new(id);
            let Some(project) = board.store().get(&id) else {
                println!("no project {id}; nothing deleted");
                return Ok(());
            };
            let confirmation = if yes {
                DeleteConfirmation::Confirmed
            } else {
                confirm(&format!("Remove project \"{}\"?", project.title))?
            };
            let committed = board.request_delete(&id, confirmation);
            report(&committed);
            if committed.changed {
                println!("deleted {id}");
            } else {
                println!("kept {id}");
            }
        }
        Command::Stats => {
            let view = board.board();
            println!("Projects: {}", view.counts.total());
            for (status, count) in view.counts.iter() {
                println!("  {status:<8} {count}");
            }
        }
        Command::Categories => {
            for category in board.board().categories.iter().skip(1) {
                println!("{}", category.label());
            }
        }
        Command::Version => println!("multiop_core version={}", core_version()),
    }
    Ok(())
}

fn report<T>(committed: &Committed<T>) {
    if let Some(warning) = &committed.warning {
        eprintln!("warning: {warning}");
    }
}

fn confirm(prompt: &str) -> anyhow::Result<DeleteConfirmation> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "s" | "sim" => DeleteConfirmation::Confirmed,
        _ => DeleteConfirmation::Declined,
    })
}

fn print_board(view: &BoardView<'_>) {
    for status in ProjectStatus::ALL {
        let column = view.column(status);
        println!("== {} ({})", column.status, column.total);
        for card in &column.cards {
            print!(
                "  [{}] {} | {} | {}",
                card.id, card.title, card.category, card.priority
            );
            if !card.tags.is_empty() {
                print!(" | #{}", card.tags.join(" #"));
            }
            println!();
        }
    }
    println!(
        "-- showing {} of {} project(s)",
        view.visible,
        view.counts.total()
    );
}
