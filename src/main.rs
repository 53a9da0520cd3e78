//! Catalog Sync - command line front end
//!
//! Lists and edits the remote book catalog through the sync controller.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use catalog_sync::{
    api::BooksClient,
    config::AppConfig,
    models::{render_table, Book, BookId, FieldEdit},
    services::{AlwaysConfirm, CatalogEditor, Confirm, RemoveOutcome, ResourceSyncController, StdinConfirm},
};

#[derive(Parser)]
#[command(name = "catalog-sync", version, about = "Manage the remote book catalog")]
struct Cli {
    /// Override the configured API base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every book
    List,
    /// Add a new book
    Add(BookFields),
    /// Edit an existing book; omitted fields keep their current value
    Edit {
        id: String,
        #[command(flatten)]
        fields: BookFields,
    },
    /// Delete a book after confirmation
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Args)]
struct BookFields {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    author: Option<String>,
    #[arg(long)]
    isbn: Option<String>,
    /// Release date, `YYYY-MM-DD`
    #[arg(long)]
    release_date: Option<String>,
    #[arg(long)]
    available: Option<bool>,
}

impl BookFields {
    fn into_edits(self) -> Vec<FieldEdit> {
        [
            self.title.map(FieldEdit::Title),
            self.author.map(FieldEdit::Author),
            self.isbn.map(FieldEdit::Isbn),
            self.release_date.map(FieldEdit::ReleaseDate),
            self.available.map(FieldEdit::Available),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = AppConfig::load().context("Failed to load configuration")?;
    if let Some(base_url) = cli.base_url.clone() {
        config.api.base_url = base_url;
    }

    init_tracing(&config);
    tracing::debug!(url = %config.books_url(), "Using catalog endpoint");

    let client = BooksClient::new(&config.api).context("Failed to create API client")?;
    let mut editor = CatalogEditor::new(ResourceSyncController::new(client));

    match cli.command {
        Command::List => {
            editor.refresh().await?;
        }
        Command::Add(fields) => {
            editor.open_insert();
            for edit in fields.into_edits() {
                editor.edit_field(edit);
            }
            editor.submit().await?;
        }
        Command::Edit { id, fields } => {
            let book = find_book(&mut editor, &id).await?;
            editor.open_edit(&book);
            for edit in fields.into_edits() {
                editor.edit_field(edit);
            }
            editor.submit().await?;
        }
        Command::Delete { id, yes } => {
            // Load first so the prompt can name the book
            editor.refresh().await?;
            let gate: &dyn Confirm = if yes { &AlwaysConfirm } else { &StdinConfirm };
            if editor.delete(&BookId::from(id.as_str()), gate).await? == RemoveOutcome::Cancelled {
                println!("Cancelled");
                return Ok(());
            }
        }
    }

    if let Some(error) = editor.controller().error() {
        eprintln!("Error: {}", error);
    }
    println!("{}", render_table(&editor.rows()));
    Ok(())
}

async fn find_book(
    editor: &mut CatalogEditor<BooksClient>,
    id: &str,
) -> anyhow::Result<Book> {
    editor.refresh().await?;
    let id = BookId::from(id);
    editor
        .controller()
        .find(&id)
        .cloned()
        .with_context(|| format!("No book with id {}", id))
}

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("catalog_sync={}", config.logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
