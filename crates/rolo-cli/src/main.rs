//! rolo CLI
//!
//! Command-line interface for rolo - client contact tracking.

use anyhow::Result;
use clap::{Parser, Subcommand};

use rolo_core::{NoticeLevel, Store, SyncOrchestrator};

mod commands;
mod output;
mod prompt;
mod tui;

use commands::email::EmailTemplate;
use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "rolo")]
#[command(about = "rolo - local-first client contact tracking")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI interface
    Tui,
    /// Manage clients
    Client {
        #[command(subcommand)]
        command: ClientCommands,
    },
    /// Manage tasks on clients
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Show summary statistics
    Stats,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
    /// Show status (storage, sync configuration)
    Status,
    /// Push all clients to the remote store
    Sync,
}

#[derive(Subcommand)]
enum ClientCommands {
    /// Create a new client
    #[command(alias = "add")]
    Create {
        /// Display name
        name: String,
        /// Company or organization
        #[arg(long)]
        company: Option<String>,
        /// Contact email
        #[arg(long)]
        email: Option<String>,
        /// Contact phone number
        #[arg(long)]
        phone: Option<String>,
        /// Workflow status (lead, active, on-hold, closed)
        #[arg(short, long)]
        status: Option<String>,
        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// List all clients
    #[command(alias = "ls")]
    List {
        /// Filter by status (lead, active, on-hold, closed)
        #[arg(short, long)]
        status: Option<String>,
    },
    /// Show client details (including tasks)
    Show {
        /// Client ID (full UUID or prefix)
        id: String,
    },
    /// Edit a client
    Edit {
        /// Client ID (full UUID or prefix)
        id: String,
        /// New display name
        #[arg(long)]
        name: Option<String>,
        /// New company ("none" to clear)
        #[arg(long)]
        company: Option<String>,
        /// New contact email ("none" to clear)
        #[arg(long)]
        email: Option<String>,
        /// New phone number ("none" to clear)
        #[arg(long)]
        phone: Option<String>,
        /// New workflow status
        #[arg(short, long)]
        status: Option<String>,
        /// New notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete a client
    #[command(alias = "rm")]
    Delete {
        /// Client ID (full UUID or prefix)
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },
    /// Search clients
    Search {
        /// Search query
        query: String,
    },
    /// Compose an email to a client from a template
    Email {
        /// Client ID (full UUID or prefix)
        id: String,
        /// Template to use
        #[arg(short, long, value_enum, default_value = "follow-up")]
        template: EmailTemplate,
    },
}

#[derive(Subcommand)]
enum TaskCommands {
    /// Add a task to a client
    #[command(alias = "add")]
    Create {
        /// Client ID (full UUID or prefix)
        client_id: String,
        /// What needs doing
        description: String,
        /// Who the task belongs to
        #[arg(short, long)]
        assignee: String,
    },
    /// List tasks grouped by assignee
    #[command(alias = "ls")]
    List {
        /// Only show one assignee's tasks
        #[arg(short, long)]
        assignee: Option<String>,
        /// Only show open tasks
        #[arg(long)]
        open: bool,
    },
    /// Mark a task done
    Done {
        /// Client ID (full UUID or prefix)
        client_id: String,
        /// Task ID (full UUID or prefix)
        task_id: String,
    },
    /// Remove a task from a client
    #[command(alias = "rm")]
    Delete {
        /// Client ID (full UUID or prefix)
        client_id: String,
        /// Task ID (full UUID or prefix)
        task_id: String,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, sync_url, sync_enabled, ...)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config doesn't need the store
    if let Some(Commands::Config { command }) = &cli.command {
        return handle_config_command(command.clone(), &output);
    }

    // Handle TUI (default when no command given)
    if matches!(&cli.command, Some(Commands::Tui) | None) {
        return tui::run().await;
    }

    let mut store = Store::open()?;
    let orchestrator = SyncOrchestrator::new(store.config())?;

    // On startup the remote (when enabled) is authoritative. An explicit
    // sync is the exception: it exists to push local edits out, so it
    // must not overwrite them with the remote set first.
    let is_manual_sync = matches!(&cli.command, Some(Commands::Sync));
    if !is_manual_sync {
        if let Some(notice) = orchestrator.startup(&mut store).await {
            if notice.level == NoticeLevel::Error && !output.is_quiet() {
                eprintln!("⚠ {}", notice.text);
            }
        }
    }

    match cli.command.unwrap() {
        Commands::Tui | Commands::Config { .. } => unreachable!(), // Handled above
        Commands::Client { command } => handle_client_command(command, &mut store, &output),
        Commands::Task { command } => handle_task_command(command, &mut store, &output),
        Commands::Stats => commands::stats::show(&store, &output),
        Commands::Status => commands::status::show(&store, &orchestrator, &output),
        Commands::Sync => commands::sync::sync(&store, &orchestrator, &output).await,
    }
}

fn handle_client_command(
    command: ClientCommands,
    store: &mut Store,
    output: &Output,
) -> Result<()> {
    match command {
        ClientCommands::Create {
            name,
            company,
            email,
            phone,
            status,
            notes,
        } => commands::client::create(store, name, company, email, phone, status, notes, output),
        ClientCommands::List { status } => commands::client::list(store, status, output),
        ClientCommands::Show { id } => commands::client::show(store, id, output),
        ClientCommands::Edit {
            id,
            name,
            company,
            email,
            phone,
            status,
            notes,
        } => commands::client::edit(store, id, name, company, email, phone, status, notes, output),
        ClientCommands::Delete { id, force } => commands::client::delete(store, id, force, output),
        ClientCommands::Search { query } => commands::client::search(store, query, output),
        ClientCommands::Email { id, template } => {
            commands::email::compose(store, id, template, output)
        }
    }
}

fn handle_task_command(command: TaskCommands, store: &mut Store, output: &Output) -> Result<()> {
    match command {
        TaskCommands::Create {
            client_id,
            description,
            assignee,
        } => commands::task::create(store, client_id, description, assignee, output),
        TaskCommands::List { assignee, open } => commands::task::list(store, assignee, open, output),
        TaskCommands::Done { client_id, task_id } => {
            commands::task::done(store, client_id, task_id, output)
        }
        TaskCommands::Delete { client_id, task_id } => {
            commands::task::delete(store, client_id, task_id, output)
        }
    }
}

fn handle_config_command(command: Option<ConfigCommands>, output: &Output) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(output),
        Some(ConfigCommands::Set { key, value }) => commands::config::set(key, value, output),
    }
}
