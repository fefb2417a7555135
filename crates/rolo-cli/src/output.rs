//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use rolo_core::{AssigneeTasks, Client, Stats};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Check if output is JSON
    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Print a single client (with tasks)
    pub fn print_client(&self, client: &Client) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:      {}", client.id);
                println!("Name:    {}", client.name);
                if let Some(ref company) = client.company {
                    println!("Company: {}", company);
                }
                if let Some(ref email) = client.email {
                    println!("Email:   {}", email);
                }
                if let Some(ref phone) = client.phone {
                    println!("Phone:   {}", phone);
                }
                println!("Status:  {}", client.status);
                if !client.notes.is_empty() {
                    println!("Notes:   {}", client.notes);
                }
                println!("Created: {}", client.created_at.format("%Y-%m-%d %H:%M"));
                println!("Updated: {}", client.updated_at.format("%Y-%m-%d %H:%M"));

                if !client.tasks.is_empty() {
                    println!();
                    println!("── Tasks ({}) ──", client.tasks.len());
                    for task in &client.tasks {
                        println!(
                            "[{}] {} | {} ({})",
                            if task.done { "x" } else { " " },
                            &task.id.to_string()[..8],
                            task.description,
                            task.assignee
                        );
                    }
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(client).unwrap());
            }
            OutputFormat::Quiet => {
                println!("{}", client.id);
            }
        }
    }

    /// Print a list of clients
    pub fn print_clients(&self, clients: &[Client]) {
        match self.format {
            OutputFormat::Human => {
                if clients.is_empty() {
                    println!("No clients found.");
                    return;
                }
                for client in clients {
                    let tasks_indicator = if client.open_task_count() == 0 {
                        String::new()
                    } else {
                        format!(" [{}]", client.open_task_count())
                    };
                    println!(
                        "{} | {}{} | {} | {}",
                        &client.id.to_string()[..8],
                        truncate(&client.name, 30),
                        tasks_indicator,
                        truncate(client.company.as_deref().unwrap_or("-"), 20),
                        client.status
                    );
                }
                println!("\n{} client(s)", clients.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(clients).unwrap());
            }
            OutputFormat::Quiet => {
                for client in clients {
                    println!("{}", client.id);
                }
            }
        }
    }

    /// Print tasks grouped by assignee
    pub fn print_task_groups(&self, groups: &[AssigneeTasks], open_only: bool) {
        match self.format {
            OutputFormat::Human => {
                let mut shown = 0;
                for group in groups {
                    let tasks: Vec<_> = group
                        .tasks
                        .iter()
                        .filter(|entry| !open_only || !entry.task.done)
                        .collect();
                    if tasks.is_empty() {
                        continue;
                    }

                    println!("{}:", group.assignee);
                    for entry in tasks {
                        println!(
                            "  [{}] {} | {} — {}",
                            if entry.task.done { "x" } else { " " },
                            &entry.task.id.to_string()[..8],
                            entry.task.description,
                            entry.client_name
                        );
                        shown += 1;
                    }
                    println!();
                }

                if shown == 0 {
                    println!("No tasks found.");
                } else {
                    println!("{} task(s)", shown);
                }
            }
            OutputFormat::Json => {
                let json_groups: Vec<_> = groups
                    .iter()
                    .map(|group| {
                        let tasks: Vec<_> = group
                            .tasks
                            .iter()
                            .filter(|entry| !open_only || !entry.task.done)
                            .map(|entry| {
                                serde_json::json!({
                                    "client_id": entry.client_id,
                                    "client_name": entry.client_name,
                                    "task": entry.task,
                                })
                            })
                            .collect();
                        serde_json::json!({ "assignee": group.assignee, "tasks": tasks })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&json_groups).unwrap());
            }
            OutputFormat::Quiet => {
                for group in groups {
                    for entry in &group.tasks {
                        if !open_only || !entry.task.done {
                            println!("{}", entry.task.id);
                        }
                    }
                }
            }
        }
    }

    /// Print summary statistics
    pub fn print_stats(&self, stats: &Stats) {
        match self.format {
            OutputFormat::Human => {
                println!("Clients:    {}", stats.total);
                println!("  Leads:    {}", stats.leads);
                println!("  Active:   {}", stats.active);
                println!("  On hold:  {}", stats.on_hold);
                println!("  Closed:   {}", stats.closed);
                println!("Open tasks: {}", stats.open_tasks);
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(stats).unwrap());
            }
            OutputFormat::Quiet => {
                println!("{}", stats.total);
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

/// Truncate a string to max length, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len - 3])
    }
}
