//! Data models for rolo
//!
//! Defines the core data structures: Client and Task. Records are plain
//! serde values so the full set round-trips unchanged through the local
//! store file and the remote sync endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Workflow status of a client
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ClientStatus {
    /// Not yet engaged
    #[default]
    Lead,
    /// Actively working together
    Active,
    /// Engagement paused
    OnHold,
    /// Engagement finished
    Closed,
}

impl ClientStatus {
    /// All statuses, in display order
    pub fn all() -> [ClientStatus; 4] {
        [
            ClientStatus::Lead,
            ClientStatus::Active,
            ClientStatus::OnHold,
            ClientStatus::Closed,
        ]
    }

    /// The status name as written in config and on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientStatus::Lead => "lead",
            ClientStatus::Active => "active",
            ClientStatus::OnHold => "on-hold",
            ClientStatus::Closed => "closed",
        }
    }
}

impl std::fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ClientStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lead" => Ok(ClientStatus::Lead),
            "active" => Ok(ClientStatus::Active),
            "on-hold" => Ok(ClientStatus::OnHold),
            "closed" => Ok(ClientStatus::Closed),
            other => Err(format!(
                "unknown status '{}' (expected lead, active, on-hold, or closed)",
                other
            )),
        }
    }
}

/// A tracked client contact
///
/// Every record is independently serializable; there are no references
/// between records. Optional fields default so partially-shaped records
/// loaded from an external store still deserialize.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Client {
    /// Unique identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Company or organization
    #[serde(default)]
    pub company: Option<String>,
    /// Contact email
    #[serde(default)]
    pub email: Option<String>,
    /// Contact phone number
    #[serde(default)]
    pub phone: Option<String>,
    /// Workflow status
    #[serde(default)]
    pub status: ClientStatus,
    /// Free-form notes
    #[serde(default)]
    pub notes: String,
    /// Task entries attached to this client
    #[serde(default)]
    pub tasks: Vec<Task>,
    /// When this client was created
    pub created_at: DateTime<Utc>,
    /// When this client was last updated
    pub updated_at: DateTime<Utc>,
}

impl Client {
    /// Create a new client with the given name
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            company: None,
            email: None,
            phone: None,
            status: ClientStatus::default(),
            notes: String::new(),
            tasks: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a client with a specific ID (for loading from storage)
    pub fn with_id(id: Uuid, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            company: None,
            email: None,
            phone: None,
            status: ClientStatus::default(),
            notes: String::new(),
            tasks: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Update the display name
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.touch();
    }

    /// Update the company
    pub fn set_company(&mut self, company: Option<String>) {
        self.company = company;
        self.touch();
    }

    /// Update the contact email
    pub fn set_email(&mut self, email: Option<String>) {
        self.email = email;
        self.touch();
    }

    /// Update the contact phone number
    pub fn set_phone(&mut self, phone: Option<String>) {
        self.phone = phone;
        self.touch();
    }

    /// Update the workflow status
    pub fn set_status(&mut self, status: ClientStatus) {
        self.status = status;
        self.touch();
    }

    /// Update the free-form notes
    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
        self.touch();
    }

    /// Attach a task
    pub fn add_task(&mut self, task: Task) {
        self.tasks.push(task);
        self.touch();
    }

    /// Mark a task done (or not). Returns false if the task is unknown.
    pub fn set_task_done(&mut self, task_id: Uuid, done: bool) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == task_id) {
            Some(task) => {
                task.done = done;
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Remove a task. Returns false if the task is unknown.
    pub fn remove_task(&mut self, task_id: Uuid) -> bool {
        match self.tasks.iter().position(|t| t.id == task_id) {
            Some(pos) => {
                self.tasks.remove(pos);
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Number of tasks not yet done
    pub fn open_task_count(&self) -> usize {
        self.tasks.iter().filter(|t| !t.done).count()
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// A task attached to a client, tagged with an assignee
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// Unique identifier
    pub id: Uuid,
    /// Who the task belongs to
    pub assignee: String,
    /// What needs doing
    pub description: String,
    /// Whether the task is finished
    #[serde(default)]
    pub done: bool,
    /// When this task was created
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Create a new open task for the given assignee
    pub fn new(assignee: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            assignee: assignee.into(),
            description: description.into(),
            done: false,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_new() {
        let client = Client::new("Acme Corp");
        assert_eq!(client.name, "Acme Corp");
        assert_eq!(client.status, ClientStatus::Lead);
        assert!(client.company.is_none());
        assert!(client.email.is_none());
        assert!(client.tasks.is_empty());
        assert!(client.notes.is_empty());
    }

    #[test]
    fn test_client_with_id() {
        let id = Uuid::new_v4();
        let client = Client::with_id(id, "Acme Corp");
        assert_eq!(client.id, id);
        assert_eq!(client.name, "Acme Corp");
    }

    #[test]
    fn test_client_set_status() {
        let mut client = Client::new("Acme Corp");
        let original_updated = client.updated_at;
        std::thread::sleep(std::time::Duration::from_millis(10));
        client.set_status(ClientStatus::Active);
        assert_eq!(client.status, ClientStatus::Active);
        assert!(client.updated_at > original_updated);
    }

    #[test]
    fn test_client_tasks() {
        let mut client = Client::new("Acme Corp");
        let task = Task::new("dina", "Send proposal");
        let task_id = task.id;
        client.add_task(task);
        client.add_task(Task::new("hamdi", "Schedule call"));

        assert_eq!(client.tasks.len(), 2);
        assert_eq!(client.open_task_count(), 2);

        assert!(client.set_task_done(task_id, true));
        assert_eq!(client.open_task_count(), 1);

        assert!(client.remove_task(task_id));
        assert_eq!(client.tasks.len(), 1);

        // Unknown task IDs are reported, not ignored silently
        assert!(!client.set_task_done(task_id, false));
        assert!(!client.remove_task(task_id));
    }

    #[test]
    fn test_status_parse_and_display() {
        for status in ClientStatus::all() {
            let parsed: ClientStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
            assert_eq!(format!("{}", status), status.as_str());
        }
        assert!("bogus".parse::<ClientStatus>().is_err());
    }

    #[test]
    fn test_client_serialization() {
        let mut client = Client::new("Acme Corp");
        client.set_email(Some("contact@acme.example".to_string()));
        client.add_task(Task::new("dina", "Send proposal"));

        let json = serde_json::to_string(&client).unwrap();
        let deserialized: Client = serde_json::from_str(&json).unwrap();
        assert_eq!(client, deserialized);
    }

    #[test]
    fn test_partial_record_deserializes() {
        // Records written by other producers may omit optional fields
        let json = r#"{
            "id": "b4c51b2e-9a38-4c0e-bf3a-2a6fefcfd3a1",
            "name": "Acme Corp",
            "created_at": "2024-05-01T12:00:00Z",
            "updated_at": "2024-05-01T12:00:00Z"
        }"#;

        let client: Client = serde_json::from_str(json).unwrap();
        assert_eq!(client.name, "Acme Corp");
        assert_eq!(client.status, ClientStatus::Lead);
        assert!(client.tasks.is_empty());
        assert!(client.company.is_none());
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&ClientStatus::OnHold).unwrap();
        assert_eq!(json, r#""on-hold""#);
    }

    #[test]
    fn test_task_serialization() {
        let task = Task::new("hamdi", "Schedule call");
        let json = serde_json::to_string(&task).unwrap();
        let deserialized: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(task, deserialized);
    }
}
