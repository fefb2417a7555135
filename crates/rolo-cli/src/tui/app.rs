//! Application state and logic

use std::time::Instant;

use rolo_core::{AssigneeTasks, Client, Notice, Stats, StorageError, Store, SyncStatus, Theme};

/// Input mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal navigation mode
    Normal,
    /// Search input mode (after pressing /)
    Search,
}

/// Application state
pub struct App {
    /// Whether the app should exit
    pub should_quit: bool,
    /// Current input mode
    pub input_mode: InputMode,
    /// Search input buffer (filters the client list live)
    pub search_input: String,
    /// Current list of clients (filtered)
    pub clients: Vec<Client>,
    /// Currently selected client index
    pub selected: usize,
    /// Summary statistics over the full set
    pub stats: Stats,
    /// All tasks grouped by assignee
    pub task_groups: Vec<AssigneeTasks>,
    /// Notice to display temporarily
    pub notice: Option<Notice>,
    /// When the notice was set (for auto-dismiss)
    notice_since: Option<Instant>,
    /// Current theme
    pub theme: Theme,
    /// Sync cycle status (mirrors the orchestrator)
    pub sync_status: SyncStatus,
    /// Whether a push is running in the background
    pub sync_running: bool,
    /// Whether help overlay is visible
    pub show_help: bool,
}

impl App {
    /// Create a new app with data from the store
    pub fn new(store: &Store, theme: Theme) -> Self {
        let mut app = Self {
            should_quit: false,
            input_mode: InputMode::Normal,
            search_input: String::new(),
            clients: Vec::new(),
            selected: 0,
            stats: Stats::default(),
            task_groups: Vec::new(),
            notice: None,
            notice_since: None,
            theme,
            sync_status: SyncStatus::Idle,
            sync_running: false,
            show_help: false,
        };
        app.refresh(store);
        app
    }

    /// Rebuild the view from the store, keeping the search filter
    pub fn refresh(&mut self, store: &Store) {
        self.clients = if self.search_input.is_empty() {
            store.clients().to_vec()
        } else {
            store.search(&self.search_input)
        };
        self.stats = store.stats();
        self.task_groups = store.tasks_by_assignee();

        if self.selected >= self.clients.len() {
            self.selected = self.clients.len().saturating_sub(1);
        }
    }

    /// Get the currently selected client
    pub fn current_client(&self) -> Option<&Client> {
        self.clients.get(self.selected)
    }

    /// Move selection up
    pub fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    /// Move selection down
    pub fn move_down(&mut self) {
        if self.selected + 1 < self.clients.len() {
            self.selected += 1;
        }
    }

    /// Show a notice (auto-dismissed after its duration)
    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
        self.notice_since = Some(Instant::now());
    }

    /// Clear an expired notice. Returns true if one was cleared.
    pub fn check_notice_timeout(&mut self) -> bool {
        if let (Some(notice), Some(since)) = (&self.notice, self.notice_since) {
            if since.elapsed() > notice.duration {
                self.notice = None;
                self.notice_since = None;
                return true;
            }
        }
        false
    }

    /// Toggle help overlay
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Enter search mode
    pub fn enter_search_mode(&mut self) {
        self.input_mode = InputMode::Search;
    }

    /// Leave search mode, keeping the current filter
    pub fn exit_search_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Leave search mode and drop the filter
    pub fn clear_search(&mut self, store: &Store) {
        self.input_mode = InputMode::Normal;
        self.search_input.clear();
        self.refresh(store);
    }

    /// Append to the search filter
    pub fn push_search_char(&mut self, c: char, store: &Store) {
        self.search_input.push(c);
        self.refresh(store);
    }

    /// Delete from the search filter
    pub fn pop_search_char(&mut self, store: &Store) {
        self.search_input.pop();
        self.refresh(store);
    }

    /// Delete the selected client, returning its name
    pub fn delete_current(&mut self, store: &mut Store) -> Result<Option<String>, StorageError> {
        let Some(client) = self.current_client() else {
            return Ok(None);
        };
        let id = client.id;

        let removed = store.delete_client(id)?;
        self.refresh(store);
        Ok(removed.map(|c| c.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rolo_core::Config;
    use tempfile::TempDir;

    fn test_store(temp_dir: &TempDir) -> Store {
        let config = Config {
            data_dir: temp_dir.path().to_path_buf(),
            ..Config::default()
        };
        Store::open_with_config(config).unwrap()
    }

    #[test]
    fn test_empty_store_renders_zero_stats() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);

        let app = App::new(&store, Theme::Light);
        assert!(app.clients.is_empty());
        assert_eq!(app.stats, Stats::default());
        assert!(app.current_client().is_none());
    }

    #[test]
    fn test_search_filters_live() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = test_store(&temp_dir);
        store.add_client(Client::new("Acme Corp")).unwrap();
        store.add_client(Client::new("Globex")).unwrap();

        let mut app = App::new(&store, Theme::Light);
        assert_eq!(app.clients.len(), 2);

        app.enter_search_mode();
        for c in "glo".chars() {
            app.push_search_char(c, &store);
        }
        assert_eq!(app.clients.len(), 1);
        assert_eq!(app.clients[0].name, "Globex");

        app.clear_search(&store);
        assert_eq!(app.clients.len(), 2);
    }

    #[test]
    fn test_delete_current() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = test_store(&temp_dir);
        store.add_client(Client::new("Acme Corp")).unwrap();

        let mut app = App::new(&store, Theme::Light);
        let name = app.delete_current(&mut store).unwrap();
        assert_eq!(name.as_deref(), Some("Acme Corp"));
        assert!(store.is_empty());
        assert!(app.clients.is_empty());

        // Deleting with nothing selected is a no-op
        assert!(app.delete_current(&mut store).unwrap().is_none());
    }

    #[test]
    fn test_selection_clamps_after_refresh() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = test_store(&temp_dir);
        store.add_client(Client::new("Acme Corp")).unwrap();
        store.add_client(Client::new("Globex")).unwrap();

        let mut app = App::new(&store, Theme::Light);
        app.move_down();
        assert_eq!(app.selected, 1);

        let id = store.clients()[1].id;
        store.delete_client(id).unwrap();
        app.refresh(&store);
        assert_eq!(app.selected, 0);
    }
}
