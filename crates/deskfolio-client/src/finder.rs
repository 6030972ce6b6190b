//! Finder navigation state machine.
//!
//! Holds the browsing state for one navigator window: current folder,
//! back/forward history, sort order, selection, and view options. Every
//! fetch is tagged with a monotonic sequence number; a response whose
//! sequence is no longer the latest is discarded wholesale, including its
//! history effects, so rapid navigation can never leave the window
//! showing one folder's path with another folder's contents.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::debug;
use uuid::Uuid;

use deskfolio_core::path;
use deskfolio_core::result::AppResult;
use deskfolio_core::types::{SortDirection, SortKey};

use crate::adapter::{FinderItem, ItemSource};

/// How items are laid out in the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Icon grid.
    #[default]
    Icon,
    /// Detail list.
    List,
}

/// Snapshot of the navigator state, cloned out to subscribers.
#[derive(Debug, Clone)]
pub struct FinderState {
    /// Path of the folder currently shown.
    pub current_path: String,
    /// Items of the current folder, folders grouped first.
    pub items: Vec<FinderItem>,
    /// Whether a fetch is in flight.
    pub is_loading: bool,
    /// Message of the last failed operation, cleared on the next fetch.
    pub error: Option<String>,
    /// Ids of the selected items.
    pub selection: HashSet<Uuid>,
    /// Active sort key.
    pub sort_by: SortKey,
    /// Active sort direction.
    pub sort_order: SortDirection,
    /// Active view mode.
    pub view_mode: ViewMode,
    /// Whether the sidebar is shown.
    pub sidebar_visible: bool,
    /// Visited paths, oldest first.
    pub history: Vec<String>,
    /// Position of the current folder within `history`.
    pub history_index: usize,
}

impl FinderState {
    fn initial() -> Self {
        Self {
            current_path: path::ROOT.to_string(),
            items: Vec::new(),
            is_loading: false,
            error: None,
            selection: HashSet::new(),
            sort_by: SortKey::default(),
            sort_order: SortDirection::default(),
            view_mode: ViewMode::default(),
            sidebar_visible: true,
            history: vec![path::ROOT.to_string()],
            history_index: 0,
        }
    }

    /// Whether a back step is available.
    pub fn can_go_back(&self) -> bool {
        self.history_index > 0
    }

    /// Whether a forward step is available.
    pub fn can_go_forward(&self) -> bool {
        self.history_index + 1 < self.history.len()
    }
}

/// How a successful fetch affects the history stack.
enum HistoryEffect {
    /// Drop forward entries and append the new path.
    Push,
    /// Move to an existing history position (back/forward).
    Jump(usize),
    /// Collapse the history to just the new path.
    Reset,
    /// Leave history alone (refresh, sort change).
    Keep,
}

type Listener = Box<dyn Fn(&FinderState) + Send + Sync>;

/// The navigator itself: one instance per open window.
pub struct Finder<S: ItemSource> {
    source: Arc<S>,
    state: Mutex<FinderState>,
    seq: AtomicU64,
    listeners: Mutex<HashMap<u64, Listener>>,
    next_listener_id: AtomicU64,
}

impl<S: ItemSource> Finder<S> {
    /// Create a navigator positioned at root with nothing loaded yet.
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            state: Mutex::new(FinderState::initial()),
            seq: AtomicU64::new(0),
            listeners: Mutex::new(HashMap::new()),
            next_listener_id: AtomicU64::new(1),
        }
    }

    /// Clone out the current state.
    pub fn state(&self) -> FinderState {
        self.state.lock().expect("finder state poisoned").clone()
    }

    /// Register a state listener; returns a token for [`Self::unsubscribe`].
    pub fn subscribe(&self, listener: impl Fn(&FinderState) + Send + Sync + 'static) -> u64 {
        let id = self.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.listeners
            .lock()
            .expect("listeners poisoned")
            .insert(id, Box::new(listener));
        id
    }

    /// Remove a previously registered listener.
    pub fn unsubscribe(&self, token: u64) {
        self.listeners
            .lock()
            .expect("listeners poisoned")
            .remove(&token);
    }

    /// Load the contents of the current folder without touching history.
    pub async fn refresh(&self) -> AppResult<()> {
        let target = self.state().current_path;
        self.load(&target, HistoryEffect::Keep).await
    }

    /// Navigate to a folder, pushing it onto the history stack.
    ///
    /// Navigating to the folder already shown is a no-op: no fetch, no
    /// loading flash, and the selection stays put.
    pub async fn navigate_to(&self, target: &str) -> AppResult<()> {
        let target = path::normalize_path(target);
        {
            let state = self.state.lock().expect("finder state poisoned");
            if state.current_path == target {
                return Ok(());
            }
        }
        self.load(&target, HistoryEffect::Push).await
    }

    /// Step back in history. A no-op when already at the oldest entry;
    /// the position only moves if the folder loads successfully.
    pub async fn go_back(&self) -> AppResult<()> {
        let target = {
            let state = self.state.lock().expect("finder state poisoned");
            if !state.can_go_back() {
                return Ok(());
            }
            let index = state.history_index - 1;
            (state.history[index].clone(), index)
        };
        self.load(&target.0, HistoryEffect::Jump(target.1)).await
    }

    /// Step forward in history. A no-op when already at the newest entry.
    pub async fn go_forward(&self) -> AppResult<()> {
        let target = {
            let state = self.state.lock().expect("finder state poisoned");
            if !state.can_go_forward() {
                return Ok(());
            }
            let index = state.history_index + 1;
            (state.history[index].clone(), index)
        };
        self.load(&target.0, HistoryEffect::Jump(target.1)).await
    }

    /// Jump home: load root and collapse the history to a single entry.
    pub async fn reset_to_root(&self) -> AppResult<()> {
        self.load(path::ROOT, HistoryEffect::Reset).await
    }

    /// Change the sort and reload the current folder in the new order.
    pub async fn set_sort(&self, sort_by: SortKey, sort_order: SortDirection) -> AppResult<()> {
        let target = {
            let mut state = self.state.lock().expect("finder state poisoned");
            state.sort_by = sort_by;
            state.sort_order = sort_order;
            state.current_path.clone()
        };
        self.load(&target, HistoryEffect::Keep).await
    }

    /// Replace the selection with a single item.
    pub fn select_item(&self, id: Uuid) {
        {
            let mut state = self.state.lock().expect("finder state poisoned");
            state.selection.clear();
            state.selection.insert(id);
        }
        self.notify();
    }

    /// Toggle one item in or out of the selection (multi-select).
    pub fn toggle_select(&self, id: Uuid) {
        {
            let mut state = self.state.lock().expect("finder state poisoned");
            if !state.selection.remove(&id) {
                state.selection.insert(id);
            }
        }
        self.notify();
    }

    /// Clear the selection.
    pub fn clear_selection(&self) {
        {
            let mut state = self.state.lock().expect("finder state poisoned");
            state.selection.clear();
        }
        self.notify();
    }

    /// Switch between icon and list layout.
    pub fn set_view_mode(&self, mode: ViewMode) {
        {
            let mut state = self.state.lock().expect("finder state poisoned");
            state.view_mode = mode;
        }
        self.notify();
    }

    /// Show or hide the sidebar.
    pub fn toggle_sidebar(&self) {
        {
            let mut state = self.state.lock().expect("finder state poisoned");
            state.sidebar_visible = !state.sidebar_visible;
        }
        self.notify();
    }

    /// Fetch a folder and, if the response is still the latest, apply it.
    async fn load(&self, target: &str, effect: HistoryEffect) -> AppResult<()> {
        // The ticket is taken while holding the state lock, so loading-flag
        // writes happen in ticket order and a superseded request can never
        // mark the state loading after its superseder already finished.
        let (ticket, sort_by, sort_order) = {
            let mut state = self.state.lock().expect("finder state poisoned");
            let ticket = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
            state.is_loading = true;
            state.error = None;
            (ticket, state.sort_by, state.sort_order)
        };
        self.notify();

        let result = self.source.fetch(target, sort_by, sort_order).await;

        {
            let mut state = self.state.lock().expect("finder state poisoned");
            // A newer request superseded this one; drop it entirely, history
            // effects included.
            if self.seq.load(Ordering::SeqCst) != ticket {
                debug!(target, ticket, "Discarding stale folder response");
                return Ok(());
            }

            match result {
                Ok(listing) => {
                    state.items = folders_first(listing.items);
                    state.current_path = listing.path.clone();
                    state.selection.clear();
                    state.is_loading = false;
                    match effect {
                        HistoryEffect::Push => {
                            let keep = state.history_index + 1;
                            state.history.truncate(keep);
                            if state.history[state.history_index] != listing.path {
                                state.history.push(listing.path);
                                state.history_index = state.history.len() - 1;
                            }
                        }
                        HistoryEffect::Jump(index) => state.history_index = index,
                        HistoryEffect::Reset => {
                            state.history = vec![listing.path];
                            state.history_index = 0;
                        }
                        HistoryEffect::Keep => {}
                    }
                }
                Err(err) => {
                    state.is_loading = false;
                    state.error = Some(err.message.clone());
                    drop(state);
                    self.notify();
                    return Err(err);
                }
            }
        }
        self.notify();
        Ok(())
    }

    fn notify(&self) {
        let snapshot = self.state();
        let listeners = self.listeners.lock().expect("listeners poisoned");
        for listener in listeners.values() {
            listener(&snapshot);
        }
    }
}

/// Stable partition with folders ahead of files.
///
/// The source already sorted by the requested key; grouping preserves that
/// order within each half.
fn folders_first(items: Vec<FinderItem>) -> Vec<FinderItem> {
    let (folders, files): (Vec<_>, Vec<_>) = items.into_iter().partition(FinderItem::is_folder);
    folders.into_iter().chain(files).collect()
}
