//! Window registry: windows by id plus a derived per-workspace index.

use std::collections::{BTreeSet, HashMap};

use crate::types::{Window, WindowId, WorkspaceId};

/// Known windows, indexed by id and grouped by workspace.
///
/// The workspace index always equals the partition of the primary map by
/// each window's `workspace_id`. Windows without a workspace are kept in
/// the primary map only.
#[derive(Debug, Default)]
pub struct WindowRegistry {
    windows: HashMap<WindowId, Window>,
    by_workspace: HashMap<WorkspaceId, BTreeSet<WindowId>>,
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a window, moving it between workspaces if needed.
    pub fn upsert(&mut self, window: Window) {
        let stale = self
            .windows
            .get(&window.id)
            .and_then(|previous| previous.workspace_id)
            .filter(|old| Some(*old) != window.workspace_id);
        if let Some(old) = stale {
            self.detach(old, window.id);
        }

        if let Some(workspace_id) = window.workspace_id {
            self.by_workspace
                .entry(workspace_id)
                .or_default()
                .insert(window.id);
        }
        self.windows.insert(window.id, window);
    }

    /// Removes a window. Unknown ids are ignored.
    pub fn remove(&mut self, id: WindowId) -> Option<Window> {
        let removed = self.windows.remove(&id)?;
        if let Some(workspace_id) = removed.workspace_id {
            self.detach(workspace_id, id);
        }
        Some(removed)
    }

    /// Forgets every window.
    pub fn reset(&mut self) {
        self.windows.clear();
        self.by_workspace.clear();
    }

    pub fn lookup(&self, id: WindowId) -> Option<&Window> {
        self.windows.get(&id)
    }

    /// Windows currently on a workspace, in ascending id order.
    pub fn windows_in_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> impl Iterator<Item = &Window> + '_ {
        self.by_workspace
            .get(&workspace_id)
            .into_iter()
            .flatten()
            .filter_map(|id| self.windows.get(id))
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Checks that the workspace index matches the primary map exactly.
    pub fn is_consistent(&self) -> bool {
        let indexed: usize = self.by_workspace.values().map(BTreeSet::len).sum();
        let placed = self
            .windows
            .values()
            .filter(|w| w.workspace_id.is_some())
            .count();

        indexed == placed
            && self.by_workspace.iter().all(|(workspace_id, ids)| {
                ids.iter().all(|id| {
                    self.windows
                        .get(id)
                        .is_some_and(|w| w.workspace_id == Some(*workspace_id))
                })
            })
    }

    fn detach(&mut self, workspace_id: WorkspaceId, id: WindowId) {
        if let Some(ids) = self.by_workspace.get_mut(&workspace_id) {
            ids.remove(&id);
            if ids.is_empty() {
                self.by_workspace.remove(&workspace_id);
            }
        }
    }
}
