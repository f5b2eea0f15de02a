//! Multi-selection with per-id status
//!
//! Keeps the set of selected entity ids and the status each one carries in
//! step with a master option list that can be refreshed underneath it.
//! "Which ids are selected" and "what status each carries" live in one
//! record per id; the filtered, master-ordered view is derived on demand
//! rather than cached, so a shrinking master list can never strand state.

use serde::{Deserialize, Serialize};

use crate::model::SelectOption;

/// Upstream-assigned entity identifier
pub type EntityId = u64;
/// Upstream-assigned status identifier
pub type StatusId = u64;

/// Status assigned to a newly selected entity when the defaults lookup has
/// no entry for it. Matches the first entry of the upstream status list.
pub const FALLBACK_STATUS_ID: StatusId = 1;

/// A selected entity and the status the user has assigned to it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedEntity {
    /// Id of the entity in its master list
    pub id: EntityId,
    /// Status currently assigned to it
    pub status: StatusId,
}

/// Selection state for one master option list
#[derive(Debug)]
pub struct SelectionModel {
    selected: Vec<SelectedEntity>,
    fallback_status: StatusId,
}

impl Default for SelectionModel {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionModel {
    /// Empty selection with the standard fallback status
    pub fn new() -> Self {
        Self::with_fallback_status(FALLBACK_STATUS_ID)
    }

    /// Empty selection with a caller-chosen fallback status
    pub fn with_fallback_status(fallback_status: StatusId) -> Self {
        Self {
            selected: Vec::new(),
            fallback_status,
        }
    }

    /// Replace the entire selection with one entry per chosen option.
    ///
    /// Ids already selected keep their current status untouched, whatever
    /// the lookup would say; new ids get `defaults(id)`, or the fallback
    /// status when the lookup has nothing. Ids missing from `chosen` are
    /// dropped without a trace. Applying the same choice twice with no
    /// status edit in between yields an identical selection.
    pub fn select_many<F>(&mut self, chosen: &[SelectOption], defaults: F)
    where
        F: Fn(EntityId) -> Option<StatusId>,
    {
        let previous = std::mem::take(&mut self.selected);
        self.selected = chosen
            .iter()
            .map(|option| {
                previous
                    .iter()
                    .find(|entry| entry.id == option.id)
                    .copied()
                    .unwrap_or_else(|| SelectedEntity {
                        id: option.id,
                        status: defaults(option.id).unwrap_or(self.fallback_status),
                    })
            })
            .collect();
        tracing::debug!("selection replaced: {} entries", self.selected.len());
    }

    /// Replace the status of the entity with the given id.
    ///
    /// An id that is not currently selected is ignored: a status click can
    /// race a list refresh, and the stale click loses. No entry is ever
    /// created here.
    pub fn update_status(&mut self, id: EntityId, status: StatusId) {
        match self.selected.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => entry.status = status,
            None => tracing::debug!("status update for unselected entity {} ignored", id),
        }
    }

    /// The subset of the selection whose ids still exist in `master`, in
    /// the order `master` presents them. Pure derivation; stale ids are
    /// filtered, never errored.
    pub fn visible_selections(&self, master: &[SelectOption]) -> Vec<SelectedEntity> {
        master
            .iter()
            .filter_map(|option| {
                self.selected
                    .iter()
                    .find(|entry| entry.id == option.id)
                    .copied()
            })
            .collect()
    }

    /// The raw selection in choice order, stale ids included
    pub fn selected(&self) -> &[SelectedEntity] {
        &self.selected
    }

    /// Ids of all currently selected entities, in choice order
    pub fn selected_ids(&self) -> Vec<EntityId> {
        self.selected.iter().map(|entry| entry.id).collect()
    }

    /// Whether the given id is currently selected
    pub fn is_selected(&self, id: EntityId) -> bool {
        self.selected.iter().any(|entry| entry.id == id)
    }

    /// Drop every selected entity
    pub fn clear(&mut self) {
        self.selected.clear();
    }
}
