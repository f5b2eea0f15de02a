//! Upstream data shapes
//!
//! The resolved forms of what the data-fetching collaborators hand over:
//! option lists for the select controls, the richer per-project element and
//! squad collections, gallery pages, and the update payload eventually sent
//! back out. Fetching itself, and its retry policy, live outside this crate.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::selection::{EntityId, SelectedEntity, StatusId};

/// One selectable entry of a master list.
///
/// `id` and `value` are always equal and serve as the selection key; the
/// upstream option endpoints ship both for the benefit of select controls.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Selection key
    pub id: EntityId,
    /// Display text
    pub label: String,
    /// Duplicate of `id`
    pub value: EntityId,
}

impl SelectOption {
    /// Build an option, keeping `id` and `value` in lockstep
    pub fn new(id: EntityId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            value: id,
        }
    }
}

/// Timestamp of an entity's most recent update
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastUpdate {
    /// Moment of the update, in the reported timezone
    pub date: NaiveDateTime,
    /// Upstream timezone representation discriminator
    pub timezone_type: i32,
    /// Timezone name the date is expressed in
    pub timezone: String,
}

/// A project element as the project-data endpoint describes it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Entity id, shared with the element option list
    pub id: EntityId,
    /// Display name
    pub name: String,
    /// When the element last changed
    pub last_update: LastUpdate,
    /// Display label of the current status
    pub status: String,
    /// Current status id; seeds the status of a fresh selection
    pub status_id: StatusId,
}

/// Per-status breakdown of a squad's elements
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquadElement {
    /// How many of the squad's elements carry this status
    pub amount: u32,
    /// Display label of the status
    pub status: String,
    /// Status id
    pub status_id: StatusId,
}

/// A project squad as the project-data endpoint describes it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Squad {
    /// Entity id, shared with the squad option list
    pub id: EntityId,
    /// Display name
    pub name: String,
    /// When the squad last changed
    pub last_update: LastUpdate,
    /// Total element count
    pub amount: u32,
    /// Breakdown of the squad's elements by status
    pub elements: Vec<SquadElement>,
}

/// The full element and squad collections for one project
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementsAndSquads {
    /// All elements of the project
    pub elements: Vec<Element>,
    /// All squads of the project
    pub squads: Vec<Squad>,
}

impl ElementsAndSquads {
    /// Current status of an element, used as the default when the element
    /// is newly selected
    pub fn element_status(&self, id: EntityId) -> Option<StatusId> {
        self.elements
            .iter()
            .find(|element| element.id == id)
            .map(|element| element.status_id)
    }
}

/// One gallery image and the update it belongs to
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    /// Image URL
    pub url: String,
    /// Day the image was posted
    pub date: NaiveDate,
    /// Id of the update the image came from
    pub update_id: u64,
}

/// One fetched page of the update-image gallery
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectImages {
    /// Total image count across all pages
    pub total: u64,
    /// The images of this page
    pub data: Vec<ImageInfo>,
}

/// Query parameters for a paginated gallery fetch
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// 1-based page number
    pub page: usize,
    /// Page size
    pub limit: usize,
}

/// The update record as it will be submitted.
///
/// Optional parts the user never touched are omitted from the payload
/// entirely rather than sent as empty values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpdateDraft {
    /// Project the update belongs to
    pub project_id: String,
    /// Update title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Update body text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Attached image URLs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    /// Selected element ids
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elements: Option<Vec<EntityId>>,
    /// Selected squad ids
    #[serde(skip_serializing_if = "Option::is_none")]
    pub squads: Option<Vec<EntityId>>,
    /// Status assignments for the selected elements
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element_statuses: Option<Vec<SelectedEntity>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_option_keeps_id_and_value_equal() {
        let option = SelectOption::new(7, "Shield bearer");
        assert_eq!(option.id, option.value);
    }

    #[test]
    fn test_element_status_lookup() {
        let data = ElementsAndSquads {
            elements: vec![Element {
                id: 1,
                name: "Standard bearer".to_string(),
                last_update: LastUpdate {
                    date: NaiveDate::from_ymd_opt(2026, 3, 14)
                        .unwrap()
                        .and_hms_opt(9, 30, 0)
                        .unwrap(),
                    timezone_type: 3,
                    timezone: "UTC".to_string(),
                },
                status: "Base coat".to_string(),
                status_id: 3,
            }],
            squads: vec![],
        };
        assert_eq!(data.element_status(1), Some(3));
        assert_eq!(data.element_status(2), None);
    }
}
