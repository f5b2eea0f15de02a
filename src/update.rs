//! Update composer
//!
//! Page-level state for composing a project update: one [`FormState`] for
//! the named fields, one [`SelectionModel`] for the chosen elements, and
//! the resolved master lists everything is checked against. The composer is
//! the only writer to both; after every selection change it folds the
//! selected ids back into the form, so the form alone carries what gets
//! submitted.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::ClientConfig;
use crate::form::{FieldInput, FieldValue, FormState};
use crate::model::{ElementsAndSquads, SelectOption, UpdateDraft};
use crate::selection::{EntityId, SelectedEntity, SelectionModel, StatusId};
use crate::store::ErrorStore;
use crate::ClientError;

/// Field name of the owning project's id
pub const FIELD_PROJECT_ID: &str = "project_id";
/// Field name of the update title
pub const FIELD_TITLE: &str = "title";
/// Field name of the update description
pub const FIELD_DESCRIPTION: &str = "description";
/// Field name of the attached image URLs
pub const FIELD_IMAGES: &str = "images";
/// Field name of the selected element ids
pub const FIELD_ELEMENTS: &str = "elements";
/// Field name of the selected squad ids
pub const FIELD_SQUADS: &str = "squads";

/// One row of the per-element status assignment list
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusRow {
    /// Element id
    pub id: EntityId,
    /// Element display name
    pub name: String,
    /// Status currently assigned to the element
    pub status: StatusId,
}

/// State of the "add update" screen
pub struct UpdateComposer {
    project_id: String,
    config: ClientConfig,
    form: FormState,
    selection: SelectionModel,
    element_options: Vec<SelectOption>,
    squad_options: Vec<SelectOption>,
    status_options: Vec<SelectOption>,
    project_data: ElementsAndSquads,
    errors: Arc<ErrorStore>,
}

impl UpdateComposer {
    /// Create the composer for one project. Master lists start empty and
    /// are installed as their fetches resolve.
    pub fn new(project_id: impl Into<String>, config: ClientConfig, errors: Arc<ErrorStore>) -> Self {
        let project_id = project_id.into();

        let mut initial = BTreeMap::new();
        initial.insert(
            FIELD_PROJECT_ID.to_string(),
            FieldValue::Text(project_id.clone()),
        );
        let mut form = FormState::new(initial);
        form.add_rule(FIELD_TITLE, |raw| {
            if raw.trim().is_empty() {
                Some("Title required".to_string())
            } else {
                None
            }
        });

        let selection = SelectionModel::with_fallback_status(config.fallback_status_id);
        tracing::info!("update composer created for project {}", project_id);

        Self {
            project_id,
            config,
            form,
            selection,
            element_options: Vec::new(),
            squad_options: Vec::new(),
            status_options: Vec::new(),
            project_data: ElementsAndSquads::default(),
            errors,
        }
    }

    // =========================================================================
    // Resolved upstream data
    // =========================================================================

    /// Install or refresh the element option list. Already-selected ids that
    /// fall out of the list simply stop being visible; their statuses stay.
    pub fn set_element_options(&mut self, options: Vec<SelectOption>) {
        self.element_options = options;
    }

    /// Install or refresh the squad option list
    pub fn set_squad_options(&mut self, options: Vec<SelectOption>) {
        self.squad_options = options;
    }

    /// Install or refresh the status option list
    pub fn set_status_options(&mut self, options: Vec<SelectOption>) {
        self.status_options = options;
    }

    /// Install or refresh the project's element and squad collections
    pub fn set_project_data(&mut self, data: ElementsAndSquads) {
        self.project_data = data;
    }

    /// Forward an upstream fetch failure to the error sink. Composer state
    /// stays whatever it was before the failed fetch.
    pub fn report_fetch_error(&self, message: impl Into<String>) {
        self.errors.report(&ClientError::Fetch(message.into()));
    }

    /// The status option list, for rendering the per-element status selects
    pub fn status_options(&self) -> &[SelectOption] {
        &self.status_options
    }

    // =========================================================================
    // Form events
    // =========================================================================

    /// Apply a text change event
    pub fn handle_input_change(&mut self, input: FieldInput) {
        self.form.handle_input_change(input);
    }

    /// Apply a blur event
    pub fn handle_blur(&mut self, input: &FieldInput) {
        self.form.handle_blur(input);
    }

    /// Current title, empty until typed
    pub fn title(&self) -> &str {
        self.form
            .value(FIELD_TITLE)
            .and_then(FieldValue::as_text)
            .unwrap_or("")
    }

    /// Current description, empty until typed
    pub fn description(&self) -> &str {
        self.form
            .value(FIELD_DESCRIPTION)
            .and_then(FieldValue::as_text)
            .unwrap_or("")
    }

    /// Current error message for a field, if its last blur failed
    pub fn error_message(&self, field: &str) -> Option<&str> {
        self.form.error_message(field)
    }

    /// Length cap the description input should enforce
    pub fn max_description_len(&self) -> usize {
        self.config.max_description_len
    }

    // =========================================================================
    // Images
    // =========================================================================

    /// Append image URLs to the update
    pub fn add_images(&mut self, urls: impl IntoIterator<Item = String>) {
        let mut images = self.images().to_vec();
        images.extend(urls);
        self.form.set_field(FIELD_IMAGES, FieldValue::TextList(images));
    }

    /// Remove one image by position; out-of-range positions are ignored
    pub fn remove_image(&mut self, index: usize) {
        let mut images = self.images().to_vec();
        if index < images.len() {
            images.remove(index);
            self.form.set_field(FIELD_IMAGES, FieldValue::TextList(images));
        }
    }

    /// Remove every attached image
    pub fn clear_images(&mut self) {
        self.form
            .set_field(FIELD_IMAGES, FieldValue::TextList(Vec::new()));
    }

    /// Attached image URLs, empty until any are added
    pub fn images(&self) -> &[String] {
        self.form
            .value(FIELD_IMAGES)
            .and_then(FieldValue::as_text_list)
            .unwrap_or(&[])
    }

    // =========================================================================
    // Element and squad selection
    // =========================================================================

    /// Replace the element selection with the given multi-select choice.
    /// New ids pick up the element's current status from the project data;
    /// ids kept across the change keep whatever status the user set.
    pub fn select_elements(&mut self, chosen: &[SelectOption]) {
        let data = &self.project_data;
        self.selection
            .select_many(chosen, |id| data.element_status(id));
        self.sync_selected_elements();
    }

    /// Assign a status to one selected element. A click that races a list
    /// refresh and targets a no-longer-selected element does nothing.
    pub fn set_element_status(&mut self, id: EntityId, status: StatusId) {
        self.selection.update_status(id, status);
        self.sync_selected_elements();
    }

    /// Replace the squad selection with the given multi-select choice.
    /// Squads carry no per-id status, so the ids go straight into the form.
    pub fn select_squads(&mut self, chosen: &[SelectOption]) {
        let ids: Vec<EntityId> = chosen.iter().map(|option| option.id).collect();
        self.form.set_field(FIELD_SQUADS, FieldValue::IdList(ids));
    }

    /// Selected element ids, empty until a selection is made
    pub fn selected_element_ids(&self) -> &[EntityId] {
        self.form
            .value(FIELD_ELEMENTS)
            .and_then(FieldValue::as_id_list)
            .unwrap_or(&[])
    }

    /// Selected squad ids, empty until a selection is made
    pub fn selected_squad_ids(&self) -> &[EntityId] {
        self.form
            .value(FIELD_SQUADS)
            .and_then(FieldValue::as_id_list)
            .unwrap_or(&[])
    }

    /// The selected entities whose element option still exists, in option
    /// list order. Entities whose option disappeared are filtered out.
    pub fn visible_element_selections(&self) -> Vec<SelectedEntity> {
        self.selection.visible_selections(&self.element_options)
    }

    /// The element options currently chosen, for the multi-select's value
    pub fn selected_element_options(&self) -> Vec<&SelectOption> {
        self.element_options
            .iter()
            .filter(|option| self.selection.is_selected(option.id))
            .collect()
    }

    /// The squad options currently chosen, for the multi-select's value
    pub fn selected_squad_options(&self) -> Vec<&SelectOption> {
        let ids = self.selected_squad_ids();
        self.squad_options
            .iter()
            .filter(|option| ids.contains(&option.id))
            .collect()
    }

    /// Rows for the per-element status assignment list: every selected
    /// element still present in the project data, in project-data order.
    /// Elements the data no longer knows simply don't get a row.
    pub fn status_rows(&self) -> Vec<StatusRow> {
        self.project_data
            .elements
            .iter()
            .filter_map(|element| {
                self.selection
                    .selected()
                    .iter()
                    .find(|entry| entry.id == element.id)
                    .map(|entry| StatusRow {
                        id: element.id,
                        name: element.name.clone(),
                        status: entry.status,
                    })
            })
            .collect()
    }

    fn sync_selected_elements(&mut self) {
        let ids = self.selection.selected_ids();
        self.form.set_field(FIELD_ELEMENTS, FieldValue::IdList(ids));
    }

    // =========================================================================
    // Submission
    // =========================================================================

    /// Assemble the submission payload from the current form values.
    /// Fields the user never touched are omitted, not sent empty.
    pub fn draft(&self) -> UpdateDraft {
        let text = |name: &str| {
            self.form
                .value(name)
                .and_then(FieldValue::as_text)
                .map(str::to_string)
        };
        let ids = |name: &str| {
            self.form
                .value(name)
                .and_then(FieldValue::as_id_list)
                .map(<[EntityId]>::to_vec)
        };

        UpdateDraft {
            project_id: self.project_id.clone(),
            title: text(FIELD_TITLE),
            description: text(FIELD_DESCRIPTION),
            images: self
                .form
                .value(FIELD_IMAGES)
                .and_then(FieldValue::as_text_list)
                .map(<[String]>::to_vec),
            elements: ids(FIELD_ELEMENTS),
            squads: ids(FIELD_SQUADS),
            element_statuses: if self.selection.selected().is_empty() {
                None
            } else {
                Some(self.selection.selected().to_vec())
            },
        }
    }

    /// Discard the composition: the form returns to its construction
    /// snapshot and the element selection empties.
    pub fn reset(&mut self) {
        self.form.reset();
        self.selection.clear();
        tracing::debug!("update composer reset for project {}", self.project_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Element, LastUpdate};
    use chrono::NaiveDate;

    fn last_update() -> LastUpdate {
        LastUpdate {
            date: NaiveDate::from_ymd_opt(2026, 5, 2)
                .unwrap()
                .and_hms_opt(18, 0, 0)
                .unwrap(),
            timezone_type: 3,
            timezone: "UTC".to_string(),
        }
    }

    fn element(id: u64, name: &str, status_id: u64) -> Element {
        Element {
            id,
            name: name.to_string(),
            last_update: last_update(),
            status: "whatever".to_string(),
            status_id,
        }
    }

    fn options(ids: &[u64]) -> Vec<SelectOption> {
        ids.iter()
            .map(|id| SelectOption::new(*id, format!("option {}", id)))
            .collect()
    }

    fn composer() -> UpdateComposer {
        let mut composer = UpdateComposer::new(
            "proj-7",
            ClientConfig::default(),
            Arc::new(ErrorStore::new()),
        );
        composer.set_element_options(options(&[1, 2, 3]));
        composer.set_squad_options(options(&[10, 11]));
        composer.set_status_options(options(&[1, 2, 3, 4, 5]));
        composer.set_project_data(ElementsAndSquads {
            elements: vec![
                element(1, "Captain", 3),
                element(2, "Standard bearer", 4),
                // Element 3 exists as an option but carries no status yet.
            ],
            squads: vec![],
        });
        composer
    }

    #[test]
    fn test_select_elements_folds_ids_into_form() {
        let mut composer = composer();
        composer.select_elements(&options(&[1, 2]));
        assert_eq!(composer.selected_element_ids(), &[1, 2]);
    }

    #[test]
    fn test_select_elements_defaults_from_project_data() {
        let mut composer = composer();
        composer.select_elements(&options(&[1, 2, 3]));
        let rows = composer.status_rows();
        assert_eq!(rows.len(), 2); // element 3 has no project-data row
        assert_eq!(rows[0].status, 3);
        assert_eq!(rows[1].status, 4);
        // ...but it is selected, with the fallback status.
        assert_eq!(composer.selected_element_ids(), &[1, 2, 3]);
        assert_eq!(composer.draft().element_statuses.unwrap()[2].status, 1);
    }

    #[test]
    fn test_status_edit_survives_reselection() {
        let mut composer = composer();
        composer.select_elements(&options(&[1, 2]));
        composer.set_element_status(2, 9);
        composer.select_elements(&options(&[1, 2]));

        let rows = composer.status_rows();
        assert_eq!(rows[0].status, 3);
        assert_eq!(rows[1].status, 9);
    }

    #[test]
    fn test_stale_click_is_ignored() {
        let mut composer = composer();
        composer.select_elements(&options(&[1]));
        composer.set_element_status(2, 9);
        assert_eq!(composer.selected_element_ids(), &[1]);
    }

    #[test]
    fn test_status_rows_follow_project_data_order() {
        let mut composer = composer();
        composer.select_elements(&options(&[2, 1]));
        let rows = composer.status_rows();
        assert_eq!(rows[0].name, "Captain");
        assert_eq!(rows[1].name, "Standard bearer");
    }

    #[test]
    fn test_shrunken_project_data_drops_rows_not_state() {
        let mut composer = composer();
        composer.select_elements(&options(&[1, 2]));
        composer.set_project_data(ElementsAndSquads {
            elements: vec![element(1, "Captain", 3)],
            squads: vec![],
        });

        let rows = composer.status_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, 1);
        // The folded ids still carry both selections.
        assert_eq!(composer.selected_element_ids(), &[1, 2]);
    }

    #[test]
    fn test_selected_element_options_track_master_list() {
        let mut composer = composer();
        composer.select_elements(&options(&[1, 2]));
        composer.set_element_options(options(&[1, 3]));

        let visible: Vec<u64> = composer
            .selected_element_options()
            .iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(visible, vec![1]);

        let selections = composer.visible_element_selections();
        assert_eq!(selections.len(), 1);
        assert_eq!(selections[0].id, 1);
    }

    #[test]
    fn test_select_squads_writes_ids_directly() {
        let mut composer = composer();
        composer.select_squads(&options(&[10, 11]));
        assert_eq!(composer.selected_squad_ids(), &[10, 11]);

        let chosen: Vec<u64> = composer
            .selected_squad_options()
            .iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(chosen, vec![10, 11]);
    }

    #[test]
    fn test_image_list_operations() {
        let mut composer = composer();
        composer.add_images(["a.png".to_string(), "b.png".to_string()]);
        composer.add_images(["c.png".to_string()]);
        composer.remove_image(1);
        assert_eq!(composer.images(), &["a.png", "c.png"]);

        composer.remove_image(99); // ignored
        assert_eq!(composer.images().len(), 2);

        composer.clear_images();
        assert!(composer.images().is_empty());
    }

    #[test]
    fn test_title_validation_through_composer() {
        let mut composer = composer();
        composer.handle_blur(&FieldInput::new(FIELD_TITLE, ""));
        assert_eq!(composer.error_message(FIELD_TITLE), Some("Title required"));

        composer.handle_input_change(FieldInput::new(FIELD_TITLE, "Shoulder pads"));
        composer.handle_blur(&FieldInput::new(FIELD_TITLE, "Shoulder pads"));
        assert_eq!(composer.error_message(FIELD_TITLE), None);
        assert_eq!(composer.title(), "Shoulder pads");
    }

    #[test]
    fn test_draft_omits_untouched_fields() {
        let composer = composer();
        let value = serde_json::to_value(composer.draft()).unwrap();
        assert_eq!(value["project_id"], "proj-7");
        assert!(value.get("title").is_none());
        assert!(value.get("images").is_none());
        assert!(value.get("elements").is_none());
    }

    #[test]
    fn test_draft_carries_composed_state() {
        let mut composer = composer();
        composer.handle_input_change(FieldInput::new(FIELD_TITLE, "Varnish pass"));
        composer.select_elements(&options(&[1, 2]));
        composer.set_element_status(1, 5);
        composer.select_squads(&options(&[10]));
        composer.add_images(["final.png".to_string()]);

        let draft = composer.draft();
        assert_eq!(draft.title.as_deref(), Some("Varnish pass"));
        assert_eq!(draft.elements, Some(vec![1, 2]));
        assert_eq!(draft.squads, Some(vec![10]));
        assert_eq!(draft.images, Some(vec!["final.png".to_string()]));
        let statuses = draft.element_statuses.unwrap();
        assert_eq!(statuses[0].status, 5);
        assert_eq!(statuses[1].status, 4);
    }

    #[test]
    fn test_reset_clears_selection_and_form() {
        let mut composer = composer();
        composer.handle_input_change(FieldInput::new(FIELD_TITLE, "scrapped"));
        composer.select_elements(&options(&[1]));
        composer.reset();

        assert_eq!(composer.title(), "");
        assert!(composer.selected_element_ids().is_empty());
        assert!(composer.status_rows().is_empty());
        // The seeded project id survives the reset.
        assert_eq!(composer.draft().project_id, "proj-7");
    }

    #[test]
    fn test_fetch_error_forwarded_to_sink() {
        let sink = Arc::new(ErrorStore::new());
        let composer = UpdateComposer::new("proj-7", ClientConfig::default(), sink.clone());
        composer.report_fetch_error("element options unavailable");
        assert_eq!(
            sink.current().as_deref(),
            Some("fetch error: element options unavailable")
        );
    }
}
