//! In-memory view state the sync engine renders into and the terminal UI
//! draws from every frame.

use std::collections::HashMap;

use cronpanel_client::ServiceType;

use crate::sync::ResourceKind;
use crate::view::{
    ListContent, ListRegion, SelectOption, SelectorContent, SelectorRegion, TextContent,
    TextRegion, TextSlot,
};

#[derive(Debug, Clone, PartialEq)]
pub struct SelectorState {
    pub content: SelectorContent,
    pub selected: usize,
    /// Last value the operator was on; survives Loading/Failed/Empty renders.
    remembered: Option<String>,
}

impl Default for SelectorState {
    fn default() -> Self {
        Self {
            content: SelectorContent::Loading,
            selected: 0,
            remembered: None,
        }
    }
}

impl SelectorState {
    /// Replace the options, keeping the remembered choice when it is still
    /// offered.
    pub fn replace(&mut self, content: SelectorContent) {
        if let SelectorContent::Options(options) = &content {
            self.selected = self
                .remembered
                .as_deref()
                .and_then(|value| options.iter().position(|o| o.value == value))
                .unwrap_or(0);
        } else {
            self.selected = 0;
        }
        self.content = content;
        self.remember();
    }

    pub fn options(&self) -> &[SelectOption] {
        match &self.content {
            SelectorContent::Options(options) => options,
            _ => &[],
        }
    }

    pub fn selected_value(&self) -> Option<&str> {
        self.options()
            .get(self.selected)
            .map(|option| option.value.as_str())
    }

    pub fn next(&mut self) {
        let len = self.options().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
            self.remember();
        }
    }

    pub fn prev(&mut self) {
        let len = self.options().len();
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
            self.remember();
        }
    }

    fn remember(&mut self) {
        if let Some(value) = self.selected_value() {
            self.remembered = Some(value.to_string());
        }
    }
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub projects: ListContent,
    pub databases: ListContent,
    pub schedules: ListContent,
    pub project_selector: SelectorState,
    pub database_selector: SelectorState,
    pub server_time: TextContent,
    pub logs: TextContent,
    pub uptime: TextContent,
    pub errors: HashMap<ResourceKind, String>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self {
            projects: ListContent::Loading,
            databases: ListContent::Loading,
            schedules: ListContent::Loading,
            project_selector: SelectorState::default(),
            database_selector: SelectorState::default(),
            server_time: TextContent::Blank,
            logs: TextContent::Blank,
            uptime: TextContent::Blank,
            errors: HashMap::new(),
        }
    }
}

impl Dashboard {
    pub fn list(&self, kind: ResourceKind) -> Option<&ListContent> {
        match kind {
            ResourceKind::Projects => Some(&self.projects),
            ResourceKind::Databases => Some(&self.databases),
            ResourceKind::Schedules => Some(&self.schedules),
            ResourceKind::Logs | ResourceKind::Uptime => None,
        }
    }

    pub fn selector(&self, service: ServiceType) -> &SelectorState {
        match service {
            ServiceType::Project => &self.project_selector,
            ServiceType::Database => &self.database_selector,
        }
    }

    pub fn selector_mut(&mut self, service: ServiceType) -> &mut SelectorState {
        match service {
            ServiceType::Project => &mut self.project_selector,
            ServiceType::Database => &mut self.database_selector,
        }
    }

    pub fn text(&self, slot: TextSlot) -> &TextContent {
        match slot {
            TextSlot::ServerTime => &self.server_time,
            TextSlot::Logs => &self.logs,
            TextSlot::Uptime => &self.uptime,
        }
    }

    pub fn error(&self, kind: ResourceKind) -> Option<&str> {
        self.errors.get(&kind).map(String::as_str)
    }

    pub fn is_loading(&self) -> bool {
        [&self.projects, &self.databases, &self.schedules]
            .iter()
            .any(|list| matches!(list, ListContent::Loading))
            || [&self.server_time, &self.logs, &self.uptime]
                .iter()
                .any(|text| matches!(text, TextContent::Loading))
    }
}

impl ListRegion for Dashboard {
    fn render_list(&mut self, kind: ResourceKind, content: ListContent) {
        match kind {
            ResourceKind::Projects => self.projects = content,
            ResourceKind::Databases => self.databases = content,
            ResourceKind::Schedules => self.schedules = content,
            ResourceKind::Logs | ResourceKind::Uptime => {}
        }
    }
}

impl SelectorRegion for Dashboard {
    fn render_selector(&mut self, service: ServiceType, content: SelectorContent) {
        self.selector_mut(service).replace(content);
    }
}

impl TextRegion for Dashboard {
    fn render_text(&mut self, slot: TextSlot, content: TextContent) {
        match slot {
            TextSlot::ServerTime => self.server_time = content,
            TextSlot::Logs => self.logs = content,
            TextSlot::Uptime => self.uptime = content,
        }
    }

    fn render_error(&mut self, kind: ResourceKind, message: Option<String>) {
        match message {
            Some(message) => {
                self.errors.insert(kind, message);
            }
            None => {
                self.errors.remove(&kind);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::{self, Payload, SyncCompletion, SyncTracker};
    use cronpanel_client::Project;

    fn options(values: &[&str]) -> SelectorContent {
        SelectorContent::Options(
            values
                .iter()
                .map(|v| SelectOption {
                    value: v.to_string(),
                    label: v.to_string(),
                })
                .collect(),
        )
    }

    #[test]
    fn refresh_keeps_selection_by_value() {
        let mut selector = SelectorState::default();
        selector.replace(options(&["a", "b", "c"]));
        selector.next();
        assert_eq!(selector.selected_value(), Some("b"));

        selector.replace(options(&["z", "b"]));
        assert_eq!(selector.selected_value(), Some("b"));
    }

    #[test]
    fn selection_survives_loading_between_refreshes() {
        let mut selector = SelectorState::default();
        selector.replace(options(&["a", "b", "c"]));
        selector.next();
        selector.next();

        selector.replace(SelectorContent::Loading);
        assert_eq!(selector.selected_value(), None);
        selector.replace(SelectorContent::Failed);
        selector.replace(options(&["a", "b", "c"]));

        assert_eq!(selector.selected_value(), Some("c"));
    }

    #[test]
    fn sync_cycle_keeps_chosen_project() {
        let mut dashboard = Dashboard::default();
        let mut tracker = SyncTracker::default();
        let projects: Vec<Project> = ["a", "b", "c"]
            .iter()
            .map(|id| Project {
                project_id: id.to_string(),
                kind: "node".to_string(),
                status: "RUNNING".to_string(),
                scale: 1,
            })
            .collect();

        let mut cycle = |dashboard: &mut Dashboard| {
            let ticket = sync::begin(&mut tracker, dashboard, ResourceKind::Projects);
            sync::apply(
                &tracker,
                dashboard,
                SyncCompletion {
                    ticket,
                    result: Ok(Payload::Projects(projects.clone())),
                },
            );
        };

        cycle(&mut dashboard);
        dashboard.project_selector.prev();
        cycle(&mut dashboard);

        assert_eq!(dashboard.project_selector.selected_value(), Some("c"));
    }

    #[test]
    fn refresh_falls_back_to_first_option() {
        let mut selector = SelectorState::default();
        selector.replace(options(&["a", "b"]));
        selector.next();

        selector.replace(options(&["x", "y"]));
        assert_eq!(selector.selected_value(), Some("x"));
    }

    #[test]
    fn selection_wraps() {
        let mut selector = SelectorState::default();
        selector.replace(options(&["a", "b"]));
        selector.prev();
        assert_eq!(selector.selected_value(), Some("b"));
        selector.next();
        assert_eq!(selector.selected_value(), Some("a"));
    }

    #[test]
    fn empty_selector_has_no_value() {
        let mut selector = SelectorState::default();
        selector.replace(SelectorContent::Empty);
        selector.next();
        assert_eq!(selector.selected_value(), None);
    }

    #[test]
    fn error_slot_is_set_and_cleared() {
        let mut dashboard = Dashboard::default();
        dashboard.render_error(ResourceKind::Logs, Some("boom".to_string()));
        assert_eq!(dashboard.error(ResourceKind::Logs), Some("boom"));
        dashboard.render_error(ResourceKind::Logs, None);
        assert_eq!(dashboard.error(ResourceKind::Logs), None);
    }

    #[test]
    fn loading_is_reported_while_any_region_loads() {
        let mut dashboard = Dashboard::default();
        assert!(dashboard.is_loading());
        for kind in [
            ResourceKind::Projects,
            ResourceKind::Databases,
            ResourceKind::Schedules,
        ] {
            dashboard.render_list(kind, ListContent::Empty);
        }
        assert!(!dashboard.is_loading());
        dashboard.render_text(TextSlot::Uptime, TextContent::Loading);
        assert!(dashboard.is_loading());
    }
}
