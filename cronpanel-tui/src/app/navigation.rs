use super::*;
use crate::view::ListContent;

impl App {
    /// Activate `kind` and return the cycle to run. Re-selecting the active
    /// tab refreshes it.
    pub fn select_tab(&mut self, kind: ResourceKind) -> ResourceKind {
        if self.active_tab != kind {
            self.delete_context = None;
            self.active_tab = kind;
        }
        kind
    }

    pub fn next_tab(&mut self) -> ResourceKind {
        let index = self.tab_index();
        self.select_tab(ResourceKind::ALL[(index + 1) % ResourceKind::ALL.len()])
    }

    pub fn prev_tab(&mut self) -> ResourceKind {
        let len = ResourceKind::ALL.len();
        let index = self.tab_index();
        self.select_tab(ResourceKind::ALL[(index + len - 1) % len])
    }

    pub fn tab_index(&self) -> usize {
        ResourceKind::ALL
            .iter()
            .position(|kind| *kind == self.active_tab)
            .unwrap_or(0)
    }

    /// The schedule form shown on the active tab, if any.
    pub fn active_service(&self) -> Option<ServiceType> {
        match self.active_tab {
            ResourceKind::Projects => Some(ServiceType::Project),
            ResourceKind::Databases => Some(ServiceType::Database),
            _ => None,
        }
    }

    pub fn focus_next_field(&mut self, service: ServiceType) {
        let form = self.form_mut(service);
        form.focused = form.focused.next();
    }

    pub fn focus_prev_field(&mut self, service: ServiceType) {
        let form = self.form_mut(service);
        form.focused = form.focused.prev();
    }

    /// Left/Right on the focused field: cycle the selector, flip the action
    /// or move the cron cursor.
    pub fn adjust_field(&mut self, service: ServiceType, forward: bool) {
        let focused = self.form(service).focused;
        match focused {
            FormField::Service => {
                let selector = self.dashboard.selector_mut(service);
                if forward {
                    selector.next();
                } else {
                    selector.prev();
                }
            }
            FormField::Action => {
                let form = self.form_mut(service);
                form.action = form.action.toggle();
            }
            FormField::Cron => {
                let cron = &mut self.form_mut(service).cron;
                if forward {
                    cron.move_right();
                } else {
                    cron.move_left();
                }
            }
        }
    }

    pub fn schedule_rows(&self) -> usize {
        match &self.dashboard.schedules {
            ListContent::Rows(rows) => rows.len(),
            _ => 0,
        }
    }

    pub fn schedule_cursor_down(&mut self) {
        if self.schedule_cursor + 1 < self.schedule_rows() {
            self.schedule_cursor += 1;
        }
    }

    pub fn schedule_cursor_up(&mut self) {
        self.schedule_cursor = self.schedule_cursor.saturating_sub(1);
    }

    pub(super) fn clamp_schedule_cursor(&mut self) {
        let rows = self.schedule_rows();
        if self.schedule_cursor >= rows {
            self.schedule_cursor = rows.saturating_sub(1);
        }
    }

    pub fn scroll_logs_down(&mut self) {
        self.logs_scroll = self.logs_scroll.saturating_add(1);
    }

    pub fn scroll_logs_up(&mut self) {
        self.logs_scroll = self.logs_scroll.saturating_sub(1);
    }
}
