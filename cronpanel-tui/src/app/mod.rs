use crate::config::CronpanelConfig;
use crate::poller::Poller;
use crate::sync::{self, ResourceKind, SyncCompletion, SyncStatus, SyncTicket, SyncTracker};
use cronpanel_client::ServiceType;

mod auth;
mod dashboard;
mod navigation;
mod schedules;
mod state;
pub use auth::SESSION_EXPIRED;
pub use dashboard::{Dashboard, SelectorState};
pub use schedules::MutationOutcome;
pub use state::{
    DeleteContext, FormField, LoginForm, ScheduleAction, ScheduleForm, Screen, TextInput,
};

pub struct App {
    pub running: bool,
    pub screen: Screen,
    pub active_tab: ResourceKind,
    pub status_message: Option<String>,

    // Rendered server state, replaced wholesale by each sync cycle
    pub dashboard: Dashboard,
    pub sync: SyncTracker,

    pub login: LoginForm,
    pub project_form: ScheduleForm,
    pub database_form: ScheduleForm,

    // Schedules tab
    pub schedule_cursor: usize,
    pub delete_context: Option<DeleteContext>,

    pub logs_scroll: u16,

    pub throbber_state: throbber_widgets_tui::ThrobberState,
    pub poller: Poller,

    /// Label shown in the header, e.g. the API URL or "dev".
    pub target_label: String,
}

impl App {
    pub fn new(cfg: &CronpanelConfig, target_label: impl Into<String>) -> Self {
        Self {
            running: true,
            screen: Screen::Login,
            active_tab: ResourceKind::Projects,
            status_message: None,
            dashboard: Dashboard::default(),
            sync: SyncTracker::default(),
            login: LoginForm::default(),
            project_form: ScheduleForm::new(ServiceType::Project),
            database_form: ScheduleForm::new(ServiceType::Database),
            schedule_cursor: 0,
            delete_context: None,
            logs_scroll: 0,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
            poller: Poller::new(cfg.poll_interval()),
            target_label: target_label.into(),
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    /// Render the loading state of `kind` and issue the ticket for its fetch.
    pub fn begin_sync(&mut self, kind: ResourceKind) -> SyncTicket {
        sync::begin(&mut self.sync, &mut self.dashboard, kind)
    }

    pub fn apply_sync(&mut self, completion: SyncCompletion) -> SyncStatus {
        let status = sync::apply(&self.sync, &mut self.dashboard, completion);
        if status == SyncStatus::Rendered {
            self.clamp_schedule_cursor();
        }
        status
    }

    pub fn is_loading(&self) -> bool {
        self.login.submitting || (self.screen == Screen::Main && self.dashboard.is_loading())
    }

    pub fn form(&self, service: ServiceType) -> &ScheduleForm {
        match service {
            ServiceType::Project => &self.project_form,
            ServiceType::Database => &self.database_form,
        }
    }

    pub fn form_mut(&mut self, service: ServiceType) -> &mut ScheduleForm {
        match service {
            ServiceType::Project => &mut self.project_form,
            ServiceType::Database => &mut self.database_form,
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::view::{SelectOption, SelectorContent, SelectorRegion};

    pub fn main_app() -> App {
        let mut app = App::new(&CronpanelConfig::default(), "test");
        app.screen = Screen::Main;
        app
    }

    pub fn with_options(app: &mut App, service: ServiceType, values: &[&str]) {
        let options = values
            .iter()
            .map(|v| SelectOption {
                value: v.to_string(),
                label: v.to_string(),
            })
            .collect();
        app.dashboard
            .render_selector(service, SelectorContent::Options(options));
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::main_app;
    use super::*;
    use crate::sync::Payload;
    use crate::view::ListContent;
    use cronpanel_client::ScheduleList;
    use time::OffsetDateTime;

    #[test]
    fn new_app_starts_on_login_with_projects_tab() {
        let app = App::new(&CronpanelConfig::default(), "test");
        assert_eq!(app.screen, Screen::Login);
        assert_eq!(app.active_tab, ResourceKind::Projects);
        assert!(!app.poller.is_running());
        assert!(!app.is_loading());
    }

    #[test]
    fn schedule_cursor_is_clamped_after_refresh() {
        let mut app = main_app();
        app.schedule_cursor = 4;

        let ticket = app.begin_sync(ResourceKind::Schedules);
        let status = app.apply_sync(SyncCompletion {
            ticket,
            result: Ok(Payload::Schedules(ScheduleList {
                schedules: Vec::new(),
                current_time: OffsetDateTime::now_utc(),
            })),
        });

        assert_eq!(status, SyncStatus::Rendered);
        assert_eq!(app.dashboard.schedules, ListContent::Empty);
        assert_eq!(app.schedule_cursor, 0);
    }
}
