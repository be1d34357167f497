use super::*;
use cronpanel_client::{ApiError, Credential};
use std::time::Instant;

pub const SESSION_EXPIRED: &str = "Session expired. Please log in again.";

impl App {
    /// Take the typed token for submission, or flag an empty one.
    pub fn login_submission(&mut self) -> Option<Credential> {
        if self.login.submitting {
            return None;
        }
        match Credential::new(&self.login.token.value) {
            Some(credential) => {
                self.login.submitting = true;
                self.login.error = None;
                Some(credential)
            }
            None => {
                self.login.error = Some("Please enter your API token.".to_string());
                None
            }
        }
    }

    pub fn on_login_rejected(&mut self, err: &ApiError) {
        self.login.submitting = false;
        self.login.error = Some(err.operator_message());
    }

    /// Show the dashboard and start polling. Returns every cycle to run so
    /// the first frame after login is fully populated.
    pub fn enter_main(&mut self, now: Instant) -> [ResourceKind; 5] {
        self.screen = Screen::Main;
        self.login = LoginForm::default();
        self.active_tab = ResourceKind::Projects;
        self.poller.start(now);
        ResourceKind::ALL
    }

    /// Back to the login screen with a clean dashboard. Cycles still in
    /// flight are invalidated so they cannot render into the next session.
    pub fn enter_login(&mut self, message: Option<String>) {
        self.screen = Screen::Login;
        self.poller.stop();
        for kind in ResourceKind::ALL {
            self.sync.issue(kind);
        }
        self.dashboard = Dashboard::default();
        self.project_form = ScheduleForm::new(ServiceType::Project);
        self.database_form = ScheduleForm::new(ServiceType::Database);
        self.delete_context = None;
        self.schedule_cursor = 0;
        self.logs_scroll = 0;
        self.status_message = None;
        self.login = LoginForm {
            error: message,
            ..LoginForm::default()
        };
    }
}
