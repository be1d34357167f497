use super::*;
use crate::view::ListContent;
use cronpanel_client::{ApiError, CreateScheduleRequest};

/// What the runtime should do after a schedule mutation settles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MutationOutcome {
    /// Re-run the schedules cycle to pick up server state.
    Resync,
    /// Failure was reported; nothing else to do.
    Unchanged,
    SessionRejected,
}

impl App {
    /// Build the create request from the form, or record a local validation
    /// error. Nothing is sent when this returns `None`.
    pub fn prepare_schedule(&mut self, service: ServiceType) -> Option<CreateScheduleRequest> {
        let selected = self
            .dashboard
            .selector(service)
            .selected_value()
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        let form = self.form_mut(service);
        let Some(service_name) = selected else {
            form.error = Some(format!("Please select a {}.", service));
            return None;
        };
        form.error = None;

        Some(CreateScheduleRequest {
            service: service_name,
            service_type: service,
            action: form.action.as_str().to_string(),
            cron: form.cron.value.clone(),
        })
    }

    pub fn on_schedule_created(
        &mut self,
        service: ServiceType,
        result: Result<(), ApiError>,
    ) -> MutationOutcome {
        match result {
            Ok(()) => {
                self.form_mut(service).cron.clear();
                self.set_status("Schedule created.".to_string());
                MutationOutcome::Resync
            }
            Err(err) => self.mutation_failed("create schedule", &err),
        }
    }

    /// Ask for confirmation before deleting the schedule under the cursor.
    pub fn request_delete(&mut self) -> bool {
        let ListContent::Rows(rows) = &self.dashboard.schedules else {
            return false;
        };
        let Some(row) = rows.get(self.schedule_cursor) else {
            return false;
        };
        let Some(job_id) = row.job_id.clone() else {
            return false;
        };
        self.delete_context = Some(DeleteContext {
            job_id,
            label: row.text.clone(),
        });
        true
    }

    /// The operator said yes; hand back the job to delete.
    pub fn confirm_delete(&mut self) -> Option<String> {
        self.delete_context.take().map(|ctx| ctx.job_id)
    }

    pub fn cancel_delete(&mut self) {
        self.delete_context = None;
    }

    pub fn on_schedule_deleted(&mut self, result: Result<(), ApiError>) -> MutationOutcome {
        match result {
            Ok(()) => {
                self.set_status("Schedule deleted.".to_string());
                MutationOutcome::Resync
            }
            Err(err) => self.mutation_failed("delete schedule", &err),
        }
    }

    fn mutation_failed(&mut self, what: &str, err: &ApiError) -> MutationOutcome {
        if err.is_unauthorized() {
            return MutationOutcome::SessionRejected;
        }
        self.set_status(format!("Failed to {}: {}", what, err.operator_message()));
        MutationOutcome::Unchanged
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{main_app, with_options};
    use super::*;
    use crate::view::{ListRegion, Row};
    use cronpanel_client::NETWORK_UNAVAILABLE;

    #[test]
    fn empty_selection_is_rejected_locally() {
        let mut app = main_app();
        app.project_form.cron = TextInput::from_str("0 22 * * *");

        assert!(app.prepare_schedule(ServiceType::Project).is_none());
        assert_eq!(
            app.project_form.error.as_deref(),
            Some("Please select a project.")
        );
        assert_eq!(app.project_form.cron.value, "0 22 * * *");
    }

    #[test]
    fn blank_database_id_counts_as_no_selection() {
        let mut app = main_app();
        with_options(&mut app, ServiceType::Database, &[""]);
        assert!(app.prepare_schedule(ServiceType::Database).is_none());
    }

    #[test]
    fn request_carries_form_values() {
        let mut app = main_app();
        with_options(&mut app, ServiceType::Database, &["orders-pg"]);
        app.database_form.action = ScheduleAction::On;
        app.database_form.cron = TextInput::from_str("0 7 * * *");
        app.database_form.error = Some("stale".to_string());

        let request = app.prepare_schedule(ServiceType::Database).unwrap();

        assert_eq!(request.service, "orders-pg");
        assert_eq!(request.service_type, ServiceType::Database);
        assert_eq!(request.action, "on");
        assert_eq!(request.cron, "0 7 * * *");
        assert!(app.database_form.error.is_none());
    }

    #[test]
    fn success_clears_only_cron() {
        let mut app = main_app();
        app.project_form.action = ScheduleAction::On;
        app.project_form.cron = TextInput::from_str("0 22 * * *");

        let outcome = app.on_schedule_created(ServiceType::Project, Ok(()));

        assert_eq!(outcome, MutationOutcome::Resync);
        assert_eq!(app.project_form.cron.value, "");
        assert_eq!(app.project_form.action, ScheduleAction::On);
    }

    #[test]
    fn failure_keeps_form_and_reports() {
        let mut app = main_app();
        app.project_form.cron = TextInput::from_str("bad");

        let outcome = app.on_schedule_created(
            ServiceType::Project,
            Err(ApiError::Transport("refused".to_string())),
        );

        assert_eq!(outcome, MutationOutcome::Unchanged);
        assert_eq!(app.project_form.cron.value, "bad");
        assert_eq!(
            app.status_message,
            Some(format!("Failed to create schedule: {}", NETWORK_UNAVAILABLE))
        );
    }

    #[test]
    fn delete_needs_a_schedule_row() {
        let mut app = main_app();
        assert!(!app.request_delete());

        app.dashboard.render_list(
            ResourceKind::Schedules,
            ListContent::Rows(vec![Row {
                text: "orders-api (project)".to_string(),
                job_id: Some("12".to_string()),
            }]),
        );
        assert!(app.request_delete());
        assert_eq!(app.confirm_delete().as_deref(), Some("12"));
        assert!(app.delete_context.is_none());
    }

    #[test]
    fn delete_failure_reports_server_message() {
        let mut app = main_app();
        let outcome = app.on_schedule_deleted(Err(ApiError::Application {
            status: 404,
            message: "Schedule not found".to_string(),
        }));
        assert_eq!(outcome, MutationOutcome::Unchanged);
        assert_eq!(
            app.status_message.as_deref(),
            Some("Failed to delete schedule: Schedule not found")
        );
    }
}
