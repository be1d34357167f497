use cronpanel_client::{Database, Project, Schedule, ServiceType};

use crate::time_utils::format_timestamp;
use crate::view::{Row, SelectOption};

use super::ResourceKind;

pub fn project_row(project: &Project) -> Row {
    Row {
        text: format!(
            "{}  type: {}  status: {}  scale: {}",
            project.project_id, project.kind, project.status, project.scale
        ),
        job_id: None,
    }
}

pub fn database_row(database: &Database) -> Row {
    let id = if database.db_id.is_empty() {
        "(no id)"
    } else {
        database.db_id.as_str()
    };
    Row {
        text: format!(
            "{}  type: {}  status: {}  scale: {}  host: {}",
            id, database.kind, database.status, database.scale, database.hostname
        ),
        job_id: None,
    }
}

/// Last/Next Run segments appear only when the server reported them.
pub fn schedule_row(schedule: &Schedule) -> Row {
    let mut text = format!(
        "{} ({})  action: {}  cron: {}",
        schedule.service_name, schedule.service_type, schedule.action, schedule.cron_spec
    );
    if let Some(last_run) = schedule.last_run {
        text.push_str(&format!("  Last Run: {}", format_timestamp(last_run)));
    }
    if let Some(next_run) = schedule.next_run {
        text.push_str(&format!("  Next Run: {}", format_timestamp(next_run)));
    }
    Row {
        text,
        job_id: Some(schedule.job_id.clone()),
    }
}

pub fn project_option(project: &Project) -> SelectOption {
    SelectOption {
        value: project.project_id.clone(),
        label: project.project_id.clone(),
    }
}

/// Labelled `<id> (<type> - <host>)`; a database without an id keeps a
/// blank value and only shows its type and host.
pub fn database_option(database: &Database) -> SelectOption {
    let label = format!(
        "{} ({} - {})",
        database.db_id, database.kind, database.hostname
    );
    SelectOption {
        value: database.db_id.clone(),
        label: label.trim_start().to_string(),
    }
}

pub fn empty_list_message(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Projects => "No projects found.",
        ResourceKind::Databases => "No databases found.",
        ResourceKind::Schedules => "No schedules found.",
        ResourceKind::Logs => "No logs.",
        ResourceKind::Uptime => "No uptime reported.",
    }
}

pub fn empty_selector_message(service: ServiceType) -> &'static str {
    match service {
        ServiceType::Project => "No projects available",
        ServiceType::Database => "No databases available",
    }
}

pub fn loading_message(kind: ResourceKind) -> String {
    format!("Loading {}...", kind.label())
}

pub fn failed_message(kind: ResourceKind) -> String {
    format!("Error loading {}.", kind.label())
}
