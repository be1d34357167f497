//! Per-resource fetch-and-render cycles.
//!
//! A cycle is split in three so the runtime can run the network part on a
//! spawned task: [`begin`] renders the loading state and issues a ticket,
//! [`fetch`] performs the request, [`apply`] renders the outcome if the ticket
//! is still the newest one for its kind. Every render replaces the region
//! wholesale; nothing is merged with what was shown before.

use cronpanel_client::{
    ApiError, ControlPlane, Database, Project, ScheduleList, ServiceType, Uptime,
};
use tracing::{debug, warn};

use crate::time_utils::format_timestamp;
use crate::view::{DashboardView, ListContent, SelectorContent, TextContent, TextSlot};

pub mod rows;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Projects,
    Databases,
    Schedules,
    Logs,
    Uptime,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Projects,
        ResourceKind::Databases,
        ResourceKind::Schedules,
        ResourceKind::Logs,
        ResourceKind::Uptime,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Projects => "projects",
            ResourceKind::Databases => "databases",
            ResourceKind::Schedules => "schedules",
            ResourceKind::Logs => "logs",
            ResourceKind::Uptime => "uptime",
        }
    }

    fn index(&self) -> usize {
        match self {
            ResourceKind::Projects => 0,
            ResourceKind::Databases => 1,
            ResourceKind::Schedules => 2,
            ResourceKind::Logs => 3,
            ResourceKind::Uptime => 4,
        }
    }
}

/// Identifies one cycle; only the latest ticket per kind may render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncTicket {
    pub kind: ResourceKind,
    generation: u64,
}

#[derive(Debug, Default)]
pub struct SyncTracker {
    generations: [u64; 5],
}

impl SyncTracker {
    pub fn issue(&mut self, kind: ResourceKind) -> SyncTicket {
        let slot = &mut self.generations[kind.index()];
        *slot += 1;
        SyncTicket {
            kind,
            generation: *slot,
        }
    }

    pub fn is_current(&self, ticket: SyncTicket) -> bool {
        self.generations[ticket.kind.index()] == ticket.generation
    }
}

#[derive(Debug, Clone)]
pub enum Payload {
    Projects(Vec<Project>),
    Databases(Vec<Database>),
    Schedules(ScheduleList),
    Logs(String),
    Uptime(Uptime),
}

#[derive(Debug)]
pub struct SyncCompletion {
    pub ticket: SyncTicket,
    pub result: Result<Payload, ApiError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    Rendered,
    Failed,
    /// A newer cycle of the same kind was started; nothing was rendered.
    Stale,
    /// The server no longer accepts the credential.
    SessionRejected,
}

/// Render the loading state for `kind` and issue its ticket.
pub fn begin<V: DashboardView>(
    tracker: &mut SyncTracker,
    view: &mut V,
    kind: ResourceKind,
) -> SyncTicket {
    let ticket = tracker.issue(kind);
    view.render_error(kind, None);
    match kind {
        ResourceKind::Projects => {
            view.render_list(kind, ListContent::Loading);
            view.render_selector(ServiceType::Project, SelectorContent::Loading);
        }
        ResourceKind::Databases => {
            view.render_list(kind, ListContent::Loading);
            view.render_selector(ServiceType::Database, SelectorContent::Loading);
        }
        ResourceKind::Schedules => {
            view.render_text(TextSlot::ServerTime, TextContent::Loading);
            view.render_list(kind, ListContent::Loading);
        }
        ResourceKind::Logs => view.render_text(TextSlot::Logs, TextContent::Loading),
        ResourceKind::Uptime => view.render_text(TextSlot::Uptime, TextContent::Loading),
    }
    debug!(kind = kind.label(), generation = ticket.generation, "sync cycle started");
    ticket
}

pub async fn fetch(kind: ResourceKind, backend: &dyn ControlPlane) -> Result<Payload, ApiError> {
    match kind {
        ResourceKind::Projects => backend.list_projects().await.map(Payload::Projects),
        ResourceKind::Databases => backend.list_databases().await.map(Payload::Databases),
        ResourceKind::Schedules => backend.list_schedules().await.map(Payload::Schedules),
        ResourceKind::Logs => backend.fetch_logs().await.map(Payload::Logs),
        ResourceKind::Uptime => backend.fetch_uptime().await.map(Payload::Uptime),
    }
}

/// Render a finished cycle, unless a newer one of the same kind superseded it.
pub fn apply<V: DashboardView>(
    tracker: &SyncTracker,
    view: &mut V,
    completion: SyncCompletion,
) -> SyncStatus {
    let SyncCompletion { ticket, result } = completion;
    if !tracker.is_current(ticket) {
        debug!(kind = ticket.kind.label(), "discarding superseded response");
        return SyncStatus::Stale;
    }

    match result {
        Ok(payload) => {
            render_payload(view, payload);
            SyncStatus::Rendered
        }
        Err(err) => {
            warn!(kind = ticket.kind.label(), error = %err, "sync cycle failed");
            render_failure(view, ticket.kind, &err);
            if err.is_unauthorized() {
                SyncStatus::SessionRejected
            } else {
                SyncStatus::Failed
            }
        }
    }
}

fn render_payload<V: DashboardView>(view: &mut V, payload: Payload) {
    match payload {
        Payload::Projects(projects) => {
            if projects.is_empty() {
                view.render_list(ResourceKind::Projects, ListContent::Empty);
                view.render_selector(ServiceType::Project, SelectorContent::Empty);
            } else {
                let rows = projects.iter().map(rows::project_row).collect();
                let options = projects.iter().map(rows::project_option).collect();
                view.render_list(ResourceKind::Projects, ListContent::Rows(rows));
                view.render_selector(ServiceType::Project, SelectorContent::Options(options));
            }
        }
        Payload::Databases(databases) => {
            if databases.is_empty() {
                view.render_list(ResourceKind::Databases, ListContent::Empty);
                view.render_selector(ServiceType::Database, SelectorContent::Empty);
            } else {
                let rows = databases.iter().map(rows::database_row).collect();
                let options = databases.iter().map(rows::database_option).collect();
                view.render_list(ResourceKind::Databases, ListContent::Rows(rows));
                view.render_selector(ServiceType::Database, SelectorContent::Options(options));
            }
        }
        Payload::Schedules(list) => {
            view.render_text(
                TextSlot::ServerTime,
                TextContent::Ready(format_timestamp(list.current_time)),
            );
            let content = if list.schedules.is_empty() {
                ListContent::Empty
            } else {
                ListContent::Rows(list.schedules.iter().map(rows::schedule_row).collect())
            };
            view.render_list(ResourceKind::Schedules, content);
        }
        Payload::Logs(text) => view.render_text(TextSlot::Logs, TextContent::Ready(text)),
        Payload::Uptime(uptime) => {
            view.render_text(TextSlot::Uptime, TextContent::Ready(uptime.uptime))
        }
    }
}

fn render_failure<V: DashboardView>(view: &mut V, kind: ResourceKind, err: &ApiError) {
    match kind {
        ResourceKind::Projects => {
            view.render_list(kind, ListContent::Failed);
            view.render_selector(ServiceType::Project, SelectorContent::Failed);
        }
        ResourceKind::Databases => {
            view.render_list(kind, ListContent::Failed);
            view.render_selector(ServiceType::Database, SelectorContent::Failed);
        }
        ResourceKind::Schedules => {
            view.render_text(TextSlot::ServerTime, TextContent::Failed);
            view.render_list(kind, ListContent::Failed);
        }
        ResourceKind::Logs => view.render_text(TextSlot::Logs, TextContent::Failed),
        ResourceKind::Uptime => view.render_text(TextSlot::Uptime, TextContent::Failed),
    }
    view.render_error(kind, Some(err.operator_message()));
}
