use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::{
    ApiError, ControlPlane, CreateScheduleRequest, Credential, Database, Project, Result,
    Schedule, ScheduleList, Uptime,
};

/// Token accepted by [`DevBackend::login`].
pub const DEV_TOKEN: &str = "dev-token";

const NO_LOGS: &str = "No logs available for this token in memory.";

/// In-memory stand-in for the control plane.
///
/// Backs `cronpanel dev` and doubles as the test backend: every call is
/// recorded as `"<METHOD> <path>"` and failures can be injected per path.
#[derive(Debug, Clone)]
pub struct DevBackend {
    state: Arc<Mutex<DevState>>,
    started: Instant,
}

#[derive(Debug, Default)]
struct DevState {
    projects: Vec<Project>,
    databases: Vec<Database>,
    schedules: Vec<Schedule>,
    next_job_id: u64,
    logs: Vec<String>,
    requests: Vec<String>,
    failures: HashMap<String, (u16, String)>,
    offline: bool,
    revoked: bool,
}

impl Default for DevBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl DevBackend {
    /// A backend seeded with a few projects and databases.
    pub fn new() -> Self {
        let backend = Self::empty();
        {
            let mut state = backend.lock();
            state.projects = seed_projects();
            state.databases = seed_databases();
        }
        backend
    }

    pub fn empty() -> Self {
        Self {
            state: Arc::new(Mutex::new(DevState {
                next_job_id: 1,
                ..DevState::default()
            })),
            started: Instant::now(),
        }
    }

    pub fn with_projects(self, projects: Vec<Project>) -> Self {
        self.lock().projects = projects;
        self
    }

    pub fn with_databases(self, databases: Vec<Database>) -> Self {
        self.lock().databases = databases;
        self
    }

    pub fn with_schedule(self, schedule: Schedule) -> Self {
        self.lock().schedules.push(schedule);
        self
    }

    /// Make every call fail as if the server were unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.lock().offline = offline;
    }

    /// Answer `request` (e.g. `"GET /projects"`) with an application error.
    pub fn fail_request(&self, request: &str, status: u16, message: &str) {
        self.lock()
            .failures
            .insert(request.to_string(), (status, message.to_string()));
    }

    pub fn clear_failures(&self) {
        self.lock().failures.clear();
    }

    /// Reject the credential on all authenticated calls from now on.
    pub fn revoke_session(&self) {
        self.lock().revoked = true;
    }

    pub fn requests(&self) -> Vec<String> {
        self.lock().requests.clone()
    }

    pub fn request_count(&self, request: &str) -> usize {
        self.lock()
            .requests
            .iter()
            .filter(|r| r.as_str() == request)
            .count()
    }

    pub fn schedules(&self) -> Vec<Schedule> {
        self.lock().schedules.clone()
    }

    fn lock(&self) -> MutexGuard<'_, DevState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record the call and apply any injected failure.
    fn enter(&self, request: String, authenticated: bool) -> Result<MutexGuard<'_, DevState>> {
        let mut state = self.lock();
        state.requests.push(request.clone());

        if state.offline {
            return Err(ApiError::Transport("dev backend offline".to_string()));
        }
        if authenticated && state.revoked {
            return Err(ApiError::Unauthorized {
                message: "Authorization header required".to_string(),
            });
        }
        if let Some((status, message)) = state.failures.get(&request) {
            return Err(ApiError::Application {
                status: *status,
                message: message.clone(),
            });
        }
        Ok(state)
    }
}

#[async_trait]
impl ControlPlane for DevBackend {
    async fn login(&self, credential: &Credential) -> Result<()> {
        let mut state = self.enter("POST /login".to_string(), false)?;
        if credential.expose() != DEV_TOKEN {
            return Err(ApiError::Application {
                status: 401,
                message: "Invalid Liara API Token or API error".to_string(),
            });
        }
        state.revoked = false;
        state.logs.clear();
        Ok(())
    }

    async fn list_projects(&self) -> Result<Vec<Project>> {
        Ok(self.enter("GET /projects".to_string(), true)?.projects.clone())
    }

    async fn list_databases(&self) -> Result<Vec<Database>> {
        Ok(self.enter("GET /databases".to_string(), true)?.databases.clone())
    }

    async fn list_schedules(&self) -> Result<ScheduleList> {
        let state = self.enter("GET /schedules".to_string(), true)?;
        Ok(ScheduleList {
            schedules: state.schedules.clone(),
            current_time: OffsetDateTime::now_utc(),
        })
    }

    async fn create_schedule(&self, request: &CreateScheduleRequest) -> Result<()> {
        let mut state = self.enter("POST /schedule".to_string(), true)?;

        if request.service.is_empty()
            || !matches!(request.action.as_str(), "on" | "off")
            || request.cron.trim().is_empty()
        {
            return Err(ApiError::Application {
                status: 400,
                message: "Invalid input: service, serviceType, action, and cron are required"
                    .to_string(),
            });
        }
        validate_cron(&request.cron).map_err(|reason| ApiError::Application {
            status: 400,
            message: format!("Invalid cron expression: {}", reason),
        })?;

        let job_id = state.next_job_id;
        state.next_job_id += 1;
        state.schedules.push(Schedule {
            job_id: job_id.to_string(),
            service_name: request.service.clone(),
            service_type: request.service_type,
            action: request.action.clone(),
            cron_spec: request.cron.clone(),
            last_run: None,
            next_run: None,
        });
        let line = format!(
            "{}: Schedule added: ServiceName={}, CronSpec={}",
            timestamp(),
            request.service,
            request.cron
        );
        state.logs.push(line);
        Ok(())
    }

    async fn delete_schedule(&self, job_id: &str) -> Result<()> {
        let mut state = self.enter(format!("DELETE /schedule/delete/{}", job_id), true)?;
        let before = state.schedules.len();
        state.schedules.retain(|s| s.job_id != job_id);
        if state.schedules.len() == before {
            return Err(ApiError::Application {
                status: 404,
                message: "Schedule not found".to_string(),
            });
        }
        let line = format!("{}: Schedule deleted: JobID={}", timestamp(), job_id);
        state.logs.push(line);
        Ok(())
    }

    async fn fetch_logs(&self) -> Result<String> {
        let state = self.enter("GET /logs".to_string(), true)?;
        if state.logs.is_empty() {
            Ok(NO_LOGS.to_string())
        } else {
            Ok(state.logs.join("\n"))
        }
    }

    async fn fetch_uptime(&self) -> Result<Uptime> {
        let _state = self.enter("GET /uptime".to_string(), true)?;
        Ok(Uptime {
            uptime: format_uptime(self.started.elapsed()),
        })
    }
}

/// Five whitespace-separated fields or an `@descriptor`.
fn validate_cron(spec: &str) -> std::result::Result<(), String> {
    let spec = spec.trim();
    if spec.starts_with('@') {
        return Ok(());
    }
    let fields = spec.split_whitespace().count();
    if fields == 5 {
        Ok(())
    } else {
        Err(format!("expected exactly 5 fields, found {}: [{}]", fields, spec))
    }
}

/// Mirrors the `1h2m3s` style the real server reports.
fn format_uptime(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
    match (hours, minutes) {
        (0, 0) => format!("{}s", seconds),
        (0, _) => format!("{}m{}s", minutes, seconds),
        _ => format!("{}h{}m{}s", hours, minutes, seconds),
    }
}

fn timestamp() -> String {
    OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_default()
}

fn seed_projects() -> Vec<Project> {
    let project = |id: &str, kind: &str, status: &str, scale: i64| Project {
        project_id: id.to_string(),
        kind: kind.to_string(),
        status: status.to_string(),
        scale,
    };
    vec![
        project("landing-page", "static", "RUNNING", 1),
        project("orders-api", "node", "RUNNING", 1),
        project("report-worker", "python", "STOPPED", 0),
    ]
}

fn seed_databases() -> Vec<Database> {
    let database = |id: &str, kind: &str, status: &str, scale: i64, host: &str| Database {
        db_id: id.to_string(),
        kind: kind.to_string(),
        status: status.to_string(),
        scale,
        hostname: host.to_string(),
    };
    vec![
        database("orders-pg", "postgres", "RUNNING", 1, "orders-pg.internal"),
        database("cache", "redis", "STOPPED", 0, "cache.internal"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ServiceType;

    fn request(service: &str, cron: &str) -> CreateScheduleRequest {
        CreateScheduleRequest {
            service: service.to_string(),
            service_type: ServiceType::Project,
            action: "off".to_string(),
            cron: cron.to_string(),
        }
    }

    #[tokio::test]
    async fn login_accepts_only_dev_token() {
        let backend = DevBackend::new();
        assert!(backend.login(&Credential::new(DEV_TOKEN).unwrap()).await.is_ok());

        let err = backend
            .login(&Credential::new("wrong").unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.operator_message(), "Invalid Liara API Token or API error");
    }

    #[tokio::test]
    async fn created_schedules_get_increasing_ids_and_can_be_deleted() {
        let backend = DevBackend::empty();
        backend.create_schedule(&request("a", "0 22 * * *")).await.unwrap();
        backend.create_schedule(&request("b", "@daily")).await.unwrap();

        let ids: Vec<String> = backend.schedules().into_iter().map(|s| s.job_id).collect();
        assert_eq!(ids, vec!["1", "2"]);

        backend.delete_schedule("1").await.unwrap();
        assert_eq!(backend.schedules().len(), 1);
        assert_eq!(backend.request_count("DELETE /schedule/delete/1"), 1);
    }

    #[tokio::test]
    async fn invalid_cron_is_rejected_with_server_message() {
        let backend = DevBackend::empty();
        let err = backend
            .create_schedule(&request("a", "every night"))
            .await
            .unwrap_err();
        assert!(err
            .operator_message()
            .starts_with("Invalid cron expression"));
        assert!(backend.schedules().is_empty());
    }

    #[tokio::test]
    async fn deleting_unknown_job_is_not_found() {
        let err = DevBackend::empty().delete_schedule("42").await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Application {
                status: 404,
                message: "Schedule not found".to_string()
            }
        );
    }

    #[tokio::test]
    async fn injected_failures_and_offline_mode() {
        let backend = DevBackend::new();
        backend.fail_request("GET /projects", 500, "Failed to fetch projects: boom");
        let err = backend.list_projects().await.unwrap_err();
        assert_eq!(err.operator_message(), "Failed to fetch projects: boom");

        backend.set_offline(true);
        assert!(backend.list_databases().await.unwrap_err().is_transport());
    }

    #[tokio::test]
    async fn logs_fall_back_to_placeholder_text() {
        assert_eq!(DevBackend::empty().fetch_logs().await.unwrap(), NO_LOGS);
    }

    #[test]
    fn uptime_formatting() {
        assert_eq!(format_uptime(Duration::from_secs(5)), "5s");
        assert_eq!(format_uptime(Duration::from_secs(125)), "2m5s");
        assert_eq!(format_uptime(Duration::from_secs(3725)), "1h2m5s");
    }
}
