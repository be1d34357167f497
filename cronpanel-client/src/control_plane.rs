use async_trait::async_trait;

use crate::{
    CreateScheduleRequest, Credential, Database, Project, Result, ScheduleList, Uptime,
};

/// The remote operations the dashboard performs.
///
/// Implemented by [`crate::ApiClient`] over HTTP and by [`crate::DevBackend`]
/// in memory.
#[async_trait]
pub trait ControlPlane: Send + Sync {
    /// `POST /login`. Unauthenticated; a rejection is an application error.
    async fn login(&self, credential: &Credential) -> Result<()>;

    async fn list_projects(&self) -> Result<Vec<Project>>;

    async fn list_databases(&self) -> Result<Vec<Database>>;

    async fn list_schedules(&self) -> Result<ScheduleList>;

    async fn create_schedule(&self, request: &CreateScheduleRequest) -> Result<()>;

    async fn delete_schedule(&self, job_id: &str) -> Result<()>;

    /// Raw log text, returned verbatim.
    async fn fetch_logs(&self) -> Result<String>;

    async fn fetch_uptime(&self) -> Result<Uptime>;
}
