use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

/// A deployed project as reported by `GET /projects`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Project {
    pub project_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    pub scale: i64,
}

/// A managed database as reported by `GET /databases`.
///
/// `DBId` is occasionally missing upstream; it then decodes as an empty string.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Database {
    #[serde(rename = "DBId", default)]
    pub db_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    pub scale: i64,
    #[serde(default)]
    pub hostname: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    Project,
    Database,
}

impl ServiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Project => "project",
            ServiceType::Database => "database",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cron-triggered action bound to one project or database.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Schedule {
    #[serde(rename = "JobID", deserialize_with = "job_id_as_string")]
    pub job_id: String,
    pub service_name: String,
    pub service_type: ServiceType,
    pub action: String,
    pub cron_spec: String,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub last_run: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub next_run: Option<OffsetDateTime>,
}

/// Response of `GET /schedules`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScheduleList {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub schedules: Vec<Schedule>,
    #[serde(rename = "currentTime", with = "time::serde::rfc3339")]
    pub current_time: OffsetDateTime,
}

/// Response of `GET /uptime`, a human readable duration such as `"3h12m5.2s"`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Uptime {
    pub uptime: String,
}

// An empty list may be encoded as `null`.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

// The scheduler hands out numeric entry ids; we never do arithmetic on them.
fn job_id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawJobId {
        Number(i64),
        Text(String),
    }

    Ok(match RawJobId::deserialize(deserializer)? {
        RawJobId::Number(n) => n.to_string(),
        RawJobId::Text(s) => s,
    })
}
