use serde::{Deserialize, Serialize};

use crate::ServiceType;

#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub token: &'a str,
}

/// Body of `POST /schedule`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScheduleRequest {
    pub service: String,
    pub service_type: ServiceType,
    pub action: String,
    pub cron: String,
}

#[derive(Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_schedule_uses_literal_discriminator() {
        let body = CreateScheduleRequest {
            service: "db-1".to_string(),
            service_type: ServiceType::Database,
            action: "on".to_string(),
            cron: "*/5 * * * *".to_string(),
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "service": "db-1",
                "serviceType": "database",
                "action": "on",
                "cron": "*/5 * * * *"
            })
        );
    }
}
