use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::{
    ApiError, ControlPlane, CreateScheduleRequest, Credential, Database, LoginRequest, Project,
    Result, ScheduleList, Session, Uptime,
};

const NOT_LOGGED_IN: &str = "Not logged in.";

/// HTTP client for the control-plane endpoints.
///
/// Every call except `login` attaches `Authorization: Bearer <token>` from the
/// shared [`Session`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    session: Session,
}

impl ApiClient {
    pub fn new(base_url: &str, session: Session, timeout: Duration) -> Result<Self> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        // Endpoint paths are joined relative to the base, which keeps any path prefix.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", path, e)))
    }

    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        let credential = self.session.current().ok_or_else(|| ApiError::Unauthorized {
            message: NOT_LOGGED_IN.to_string(),
        })?;
        Ok(request.bearer_auth(credential.expose()))
    }

    async fn send(
        &self,
        request: RequestBuilder,
        call: &'static str,
        authenticated: bool,
    ) -> Result<Response> {
        debug!(call, "dispatching request");
        let response = request.send().await.map_err(|e| {
            warn!(call, error = %e, "no response from control plane");
            ApiError::Transport(e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = ApiError::from_response(status.as_u16(), &body);
        warn!(call, status = status.as_u16(), error = %err, "control plane returned error");

        if authenticated && matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            return Err(ApiError::Unauthorized {
                message: err.to_string(),
            });
        }
        Err(err)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, call: &'static str) -> Result<T> {
        let request = self.authorized(self.client.get(self.endpoint(path)?))?;
        let response = self.send(request, call, true).await?;
        response.json::<T>().await.map_err(|e| ApiError::Decode {
            call,
            reason: e.to_string(),
        })
    }

    async fn send_without_body(
        &self,
        request: RequestBuilder,
        call: &'static str,
        authenticated: bool,
    ) -> Result<()> {
        let response = self.send(request, call, authenticated).await?;
        if let Err(e) = response.bytes().await {
            debug!(call, error = %e, "failed to drain response body");
        }
        Ok(())
    }
}

#[async_trait]
impl ControlPlane for ApiClient {
    async fn login(&self, credential: &Credential) -> Result<()> {
        let request = self
            .client
            .post(self.endpoint("login")?)
            .json(&LoginRequest {
                token: credential.expose(),
            });
        self.send_without_body(request, "POST /login", false).await
    }

    async fn list_projects(&self) -> Result<Vec<Project>> {
        let projects: Option<Vec<Project>> = self.get_json("projects", "GET /projects").await?;
        Ok(projects.unwrap_or_default())
    }

    async fn list_databases(&self) -> Result<Vec<Database>> {
        let databases: Option<Vec<Database>> =
            self.get_json("databases", "GET /databases").await?;
        Ok(databases.unwrap_or_default())
    }

    async fn list_schedules(&self) -> Result<ScheduleList> {
        self.get_json("schedules", "GET /schedules").await
    }

    async fn create_schedule(&self, request: &CreateScheduleRequest) -> Result<()> {
        let builder = self.authorized(self.client.post(self.endpoint("schedule")?).json(request))?;
        self.send_without_body(builder, "POST /schedule", true).await
    }

    async fn delete_schedule(&self, job_id: &str) -> Result<()> {
        let path = format!("schedule/delete/{}", urlencoding::encode(job_id));
        let builder = self.authorized(self.client.delete(self.endpoint(&path)?))?;
        self.send_without_body(builder, "DELETE /schedule/delete/:id", true)
            .await
    }

    async fn fetch_logs(&self) -> Result<String> {
        let request = self.authorized(self.client.get(self.endpoint("logs")?))?;
        let response = self.send(request, "GET /logs", true).await?;
        response.text().await.map_err(|e| ApiError::Decode {
            call: "GET /logs",
            reason: e.to_string(),
        })
    }

    async fn fetch_uptime(&self) -> Result<Uptime> {
        self.get_json("uptime", "GET /uptime").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    fn client(session: Session) -> ApiClient {
        ApiClient::new("http://127.0.0.1:9", session, Duration::from_millis(500)).unwrap()
    }

    fn logged_in(base_url: &str) -> ApiClient {
        let session = Session::init(Credential::new("tok"));
        ApiClient::new(base_url, session, Duration::from_secs(5)).unwrap()
    }

    /// Answers a single request with a canned response and hands back the raw
    /// request text.
    async fn serve_once(
        status: &'static str,
        content_type: &'static str,
        body: &'static str,
    ) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = stream.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if let Some(end) = request.windows(4).position(|w| w == b"\r\n\r\n") {
                    let head = String::from_utf8_lossy(&request[..end]).to_lowercase();
                    let content_length = head
                        .lines()
                        .find_map(|line| line.strip_prefix("content-length:"))
                        .and_then(|value| value.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if request.len() >= end + 4 + content_length {
                        break;
                    }
                }
            }

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            let _ = stream.shutdown().await;
            String::from_utf8_lossy(&request).into_owned()
        });

        (format!("http://{addr}"), handle)
    }

    #[test]
    fn rejects_invalid_base_url() {
        let err = ApiClient::new("not a url", Session::default(), Duration::from_secs(1))
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }

    #[test]
    fn endpoint_joins_paths_onto_base() {
        let client = ApiClient::new(
            "http://localhost:8080/",
            Session::default(),
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(
            client.endpoint("schedule/delete/3").unwrap().as_str(),
            "http://localhost:8080/schedule/delete/3"
        );
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        for base in ["http://localhost:8080/panel", "http://localhost:8080/panel/"] {
            let client =
                ApiClient::new(base, Session::default(), Duration::from_secs(1)).unwrap();
            assert_eq!(
                client.endpoint("projects").unwrap().as_str(),
                "http://localhost:8080/panel/projects"
            );
        }
    }

    #[tokio::test]
    async fn authenticated_call_without_credential_never_hits_network() {
        let err = client(Session::default()).list_projects().await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Unauthorized {
                message: NOT_LOGGED_IN.to_string()
            }
        );
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_failure() {
        let session = Session::init(Credential::new("tok"));
        let err = client(session).list_projects().await.unwrap_err();
        assert!(err.is_transport(), "unexpected error: {err:?}");
    }

    #[tokio::test]
    async fn sends_bearer_token_under_base_path() {
        let (base, server) = serve_once(
            "200 OK",
            "application/json",
            r#"[{"project_id":"api","type":"node","status":"RUNNING","scale":1}]"#,
        )
        .await;

        let projects = logged_in(&format!("{base}/panel")).list_projects().await.unwrap();
        let request = server.await.unwrap().to_lowercase();

        assert_eq!(projects.len(), 1);
        assert!(request.starts_with("get /panel/projects "), "{request}");
        assert!(request.contains("authorization: bearer tok"), "{request}");
    }

    #[tokio::test]
    async fn null_list_body_is_empty() {
        let (base, server) = serve_once("200 OK", "application/json", "null").await;

        let databases = logged_in(&base).list_databases().await.unwrap();
        server.await.unwrap();

        assert!(databases.is_empty());
    }

    #[tokio::test]
    async fn json_error_body_becomes_application_error() {
        let (base, server) = serve_once(
            "500 Internal Server Error",
            "application/json",
            r#"{"error":"invalid cron spec"}"#,
        )
        .await;

        let request = CreateScheduleRequest {
            service: "api".to_string(),
            service_type: crate::ServiceType::Project,
            action: "on".to_string(),
            cron: "bogus".to_string(),
        };
        let err = logged_in(&base).create_schedule(&request).await.unwrap_err();
        server.await.unwrap();

        assert_eq!(
            err,
            ApiError::Application {
                status: 500,
                message: "invalid cron spec".to_string()
            }
        );
    }

    #[tokio::test]
    async fn plain_text_rejection_is_unauthorized_with_raw_message() {
        let (base, server) = serve_once(
            "401 Unauthorized",
            "text/plain; charset=utf-8",
            "Authorization header required\n",
        )
        .await;

        let err = logged_in(&base).list_schedules().await.unwrap_err();
        server.await.unwrap();

        assert_eq!(
            err,
            ApiError::Unauthorized {
                message: "Authorization header required".to_string()
            }
        );
    }

    #[tokio::test]
    async fn forbidden_is_unauthorized() {
        let (base, server) = serve_once(
            "403 Forbidden",
            "application/json",
            r#"{"error":"token revoked"}"#,
        )
        .await;

        let err = logged_in(&base).fetch_uptime().await.unwrap_err();
        server.await.unwrap();

        assert!(err.is_unauthorized(), "unexpected error: {err:?}");
        assert_eq!(err.operator_message(), "token revoked");
    }

    #[tokio::test]
    async fn rejected_login_stays_application_error() {
        let (base, server) = serve_once(
            "401 Unauthorized",
            "application/json",
            r#"{"error":"Invalid Liara API Token or API error"}"#,
        )
        .await;

        let client = ApiClient::new(&base, Session::default(), Duration::from_secs(5)).unwrap();
        let err = client.login(&Credential::new("wrong").unwrap()).await.unwrap_err();
        let request = server.await.unwrap().to_lowercase();

        assert_eq!(
            err,
            ApiError::Application {
                status: 401,
                message: "Invalid Liara API Token or API error".to_string()
            }
        );
        assert!(request.starts_with("post /login "), "{request}");
        assert!(!request.contains("authorization:"), "{request}");
    }

    #[tokio::test]
    async fn malformed_success_body_is_decode_error() {
        let (base, server) = serve_once("200 OK", "application/json", r#"{"uptime": 5"#).await;

        let err = logged_in(&base).fetch_uptime().await.unwrap_err();
        server.await.unwrap();

        assert!(
            matches!(err, ApiError::Decode { call: "GET /uptime", .. }),
            "unexpected error: {err:?}"
        );
    }

    #[tokio::test]
    async fn logs_are_returned_verbatim() {
        let (base, server) = serve_once(
            "200 OK",
            "text/plain; charset=utf-8",
            "2024/05/01 job 3 ran\n2024/05/01 job 4 failed\n",
        )
        .await;

        let logs = logged_in(&base).fetch_logs().await.unwrap();
        server.await.unwrap();

        assert_eq!(logs, "2024/05/01 job 3 ran\n2024/05/01 job 4 failed\n");
    }
}
