//! HTTP auth gateway
//!
//! Posts JSON to `{base_url}/auth/send-otp` and `{base_url}/auth/verify-otp`
//! and maps the `{success, error}` envelope onto [`GatewayError`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::DomainPort;

use crate::error::GatewayError;
use crate::ports::AuthGateway;
use crate::session::{AuthUser, Session};
use crate::validation::{OtpCode, PhoneNumber};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendOtpBody<'a> {
    phone_number: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifyOtpBody<'a> {
    phone_number: &'a str,
    otp: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct AuthEnvelope {
    #[serde(default)]
    success: bool,
    error: Option<String>,
    message: Option<String>,
    token: Option<String>,
    user: Option<AuthUser>,
}

/// [`AuthGateway`] over HTTP
#[derive(Debug, Clone)]
pub struct HttpAuthGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAuthGateway {
    /// `base_url` is the API root, e.g. `http://localhost:5000/api`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{}/auth/{}", self.base_url, action)
    }

    async fn post<B: Serialize + Sync>(&self, action: &str, body: &B) -> Result<AuthEnvelope, GatewayError> {
        let url = self.endpoint(action);
        debug!(url = %url, "POST");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        let envelope = match response.json::<AuthEnvelope>().await {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => AuthEnvelope::default(),
            Err(e) => return Err(GatewayError::Transport(format!("Malformed response: {}", e))),
        };

        if status.is_success() && envelope.success {
            Ok(envelope)
        } else {
            Err(GatewayError::Rejected {
                message: envelope.error.or(envelope.message),
            })
        }
    }
}

impl DomainPort for HttpAuthGateway {}

#[async_trait]
impl AuthGateway for HttpAuthGateway {
    async fn send_otp(&self, phone: &PhoneNumber) -> Result<(), GatewayError> {
        self.post("send-otp", &SendOtpBody { phone_number: phone.as_str() })
            .await
            .map(|_| ())
    }

    async fn verify_otp(&self, phone: &PhoneNumber, otp: &OtpCode) -> Result<Session, GatewayError> {
        let envelope = self
            .post(
                "verify-otp",
                &VerifyOtpBody {
                    phone_number: phone.as_str(),
                    otp: otp.as_str(),
                },
            )
            .await?;

        match (envelope.token, envelope.user) {
            (Some(token), Some(user)) => Ok(Session { token, user }),
            _ => Err(GatewayError::Transport(
                "Verification response is missing token or user".to_string(),
            )),
        }
    }
}
