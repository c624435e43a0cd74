//! Server-side OTP issuance
//!
//! Codes are held in memory with an expiry and consumed on successful
//! verification or after too many wrong guesses. Verified phone numbers map to a stable user identity
//! created on first login.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use core_kernel::UserId;

use crate::error::AuthError;
use crate::ports::OtpSender;
use crate::session::AuthUser;
use crate::validation::{OtpCode, PhoneNumber};

/// Default lifetime of an issued code
pub const DEFAULT_OTP_TTL_SECS: i64 = 300;

/// Wrong guesses allowed before a pending code is discarded
pub const MAX_VERIFY_ATTEMPTS: u32 = 5;

#[derive(Debug, Clone)]
struct PendingOtp {
    code: OtpCode,
    expires_at: DateTime<Utc>,
    failed_attempts: u32,
}

/// Issues and checks one-time codes
pub struct OtpIssuer {
    sender: Arc<dyn OtpSender>,
    ttl: Duration,
    pending: RwLock<HashMap<PhoneNumber, PendingOtp>>,
    users: RwLock<HashMap<PhoneNumber, AuthUser>>,
}

impl OtpIssuer {
    pub fn new(sender: Arc<dyn OtpSender>, ttl: Duration) -> Self {
        Self {
            sender,
            ttl,
            pending: RwLock::new(HashMap::new()),
            users: RwLock::new(HashMap::new()),
        }
    }

    /// Issuer with the default five minute code lifetime
    pub fn with_default_ttl(sender: Arc<dyn OtpSender>) -> Self {
        Self::new(sender, Duration::seconds(DEFAULT_OTP_TTL_SECS))
    }

    /// Generates a fresh code for `phone`, replacing any pending one, and
    /// hands it to the sender. Expired codes for other numbers are pruned.
    ///
    /// # Errors
    ///
    /// `AuthError::Delivery` if the sender fails; no code is left pending
    pub async fn issue(&self, phone: &PhoneNumber) -> Result<(), AuthError> {
        let code = generate_code();

        self.sender.send(phone, &code).await.map_err(|e| {
            warn!(phone = %phone.masked(), error = %e, "OTP delivery failed");
            AuthError::Delivery(e.to_string())
        })?;

        let now = Utc::now();
        let expires_at = now + self.ttl;
        {
            let mut pending = self.pending.write().await;
            pending.retain(|_, entry| entry.expires_at > now);
            pending.insert(
                phone.clone(),
                PendingOtp {
                    code,
                    expires_at,
                    failed_attempts: 0,
                },
            );
        }

        info!(phone = %phone.masked(), expires_at = %expires_at, "OTP issued");
        Ok(())
    }

    /// Checks `code` against the pending code for `phone`
    ///
    /// A match consumes the code and returns the user for that number,
    /// creating one on first login. A wrong code leaves the pending code in
    /// place until [`MAX_VERIFY_ATTEMPTS`] wrong guesses; an expired one is
    /// discarded.
    ///
    /// # Errors
    ///
    /// `AuthError::InvalidOtp` if there is no pending code, it has expired,
    /// or it does not match
    pub async fn verify(&self, phone: &PhoneNumber, code: &OtpCode) -> Result<AuthUser, AuthError> {
        {
            let mut pending = self.pending.write().await;
            let entry = pending.get_mut(phone).ok_or(AuthError::InvalidOtp)?;

            if entry.expires_at <= Utc::now() {
                pending.remove(phone);
                warn!(phone = %phone.masked(), "Expired OTP presented");
                return Err(AuthError::InvalidOtp);
            }
            if entry.code != *code {
                entry.failed_attempts += 1;
                let attempts = entry.failed_attempts;
                if attempts >= MAX_VERIFY_ATTEMPTS {
                    pending.remove(phone);
                    warn!(phone = %phone.masked(), attempts, "Too many wrong OTPs, code discarded");
                } else {
                    warn!(phone = %phone.masked(), attempts, "Wrong OTP presented");
                }
                return Err(AuthError::InvalidOtp);
            }
            pending.remove(phone);
        }

        Ok(self.find_or_create_user(phone).await)
    }

    /// Number of codes currently awaiting verification
    pub async fn pending_count(&self) -> usize {
        self.pending.read().await.len()
    }

    async fn find_or_create_user(&self, phone: &PhoneNumber) -> AuthUser {
        let mut users = self.users.write().await;
        users
            .entry(phone.clone())
            .or_insert_with(|| {
                let user = AuthUser {
                    id: UserId::new_v7(),
                    phone_number: phone.as_str().to_string(),
                };
                info!(user_id = %user.id, "Created user on first login");
                user
            })
            .clone()
    }
}

fn generate_code() -> OtpCode {
    let bytes = Uuid::new_v4().into_bytes();
    let value = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    OtpCode::from_number(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::OutboxOtpSender;

    fn phone() -> PhoneNumber {
        PhoneNumber::parse("9876543210").unwrap()
    }

    #[test]
    fn test_generated_codes_are_six_digits() {
        for _ in 0..100 {
            assert!(OtpCode::parse(generate_code().as_str()).is_ok());
        }
    }

    #[tokio::test]
    async fn test_issue_then_verify_consumes_code() {
        let outbox = Arc::new(OutboxOtpSender::new());
        let issuer = OtpIssuer::with_default_ttl(outbox.clone());

        issuer.issue(&phone()).await.unwrap();
        let code = outbox.last_code(&phone()).await.unwrap();

        let user = issuer.verify(&phone(), &code).await.unwrap();
        assert_eq!(user.phone_number, "9876543210");
        assert_eq!(issuer.pending_count().await, 0);
        assert!(matches!(issuer.verify(&phone(), &code).await, Err(AuthError::InvalidOtp)));
    }

    #[tokio::test]
    async fn test_expired_code_rejected() {
        let outbox = Arc::new(OutboxOtpSender::new());
        let issuer = OtpIssuer::new(outbox.clone(), Duration::zero());

        issuer.issue(&phone()).await.unwrap();
        let code = outbox.last_code(&phone()).await.unwrap();

        assert!(matches!(issuer.verify(&phone(), &code).await, Err(AuthError::InvalidOtp)));
        assert_eq!(issuer.pending_count().await, 0);
    }

    #[tokio::test]
    async fn test_issue_prunes_expired_codes() {
        let outbox = Arc::new(OutboxOtpSender::new());
        let issuer = OtpIssuer::new(outbox, Duration::zero());
        let other = PhoneNumber::parse("7012345678").unwrap();

        issuer.issue(&phone()).await.unwrap();
        issuer.issue(&other).await.unwrap();

        // Zero TTL: the first code was already stale when the second was issued
        assert_eq!(issuer.pending_count().await, 1);
    }
}
