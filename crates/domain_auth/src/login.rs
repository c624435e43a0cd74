//! Two-step phone login
//!
//! [`LoginFlow`] owns the form state of a login screen: which step is
//! showing, the raw inputs, the error message to display, and whether a
//! request is in flight. Every step change goes through
//! [`LoginState::on`], so a stray event cannot skip a step.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::AuthError;
use crate::ports::AuthGateway;
use crate::session::Session;
use crate::validation::{OtpCode, PhoneNumber};

/// Where an authenticated user goes when no destination was requested
pub const DEFAULT_DESTINATION: &str = "/dashboard";

/// Shown when send-otp fails without a server message
pub const SEND_OTP_FALLBACK: &str = "Failed to send OTP";

/// Shown when verify-otp fails without a server message
pub const VERIFY_OTP_FALLBACK: &str = "Invalid OTP";

/// Login step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginState {
    /// Waiting for a mobile number
    PhoneEntry,
    /// A code was sent to `phone`
    OtpEntry { phone: PhoneNumber },
    /// Verified; the caller should navigate to `destination`
    Authenticated { session: Session, destination: String },
}

/// Something that moves the login forward or back
#[derive(Debug, Clone)]
pub enum LoginEvent {
    OtpSent(PhoneNumber),
    Verified { session: Session, destination: String },
    ChangeNumber,
}

impl LoginState {
    pub fn name(&self) -> &'static str {
        match self {
            LoginState::PhoneEntry => "phone entry",
            LoginState::OtpEntry { .. } => "OTP entry",
            LoginState::Authenticated { .. } => "authenticated",
        }
    }

    /// Applies `event`, returning the next state
    ///
    /// # Errors
    ///
    /// `AuthError::InvalidTransition` for any pair not in the table:
    ///
    /// | From       | Event        | To            |
    /// |------------|--------------|---------------|
    /// | PhoneEntry | OtpSent      | OtpEntry      |
    /// | OtpEntry   | Verified     | Authenticated |
    /// | OtpEntry   | ChangeNumber | PhoneEntry    |
    pub fn on(&self, event: LoginEvent) -> Result<LoginState, AuthError> {
        match (self, event) {
            (LoginState::PhoneEntry, LoginEvent::OtpSent(phone)) => Ok(LoginState::OtpEntry { phone }),
            (LoginState::OtpEntry { .. }, LoginEvent::Verified { session, destination }) => {
                Ok(LoginState::Authenticated { session, destination })
            }
            (LoginState::OtpEntry { .. }, LoginEvent::ChangeNumber) => Ok(LoginState::PhoneEntry),
            (state, event) => Err(AuthError::InvalidTransition {
                state: state.name(),
                event: event.name(),
            }),
        }
    }
}

impl LoginEvent {
    pub fn name(&self) -> &'static str {
        match self {
            LoginEvent::OtpSent(_) => "send OTP",
            LoginEvent::Verified { .. } => "verify OTP",
            LoginEvent::ChangeNumber => "change number",
        }
    }
}

/// Read-only view of the in-flight flag, shareable with a UI task
#[derive(Debug, Clone, Default)]
pub struct BusyIndicator(Arc<AtomicBool>);

impl BusyIndicator {
    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn acquire(&self) -> Result<BusyGuard, AuthError> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| BusyGuard(self.0.clone()))
            .map_err(|_| AuthError::Busy)
    }
}

/// Clears the busy flag when dropped, including when the request future is
/// cancelled mid-flight
struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Client-side login controller
pub struct LoginFlow {
    gateway: Arc<dyn AuthGateway>,
    state: LoginState,
    phone_input: String,
    otp_input: String,
    error: Option<String>,
    busy: BusyIndicator,
    requested_destination: Option<String>,
}

impl LoginFlow {
    /// Starts at phone entry. `redirect` is where to go once verified.
    pub fn new(gateway: Arc<dyn AuthGateway>, redirect: Option<String>) -> Self {
        Self {
            gateway,
            state: LoginState::PhoneEntry,
            phone_input: String::new(),
            otp_input: String::new(),
            error: None,
            busy: BusyIndicator::default(),
            requested_destination: redirect.filter(|r| !r.is_empty()),
        }
    }

    pub fn state(&self) -> &LoginState {
        &self.state
    }

    /// Message to display, if the last action failed
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    pub fn busy_indicator(&self) -> BusyIndicator {
        self.busy.clone()
    }

    pub fn phone_input(&self) -> &str {
        &self.phone_input
    }

    pub fn otp_input(&self) -> &str {
        &self.otp_input
    }

    /// Session and navigation target once authenticated
    pub fn session(&self) -> Option<(&Session, &str)> {
        match &self.state {
            LoginState::Authenticated { session, destination } => Some((session, destination)),
            _ => None,
        }
    }

    /// Validates `input` and asks the gateway to send a code
    ///
    /// Invalid input never reaches the gateway. On success the flow moves
    /// to OTP entry; on failure it stays put and [`Self::error`] holds the
    /// server's message or [`SEND_OTP_FALLBACK`].
    pub async fn submit_phone(&mut self, input: &str) -> Result<(), AuthError> {
        self.ensure_state(matches!(self.state, LoginState::PhoneEntry), "send OTP")?;
        self.phone_input = input.to_string();

        let phone = match PhoneNumber::parse(input) {
            Ok(phone) => phone,
            Err(err) => {
                self.error = Some(err.to_string());
                return Err(err);
            }
        };

        let sent = {
            let _guard = self.busy.acquire()?;
            self.error = None;
            self.gateway.send_otp(&phone).await
        };

        match sent {
            Ok(()) => {
                info!(phone = %phone.masked(), "OTP requested");
                self.transition(LoginEvent::OtpSent(phone))
            }
            Err(err) => {
                warn!(error = %err, "OTP request failed");
                self.error = Some(err.server_message().unwrap_or(SEND_OTP_FALLBACK).to_string());
                Err(err.into())
            }
        }
    }

    /// Validates `input` and exchanges it for a session
    ///
    /// On success the flow is authenticated with the requested destination,
    /// or [`DEFAULT_DESTINATION`]. On failure it stays at OTP entry and
    /// [`Self::error`] holds the server's message or [`VERIFY_OTP_FALLBACK`].
    pub async fn submit_otp(&mut self, input: &str) -> Result<(), AuthError> {
        let phone = match &self.state {
            LoginState::OtpEntry { phone } => phone.clone(),
            state => {
                return Err(AuthError::InvalidTransition {
                    state: state.name(),
                    event: "verify OTP",
                })
            }
        };
        self.otp_input = input.to_string();

        let otp = match OtpCode::parse(input) {
            Ok(otp) => otp,
            Err(err) => {
                self.error = Some(err.to_string());
                return Err(err);
            }
        };

        let verified = {
            let _guard = self.busy.acquire()?;
            self.error = None;
            self.gateway.verify_otp(&phone, &otp).await
        };

        match verified {
            Ok(session) => {
                let destination = self
                    .requested_destination
                    .clone()
                    .unwrap_or_else(|| DEFAULT_DESTINATION.to_string());
                info!(user_id = %session.user.id, destination = %destination, "Login verified");
                self.transition(LoginEvent::Verified { session, destination })
            }
            Err(err) => {
                warn!(error = %err, "OTP verification failed");
                self.error = Some(err.server_message().unwrap_or(VERIFY_OTP_FALLBACK).to_string());
                Err(err.into())
            }
        }
    }

    /// Returns to phone entry, clearing the typed code and any error
    pub fn change_number(&mut self) -> Result<(), AuthError> {
        self.transition(LoginEvent::ChangeNumber)?;
        self.otp_input.clear();
        self.error = None;
        debug!("Returned to phone entry");
        Ok(())
    }

    fn ensure_state(&self, ok: bool, event: &'static str) -> Result<(), AuthError> {
        if ok {
            Ok(())
        } else {
            Err(AuthError::InvalidTransition {
                state: self.state.name(),
                event,
            })
        }
    }

    fn transition(&mut self, event: LoginEvent) -> Result<(), AuthError> {
        self.state = self.state.on(event)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::UserId;
    use crate::session::AuthUser;

    fn phone() -> PhoneNumber {
        PhoneNumber::parse("9876543210").unwrap()
    }

    fn session() -> Session {
        Session {
            token: "t".to_string(),
            user: AuthUser { id: UserId::new(), phone_number: "9876543210".to_string() },
        }
    }

    #[test]
    fn test_transition_table() {
        let otp_entry = LoginState::PhoneEntry.on(LoginEvent::OtpSent(phone())).unwrap();
        assert_eq!(otp_entry, LoginState::OtpEntry { phone: phone() });

        assert_eq!(otp_entry.on(LoginEvent::ChangeNumber).unwrap(), LoginState::PhoneEntry);

        let done = otp_entry
            .on(LoginEvent::Verified { session: session(), destination: "/x".to_string() })
            .unwrap();
        assert!(matches!(done, LoginState::Authenticated { .. }));
    }

    #[test]
    fn test_rejected_transitions() {
        assert!(LoginState::PhoneEntry.on(LoginEvent::ChangeNumber).is_err());
        assert!(LoginState::PhoneEntry
            .on(LoginEvent::Verified { session: session(), destination: "/".to_string() })
            .is_err());

        let otp_entry = LoginState::OtpEntry { phone: phone() };
        assert!(otp_entry.on(LoginEvent::OtpSent(phone())).is_err());

        let done = LoginState::Authenticated { session: session(), destination: "/".to_string() };
        let err = done.on(LoginEvent::ChangeNumber).unwrap_err();
        assert_eq!(err.to_string(), "Cannot change number while in authenticated");
    }

    #[test]
    fn test_busy_guard_releases_on_drop() {
        let indicator = BusyIndicator::default();
        {
            let _guard = indicator.acquire().unwrap();
            assert!(indicator.is_busy());
            assert!(matches!(indicator.acquire(), Err(AuthError::Busy)));
        }
        assert!(!indicator.is_busy());
    }
}
