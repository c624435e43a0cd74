//! Phone Login Domain
//!
//! Covers both ends of OTP login:
//!
//! - **Client side**: [`login::LoginFlow`] drives the two-step login as an
//!   explicit state machine over the [`ports::AuthGateway`] port.
//! - **Server side**: [`otp::OtpIssuer`] issues and checks one-time codes and
//!   hands them to an [`ports::OtpSender`] for delivery.
//!
//! # Login States
//!
//! ```text
//! PhoneEntry --OtpSent--> OtpEntry --Verified--> Authenticated
//!     ^                      |
//!     +----ChangeNumber------+
//! ```

pub mod validation;
pub mod session;
pub mod ports;
pub mod login;
pub mod otp;
pub mod adapters;
pub mod error;

pub use validation::{PhoneNumber, OtpCode, PHONE_PATTERN, OTP_PATTERN};
pub use session::{AuthUser, Session};
pub use ports::{AuthGateway, OtpSender};
pub use login::{LoginFlow, LoginState, LoginEvent, BusyIndicator, DEFAULT_DESTINATION};
pub use otp::{OtpIssuer, MAX_VERIFY_ATTEMPTS};
pub use adapters::{HttpAuthGateway, LoggingOtpSender, OutboxOtpSender};
pub use error::{AuthError, GatewayError};
