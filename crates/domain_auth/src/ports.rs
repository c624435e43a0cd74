//! Auth Domain Ports
//!
//! - [`AuthGateway`]: what the login flow needs from the auth server
//! - [`OtpSender`]: how the OTP issuer delivers codes

use async_trait::async_trait;

use core_kernel::{DomainPort, PortError};

use crate::error::GatewayError;
use crate::session::Session;
use crate::validation::{OtpCode, PhoneNumber};

/// Client-side view of the auth server
#[async_trait]
pub trait AuthGateway: DomainPort {
    /// Asks the server to send a code to `phone`
    async fn send_otp(&self, phone: &PhoneNumber) -> Result<(), GatewayError>;

    /// Exchanges a code for a session
    async fn verify_otp(&self, phone: &PhoneNumber, otp: &OtpCode) -> Result<Session, GatewayError>;
}

/// Delivery channel for issued codes
#[async_trait]
pub trait OtpSender: DomainPort {
    async fn send(&self, phone: &PhoneNumber, code: &OtpCode) -> Result<(), PortError>;
}
