//! OTP delivery adapters

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use core_kernel::{DomainPort, PortError};

use crate::ports::OtpSender;
use crate::validation::{OtpCode, PhoneNumber};

/// Writes the code to the log instead of sending an SMS
#[derive(Debug, Clone, Default)]
pub struct LoggingOtpSender;

impl DomainPort for LoggingOtpSender {}

#[async_trait]
impl OtpSender for LoggingOtpSender {
    async fn send(&self, phone: &PhoneNumber, code: &OtpCode) -> Result<(), PortError> {
        info!(phone = %phone.masked(), otp = %code.as_str(), "OTP delivery (log only)");
        Ok(())
    }
}

/// Keeps the latest code per phone number
#[derive(Debug, Default)]
pub struct OutboxOtpSender {
    sent: RwLock<HashMap<PhoneNumber, OtpCode>>,
}

impl OutboxOtpSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn last_code(&self, phone: &PhoneNumber) -> Option<OtpCode> {
        self.sent.read().await.get(phone).cloned()
    }
}

impl DomainPort for OutboxOtpSender {}

#[async_trait]
impl OtpSender for OutboxOtpSender {
    async fn send(&self, phone: &PhoneNumber, code: &OtpCode) -> Result<(), PortError> {
        self.sent.write().await.insert(phone.clone(), code.clone());
        Ok(())
    }
}
