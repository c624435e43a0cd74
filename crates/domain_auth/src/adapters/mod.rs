//! Auth Adapters
//!
//! - [`HttpAuthGateway`]: talks to the claims backend's `/auth` routes
//! - [`LoggingOtpSender`]: writes issued codes to the log (development)
//! - [`OutboxOtpSender`]: keeps issued codes in memory for inspection

mod http;
mod sender;

pub use http::HttpAuthGateway;
pub use sender::{LoggingOtpSender, OutboxOtpSender};
