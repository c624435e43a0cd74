//! Claims Intake - Terminal Login
//!
//! Walks through phone number and OTP entry against the claims API and
//! prints where the user would be sent once logged in.
//!
//! ```bash
//! claims-login --api-url http://localhost:5000/api --redirect /claims/new
//! ```

use std::sync::Arc;

use clap::Parser;
use dialoguer::{theme::ColorfulTheme, Input};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domain_auth::{AuthError, HttpAuthGateway, LoginFlow, LoginState};

/// Typed at the OTP prompt to go back to phone entry
const CHANGE_NUMBER_COMMAND: &str = "change";

#[derive(Debug, Parser)]
#[command(name = "claims-login", about = "Log in to the claims intake service with a phone OTP")]
struct Args {
    /// API root of the claims service
    #[arg(long, env = "CLAIMS_API_URL", default_value = "http://localhost:5000/api")]
    api_url: String,

    /// Page to continue to after login
    #[arg(long)]
    redirect: Option<String>,
}

/// What the user typed at the OTP prompt
#[derive(Debug, PartialEq, Eq)]
enum OtpEntry {
    ChangeNumber,
    Code(String),
}

impl OtpEntry {
    fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.eq_ignore_ascii_case(CHANGE_NUMBER_COMMAND) {
            OtpEntry::ChangeNumber
        } else {
            OtpEntry::Code(input.to_string())
        }
    }
}

/// Failures the flow does not surface through `LoginFlow::error`
fn unreported(err: &AuthError) -> Option<&AuthError> {
    match err {
        AuthError::Validation(_) | AuthError::Gateway(_) => None,
        other => Some(other),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing();

    let gateway = Arc::new(HttpAuthGateway::new(args.api_url.clone()));
    let mut flow = LoginFlow::new(gateway, args.redirect);
    let theme = ColorfulTheme::default();

    loop {
        match flow.state().clone() {
            LoginState::PhoneEntry => {
                let phone: String = Input::with_theme(&theme)
                    .with_prompt("Mobile number")
                    .with_initial_text(flow.phone_input())
                    .allow_empty(true)
                    .interact_text()?;

                match flow.submit_phone(phone.trim()).await {
                    Ok(()) => println!("OTP sent to {}", phone.trim()),
                    Err(err) => {
                        if let Some(err) = unreported(&err) {
                            eprintln!("{}", err);
                        }
                    }
                }
            }
            LoginState::OtpEntry { phone } => {
                let input: String = Input::with_theme(&theme)
                    .with_prompt(format!("OTP sent to {} (type '{}' to go back)", phone, CHANGE_NUMBER_COMMAND))
                    .allow_empty(true)
                    .interact_text()?;

                match OtpEntry::parse(&input) {
                    OtpEntry::ChangeNumber => flow.change_number()?,
                    OtpEntry::Code(code) => {
                        if let Err(err) = flow.submit_otp(&code).await {
                            if let Some(err) = unreported(&err) {
                                eprintln!("{}", err);
                            }
                        }
                    }
                }
            }
            LoginState::Authenticated { session, destination } => {
                println!("Logged in as {} ({})", session.user.phone_number, session.user.id);
                println!("Continue to {}", destination);
                return Ok(());
            }
        }

        if let Some(message) = flow.error() {
            eprintln!("{}", message);
        }
    }
}

/// Logs go to stderr so they don't interleave with prompts
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}
