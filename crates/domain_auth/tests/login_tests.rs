//! Login flow tests against a scripted gateway

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use proptest::prelude::*;

use core_kernel::{DomainPort, UserId};
use domain_auth::login::{SEND_OTP_FALLBACK, VERIFY_OTP_FALLBACK};
use domain_auth::validation::{INVALID_OTP_MESSAGE, INVALID_PHONE_MESSAGE};
use domain_auth::{
    AuthError, AuthGateway, AuthUser, BusyIndicator, GatewayError, LoginFlow, LoginState,
    OtpCode, PhoneNumber, Session, DEFAULT_DESTINATION,
};
use test_utils::{
    invalid_leading_digit_phone_strategy, invalid_otp_strategy, wrong_length_phone_strategy,
    LoginFixtures,
};

/// Gateway that replays queued answers and counts calls
#[derive(Default)]
struct ScriptedGateway {
    send_results: Mutex<VecDeque<Result<(), GatewayError>>>,
    verify_results: Mutex<VecDeque<Result<Session, GatewayError>>>,
    send_calls: AtomicUsize,
    verify_calls: AtomicUsize,
    observed_busy: Mutex<Vec<bool>>,
    indicator: Mutex<Option<BusyIndicator>>,
}

impl ScriptedGateway {
    fn push_send(&self, result: Result<(), GatewayError>) {
        self.send_results.lock().unwrap().push_back(result);
    }

    fn push_verify(&self, result: Result<Session, GatewayError>) {
        self.verify_results.lock().unwrap().push_back(result);
    }

    fn watch(&self, indicator: BusyIndicator) {
        *self.indicator.lock().unwrap() = Some(indicator);
    }

    fn record_busy(&self) {
        if let Some(indicator) = self.indicator.lock().unwrap().as_ref() {
            self.observed_busy.lock().unwrap().push(indicator.is_busy());
        }
    }

    fn send_calls(&self) -> usize {
        self.send_calls.load(Ordering::SeqCst)
    }

    fn verify_calls(&self) -> usize {
        self.verify_calls.load(Ordering::SeqCst)
    }
}

impl DomainPort for ScriptedGateway {}

#[async_trait]
impl AuthGateway for ScriptedGateway {
    async fn send_otp(&self, _phone: &PhoneNumber) -> Result<(), GatewayError> {
        self.send_calls.fetch_add(1, Ordering::SeqCst);
        self.record_busy();
        self.send_results.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }

    async fn verify_otp(&self, phone: &PhoneNumber, _otp: &OtpCode) -> Result<Session, GatewayError> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        self.record_busy();
        self.verify_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(session_for(phone.as_str())))
    }
}

/// Gateway whose requests never complete
struct StalledGateway;

impl DomainPort for StalledGateway {}

#[async_trait]
impl AuthGateway for StalledGateway {
    async fn send_otp(&self, _phone: &PhoneNumber) -> Result<(), GatewayError> {
        std::future::pending().await
    }

    async fn verify_otp(&self, _phone: &PhoneNumber, _otp: &OtpCode) -> Result<Session, GatewayError> {
        std::future::pending().await
    }
}

fn session_for(phone: &str) -> Session {
    Session {
        token: "signed.jwt.token".to_string(),
        user: AuthUser {
            id: UserId::new(),
            phone_number: phone.to_string(),
        },
    }
}

fn flow(redirect: Option<&str>) -> (LoginFlow, Arc<ScriptedGateway>) {
    let gateway = Arc::new(ScriptedGateway::default());
    let flow = LoginFlow::new(gateway.clone(), redirect.map(str::to_string));
    gateway.watch(flow.busy_indicator());
    (flow, gateway)
}

async fn at_otp_entry(redirect: Option<&str>) -> (LoginFlow, Arc<ScriptedGateway>) {
    let (mut flow, gateway) = flow(redirect);
    flow.submit_phone(LoginFixtures::valid_phone()).await.unwrap();
    (flow, gateway)
}

// ============================================================================
// Phone Step
// ============================================================================

mod phone_step_tests {
    use super::*;

    #[tokio::test]
    async fn test_valid_phone_moves_to_otp_entry() {
        let (flow, gateway) = at_otp_entry(None).await;

        assert_eq!(gateway.send_calls(), 1);
        assert!(matches!(
            flow.state(),
            LoginState::OtpEntry { phone } if phone.as_str() == LoginFixtures::valid_phone()
        ));
        assert!(flow.error().is_none());
    }

    #[tokio::test]
    async fn test_invalid_phones_never_reach_gateway() {
        let (mut flow, gateway) = flow(None);

        for input in [
            LoginFixtures::invalid_leading_digit_phone(),
            LoginFixtures::short_phone(),
            "",
        ] {
            let err = flow.submit_phone(input).await.unwrap_err();
            assert!(matches!(err, AuthError::Validation(_)));
            assert_eq!(flow.error(), Some(INVALID_PHONE_MESSAGE));
        }

        assert_eq!(gateway.send_calls(), 0);
        assert_eq!(flow.state(), &LoginState::PhoneEntry);
    }

    #[tokio::test]
    async fn test_server_message_is_surfaced() {
        let (mut flow, gateway) = flow(None);
        gateway.push_send(Err(GatewayError::Rejected {
            message: Some("Too many requests".to_string()),
        }));

        assert!(flow.submit_phone(LoginFixtures::valid_phone()).await.is_err());

        assert_eq!(flow.error(), Some("Too many requests"));
        assert_eq!(flow.state(), &LoginState::PhoneEntry);
    }

    #[tokio::test]
    async fn test_transport_failure_uses_fallback_message() {
        let (mut flow, gateway) = flow(None);
        gateway.push_send(Err(GatewayError::Transport("connection refused".to_string())));

        assert!(flow.submit_phone(LoginFixtures::valid_phone()).await.is_err());

        assert_eq!(flow.error(), Some(SEND_OTP_FALLBACK));
        assert!(!flow.is_busy());
    }

    #[tokio::test]
    async fn test_busy_only_while_request_in_flight() {
        let (mut flow, gateway) = flow(None);
        assert!(!flow.is_busy());

        flow.submit_phone(LoginFixtures::valid_phone()).await.unwrap();

        assert_eq!(*gateway.observed_busy.lock().unwrap(), vec![true]);
        assert!(!flow.is_busy());
    }

    #[tokio::test]
    async fn test_cancelled_request_clears_busy() {
        let mut flow = LoginFlow::new(Arc::new(StalledGateway), None);

        let timed_out = tokio::time::timeout(
            Duration::from_millis(20),
            flow.submit_phone(LoginFixtures::valid_phone()),
        )
        .await;

        assert!(timed_out.is_err());
        assert!(!flow.is_busy());
        assert_eq!(flow.state(), &LoginState::PhoneEntry);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_malformed_phones_rejected_locally(
            input in prop_oneof![invalid_leading_digit_phone_strategy(), wrong_length_phone_strategy()],
        ) {
            let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let (mut flow, gateway) = flow(None);

            let result = runtime.block_on(flow.submit_phone(&input));

            prop_assert!(result.is_err());
            prop_assert_eq!(gateway.send_calls(), 0);
        }
    }
}

// ============================================================================
// OTP Step
// ============================================================================

mod otp_step_tests {
    use super::*;

    #[tokio::test]
    async fn test_verified_navigates_to_default_destination() {
        let (mut flow, gateway) = at_otp_entry(None).await;

        flow.submit_otp(LoginFixtures::valid_otp()).await.unwrap();

        assert_eq!(gateway.verify_calls(), 1);
        let (session, destination) = flow.session().unwrap();
        assert_eq!(destination, DEFAULT_DESTINATION);
        assert_eq!(session.user.phone_number, LoginFixtures::valid_phone());
    }

    #[tokio::test]
    async fn test_verified_navigates_to_requested_redirect() {
        let (mut flow, _gateway) = at_otp_entry(Some("/claims/new")).await;

        flow.submit_otp(LoginFixtures::valid_otp()).await.unwrap();

        assert_eq!(flow.session().map(|(_, d)| d), Some("/claims/new"));
    }

    #[tokio::test]
    async fn test_short_otp_never_reaches_gateway() {
        let (mut flow, gateway) = at_otp_entry(None).await;

        assert!(flow.submit_otp(LoginFixtures::short_otp()).await.is_err());

        assert_eq!(gateway.verify_calls(), 0);
        assert_eq!(flow.error(), Some(INVALID_OTP_MESSAGE));
        assert!(matches!(flow.state(), LoginState::OtpEntry { .. }));
    }

    #[tokio::test]
    async fn test_rejected_otp_stays_on_entry() {
        let (mut flow, gateway) = at_otp_entry(None).await;
        gateway.push_verify(Err(GatewayError::Rejected {
            message: Some("Invalid or expired OTP".to_string()),
        }));
        gateway.push_verify(Err(GatewayError::Rejected { message: None }));

        assert!(flow.submit_otp(LoginFixtures::valid_otp()).await.is_err());
        assert_eq!(flow.error(), Some("Invalid or expired OTP"));

        assert!(flow.submit_otp(LoginFixtures::valid_otp()).await.is_err());
        assert_eq!(flow.error(), Some(VERIFY_OTP_FALLBACK));

        assert!(matches!(flow.state(), LoginState::OtpEntry { .. }));
        assert!(flow.session().is_none());
    }

    #[tokio::test]
    async fn test_otp_before_phone_is_invalid_transition() {
        let (mut flow, gateway) = flow(None);

        let err = flow.submit_otp(LoginFixtures::valid_otp()).await.unwrap_err();

        assert!(matches!(err, AuthError::InvalidTransition { .. }));
        assert_eq!(gateway.verify_calls(), 0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_malformed_otps_rejected_locally(input in invalid_otp_strategy()) {
            let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let (mut flow, gateway) = runtime.block_on(at_otp_entry(None));

            let result = runtime.block_on(flow.submit_otp(&input));

            prop_assert!(result.is_err());
            prop_assert_eq!(gateway.verify_calls(), 0);
        }
    }
}

// ============================================================================
// Change Number
// ============================================================================

mod change_number_tests {
    use super::*;

    #[tokio::test]
    async fn test_change_number_returns_to_phone_entry() {
        let (mut flow, gateway) = at_otp_entry(None).await;
        gateway.push_verify(Err(GatewayError::Rejected { message: None }));
        let _ = flow.submit_otp(LoginFixtures::valid_otp()).await;
        assert!(flow.error().is_some());

        flow.change_number().unwrap();

        assert_eq!(flow.state(), &LoginState::PhoneEntry);
        assert!(flow.error().is_none());
        assert!(flow.otp_input().is_empty());
        assert_eq!(flow.phone_input(), LoginFixtures::valid_phone());
    }

    #[tokio::test]
    async fn test_change_number_from_phone_entry_rejected() {
        let (mut flow, _gateway) = flow(None);

        assert!(matches!(
            flow.change_number(),
            Err(AuthError::InvalidTransition { .. })
        ));
    }

    #[tokio::test]
    async fn test_new_number_after_change() {
        let (mut flow, gateway) = at_otp_entry(None).await;
        flow.change_number().unwrap();

        flow.submit_phone("6123456789").await.unwrap();

        assert_eq!(gateway.send_calls(), 2);
        assert!(matches!(
            flow.state(),
            LoginState::OtpEntry { phone } if phone.as_str() == "6123456789"
        ));
    }
}
