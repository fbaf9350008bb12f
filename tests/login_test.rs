mod common;

use common::MockLogin;
use ncmscrape::error::{ApiError, LoginError};
use ncmscrape::login::{LoginSession, LoginState, poll_timer};
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use ncmscrape::netease::{parse_qr_check, parse_qr_image, parse_qr_key};
use serde_json::json;

#[tokio::test]
async fn test_login_reaches_success() {
    let api = MockLogin::new(&[801, 802, 803]);
    let mut session = LoginSession::new();

    let mut states = Vec::new();
    for _ in 0..4 {
        states.push(session.step(&api).await.unwrap());
    }

    assert_eq!(
        states,
        vec![
            LoginState::Pending,
            LoginState::Pending,
            LoginState::Pending,
            LoginState::Success
        ]
    );
    assert_eq!(session.qr_key.as_deref(), Some("unikey-1"));
    assert!(session.qr_image.as_deref().unwrap().starts_with("data:image/png"));
    assert_eq!(session.check_code, Some(803));
    assert_eq!(session.check_cookie.as_deref(), Some("MUSIC_U=abc; Path=/"));
    assert_eq!(session.check_count, 4);
    assert!(session.is_terminal());
}

#[tokio::test]
async fn test_login_fails_on_unknown_code() {
    let api = MockLogin::new(&[801, 500]);
    let mut session = LoginSession::new();

    session.step(&api).await.unwrap();
    assert_eq!(session.step(&api).await.unwrap(), LoginState::Pending);
    assert_eq!(session.step(&api).await.unwrap(), LoginState::Failed);
    assert_eq!(session.check_code, Some(500));
    assert_eq!(session.check_cookie, None);
}

#[tokio::test]
async fn test_terminal_state_is_not_polled_again() {
    let api = MockLogin::new(&[803]);
    let mut session = LoginSession::new();

    session.step(&api).await.unwrap();
    session.step(&api).await.unwrap();
    assert_eq!(session.state, LoginState::Success);

    let count = session.check_count;
    assert_eq!(session.step(&api).await.unwrap(), LoginState::Success);
    assert_eq!(session.check_count, count);
    assert_eq!(api.checks(), 1);
}

#[tokio::test]
async fn test_restart_clears_session() {
    let api = MockLogin::new(&[800]);
    let mut session = LoginSession::new();
    session.step(&api).await.unwrap();
    session.step(&api).await.unwrap();
    assert_eq!(session.state, LoginState::Failed);

    session.restart();

    assert_eq!(session, LoginSession::new());
    assert_eq!(session.state, LoginState::Init);
    assert_eq!(session.qr_key, None);
    assert_eq!(session.check_count, 0);
}

#[tokio::test]
async fn test_qr_failure_keeps_init_state() {
    let mut api = MockLogin::new(&[]);
    api.fail_qr = true;
    let mut session = LoginSession::new();

    let result = session.step(&api).await;

    assert!(matches!(
        result,
        Err(LoginError::Api(ApiError::Remote { code: 502, .. }))
    ));
    assert_eq!(session.state, LoginState::Init);
    assert_eq!(session.check_count, 0);
}

#[tokio::test]
async fn test_pending_without_key_is_an_error() {
    let api = MockLogin::new(&[801]);
    let mut session = LoginSession {
        state: LoginState::Pending,
        ..LoginSession::new()
    };

    let result = session.step(&api).await;

    assert!(matches!(result, Err(LoginError::MissingKey)));
    assert_eq!(api.checks(), 0);
}

#[test]
fn test_check_code_mapping() {
    assert_eq!(LoginState::from_check_code(801), LoginState::Pending);
    assert_eq!(LoginState::from_check_code(802), LoginState::Pending);
    assert_eq!(LoginState::from_check_code(803), LoginState::Success);
    assert_eq!(LoginState::from_check_code(800), LoginState::Failed);
    assert_eq!(LoginState::from_check_code(200), LoginState::Failed);
    assert_eq!(LoginState::Pending.to_string(), "pending");
}

#[test]
fn test_parse_qr_key() {
    let key = parse_qr_key(&json!({ "code": 200, "data": { "code": 200, "unikey": "abc" } }));
    assert_eq!(key.unwrap(), "abc");

    let error = parse_qr_key(&json!({ "code": 502, "message": "busy" })).unwrap_err();
    match error {
        ApiError::Remote { code, message } => {
            assert_eq!(code, 502);
            assert_eq!(message, "busy");
        }
        other => panic!("unexpected error: {other}"),
    }

    let missing = parse_qr_key(&json!({ "code": 200 })).unwrap_err();
    assert!(matches!(missing, ApiError::MissingField("data")));
}

#[test]
fn test_parse_qr_image_default_message() {
    let image = parse_qr_image(&json!({
        "code": 200,
        "data": { "qrurl": "https://music.163.com/login?codekey=abc", "qrimg": "data:image/png;base64,AAAA" }
    }));
    assert_eq!(image.unwrap(), "data:image/png;base64,AAAA");

    let error = parse_qr_image(&json!({ "code": 400, "data": null })).unwrap_err();
    match error {
        ApiError::Remote { message, .. } => assert_eq!(message, "Failed to create QR image"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_parse_qr_check() {
    let check = parse_qr_check(&json!({ "code": 803, "cookie": "MUSIC_U=x;;__csrf=y" })).unwrap();
    assert_eq!(check.state, LoginState::Success);
    assert_eq!(check.cookie.as_deref(), Some("MUSIC_U=x;;__csrf=y"));

    let check = parse_qr_check(&json!({ "code": 801, "cookie": "" })).unwrap();
    assert_eq!(check.state, LoginState::Pending);
    assert_eq!(check.cookie, None);

    assert!(parse_qr_check(&json!({ "message": "no code" })).is_err());
}

#[tokio::test]
async fn test_poll_timer_delays_missed_ticks() {
    let timer = poll_timer();

    assert_eq!(timer.period(), Duration::from_secs(4));
    assert_eq!(timer.missed_tick_behavior(), MissedTickBehavior::Delay);
}

#[tokio::test(start_paused = true)]
async fn test_poll_timer_waits_full_period_after_slow_step() {
    let mut timer = poll_timer();
    let start = tokio::time::Instant::now();

    timer.tick().await;
    // a step that outlasts three periods
    tokio::time::sleep(Duration::from_secs(13)).await;
    timer.tick().await;
    timer.tick().await;

    assert_eq!(start.elapsed(), Duration::from_secs(17));
}
