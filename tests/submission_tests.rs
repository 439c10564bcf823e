mod common;

use std::io::Write;
use std::time::Duration;

use mockito::Matcher;
use onboarding_core::domain::record::OnboardingRecord;
use onboarding_core::flow::FlowPhase;
use onboarding_core::gateway::{RecordSubmitter, SubmissionError, SubmissionGateway};
use serde_json::json;

fn gateway_for(server: &mockito::ServerGuard) -> SubmissionGateway {
    SubmissionGateway::new(format!("{}/api", server.url()), Duration::from_secs(2))
        .expect("build gateway")
}

#[test]
fn accepted_submission_returns_the_receipt() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "accountType": "Personal Account",
            "fullName": "Jane Doe",
            "investment": "high",
            "bankName": "Kuda",
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"received"}"#)
        .create();

    let mut flow = common::ready_individual_flow();
    let gateway = gateway_for(&server);

    let receipt = flow.submit(&gateway).expect("submission succeeds");
    assert_eq!(receipt.status, 200);
    assert_eq!(receipt.body["message"], "received");
    assert_eq!(flow.phase(), FlowPhase::Submitted);
    mock.assert();
}

#[test]
fn rejected_submission_reports_the_status_and_keeps_the_record() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/api")
        .with_status(500)
        .with_body("{}")
        .create();

    let mut flow = common::ready_individual_flow();
    let gateway = gateway_for(&server);

    let err = flow.submit(&gateway).unwrap_err();
    assert_eq!(err, SubmissionError::Rejected { status: 500 });
    assert_eq!(flow.phase(), FlowPhase::ReadyToSubmit);
    assert_eq!(flow.record().full_name.as_deref(), Some("Jane Doe"));
}

#[test]
fn retry_after_rejection_can_succeed() {
    let mut server = mockito::Server::new();
    let failing = server
        .mock("POST", "/api")
        .with_status(503)
        .with_body("{}")
        .expect(1)
        .create();

    let mut flow = common::ready_individual_flow();
    let gateway = gateway_for(&server);

    assert_eq!(
        flow.submit(&gateway),
        Err(SubmissionError::Rejected { status: 503 })
    );
    failing.assert();

    let succeeding = server
        .mock("POST", "/api")
        .with_status(200)
        .with_body(r#"{"message":"received"}"#)
        .create();

    flow.submit(&gateway).expect("retry succeeds");
    assert_eq!(flow.phase(), FlowPhase::Submitted);
    succeeding.assert();
}

#[test]
fn slow_responses_time_out() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/api")
        .with_status(200)
        .with_chunked_body(|writer| {
            std::thread::sleep(Duration::from_millis(600));
            writer.write_all(br#"{"message":"late"}"#)
        })
        .create();

    let mut flow = common::ready_individual_flow();
    let gateway = SubmissionGateway::new(
        format!("{}/api", server.url()),
        Duration::from_millis(200),
    )
    .expect("build gateway");

    let err = flow.submit(&gateway).unwrap_err();
    assert_eq!(err, SubmissionError::TimedOut);
    assert_eq!(flow.phase(), FlowPhase::ReadyToSubmit);
}

#[test]
fn malformed_success_body_is_an_error() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/api")
        .with_status(200)
        .with_body("not json")
        .create();

    let mut flow = common::ready_individual_flow();
    let gateway = gateway_for(&server);

    let err = flow.submit(&gateway).unwrap_err();
    assert!(matches!(err, SubmissionError::Unexpected(_)));
    assert_eq!(flow.phase(), FlowPhase::ReadyToSubmit);
}

#[test]
fn unreachable_service_is_a_transport_error() {
    let gateway = SubmissionGateway::new("http://127.0.0.1:1/api", Duration::from_secs(1))
        .expect("build gateway");

    let err = gateway.submit(&OnboardingRecord::default()).unwrap_err();
    assert!(matches!(err, SubmissionError::Transport(_)));
}
