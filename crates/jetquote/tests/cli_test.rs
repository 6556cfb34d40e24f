//! Integration tests for the `jetquote` CLI binary.
//!
//! These drive the booking flow end to end through the binary: staging,
//! the details gate, cancellation, and submission against a mock API.
#![allow(clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use chrono::{Days, Local};
use predicates::prelude::*;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Isolated home, config and state directories for one test.
struct Sandbox {
    home: tempfile::TempDir,
    state: tempfile::TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            home: tempfile::tempdir().unwrap(),
            state: tempfile::tempdir().unwrap(),
        }
    }

    /// Build a [`Command`] for the `jetquote` binary with env isolation.
    ///
    /// Clears all `JETQUOTE_*` env vars and points config directories at
    /// the sandbox so tests never touch the user's real configuration.
    fn cmd(&self) -> assert_cmd::Command {
        let mut cmd = cargo_bin_cmd!("jetquote");
        cmd.env("HOME", self.home.path())
            .env("XDG_CONFIG_HOME", self.home.path().join("config"))
            .env("XDG_STATE_HOME", self.home.path().join("state"))
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .env_remove("JETQUOTE_PROFILE")
            .env_remove("JETQUOTE_API_URL")
            .env_remove("JETQUOTE_STATE_DIR")
            .env_remove("JETQUOTE_OUTPUT")
            .env_remove("JETQUOTE_TIMEOUT")
            .env_remove("JETQUOTE_PASSWORD")
            .env_remove("JETQUOTE_BOOKING__INTENT_TTL_SECS")
            .arg("--no-input")
            .arg("--state-dir")
            .arg(self.state.path());
        cmd
    }

    fn intent_file(&self) -> PathBuf {
        self.state.path().join("booking-intent.json")
    }

    fn stage_one_way(&self, from: &str, to: &str) {
        self.cmd()
            .args(["book", "one-way", "--from", from, "--to", to, "--date"])
            .arg(in_days(30))
            .args(["--adults", "2"])
            .assert()
            .success();
        assert!(self.intent_file().exists());
    }
}

fn in_days(days: u64) -> String {
    (Local::now().date_naive() + Days::new(days))
        .format("%Y-%m-%d")
        .to_string()
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn read_json(file: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(file).unwrap()).unwrap()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = cargo_bin_cmd!("jetquote").output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    cargo_bin_cmd!("jetquote")
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("charter")
                .and(predicate::str::contains("book"))
                .and(predicate::str::contains("details"))
                .and(predicate::str::contains("submit")),
        );
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("jetquote")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("jetquote"));
}

#[test]
fn test_completions_zsh() {
    cargo_bin_cmd!("jetquote")
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_invalid_output_format() {
    let sandbox = Sandbox::new();
    let output = sandbox
        .cmd()
        .args(["--output", "xml", "details"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("possible values"));
}

// ── Airports ────────────────────────────────────────────────────────

#[test]
fn test_airport_search_plain() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["-o", "plain", "airports", "search", "nice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(NCE)"));
}

#[test]
fn test_airport_search_short_query_is_empty() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["-o", "json", "airports", "search", "n"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"));
}

#[test]
fn test_airport_show_unknown_is_not_found() {
    let sandbox = Sandbox::new();
    let output = sandbox
        .cmd()
        .args(["airports", "show", "QQQQ"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
}

// ── Booking forms ───────────────────────────────────────────────────

#[test]
fn test_book_one_way_stages_resolved_intent() {
    let sandbox = Sandbox::new();
    sandbox.stage_one_way("LBG", "TEB");

    let staged = read_json(&sandbox.intent_file());
    assert_eq!(staged["type"], "oneWay");
    assert_eq!(staged["data"]["from"]["id"], 4185);
    assert_eq!(staged["data"]["to"]["id"], 3798);
    assert_eq!(staged["data"]["passengers"]["adults"], 2);
    assert!(staged["token"].is_string());
    assert!(staged["timestamp"].is_string());
}

#[test]
fn test_book_unresolved_airport_is_rejected() {
    let sandbox = Sandbox::new();
    let output = sandbox
        .cmd()
        .args(["book", "one-way", "--from", "qqqqzz", "--to", "TEB", "--date"])
        .arg(in_days(10))
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("required"), "Expected required-fields message:\n{text}");
    assert!(!sandbox.intent_file().exists());
}

#[test]
fn test_book_same_airport_is_rejected() {
    let sandbox = Sandbox::new();
    let output = sandbox
        .cmd()
        .args(["book", "one-way", "--from", "NCE", "--to", "LFMN", "--date"])
        .arg(in_days(10))
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("different"));
}

#[test]
fn test_book_round_trip_return_before_outbound() {
    let sandbox = Sandbox::new();
    let output = sandbox
        .cmd()
        .args(["book", "round-trip", "--from", "GVA", "--to", "NCE", "--date"])
        .arg(in_days(10))
        .arg("--return-date")
        .arg(in_days(5))
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("Return date"));
}

#[test]
fn test_book_multi_leg_needs_two_legs() {
    let sandbox = Sandbox::new();
    let leg = format!("LBG,NCE,{}", in_days(10));
    let output = sandbox
        .cmd()
        .args(["book", "multi-leg", "--leg", &leg])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("two legs"));
}

#[test]
fn test_book_multi_leg_stages_in_order() {
    let sandbox = Sandbox::new();
    let first = format!("LBG,NCE,{},09:30", in_days(10));
    let second = format!("NCE,GVA,{}", in_days(12));
    sandbox
        .cmd()
        .args(["book", "multi-leg", "--leg", &first, "--leg", &second])
        .assert()
        .success();

    let staged = read_json(&sandbox.intent_file());
    assert_eq!(staged["type"], "multiLeg");
    let legs = staged["data"]["legs"].as_array().unwrap();
    assert_eq!(legs.len(), 2);
    assert_eq!(legs[1]["from"]["id"], 1401);
    assert_eq!(legs[1]["to"]["id"], 2210);
}

#[test]
fn test_book_multi_leg_empty_from_chains_previous_arrival() {
    let sandbox = Sandbox::new();
    let first = format!("LBG,NCE,{}", in_days(10));
    let second = format!(",GVA,{}", in_days(11));
    sandbox
        .cmd()
        .args(["book", "multi-leg", "--leg", &first, "--leg", &second])
        .assert()
        .success();

    let staged = read_json(&sandbox.intent_file());
    let legs = staged["data"]["legs"].as_array().unwrap();
    assert_eq!(legs[1]["from"]["id"], legs[0]["to"]["id"]);
    assert_eq!(legs[1]["from"]["id"], 1401);
    assert_eq!(legs[1]["to"]["id"], 2210);
}

// ── Details gate ────────────────────────────────────────────────────

#[test]
fn test_details_shows_codes() {
    let sandbox = Sandbox::new();
    sandbox.stage_one_way("LBG", "TEB");
    sandbox
        .cmd()
        .arg("details")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("LBG")
                .and(predicate::str::contains("TEB"))
                .and(predicate::str::contains("One-way")),
        );
    // reviewing does not consume the booking
    assert!(sandbox.intent_file().exists());
}

#[test]
fn test_details_without_booking_redirects() {
    let sandbox = Sandbox::new();
    let output = sandbox.cmd().arg("details").output().unwrap();
    assert_eq!(output.status.code(), Some(9));
    assert!(combined_output(&output).contains("missing"));
}

#[test]
fn test_details_malformed_booking_is_cleared() {
    let sandbox = Sandbox::new();
    std::fs::write(sandbox.intent_file(), "{ not json").unwrap();
    let output = sandbox.cmd().arg("details").output().unwrap();
    assert_eq!(output.status.code(), Some(9));
    assert!(!sandbox.intent_file().exists());
}

#[test]
fn test_details_expired_booking_is_cleared() {
    let sandbox = Sandbox::new();
    sandbox.stage_one_way("GVA", "NCE");
    std::thread::sleep(std::time::Duration::from_millis(2100));

    let output = sandbox
        .cmd()
        .env("JETQUOTE_BOOKING__INTENT_TTL_SECS", "1")
        .arg("details")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(9));
    assert!(combined_output(&output).contains("expired"));
    assert!(!sandbox.intent_file().exists());
}

#[test]
fn test_cancel_drops_booking() {
    let sandbox = Sandbox::new();
    sandbox.stage_one_way("LBG", "TEB");
    sandbox.cmd().args(["--yes", "cancel"]).assert().success();
    assert!(!sandbox.intent_file().exists());
}

// ── Submission ──────────────────────────────────────────────────────

const CONTACT: [&str; 9] = [
    "submit",
    "--first-name",
    "Ada",
    "--last-name",
    "Lovelace",
    "--email",
    "ada@example.com",
    "--phone",
    "+44 20 7946 0958",
];

#[test]
fn test_submit_without_api_is_reported() {
    let sandbox = Sandbox::new();
    sandbox.stage_one_way("LBG", "TEB");
    let output = sandbox.cmd().args(CONTACT).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(combined_output(&output).contains("No booking API configured"));
    assert!(sandbox.intent_file().exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_submit_success_clears_booking() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/quotation-requests"))
        .and(body_partial_json(serde_json::json!({
            "trip_type": "one_way",
            "legs": [{ "departure_airport_id": 4185, "arrival_airport_id": 3798 }],
            "customer": { "first_name": "Ada", "email": "ada@example.com" }
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(serde_json::json!({ "reference": "JQ-7" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/emails/confirmation"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let sandbox = Sandbox::new();
    sandbox.stage_one_way("LBG", "TEB");
    sandbox
        .cmd()
        .args(["--api-url", &format!("{}/v1/", server.uri())])
        .args(["-o", "plain"])
        .args(CONTACT)
        .arg("--no-wait")
        .assert()
        .success()
        .stdout(predicate::str::contains("JQ-7"));
    assert!(!sandbox.intent_file().exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_submit_server_error_keeps_booking() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/quotation-requests"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(serde_json::json!({ "message": "Operator unavailable" })),
        )
        .mount(&server)
        .await;

    let sandbox = Sandbox::new();
    sandbox.stage_one_way("LBG", "TEB");
    let output = sandbox
        .cmd()
        .args(["--api-url", &format!("{}/v1/", server.uri())])
        .args(CONTACT)
        .arg("--no-wait")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(combined_output(&output).contains("Operator unavailable"));
    assert!(sandbox.intent_file().exists());
}

#[test]
fn test_submit_invalid_contact_sends_nothing() {
    let sandbox = Sandbox::new();
    sandbox.stage_one_way("LBG", "TEB");
    let output = sandbox
        .cmd()
        .args(["--api-url", "http://127.0.0.1:9/v1/"])
        .args([
            "submit",
            "--first-name",
            "Ada",
            "--last-name",
            "Lovelace",
            "--email",
            "not-an-email",
            "--phone",
            "+44 20 7946 0958",
            "--no-wait",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("valid email"));
    assert!(sandbox.intent_file().exists());
}

#[test]
fn test_submit_missing_field_without_prompting() {
    let sandbox = Sandbox::new();
    sandbox.stage_one_way("LBG", "TEB");
    let output = sandbox
        .cmd()
        .args(["--api-url", "http://127.0.0.1:9/v1/"])
        .args(["submit", "--first-name", "Ada"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("last name"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_show_no_config() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("intent_ttl_secs = 3600"));
}

#[test]
fn test_config_set_default_unknown_profile() {
    let sandbox = Sandbox::new();
    let output = sandbox
        .cmd()
        .args(["config", "set-default", "prod"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(combined_output(&output).contains("prod"));
}
