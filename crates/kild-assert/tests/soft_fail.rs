//! End-to-end behaviour of soft failures inside real `#[test]` functions.

use kild_assert::{Check, Recorder, TestContext, assert, init_test_logging};
use serde::Serialize;

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
struct Session {
    id: String,
    branch: String,
    ports: Vec<u16>,
}

fn session(id: &str, ports: &[u16]) -> Session {
    Session {
        id: id.to_string(),
        branch: format!("kild/{id}"),
        ports: ports.to_vec(),
    }
}

#[test]
fn passing_test_finishes_cleanly() {
    init_test_logging();
    let t = TestContext::new("passing_test_finishes_cleanly");

    let sessions = vec![session("a", &[3000]), session("b", &[3001, 3002])];
    assert::equal(&t, &session("a", &[3000]), &sessions[0]);
    assert::contains(&t, &sessions, &session("b", &[3001, 3002]));
    assert::not_contains(&t, &sessions, &session("c", &[]));
    assert::contains(&t, &sessions[1].branch, "kild/");
    assert::zero(&t, &Session::default());
    assert::not_zero(&t, &sessions[0]);

    t.finish().unwrap();
}

#[test]
fn failures_do_not_stop_the_test() {
    let t = TestContext::new("failures_do_not_stop_the_test");
    let mut reached = 0;

    assert::equal(&t, &1, &2);
    reached += 1;
    assert::error(&t, &Ok::<(), String>(()));
    reached += 1;
    assert::contains(&t, &5, &5);
    reached += 1;

    assert_eq!(reached, 3);
    let failed = t.finish().unwrap_err();
    let checks: Vec<Check> = failed.failures.iter().map(|f| f.check).collect();
    assert_eq!(checks, vec![Check::Equal, Check::Error, Check::Contains]);
}

#[test]
fn failures_point_at_this_file() {
    let t = Recorder::new();
    assert::not_equal(&t, &"x", &"x");

    let failure = &t.failures()[0];
    assert!(failure.location.file().ends_with("soft_fail.rs"));
    assert!(failure.to_string().contains("soft_fail.rs:"));
}

#[test]
fn boolean_result_guards_follow_up_checks() {
    let t = Recorder::new();
    let parsed: Result<Vec<u16>, String> = Err("bad port".to_string());

    if assert::no_error(&t, &parsed) {
        assert::equal(&t, &vec![3000u16], parsed.as_ref().unwrap());
    }

    assert_eq!(t.failure_count(), 1);
    assert!(t.messages()[0].contains("bad port"));
}

#[test]
#[should_panic(expected = "recorded 2 failure(s)")]
fn dropped_context_fails_the_test() {
    let t = TestContext::new("dropped_context_fails_the_test");
    assert::zero(&t, &"not empty");
    assert::not_contains(&t, "hello world", "world");
}
