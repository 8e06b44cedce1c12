//! Structured events emitted while assertions run.

use std::io::Write;
use std::sync::{Arc, Mutex};

use kild_assert::{TestContext, assert};
use tracing::Level;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn capture(body: impl FnOnce()) -> String {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, body);
    captured.text()
}

#[test]
fn context_failure_is_logged_once() {
    let output = capture(|| {
        let t = TestContext::new("context_failure_is_logged_once");
        assert::equal(&t, &1, &2);
        let _ = t.finish();
    });

    assert_eq!(output.matches("assert.check.failed").count(), 1);
    assert_eq!(output.matches("assert.context.failed").count(), 1);
}

#[test]
fn passing_checks_log_no_failures() {
    let output = capture(|| {
        let t = TestContext::new("passing_checks_log_no_failures");
        assert::contains(&t, &[1, 2], &2);
        t.finish().unwrap();
    });

    assert!(!output.contains("assert.check.failed"));
    assert!(output.contains("assert.context.finished"));
}
