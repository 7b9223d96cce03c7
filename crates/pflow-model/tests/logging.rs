use std::io;
use std::sync::{Arc, Mutex};

use pflow_model::{DecodeMode, ModelDecoder};

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn decode_with_log(mode: DecodeMode, wire: &[u8]) -> String {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    tracing::subscriber::with_default(subscriber, || {
        let _ = ModelDecoder::new(mode).decode(wire);
    });
    captured.text()
}

#[test]
fn permissive_mismatch_is_logged_with_its_path() {
    let log = decode_with_log(
        DecodeMode::Permissive,
        br#"{"places": {"p": {"offset": "first"}}}"#,
    );
    assert!(log.contains("WARN"), "{log}");
    assert!(log.contains("field has wrong shape, using default"), "{log}");
    assert!(log.contains("path=places.p.offset"), "{log}");
    assert!(log.contains("expected=\"integer\""), "{log}");
}

#[test]
fn clean_and_strict_decodes_stay_quiet() {
    let clean = decode_with_log(
        DecodeMode::Permissive,
        br#"{"places": {"p": {"offset": 0, "initial": [1]}}}"#,
    );
    assert!(clean.is_empty(), "{clean}");

    let strict = decode_with_log(
        DecodeMode::Strict,
        br#"{"places": {"p": {"offset": "first"}}}"#,
    );
    assert!(strict.is_empty(), "{strict}");
}
