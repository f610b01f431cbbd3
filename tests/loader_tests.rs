use cipherforge::error::CipherForgeError;
use cipherforge::scorer::loader::{load_quadgrams, parse_quadgrams};
use cipherforge::scorer::quadgram::QuadgramValues;
use cipherforge::scorer::language_fitness;
use std::io::Write;
use tempfile::NamedTempFile;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_loader_normalises_counts() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "THAT 3").unwrap();
    writeln!(file, "TION 1").unwrap();

    let model = load_quadgrams(file.path()).unwrap();
    assert_eq!(model.entries(), 2);
    assert!(close(model.log_prob("THAT"), 0.75f64.log10()));
    assert!(close(model.log_prob("tion"), 0.25f64.log10()));
    assert!(close(model.log_prob("QQQQ"), (0.01f64 / 4.0).log10()));
    assert!(close(model.floor(), (0.01f64 / 4.0).log10()));
}

#[test]
fn test_loader_accepts_log_probabilities() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "THAT -1.5").unwrap();
    writeln!(file, "TION -2.0").unwrap();

    let model = load_quadgrams(file.path()).unwrap();
    assert!(close(model.log_prob("THAT"), -1.5));
    assert!(close(model.log_prob("ZZZZ"), -4.0));
}

#[test]
fn test_loader_handles_tabs_and_junk_rows() {
    let content = b"quadgram\tcount\nTHAT\t10\textra\nTH\t5\nWITH\tlots\n\nHERE\t2\n";
    let raw = parse_quadgrams(content).unwrap();

    assert_eq!(raw.entries.len(), 2);
    assert_eq!(raw.entries[0], ("THAT".to_string(), 10.0));
    assert_eq!(raw.entries[1], ("HERE".to_string(), 2.0));
    // Header, short window and bad count
    assert_eq!(raw.skipped, 3);
    assert_eq!(raw.detect_values(), QuadgramValues::Counts);
}

#[test]
fn test_loader_handles_repeated_spaces() {
    let raw = parse_quadgrams(b"THAT   7\n  TION 3  \n").unwrap();
    assert_eq!(raw.entries.len(), 2);
    assert_eq!(raw.entries[1], ("TION".to_string(), 3.0));
}

#[test]
fn test_loader_missing_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_quadgrams(dir.path().join("nope.txt")).unwrap_err();
    assert!(matches!(err, CipherForgeError::ModelLoadFailure(_)));
    assert!(!err.is_recoverable());
}

#[test]
fn test_loader_rejects_table_without_quadgrams() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "hello world").unwrap();
    writeln!(file, "TH 100").unwrap();

    let err = load_quadgrams(file.path()).unwrap_err();
    assert!(matches!(err, CipherForgeError::ModelLoadFailure(_)));
}

#[test]
fn test_fitness_prefers_known_windows() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "ATTA 50").unwrap();
    writeln!(file, "TTAC 50").unwrap();
    writeln!(file, "TACK 50").unwrap();

    let model = load_quadgrams(file.path()).unwrap();
    let english = language_fitness("attack", &model);
    let noise = language_fitness("xqzjvw", &model);
    assert!(english > noise);
    // Fewer than four letters scores zero
    assert_eq!(language_fitness("abc", &model), 0.0);
}
