use datafile::{Document, Error, Level, Options};
use std::fs;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

type Seen = Arc<Mutex<Vec<(Level, String)>>>;

fn collecting_sink() -> (Seen, impl Fn(Level, &str) + Send + Sync + 'static) {
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let sink = {
        let seen = Arc::clone(&seen);
        move |level: Level, message: &str| {
            seen.lock().unwrap().push((level, message.to_string()));
        }
    };
    (seen, sink)
}

#[test]
fn test_load_modify_save() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("server.ini");
    fs::write(&path, "; the port\n[Server]\nPort=1200\n").unwrap();

    let mut doc = Document::new();
    doc.load(&path).unwrap();
    assert_eq!(doc.file_path(), Some(path.as_path()));
    assert!(!doc.is_dirty());

    doc.set_int("Port", 8080, "", "server").unwrap();
    doc.set_value("Host", "localhost", "where to listen", "Server")
        .unwrap();
    doc.save().unwrap();
    assert!(!doc.is_dirty());

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "\n; the port\n[Server]\nPort=8080\n\n; where to listen\nHost=localhost\n"
    );
}

#[test]
fn test_save_truncates_previous_content() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("a.ini");
    fs::write(&path, "old=1\nolder=2\noldest=3\n".repeat(50)).unwrap();

    let mut doc = Document::open(&path, Options::default());
    doc.clear();
    doc.set_value("k", "v", "", "").unwrap();
    doc.save_as(&path).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "k=v\n");
}

#[test]
fn test_load_replaces_content() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("b.ini");
    fs::write(&path, "[B]\nb=1\n").unwrap();

    let mut doc = Document::parse_str("[A]\na=1\n");
    doc.set_value("a", "2", "", "A").unwrap();
    doc.load(&path).unwrap();

    assert!(!doc.has_section("A"));
    assert_eq!(doc.get_int("b", "B").unwrap(), 1);
    assert!(!doc.is_dirty());
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.ini");
    let (seen, sink) = collecting_sink();

    let mut doc = Document::parse_str("k=v\n").with_sink(sink);
    let err = doc.load(&path).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
    assert_eq!(doc.get_value("k", "").unwrap(), "v");
    assert!(doc.file_path().is_none());

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0, Level::Info);
    assert!(seen[0].1.contains("missing.ini"));
}

#[test]
fn test_open_missing_file_keeps_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("new.ini");

    let mut doc = Document::open(&path, Options::default());
    assert!(doc.is_empty());
    assert_eq!(doc.file_path(), Some(path.as_path()));

    doc.set_bool("Ready", false, "", "State").unwrap();
    doc.save().unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "\n[State]\nReady=False\n");
}

#[test]
fn test_save_without_file_name() {
    let (seen, sink) = collecting_sink();
    let mut doc = Document::new().with_sink(sink);
    doc.set_value("k", "v", "", "").unwrap();

    assert!(matches!(doc.save(), Err(Error::NoFileName)));
    assert!(doc.is_dirty());
    assert_eq!(seen.lock().unwrap()[0].0, Level::Error);
}

#[test]
fn test_nothing_to_persist_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.ini");

    let mut doc = Document::new();
    doc.set_file_path(&path);
    assert!(matches!(doc.save(), Err(Error::NothingToPersist)));
    assert!(!path.exists());

    // A bare header is worth saving.
    doc.create_section("Only", "").unwrap();
    doc.save().unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "\n[Only]\n");
}

#[test]
fn test_unwritable_destination() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("no-such-dir").join("x.ini");

    let mut doc = Document::parse_str("k=v\n");
    doc.set_dirty(true);
    let err = doc.save_as(&path).unwrap_err();
    match err {
        Error::Io { path: failed, .. } => assert_eq!(failed, path),
        other => panic!("expected an I/O error, got {other:?}"),
    }
    assert!(doc.is_dirty());
}

#[test]
fn test_autosave_on_drop() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("auto.ini");

    {
        let mut doc = Document::open(&path, Options::new().with_autosave(true));
        doc.set_value("saved", "yes", "", "").unwrap();
    }
    assert_eq!(fs::read_to_string(&path).unwrap(), "saved=yes\n");

    {
        let mut doc = Document::open(&path, Options::default());
        doc.set_value("saved", "no", "", "").unwrap();
    }
    assert_eq!(fs::read_to_string(&path).unwrap(), "saved=yes\n");
}

#[test]
fn test_autosave_skips_clean_documents() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("clean.ini");
    fs::write(&path, "k = v\n").unwrap();

    {
        let _doc = Document::open(&path, Options::new().with_autosave(true));
    }
    assert_eq!(fs::read_to_string(&path).unwrap(), "k = v\n");
}

#[test]
fn test_crlf_bom_and_invalid_utf8_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("windows.ini");
    fs::write(&path, b"\xef\xbb\xbf[Win]\r\nName=caf\xe9\r\nOk=1\r\n").unwrap();

    let doc = Document::open(&path, Options::default());
    assert_eq!(doc.get_value("name", "win").unwrap(), "caf\u{fffd}");
    assert!(doc.get_bool("ok", "win").unwrap());
}

#[test]
fn test_rename_warns_and_marks_dirty() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("first.ini");
    let second = dir.path().join("second.ini");
    fs::write(&first, "k=v\n").unwrap();
    let (seen, sink) = collecting_sink();

    let mut doc = Document::open(&first, Options::default()).with_sink(sink);
    doc.set_file_path(&second);
    assert!(doc.is_dirty());
    assert_eq!(seen.lock().unwrap()[0].0, Level::Warn);

    doc.save().unwrap();
    assert_eq!(fs::read_to_string(&second).unwrap(), "k=v\n");
}

#[test]
fn test_dropping_a_clone_leaves_the_file_to_the_original() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("shared.ini");

    let mut doc = Document::open(&path, Options::new().with_autosave(true));
    doc.set_value("v", "1", "", "").unwrap();

    {
        let mut copy = doc.clone();
        copy.set_value("v", "2", "", "").unwrap();
        assert!(!copy.options().autosave);
    }
    assert!(!path.exists());

    let mut copy = doc.clone();
    copy.set_value("v", "3", "", "").unwrap();
    copy.save().unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "v=3\n");
    drop(copy);

    doc.set_dirty(false);
    drop(doc);
    assert_eq!(fs::read_to_string(&path).unwrap(), "v=3\n");
}
