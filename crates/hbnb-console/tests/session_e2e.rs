use std::fs;
use std::io::Cursor;
use std::path::Path;

use hbnb_console::{session, Interpreter, Reply};
use hbnb_store::{FileStorage, RecordStore};
use hbnb_types::Value;

fn open(path: &Path) -> Interpreter<FileStorage> {
    Interpreter::new(FileStorage::open(path).unwrap())
}

fn output(reply: Reply) -> String {
    match reply {
        Reply::Output(text) => text,
        other => panic!("expected output, got {other:?}"),
    }
}

#[test]
fn user_lifecycle_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let mut console = open(&dir.path().join("file.json"));

    let id = output(console.execute("create User"));
    let shown = output(console.execute(&format!("show User {id}")));
    assert!(shown.starts_with(&format!("[User] ({id})")), "{shown}");

    assert_eq!(console.execute(&format!(r#"update User {id} name "Bob""#)), Reply::Silent);
    let shown = output(console.execute(&format!("show User {id}")));
    assert!(shown.contains("name='Bob'"), "{shown}");

    assert_eq!(console.execute(&format!("destroy User {id}")), Reply::Silent);
    assert_eq!(
        output(console.execute(&format!("show User {id}"))),
        "** no instance found **"
    );
}

#[test]
fn mutations_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("file.json");

    let mut first = open(&path);
    let place = output(first.execute("create Place"));
    let user = output(first.execute("create User"));
    first.execute(&format!(r#"Place.update("{place}", {{"max_guest": 4, "latitude": 48.85, "name": "Loft"}})"#));
    first.execute(&format!("destroy User {user}"));
    let before = first.store().all().clone();
    drop(first);

    let mut second = open(&path);
    assert_eq!(second.store().all(), &before);
    let record = second.store().get(&format!("Place.{place}")).unwrap();
    assert_eq!(record.get("max_guest"), Some(&Value::Int(4)));
    assert_eq!(record.get("latitude"), Some(&Value::Float(48.85)));
    assert_eq!(record.get("name"), Some(&Value::from("Loft")));
    assert_eq!(output(second.execute("count User")), "0");
    assert_eq!(output(second.execute("count Place")), "1");
}

#[test]
fn read_only_commands_do_not_write() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("file.json");
    let mut console = open(&path);
    for line in ["all", "count User", "show User x", "help", "create Nope"] {
        console.execute(line);
    }
    assert!(!path.exists());
}

#[test]
fn failed_save_rolls_back() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, b"").unwrap();
    let mut console = Interpreter::new(FileStorage::new(blocker.join("file.json")));

    let reply = output(console.execute("create User"));
    assert!(reply.starts_with("** storage error:"), "{reply}");
    assert!(console.store().is_empty());
}

#[test]
fn failed_save_restores_updated_record() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("file.json");
    let mut console = open(&path);
    let id = output(console.execute("create City"));
    console.execute(&format!("update City {id} name Paris"));

    // Replace the data directory with a file so the next save fails.
    fs::remove_dir_all(dir.path().join("data")).unwrap();
    fs::write(dir.path().join("data"), b"").unwrap();

    let reply = output(console.execute(&format!("update City {id} name Lyon")));
    assert!(reply.starts_with("** storage error:"), "{reply}");
    let record = console.store().get(&format!("City.{id}")).unwrap();
    assert_eq!(record.get("name"), Some(&Value::from("Paris")));

    let reply = output(console.execute(&format!("destroy City {id}")));
    assert!(reply.starts_with("** storage error:"), "{reply}");
    assert!(console.store().get(&format!("City.{id}")).is_some());
}

#[test]
fn piped_session_transcript() {
    let dir = tempfile::tempdir().unwrap();
    let mut console = open(&dir.path().join("file.json"));
    let input = "create State\n\nState.count()\nall Nope\nquit\ncreate State\n";
    let mut out = Vec::new();
    session::run(&mut console, Cursor::new(input), &mut out, "(hbnb) ", false).unwrap();

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.split("(hbnb) ").filter(|s| !s.is_empty()).collect();
    assert_eq!(lines.len(), 3, "{text}");
    assert_eq!(lines[0].trim().len(), 36);
    assert_eq!(lines[1], "1\n");
    assert_eq!(lines[2], "** class doesn't exist **\n");
    assert_eq!(console.store().len(), 1);
}

#[test]
fn call_style_and_canonical_agree_on_errors() {
    let dir = tempfile::tempdir().unwrap();
    let mut console = open(&dir.path().join("file.json"));
    let pairs = [
        ("show Nope 1", r#"Nope.show("1")"#),
        ("show User", "User.show()"),
        ("show User 1", r#"User.show("1")"#),
        ("destroy User 1", "User.destroy('1')"),
        ("count Nope", "Nope.count()"),
    ];
    for (canonical, call) in pairs {
        assert_eq!(console.execute(canonical), console.execute(call), "{call}");
    }
}
