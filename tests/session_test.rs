use anyhow::Result;
use chrono::{Duration, TimeZone, Utc};
use circulation_desk::{DeskConfig, Library, ManualClock, Response, Session};
use std::io::Cursor;
use std::io::Write;
use tempfile::NamedTempFile;

fn responses(output: &[u8]) -> Result<Vec<Response>> {
    let text = std::str::from_utf8(output)?;
    text.lines()
        .map(|line| serde_json::from_str::<Response>(line).map_err(anyhow::Error::from))
        .collect()
}

/// Drives a full borrow/return cycle from a JSON-lines script.
#[test]
fn test_session_script() -> Result<()> {
    let start = Utc.with_ymd_and_hms(2024, 4, 1, 12, 0, 0).unwrap();
    let clock = ManualClock::new(start);
    let mut session = Session::new(Library::with_clock(&clock, 14));

    let script = r#"
{"op":"add_book","isbn":"978-1","title":"Python Basics","author":"John Smith","year":2023}
{"op":"add_book","isbn":"978-2","title":"Advanced Python","author":"Jane Doe","year":2023}
{"op":"add_member","member_id":"M001","name":"John Doe","email":"john@example.com"}

{"op":"borrow","isbn":"978-1","member_id":"M001"}
{"op":"borrow","isbn":"978-1","member_id":"M001"}
{"op":"member_books","member_id":"M001"}
{"op":"search","author":"JANE"}
this is not json
{"op":"return","isbn":"978-1"}
{"op":"return","isbn":"978-1"}
"#;

    let mut output = Vec::new();
    let handled = session.run(Cursor::new(script), &mut output)?;
    assert_eq!(handled, 10);

    let results = responses(&output)?;
    assert_eq!(results.len(), 10);

    assert!(results[..3].iter().all(|r| r.ok));

    assert!(results[3].ok);
    assert_eq!(results[3].due_date, Some(start + Duration::days(14)));
    assert!(!results[4].ok);

    let loans = results[5].books.as_ref().expect("listing");
    assert_eq!(loans.len(), 1);
    assert_eq!(loans[0].isbn, "978-1");
    assert!(!loans[0].available);
    assert_eq!(loans[0].borrowed_by.as_deref(), Some("M001"));

    let found = results[6].books.as_ref().expect("listing");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "Advanced Python");

    assert!(!results[7].ok);
    assert!(results[8].ok);
    assert!(!results[9].ok);

    let library = session.into_library();
    assert!(library.book("978-1").expect("registered").is_available());
    Ok(())
}

#[test]
fn test_session_overdue_listing() -> Result<()> {
    let start = Utc.with_ymd_and_hms(2024, 4, 1, 12, 0, 0).unwrap();
    let clock = ManualClock::new(start);
    let mut session = Session::new(Library::with_clock(&clock, 3));

    let setup = concat!(
        r#"{"op":"add_book","isbn":"978-1","title":"T","author":"A","year":2001}"#,
        "\n",
        r#"{"op":"add_member","member_id":"M1","name":"N","email":"n@example.com"}"#,
        "\n",
        r#"{"op":"borrow","isbn":"978-1","member_id":"M1"}"#,
        "\n",
    );
    session.run(Cursor::new(setup), std::io::sink())?;

    clock.advance(Duration::days(4));
    let mut output = Vec::new();
    session.run(Cursor::new(r#"{"op":"overdue"}"#), &mut output)?;

    let results = responses(&output)?;
    let overdue = results[0].books.as_ref().expect("listing");
    assert_eq!(overdue.len(), 1);
    assert_eq!(overdue[0].isbn, "978-1");
    Ok(())
}

#[test]
fn test_library_from_config_file() -> Result<()> {
    let mut temp_file = NamedTempFile::new()?;
    temp_file.write_all(b"[library]\nloan_period_days = 28\n\n[logging]\nformat = \"compact\"\n")?;

    let config = DeskConfig::from_file(temp_file.path())?;
    let library = Library::from_config(&config);
    assert_eq!(library.loan_period_days(), 28);
    assert!(!config.json_logs());
    Ok(())
}
