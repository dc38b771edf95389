//! Integration tests for period-rotated recording

use chrono::{DateTime, TimeZone, Utc};
use csv_recorder::{FixedClock, Recorder, RecorderConfig, RecorderError};
use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;
use std::path::Path;
use tempfile::tempdir;

/// Helper: the booking recorder from the documentation, pinned to `instant`
fn booking_recorder(dir: &Path, record_type: &str, instant: DateTime<Utc>) -> Recorder {
    Recorder::new(
        dir,
        "booking_record",
        vec!["id".into(), "request".into(), "response".into()],
        record_type,
    )
    .with_clock(FixedClock(instant))
}

fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

#[derive(Serialize)]
struct Booking<'a> {
    id: &'a str,
    request: &'a str,
    response: &'a str,
    elapsed_ms: f64,
}

#[test]
fn test_documented_booking_example() {
    let temp_dir = tempdir().expect("tempdir");
    let dir = temp_dir.path().join("files").join("record");
    let recorder = booking_recorder(&dir, "daily", utc(2025, 8, 26, 2));

    recorder
        .record(&json!({"id": "123", "request": "GET /x", "response": "200 OK"}))
        .expect("record");

    let content = std::fs::read_to_string(dir.join("booking_record_2025_08_26.csv")).unwrap();
    assert_eq!(content, "id,request,response\n123,GET /x,200 OK\n");
}

#[test]
fn test_same_period_appends_with_single_header() {
    let temp_dir = tempdir().expect("tempdir");
    let recorder = booking_recorder(temp_dir.path(), "monthly", utc(2025, 8, 1, 0));

    let calls = 5;
    for i in 0..calls {
        let path = recorder
            .record(&json!({"id": i, "request": "GET", "response": "OK"}))
            .expect("record");
        assert_eq!(path, temp_dir.path().join("booking_record_2025_08.csv"));
    }

    let content = std::fs::read_to_string(temp_dir.path().join("booking_record_2025_08.csv")).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 1 + calls);
    assert_eq!(lines.iter().filter(|l| **l == "id,request,response").count(), 1);
    assert_eq!(lines[5], "4,GET,OK");
}

#[test]
fn test_new_period_starts_new_file() {
    let temp_dir = tempdir().expect("tempdir");

    let day_one = booking_recorder(temp_dir.path(), "daily", utc(2025, 8, 26, 10))
        .record(&json!({"id": "a"}))
        .unwrap();
    let day_two = booking_recorder(temp_dir.path(), "daily", utc(2025, 8, 27, 10))
        .record(&json!({"id": "b"}))
        .unwrap();

    assert_ne!(day_one, day_two);
    assert_eq!(std::fs::read_to_string(&day_one).unwrap(), "id,request,response\na,,\n");
    assert_eq!(std::fs::read_to_string(&day_two).unwrap(), "id,request,response\nb,,\n");
}

#[test]
fn test_header_survives_restart_and_column_change() {
    let temp_dir = tempdir().expect("tempdir");
    let instant = utc(2025, 3, 1, 0);

    booking_recorder(temp_dir.path(), "yearly", instant)
        .record(&json!({"id": "1", "request": "r", "response": "s"}))
        .unwrap();

    // A fresh recorder with different columns simulates a restarted process
    let path = Recorder::new(temp_dir.path(), "booking_record", vec!["response".into()], "yearly")
        .with_clock(FixedClock(instant))
        .record(&json!({"id": "2", "response": "t"}))
        .unwrap();

    let content = std::fs::read_to_string(path).unwrap();
    assert_eq!(content, "id,request,response\n1,r,s\nt\n");
}

#[test]
fn test_struct_payload_with_extra_fields() {
    let temp_dir = tempdir().expect("tempdir");
    let recorder = booking_recorder(temp_dir.path(), "daily", utc(2025, 8, 26, 2));

    let path = recorder
        .record(&Booking {
            id: "42",
            request: "POST /book, room=1",
            response: "{\"status\": \"ok\"}",
            elapsed_ms: 12.5,
        })
        .unwrap();

    let content = std::fs::read_to_string(path).unwrap();
    assert_eq!(
        content,
        "id,request,response\n42,\"POST /book, room=1\",\"{\"\"status\"\": \"\"ok\"\"}\"\n"
    );
    assert!(!content.contains("elapsed_ms"));
}

#[test]
fn test_hash_map_payload() {
    let temp_dir = tempdir().expect("tempdir");
    let recorder = booking_recorder(temp_dir.path(), "daily", utc(2025, 8, 26, 2));

    let mut payload = HashMap::new();
    payload.insert("response", "204");
    payload.insert("id", "9");

    let path = recorder.record(&payload).unwrap();
    let content = std::fs::read_to_string(path).unwrap();
    assert_eq!(content.lines().nth(1), Some("9,,204"));
}

#[test]
fn test_unsupported_record_type_creates_nothing() {
    let temp_dir = tempdir().expect("tempdir");
    let dir = temp_dir.path().join("record");
    let recorder = booking_recorder(&dir, "weekly", utc(2025, 8, 26, 2));

    let err = recorder.record(&json!({"id": "1"})).unwrap_err();

    assert!(matches!(err, RecorderError::UnsupportedRecordType(_)));
    assert!(err.is_config_error());
    assert!(!dir.exists());
}

#[test]
fn test_from_config_with_time_zone() {
    let temp_dir = tempdir().expect("tempdir");
    let mut config = RecorderConfig::new(temp_dir.path(), "audit", vec!["id".into()], "daily");
    config.time_zone = "-05:00".to_string();

    // 03:00 UTC on the 26th is still the 25th at UTC-5
    let path = Recorder::from_config(config)
        .with_clock(FixedClock(utc(2025, 8, 26, 3)))
        .record(&json!({"id": 1}))
        .unwrap();

    assert_eq!(path, temp_dir.path().join("audit_2025_08_25.csv"));
}

#[test]
fn test_daylight_saving_zone_rotates_on_local_midnight() {
    let temp_dir = tempdir().expect("tempdir");
    let recorder = |instant| {
        booking_recorder(temp_dir.path(), "daily", instant).with_time_zone("Europe/Berlin")
    };

    // 22:00 UTC is midnight in Berlin during summer time only
    let winter = recorder(utc(2025, 3, 29, 22)).record(&json!({"id": "1"})).unwrap();
    let summer = recorder(utc(2025, 3, 30, 22)).record(&json!({"id": "2"})).unwrap();

    assert_eq!(winter, temp_dir.path().join("booking_record_2025_03_29.csv"));
    assert_eq!(summer, temp_dir.path().join("booking_record_2025_03_31.csv"));
}

#[test]
fn test_default_zone_is_jakarta() {
    let temp_dir = tempdir().expect("tempdir");
    let recorder = booking_recorder(temp_dir.path(), "daily", utc(2025, 8, 26, 17));

    // 17:00 UTC is midnight in Jakarta
    assert_eq!(
        recorder.target_path().unwrap(),
        temp_dir.path().join("booking_record_2025_08_27.csv")
    );
}
