use bubble_pointing::data::geometry::Point;
use bubble_pointing::data::session::{ClickOutcome, Condition, TrialRecord, TrialSession};
use bubble_pointing::data::trial_log::*;
use bubble_pointing::TechniqueKind;

fn finished_session() -> Vec<TrialRecord> {
    finished_session_for("layout1")
}

fn finished_session_for(setup_label: &str) -> Vec<TrialRecord> {
    let condition = Condition {
        technique: TechniqueKind::Raw,
        setup_index: 0,
        setup_label: setup_label.to_string(),
    };
    let mut s = TrialSession::new(3, condition, 2);
    s.begin(Point::new(400.0, 300.0), 0.0);
    assert_eq!(s.register_click(Point::new(10.0, 10.0), None, 250.0), ClickOutcome::Miss);
    assert!(matches!(
        s.register_click(Point::new(100.0, 100.0), Some(0), 800.0),
        ClickOutcome::Hit(_)
    ));
    assert!(matches!(
        s.register_click(Point::new(300.0, 120.0), Some(1), 1400.0),
        ClickOutcome::Finished(_)
    ));
    s.records().to_vec()
}

fn unique_temp_path(name: &str) -> std::path::PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("{name}-{}-{nanos}.csv", std::process::id()))
}

#[test]
fn writes_expected_columns() {
    let records = finished_session();
    let mut buf = Vec::new();
    write_header(&mut buf).unwrap();
    for r in &records {
        write_record(&mut buf, r).unwrap();
    }
    let s = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = s.trim().split('\n').collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], CSV_HEADER);

    // timestamp is first; everything after it is deterministic
    let (_, rest) = lines[1].split_once(',').unwrap();
    assert_eq!(
        rest,
        "3,\"raw/layout1\",raw,1,0,\"(400,300)\",\"(100,100)\",0.000,800.000,0.800,1"
    );
    let (_, rest) = lines[2].split_once(',').unwrap();
    assert_eq!(
        rest,
        "3,\"raw/layout1\",raw,2,1,\"(100,100)\",\"(300,120)\",800.000,1400.000,0.600,0"
    );
}

#[test]
fn logger_writes_header_once() {
    let path = unique_temp_path("trial-log");
    let logger = TrialLogger::new(&path);
    let records = finished_session();
    logger.append(&records[..1]).unwrap();
    logger.append(&records[1..]).unwrap();

    let txt = std::fs::read_to_string(&path).unwrap();
    let _ = std::fs::remove_file(&path);
    let headers = txt.lines().filter(|l| *l == CSV_HEADER).count();
    assert_eq!(headers, 1);
    assert_eq!(txt.lines().count(), 3);
}

#[test]
fn setup_label_with_comma_and_quote_stays_one_field() {
    let records = finished_session_for("grid,large \"v2\"");
    let mut buf = Vec::new();
    write_record(&mut buf, &records[0]).unwrap();
    let line = String::from_utf8(buf).unwrap();
    let (_, rest) = line.trim_end().split_once(',').unwrap();
    assert_eq!(
        rest,
        "3,\"raw/grid,large \"\"v2\"\"\",raw,1,0,\"(400,300)\",\"(100,100)\",0.000,800.000,0.800,1"
    );
}
