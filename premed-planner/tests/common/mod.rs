#![allow(dead_code)]

use assert_fs::TempDir;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use premed_planner::{Category, FileStorage, FixedClock, Planner, Priority, TaskInput};

pub struct TestContext {
    // Kept so the directory outlives the planner.
    pub dir: TempDir,
    pub planner: Planner<FileStorage>,
}

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 10, 15, 0, 0).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn open(dir: &TempDir) -> Planner<FileStorage> {
    Planner::with_clock(FileStorage::new(dir.path()), Box::new(FixedClock(now())))
}

pub fn setup() -> TestContext {
    // Allow multiple calls to init for tests.
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let dir = TempDir::new().expect("Failed to create temp dir");
    let planner = open(&dir);
    TestContext { dir, planner }
}

pub fn task_input(title: &str, priority: Priority, date: NaiveDate) -> TaskInput {
    TaskInput {
        field: "Pre-Med".to_string(),
        title: title.to_string(),
        category: Category::Study,
        date,
        time: None,
        priority,
        description: String::new(),
    }
}
