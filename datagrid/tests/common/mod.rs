#![allow(dead_code)]

use std::sync::{Arc, Mutex, Once};

use datagrid::prelude::*;
use simplelog::{Config, LevelFilter, TestLogger};

static LOGGER: Once = Once::new();

/// Route engine logs through the test harness' captured output.
pub fn init_logging() {
    LOGGER.call_once(|| {
        let _ = TestLogger::init(LevelFilter::Trace, Config::default());
    });
}

/// Rows "1".."=n" with a `name` field.
pub fn rows(n: usize) -> Vec<Row> {
    (1..=n)
        .map(|i| Row::new(i.to_string()).with("name", format!("Row {i}")))
        .collect()
}

pub fn ids(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

pub fn columns() -> Vec<Column> {
    vec![
        Column::new("name", "Name").sortable(),
        Column::new("status", "Status").sortable(),
        Column::new("owner", "Owner"),
    ]
}

pub fn table(n: usize, mode: SelectionMode) -> TableController<Row> {
    init_logging();
    TableBuilder::new(columns())
        .rows(rows(n))
        .options(TableOptions::new(mode))
        .build()
        .expect("valid table")
}

/// Records every value a change handler receives.
#[derive(Debug)]
pub struct Recorder<S> {
    pub seen: Arc<Mutex<Vec<S>>>,
}

impl<S: Clone + Send + 'static> Recorder<S> {
    pub fn new() -> Self {
        Self {
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn handler(&self) -> impl Fn(&S) + Send + Sync + 'static {
        let seen = Arc::clone(&self.seen);
        move |s: &S| seen.lock().unwrap().push(s.clone())
    }

    pub fn calls(&self) -> Vec<S> {
        self.seen.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<S> {
        self.seen.lock().unwrap().last().cloned()
    }
}
