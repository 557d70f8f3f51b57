pub mod jsonl;

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::models::{Achievement, Announcement, Captain, House, Member, PointTransaction};
use jsonl::JsonlTable;

/// Every table of the data directory.
///
/// Callers that need more than one table take the locks in field order.
#[derive(Debug)]
pub struct Store {
    data_dir: PathBuf,
    pub houses: Mutex<JsonlTable<House>>,
    pub captains: Mutex<JsonlTable<Captain>>,
    pub members: Mutex<JsonlTable<Member>>,
    pub achievements: Mutex<JsonlTable<Achievement>>,
    pub announcements: Mutex<JsonlTable<Announcement>>,
    pub transactions: Mutex<JsonlTable<PointTransaction>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableCounts {
    pub houses: usize,
    pub captains: usize,
    pub members: usize,
    pub achievements: usize,
    pub announcements: usize,
    pub transactions: usize,
}

impl Store {
    pub fn open_or_create(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)
            .map_err(|e| anyhow::anyhow!("Failed to create data directory {:?}: {}", data_dir, e))?;
        let table = |name: &str| data_dir.join(format!("{name}.jsonl"));
        Ok(Self {
            data_dir: data_dir.to_path_buf(),
            houses: Mutex::new(JsonlTable::open_or_create(table("houses"))?),
            captains: Mutex::new(JsonlTable::open_or_create(table("captains"))?),
            members: Mutex::new(JsonlTable::open_or_create(table("members"))?),
            achievements: Mutex::new(JsonlTable::open_or_create(table("achievements"))?),
            announcements: Mutex::new(JsonlTable::open_or_create(table("announcements"))?),
            transactions: Mutex::new(JsonlTable::open_or_create(table("point_transactions"))?),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn counts(&self) -> Result<TableCounts> {
        Ok(TableCounts {
            houses: lock(&self.houses, "houses")?.len(),
            captains: lock(&self.captains, "captains")?.len(),
            members: lock(&self.members, "members")?.len(),
            achievements: lock(&self.achievements, "achievements")?.len(),
            announcements: lock(&self.announcements, "announcements")?.len(),
            transactions: lock(&self.transactions, "point transactions")?.len(),
        })
    }
}

pub fn lock<'a, T>(table: &'a Mutex<T>, name: &str) -> Result<MutexGuard<'a, T>> {
    table
        .lock()
        .map_err(|_| anyhow::anyhow!("Failed to acquire {} table lock", name))
}
