use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A row that lives in a [`JsonlTable`](crate::storage::jsonl::JsonlTable).
pub trait Record {
    fn id(&self) -> u64;
}

macro_rules! impl_record {
    ($($ty:ty),* $(,)?) => {
        $(impl Record for $ty {
            fn id(&self) -> u64 {
                self.id
            }
        })*
    };
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct House {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Captain {
    pub id: u64,
    pub name: String,
    pub username: String,
    pub house_id: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: u64,
    pub name: String,
    pub role: String,
    pub house_id: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub house_id: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: u64,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub house_id: u64,
    pub captain_id: u64,
}

/// One signed entry in a house's points ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointTransaction {
    pub id: u64,
    pub house_id: u64,
    pub points_change: i64,
    pub reason: String,
    pub timestamp: DateTime<Utc>,
}

impl_record!(House, Captain, Member, Achievement, Announcement, PointTransaction);
