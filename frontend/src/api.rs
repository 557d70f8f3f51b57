use gloo_net::http::Request;
use serde::{Deserialize, Serialize};

const BACKEND_URL: &str = match option_env!("HOUSES_API_URL") {
    Some(url) => url,
    None => "/api",
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct House {
    pub id: u64,
    pub name: String,
    pub points: i64,
    pub description: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Standing {
    pub rank: usize,
    pub name: String,
    pub points: i64,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HouseRef {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaptainRef {
    pub id: u64,
    pub username: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Announcement {
    pub id: u64,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub created_at: String,
    pub house: HouseRef,
    pub captain: CaptainRef,
}

impl Announcement {
    /// `YYYY-MM-DD` part of the RFC 3339 timestamp.
    pub fn date(&self) -> &str {
        self.created_at
            .split_once('T')
            .map_or(self.created_at.as_str(), |(date, _)| date)
    }
}

async fn get_json<T: for<'de> Deserialize<'de>>(path: &str) -> Result<T, gloo_net::Error> {
    let resp = Request::get(&format!("{}{}", BACKEND_URL, path)).send().await?;
    if !resp.ok() {
        return Err(gloo_net::Error::GlooError(format!(
            "GET {} failed: {}",
            path,
            resp.status()
        )));
    }
    resp.json::<T>().await
}

pub async fn fetch_houses() -> Result<Vec<House>, gloo_net::Error> {
    get_json("/houses").await
}

pub async fn fetch_live_points() -> Result<Vec<Standing>, gloo_net::Error> {
    get_json("/live-points").await
}

pub async fn fetch_announcements() -> Result<Vec<Announcement>, gloo_net::Error> {
    get_json("/announcements").await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn announcement_payload_deserializes() {
        let raw = r#"{
            "id": 3,
            "title": "Training Session",
            "content": "House training will begin this Friday.",
            "image_url": null,
            "created_at": "2026-02-04T08:30:00+00:00",
            "house": {"id": 2, "name": "An-Nahl"},
            "captain": {"id": 2, "username": "nahl", "name": "Captain Nahl"}
        }"#;
        let ann: Announcement = serde_json::from_str(raw).unwrap();
        assert_eq!(ann.house.name, "An-Nahl");
        assert_eq!(ann.captain.username, "nahl");
        assert_eq!(ann.date(), "2026-02-04");
    }

    #[test]
    fn house_without_logo_field_deserializes() {
        let raw = r#"{"id": 1, "name": "An-Nun", "points": -4, "description": null}"#;
        let house: House = serde_json::from_str(raw).unwrap();
        assert_eq!(house.points, -4);
        assert_eq!(house.logo_url, None);
    }

    #[test]
    fn date_falls_back_to_raw_timestamp() {
        let raw = r#"{
            "id": 1, "title": "t", "content": "c", "created_at": "yesterday",
            "house": {"id": 1, "name": "h"},
            "captain": {"id": 1, "username": "u", "name": "n"}
        }"#;
        let ann: Announcement = serde_json::from_str(raw).unwrap();
        assert_eq!(ann.date(), "yesterday");
    }
}
