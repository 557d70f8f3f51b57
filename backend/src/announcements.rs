//! Captain-owned announcements: posting, removal and images.

use chrono::Utc;

use crate::error::AppError;
use crate::models::{Announcement, Captain};
use crate::storage::{lock, Store};

pub const MAX_TITLE_CHARS: usize = 200;
pub const MAX_IMAGE_URL_CHARS: usize = 500;

#[derive(Debug, Clone, Default)]
pub struct NewAnnouncement {
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
}

fn captain_by_username(store: &Store, username: &str) -> Result<Captain, AppError> {
    let captains = lock(&store.captains, "captains")?;
    captains
        .find(|c| c.username == username)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Captain {} does not exist", username)))
}

fn validate_image_url(url: &str) -> Result<(), AppError> {
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(AppError::ValidationError("Image URL must start with http:// or https://".to_string()));
    }
    if url.chars().count() > MAX_IMAGE_URL_CHARS {
        return Err(AppError::ValidationError(format!(
            "Image URL must be at most {} characters",
            MAX_IMAGE_URL_CHARS
        )));
    }
    Ok(())
}

/// Post an announcement for the captain's house.
pub fn create(store: &Store, captain_username: &str, new: NewAnnouncement) -> Result<Announcement, AppError> {
    let title = new.title.trim();
    let content = new.content.trim();
    if title.is_empty() || content.is_empty() {
        return Err(AppError::ValidationError("Title and content are required".to_string()));
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(AppError::ValidationError(format!(
            "Title must be at most {} characters",
            MAX_TITLE_CHARS
        )));
    }
    let image_url = new
        .image_url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty());
    if let Some(url) = image_url {
        validate_image_url(url)?;
    }

    let captain = captain_by_username(store, captain_username)?;
    let mut announcements = lock(&store.announcements, "announcements")?;
    let announcement = announcements.insert(|id| Announcement {
        id,
        title: title.to_string(),
        content: content.to_string(),
        image_url: image_url.map(String::from),
        created_at: Utc::now(),
        house_id: captain.house_id,
        captain_id: captain.id,
    })?;

    tracing::info!(id = announcement.id, captain = %captain.username, "announcement created");
    Ok(announcement)
}

/// Delete an announcement. Only the captain who posted it may do so.
pub fn remove(store: &Store, captain_username: &str, announcement_id: u64) -> Result<Announcement, AppError> {
    let captain = captain_by_username(store, captain_username)?;
    let mut announcements = lock(&store.announcements, "announcements")?;

    let owner = announcements
        .get(announcement_id)
        .map(|a| a.captain_id)
        .ok_or_else(|| AppError::NotFound(format!("Announcement {} does not exist", announcement_id)))?;
    if owner != captain.id {
        return Err(AppError::Forbidden("You can only delete your own announcements".to_string()));
    }

    let removed = announcements
        .remove(announcement_id)?
        .ok_or_else(|| AppError::NotFound(format!("Announcement {} does not exist", announcement_id)))?;
    tracing::info!(id = announcement_id, captain = %captain.username, "announcement deleted");
    Ok(removed)
}

/// Set or clear (`None`) the image shown with an announcement.
pub fn set_image(store: &Store, announcement_id: u64, image_url: Option<&str>) -> Result<Announcement, AppError> {
    let image_url = image_url.map(str::trim).filter(|url| !url.is_empty());
    if let Some(url) = image_url {
        validate_image_url(url)?;
    }

    let mut announcements = lock(&store.announcements, "announcements")?;
    announcements
        .update(announcement_id, |a| a.image_url = image_url.map(String::from))?
        .ok_or_else(|| AppError::NotFound(format!("Announcement {} does not exist", announcement_id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn seeded(dir: &std::path::Path) -> Store {
        let store = Store::open_or_create(dir).unwrap();
        seed::seed(&store).unwrap();
        store
    }

    fn post(title: &str, content: &str) -> NewAnnouncement {
        NewAnnouncement {
            title: title.to_string(),
            content: content.to_string(),
            image_url: None,
        }
    }

    #[test]
    fn create_assigns_captain_and_house() {
        let dir = tempfile::tempdir().unwrap();
        let store = seeded(dir.path());

        let ann = create(&store, "nahl", post("  Sports day ", " Bring water. ")).unwrap();
        assert_eq!(ann.title, "Sports day");
        assert_eq!(ann.content, "Bring water.");

        let captains = lock(&store.captains, "captains").unwrap();
        let nahl = captains.find(|c| c.username == "nahl").unwrap();
        assert_eq!(ann.captain_id, nahl.id);
        assert_eq!(ann.house_id, nahl.house_id);
    }

    #[test]
    fn create_validates_fields() {
        let dir = tempfile::tempdir().unwrap();
        let store = seeded(dir.path());
        let before = store.counts().unwrap().announcements;

        assert!(matches!(create(&store, "nahl", post(" ", "x")), Err(AppError::ValidationError(_))));
        assert!(matches!(create(&store, "nahl", post("x", "")), Err(AppError::ValidationError(_))));
        let long = "t".repeat(MAX_TITLE_CHARS + 1);
        assert!(matches!(create(&store, "nahl", post(&long, "x")), Err(AppError::ValidationError(_))));
        let with_bad_image = NewAnnouncement {
            image_url: Some("ftp://img".to_string()),
            ..post("x", "y")
        };
        assert!(matches!(create(&store, "nahl", with_bad_image), Err(AppError::ValidationError(_))));
        assert!(matches!(create(&store, "nobody", post("x", "y")), Err(AppError::NotFound(_))));
        assert_eq!(store.counts().unwrap().announcements, before);

        let exact = "t".repeat(MAX_TITLE_CHARS);
        assert!(create(&store, "nahl", post(&exact, "x")).is_ok());
    }

    #[test]
    fn only_the_owner_can_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = seeded(dir.path());
        let ann = create(&store, "nun", post("Quiz", "Friday")).unwrap();

        assert!(matches!(remove(&store, "naml", ann.id), Err(AppError::Forbidden(_))));
        assert_eq!(remove(&store, "nun", ann.id).unwrap().title, "Quiz");
        assert!(matches!(remove(&store, "nun", ann.id), Err(AppError::NotFound(_))));

        let reopened = Store::open_or_create(dir.path()).unwrap();
        assert!(lock(&reopened.announcements, "announcements").unwrap().get(ann.id).is_none());
    }

    #[test]
    fn set_image_updates_and_clears() {
        let dir = tempfile::tempdir().unwrap();
        let store = seeded(dir.path());
        let ann = create(&store, "hudhud", post("Photo day", "Smile")).unwrap();

        let url = "https://res.cloudinary.com/demo/image/upload/photo.png";
        assert_eq!(set_image(&store, ann.id, Some(url)).unwrap().image_url.as_deref(), Some(url));
        assert!(matches!(set_image(&store, ann.id, Some("not a url")), Err(AppError::ValidationError(_))));
        assert_eq!(set_image(&store, ann.id, None).unwrap().image_url, None);
        assert!(matches!(set_image(&store, 9999, None), Err(AppError::NotFound(_))));
    }
}
