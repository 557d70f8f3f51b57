//! Mock data for local development. Safe to run repeatedly.

use anyhow::Result;
use chrono::Utc;

use crate::models::{Achievement, Announcement, Captain, House, Member};
use crate::storage::{lock, Store};

const HOUSES: &[(&str, &str, &str)] = &[
    (
        "Al-Ghuraab",
        "Al-Ghuraab (الغراب): inspired by the crow mentioned in the Qur'an. \
         Represents learning through observation, humility, and moral awareness.",
        "https://res.cloudinary.com/dntujhjkw/image/upload/v1770108364/Al-Ghuraab_szxjhl.png",
    ),
    (
        "An-Nahl",
        "An-Nahl (النحل): inspired by the bee mentioned in the Qur'an. \
         Symbolizes productivity, order, obedience, and service to others.",
        "https://res.cloudinary.com/dntujhjkw/image/upload/v1770108374/An-Nahl_pelgou.png",
    ),
    (
        "An-Nun",
        "An-Nun (النون): inspired by the great fish associated with Prophet Yunus. \
         Represents patience, repentance, resilience, and self-reflection.",
        "https://res.cloudinary.com/dntujhjkw/image/upload/v1770108369/An-Nun_erm5nb.png",
    ),
    (
        "Al-Adiyat",
        "Al-Adiyat (العاديات): inspired by the charging horses mentioned in the Qur'an. \
         Symbolizes discipline, loyalty, determination, and relentless effort.",
        "https://res.cloudinary.com/dntujhjkw/image/upload/v1770108368/Al-Adiyat_l5h9eh.png",
    ),
    (
        "Al-Hudhud",
        "Al-Hudhud (الهدهد): inspired by the hoopoe bird mentioned in the Qur'an. \
         Represents intelligence, communication, courage, and responsibility.",
        "https://res.cloudinary.com/dntujhjkw/image/upload/v1770108363/Al-HudHud_oblb0w.png",
    ),
    (
        "An-Naml",
        "An-Naml (النمل): inspired by the ants mentioned in the Qur'an. \
         Symbolizes teamwork, awareness, humility, and care for the community.",
        "https://res.cloudinary.com/dntujhjkw/image/upload/v1770108363/An-Naml_hqfrmx.png",
    ),
];

const CAPTAINS: &[(&str, &str, &str)] = &[
    ("Captain Ghuraab", "ghuraab", "Al-Ghuraab"),
    ("Captain Nahl", "nahl", "An-Nahl"),
    ("Captain Nun", "nun", "An-Nun"),
    ("Captain Adiyat", "adiyat", "Al-Adiyat"),
    ("Captain Hudhud", "hudhud", "Al-Hudhud"),
    ("Captain Naml", "naml", "An-Naml"),
];

const ANNOUNCEMENTS: &[(&str, &str)] = &[
    ("Welcome Announcement", "Welcome to the new house season!"),
    ("Training Session", "House training will begin this Friday."),
    ("Team Reminder", "Remember to wear house shirts every Monday."),
];

const MEMBERS: &[(&str, &str)] = &[
    ("Ahmad", "Al-Ghuraab"),
    ("Fatimah", "Al-Ghuraab"),
    ("Ali", "An-Nahl"),
    ("Amina", "An-Nahl"),
    ("Umar", "An-Nun"),
    ("Khadijah", "An-Nun"),
    ("Hasan", "Al-Adiyat"),
    ("Husain", "Al-Adiyat"),
    ("Bilal", "Al-Hudhud"),
    ("Zainab", "Al-Hudhud"),
    ("Yasir", "An-Naml"),
    ("Maryam", "An-Naml"),
];

const ACHIEVEMENTS: &[(&str, &str)] = &[
    ("Cleanest House", "Maintained the cleanest environment"),
    ("Best Teamwork", "Excellent collaboration among members"),
    ("Top Discipline", "Outstanding discipline and conduct"),
];

/// Insert whatever part of the mock data set is missing.
///
/// Returns the number of rows written.
pub fn seed(store: &Store) -> Result<usize> {
    let mut inserted = 0;

    let mut houses = lock(&store.houses, "houses")?;
    for &(name, description, logo) in HOUSES {
        if houses.find(|h| h.name == name).is_none() {
            houses.insert(|id| House {
                id,
                name: name.to_string(),
                description: Some(description.to_string()),
                logo_url: Some(logo.to_string()),
            })?;
            inserted += 1;
        }
    }
    let house_id_of = |name: &str| {
        houses
            .find(|h| h.name == name)
            .map(|h| h.id)
            .ok_or_else(|| anyhow::anyhow!("house {} missing after seeding", name))
    };

    let mut captains = lock(&store.captains, "captains")?;
    for &(name, username, house) in CAPTAINS {
        if captains.find(|c| c.username == username).is_none() {
            let house_id = house_id_of(house)?;
            captains.insert(|id| Captain {
                id,
                name: name.to_string(),
                username: username.to_string(),
                house_id,
            })?;
            inserted += 1;
        }
    }

    let mut members = lock(&store.members, "members")?;
    for &(name, house) in MEMBERS {
        let house_id = house_id_of(house)?;
        if members.find(|m| m.name == name && m.house_id == house_id).is_none() {
            members.insert(|id| Member {
                id,
                name: name.to_string(),
                role: "Member".to_string(),
                house_id,
            })?;
            inserted += 1;
        }
    }

    let mut achievements = lock(&store.achievements, "achievements")?;
    for house in houses.rows() {
        for &(name, description) in ACHIEVEMENTS {
            if achievements.find(|a| a.name == name && a.house_id == house.id).is_none() {
                achievements.insert(|id| Achievement {
                    id,
                    name: name.to_string(),
                    description: Some(description.to_string()),
                    house_id: house.id,
                })?;
                inserted += 1;
            }
        }
    }

    let mut announcements = lock(&store.announcements, "announcements")?;
    for captain in captains.rows() {
        for &(title, content) in ANNOUNCEMENTS {
            if announcements.find(|a| a.title == title && a.captain_id == captain.id).is_none() {
                announcements.insert(|id| Announcement {
                    id,
                    title: title.to_string(),
                    content: content.to_string(),
                    image_url: None,
                    created_at: Utc::now(),
                    house_id: captain.house_id,
                    captain_id: captain.id,
                })?;
                inserted += 1;
            }
        }
    }

    tracing::info!(inserted, dir = ?store.data_dir(), "seeding finished");
    Ok(inserted)
}
