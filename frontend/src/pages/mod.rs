mod announcement;
mod home;
mod live_scores;

pub use announcement::Announcement;
pub use home::HomePage;
pub use live_scores::LiveScores;
