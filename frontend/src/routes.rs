//! Route table and the pure half of the application shell.
//!
//! The Leptos `App` component reads the current pathname from the router and
//! hands it to [`render_shell`]; everything that decides *what* is mounted
//! lives here so it can be exercised without a browser.

/// A page the shell can mount into its route slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    LiveScores,
    Announcement,
}

impl Page {
    /// Link text shown in the navigation bar.
    pub fn nav_label(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::LiveScores => "Leaderboard",
            Page::Announcement => "Announcements",
        }
    }
}

/// A registered `(pattern, page)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteEntry {
    pub path: &'static str,
    pub page: Page,
}

/// Matched in order, first match wins.
pub const ROUTES: &[RouteEntry] = &[
    RouteEntry { path: "/", page: Page::Home },
    RouteEntry { path: "/leaderboard", page: Page::LiveScores },
    RouteEntry { path: "/announcement", page: Page::Announcement },
];

/// Match a pathname against [`ROUTES`], ignoring ASCII case.
pub fn resolve(path: &str) -> Option<Page> {
    let path = normalize(path);
    ROUTES
        .iter()
        .find(|entry| entry.path.eq_ignore_ascii_case(path))
        .map(|entry| entry.page)
}

fn normalize(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = &path[..end];
    match path.strip_suffix('/') {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => path,
    }
}

/// The navigation state the shell renders from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteContext {
    pub path: String,
}

impl RouteContext {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// What the shell mounts for a given [`RouteContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellView {
    pub navbar: bool,
    pub page: Option<Page>,
}

impl ShellView {
    pub fn is_mounted(&self, page: Page) -> bool {
        self.page == Some(page)
    }
}

pub fn render_shell(ctx: &RouteContext) -> ShellView {
    ShellView {
        navbar: true,
        page: resolve(&ctx.path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_PAGES: [Page; 3] = [Page::Home, Page::LiveScores, Page::Announcement];

    fn assert_only(view: &ShellView, expected: Page) {
        assert!(view.navbar, "navbar must always be mounted");
        for page in ALL_PAGES {
            assert_eq!(view.is_mounted(page), page == expected, "{page:?}");
        }
    }

    #[test]
    fn root_mounts_home() {
        assert_only(&render_shell(&RouteContext::new("/")), Page::Home);
    }

    #[test]
    fn leaderboard_mounts_live_scores() {
        assert_only(&render_shell(&RouteContext::new("/leaderboard")), Page::LiveScores);
    }

    #[test]
    fn announcement_mounts_announcement() {
        assert_only(&render_shell(&RouteContext::new("/announcement")), Page::Announcement);
    }

    #[test]
    fn unknown_path_leaves_slot_empty() {
        let view = render_shell(&RouteContext::new("/unknown"));
        assert!(view.navbar);
        assert_eq!(view.page, None);
    }

    #[test]
    fn unregistered_paths_never_mount_a_page() {
        for path in [
            "",
            "/leaderboard/extra",
            "/announcements",
            "/home",
            "leaderboard",
        ] {
            let view = render_shell(&RouteContext::new(path));
            assert!(view.navbar, "{path}");
            assert_eq!(view.page, None, "{path}");
        }
    }

    #[test]
    fn letter_case_does_not_matter() {
        assert_eq!(resolve("/Leaderboard"), Some(Page::LiveScores));
        assert_eq!(resolve("/ANNOUNCEMENT/"), Some(Page::Announcement));
        assert_only(&render_shell(&RouteContext::new("/LeaderBoard")), Page::LiveScores);
    }

    #[test]
    fn trailing_slash_query_and_fragment_are_ignored() {
        assert_eq!(resolve("/leaderboard/"), Some(Page::LiveScores));
        assert_eq!(resolve("/announcement?page=2"), Some(Page::Announcement));
        assert_eq!(resolve("/#top"), Some(Page::Home));
    }

    #[test]
    fn table_is_literal_and_unique() {
        let paths: Vec<_> = ROUTES.iter().map(|r| r.path).collect();
        assert_eq!(paths, ["/", "/leaderboard", "/announcement"]);
        for page in ALL_PAGES {
            assert_eq!(ROUTES.iter().filter(|r| r.page == page).count(), 1);
        }
    }
}
