use leptos::*;
use leptos_router::*;

use crate::navbar::Navbar;
use crate::pages::{Announcement, HomePage, LiveScores};
use crate::routes::{render_shell, Page, RouteContext};

#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <Navbar/>
            <main>
                <RouteSlot/>
            </main>
        </Router>
    }
}

/// Mounts the page matching the current location, or nothing.
#[component]
fn RouteSlot() -> impl IntoView {
    let location = use_location();
    let page = create_memo(move |_| {
        let ctx = RouteContext::new(location.pathname.get());
        render_shell(&ctx).page
    });

    move || match page.get() {
        Some(Page::Home) => view! { <HomePage/> }.into_view(),
        Some(Page::LiveScores) => view! { <LiveScores/> }.into_view(),
        Some(Page::Announcement) => view! { <Announcement/> }.into_view(),
        None => {
            log::debug!("no route for {}", location.pathname.get_untracked());
            View::default()
        }
    }
}
