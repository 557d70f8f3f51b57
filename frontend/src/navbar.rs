use leptos::*;
use leptos_router::*;

use crate::routes::ROUTES;

/// Always mounted above the route slot.
#[component]
pub fn Navbar() -> impl IntoView {
    view! {
        <nav class="navbar">
            <span class="brand">"House Points"</span>
            <ul class="nav-links">
                {ROUTES
                    .iter()
                    .map(|entry| {
                        view! {
                            <li>
                                <A href=entry.path exact=true>
                                    {entry.page.nav_label()}
                                </A>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </nav>
    }
}
