use leptos::*;

use crate::api;

#[component]
pub fn Announcement() -> impl IntoView {
    let announcements = create_local_resource(
        || (),
        |_| async { api::fetch_announcements().await.map_err(|e| e.to_string()) },
    );

    view! {
        <h2>"Announcements"</h2>
        <Suspense fallback=move || view! { <p>"Loading announcements..."</p> }>
            {move || {
                announcements
                    .get()
                    .map(|result| match result {
                        Ok(list) if list.is_empty() => {
                            view! { <p>"No announcements yet."</p> }.into_view()
                        }
                        Ok(list) => {
                            list.into_iter()
                                .map(|ann| {
                                    let date = ann.date().to_string();
                                    view! {
                                        <article class="announcement">
                                            <h3>{ann.title}</h3>
                                            <p class="meta">
                                                {ann.house.name} " · " {ann.captain.name} " · " {date}
                                            </p>
                                            {ann.image_url.map(|src| view! { <img src=src alt=""/> })}
                                            <p>{ann.content}</p>
                                        </article>
                                    }
                                })
                                .collect_view()
                        }
                        Err(e) => {
                            log::error!("failed to load announcements: {e}");
                            view! { <p class="error">"Could not load announcements."</p> }
                                .into_view()
                        }
                    })
            }}
        </Suspense>
    }
}
