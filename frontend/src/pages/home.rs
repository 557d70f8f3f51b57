use leptos::*;

use crate::api::{self, House};

#[component]
pub fn HomePage() -> impl IntoView {
    let houses = create_local_resource(
        || (),
        |_| async { api::fetch_houses().await.map_err(|e| e.to_string()) },
    );

    view! {
        <h2>"Houses"</h2>
        <Suspense fallback=move || view! { <p>"Loading houses..."</p> }>
            {move || {
                houses
                    .get()
                    .map(|result| match result {
                        Ok(list) => {
                            view! {
                                <div class="house-grid">
                                    <For each=move || list.clone() key=|h| h.id let:house>
                                        <HouseCard house=house/>
                                    </For>
                                </div>
                            }
                                .into_view()
                        }
                        Err(e) => {
                            log::error!("failed to load houses: {e}");
                            view! { <p class="error">"Could not load houses."</p> }.into_view()
                        }
                    })
            }}
        </Suspense>
    }
}

#[component]
fn HouseCard(house: House) -> impl IntoView {
    view! {
        <article class="house-card">
            {house.logo_url.map(|src| view! { <img class="house-logo" src=src alt=""/> })}
            <h3>{house.name}</h3>
            <p class="points">{house.points} " pts"</p>
            <p>{house.description.unwrap_or_default()}</p>
        </article>
    }
}
