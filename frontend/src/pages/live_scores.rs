use leptos::*;

use crate::api;

#[component]
pub fn LiveScores() -> impl IntoView {
    let (refresh, set_refresh) = create_signal(0_u32);
    let standings = create_local_resource(
        move || refresh.get(),
        |_| async { api::fetch_live_points().await.map_err(|e| e.to_string()) },
    );

    view! {
        <h2>"Leaderboard"</h2>
        <button on:click=move |_| set_refresh.update(|n| *n += 1)>"Refresh"</button>
        <Transition fallback=move || view! { <p>"Loading scores..."</p> }>
            {move || {
                standings
                    .get()
                    .map(|result| match result {
                        Ok(rows) => {
                            view! {
                                <table class="leaderboard">
                                    <thead>
                                        <tr>
                                            <th>"#"</th>
                                            <th>"House"</th>
                                            <th>"Points"</th>
                                        </tr>
                                    </thead>
                                    <tbody>
                                        <For each=move || rows.clone() key=|row| row.rank let:row>
                                            <tr>
                                                <td>{row.rank}</td>
                                                <td>{row.name}</td>
                                                <td>{row.points}</td>
                                            </tr>
                                        </For>
                                    </tbody>
                                </table>
                            }
                                .into_view()
                        }
                        Err(e) => {
                            log::error!("failed to load live points: {e}");
                            view! { <p class="error">"Could not load scores."</p> }.into_view()
                        }
                    })
            }}
        </Transition>
    }
}
