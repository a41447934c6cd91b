use leptos::prelude::*;

use crate::components::feed_panel::FeedPanel;
use crate::components::login_panel::LoginPanel;
use crate::state::current_path;

/// Корневой компонент: сервер отдаёт одну и ту же оболочку для `/` и `/login`,
/// здесь выбирается нужная страница.
#[component]
pub fn App() -> impl IntoView {
    let on_login_page = current_path().trim_end_matches('/') == "/login";

    view! {
        <main class="page">
            {if on_login_page {
                view! { <LoginPanel /> }.into_any()
            } else {
                view! { <FeedPanel /> }.into_any()
            }}
        </main>
    }
}
