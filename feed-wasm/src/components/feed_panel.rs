use feed_core::Settled;
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, FetchError};
use crate::components::post_card::PostCard;
use crate::scroll::is_near_bottom;
use crate::state::{FeedState, navigate};

fn near_bottom() -> bool {
    let Some(element) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.document_element())
    else {
        return false;
    };
    is_near_bottom(
        element.scroll_top(),
        element.client_height(),
        element.scroll_height(),
    )
}

/// Выдаёт запрос следующей страницы, если контроллер свободен.
///
/// Ответ, пришедший после размонтирования, отбрасывается: `try_update`
/// на освобождённом сигнале ничего не делает.
fn load_more(state: FeedState) {
    // без уведомления подписчиков, пока запрос выдать нельзя
    if !state.is_idle_untracked() {
        return;
    }
    let Some(request) = state
        .pager
        .try_update(|pager| pager.request_next_page())
        .flatten()
    else {
        return;
    };

    state.clear_error();
    let from = request.key.cursor().map(str::to_string);
    spawn_local(async move {
        let result = api::list_posts(from.as_deref()).await;
        match state
            .pager
            .try_update(|pager| pager.settle(request.ticket, result))
        {
            Some(Settled::Failed(FetchError::Unauthorized)) => navigate("/login"),
            Some(Settled::Failed(err)) => state.set_error(err.to_string()),
            _ => {}
        }
    });
}

#[component]
pub(crate) fn FeedPanel() -> impl IntoView {
    let state = FeedState::new();

    let scroll_handle = window_event_listener(ev::scroll, move |_| {
        if near_bottom() {
            load_more(state);
        }
    });
    on_cleanup(move || {
        scroll_handle.remove();
        let _ = state.pager.try_update(|pager| pager.teardown());
    });

    load_more(state);

    let len = Memo::new(move |_| state.len());

    let on_logout = move |_| {
        spawn_local(async move {
            match api::logout().await {
                Ok(()) => navigate("/login"),
                Err(err) => state.set_error(err.to_string()),
            }
        });
    };

    view! {
        <section class="feed">
            <header class="feed-header">
                <h1>"Pill City"</h1>
                <button on:click=on_logout>"Sign out"</button>
            </header>

            <For
                each=move || 0..len.get()
                key=|index| *index
                children=move |index| {
                    state.post_at(index).map(|post| view! { <PostCard post=post /> })
                }
            />

            <Show when=move || state.error.get().is_some()>
                <div class="error-banner">
                    {move || state.error.get().unwrap_or_default()}
                    <button on:click=move |_| load_more(state)>"Retry"</button>
                </div>
            </Show>

            <Show when=move || state.pager.with(|pager| pager.is_loading())>
                <div class="feed-loading">"Loading…"</div>
            </Show>

            <Show when=move || state.can_load_more() && state.error.get().is_none()>
                <button class="feed-more" on:click=move |_| load_more(state)>"Load more"</button>
            </Show>

            <Show when=move || state.pager.with(|pager| pager.is_exhausted())>
                <div class="feed-end">"No more posts"</div>
            </Show>
        </section>
    }
}
