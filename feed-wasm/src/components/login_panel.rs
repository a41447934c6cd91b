use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::form::validate_login_fields;
use crate::state::navigate;

#[component]
pub(crate) fn LoginPanel() -> impl IntoView {
    let user_id = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let submitting = RwSignal::new(false);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();

        let id = user_id.get().trim().to_string();
        let pass = password.get();
        if let Err(message) = validate_login_fields(&id, &pass) {
            error.set(Some(message.to_string()));
            return;
        }

        error.set(None);
        submitting.set(true);
        spawn_local(async move {
            match api::login(&id, &pass).await {
                Ok(()) => navigate("/"),
                Err(err) => {
                    let _ = error.try_set(Some(err.to_string()));
                }
            }
            let _ = submitting.try_set(false);
        });
    };

    view! {
        <section class="login">
            <h1>"Pill City"</h1>
            <form on:submit=on_submit>
                <input
                    placeholder="User ID"
                    prop:value=move || user_id.get()
                    on:input=move |ev| user_id.set(event_target_value(&ev))
                />
                <input
                    placeholder="Password"
                    type="password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <button type="submit" disabled=move || submitting.get()>"Sign in"</button>
            </form>
            <Show when=move || error.get().is_some()>
                <div class="error-banner">{move || error.get().unwrap_or_default()}</div>
            </Show>
        </section>
    }
}
