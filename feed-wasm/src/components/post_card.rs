use feed_core::{Post, time_ago_now};
use leptos::prelude::*;

#[component]
pub(crate) fn PostCard(post: Post) -> impl IntoView {
    let avatar = post.avatar_or_default().to_string();
    let posted = time_ago_now(post.created_at_seconds);
    let media = post.media_urls.clone();

    view! {
        <article class="post">
            <header class="post-header">
                <img class="post-avatar" src=avatar alt="" />
                <strong class="post-author">{post.author.id.clone()}</strong>
                <span class="post-time">{posted}</span>
            </header>
            <p class="post-content">{post.content.clone()}</p>
            <div class="post-media">
                {media
                    .into_iter()
                    .map(|url| view! { <img class="post-image" src=url alt="" /> })
                    .collect_view()}
            </div>
        </article>
    }
}
