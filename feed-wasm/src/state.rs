use feed_core::{Pager, Post};
use leptos::prelude::*;

/// Состояние страницы ленты. Сигналы живут, пока смонтирован компонент.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FeedState {
    pub(crate) pager: RwSignal<Pager<Post>>,
    pub(crate) error: RwSignal<Option<String>>,
}

impl FeedState {
    pub(crate) fn new() -> Self {
        Self {
            pager: RwSignal::new(Pager::new()),
            error: RwSignal::new(None),
        }
    }

    pub(crate) fn set_error(&self, message: impl Into<String>) {
        // компонент мог быть уже размонтирован
        let _ = self.error.try_set(Some(message.into()));
    }

    pub(crate) fn clear_error(&self) {
        let _ = self.error.try_set(None);
    }

    pub(crate) fn len(&self) -> usize {
        self.pager.with(|pager| pager.view().len())
    }

    /// Загруженный пост не меняется, поэтому чтение без подписки.
    pub(crate) fn post_at(&self, index: usize) -> Option<Post> {
        self.pager
            .try_with_untracked(|pager| pager.view().get(index).cloned())
            .flatten()
    }

    pub(crate) fn can_load_more(&self) -> bool {
        self.pager
            .with(|pager| !pager.is_loading() && !pager.is_exhausted())
    }

    /// Можно ли выдать запрос прямо сейчас. Не подписывает и не уведомляет.
    pub(crate) fn is_idle_untracked(&self) -> bool {
        self.pager
            .try_with_untracked(Pager::can_request)
            .unwrap_or(false)
    }
}

/// Переход на другую страницу (полная перезагрузка, как после входа/выхода).
pub(crate) fn navigate(path: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href(path);
    }
}

/// Текущий путь страницы.
pub(crate) fn current_path() -> String {
    web_sys::window()
        .and_then(|window| window.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}
