//! Последовательная загрузка страниц по курсору.
//!
//! [`Pager`] владеет набором страниц и состоянием загрузки
//! (`Idle → Fetching → {Idle | Exhausted}`). Следующая страница запрашивается
//! по идентификатору последнего элемента предыдущей; пустая страница означает,
//! что данных больше нет, и новые запросы не выдаются.
//!
//! Сам `Pager` не делает ввода-вывода: [`Pager::request_next_page`] выдаёт
//! ключ и билет запроса, а результат возвращается через [`Pager::settle`].
//! Для асинхронного кода есть [`Pager::load_next`] поверх [`PageSource`].

use std::fmt;

use async_trait::async_trait;

use crate::virtual_seq::VirtualSeq;

/// Элемент страницы, по которому строится курсор продолжения.
pub trait CursorKey {
    fn cursor_key(&self) -> &str;
}

/// Ключ запроса страницы.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PageKey {
    /// Первая страница, без курсора.
    First,
    /// Страница после элемента с указанным идентификатором.
    After(String),
}

impl PageKey {
    /// Курсор продолжения, если это не первая страница.
    pub fn cursor(&self) -> Option<&str> {
        match self {
            Self::First => None,
            Self::After(id) => Some(id),
        }
    }
}

impl fmt::Display for PageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => f.write_str("first page"),
            Self::After(id) => write!(f, "page after {id}"),
        }
    }
}

/// Ключ страницы с номером `page_index` по результату предыдущей страницы.
///
/// - предыдущей страницы нет → [`PageKey::First`];
/// - предыдущая страница пустая → `None`, данные закончились;
/// - иначе → [`PageKey::After`] с идентификатором её последнего элемента.
pub fn page_key<T: CursorKey>(_page_index: usize, previous: Option<&[T]>) -> Option<PageKey> {
    match previous {
        None => Some(PageKey::First),
        Some(page) => page
            .last()
            .map(|item| PageKey::After(item.cursor_key().to_string())),
    }
}

/// Состояние загрузки.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerState {
    Idle,
    Fetching,
    Exhausted,
}

/// Билет выданного запроса; результат без подходящего билета отбрасывается.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    page_index: usize,
}

impl FetchTicket {
    pub fn page_index(&self) -> usize {
        self.page_index
    }
}

/// Запрос следующей страницы.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub key: PageKey,
    pub ticket: FetchTicket,
}

/// Чем закончился запрос страницы.
#[derive(Debug, PartialEq)]
pub enum Settled<E> {
    /// Страница добавлена в конец набора.
    Appended { page_index: usize, len: usize },
    /// Пришла пустая страница, больше запросов не будет.
    Exhausted,
    /// Запрос не удался, набор страниц и курсор не изменились.
    Failed(E),
    /// Результат устарел (был `reset` или `teardown`) и проигнорирован.
    Discarded,
}

/// Источник страниц для [`Pager::load_next`].
#[async_trait]
pub trait PageSource<T: Send>: Send + Sync {
    type Error: Send;

    async fn fetch_page(&self, key: &PageKey) -> Result<Vec<T>, Self::Error>;
}

/// Контроллер постраничной загрузки.
#[derive(Debug)]
pub struct Pager<T> {
    pages: Vec<Vec<T>>,
    state: PagerState,
    requested: usize,
    generation: u64,
    torn_down: bool,
}

impl<T> Default for Pager<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Pager<T> {
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            state: PagerState::Idle,
            requested: 0,
            generation: 0,
            torn_down: false,
        }
    }

    pub fn state(&self) -> PagerState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == PagerState::Fetching
    }

    pub fn is_exhausted(&self) -> bool {
        self.state == PagerState::Exhausted
    }

    /// Выдаст ли [`request_next_page`](Self::request_next_page) запрос.
    pub fn can_request(&self) -> bool {
        !self.torn_down && self.state == PagerState::Idle
    }

    /// Сколько страниц запрошено (загруженные плюс текущий запрос).
    pub fn requested_pages(&self) -> usize {
        self.requested
    }

    /// Загруженные страницы в порядке загрузки.
    pub fn pages(&self) -> &[Vec<T>] {
        &self.pages
    }

    /// Все загруженные элементы как одна последовательность.
    pub fn view(&self) -> VirtualSeq<'_, T> {
        VirtualSeq::new(&self.pages)
    }

    /// Выдаёт запрос следующей страницы и переводит контроллер в `Fetching`.
    ///
    /// `None`, если запрос уже выполняется, данные закончились или
    /// контроллер закрыт.
    pub fn request_next_page(&mut self) -> Option<PageRequest>
    where
        T: CursorKey,
    {
        if !self.can_request() {
            return None;
        }

        let page_index = self.pages.len();
        let Some(key) = page_key(page_index, self.pages.last().map(Vec::as_slice)) else {
            self.state = PagerState::Exhausted;
            return None;
        };

        self.state = PagerState::Fetching;
        self.requested += 1;

        Some(PageRequest {
            key,
            ticket: FetchTicket {
                generation: self.generation,
                page_index,
            },
        })
    }

    /// Принимает результат запроса, выданного [`request_next_page`](Self::request_next_page).
    pub fn settle<E>(&mut self, ticket: FetchTicket, result: Result<Vec<T>, E>) -> Settled<E> {
        if self.torn_down
            || ticket.generation != self.generation
            || ticket.page_index != self.pages.len()
            || self.state != PagerState::Fetching
        {
            return Settled::Discarded;
        }

        match result {
            Ok(page) if page.is_empty() => {
                self.state = PagerState::Exhausted;
                Settled::Exhausted
            }
            Ok(page) => {
                let len = page.len();
                self.pages.push(page);
                self.state = PagerState::Idle;
                Settled::Appended {
                    page_index: ticket.page_index,
                    len,
                }
            }
            Err(err) => {
                self.state = PagerState::Idle;
                self.requested -= 1;
                Settled::Failed(err)
            }
        }
    }

    /// Запрашивает, ждёт и принимает следующую страницу.
    ///
    /// `None`, если запрос сейчас выдать нельзя.
    pub async fn load_next<S>(&mut self, source: &S) -> Option<Settled<S::Error>>
    where
        T: CursorKey + Send,
        S: PageSource<T> + ?Sized,
    {
        let request = self.request_next_page()?;
        let result = source.fetch_page(&request.key).await;
        Some(self.settle(request.ticket, result))
    }

    /// Сбрасывает загруженные страницы; ответы на ранее выданные запросы
    /// будут отброшены.
    pub fn reset(&mut self) {
        self.pages.clear();
        self.state = PagerState::Idle;
        self.requested = 0;
        self.generation += 1;
    }

    /// Закрывает контроллер: новых запросов не будет, поздние ответы
    /// отбрасываются.
    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item(&'static str);

    impl CursorKey for Item {
        fn cursor_key(&self) -> &str {
            self.0
        }
    }

    #[derive(Clone, Default)]
    struct FakeSource {
        responses: Arc<Mutex<VecDeque<Result<Vec<Item>, String>>>>,
        keys: Arc<Mutex<Vec<PageKey>>>,
    }

    impl FakeSource {
        fn with(responses: Vec<Result<Vec<Item>, String>>) -> Self {
            Self {
                responses: Arc::new(Mutex::new(responses.into())),
                keys: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn keys(&self) -> Vec<PageKey> {
            self.keys.lock().expect("keys mutex poisoned").clone()
        }
    }

    #[async_trait]
    impl PageSource<Item> for FakeSource {
        type Error = String;

        async fn fetch_page(&self, key: &PageKey) -> Result<Vec<Item>, String> {
            self.keys.lock().expect("keys mutex poisoned").push(key.clone());
            self.responses
                .lock()
                .expect("responses mutex poisoned")
                .pop_front()
                .unwrap_or_else(|| Err("unexpected fetch".to_string()))
        }
    }

    #[test]
    fn page_key_for_first_page_has_no_cursor() {
        let key = page_key::<Item>(0, None).expect("first page must have a key");
        assert_eq!(key, PageKey::First);
        assert_eq!(key.cursor(), None);
    }

    #[test]
    fn page_key_without_previous_page_is_first_for_any_index() {
        assert_eq!(page_key::<Item>(2, None), Some(PageKey::First));
        assert_eq!(page_key::<Item>(usize::MAX, None), Some(PageKey::First));
    }

    #[test]
    fn page_key_uses_last_id_of_previous_page() {
        let previous = [Item("a"), Item("b"), Item("x")];
        let key = page_key(1, Some(&previous[..])).expect("key must exist");
        assert_eq!(key, PageKey::After("x".to_string()));
        assert_eq!(key.cursor(), Some("x"));
    }

    #[test]
    fn page_key_stops_after_empty_page() {
        let previous: [Item; 0] = [];
        assert_eq!(page_key(3, Some(&previous[..])), None);
    }

    #[test]
    fn only_one_request_in_flight() {
        let mut pager = Pager::<Item>::new();

        let first = pager.request_next_page().expect("first request");
        assert_eq!(first.key, PageKey::First);
        assert!(pager.is_loading());
        assert!(pager.request_next_page().is_none());
        assert_eq!(pager.requested_pages(), 1);

        let settled = pager.settle(first.ticket, Ok::<_, String>(vec![Item("a"), Item("b")]));
        assert_eq!(settled, Settled::Appended { page_index: 0, len: 2 });
        assert_eq!(pager.state(), PagerState::Idle);

        let second = pager.request_next_page().expect("second request");
        assert_eq!(second.key, PageKey::After("b".to_string()));
        assert_eq!(second.ticket.page_index(), 1);
    }

    #[test]
    fn can_request_tracks_state_without_issuing_requests() {
        let mut pager = Pager::<Item>::new();
        assert!(pager.can_request());

        let first = pager.request_next_page().expect("first request");
        assert!(!pager.can_request());
        assert!(!pager.can_request());
        assert_eq!(pager.requested_pages(), 1);

        pager.settle(first.ticket, Ok::<_, String>(vec![]));
        assert!(pager.is_exhausted());
        assert!(!pager.can_request());

        let mut closed = Pager::<Item>::new();
        closed.teardown();
        assert!(!closed.can_request());
        assert!(closed.request_next_page().is_none());
    }

    #[test]
    fn failure_keeps_pages_and_cursor() {
        let mut pager = Pager::<Item>::new();
        let first = pager.request_next_page().expect("first request");
        pager.settle(first.ticket, Ok::<_, String>(vec![Item("a")]));

        let second = pager.request_next_page().expect("second request");
        let settled = pager.settle(second.ticket, Err("boom".to_string()));
        assert_eq!(settled, Settled::Failed("boom".to_string()));
        assert_eq!(pager.pages().len(), 1);
        assert_eq!(pager.requested_pages(), 1);
        assert_eq!(pager.state(), PagerState::Idle);

        let retry = pager.request_next_page().expect("retry must be allowed");
        assert_eq!(retry.key, PageKey::After("a".to_string()));
    }

    #[test]
    fn empty_page_exhausts_forever() {
        let mut pager = Pager::<Item>::new();
        let first = pager.request_next_page().expect("first request");
        pager.settle(first.ticket, Ok::<_, String>(vec![Item("a")]));

        let second = pager.request_next_page().expect("second request");
        let settled = pager.settle(second.ticket, Ok::<_, String>(Vec::new()));
        assert_eq!(settled, Settled::Exhausted);
        assert!(pager.is_exhausted());
        assert_eq!(pager.pages().len(), 1);

        for _ in 0..3 {
            assert!(pager.request_next_page().is_none());
        }
    }

    #[test]
    fn empty_first_page_leaves_no_pages() {
        let mut pager = Pager::<Item>::new();
        let first = pager.request_next_page().expect("first request");
        assert_eq!(pager.settle(first.ticket, Ok::<_, String>(Vec::new())), Settled::Exhausted);
        assert!(pager.view().is_empty());
        assert!(pager.request_next_page().is_none());
    }

    #[test]
    fn reset_discards_stale_results() {
        let mut pager = Pager::<Item>::new();
        let stale = pager.request_next_page().expect("first request");

        pager.reset();
        let fresh = pager.request_next_page().expect("request after reset");

        assert_eq!(
            pager.settle(stale.ticket, Ok::<_, String>(vec![Item("old")])),
            Settled::Discarded
        );
        assert!(pager.is_loading());

        pager.settle(fresh.ticket, Ok::<_, String>(vec![Item("new")]));
        assert_eq!(pager.view().get(0), Some(&Item("new")));
    }

    #[test]
    fn teardown_discards_late_results_and_blocks_requests() {
        let mut pager = Pager::<Item>::new();
        let request = pager.request_next_page().expect("first request");

        pager.teardown();

        assert_eq!(
            pager.settle(request.ticket, Ok::<_, String>(vec![Item("late")])),
            Settled::Discarded
        );
        assert!(pager.pages().is_empty());
        assert!(pager.request_next_page().is_none());
    }

    #[tokio::test]
    async fn load_next_walks_cursor_until_exhaustion() {
        let source = FakeSource::with(vec![
            Ok(vec![Item("a"), Item("b")]),
            Ok(vec![Item("c")]),
            Ok(Vec::new()),
        ]);
        let mut pager = Pager::new();

        while let Some(settled) = pager.load_next(&source).await {
            assert!(!matches!(settled, Settled::Failed(_)));
        }

        assert_eq!(
            source.keys(),
            vec![
                PageKey::First,
                PageKey::After("b".to_string()),
                PageKey::After("c".to_string()),
            ]
        );

        let view = pager.view();
        assert_eq!(view.len(), 3);
        assert_eq!(view.get(1), Some(&Item("b")));
        assert_eq!(view.get(2), Some(&Item("c")));
        assert_eq!(view.get(3), None);

        assert!(pager.load_next(&source).await.is_none());
        assert_eq!(source.keys().len(), 3);
    }

    #[tokio::test]
    async fn load_next_retries_same_cursor_after_failure() {
        let source = FakeSource::with(vec![
            Ok(vec![Item("a")]),
            Err("upstream 500".to_string()),
            Ok(vec![Item("b")]),
        ]);
        let mut pager = Pager::new();

        pager.load_next(&source).await.expect("first load");
        let failed = pager.load_next(&source).await.expect("second load");
        assert_eq!(failed, Settled::Failed("upstream 500".to_string()));
        pager.load_next(&source).await.expect("retry");

        assert_eq!(
            source.keys(),
            vec![
                PageKey::First,
                PageKey::After("a".to_string()),
                PageKey::After("a".to_string()),
            ]
        );
        assert_eq!(pager.view().len(), 2);
    }
}
