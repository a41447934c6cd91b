//! Общая часть pill-feed: модели ленты, конверт ответов API,
//! постраничная загрузка по курсору и виртуальная последовательность страниц.
//!
//! Крейт не делает ввода-вывода и собирается как для хоста, так и для `wasm32`.

pub mod models;
pub mod pager;
pub mod time_ago;
pub mod virtual_seq;

pub use models::{
    ApiResponse, Author, CODE_LOGIN_FAILED, CODE_SUCCESS, CODE_UNAUTHORIZED, DEFAULT_AVATAR_URL,
    Post,
};
pub use pager::{
    CursorKey, FetchTicket, PageKey, PageRequest, PageSource, Pager, PagerState, Settled, page_key,
};
pub use time_ago::{time_ago, time_ago_now};
pub use virtual_seq::VirtualSeq;
