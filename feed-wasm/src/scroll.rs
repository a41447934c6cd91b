/// Запас в пикселях до конца страницы, при котором грузится следующая страница.
pub(crate) const BOTTOM_THRESHOLD_PX: i64 = 5;

/// `true`, когда видимая область дошла до конца документа с учётом порога.
pub(crate) fn is_near_bottom(scroll_top: i32, client_height: i32, scroll_height: i32) -> bool {
    i64::from(scroll_top) + i64::from(client_height)
        >= i64::from(scroll_height) - BOTTOM_THRESHOLD_PX
}
