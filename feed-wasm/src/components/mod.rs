pub(crate) mod feed_panel;
pub(crate) mod login_panel;
pub(crate) mod post_card;
