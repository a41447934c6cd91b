pub(crate) mod feed_repository;
pub(crate) mod repositories;
