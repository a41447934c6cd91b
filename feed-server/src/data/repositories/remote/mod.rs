pub(crate) mod feed_repository;
