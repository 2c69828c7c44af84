pub(crate) mod post_repository;
