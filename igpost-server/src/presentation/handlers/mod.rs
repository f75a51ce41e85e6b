pub(crate) mod carousel;
pub(crate) mod posts;
