pub(crate) mod carousel;
pub(crate) mod error;
pub(crate) mod post;
