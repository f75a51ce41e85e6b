pub(crate) mod carousel_form;
pub(crate) mod notice;
pub(crate) mod post_form;
pub(crate) mod post_list;
