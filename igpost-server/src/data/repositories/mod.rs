pub(crate) mod json_log;
