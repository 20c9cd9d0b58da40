pub mod i18n;
pub mod request_logger;
