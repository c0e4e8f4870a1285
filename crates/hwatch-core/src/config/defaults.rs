pub(super) const DEFAULT_ENDPOINT: &str =
    "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub(super) const DEFAULT_TELEGRAM_API: &str = "https://api.telegram.org";

pub(super) fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}
pub(super) fn default_retry_period() -> u64 {
    600
}
pub(super) fn default_request_timeout() -> u64 {
    30
}
pub(super) fn default_log_level() -> String {
    "info".to_string()
}
pub(super) fn default_telegram_api() -> String {
    DEFAULT_TELEGRAM_API.to_string()
}
