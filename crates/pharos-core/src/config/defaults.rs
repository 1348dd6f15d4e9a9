pub(super) fn default_base_url() -> String {
    "https://www.pharos-insights.com".to_string()
}
pub(super) fn default_log_level() -> String {
    "info".to_string()
}
pub(super) fn default_true() -> bool {
    true
}
pub(super) fn default_dataset() -> String {
    "production".to_string()
}
pub(super) fn default_api_version() -> String {
    "2024-01-01".to_string()
}
pub(super) fn default_timeout_secs() -> u64 {
    10
}
pub(super) fn default_list_limit() -> usize {
    50
}
pub(super) fn default_latest_limit() -> usize {
    3
}
