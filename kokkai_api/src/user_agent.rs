/// User agent sent when the caller does not configure one.
pub fn default_user_agent() -> String {
    format!("kokkai-search/{}", env!("CARGO_PKG_VERSION"))
}
