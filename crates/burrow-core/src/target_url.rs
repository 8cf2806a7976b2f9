use regex::Regex;
use std::sync::LazyLock;

/// Accepted shape of a URL submitted for shortening.
///
/// Lowercase `http`/`https` scheme, then a restricted character class. The
/// last character may not be one of `?`, `!`, `:`, `,`, `.` or `;`.
static TARGET_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://[\-A-Za-z0-9+&@#/%?=~_|!:,.;]*[\-A-Za-z0-9+&@#/%=~_|]$")
        .expect("target url pattern is valid")
});

/// Returns `true` if `url` may be stored as the target of a short code.
pub fn is_valid_target_url(url: &str) -> bool {
    !url.is_empty() && TARGET_URL.is_match(url)
}
