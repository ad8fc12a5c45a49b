use std::sync::LazyLock;

use regex::Regex;

static UNDERSCORES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[_]").unwrap());
static UNSAFE_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9- ]").unwrap());
static SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" +").unwrap());

/// Normalizes a category key so `Milk_Tea`, `milk tea` and ` MILK  TEA ` compare equal.
pub fn sanitize(input: &str) -> String {
    let s = UNDERSCORES.replace_all(input, " ");
    let s = UNSAFE_CHARS.replace_all(&s, "");

    SPACES.replace_all(s.trim(), " ").to_lowercase()
}

pub fn same_category(left: &str, right: &str) -> bool {
    sanitize(left) == sanitize(right)
}
