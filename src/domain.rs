//! Domain validation and admission
//!
//! Syntactic checks applied to every line a tool prints before it may join
//! the accumulated result set.

use std::sync::LazyLock;

use regex::Regex;

/// Labels of word characters, `-` or `*`, each followed by a dot, then an alphabetic TLD.
/// `\w` is spelled out so that it stays ASCII-only.
static DOMAIN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Za-z0-9_*-]{1,63}\.)+[A-Za-z]{2,}$").expect("domain pattern is valid")
});

/// Whether `candidate` looks like a (sub)domain. Wildcard labels are accepted.
pub fn is_valid_domain(candidate: &str) -> bool {
    DOMAIN_REGEX.is_match(candidate)
}

/// Whether a tool line belongs to `target`'s result space.
///
/// Matching is a plain string suffix, not label-aware: `evilexample.com`
/// is admitted for `example.com`.
pub fn admits(candidate: &str, target: &str) -> bool {
    is_valid_domain(candidate) && candidate.ends_with(target)
}
