// src/expand.rs

//! Environment-variable expansion for the working directory, log path and
//! command string, following the usual shell-name rules:
//!
//! - `$NAME` takes the longest run of `[A-Za-z0-9_]` as the name
//! - `$` followed by one of `*#$@!?-` or a digit names that single character
//! - `${...}` uses everything up to the first `}` as the name
//! - an empty `${}` or an unclosed `${` is dropped
//! - any other `$` (including a trailing one) is kept as is
//!
//! Unset variables expand to nothing. Expansion happens once, before
//! tokenizing, so quotes in the command string do not protect a `$`.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

// Alternatives are tried left to right: braced, unclosed brace, special
// single character, plain name.
static VAR_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:\{([^}]*)\}|(\{)|([*#$@!?0-9-])|([A-Za-z0-9_]+))")
        .expect("variable reference pattern is valid")
});

/// Expand against the process environment.
pub fn expand_env(input: &str) -> String {
    expand_with(input, |name| std::env::var(name).ok())
}

/// Expand using `lookup` to resolve variable names.
pub fn expand_with<F>(input: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let expanded: Cow<'_, str> = VAR_REF.replace_all(input, |caps: &Captures<'_>| {
        if caps.get(2).is_some() {
            return String::new();
        }
        let name = caps
            .get(1)
            .or_else(|| caps.get(3))
            .or_else(|| caps.get(4))
            .map(|m| m.as_str())
            .unwrap_or_default();
        if name.is_empty() {
            return String::new();
        }
        lookup(name).unwrap_or_default()
    });
    expanded.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(name: &str) -> Option<String> {
        match name {
            "HOME" => Some("/home/dev".to_string()),
            "APP_DIR" => Some("/srv/app".to_string()),
            "SPACED" => Some("a b".to_string()),
            "5" => Some("FIVE".to_string()),
            "?" => Some("0".to_string()),
            "A-B" => Some("dashed".to_string()),
            _ => None,
        }
    }

    #[test]
    fn expands_bare_and_braced_names() {
        assert_eq!(expand_with("$HOME/logs", lookup), "/home/dev/logs");
        assert_eq!(expand_with("${APP_DIR}_old", lookup), "/srv/app_old");
    }

    #[test]
    fn unset_variables_expand_to_nothing() {
        assert_eq!(expand_with("a${MISSING}b $NOPE", lookup), "ab ");
    }

    #[test]
    fn bare_name_is_greedy() {
        assert_eq!(expand_with("$HOMEDIR", lookup), "");
    }

    #[test]
    fn digits_and_specials_are_single_character_names() {
        assert_eq!(expand_with("cost $5", lookup), "cost FIVE");
        assert_eq!(expand_with("$55", lookup), "FIVE5");
        assert_eq!(expand_with("status=$?", lookup), "status=0");
        assert_eq!(expand_with("$$ $* $#", lookup), "  ");
    }

    #[test]
    fn braces_take_any_name_up_to_the_closing_brace() {
        assert_eq!(expand_with("${A-B}", lookup), "dashed");
        assert_eq!(expand_with("${not a var}!", lookup), "!");
    }

    #[test]
    fn malformed_braces_are_dropped() {
        assert_eq!(expand_with("${not closed", lookup), "not closed");
        assert_eq!(expand_with("x${}y", lookup), "xy");
    }

    #[test]
    fn dollars_without_a_name_are_kept() {
        assert_eq!(expand_with("price: $ 10 and $", lookup), "price: $ 10 and $");
        assert_eq!(expand_with("50$%", lookup), "50$%");
    }

    #[test]
    fn expansion_happens_inside_quotes() {
        assert_eq!(expand_with("echo \"$SPACED\"", lookup), "echo \"a b\"");
    }

    #[test]
    fn text_without_references_is_unchanged() {
        assert_eq!(expand_with("ls -la /tmp", lookup), "ls -la /tmp");
    }
}
