//! Shared request plumbing for the domain modules.

use serde::Deserialize;

/// Raw pagination query parameters.
///
/// Kept as strings so malformed input falls back to defaults instead of
/// failing the request.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl PageParams {
    /// Resolve to `(page, limit)`, both at least 1. Absent, non-numeric, or
    /// non-positive input falls back to the defaults.
    pub fn resolve(&self, default_limit: u64) -> (u64, u64) {
        (
            parse_positive(self.page.as_deref(), 1),
            parse_positive(self.limit.as_deref(), default_limit),
        )
    }
}

fn parse_positive(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|value| value.parse::<u64>().ok())
        .filter(|&value| value >= 1)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: Option<&str>, limit: Option<&str>) -> PageParams {
        PageParams {
            page: page.map(str::to_string),
            limit: limit.map(str::to_string),
        }
    }

    #[test]
    fn absent_params_use_defaults() {
        assert_eq!(params(None, None).resolve(12), (1, 12));
    }

    #[test]
    fn numeric_params_are_used() {
        assert_eq!(params(Some("3"), Some("24")).resolve(12), (3, 24));
    }

    #[test]
    fn garbage_and_non_positive_fall_back() {
        assert_eq!(params(Some("abc"), Some("-1")).resolve(12), (1, 12));
        assert_eq!(params(Some("0"), Some("0")).resolve(12), (1, 12));
        assert_eq!(params(Some("2.5"), Some("")).resolve(12), (1, 12));
    }
}
