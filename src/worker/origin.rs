//! Deciding whether an open window belongs to this application

use std::str::FromStr;

use anyhow::{Error, anyhow};
use http::Uri;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OriginPolicy {
    /// Scheme, host and port must all be equal.
    #[default]
    Exact,
    /// The window URL only has to contain the origin string. Matches
    /// windows whose query string mentions the origin.
    Substring,
}

impl FromStr for OriginPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" => Ok(Self::Exact),
            "substring" => Ok(Self::Substring),
            other => Err(anyhow!("Unknown origin match policy \"{}\"", other)),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Origin {
    scheme: String,
    host: String,
    port: u16,
}

impl Origin {
    fn parse(url: &str) -> Option<Self> {
        let uri: Uri = url.parse().ok()?;
        let scheme = uri.scheme_str()?.to_ascii_lowercase();
        let host = uri.host()?.to_ascii_lowercase();
        let port = match uri.port_u16() {
            Some(port) => port,
            None => match scheme.as_str() {
                "http" => 80,
                "https" => 443,
                _ => return None,
            },
        };
        Some(Self { scheme, host, port })
    }
}

impl OriginPolicy {
    pub fn matches(&self, window_url: &str, origin: &str) -> bool {
        match self {
            Self::Substring => window_url.contains(origin),
            Self::Exact => match (Origin::parse(window_url), Origin::parse(origin)) {
                (Some(window), Some(origin)) => window == origin,
                _ => false,
            },
        }
    }
}

/// Resolve a navigation target the way a browser does for a window at
/// `origin`. Absolute URLs are returned unchanged.
pub fn resolve_url(origin: &str, target: &str) -> String {
    let is_absolute = target
        .parse::<Uri>()
        .map(|uri| uri.scheme().is_some())
        .unwrap_or(false);
    if is_absolute {
        return target.to_string();
    }

    let origin = origin.trim_end_matches('/');
    if target.starts_with('/') {
        format!("{}{}", origin, target)
    } else {
        format!("{}/{}", origin, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "https://app.cobrafacil.com.br";

    #[test]
    fn test_exact_matches_same_origin_paths() {
        let policy = OriginPolicy::Exact;
        assert!(policy.matches("https://app.cobrafacil.com.br/loans/42", ORIGIN));
        assert!(policy.matches("https://APP.cobrafacil.com.br:443/", ORIGIN));
    }

    #[test]
    fn test_exact_rejects_other_origins() {
        let policy = OriginPolicy::Exact;
        assert!(!policy.matches("http://app.cobrafacil.com.br/", ORIGIN));
        assert!(!policy.matches("https://app.cobrafacil.com.br:8443/", ORIGIN));
        assert!(!policy.matches(
            "https://evil.example/?next=https://app.cobrafacil.com.br",
            ORIGIN
        ));
        assert!(!policy.matches("not a url", ORIGIN));
    }

    #[test]
    fn test_substring_matches_query_mentions() {
        let policy = OriginPolicy::Substring;
        assert!(policy.matches(
            "https://evil.example/?next=https://app.cobrafacil.com.br",
            ORIGIN
        ));
        assert!(!policy.matches("https://other.example/", ORIGIN));
    }

    #[test]
    fn test_parse_policy() {
        assert_eq!("exact".parse::<OriginPolicy>().unwrap(), OriginPolicy::Exact);
        assert_eq!(
            " Substring ".parse::<OriginPolicy>().unwrap(),
            OriginPolicy::Substring
        );
        assert!("prefix".parse::<OriginPolicy>().is_err());
    }

    #[test]
    fn test_resolve_relative_targets() {
        assert_eq!(
            resolve_url(ORIGIN, "/loans/42"),
            "https://app.cobrafacil.com.br/loans/42"
        );
        assert_eq!(
            resolve_url("https://app.cobrafacil.com.br/", "clients"),
            "https://app.cobrafacil.com.br/clients"
        );
    }

    #[test]
    fn test_resolve_keeps_absolute_targets() {
        assert_eq!(
            resolve_url(ORIGIN, "https://docs.example/help"),
            "https://docs.example/help"
        );
    }

    #[test]
    fn test_resolved_target_still_matches_origin() {
        let resolved = resolve_url(ORIGIN, "/loans/42");
        assert!(OriginPolicy::Exact.matches(&resolved, ORIGIN));
    }
}
