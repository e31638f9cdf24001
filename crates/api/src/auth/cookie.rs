//! The `auth-token` session cookie.
//!
//! Cookies are parsed and written by hand from the raw `Cookie` /
//! `Set-Cookie` headers, the same way the bearer token is read from
//! `Authorization`.

use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::header::InvalidHeaderValue;
use axum::http::{HeaderMap, HeaderValue};

/// Name of the cookie carrying the session token.
pub const AUTH_COOKIE: &str = "auth-token";

/// Return the value of cookie `name` from the request's `Cookie` headers.
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"'))
        .filter(|value| !value.is_empty())
}

/// Extract the session token: the `auth-token` cookie first, then an
/// `Authorization: Bearer` header.
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    read_cookie(headers, AUTH_COOKIE).or_else(|| {
        headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
    })
}

/// `Set-Cookie` value that stores `token` for `max_age_secs`.
pub fn session_cookie(
    token: &str,
    max_age_secs: i64,
    secure: bool,
) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut cookie =
        format!("{AUTH_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}");
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

/// `Set-Cookie` value that expires the session cookie immediately.
pub fn clear_cookie(secure: bool) -> HeaderValue {
    if secure {
        HeaderValue::from_static(
            "auth-token=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0; Secure",
        )
    } else {
        HeaderValue::from_static("auth-token=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn reads_named_cookie_among_others() {
        let map = headers(&[("cookie", "theme=dark; auth-token=abc.def.ghi; lang=en")]);
        assert_eq!(read_cookie(&map, AUTH_COOKIE), Some("abc.def.ghi"));
        assert_eq!(read_cookie(&map, "lang"), Some("en"));
        assert_eq!(read_cookie(&map, "missing"), None);
    }

    #[test]
    fn reads_across_multiple_cookie_headers() {
        let map = headers(&[("cookie", "a=1"), ("cookie", "auth-token=tok")]);
        assert_eq!(read_cookie(&map, AUTH_COOKIE), Some("tok"));
    }

    #[test]
    fn empty_cookie_value_counts_as_absent() {
        let map = headers(&[("cookie", "auth-token=")]);
        assert_eq!(session_token(&map), None);
    }

    #[test]
    fn cookie_wins_over_bearer_header() {
        let map = headers(&[
            ("cookie", "auth-token=from-cookie"),
            ("authorization", "Bearer from-header"),
        ]);
        assert_eq!(session_token(&map), Some("from-cookie"));

        let map = headers(&[("authorization", "Bearer from-header")]);
        assert_eq!(session_token(&map), Some("from-header"));

        let map = headers(&[("authorization", "Basic dXNlcjpwYXNz")]);
        assert_eq!(session_token(&map), None);
    }

    #[test]
    fn session_cookie_attributes() {
        let value = session_cookie("tok", 3600, false).unwrap();
        let s = value.to_str().unwrap();
        assert!(s.starts_with("auth-token=tok;"));
        assert!(s.contains("HttpOnly"));
        assert!(s.contains("SameSite=Lax"));
        assert!(s.contains("Path=/"));
        assert!(s.contains("Max-Age=3600"));
        assert!(!s.contains("Secure"));

        assert!(session_cookie("tok", 1, true).unwrap().to_str().unwrap().ends_with("; Secure"));
    }

    #[test]
    fn clear_cookie_expires_immediately() {
        let s = clear_cookie(true);
        assert!(s.to_str().unwrap().contains("Max-Age=0"));
        assert!(s.to_str().unwrap().contains("Secure"));
    }
}
