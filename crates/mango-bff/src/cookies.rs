use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use mango_types::{ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE, SCIENTIST_ID_COOKIE};
use time::Duration;

pub const ACCESS_TOKEN_MAX_AGE_SECS: i64 = 60 * 10;
pub const REFRESH_TOKEN_MAX_AGE_SECS: i64 = 60 * 60 * 24 * 7;

/// How session cookies are written. `secure` is on in production so cookies
/// only travel over HTTPS.
#[derive(Clone, Copy, Debug, Default)]
pub struct CookiePolicy {
    pub secure: bool,
}

impl CookiePolicy {
    fn build(&self, name: &'static str, value: String, maxAgeSecs: i64) -> Cookie<'static> {
        Cookie::build((name, value))
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .path("/")
            .max_age(Duration::seconds(maxAgeSecs))
            .build()
    }

    /// Cookies written after a successful login.
    pub fn session_cookies(
        &self,
        accessToken: String,
        refreshToken: String,
        scientistId: Option<String>,
    ) -> Vec<Cookie<'static>> {
        let mut cookies = vec![
            self.build(ACCESS_TOKEN_COOKIE, accessToken, ACCESS_TOKEN_MAX_AGE_SECS),
            self.build(REFRESH_TOKEN_COOKIE, refreshToken, REFRESH_TOKEN_MAX_AGE_SECS),
        ];
        if let Some(id) = scientistId {
            cookies.push(self.build(SCIENTIST_ID_COOKIE, id, REFRESH_TOKEN_MAX_AGE_SECS));
        }
        cookies
    }

    /// Removal cookies for every session cookie, for callers that write
    /// `Set-Cookie` headers themselves instead of going through a jar.
    pub fn expired_cookies(&self) -> Vec<Cookie<'static>> {
        [ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE, SCIENTIST_ID_COOKIE]
            .into_iter()
            .map(|name| {
                let mut cookie = self.build(name, String::new(), 0);
                cookie.make_removal();
                cookie
            })
            .collect()
    }

    pub fn grant(
        &self,
        jar: CookieJar,
        accessToken: String,
        refreshToken: String,
        scientistId: Option<String>,
    ) -> CookieJar {
        self.session_cookies(accessToken, refreshToken, scientistId)
            .into_iter()
            .fold(jar, |jar, cookie| jar.add(cookie))
    }

    pub fn clear(&self, jar: CookieJar) -> CookieJar {
        [ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE, SCIENTIST_ID_COOKIE]
            .into_iter()
            .fold(jar, |jar, name| jar.remove(Cookie::build(name).path("/")))
    }
}

pub fn access_token(jar: &CookieJar) -> Option<String> {
    cookie_value(jar, ACCESS_TOKEN_COOKIE)
}

pub fn refresh_token(jar: &CookieJar) -> Option<String> {
    cookie_value(jar, REFRESH_TOKEN_COOKIE)
}

pub fn scientist_id(jar: &CookieJar) -> Option<String> {
    cookie_value(jar, SCIENTIST_ID_COOKIE)
}

fn cookie_value(jar: &CookieJar, name: &str) -> Option<String> {
    jar.get(name)
        .map(|c| c.value().trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, HeaderMap, HeaderValue};

    #[test]
    fn grant_sets_http_only_cookies() {
        let jar = CookiePolicy { secure: true }.grant(
            CookieJar::new(),
            "acc".into(),
            "ref".into(),
            Some("42".into()),
        );

        let access = jar.get(ACCESS_TOKEN_COOKIE).unwrap();
        assert_eq!(access.value(), "acc");
        assert_eq!(access.http_only(), Some(true));
        assert_eq!(access.secure(), Some(true));
        assert_eq!(access.max_age(), Some(Duration::seconds(600)));

        let refresh = jar.get(REFRESH_TOKEN_COOKIE).unwrap();
        assert_eq!(refresh.max_age(), Some(Duration::days(7)));
        assert_eq!(scientist_id(&jar).as_deref(), Some("42"));
    }

    #[test]
    fn expired_cookies_are_removals() {
        let cookies = CookiePolicy::default().expired_cookies();
        assert_eq!(cookies.len(), 3);
        for cookie in cookies {
            assert_eq!(cookie.value(), "");
            assert_eq!(cookie.max_age(), Some(Duration::ZERO));
            assert_eq!(cookie.path(), Some("/"));
        }
    }

    #[test]
    fn blank_cookie_counts_as_missing() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("accessToken=; refreshToken=r1"),
        );
        let jar = CookieJar::from_headers(&headers);
        assert_eq!(access_token(&jar), None);
        assert_eq!(refresh_token(&jar).as_deref(), Some("r1"));
    }
}
