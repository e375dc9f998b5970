//! URL handling module for tagcounter
//!
//! A canonical site is a scheme-less host string such as `google.com`. Every
//! fetch URL and every cache key is derived from it the same way, so the two
//! can never drift apart.

mod domain;

pub use domain::host_label;

use url::Url;

/// Builds the full URL used both for the request and as the cache key
///
/// The site is trimmed, then wrapped as `http://<site>/`.
///
/// # Examples
///
/// ```
/// use tagcounter::url::full_url_for;
///
/// assert_eq!(full_url_for("google.com"), "http://google.com/");
/// assert_eq!(full_url_for("  google.com\n"), "http://google.com/");
/// ```
pub fn full_url_for(site: &str) -> String {
    format!("http://{}/", site.trim())
}

/// Parses the full URL for a site, rejecting anything without a usable host
///
/// Returns `None` for inputs like `""` or `"a b"` that do not survive as
/// `http://<site>/`.
pub fn parse_site_url(site: &str) -> Option<Url> {
    let site = site.trim();
    if site.is_empty() {
        return None;
    }

    let url = Url::parse(&full_url_for(site)).ok()?;
    match url.host_str() {
        Some(host) if !host.is_empty() => Some(url),
        _ => None,
    }
}
