/// Extracts the host label stored alongside each fetch record
///
/// This is the part of the site before the first `.`, or the whole site when
/// it has no dot at all.
///
/// # Arguments
///
/// * `site` - The canonical site (e.g. `google.com`)
///
/// # Examples
///
/// ```
/// use tagcounter::url::host_label;
///
/// assert_eq!(host_label("google.com"), "google");
/// assert_eq!(host_label("news.ycombinator.com"), "news");
/// assert_eq!(host_label("localhost"), "localhost");
/// ```
pub fn host_label(site: &str) -> &str {
    let site = site.trim();
    match site.split_once('.') {
        Some((label, _)) => label,
        None => site,
    }
}
