use url::Url;

/// Last non-empty segment of a URL's path, ignoring query and fragment.
/// Relative links are split by hand.
pub fn last_path_segment(url: &str) -> String {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url.split(['?', '#']).next().unwrap_or("").to_string(),
    };
    path.split('/')
        .filter(|s| !s.is_empty())
        .next_back()
        .unwrap_or("")
        .to_string()
}

/// Convert free text into a feed id: lower-case, every run of characters
/// outside `[a-z0-9]` becomes one `-`, no leading or trailing `-`
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Collapse whitespace runs (including non-breaking spaces) to single spaces and trim
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Resolve a possibly relative link against the page it was found on.
/// Links that cannot be resolved are returned unchanged.
pub fn resolve_url(base: &str, link: &str) -> String {
    match Url::parse(base).and_then(|base| base.join(link)) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => link.to_string(),
    }
}
