//! Natural-key matching of search results.
//!
//! Apollo search is fuzzy, so results are filtered down to an exact
//! (case-insensitive, trimmed) key match before a record is treated as
//! the same entity.

/// First item whose key equals `key`, ignoring case and surrounding whitespace.
///
/// # Example
///
/// ```
/// use attio_apollo_sync::matching::find_exact;
///
/// let names = vec!["Acme Inc", "acme"];
/// assert_eq!(find_exact(&names, |n| Some(n.to_string()), " ACME "), Some(&"acme"));
/// ```
pub fn find_exact<'a, T, F>(items: &'a [T], key_fn: F, key: &str) -> Option<&'a T>
where
    F: Fn(&T) -> Option<String>,
{
    let wanted = key.trim().to_lowercase();
    if wanted.is_empty() {
        return None;
    }
    items.iter().find(|item| {
        key_fn(item)
            .map(|candidate| candidate.trim().to_lowercase() == wanted)
            .unwrap_or(false)
    })
}

/// Reduce a domain or website URL to its bare host.
///
/// `https://www.Acme.com/about` -> `acme.com`
pub fn normalize_domain(raw: &str) -> Option<String> {
    let lowered = raw.trim().to_lowercase();
    let without_scheme = lowered
        .strip_prefix("https://")
        .or_else(|| lowered.strip_prefix("http://"))
        .unwrap_or(&lowered);
    let host = without_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    let host = host.strip_prefix("www.").unwrap_or(host);

    if host.is_empty() {
        None
    } else {
        Some(host.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Item {
        id: u32,
        email: Option<&'static str>,
    }

    #[test]
    fn test_find_exact_ignores_case_and_whitespace() {
        let items = vec![
            Item { id: 1, email: Some("other@example.com") },
            Item { id: 2, email: None },
            Item { id: 3, email: Some(" Ada@Example.com") },
        ];
        let found = find_exact(&items, |i| i.email.map(String::from), "ada@example.com");
        assert_eq!(found.map(|i| i.id), Some(3));
    }

    #[test]
    fn test_find_exact_requires_full_match() {
        let items = vec!["Acme Corporation"];
        assert_eq!(find_exact(&items, |n| Some(n.to_string()), "Acme"), None);
        assert_eq!(find_exact(&items, |n| Some(n.to_string()), "  "), None);
    }

    #[test]
    fn test_normalize_domain() {
        assert_eq!(normalize_domain("https://www.Acme.com/").as_deref(), Some("acme.com"));
        assert_eq!(normalize_domain("acme.com").as_deref(), Some("acme.com"));
        assert_eq!(normalize_domain("http://sub.acme.io/path?x=1").as_deref(), Some("sub.acme.io"));
        assert_eq!(normalize_domain(" "), None);
    }
}
