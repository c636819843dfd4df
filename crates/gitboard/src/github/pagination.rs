//! Link-header pagination for GitHub list endpoints.

use url::Url;

/// What a `Link` response header says about the remaining pages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkPagination {
    /// Absolute URL of the page to request next.
    pub next_url: Option<String>,
    /// Page number of the `rel="last"` target.
    pub last_page: Option<u32>,
}

impl LinkPagination {
    /// Page count, when GitHub advertised a last page.
    pub fn total_pages(&self) -> Option<u32> {
        self.last_page
    }
}

/// Split one `<target>; param; param` entry into its target and rel types.
fn parse_link_value(entry: &str) -> Option<(&str, Vec<&str>)> {
    let (target, params) = entry.trim().split_once(';')?;
    let target = target.trim().strip_prefix('<')?.strip_suffix('>')?;

    let rels = params
        .split(';')
        .filter_map(|param| {
            let (key, value) = param.split_once('=')?;
            key.trim()
                .eq_ignore_ascii_case("rel")
                .then(|| value.trim().trim_matches('"'))
        })
        .flat_map(str::split_whitespace)
        .collect();

    Some((target, rels))
}

/// Parse GitHub's `Link` header.
///
/// The header looks like
/// `<https://api.github.com/user/starred?per_page=100&page=2>; rel="next", <...&page=3>; rel="last"`.
/// Entries that do not parse are skipped.
pub fn parse_link_header(link_header: &str) -> LinkPagination {
    link_header
        .split(',')
        .filter_map(parse_link_value)
        .fold(LinkPagination::default(), |mut info, (target, rels)| {
            if rels.contains(&"next") {
                info.next_url = Some(target.to_string());
            }
            if rels.contains(&"last") {
                info.last_page = page_number(target);
            }
            info
        })
}

/// The `page` query parameter of `target`.
fn page_number(target: &str) -> Option<u32> {
    let url = Url::parse(target).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_next_and_last() {
        let header = r#"<https://api.github.com/user/starred?per_page=100&page=2>; rel="next", <https://api.github.com/user/starred?per_page=100&page=7>; rel="last""#;
        let info = parse_link_header(header);

        assert_eq!(
            info.next_url.as_deref(),
            Some("https://api.github.com/user/starred?per_page=100&page=2")
        );
        assert_eq!(info.total_pages(), Some(7));
    }

    #[test]
    fn test_last_page_has_no_next() {
        let header = r#"<https://api.github.com/user/starred?per_page=100&page=1>; rel="first", <https://api.github.com/user/starred?per_page=100&page=6>; rel="prev""#;
        let info = parse_link_header(header);

        assert!(info.next_url.is_none());
        assert!(info.last_page.is_none());
    }

    #[test]
    fn test_empty_header() {
        assert_eq!(parse_link_header(""), LinkPagination::default());
    }

    #[test]
    fn test_malformed_parts_are_ignored() {
        let header = r#"garbage, <https://x.test/a?page=3>; rel="next"; extra, rel="last""#;
        let info = parse_link_header(header);

        assert_eq!(info.next_url.as_deref(), Some("https://x.test/a?page=3"));
        assert!(info.last_page.is_none());
    }

    #[test]
    fn test_page_number() {
        assert_eq!(page_number("https://x.test/a?per_page=100&page=4"), Some(4));
        assert_eq!(page_number("https://x.test/a?per_page=100"), None);
        assert_eq!(page_number("https://x.test/a"), None);
        assert_eq!(page_number("https://x.test/a?page=abc"), None);
        assert_eq!(page_number("/relative?page=2"), None);
    }

    #[test]
    fn test_rel_is_case_insensitive_and_multi_valued() {
        let header = r#"<https://x.test/a?page=5>; REL="next last""#;
        let info = parse_link_header(header);

        assert_eq!(info.next_url.as_deref(), Some("https://x.test/a?page=5"));
        assert_eq!(info.last_page, Some(5));
    }
}
