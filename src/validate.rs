use url::Url;

pub const INVALID_URL_MESSAGE: &str =
    "Please enter a valid Wikipedia URL (e.g. https://en.wikipedia.org/wiki/Alan_Turing)";

/// True iff `candidate` is an absolute URL with an http-prefixed scheme and a
/// host containing "wikipedia.org". Accepts any Wikipedia subdomain or path;
/// whether the article exists is the service's problem.
pub fn is_wikipedia_url(candidate: &str) -> bool {
    match Url::parse(candidate) {
        Ok(parsed) => {
            parsed.scheme().starts_with("http")
                && parsed
                    .host_str()
                    .is_some_and(|host| host.contains("wikipedia.org"))
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::is_wikipedia_url;

    #[test]
    fn accepts_article_urls() {
        assert!(is_wikipedia_url("https://en.wikipedia.org/wiki/Alan_Turing"));
        assert!(is_wikipedia_url("http://de.wikipedia.org/wiki/Rust"));
        assert!(is_wikipedia_url("https://wikipedia.org"));
    }

    #[test]
    fn rejects_non_http_schemes() {
        assert!(!is_wikipedia_url("ftp://en.wikipedia.org/x"));
        assert!(!is_wikipedia_url("file:///etc/passwd"));
    }

    #[test]
    fn rejects_other_hosts() {
        assert!(!is_wikipedia_url("https://example.com"));
        assert!(!is_wikipedia_url("https://wikipedia.com/wiki/Alan_Turing"));
    }

    #[test]
    fn rejects_non_urls() {
        assert!(!is_wikipedia_url(""));
        assert!(!is_wikipedia_url("en.wikipedia.org/wiki/Alan_Turing"));
        assert!(!is_wikipedia_url("not a url"));
    }
}
