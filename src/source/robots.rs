//! Robots.txt rules for the HTTP page source
//!
//! This module wraps the robotstxt crate's matcher behind a small type that
//! also represents "no usable robots.txt" as allow-all.

use robotstxt::DefaultMatcher;

/// Parsed robots.txt data
#[derive(Debug, Clone)]
pub struct ParsedRobots {
    /// Raw robots.txt content (empty string means allow all)
    content: String,
    /// Whether to allow all (true = allow all, false = check content)
    allow_all: bool,
}

impl ParsedRobots {
    /// Creates a new ParsedRobots from raw robots.txt content
    pub fn from_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
            allow_all: false,
        }
    }

    /// Creates a permissive ParsedRobots that allows everything
    ///
    /// This is used when robots.txt is missing or cannot be fetched.
    pub fn allow_all() -> Self {
        Self {
            content: String::new(),
            allow_all: true,
        }
    }

    /// Checks if a URL is allowed for the given user agent
    ///
    /// # Arguments
    ///
    /// * `url` - The absolute URL to check
    /// * `user_agent` - The product token of the crawler (e.g. "pine-ref-harvest")
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        if self.allow_all || self.content.is_empty() {
            return true;
        }

        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.content, user_agent, url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_all() {
        let robots = ParsedRobots::allow_all();
        assert!(robots.is_allowed("https://example.com/anything", "pine-ref-harvest"));
    }

    #[test]
    fn test_disallowed_path() {
        let robots = ParsedRobots::from_content("User-agent: *\nDisallow: /private/\n");
        assert!(!robots.is_allowed("https://example.com/private/page", "pine-ref-harvest"));
        assert!(robots.is_allowed("https://example.com/pine-script-reference/v6/", "pine-ref-harvest"));
    }

    #[test]
    fn test_agent_specific_rules() {
        let content = "User-agent: pine-ref-harvest\nDisallow: /\n\nUser-agent: *\nAllow: /\n";
        let robots = ParsedRobots::from_content(content);
        assert!(!robots.is_allowed("https://example.com/v6/", "pine-ref-harvest"));
        assert!(robots.is_allowed("https://example.com/v6/", "OtherBot"));
    }

    #[test]
    fn test_empty_content_allows() {
        let robots = ParsedRobots::from_content("");
        assert!(robots.is_allowed("https://example.com/", "pine-ref-harvest"));
    }
}
