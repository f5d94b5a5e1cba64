//! MIME format options for per-call response representations.
//!
//! Some resources (issues, comments) can be served as raw markdown, plain
//! text, rendered HTML, or all three. The format is encoded into an Accept
//! header entry for a single call and never persisted on the client.

use crate::client::Headers;

/// Response representation for resources supporting custom MIME types.
///
/// Not all API methods provide responses in all formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaFormat {
    /// Default JSON representation.
    #[default]
    Json,
    /// Raw markdown body.
    Raw,
    /// Text-only representation.
    Text,
    /// Rendered HTML.
    Html,
    /// Raw, text, and HTML representations together.
    Full,
}

impl MediaFormat {
    /// The format token used inside the Accept value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Raw => "raw",
            Self::Text => "text",
            Self::Html => "html",
            Self::Full => "full",
        }
    }

    /// Builds the Accept header entry for a resource kind, e.g.
    /// `application/vnd.github-issue.raw+json` for (`Raw`, `"issue"`).
    pub fn accept_header(&self, resource: &str) -> (String, String) {
        (
            "Accept".to_string(),
            format!("application/vnd.github-{}.{}+json", resource, self.as_str()),
        )
    }
}

/// Returns the header collection with the format's Accept entry appended.
pub fn with_format(mut headers: Headers, format: MediaFormat, resource: &str) -> Headers {
    headers.push(format.accept_header(resource));
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_header() {
        let (name, value) = MediaFormat::Raw.accept_header("issue");
        assert_eq!(name, "Accept");
        assert_eq!(value, "application/vnd.github-issue.raw+json");
    }

    #[test]
    fn test_with_format_appends() {
        let headers = with_format(Vec::new(), MediaFormat::Full, "issuecomment");
        assert_eq!(
            headers,
            vec![(
                "Accept".to_string(),
                "application/vnd.github-issuecomment.full+json".to_string()
            )]
        );
    }

    #[test]
    fn test_default_is_json() {
        assert_eq!(MediaFormat::default(), MediaFormat::Json);
    }
}
