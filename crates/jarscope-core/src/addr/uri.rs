//! URI value type: parse and canonical form.

use std::fmt;

use crate::addr::fragment::Fragment;
use crate::error::NavigationError;
use crate::error::Result;

/// Scheme of jarscope addresses.
pub const SCHEME: &str = "jarscope";

/// Optional query of an address: a caret position or a highlight request
/// for the viewer that will display the located entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// 1-based line number.
    LineNumber(u32),
    /// Absolute character position.
    Position(u32),
    /// Search highlight with viewer flags and an optional type scope.
    Highlight {
        /// Pattern to highlight.
        pattern: String,
        /// Viewer-defined flag characters.
        flags: String,
        /// Restrict highlighting to one type.
        scope: Option<String>,
    },
}

impl Query {
    fn parse(text: &str) -> Option<Self> {
        let pairs: Vec<(&str, &str)> = text
            .split('&')
            .map(|pair| pair.split_once('='))
            .collect::<Option<_>>()?;
        match pairs.as_slice() {
            [("lineNumber", value)] => value.parse().ok().map(Self::LineNumber),
            [("position", value)] => value.parse().ok().map(Self::Position),
            [("highlightPattern", pattern), ("highlightFlags", flags)] => Some(Self::Highlight {
                pattern: (*pattern).to_string(),
                flags: (*flags).to_string(),
                scope: None,
            }),
            [
                ("highlightPattern", pattern),
                ("highlightFlags", flags),
                ("highlightScope", scope),
            ] => Some(Self::Highlight {
                pattern: (*pattern).to_string(),
                flags: (*flags).to_string(),
                scope: Some((*scope).to_string()),
            }),
            _ => None,
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LineNumber(line) => write!(f, "lineNumber={line}"),
            Self::Position(position) => write!(f, "position={position}"),
            Self::Highlight {
                pattern,
                flags,
                scope,
            } => {
                write!(f, "highlightPattern={pattern}&highlightFlags={flags}")?;
                if let Some(scope) = scope {
                    write!(f, "&highlightScope={scope}")?;
                }
                Ok(())
            }
        }
    }
}

/// A parsed address: scheme, `!`-separated path segments, optional query
/// and fragment.
///
/// The first segment is the host filesystem path of the outermost
/// artifact; each further segment crosses into a nested container. Two
/// addresses are equal iff they denote the same byte-identical location;
/// the canonical text form round-trips through [`Uri::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Uri {
    scheme: String,
    segments: Vec<String>,
    query: Option<Query>,
    fragment: Option<Fragment>,
}

impl Uri {
    /// Builds an address from path segments with the default scheme.
    #[must_use]
    pub fn from_segments(segments: Vec<String>) -> Self {
        Self {
            scheme: SCHEME.to_string(),
            segments,
            query: None,
            fragment: None,
        }
    }

    /// Replaces the query.
    #[must_use]
    pub fn with_query(mut self, query: Option<Query>) -> Self {
        self.query = query;
        self
    }

    /// Replaces the fragment.
    #[must_use]
    pub fn with_fragment(mut self, fragment: Option<Fragment>) -> Self {
        self.fragment = fragment;
        self
    }

    /// Scheme part.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Path segments; the first names the outermost artifact.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Query part.
    #[must_use]
    pub fn query(&self) -> Option<&Query> {
        self.query.as_ref()
    }

    /// Fragment part.
    #[must_use]
    pub fn fragment(&self) -> Option<&Fragment> {
        self.fragment.as_ref()
    }

    pub(crate) fn segments_mut(&mut self) -> &mut Vec<String> {
        &mut self.segments
    }

    /// Parses address text.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::MalformedUri`] when the text falls
    /// outside the grammar. Callers that resolve user-supplied addresses
    /// usually want [`locate_str`](crate::addr::locate_str), which maps
    /// malformed input to "not found" instead.
    pub fn parse(input: &str) -> Result<Self> {
        let malformed = |reason: &str| NavigationError::MalformedUri {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let (scheme, rest) = input.split_once("://").ok_or_else(|| malformed("missing scheme"))?;
        if scheme.is_empty() {
            return Err(malformed("empty scheme"));
        }

        let (rest, fragment) = match rest.split_once('#') {
            Some((rest, text)) => {
                let fragment = Fragment::parse(text).ok_or_else(|| malformed("bad fragment"))?;
                (rest, Some(fragment))
            }
            None => (rest, None),
        };

        let (path, query) = match rest.split_once('?') {
            Some((path, text)) => {
                let query = Query::parse(text).ok_or_else(|| malformed("bad query"))?;
                (path, Some(query))
            }
            None => (rest, None),
        };

        if path.is_empty() {
            return Err(malformed("empty path"));
        }
        let segments: Vec<String> = path.split('!').map(ToString::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(malformed("empty path segment"));
        }

        Ok(Self {
            scheme: scheme.to_string(),
            segments,
            query,
            fragment,
        })
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.segments.join("!"))?;
        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        let uri = Uri::parse("jarscope:///tmp/app.ear!lib/util.jar!com/u/H.class").unwrap();
        assert_eq!(uri.scheme(), "jarscope");
        assert_eq!(
            uri.segments(),
            ["/tmp/app.ear", "lib/util.jar", "com/u/H.class"]
        );
        assert!(uri.query().is_none());
        assert!(uri.fragment().is_none());
    }

    #[test]
    fn test_parse_query_line_number() {
        let uri = Uri::parse("jarscope:///tmp/a.jar!A.class?lineNumber=42").unwrap();
        assert_eq!(uri.query(), Some(&Query::LineNumber(42)));
    }

    #[test]
    fn test_parse_query_highlight() {
        let uri = Uri::parse(
            "jarscope:///tmp/a.jar!A.class?highlightPattern=Foo&highlightFlags=tc&highlightScope=com/x/A",
        )
        .unwrap();
        assert_eq!(
            uri.query(),
            Some(&Query::Highlight {
                pattern: "Foo".to_string(),
                flags: "tc".to_string(),
                scope: Some("com/x/A".to_string()),
            })
        );
    }

    #[test]
    fn test_parse_fragment() {
        let uri = Uri::parse("jarscope:///tmp/a.jar!com/x/A.class#com/x/A-run-(I)V").unwrap();
        let fragment = uri.fragment().unwrap();
        assert_eq!(fragment.type_name(), "com/x/A");
        assert!(fragment.member().is_some());
    }

    #[test]
    fn test_display_round_trip() {
        for text in [
            "jarscope:///tmp/app.ear!lib/util.jar!com/u/H.class",
            "jarscope:///tmp/a.jar!A.class?position=7",
            "jarscope:///tmp/a.jar!com/x/A.class?lineNumber=3#com/x/A",
            "jarscope:///tmp/a.jar!com/x/A.class#com/x/A-count-?",
        ] {
            let uri = Uri::parse(text).unwrap();
            assert_eq!(uri.to_string(), text);
        }
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(Uri::parse("no-scheme-here").is_err());
        assert!(Uri::parse("://x").is_err());
        assert!(Uri::parse("jarscope://").is_err());
        assert!(Uri::parse("jarscope://a!!b").is_err());
        assert!(Uri::parse("jarscope://a?bogus=1").is_err());
        assert!(Uri::parse("jarscope://a#x-y").is_err());
    }
}
