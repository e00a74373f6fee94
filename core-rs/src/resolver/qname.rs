//! Prefixed names (`GI:12345`)

use std::fmt;

pub const DEFAULT_DELIMITER: &str = ":";

/// A `prefix:identifier` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QName {
    pub prefix: String,
    pub identifier: Option<String>,
}

impl QName {
    /// Split on the first `:`
    pub fn parse(qname: &str) -> Self {
        Self::parse_with(qname, DEFAULT_DELIMITER)
    }

    /// Split on the first `delimiter`
    ///
    /// With a delimiter present the prefix is trimmed and lowercased and the
    /// identifier trimmed. Without one, the trimmed input is the prefix and
    /// there is no identifier.
    ///
    /// ```
    /// use nsreg_core::resolver::QName;
    ///
    /// let q = QName::parse_with(" GI | 12345 ", "|");
    /// assert_eq!(q.prefix, "gi");
    /// assert_eq!(q.identifier.as_deref(), Some("12345"));
    ///
    /// let bare = QName::parse("pubmed");
    /// assert_eq!(bare.prefix, "pubmed");
    /// assert_eq!(bare.identifier, None);
    /// ```
    pub fn parse_with(qname: &str, delimiter: &str) -> Self {
        let split = if delimiter.is_empty() {
            None
        } else {
            qname.split_once(delimiter)
        };

        match split {
            Some((prefix, identifier)) => QName {
                prefix: prefix.trim().to_lowercase(),
                identifier: Some(identifier.trim().to_string()),
            },
            None => QName {
                prefix: qname.trim().to_string(),
                identifier: None,
            },
        }
    }

    /// Identifier, or the empty string when absent
    pub fn identifier(&self) -> &str {
        self.identifier.as_deref().unwrap_or("")
    }

    pub fn with_prefix(&self, prefix: impl Into<String>) -> QName {
        QName {
            prefix: prefix.into(),
            identifier: self.identifier.clone(),
        }
    }
}

/// Always rendered with `:`, whatever delimiter it was parsed with
impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.prefix, self.identifier())
    }
}
