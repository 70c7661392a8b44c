//! Token segment parsing.

/// Separator between token segments.
pub const TOKEN_SEPARATOR: char = '_';

/// The four segments of a share token, borrowed from the token string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenComponents<'a> {
    /// Token type tag.
    pub prefix: &'a str,
    /// Base64url calendar id.
    pub encoded_calendar_id: &'a str,
    /// Hex random component (the lookup key).
    pub random_component: &'a str,
    /// Truncated hex HMAC.
    pub checksum: &'a str,
}

impl<'a> TokenComponents<'a> {
    /// Split a token into exactly four segments.
    pub fn parse(token: &'a str) -> Option<Self> {
        let mut parts = token.split(TOKEN_SEPARATOR);
        let components = Self {
            prefix: parts.next()?,
            encoded_calendar_id: parts.next()?,
            random_component: parts.next()?,
            checksum: parts.next()?,
        };
        if parts.next().is_some() {
            return None;
        }
        Some(components)
    }

    /// The signed portion of the token.
    pub fn payload(&self) -> String {
        signing_payload(self.prefix, self.encoded_calendar_id, self.random_component)
    }
}

/// Join the first three segments into the string covered by the HMAC.
pub(crate) fn signing_payload(prefix: &str, encoded_calendar_id: &str, random: &str) -> String {
    format!("{prefix}{TOKEN_SEPARATOR}{encoded_calendar_id}{TOKEN_SEPARATOR}{random}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exactly_four_segments() {
        let parsed = TokenComponents::parse("cal_abc_0f_12").unwrap();
        assert_eq!(parsed.prefix, "cal");
        assert_eq!(parsed.encoded_calendar_id, "abc");
        assert_eq!(parsed.random_component, "0f");
        assert_eq!(parsed.checksum, "12");
        assert_eq!(parsed.payload(), "cal_abc_0f");

        assert!(TokenComponents::parse("cal_abc_0f").is_none());
        assert!(TokenComponents::parse("cal_abc_0f_12_extra").is_none());
        assert!(TokenComponents::parse("").is_none());
    }
}
