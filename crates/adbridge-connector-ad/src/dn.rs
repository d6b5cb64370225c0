//! Distinguished name building and validation
//!
//! [`DnResolver`] derives the DN for a new entry from its name or common
//! name. [`parse_dn`] is an RFC 4514 parser that also accepts the RFC 2253
//! leniencies (`;` separators, quoted values, whitespace around `=` and
//! separators).

use thiserror::Error;
use tracing::debug;

use adbridge_connector::object::{Attribute, AttributeValue, Name};

/// Reason a string is not a distinguished name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DnParseError {
    /// Input ended in the middle of an RDN.
    #[error("unexpected end of DN")]
    UnexpectedEnd,

    /// Attribute type is neither a descriptor nor a numeric OID.
    #[error("invalid attribute type at position {position}")]
    InvalidAttributeType { position: usize },

    /// Attribute type not followed by '='.
    #[error("expected '=' at position {position}")]
    MissingEquals { position: usize },

    /// Backslash not followed by a special character or two hex digits.
    #[error("invalid escape sequence at position {position}")]
    InvalidEscape { position: usize },

    /// '#' value that is not an even run of hex digits.
    #[error("invalid hex value at position {position}")]
    InvalidHexValue { position: usize },

    /// Character that must be escaped appeared unescaped.
    #[error("unexpected character '{ch}' at position {position}")]
    UnexpectedCharacter { ch: char, position: usize },

    /// Escaped bytes do not form valid UTF-8.
    #[error("attribute value is not valid UTF-8")]
    InvalidUtf8,
}

/// One `type=value` pair of an RDN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ava {
    /// Attribute type as written (descriptor or numeric OID).
    pub attribute_type: String,
    /// Unescaped value. `#`-encoded values keep their `#hex` form.
    pub value: String,
}

/// A relative distinguished name: one or more AVAs joined by '+'.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rdn {
    /// The AVAs of this RDN, in input order.
    pub avas: Vec<Ava>,
}

/// Parse a distinguished name into its RDNs, leftmost first.
///
/// The empty string is the valid, empty DN.
pub fn parse_dn(input: &str) -> Result<Vec<Rdn>, DnParseError> {
    let mut parser = DnParser::new(input);
    parser.skip_spaces();
    if parser.at_end() {
        return Ok(Vec::new());
    }

    let mut rdns = vec![parser.rdn()?];
    while let Some(ch) = parser.peek() {
        match ch {
            ',' | ';' => {
                parser.bump();
                rdns.push(parser.rdn()?);
            }
            other => {
                return Err(DnParseError::UnexpectedCharacter {
                    ch: other,
                    position: parser.pos,
                })
            }
        }
    }

    Ok(rdns)
}

/// Check whether a string is a non-blank, syntactically valid DN.
///
/// Parse failures are reported as `false`, never as an error.
#[must_use]
pub fn is_dn(candidate: &str) -> bool {
    !candidate.trim().is_empty() && parse_dn(candidate).is_ok()
}

struct DnParser {
    chars: Vec<char>,
    pos: usize,
}

impl DnParser {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn skip_spaces(&mut self) {
        while self.peek() == Some(' ') {
            self.pos += 1;
        }
    }

    fn rdn(&mut self) -> Result<Rdn, DnParseError> {
        let mut avas = vec![self.ava()?];
        while self.peek() == Some('+') {
            self.bump();
            avas.push(self.ava()?);
        }
        Ok(Rdn { avas })
    }

    fn ava(&mut self) -> Result<Ava, DnParseError> {
        self.skip_spaces();
        let attribute_type = self.attribute_type()?;
        self.skip_spaces();
        match self.bump() {
            Some('=') => {}
            Some(_) => {
                return Err(DnParseError::MissingEquals {
                    position: self.pos - 1,
                })
            }
            None => return Err(DnParseError::UnexpectedEnd),
        }
        self.skip_spaces();
        let value = match self.peek() {
            Some('#') => self.hex_value()?,
            Some('"') => self.quoted_value()?,
            _ => self.string_value()?,
        };
        Ok(Ava {
            attribute_type,
            value,
        })
    }

    fn attribute_type(&mut self) -> Result<String, DnParseError> {
        let start = self.pos;
        match self.peek() {
            Some(c) if c.is_ascii_alphabetic() => {
                while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '-') {
                    self.pos += 1;
                }
            }
            Some(c) if c.is_ascii_digit() => {
                while matches!(self.peek(), Some(c) if c.is_ascii_digit() || c == '.') {
                    self.pos += 1;
                }
                let oid: String = self.chars[start..self.pos].iter().collect();
                if oid.split('.').any(str::is_empty) {
                    return Err(DnParseError::InvalidAttributeType { position: start });
                }
            }
            Some(_) => return Err(DnParseError::InvalidAttributeType { position: start }),
            None => return Err(DnParseError::UnexpectedEnd),
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn hex_value(&mut self) -> Result<String, DnParseError> {
        let start = self.pos;
        self.bump();
        while matches!(self.peek(), Some(c) if c.is_ascii_hexdigit()) {
            self.pos += 1;
        }
        let digits = self.pos - start - 1;
        if digits == 0 || digits % 2 != 0 {
            return Err(DnParseError::InvalidHexValue { position: start });
        }
        let value = self.chars[start..self.pos].iter().collect();
        self.skip_spaces();
        self.expect_separator_or_end()?;
        Ok(value)
    }

    fn quoted_value(&mut self) -> Result<String, DnParseError> {
        self.bump();
        let mut bytes = Vec::new();
        loop {
            match self.bump() {
                Some('"') => break,
                Some('\\') => self.escape(&mut bytes)?,
                Some(c) => push_char(&mut bytes, c),
                None => return Err(DnParseError::UnexpectedEnd),
            }
        }
        self.skip_spaces();
        self.expect_separator_or_end()?;
        String::from_utf8(bytes).map_err(|_| DnParseError::InvalidUtf8)
    }

    fn string_value(&mut self) -> Result<String, DnParseError> {
        let mut bytes = Vec::new();
        // Length of `bytes` up to the last character that is not an unescaped space.
        let mut significant = 0;
        while let Some(c) = self.peek() {
            match c {
                ',' | ';' | '+' => break,
                '\\' => {
                    self.bump();
                    self.escape(&mut bytes)?;
                    significant = bytes.len();
                }
                '"' | '<' | '>' | '\0' => {
                    return Err(DnParseError::UnexpectedCharacter {
                        ch: c,
                        position: self.pos,
                    })
                }
                ' ' => {
                    self.bump();
                    bytes.push(b' ');
                }
                _ => {
                    self.bump();
                    push_char(&mut bytes, c);
                    significant = bytes.len();
                }
            }
        }
        bytes.truncate(significant);
        String::from_utf8(bytes).map_err(|_| DnParseError::InvalidUtf8)
    }

    /// Decode the sequence after a backslash into `bytes`.
    fn escape(&mut self, bytes: &mut Vec<u8>) -> Result<(), DnParseError> {
        let position = self.pos;
        match self.bump() {
            Some(c @ (',' | '=' | '+' | '<' | '>' | '#' | ';' | '\\' | '"' | ' ')) => {
                bytes.push(c as u8);
                Ok(())
            }
            Some(hi) if hi.is_ascii_hexdigit() => match self.bump() {
                Some(lo) if lo.is_ascii_hexdigit() => {
                    let byte = (hex_digit(hi) << 4) | hex_digit(lo);
                    bytes.push(byte);
                    Ok(())
                }
                _ => Err(DnParseError::InvalidEscape { position }),
            },
            Some(_) => Err(DnParseError::InvalidEscape { position }),
            None => Err(DnParseError::UnexpectedEnd),
        }
    }

    fn expect_separator_or_end(&self) -> Result<(), DnParseError> {
        match self.peek() {
            None | Some(',' | ';' | '+') => Ok(()),
            Some(ch) => Err(DnParseError::UnexpectedCharacter {
                ch,
                position: self.pos,
            }),
        }
    }
}

fn push_char(bytes: &mut Vec<u8>, c: char) {
    let mut buf = [0u8; 4];
    bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
}

fn hex_digit(c: char) -> u8 {
    c.to_digit(16).map_or(0, |d| d as u8)
}

/// Builds DNs for new entries under the configured people container.
#[derive(Debug, Clone)]
pub struct DnResolver {
    default_container: String,
}

impl DnResolver {
    /// Create a resolver placing entries under `default_container`.
    pub fn new(default_container: impl Into<String>) -> Self {
        Self {
            default_container: default_container.into(),
        }
    }

    /// The container new entries are placed under.
    pub fn default_container(&self) -> &str {
        &self.default_container
    }

    /// Build `cn=<value>,<default container>`.
    ///
    /// The common name is used when its first value is a non-blank string;
    /// otherwise the object's name is used as the `cn`. The value is used as
    /// given, so callers pass it already escaped.
    #[must_use]
    pub fn build_dn(&self, name: &Name, common_name: Option<&Attribute>) -> String {
        let cn = common_name
            .and_then(Attribute::first_value)
            .and_then(AttributeValue::as_string)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| name.value());

        let dn = format!("cn={},{}", cn, self.default_container);
        debug!(dn = %dn, "Built DN from name attributes");
        dn
    }

    /// Check whether a string is a non-blank, syntactically valid DN.
    #[must_use]
    pub fn is_dn(&self, candidate: &str) -> bool {
        is_dn(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PEOPLE: &str = "ou=People,dc=example,dc=com";

    #[test]
    fn test_build_dn_from_name() {
        let resolver = DnResolver::new(PEOPLE);
        assert_eq!(
            resolver.build_dn(&Name::new("jdoe"), None),
            "cn=jdoe,ou=People,dc=example,dc=com"
        );
    }

    #[test]
    fn test_build_dn_from_common_name() {
        let resolver = DnResolver::new(PEOPLE);
        let cn = Attribute::single("cn", "John Doe");
        assert_eq!(
            resolver.build_dn(&Name::new("jdoe"), Some(&cn)),
            "cn=John Doe,ou=People,dc=example,dc=com"
        );
    }

    #[test]
    fn test_build_dn_blank_common_name_falls_back() {
        let resolver = DnResolver::new(PEOPLE);
        let blank = Attribute::single("cn", "   ");
        let empty = Attribute::new("cn", Vec::<String>::new());
        assert_eq!(
            resolver.build_dn(&Name::new("jdoe"), Some(&blank)),
            "cn=jdoe,ou=People,dc=example,dc=com"
        );
        assert_eq!(
            resolver.build_dn(&Name::new("jdoe"), Some(&empty)),
            "cn=jdoe,ou=People,dc=example,dc=com"
        );
    }

    #[test]
    fn test_build_dn_keeps_value_verbatim() {
        let resolver = DnResolver::new(PEOPLE);
        let escaped = Attribute::single("cn", "Doe\\, John");
        let dn = resolver.build_dn(&Name::new("jdoe"), Some(&escaped));
        assert_eq!(dn, "cn=Doe\\, John,ou=People,dc=example,dc=com");
        assert!(is_dn(&dn));
        assert_eq!(parse_dn(&dn).unwrap()[0].avas[0].value, "Doe, John");

        assert_eq!(
            resolver.build_dn(&Name::new("a=b"), None),
            "cn=a=b,ou=People,dc=example,dc=com"
        );
    }

    #[test]
    fn test_is_dn() {
        assert!(is_dn("cn=jdoe,dc=example,dc=com"));
        assert!(is_dn("CN=John Doe;OU=People;DC=example"));
        assert!(is_dn("cn=a+sn=b,dc=example"));
        assert!(is_dn("2.5.4.3=jdoe,dc=example"));
        assert!(is_dn("cn=#04024869,dc=example"));
        assert!(is_dn("cn=\"Doe, John\",dc=example"));
        assert!(!is_dn(""));
        assert!(!is_dn("   "));
        assert!(!is_dn("not a dn!!"));
        assert!(!is_dn("jdoe"));
        assert!(!is_dn("cn=jdoe,"));
        assert!(!is_dn("=jdoe"));
        assert!(!is_dn("cn=a<b"));
        assert!(!is_dn("cn=bad\\qescape"));
        assert!(!is_dn("1..2=x"));
        assert!(!is_dn("cn=#abc"));
    }

    #[test]
    fn test_parse_dn_structure() {
        let rdns = parse_dn(" cn = John Doe , ou=People+l=Berlin,dc=example").unwrap();
        assert_eq!(rdns.len(), 3);
        assert_eq!(rdns[0].avas[0].attribute_type, "cn");
        assert_eq!(rdns[0].avas[0].value, "John Doe");
        assert_eq!(rdns[1].avas.len(), 2);
        assert_eq!(rdns[1].avas[1].value, "Berlin");
    }

    #[test]
    fn test_parse_dn_escapes() {
        let rdns = parse_dn("cn=\\ lead\\,comma\\20,dc=x").unwrap();
        assert_eq!(rdns[0].avas[0].value, " lead,comma ");

        let rdns = parse_dn("cn=J\\C3\\BCrgen,dc=x").unwrap();
        assert_eq!(rdns[0].avas[0].value, "Jürgen");
    }

    #[test]
    fn test_parse_empty_dn() {
        assert!(parse_dn("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            parse_dn("not a dn!!").unwrap_err(),
            DnParseError::MissingEquals { position: 4 }
        );
        assert_eq!(parse_dn("cn=x,").unwrap_err(), DnParseError::UnexpectedEnd);
        assert_eq!(
            parse_dn("cn=\\C3,dc=x").unwrap_err(),
            DnParseError::InvalidUtf8
        );
    }
}
