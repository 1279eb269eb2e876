//! Date helper functions

use anyhow::{anyhow, Result};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, TimeZone, Timelike};
use chrono_tz::Tz;

use crate::i18n::I18n;

/// Parse a timestamp as the content API writes them.
///
/// Accepts RFC 3339, the repository's `2021-03-25T19:25:28+0000` form and a
/// bare `2021-03-25` (midnight UTC).
pub fn parse_timestamp(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%z") {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|d| d.and_utc().fixed_offset())
}

/// Formats dates with date-fns style patterns and localized month names
#[derive(Debug, Clone)]
pub struct DateFormatter {
    pattern: String,
    i18n: I18n,
    timezone: Option<Tz>,
}

impl DateFormatter {
    pub fn new(pattern: &str, i18n: I18n) -> Self {
        Self {
            pattern: pattern.to_string(),
            i18n,
            timezone: None,
        }
    }

    /// Convert every instant to `name` (IANA) before formatting.
    /// An empty name keeps the timestamp's own offset.
    pub fn with_timezone(mut self, name: &str) -> Result<Self> {
        self.timezone = if name.trim().is_empty() {
            None
        } else {
            Some(
                name.parse::<Tz>()
                    .map_err(|e| anyhow!("Unknown timezone {:?}: {}", name, e))?,
            )
        };
        Ok(self)
    }

    /// Format an instant
    pub fn format<Tz2: TimeZone>(&self, date: &DateTime<Tz2>) -> String {
        match self.timezone {
            Some(tz) => self.render(&date.with_timezone(&tz)),
            None => self.render(&date.fixed_offset()),
        }
    }

    /// Parse then format; `None` if the timestamp is not understood
    pub fn format_timestamp(&self, s: &str) -> Option<String> {
        parse_timestamp(s).map(|dt| self.format(&dt))
    }

    fn render<D: Datelike + Timelike>(&self, date: &D) -> String {
        let mut out = String::new();
        for token in tokenize(&self.pattern) {
            match token {
                Token::Literal(text) => out.push_str(&text),
                Token::Field(c, n) => out.push_str(&self.field(date, c, n)),
            }
        }
        out
    }

    fn field<D: Datelike + Timelike>(&self, date: &D, c: char, n: usize) -> String {
        match (c, n) {
            ('y', 2) => format!("{:02}", date.year().rem_euclid(100)),
            ('y', _) => format!("{:04}", date.year()),
            ('M', 1) => date.month().to_string(),
            ('M', 2) => format!("{:02}", date.month()),
            ('M', 3) => self.i18n.month_short(date.month()),
            ('M', _) => self.i18n.month_long(date.month()),
            ('d', 1) => date.day().to_string(),
            ('d', _) => format!("{:02}", date.day()),
            ('H', 1) => date.hour().to_string(),
            ('H', _) => format!("{:02}", date.hour()),
            ('m', 1) => date.minute().to_string(),
            ('m', _) => format!("{:02}", date.minute()),
            ('s', 1) => date.second().to_string(),
            ('s', _) => format!("{:02}", date.second()),
            _ => c.to_string().repeat(n),
        }
    }
}

#[derive(Debug, PartialEq)]
enum Token {
    Literal(String),
    Field(char, usize),
}

const FIELDS: &str = "yMdHms";

/// Split a pattern into runs of field letters and literal text.
/// Text inside single quotes is literal; `''` is a quote.
fn tokenize(pattern: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\'' {
            let mut text = String::new();
            if chars.peek() == Some(&'\'') {
                chars.next();
                text.push('\'');
            } else {
                while let Some(q) = chars.next() {
                    if q == '\'' {
                        if chars.peek() == Some(&'\'') {
                            chars.next();
                            text.push('\'');
                            continue;
                        }
                        break;
                    }
                    text.push(q);
                }
            }
            tokens.push(Token::Literal(text));
        } else if FIELDS.contains(c) {
            let mut n = 1;
            while chars.peek() == Some(&c) {
                chars.next();
                n += 1;
            }
            tokens.push(Token::Field(c, n));
        } else {
            tokens.push(Token::Literal(c.to_string()));
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt_br() -> DateFormatter {
        DateFormatter::new("dd MMM yy", I18n::new("pt-BR"))
    }

    #[test]
    fn test_short_date() {
        let f = pt_br();
        assert_eq!(
            f.format_timestamp("2021-03-25T19:25:28+0000").as_deref(),
            Some("25 mar 21")
        );
        assert_eq!(f.format_timestamp("2021-01-10").as_deref(), Some("10 jan 21"));
        assert_eq!(f.format_timestamp("2021-02-01T03:00:00Z").as_deref(), Some("01 fev 21"));
    }

    #[test]
    fn test_keeps_source_offset() {
        let f = pt_br();
        assert_eq!(
            f.format_timestamp("2021-03-25T23:30:00-03:00").as_deref(),
            Some("25 mar 21")
        );
    }

    #[test]
    fn test_with_timezone() {
        let f = pt_br().with_timezone("America/Sao_Paulo").unwrap();
        assert_eq!(
            f.format_timestamp("2021-03-26T01:00:00+0000").as_deref(),
            Some("25 mar 21")
        );
        assert!(pt_br().with_timezone("Mars/Olympus_Mons").is_err());
        assert!(pt_br().with_timezone("").is_ok());
    }

    #[test]
    fn test_other_patterns() {
        let date = parse_timestamp("2024-01-05T09:07:03+0000").unwrap();
        let en = I18n::new("en");
        assert_eq!(DateFormatter::new("yyyy-MM-dd", en.clone()).format(&date), "2024-01-05");
        assert_eq!(DateFormatter::new("d MMMM yyyy", en.clone()).format(&date), "5 January 2024");
        assert_eq!(DateFormatter::new("HH:mm:ss", en.clone()).format(&date), "09:07:03");
        assert_eq!(
            DateFormatter::new("d 'de' MMMM", I18n::new("pt-BR")).format(&date),
            "5 de janeiro"
        );
        assert_eq!(DateFormatter::new("dd 'o''clock'", en).format(&date), "05 o'clock");
    }

    #[test]
    fn test_unparseable_timestamp() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("yesterday").is_none());
        assert!(pt_br().format_timestamp("25/03/2021").is_none());
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("dd MMM"),
            vec![
                Token::Field('d', 2),
                Token::Literal(" ".to_string()),
                Token::Field('M', 3)
            ]
        );
    }
}
