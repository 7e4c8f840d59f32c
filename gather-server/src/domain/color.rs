//! Route color type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid route color.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid route color {value:?}: {reason}")]
pub struct InvalidColor {
    value: String,
    reason: &'static str,
}

impl InvalidColor {
    fn new(value: &str, reason: &'static str) -> Self {
        Self {
            value: value.to_string(),
            reason,
        }
    }
}

/// A CSS-style color used to paint a route badge.
///
/// Accepted forms are `#RGB`, `#RRGGBB`, `#RRGGBBAA`, `rgb(r,g,b)` and
/// `rgba(r,g,b,a)` with channels in `0..=255` and alpha in `0..=1`.
/// The original spelling is kept so the value round-trips unchanged.
///
/// # Examples
///
/// ```
/// use gather_server::domain::RouteColor;
///
/// let ginza = RouteColor::parse("#F39700").unwrap();
/// assert_eq!(ginza.as_str(), "#F39700");
///
/// assert!(RouteColor::parse("rgba(20,190,91,1)").is_ok());
/// assert!(RouteColor::parse("orange").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RouteColor(String);

impl RouteColor {
    /// Parse a color, rejecting anything that is not a hex or rgb(a) color.
    pub fn parse(s: &str) -> Result<Self, InvalidColor> {
        let trimmed = s.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            parse_hex(s, hex)?;
        } else if let Some(args) = trimmed
            .strip_prefix("rgba(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            parse_channels(s, args, true)?;
        } else if let Some(args) = trimmed
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            parse_channels(s, args, false)?;
        } else {
            return Err(InvalidColor::new(s, "must start with '#', 'rgb(' or 'rgba('"));
        }

        Ok(RouteColor(trimmed.to_string()))
    }

    /// Returns the color as written in the catalog.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn parse_hex(original: &str, hex: &str) -> Result<(), InvalidColor> {
    if !matches!(hex.len(), 3 | 6 | 8) {
        return Err(InvalidColor::new(original, "hex color must have 3, 6 or 8 digits"));
    }
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(InvalidColor::new(original, "hex color must contain only hex digits"));
    }
    Ok(())
}

fn parse_channels(original: &str, args: &str, with_alpha: bool) -> Result<(), InvalidColor> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    let expected = if with_alpha { 4 } else { 3 };
    if parts.len() != expected {
        return Err(InvalidColor::new(original, "wrong number of color channels"));
    }

    for part in &parts[..3] {
        part.parse::<u8>()
            .map_err(|_| InvalidColor::new(original, "color channels must be 0-255"))?;
    }

    if with_alpha {
        let alpha: f64 = parts[3]
            .parse()
            .map_err(|_| InvalidColor::new(original, "alpha must be a number"))?;
        if !(0.0..=1.0).contains(&alpha) {
            return Err(InvalidColor::new(original, "alpha must be between 0 and 1"));
        }
    }

    Ok(())
}

impl TryFrom<String> for RouteColor {
    type Error = InvalidColor;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        RouteColor::parse(&value)
    }
}

impl From<RouteColor> for String {
    fn from(color: RouteColor) -> Self {
        color.0
    }
}

impl fmt::Debug for RouteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteColor({})", self.0)
    }
}

impl fmt::Display for RouteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
