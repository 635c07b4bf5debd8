//! Timeline rows and their value segments.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::id::RowId;

// ─── Color ───────────────────────────────────────────────────────────────────

/// A 24-bit RGB colour, written as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
  pub r: u8,
  pub g: u8,
  pub b: u8,
}

impl Color {
  pub const fn rgb(r: u8, g: u8, b: u8) -> Self { Self { r, g, b } }
}

impl fmt::Display for Color {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid colour {0:?}, expected #rrggbb")]
pub struct ParseColorError(String);

impl FromStr for Color {
  type Err = ParseColorError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let err = || ParseColorError(s.to_string());
    let hex = s.strip_prefix('#').ok_or_else(err)?;
    if hex.len() != 6 || !hex.is_ascii() {
      return Err(err());
    }
    let channel =
      |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
    Ok(Self { r: channel(0)?, g: channel(2)?, b: channel(4)? })
  }
}

impl TryFrom<String> for Color {
  type Error = ParseColorError;

  fn try_from(s: String) -> Result<Self, Self::Error> { s.parse() }
}

impl From<Color> for String {
  fn from(c: Color) -> Self { c.to_string() }
}

// ─── Rows ────────────────────────────────────────────────────────────────────

/// One value span on a row. `start <= end` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
  pub start: i64,
  pub end:   i64,
  pub label: String,
  pub color: Color,
}

impl Segment {
  pub fn contains(&self, t: i64) -> bool { self.start <= t && t <= self.end }
}

/// A timeline row (typically one state variable). Segments keep insertion
/// order and may overlap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
  pub id:       RowId,
  pub name:     String,
  /// Running maximum of every segment end seen on this row.
  pub width:    i64,
  pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimelineSnapshot {
  pub rows: Vec<Row>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn color_round_trips_through_hex() {
    let c: Color = "#1a2B3c".parse().unwrap();
    assert_eq!(c, Color::rgb(0x1a, 0x2b, 0x3c));
    assert_eq!(c.to_string(), "#1a2b3c");
  }

  #[test]
  fn color_rejects_malformed_input() {
    assert!("1a2b3c".parse::<Color>().is_err());
    assert!("#1a2b3".parse::<Color>().is_err());
    assert!("#zzzzzz".parse::<Color>().is_err());
    assert!("#ééé".parse::<Color>().is_err());
  }

  #[test]
  fn color_error_names_the_input() {
    let err = "teal".parse::<Color>().unwrap_err();
    assert_eq!(err.to_string(), r#"invalid colour "teal", expected #rrggbb"#);
    let boxed: Box<dyn std::error::Error> = Box::new(err);
    assert!(boxed.source().is_none());
  }

  #[test]
  fn segment_bounds_are_inclusive() {
    let s = Segment {
      start: 5,
      end:   10,
      label: "x".into(),
      color: Color::rgb(0, 0, 0),
    };
    assert!(s.contains(5));
    assert!(s.contains(10));
    assert!(!s.contains(11));
  }
}
