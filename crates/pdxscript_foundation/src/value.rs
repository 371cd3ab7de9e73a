//! Typed values produced by extraction.
//!
//! Script literals are plain text; these are the shapes they become once an
//! extractor has validated them.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// =============================================================================
// Date
// =============================================================================

/// A calendar date written `year.month.day`.
///
/// The game calendar has no leap years.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Date {
    /// Year.
    pub year: i32,
    /// Month, 1 to 12.
    pub month: u8,
    /// Day, 1 to the length of the month.
    pub day: u8,
}

impl Date {
    const MONTH_LENGTHS: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

    /// Creates a date, returning `None` if month or day are out of range.
    #[must_use]
    pub fn new(year: i32, month: u8, day: u8) -> Option<Self> {
        let length = *Self::MONTH_LENGTHS.get(usize::from(month).checked_sub(1)?)?;
        (1..=length).contains(&day).then_some(Self { year, month, day })
    }

    /// Parses `year.month.day`.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let mut parts = text.split('.');
        let year = parts.next()?.parse().ok()?;
        let month = parts.next()?.parse().ok()?;
        let day = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Self::new(year, month, day)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.year, self.month, self.day)
    }
}

// =============================================================================
// Color
// =============================================================================

/// A color as written in script.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Color {
    /// `rgb { r g b }` or `rgb { r g b a }`.
    Rgb {
        /// Red.
        r: u8,
        /// Green.
        g: u8,
        /// Blue.
        b: u8,
        /// Alpha, 255 when omitted.
        a: u8,
    },
    /// `hsv { h s v }` with every component in `0..=1`. `hsv360` is
    /// normalized into this form.
    Hsv {
        /// Hue.
        h: f64,
        /// Saturation.
        s: f64,
        /// Value.
        v: f64,
    },
    /// A symbolic color key defined elsewhere.
    Named(String),
}

impl Color {
    /// Converts to 8-bit RGB. Named colors have no intrinsic value.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::many_single_char_names)]
    pub fn to_rgb(&self) -> Option<(u8, u8, u8)> {
        match self {
            Self::Rgb { r, g, b, .. } => Some((*r, *g, *b)),
            Self::Hsv { h, s, v } => {
                let h = (h.rem_euclid(1.0)) * 6.0;
                let sector = h.floor();
                let f = h - sector;
                let p = v * (1.0 - s);
                let q = v * (1.0 - s * f);
                let t = v * (1.0 - s * (1.0 - f));
                let (r, g, b) = match sector as u8 {
                    0 => (*v, t, p),
                    1 => (q, *v, p),
                    2 => (p, *v, t),
                    3 => (p, q, *v),
                    4 => (t, p, *v),
                    _ => (*v, p, q),
                };
                let scale = |c: f64| (c * 255.0).round().clamp(0.0, 255.0) as u8;
                Some((scale(r), scale(g), scale(b)))
            }
            Self::Named(_) => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb { r, g, b, a: 255 } => write!(f, "rgb {{ {r} {g} {b} }}"),
            Self::Rgb { r, g, b, a } => write!(f, "rgb {{ {r} {g} {b} {a} }}"),
            Self::Hsv { h, s, v } => write!(f, "hsv {{ {h} {s} {v} }}"),
            Self::Named(key) => f.write_str(key),
        }
    }
}
