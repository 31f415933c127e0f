//! Terminal palette. Every module colors through these names so the scheme
//! can change in one place.

use colored::Color;

pub const PRIMARY: Color = Color::Green;
pub const ACCENT: Color = Color::Yellow;
pub const TEXT_DEFAULT: Color = Color::TrueColor { r: 192, g: 192, b: 192 };
pub const SEPARATOR: Color = Color::BrightBlack;

pub const IPV4_ADDR: Color = Color::TrueColor { r: 83, g: 179, b: 203 };
pub const IPV4_PREFIX: Color = Color::TrueColor { r: 58, g: 125, b: 142 };
pub const IPV6_ADDR: Color = Color::Magenta;
pub const IPV6_PREFIX: Color = Color::TrueColor { r: 142, g: 94, b: 160 };
pub const MAC_ADDR: Color = Color::TrueColor { r: 255, g: 176, b: 0 };
