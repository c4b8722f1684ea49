use colored::Color;

pub const PRIMARY: Color = Color::TrueColor { r: 95, g: 215, b: 135 };
pub const SECONDARY: Color = Color::TrueColor { r: 135, g: 175, b: 255 };
pub const ACCENT: Color = Color::TrueColor { r: 255, g: 175, b: 95 };
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;

pub const IPV4_ADDR: Color = Color::TrueColor { r: 135, g: 215, b: 255 };
pub const MAC_ADDR: Color = Color::TrueColor { r: 215, g: 175, b: 255 };
pub const PORT_OPEN: Color = Color::Green;
pub const PORT_OTHER: Color = Color::Yellow;
