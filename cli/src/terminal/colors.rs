use colored::Color;

pub const PRIMARY: Color = Color::BrightGreen;
pub const ACCENT: Color = Color::Cyan;
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;
pub const WARNING: Color = Color::Yellow;
pub const FAILURE: Color = Color::Red;
pub const IPV4_ADDR: Color = Color::BrightBlue;
