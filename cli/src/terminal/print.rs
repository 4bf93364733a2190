use std::fmt::Display;

use colored::*;
use tracing::info;

use crate::terminal::colors;

pub const TOTAL_WIDTH: usize = 64;
pub const PRINT_TARGET: &str = "subsweep::print";
const KEY_WIDTH: usize = 18;

pub fn print(msg: &str) {
    info!(target: PRINT_TARGET, raw_msg = msg);
}

pub fn banner() {
    let text_content: String = format!("⟦ SUBSWEEP v{} ⟧ ", env!("CARGO_PKG_VERSION"));
    let text_width: usize = console::measure_text_width(&text_content);
    let text: ColoredString = text_content.bright_green().bold();
    let pad: usize = TOTAL_WIDTH.saturating_sub(text_width) / 2;
    let sep: ColoredString = "═".repeat(pad).bright_black();
    print(&format!("{sep}{text}{sep}"));
}

pub fn header(msg: &str) {
    let formatted: String = format!("⟦ {msg} ⟧");
    let msg_len: usize = formatted.chars().count();

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    let line: String = format!(
        "{}{}{}",
        "─".repeat(left).bright_black(),
        formatted.to_uppercase().bright_green(),
        "─".repeat(right).bright_black()
    );

    print(&line);
}

pub fn fat_separator() {
    print(&"═".repeat(TOTAL_WIDTH).bright_black().to_string());
}

pub fn aligned_line(key: &str, value: impl Display) {
    let dots: String = ".".repeat((KEY_WIDTH + 1).saturating_sub(key.len()));
    print(&format!(
        "{} {}{}{} {}",
        ">".color(colors::SEPARATOR),
        key.color(colors::PRIMARY),
        dots.color(colors::SEPARATOR),
        ":".color(colors::SEPARATOR),
        value
    ));
}

pub fn as_tree_one_level(key_value_pair: &[(String, ColoredString)]) {
    for (i, (key, value)) in key_value_pair.iter().enumerate() {
        let branch: ColoredString = if i + 1 != key_value_pair.len() {
            "├─".bright_black()
        } else {
            "└─".bright_black()
        };
        print(&format!(" {} {} {}", branch, key.color(colors::TEXT_DEFAULT), value));
    }
}

pub fn centerln(msg: &str) {
    let space = " ".repeat(TOTAL_WIDTH.saturating_sub(console::measure_text_width(msg)) / 2);
    print(&format!("{space}{msg}"));
}
