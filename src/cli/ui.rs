use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;
use std::time::Duration;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    TotalLabel,
    TotalValue,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::TotalLabel => style(text).bold(),
        StyleType::TotalValue => style(text).green().bold(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Groups an already rounded `1234567.89` style number as `1.234.567,89`.
fn group_ar(plain: &str) -> String {
    let (sign, digits) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));

    let mut grouped = String::with_capacity(plain.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let is_zero = digits.chars().all(|c| c == '0' || c == '.');
    let sign = if is_zero { "" } else { sign };
    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped},{frac_part}")
    }
}

/// Formats a number the Argentine way, `1.234,56`. Non-finite values
/// render as `-`.
pub fn fmt_ar(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    group_ar(&format!("{value:.2}"))
}

pub fn fmt_ar_decimal(value: Decimal) -> String {
    group_ar(&format!("{:.2}", value.round_dp(2)))
}

pub fn fmt_percent(value: f64) -> String {
    format!("{}%", fmt_ar(value))
}

pub fn fmt_money(value: f64) -> String {
    format!("${}", fmt_ar(value))
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Formats an `Option<T>` into a `Cell`. `None` is displayed as "-".
pub fn format_optional_cell<T>(value: Option<T>, format_fn: impl Fn(T) -> String) -> Cell {
    value.map_or(
        Cell::new("-")
            .fg(Color::DarkGrey)
            .set_alignment(CellAlignment::Right),
        |v| Cell::new(format_fn(v)).set_alignment(CellAlignment::Right),
    )
}

/// Formats a cell with bold and green text
pub fn format_percentage_cell(value: f64) -> Cell {
    Cell::new(fmt_percent(value))
        .add_attribute(Attribute::Bold)
        .fg(Color::Green)
        .set_alignment(CellAlignment::Right)
}

/// Creates a cell for displaying a percentage change, red when prices fell.
pub fn change_cell(change: f64) -> Cell {
    let color = if change >= 0.0 { Color::Green } else { Color::Red };
    Cell::new(fmt_percent(change))
        .fg(color)
        .set_alignment(CellAlignment::Right)
}

/// Creates a new spinner shown while data is being fetched.
pub fn new_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(spinner_style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Message shown when a source had nothing to offer.
pub fn no_data(what: &str) -> String {
    style_text(&format!("No {what} available right now."), StyleType::Subtle)
}

/// Prints a separator line matching the terminal width.
pub fn print_separator() {
    let term_width = console::Term::stdout()
        .size_checked()
        .map(|(_, w)| w as usize)
        .unwrap_or(80);
    println!("\n{}", "─".repeat(term_width));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_ar() {
        assert_eq!(fmt_ar(1234.56), "1.234,56");
        assert_eq!(fmt_ar(1234567.891), "1.234.567,89");
        assert_eq!(fmt_ar(999.0), "999,00");
        assert_eq!(fmt_ar(0.0), "0,00");
        assert_eq!(fmt_ar(-2.5), "-2,50");
        assert_eq!(fmt_ar(-0.001), "0,00");
        assert_eq!(fmt_ar(f64::NAN), "-");
    }

    #[test]
    fn test_fmt_ar_decimal() {
        assert_eq!(fmt_ar_decimal(Decimal::new(287671232, 5)), "2.876,71");
        assert_eq!(fmt_ar_decimal(Decimal::from(100_000)), "100.000,00");
        assert_eq!(fmt_ar_decimal(Decimal::new(-15, 1)), "-1,50");
    }

    #[test]
    fn test_fmt_helpers() {
        assert_eq!(fmt_percent(21.0), "21,00%");
        assert_eq!(fmt_money(1220.5), "$1.220,50");
    }
}
