//! Terminal output utilities: ANSI notes and table rendering.

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Check if the terminal supports color output.
pub fn supports_color() -> bool {
    std::env::var("NO_COLOR").is_err()
        && (std::env::var("COLORTERM").is_ok()
            || std::env::var("TERM")
                .map(|t| t != "dumb")
                .unwrap_or(false))
}

/// Strip ANSI escape codes from a string.
pub fn strip_ansi(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for next in chars.by_ref() {
                if next == 'm' { break; }
            }
        } else {
            result.push(c);
        }
    }
    result
}

fn note(symbol: &str, colour: &str, plain: &str, msg: &str) -> String {
    if supports_color() {
        format!("{colour}{BOLD}{symbol}{RESET} {msg}")
    } else {
        format!("{plain}: {msg}")
    }
}

pub fn note_info(msg: &str) {
    println!("{}", note("ℹ", CYAN, "INFO", msg));
}

pub fn note_warn(msg: &str) {
    println!("{}", note("⚠", YELLOW, "WARN", msg));
}

/// Errors go to stderr.
pub fn note_error(msg: &str) {
    eprintln!("{}", note("✗", RED, "ERROR", msg));
}

pub fn note_success(msg: &str) {
    println!("{}", note("✓", GREEN, "OK", msg));
}

/// A left-aligned table column.
pub struct Column {
    pub header: String,
}

impl Column {
    pub fn left(header: impl Into<String>) -> Self {
        Self { header: header.into() }
    }
}

/// Render a table with given columns and rows. Missing cells render empty.
pub fn render_table(columns: &[Column], rows: &[Vec<String>]) -> String {
    let width_of = |s: &str| strip_ansi(s).chars().count();
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, col)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| width_of(cell.as_str()))
                .fold(width_of(&col.header), usize::max)
        })
        .collect();

    let line = |cells: Vec<&str>| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{cell}{}", " ".repeat(w.saturating_sub(width_of(*cell)))))
            .collect();
        format!("  {}\n", padded.join("  ").trim_end())
    };

    let mut out = line(columns.iter().map(|c| c.header.as_str()).collect());
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&line(rule.iter().map(String::as_str).collect()));
    for row in rows {
        out.push_str(&line(
            (0..columns.len())
                .map(|i| row.get(i).map(String::as_str).unwrap_or(""))
                .collect(),
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_ansi() {
        let colored = format!("{GREEN}hello{RESET}");
        assert_eq!(strip_ansi(&colored), "hello");
    }

    #[test]
    fn renders_aligned_table() {
        let cols = vec![Column::left("Name"), Column::left("State")];
        let rows = vec![
            vec!["DISCORD_TOKEN".to_string(), "set".to_string()],
            vec!["KEY".to_string()],
        ];
        let table = render_table(&cols, &rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "  Name           State");
        assert_eq!(lines[1], "  -------------  -----");
        assert_eq!(lines[2], "  DISCORD_TOKEN  set");
        assert_eq!(lines[3], "  KEY");
    }
}
