//! Formatting utilities used for CLI and export outputs.

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Minutes as `+02h 25m` / `-01:10` style text.
pub fn mins2readable(mins: i64, want_sign: bool, short: bool) -> String {
    let abs_m = mins.abs();
    let hours = abs_m / 60;
    let minutes = abs_m % 60;

    let sign = if mins > 0 && want_sign {
        "+"
    } else if mins < 0 {
        "-"
    } else {
        ""
    };

    if short {
        format!("{}{:02}:{:02}", sign, hours, minutes)
    } else {
        format!("{}{:02}h {:02}m", sign, hours, minutes)
    }
}

/// Same as [`mins2readable`], prefixed with `~` for provisional values.
pub fn mins2readable_est(mins: i64, want_sign: bool, estimate: bool) -> String {
    let s = mins2readable(mins, want_sign, false);
    if estimate { format!("~{s}") } else { s }
}

/// Minutes → decimal hours rounded to two places (export and JSON output).
pub fn minutes_to_hours(mins: i64) -> f64 {
    (mins as f64 / 60.0 * 100.0).round() / 100.0
}
