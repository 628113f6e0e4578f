//! Terminal output helpers.
//!
//! Data (listings and fetched values) goes to stdout unadorned so it can
//! be piped. Status lines go through these helpers for consistent styling;
//! everything except confirmations of completed writes goes to stderr.

use console::style;

use crate::store::Secrets;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning message: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26A0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    eprintln!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Render every entry as `"<key> -> <value>"`, one per line, in key order.
pub fn format_listing(secrets: &Secrets) -> String {
    secrets
        .iter()
        .map(|(key, value)| format!("{key} -> {value}\n"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_is_sorted_one_entry_per_line() {
        let mut secrets = Secrets::new();
        secrets.insert("beta".into(), "2".into());
        secrets.insert("alpha".into(), "1".into());

        assert_eq!(format_listing(&secrets), "alpha -> 1\nbeta -> 2\n");
    }

    #[test]
    fn empty_listing_prints_nothing() {
        assert_eq!(format_listing(&Secrets::new()), "");
    }
}
