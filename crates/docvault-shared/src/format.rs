//! Display formatters for sizes, dates and short strings.

use std::fmt::Display;

use chrono::{DateTime, TimeZone, Utc};

const SIZE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Human-readable size with 1024-based units and at most one decimal.
///
/// Trailing `.0` is dropped, so `1024` renders as `1 KB` and `1536` as `1.5 KB`.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut unit = 0;
    let mut scale: u64 = 1;
    while unit + 1 < SIZE_UNITS.len() && bytes >= scale * 1024 {
        scale *= 1024;
        unit += 1;
    }

    #[allow(clippy::cast_precision_loss)]
    let value = bytes as f64 / scale as f64;
    let rendered = format!("{value:.1}");
    let rendered = rendered.strip_suffix(".0").unwrap_or(&rendered);

    format!("{rendered} {}", SIZE_UNITS[unit])
}

/// `dd/mm/yyyy hh:mm` in the zone carried by `date`.
///
/// Callers wanting local time pass `date.with_timezone(&chrono::Local)`.
pub fn format_date<Tz>(date: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    date.format("%d/%m/%Y %H:%M").to_string()
}

/// Relative French phrasing ("Il y a 3 jours") measured against now.
pub fn format_relative_date(date: &DateTime<Utc>) -> String {
    format_relative_date_at(date, &Utc::now())
}

/// Relative French phrasing measured against `now`.
pub fn format_relative_date_at(date: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let seconds = (*now - *date).num_seconds();
    if seconds < 60 {
        return "À l'instant".to_string();
    }

    let minutes = seconds / 60;
    if minutes < 60 {
        return format!("Il y a {minutes} minute{}", plural(minutes));
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("Il y a {hours} heure{}", plural(hours));
    }

    let days = hours / 24;
    if days < 7 {
        return format!("Il y a {days} jour{}", plural(days));
    }

    let weeks = days / 7;
    if weeks < 4 {
        return format!("Il y a {weeks} semaine{}", plural(weeks));
    }

    format!("Il y a {} mois", days / 30)
}

fn plural(n: i64) -> &'static str {
    if n > 1 { "s" } else { "" }
}

/// Cut `text` to `max_len` characters and append `...` when it was longer.
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let head: String = text.chars().take(max_len).collect();
    format!("{}...", head.trim())
}

/// Replace anything outside `[A-Za-z0-9._-]` with `_`, collapse runs of `_`
/// and trim a single leading/trailing `_`.
pub fn sanitize_file_name(file_name: &str) -> String {
    let mut out = String::with_capacity(file_name.len());
    for c in file_name.chars() {
        let c = if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
            c
        } else {
            '_'
        };
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }

    let out = out.strip_prefix('_').unwrap_or(&out);
    let out = out.strip_suffix('_').unwrap_or(out);
    out.to_string()
}
