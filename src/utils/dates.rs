// ============================================================================
// DATES - Fechas `YYYY-MM-DD` del dashboard
// ============================================================================

use chrono::{Days, Local, NaiveDate};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Fecha local de hoy
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Marca de tiempo local RFC 3339. El backend guarda el día con sus primeros
/// 10 caracteres, así que coincide con `today()`.
pub fn now_timestamp() -> String {
    Local::now().to_rfc3339()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.get(..10)?, DATE_FORMAT).ok()
}

pub fn previous_day(date: NaiveDate) -> NaiveDate {
    date.checked_sub_days(Days::new(1)).unwrap_or(date)
}

/// Día siguiente, sin pasar de `today`
pub fn next_day(date: NaiveDate, today: NaiveDate) -> NaiveDate {
    match date.checked_add_days(Days::new(1)) {
        Some(next) if next <= today => next,
        _ => date,
    }
}

/// Etiqueta del selector de fecha: "Today", "Yesterday" o "Mon, Oct 12"
pub fn day_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "Today".to_string()
    } else if Some(date) == today.checked_sub_days(Days::new(1)) {
        "Yesterday".to_string()
    } else {
        date.format("%a, %b %-d").to_string()
    }
}

/// Fecha corta para el eje del gráfico ("Oct 12")
pub fn short_label(value: &str) -> String {
    match parse_date(value) {
        Some(date) => date.format("%b %-d").to_string(),
        None => value.to_string(),
    }
}
