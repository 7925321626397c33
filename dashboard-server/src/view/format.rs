//! Display formatting for the dashboard header and weather panel.
//!
//! The display uses exactly three renderings of the current time, all in
//! English with uppercase text, so the output never depends on the host
//! locale.

use chrono::NaiveDateTime;

/// A recognised rendering of a datetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayFormat {
    /// 24-hour clock with 2-digit hour and minute: `09:05`.
    Clock,
    /// Short weekday, uppercase: `FRI`.
    WeekdayShort,
    /// 2-digit day and short month, uppercase: `01 MAR`.
    DayMonthShort,
}

impl DisplayFormat {
    fn pattern(self) -> &'static str {
        match self {
            DisplayFormat::Clock => "%H:%M",
            DisplayFormat::WeekdayShort => "%a",
            DisplayFormat::DayMonthShort => "%d %b",
        }
    }

    /// Render `at` in this format.
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use dashboard_server::view::DisplayFormat;
    ///
    /// let at = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(9, 5, 0).unwrap();
    /// assert_eq!(DisplayFormat::Clock.render(at), "09:05");
    /// assert_eq!(DisplayFormat::WeekdayShort.render(at), "FRI");
    /// assert_eq!(DisplayFormat::DayMonthShort.render(at), "01 MAR");
    /// ```
    pub fn render(self, at: NaiveDateTime) -> String {
        at.format(self.pattern()).to_string().to_uppercase()
    }
}

/// Format a temperature as `"<value>°C"`.
///
/// The value is printed as the shortest decimal that round-trips, so `12.0`
/// reads `12` and `18.5` reads `18.5`. Negative zero prints as `0`.
pub fn celsius(value: f64) -> String {
    if value == 0.0 {
        return "0°C".to_string();
    }
    format!("{value}°C")
}
