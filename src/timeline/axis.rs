use chrono::{Datelike, Months, NaiveDate};

/// Months shown before the current month.
pub const PAST_MONTHS: u32 = 2;
/// Months shown after the current month.
pub const FUTURE_MONTHS: u32 = 18;
/// Fixed width of one header month cell, in pixels.
pub const MONTH_WIDTH: f32 = 96.0;

/// Truncate a date to the first day of its calendar month.
pub fn month_floor(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

/// The fixed visible window of the timeline and its date ↔ pixel mapping.
///
/// The window always spans whole calendar months: from the first day of
/// the month `PAST_MONTHS` months before `today` up to (exclusive) the
/// first day after the last future month. The mapping is piecewise linear
/// per month — every month occupies exactly `MONTH_WIDTH` pixels no matter
/// how many days it has — so the continuous mapping and the fixed-width
/// header cells agree pixel-for-pixel on month boundaries.
#[derive(Debug, Clone)]
pub struct TimeAxis {
    /// First day of the first visible month.
    pub start: NaiveDate,
    /// First day after the window (month-aligned, exclusive).
    pub end: NaiveDate,
    month_count: u32,
}

impl TimeAxis {
    /// Build the window around the given reference day. `today` is always
    /// inside the window, so the today marker is never clamped.
    pub fn around(today: NaiveDate) -> Self {
        let month_count = PAST_MONTHS + 1 + FUTURE_MONTHS;
        let start = month_floor(today) - Months::new(PAST_MONTHS);
        let end = start + Months::new(month_count);
        Self {
            start,
            end,
            month_count,
        }
    }

    pub fn month_count(&self) -> u32 {
        self.month_count
    }

    /// Total width of the timeline canvas in pixels.
    pub fn total_width(&self) -> f32 {
        self.month_count as f32 * MONTH_WIDTH
    }

    /// Last calendar day inside the window.
    pub fn last_day(&self) -> NaiveDate {
        self.end - chrono::Duration::days(1)
    }

    /// Convert a date to an x-pixel offset from the window start.
    ///
    /// Dates outside the window are pinned to the nearest edge instead of
    /// producing negative or overflowing coordinates.
    pub fn date_to_x(&self, date: NaiveDate) -> f32 {
        if date <= self.start {
            return 0.0;
        }
        if date >= self.end {
            return self.total_width();
        }
        let month_start = month_floor(date);
        let month_index = months_between(self.start, month_start);
        let days_in_month = ((month_start + Months::new(1)) - month_start).num_days();
        let day_fraction = date.day0() as f32 / days_in_month as f32;
        (month_index as f32 + day_fraction) * MONTH_WIDTH
    }

    /// Convert an x-pixel offset back to a date (inverse of `date_to_x`).
    pub fn x_to_date(&self, x: f32) -> NaiveDate {
        if x <= 0.0 {
            return self.start;
        }
        if x >= self.total_width() {
            return self.last_day();
        }
        let month_index = (x / MONTH_WIDTH).floor().min((self.month_count - 1) as f32);
        let month_start = self.start + Months::new(month_index as u32);
        let days_in_month = ((month_start + Months::new(1)) - month_start).num_days();
        let fraction = x / MONTH_WIDTH - month_index;
        let day = (fraction * days_in_month as f32).floor() as i64;
        month_start + chrono::Duration::days(day.min(days_in_month - 1))
    }

    /// First-of-month dates for the header cells, in window order.
    pub fn months(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..self.month_count).map(move |k| self.start + Months::new(k))
    }
}

/// Whole months from `a` to `b`; both must be first-of-month dates.
fn months_between(a: NaiveDate, b: NaiveDate) -> i32 {
    (b.year() - a.year()) * 12 + b.month0() as i32 - a.month0() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn pinned_axis() -> TimeAxis {
        // 2 months back, 18 forward from June 2025.
        TimeAxis::around(date(2025, 6, 15))
    }

    #[test]
    fn window_is_month_aligned_around_today() {
        let axis = pinned_axis();
        assert_eq!(axis.start, date(2025, 4, 1));
        assert_eq!(axis.end, date(2027, 1, 1));
        assert_eq!(axis.last_day(), date(2026, 12, 31));
        assert_eq!(axis.month_count(), 21);
        assert_eq!(axis.total_width(), 21.0 * MONTH_WIDTH);
    }

    #[test]
    fn endpoints_map_to_canvas_edges() {
        let axis = pinned_axis();
        assert_eq!(axis.date_to_x(axis.start), 0.0);
        assert_eq!(axis.date_to_x(axis.end), axis.total_width());
    }

    #[test]
    fn out_of_range_dates_are_clamped() {
        let axis = pinned_axis();
        assert_eq!(axis.date_to_x(date(2024, 12, 25)), 0.0);
        assert_eq!(axis.date_to_x(date(2027, 1, 1)), axis.total_width());
        assert_eq!(axis.date_to_x(date(2030, 6, 1)), axis.total_width());
    }

    #[test]
    fn header_months_land_exactly_on_cell_boundaries() {
        let axis = pinned_axis();
        for (k, month) in axis.months().enumerate() {
            let x = axis.date_to_x(month);
            assert!(
                (x - k as f32 * MONTH_WIDTH).abs() < 1e-3,
                "month {} ({}) mapped to {}, expected {}",
                k,
                month,
                x,
                k as f32 * MONTH_WIDTH
            );
        }
    }

    #[test]
    fn mapping_is_monotonic_across_the_window() {
        let axis = pinned_axis();
        let mut prev = axis.date_to_x(axis.start);
        let mut day = axis.start;
        while day <= axis.end {
            let x = axis.date_to_x(day);
            assert!(x >= prev, "date_to_x decreased at {}", day);
            prev = x;
            day += chrono::Duration::days(1);
        }
    }

    #[test]
    fn mid_month_interpolates_by_day_fraction() {
        let axis = pinned_axis();
        // April 16th: day0 = 15 of a 30-day month, half a cell in.
        assert!((axis.date_to_x(date(2025, 4, 16)) - MONTH_WIDTH / 2.0).abs() < 1e-3);
    }

    #[test]
    fn today_is_never_clamped() {
        let today = date(2025, 6, 15);
        let axis = TimeAxis::around(today);
        let x = axis.date_to_x(today);
        assert!(x > 0.0 && x < axis.total_width());
    }

    #[test]
    fn x_to_date_inverts_month_starts() {
        let axis = pinned_axis();
        for month in axis.months() {
            assert_eq!(axis.x_to_date(axis.date_to_x(month)), month);
        }
        assert_eq!(axis.x_to_date(-50.0), axis.start);
        assert_eq!(axis.x_to_date(axis.total_width() + 1.0), axis.last_day());
    }

    #[test]
    fn year_boundary_has_no_seam() {
        let axis = pinned_axis();
        let dec_31 = axis.date_to_x(date(2025, 12, 31));
        let jan_1 = axis.date_to_x(date(2026, 1, 1));
        assert!(dec_31 < jan_1);
        assert!((jan_1 - 9.0 * MONTH_WIDTH).abs() < 1e-3);
    }
}
