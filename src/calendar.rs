use chrono::{Datelike, Months, NaiveDate};

/// add calendar months, keeping the day of month and clipping to month length
/// (jan 31 + 1 month = feb 28/29)
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

/// whole calendar months from `start` to `end`; zero when `end` precedes `start`
pub fn whole_months_between(start: NaiveDate, end: NaiveDate) -> u32 {
    if end <= start {
        return 0;
    }

    let raw = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    let mut months = raw.max(0) as u32;

    // a month only counts once its anniversary (clipped) has been reached
    while months > 0 && add_months(start, months) > end {
        months -= 1;
    }

    months
}

/// signed day count `end - start`
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}
