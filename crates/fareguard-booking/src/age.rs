use chrono::{Datelike, NaiveDate};

/// Age in whole years at `today` for someone born on `dob`.
///
/// Counts completed years only; the year ticks over on the birthday.
pub fn age_in_years(dob: NaiveDate, today: NaiveDate) -> i64 {
    let mut age = i64::from(today.year() - dob.year());
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age
}
