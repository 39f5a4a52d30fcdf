//! Date-filter string evaluation.
//!
//! Saved views persist date filters as `"<value>;<operator>;<anchor?>"`,
//! e.g. `"2024-05-01;after"` or `"2_weeks;before;fromnow"`. The shape is
//! a de facto wire format: it must be parsed exactly, and anything
//! outside it (missing segments, unknown operators, tokens outside the
//! closed relative-duration set) evaluates to false rather than erroring,
//! since persisted filters can be stale or hand-written.

use chrono::NaiveDate;

/// Closed set of relative-duration tokens, in calendar days.
///
/// `2_months` is only defined for the `after` arm; the `before` arm of
/// the original enumeration stops at `1_months` and that asymmetry is
/// kept as-is.
fn duration_days(token: &str) -> Option<i64> {
    match token {
        "1_weeks" => Some(7),
        "2_weeks" => Some(14),
        "1_months" => Some(30),
        "2_months" => Some(60),
        _ => None,
    }
}

/// Check whether `date` satisfies one persisted date-filter string.
pub fn satisfies_date_filter(date: NaiveDate, filter: &str, today: NaiveDate) -> bool {
    let mut parts = filter.split(';');
    let value = parts.next().unwrap_or("");
    let operator = parts.next().unwrap_or("");
    let anchor = parts.next();

    match anchor {
        None | Some("") => {
            let Ok(absolute) = value.parse::<NaiveDate>() else {
                return false;
            };
            match operator {
                "after" => date >= absolute,
                "before" => date <= absolute,
                _ => false,
            }
        }
        Some("fromnow") => {
            let Some(days) = duration_days(value) else {
                return false;
            };
            // Calendar-day difference of the record date from today:
            // negative means past, positive means future.
            let diff = date.signed_duration_since(today).num_days();
            match operator {
                // At least `days` in the past.
                "before" if value != "2_months" => diff <= -days,
                // At least `days` in the future.
                "after" => diff >= days,
                _ => false,
            }
        }
        Some(_) => false,
    }
}
