use chrono::NaiveDate;

/// Task completion flags are cleared at most once per calendar day. A user
/// with no recorded reset has never been reset and is always due.
pub fn is_reset_due(last_reset: Option<NaiveDate>, today: NaiveDate) -> bool {
    last_reset != Some(today)
}
