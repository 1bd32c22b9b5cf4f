/// Automatic break deduction.
///
/// - up to `threshold`: nothing
/// - between `threshold` and `threshold + max_deduction`: only the excess, so
///   the net never drops below the threshold
/// - above: the full `max_deduction`
pub fn break_deduction(raw_minutes: i64, threshold: i64, max_deduction: i64) -> i64 {
    if raw_minutes <= threshold {
        0
    } else {
        (raw_minutes - threshold).min(max_deduction)
    }
}
