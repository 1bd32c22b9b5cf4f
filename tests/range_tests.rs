mod common;
use common::date;

use stempel::export::range::parse_range;

#[test]
fn test_single_periods() {
    assert_eq!(
        parse_range("2025").unwrap(),
        (date("2025-01-01"), date("2025-12-31"))
    );
    assert_eq!(
        parse_range("2024-02").unwrap(),
        (date("2024-02-01"), date("2024-02-29"))
    );
    assert_eq!(
        parse_range("2025-03-04").unwrap(),
        (date("2025-03-04"), date("2025-03-04"))
    );
}

#[test]
fn test_intervals() {
    assert_eq!(
        parse_range("2024:2025").unwrap(),
        (date("2024-01-01"), date("2025-12-31"))
    );
    assert_eq!(
        parse_range("2025-01:2025-03").unwrap(),
        (date("2025-01-01"), date("2025-03-31"))
    );
    assert_eq!(
        parse_range(" 2025-03-01 : 2025-03-10 ").unwrap(),
        (date("2025-03-01"), date("2025-03-10"))
    );
}

#[test]
fn test_invalid_ranges() {
    for bad in ["2025-13", "2025-03:2025", "2025-03-10:2025-03-01", "25", "2025-02-30"] {
        let err = parse_range(bad).unwrap_err();
        assert_eq!(err.kind(), "InputError", "range {bad}");
    }
}
