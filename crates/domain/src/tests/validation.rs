// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, format_date, parse_date, validate_rejection_reason, validate_year};
use time::Date;
use time::macros::date;

#[test]
fn test_parse_date_accepts_iso_dates() {
    let parsed: Date = parse_date("2026-03-02").unwrap();
    assert_eq!(parsed, date!(2026 - 03 - 02));

    let padded: Date = parse_date("  2026-12-31 ").unwrap();
    assert_eq!(padded, date!(2026 - 12 - 31));
}

#[test]
fn test_parse_date_drops_time_of_day() {
    assert_eq!(
        parse_date("2026-03-02T09:00:00Z").unwrap(),
        date!(2026 - 03 - 02)
    );
    // The date as written wins over the UTC date.
    assert_eq!(
        parse_date("2026-03-06T23:30:00-05:00").unwrap(),
        date!(2026 - 03 - 06)
    );
    assert_eq!(
        parse_date("2026-03-02T09:00:00.250").unwrap(),
        date!(2026 - 03 - 02)
    );
    assert_eq!(
        parse_date("2026-03-02 17:45:00").unwrap(),
        date!(2026 - 03 - 02)
    );
}

#[test]
fn test_parse_date_rejects_invalid_dates() {
    for input in [
        "",
        "   ",
        "2026-02-30",
        "2026-02-30T09:00:00Z",
        "2026-03-02T25:00:00",
        "2026-03-02Tnoon",
        "2026/03/02",
        "02-03-2026",
        "tomorrow",
    ] {
        assert!(
            matches!(parse_date(input), Err(DomainError::DateParseError { .. })),
            "expected parse failure for {input:?}"
        );
    }
}

#[test]
fn test_format_date() {
    assert_eq!(format_date(date!(2026 - 01 - 05)), "2026-01-05");
}

#[test]
fn test_validate_rejection_reason() {
    assert_eq!(
        validate_rejection_reason(Some("  insufficient activity ")).unwrap(),
        "insufficient activity"
    );
    assert_eq!(
        validate_rejection_reason(Some("   ")),
        Err(DomainError::MissingReason)
    );
    assert_eq!(validate_rejection_reason(None), Err(DomainError::MissingReason));
}

#[test]
fn test_validate_year() {
    assert!(validate_year(2026).is_ok());
    assert!(validate_year(2000).is_ok());
    assert!(validate_year(2200).is_ok());
    assert_eq!(validate_year(1999), Err(DomainError::InvalidYear(1999)));
    assert_eq!(validate_year(2201), Err(DomainError::InvalidYear(2201)));
}
