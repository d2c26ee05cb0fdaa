//! Date and time codecs, derived from [I64Codec] by [Codec::map] over epoch
//! projections. They inherit the integer codec's fixed size and ordering, so
//! chronological order is byte-wise order.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::codec::{Codec, I64Codec};

// Days from 0001-01-01 (CE) to 1970-01-01.
const EPOCH_DAYS_FROM_CE: i64 = 719_163;

/// `DateTime<Utc>` at second resolution, as epoch seconds.
pub fn utc_seconds() -> impl Codec<Value = DateTime<Utc>> {
    I64Codec.map(
        |t: &DateTime<Utc>| t.timestamp(),
        |secs| DateTime::from_timestamp(secs, 0).expect("decoded timestamp out of range"),
    )
}

/// `NaiveDate`, as days since the epoch.
pub fn naive_date() -> impl Codec<Value = NaiveDate> {
    I64Codec.map(
        |d: &NaiveDate| d.num_days_from_ce() as i64 - EPOCH_DAYS_FROM_CE,
        |days| {
            NaiveDate::from_num_days_from_ce_opt((days + EPOCH_DAYS_FROM_CE) as i32)
                .expect("decoded epoch day out of range")
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_from_slice, encode_to_vec};

    #[test]
    fn test_utc_seconds_roundtrip() {
        let codec = utc_seconds();
        for secs in [0i64, -1, 1_700_000_000] {
            let t = DateTime::from_timestamp(secs, 0).unwrap();
            let encoded = encode_to_vec(&codec, &t).unwrap();
            assert_eq!(decode_from_slice(&codec, &encoded), t);
        }
    }

    #[test]
    fn test_naive_date_epoch_is_day_zero() {
        let codec = naive_date();
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        assert_eq!(codec.size_bits(&epoch), 64);
        let encoded = encode_to_vec(&codec, &epoch).unwrap();
        assert_eq!(decode_from_slice(&codec, &encoded), epoch);
    }

    #[test]
    fn test_dates_sort_chronologically() {
        let codec = naive_date();
        let dates = [
            NaiveDate::from_ymd_opt(1969, 12, 31).unwrap(),
            NaiveDate::from_ymd_opt(1970, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 8, 29).unwrap(),
        ];
        for w in dates.windows(2) {
            let a = encode_to_vec(&codec, &w[0]).unwrap();
            let b = encode_to_vec(&codec, &w[1]).unwrap();
            assert!(a < b);
        }
    }
}
