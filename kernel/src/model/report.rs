use chrono::{DateTime, Datelike, TimeZone, Utc};

// 集計はストア側の GROUP BY に寄せ、ここでは月番号→12 スロットの
// 展開と期間境界の計算だけを持つ

// 1 始まりの月番号で届いた集計値を 12 要素の配列に展開する。
// index 0 が 1 月。該当する月が無ければ既定値（0）のまま
pub fn fill_monthly_slots<T: Copy + Default>(
    entries: impl IntoIterator<Item = (i32, T)>,
) -> [T; 12] {
    let mut slots = [T::default(); 12];
    for (month, value) in entries {
        if (1..=12).contains(&month) {
            slots[(month - 1) as usize] = value;
        }
    }
    slots
}

// now が属する暦月の範囲（UTC、半開区間）
pub fn current_month_range(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    month_start(now.year(), now.month())
}

// 指定した年の 1/1 00:00 から翌年の 1/1 00:00 まで（UTC、半開区間）
pub fn year_range(year: i32) -> (DateTime<Utc>, DateTime<Utc>) {
    (first_instant_of(year, 1), first_instant_of(year + 1, 1))
}

fn month_start(year: i32, month: u32) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = first_instant_of(year, month);
    let end = if month == 12 {
        first_instant_of(year + 1, 1)
    } else {
        first_instant_of(year, month + 1)
    };
    (start, end)
}

fn first_instant_of(year: i32, month: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0)
        .single()
        .expect("the first instant of a month is always a valid UTC timestamp")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_are_zero_filled_and_indexed_from_january() {
        let slots = fill_monthly_slots([(1, 4_i64), (3, 2), (12, 7)]);
        assert_eq!(slots.len(), 12);
        assert_eq!(slots[0], 4);
        assert_eq!(slots[1], 0);
        assert_eq!(slots[2], 2);
        assert_eq!(slots[11], 7);
    }

    #[test]
    fn out_of_range_months_are_ignored() {
        let slots = fill_monthly_slots([(0, 9_i64), (13, 9)]);
        assert_eq!(slots, [0; 12]);
    }

    #[test]
    fn the_current_month_range_is_a_half_open_calendar_month() {
        let now = Utc.with_ymd_and_hms(2025, 7, 19, 13, 45, 0).unwrap();
        let (start, end) = current_month_range(now);
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 8, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn december_rolls_over_into_the_next_year() {
        let now = Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap();
        let (_, end) = current_month_range(now);
        assert_eq!(end, Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn a_year_range_spans_january_through_december() {
        let (start, end) = year_range(2025);
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
    }
}
