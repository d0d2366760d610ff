use crate::model::id::{ReservationId, RoomId, ServiceId, UserId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::error::{AppError, AppResult};

pub mod event;

const SECONDS_PER_DAY: i64 = 86_400;

// 予約窓。重複判定は半開区間 [starts_at, ends_at) で行う
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservationPeriod {
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
}

impl ReservationPeriod {
    pub fn new(starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> AppResult<Self> {
        if starts_at >= ends_at {
            return Err(AppError::UnprocessableEntity(
                "reservation start must precede its end".into(),
            ));
        }
        Ok(Self { starts_at, ends_at })
    }

    pub fn starts_at(&self) -> DateTime<Utc> {
        self.starts_at
    }

    pub fn ends_at(&self) -> DateTime<Utc> {
        self.ends_at
    }

    // 請求対象の日数。両端の日も 1 日として数える
    pub fn billable_days(&self) -> i64 {
        let seconds = (self.ends_at - self.starts_at).num_seconds();
        (seconds + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY + 1
    }
}

#[derive(Debug)]
pub struct Reservation {
    pub reservation_id: ReservationId,
    pub period: ReservationPeriod,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub room: ReservationRoom,
    pub reserved_by: ReservationUser,
    pub services: Vec<ReservationService>,
}

// 一覧表示に必要な項目だけを部屋から持ってくる
#[derive(Debug)]
pub struct ReservationRoom {
    pub room_id: RoomId,
    pub room_number: String,
    pub price_per_night: Decimal,
}

#[derive(Debug)]
pub struct ReservationUser {
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct ReservationService {
    pub service_id: ServiceId,
    pub name: String,
    pub price: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap()
    }

    #[test]
    fn period_rejects_inverted_and_empty_windows() {
        let t = at(2025, 1, 10, 0);
        assert!(ReservationPeriod::new(t, t).is_err());
        assert!(ReservationPeriod::new(at(2025, 1, 12, 0), t).is_err());
    }

    #[test]
    fn both_boundary_days_are_billed() {
        // 1/10 〜 1/12 の 3 日間
        let period = ReservationPeriod::new(at(2025, 1, 10, 0), at(2025, 1, 12, 0)).unwrap();
        assert_eq!(period.billable_days(), 3);

        // 1 泊でも両端の 2 日分
        let period = ReservationPeriod::new(at(2025, 1, 10, 0), at(2025, 1, 11, 0)).unwrap();
        assert_eq!(period.billable_days(), 2);
    }

    #[test]
    fn partial_days_round_up_before_the_inclusive_day_is_added() {
        // 1/10 15:00 〜 1/12 11:00 は切り上げで 2 日 + 1
        let period = ReservationPeriod::new(at(2025, 1, 10, 15), at(2025, 1, 12, 11)).unwrap();
        assert_eq!(period.billable_days(), 3);
    }
}
