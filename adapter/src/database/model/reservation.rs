use chrono::{DateTime, Utc};
use kernel::model::{
    id::{ReservationId, RoomId, UserId},
    reservation::{
        Reservation, ReservationPeriod, ReservationRoom, ReservationService, ReservationUser,
    },
};
use rust_decimal::Decimal;
use shared::error::{AppError, AppResult};
use uuid::Uuid;

// 一覧・取得系で使う型。部屋と利用者の表示項目まで JOIN 済み
#[derive(sqlx::FromRow)]
pub struct ReservationRow {
    pub reservation_id: ReservationId,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub service_ids: Vec<Uuid>,
    pub room_id: RoomId,
    pub room_number: String,
    pub price_per_night: Decimal,
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
}

impl ReservationRow {
    // サービスの表示項目は別クエリで解決するため、From ではなく
    // 引数をとる変換メソッドにしている
    pub fn into_reservation(self, services: Vec<ReservationService>) -> AppResult<Reservation> {
        let ReservationRow {
            reservation_id,
            starts_at,
            ends_at,
            is_active,
            created_at,
            service_ids: _,
            room_id,
            room_number,
            price_per_night,
            user_id,
            user_name,
            email,
        } = self;
        // CHECK 制約があるので通常は失敗しない。失敗はデータ破損
        let period = ReservationPeriod::new(starts_at, ends_at).map_err(|_| {
            AppError::ConversionEntityError(format!(
                "reservation ({}) has an inverted period",
                reservation_id
            ))
        })?;
        Ok(Reservation {
            reservation_id,
            period,
            is_active,
            created_at,
            room: ReservationRoom {
                room_id,
                room_number,
                price_per_night,
            },
            reserved_by: ReservationUser {
                user_id,
                user_name,
                email,
            },
            services,
        })
    }
}

// 更新時に現在値を読むための型
#[derive(sqlx::FromRow)]
pub struct ReservationStateRow {
    pub room_id: RoomId,
    pub user_id: UserId,
    pub service_ids: Vec<Uuid>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub is_active: bool,
}

// 月別集計の 1 行分
#[derive(sqlx::FromRow)]
pub struct MonthlyCountRow {
    pub month: i32,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn an_inverted_stored_period_is_reported_as_corruption() {
        let row = ReservationRow {
            reservation_id: ReservationId::new(),
            starts_at: Utc.with_ymd_and_hms(2025, 1, 12, 0, 0, 0).unwrap(),
            ends_at: Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap(),
            is_active: true,
            created_at: Utc::now(),
            service_ids: vec![],
            room_id: RoomId::new(),
            room_number: "101".into(),
            price_per_night: dec!(100.00),
            user_id: UserId::new(),
            user_name: "tester".into(),
            email: "tester@example.com".into(),
        };
        assert!(matches!(
            row.into_reservation(vec![]),
            Err(AppError::ConversionEntityError(_))
        ));
    }
}
