use crate::model::id::{HotelId, InvoiceId, ReservationId, RoomId, ServiceId, UserId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

pub mod event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "invoice_status", rename_all = "UPPERCASE")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

// 請求書。total は発行時に確定し、以後は status 以外変更しない
#[derive(Debug)]
pub struct Invoice {
    pub invoice_id: InvoiceId,
    pub reservation: InvoiceReservation,
    pub billed_to: InvoiceUser,
    pub hotel: InvoiceHotel,
    pub room: InvoiceRoom,
    pub service_ids: Vec<ServiceId>,
    pub total: Decimal,
    pub status: InvoiceStatus,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct InvoiceReservation {
    pub reservation_id: ReservationId,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct InvoiceUser {
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
}

#[derive(Debug)]
pub struct InvoiceHotel {
    pub hotel_id: HotelId,
    pub name: String,
}

#[derive(Debug)]
pub struct InvoiceRoom {
    pub room_id: RoomId,
    pub room_number: String,
    pub price_per_night: Decimal,
}

// 請求書一覧の絞り込み条件
#[derive(Debug, Clone, Copy, Default)]
pub struct InvoiceListOptions {
    pub user_id: Option<UserId>,
    pub status: Option<InvoiceStatus>,
}

// 部屋代 × 日数に各サービスの現在価格を足し込む。
// 同じサービスが複数回指定されていればその回数分を加算し、
// 合計は小数第 2 位に丸める
pub fn billed_total(
    price_per_night: Decimal,
    billable_days: i64,
    service_prices: &[Decimal],
) -> Decimal {
    let room_total = price_per_night * Decimal::from(billable_days);
    let services_total: Decimal = service_prices.iter().copied().sum();
    (room_total + services_total).round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn room_rate_times_days_plus_services_with_multiplicity() {
        // 100.00 の部屋に 3 日、25.00 のサービスを 2 回
        let total = billed_total(dec!(100.00), 3, &[dec!(25.00), dec!(25.00)]);
        assert_eq!(total, dec!(350.00));
    }

    #[test]
    fn a_stay_without_services_bills_the_room_only() {
        assert_eq!(billed_total(dec!(79.90), 2, &[]), dec!(159.80));
    }

    #[test]
    fn totals_are_rounded_to_two_decimal_places() {
        let total = billed_total(dec!(33.333), 3, &[dec!(0.004)]);
        assert_eq!(total, dec!(100.00));
    }
}
