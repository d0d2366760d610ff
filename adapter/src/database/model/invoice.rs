use chrono::{DateTime, Utc};
use kernel::model::{
    id::{HotelId, InvoiceId, ReservationId, RoomId, UserId},
    invoice::{
        Invoice, InvoiceHotel, InvoiceReservation, InvoiceRoom, InvoiceStatus, InvoiceUser,
    },
};
use rust_decimal::Decimal;
use uuid::Uuid;

#[derive(sqlx::FromRow)]
pub struct InvoiceRow {
    pub invoice_id: InvoiceId,
    pub reservation_id: ReservationId,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
    pub hotel_id: HotelId,
    pub hotel_name: String,
    pub room_id: RoomId,
    pub room_number: String,
    pub price_per_night: Decimal,
    pub service_ids: Vec<Uuid>,
    pub total: Decimal,
    pub status: InvoiceStatus,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<InvoiceRow> for Invoice {
    fn from(value: InvoiceRow) -> Self {
        let InvoiceRow {
            invoice_id,
            reservation_id,
            starts_at,
            ends_at,
            user_id,
            user_name,
            email,
            hotel_id,
            hotel_name,
            room_id,
            room_number,
            price_per_night,
            service_ids,
            total,
            status,
            is_active,
            created_at,
        } = value;
        Invoice {
            invoice_id,
            reservation: InvoiceReservation {
                reservation_id,
                starts_at,
                ends_at,
            },
            billed_to: InvoiceUser {
                user_id,
                user_name,
                email,
            },
            hotel: InvoiceHotel {
                hotel_id,
                name: hotel_name,
            },
            room: InvoiceRoom {
                room_id,
                room_number,
                price_per_night,
            },
            service_ids: service_ids.into_iter().map(Into::into).collect(),
            total,
            status,
            is_active,
            created_at,
        }
    }
}

// 発行時に予約・部屋から読む元ネタ
#[derive(sqlx::FromRow)]
pub struct InvoiceSourceRow {
    pub reservation_id: ReservationId,
    pub user_id: UserId,
    pub service_ids: Vec<Uuid>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub is_active: bool,
    pub room_id: RoomId,
    pub hotel_id: HotelId,
    pub price_per_night: Decimal,
}

// 支払い状態遷移の事前チェックに使う型
#[derive(sqlx::FromRow)]
pub struct InvoicePaymentStateRow {
    pub status: InvoiceStatus,
    pub is_active: bool,
}

// 月別収入集計の 1 行分
#[derive(sqlx::FromRow)]
pub struct MonthlyIncomeRow {
    pub month: i32,
    pub income: Decimal,
}
