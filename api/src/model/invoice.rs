use chrono::{DateTime, Utc};
use garde::Validate;
use kernel::model::{
    id::{HotelId, InvoiceId, ReservationId, RoomId, ServiceId, UserId},
    invoice::{
        Invoice, InvoiceHotel, InvoiceListOptions, InvoiceReservation, InvoiceRoom, InvoiceStatus,
        InvoiceUser,
    },
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InvoiceStatusName {
    Pending,
    Paid,
}

impl From<InvoiceStatus> for InvoiceStatusName {
    fn from(value: InvoiceStatus) -> Self {
        match value {
            InvoiceStatus::Pending => Self::Pending,
            InvoiceStatus::Paid => Self::Paid,
        }
    }
}

impl From<InvoiceStatusName> for InvoiceStatus {
    fn from(value: InvoiceStatusName) -> Self {
        match value {
            InvoiceStatusName::Pending => Self::Pending,
            InvoiceStatusName::Paid => Self::Paid,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateInvoiceRequest {
    #[garde(skip)]
    pub reservation_id: ReservationId,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceListQuery {
    #[garde(skip)]
    pub user_id: Option<UserId>,
    #[garde(skip)]
    pub status: Option<InvoiceStatusName>,
}

impl From<InvoiceListQuery> for InvoiceListOptions {
    fn from(value: InvoiceListQuery) -> Self {
        let InvoiceListQuery { user_id, status } = value;
        InvoiceListOptions {
            user_id,
            status: status.map(Into::into),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceResponse {
    pub invoice_id: InvoiceId,
    pub reservation: InvoiceReservationResponse,
    pub billed_to: InvoiceUserResponse,
    pub hotel: InvoiceHotelResponse,
    pub room: InvoiceRoomResponse,
    pub service_ids: Vec<ServiceId>,
    pub total: Decimal,
    pub status: InvoiceStatusName,
    pub created_at: DateTime<Utc>,
}

impl From<Invoice> for InvoiceResponse {
    fn from(value: Invoice) -> Self {
        let Invoice {
            invoice_id,
            reservation,
            billed_to,
            hotel,
            room,
            service_ids,
            total,
            status,
            is_active: _,
            created_at,
        } = value;
        Self {
            invoice_id,
            reservation: reservation.into(),
            billed_to: billed_to.into(),
            hotel: hotel.into(),
            room: room.into(),
            service_ids,
            total,
            status: status.into(),
            created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceReservationResponse {
    pub reservation_id: ReservationId,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

impl From<InvoiceReservation> for InvoiceReservationResponse {
    fn from(value: InvoiceReservation) -> Self {
        let InvoiceReservation {
            reservation_id,
            starts_at,
            ends_at,
        } = value;
        Self {
            reservation_id,
            starts_at,
            ends_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceUserResponse {
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
}

impl From<InvoiceUser> for InvoiceUserResponse {
    fn from(value: InvoiceUser) -> Self {
        let InvoiceUser {
            user_id,
            user_name,
            email,
        } = value;
        Self {
            user_id,
            user_name,
            email,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceHotelResponse {
    pub hotel_id: HotelId,
    pub name: String,
}

impl From<InvoiceHotel> for InvoiceHotelResponse {
    fn from(value: InvoiceHotel) -> Self {
        let InvoiceHotel { hotel_id, name } = value;
        Self { hotel_id, name }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRoomResponse {
    pub room_id: RoomId,
    pub room_number: String,
    pub price_per_night: Decimal,
}

impl From<InvoiceRoom> for InvoiceRoomResponse {
    fn from(value: InvoiceRoom) -> Self {
        let InvoiceRoom {
            room_id,
            room_number,
            price_per_night,
        } = value;
        Self {
            room_id,
            room_number,
            price_per_night,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceCreatedResponse {
    pub success: bool,
    pub msg: String,
    pub invoice: InvoiceResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicesResponse {
    pub success: bool,
    pub total: i64,
    pub invoices: Vec<InvoiceResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalIncomeResponse {
    pub success: bool,
    pub total_income: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyIncomeResponse {
    pub success: bool,
    pub msg: String,
    // index 0 が 1 月。支払いの無い月は 0
    pub income_per_month: [Decimal; 12],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invoice_status_names_round_trip() {
        let paid: InvoiceStatusName = serde_json::from_str(r#""PAID""#).unwrap();
        assert!(matches!(InvoiceStatus::from(paid), InvoiceStatus::Paid));
        assert_eq!(
            serde_json::to_string(&InvoiceStatusName::from(InvoiceStatus::Pending)).unwrap(),
            r#""PENDING""#
        );
    }
}
