use chrono::{DateTime, Utc};
use garde::Validate;
use kernel::model::{
    id::{ReservationId, RoomId, ServiceId, UserId},
    list::PaginatedList,
    reservation::{
        event::UpdateReservation, Reservation, ReservationPeriod, ReservationRoom,
        ReservationService, ReservationUser,
    },
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    #[garde(skip)]
    pub room_id: RoomId,
    #[garde(skip)]
    pub user_id: UserId,
    // 同じサービス ID の重複は意図的に許可している
    #[garde(skip)]
    #[serde(default)]
    pub service_ids: Vec<ServiceId>,
    #[garde(skip)]
    pub starts_at: DateTime<Utc>,
    #[garde(skip)]
    pub ends_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReservationRequest {
    #[garde(skip)]
    pub room_id: Option<RoomId>,
    #[garde(skip)]
    pub user_id: Option<UserId>,
    #[garde(skip)]
    pub service_ids: Option<Vec<ServiceId>>,
    #[garde(skip)]
    pub starts_at: Option<DateTime<Utc>>,
    #[garde(skip)]
    pub ends_at: Option<DateTime<Utc>>,
}

impl UpdateReservationRequest {
    // 期間は必ず両端そろえて差し替えさせる。片方だけの変更は
    // どちらの不変条件を守るべきか曖昧になるため受け付けない
    pub fn try_into_event(self, reservation_id: ReservationId) -> AppResult<UpdateReservation> {
        let UpdateReservationRequest {
            room_id,
            user_id,
            service_ids,
            starts_at,
            ends_at,
        } = self;
        let period = match (starts_at, ends_at) {
            (None, None) => None,
            (Some(starts_at), Some(ends_at)) => Some(ReservationPeriod::new(starts_at, ends_at)?),
            _ => {
                return Err(AppError::UnprocessableEntity(
                    "startsAt and endsAt must be provided together".into(),
                ))
            }
        };
        Ok(UpdateReservation {
            reservation_id,
            room_id,
            user_id,
            service_ids,
            period,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub reservation_id: ReservationId,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub room: ReservationRoomResponse,
    pub reserved_by: ReservationUserResponse,
    pub services: Vec<ReservationServiceResponse>,
}

impl From<Reservation> for ReservationResponse {
    fn from(value: Reservation) -> Self {
        let Reservation {
            reservation_id,
            period,
            is_active,
            created_at,
            room,
            reserved_by,
            services,
        } = value;
        Self {
            reservation_id,
            starts_at: period.starts_at(),
            ends_at: period.ends_at(),
            is_active,
            created_at,
            room: room.into(),
            reserved_by: reserved_by.into(),
            services: services
                .into_iter()
                .map(ReservationServiceResponse::from)
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRoomResponse {
    pub room_id: RoomId,
    pub room_number: String,
    pub price_per_night: Decimal,
}

impl From<ReservationRoom> for ReservationRoomResponse {
    fn from(value: ReservationRoom) -> Self {
        let ReservationRoom {
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
pub struct ReservationUserResponse {
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
}

impl From<ReservationUser> for ReservationUserResponse {
    fn from(value: ReservationUser) -> Self {
        let ReservationUser {
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
pub struct ReservationServiceResponse {
    pub service_id: ServiceId,
    pub name: String,
    pub price: Decimal,
}

impl From<ReservationService> for ReservationServiceResponse {
    fn from(value: ReservationService) -> Self {
        let ReservationService {
            service_id,
            name,
            price,
        } = value;
        Self {
            service_id,
            name,
            price,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationCreatedResponse {
    pub success: bool,
    pub msg: String,
    pub reservation: ReservationResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationsResponse {
    pub success: bool,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub reservations: Vec<ReservationResponse>,
}

impl From<PaginatedList<Reservation>> for ReservationsResponse {
    fn from(value: PaginatedList<Reservation>) -> Self {
        let PaginatedList {
            total,
            limit,
            offset,
            items,
        } = value;
        Self {
            success: true,
            total,
            limit,
            offset,
            reservations: items.into_iter().map(ReservationResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationsThisMonthResponse {
    pub success: bool,
    pub msg: String,
    pub reservations_this_month: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReservationStatsResponse {
    pub success: bool,
    pub msg: String,
    // index 0 が 1 月。予約の無い月は 0
    pub reservations_per_month: [i64; 12],
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn replacing_only_one_period_boundary_is_rejected() {
        let req = UpdateReservationRequest {
            room_id: None,
            user_id: None,
            service_ids: None,
            starts_at: Some(Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap()),
            ends_at: None,
        };
        assert!(req.try_into_event(ReservationId::new()).is_err());
    }

    #[test]
    fn a_service_list_only_patch_keeps_the_period_untouched() {
        let req = UpdateReservationRequest {
            room_id: None,
            user_id: None,
            service_ids: Some(vec![ServiceId::new()]),
            starts_at: None,
            ends_at: None,
        };
        let event = req.try_into_event(ReservationId::new()).unwrap();
        assert!(event.period.is_none());
        assert!(event.service_ids.is_some());
    }

    #[test]
    fn an_inverted_replacement_period_is_rejected() {
        let req = UpdateReservationRequest {
            room_id: None,
            user_id: None,
            service_ids: None,
            starts_at: Some(Utc.with_ymd_and_hms(2025, 1, 12, 0, 0, 0).unwrap()),
            ends_at: Some(Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap()),
        };
        assert!(req.try_into_event(ReservationId::new()).is_err());
    }
}
