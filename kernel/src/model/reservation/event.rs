use crate::model::{
    id::{ReservationId, RoomId, ServiceId, UserId},
    reservation::ReservationPeriod,
};
use derive_new::new;

#[derive(Debug, new)]
pub struct CreateReservation {
    pub room_id: RoomId,
    pub user_id: UserId,
    // 同じサービスを複数回含めてよい（その分だけ課金される）
    pub service_ids: Vec<ServiceId>,
    pub period: ReservationPeriod,
}

#[derive(Debug, new)]
pub struct UpdateReservation {
    pub reservation_id: ReservationId,
    pub room_id: Option<RoomId>,
    pub user_id: Option<UserId>,
    pub service_ids: Option<Vec<ServiceId>>,
    pub period: Option<ReservationPeriod>,
}

#[derive(Debug, new)]
pub struct CancelReservation {
    pub reservation_id: ReservationId,
}
