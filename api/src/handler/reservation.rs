use crate::{
    extractor::AuthorizedUser,
    model::{
        reservation::{
            CreateReservationRequest, MonthlyReservationStatsResponse,
            ReservationCreatedResponse, ReservationResponse, ReservationsResponse,
            ReservationsThisMonthResponse, UpdateReservationRequest,
        },
        ListQuery, MessageResponse, YearQuery,
    },
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{Datelike, Utc};
use garde::Validate;
use kernel::model::{
    id::ReservationId,
    report::current_month_range,
    reservation::{
        event::{CancelReservation, CreateReservation},
        ReservationPeriod,
    },
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn register_reservation(
    _user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateReservationRequest>,
) -> AppResult<(StatusCode, Json<ReservationCreatedResponse>)> {
    req.validate(&())?;

    let CreateReservationRequest {
        room_id,
        user_id,
        service_ids,
        starts_at,
        ends_at,
    } = req;
    let period = ReservationPeriod::new(starts_at, ends_at)?;

    let reservation_id = registry
        .reservation_repository()
        .create(CreateReservation::new(room_id, user_id, service_ids, period))
        .await?;

    // 保存後に部屋・利用者・サービスを展開した形で返す
    let reservation = registry
        .reservation_repository()
        .find_by_id(reservation_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("Reservation not found".into()))?;

    Ok((
        StatusCode::CREATED,
        Json(ReservationCreatedResponse {
            success: true,
            msg: "Reservation added successfully".into(),
            reservation: ReservationResponse::from(reservation),
        }),
    ))
}

pub async fn show_reservation_list(
    _user: AuthorizedUser,
    Query(query): Query<ListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationsResponse>> {
    query.validate(&())?;

    registry
        .reservation_repository()
        .find_active_all(query.into())
        .await
        .map(ReservationsResponse::from)
        .map(Json)
}

pub async fn show_reservation(
    _user: AuthorizedUser,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationResponse>> {
    registry
        .reservation_repository()
        .find_by_id(reservation_id)
        .await
        .and_then(|reservation| match reservation {
            Some(reservation) => Ok(Json(reservation.into())),
            None => Err(AppError::EntityNotFound("Reservation not found".into())),
        })
}

pub async fn update_reservation(
    _user: AuthorizedUser,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateReservationRequest>,
) -> AppResult<Json<MessageResponse>> {
    req.validate(&())?;

    let event = req.try_into_event(reservation_id)?;
    registry
        .reservation_repository()
        .update(event)
        .await
        .map(|_| Json(MessageResponse::new("Reservation updated successfully")))
}

pub async fn delete_reservation(
    _user: AuthorizedUser,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<MessageResponse>> {
    registry
        .reservation_repository()
        .cancel(CancelReservation { reservation_id })
        .await
        .map(|_| Json(MessageResponse::new("Reservation disabled")))
}

// 今月（UTC の暦月）に作成された有効な予約の件数
pub async fn reservations_this_month(
    _user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationsThisMonthResponse>> {
    let (from, until) = current_month_range(Utc::now());
    let count = registry
        .reservation_repository()
        .count_created_in(from, until)
        .await?;

    Ok(Json(ReservationsThisMonthResponse {
        success: true,
        msg: "Reservations made this month".into(),
        reservations_this_month: count,
    }))
}

// 月別予約作成数。12 要素で返し、無い月は 0。年の省略時は今年
pub async fn monthly_reservation_stats(
    _user: AuthorizedUser,
    Query(query): Query<YearQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<MonthlyReservationStatsResponse>> {
    query.validate(&())?;

    let year = query.year.unwrap_or_else(|| Utc::now().year());
    let counts = registry
        .reservation_repository()
        .monthly_created_counts(year)
        .await?;

    Ok(Json(MonthlyReservationStatsResponse {
        success: true,
        msg: "Reservations per month".into(),
        reservations_per_month: counts,
    }))
}
