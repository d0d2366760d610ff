use crate::{
    extractor::AuthorizedUser,
    model::{
        hotel::{
            CreateHotelRequest, HotelCreatedResponse, HotelResponse, HotelRankingResponse,
            HotelsResponse, TopReservedHotelsResponse, TopReservedQuery, UpdateHotelRequest,
            UpdateHotelRequestWithId,
        },
        ListQuery, MessageResponse,
    },
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{hotel::event::DeleteHotel, id::HotelId};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn register_hotel(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateHotelRequest>,
) -> AppResult<(StatusCode, Json<HotelCreatedResponse>)> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }
    req.validate(&())?;

    let hotel_id = registry.hotel_repository().create(req.into()).await?;
    let hotel = registry
        .hotel_repository()
        .find_by_id(hotel_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("Hotel not found".into()))?;

    Ok((
        StatusCode::CREATED,
        Json(HotelCreatedResponse {
            success: true,
            msg: "Hotel added successfully".into(),
            hotel: HotelResponse::from(hotel),
        }),
    ))
}

pub async fn show_hotel_list(
    _user: AuthorizedUser,
    Query(query): Query<ListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<HotelsResponse>> {
    query.validate(&())?;

    registry
        .hotel_repository()
        .find_active_all(query.into())
        .await
        .map(HotelsResponse::from)
        .map(Json)
}

pub async fn show_hotel(
    _user: AuthorizedUser,
    Path(hotel_id): Path<HotelId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<HotelResponse>> {
    registry
        .hotel_repository()
        .find_by_id(hotel_id)
        .await
        .and_then(|hotel| match hotel {
            Some(hotel) => Ok(Json(hotel.into())),
            None => Err(AppError::EntityNotFound("Hotel not found".into())),
        })
}

pub async fn update_hotel(
    user: AuthorizedUser,
    Path(hotel_id): Path<HotelId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateHotelRequest>,
) -> AppResult<Json<MessageResponse>> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }
    req.validate(&())?;

    let update_hotel = UpdateHotelRequestWithId::new(hotel_id, req);
    registry
        .hotel_repository()
        .update(update_hotel.into())
        .await
        .map(|_| Json(MessageResponse::new("Updating hotel")))
}

pub async fn delete_hotel(
    user: AuthorizedUser,
    Path(hotel_id): Path<HotelId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<MessageResponse>> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }

    registry
        .hotel_repository()
        .delete(DeleteHotel { hotel_id })
        .await
        .map(|_| Json(MessageResponse::new("Hotel disabled")))
}

// 予約数の多いホテルの上位を返す
pub async fn show_top_reserved_hotels(
    _user: AuthorizedUser,
    Query(query): Query<TopReservedQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<TopReservedHotelsResponse>> {
    query.validate(&())?;

    let hotels = registry
        .hotel_repository()
        .top_reserved(query.limit)
        .await?
        .into_iter()
        .map(HotelRankingResponse::from)
        .collect();

    Ok(Json(TopReservedHotelsResponse {
        success: true,
        hotels,
    }))
}
