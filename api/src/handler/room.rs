use crate::{
    extractor::AuthorizedUser,
    model::{
        room::{
            CreateRoomRequest, RoomCreatedResponse, RoomListQuery, RoomResponse, RoomsResponse,
            UpdateRoomRequest, UpdateRoomRequestWithId,
        },
        MessageResponse,
    },
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{id::RoomId, list::ListOptions};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn register_room(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateRoomRequest>,
) -> AppResult<(StatusCode, Json<RoomCreatedResponse>)> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }
    req.validate(&())?;

    let room_id = registry.room_repository().create(req.into()).await?;
    let room = registry
        .room_repository()
        .find_by_id(room_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("Room not found".into()))?;

    Ok((
        StatusCode::CREATED,
        Json(RoomCreatedResponse {
            success: true,
            msg: "Room added successfully".into(),
            room: RoomResponse::from(room),
        }),
    ))
}

pub async fn show_room_list(
    _user: AuthorizedUser,
    Query(query): Query<RoomListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<RoomsResponse>> {
    query.validate(&())?;

    let RoomListQuery {
        limit,
        offset,
        hotel_id,
    } = query;
    registry
        .room_repository()
        .find_all(ListOptions { limit, offset }, hotel_id)
        .await
        .map(RoomsResponse::from)
        .map(Json)
}

pub async fn show_room(
    _user: AuthorizedUser,
    Path(room_id): Path<RoomId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<RoomResponse>> {
    registry
        .room_repository()
        .find_by_id(room_id)
        .await
        .and_then(|room| match room {
            Some(room) => Ok(Json(room.into())),
            None => Err(AppError::EntityNotFound("Room not found".into())),
        })
}

// 状態遷移（AVAILABLE / OCCUPIED / MAINTENANCE）もここで受ける
pub async fn update_room(
    user: AuthorizedUser,
    Path(room_id): Path<RoomId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateRoomRequest>,
) -> AppResult<Json<MessageResponse>> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }
    req.validate(&())?;

    let update_room = UpdateRoomRequestWithId::new(room_id, req);
    registry
        .room_repository()
        .update(update_room.into())
        .await
        .map(|_| Json(MessageResponse::new("Room updated successfully")))
}
