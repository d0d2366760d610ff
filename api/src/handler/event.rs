use crate::{
    extractor::AuthorizedUser,
    model::{
        event::{
            CreateEventRequest, EventCreatedResponse, EventResponse, EventsResponse,
            UpdateEventRequest, UpdateEventRequestWithId,
        },
        ListQuery, MessageResponse,
    },
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use garde::Validate;
use kernel::model::{
    event::{CreateEvent, DeleteEvent},
    id::EventId,
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn register_event(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateEventRequest>,
) -> AppResult<(StatusCode, Json<EventCreatedResponse>)> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }
    req.validate(&())?;

    // 過去の日時にはイベントを登録できない
    if req.starts_at <= Utc::now() {
        return Err(AppError::UnprocessableEntity(
            "event date must be in the future".into(),
        ));
    }

    let venue = req.try_venue()?;
    let event_id = registry
        .event_repository()
        .create(CreateEvent::new(venue, req.starts_at, req.description))
        .await?;
    let event = registry
        .event_repository()
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("Event not found".into()))?;

    Ok((
        StatusCode::CREATED,
        Json(EventCreatedResponse {
            success: true,
            msg: "Event added successfully".into(),
            event: EventResponse::from(event),
        }),
    ))
}

pub async fn show_event_list(
    _user: AuthorizedUser,
    Query(query): Query<ListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<EventsResponse>> {
    query.validate(&())?;

    registry
        .event_repository()
        .find_active_all(query.into())
        .await
        .map(EventsResponse::from)
        .map(Json)
}

pub async fn update_event(
    user: AuthorizedUser,
    Path(event_id): Path<EventId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateEventRequest>,
) -> AppResult<Json<MessageResponse>> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }
    req.validate(&())?;

    if let Some(starts_at) = req.starts_at {
        if starts_at <= Utc::now() {
            return Err(AppError::UnprocessableEntity(
                "event date must be in the future".into(),
            ));
        }
    }

    let update_event = UpdateEventRequestWithId::new(event_id, req);
    registry
        .event_repository()
        .update(update_event.into())
        .await
        .map(|_| Json(MessageResponse::new("Event updated successfully")))
}

pub async fn delete_event(
    user: AuthorizedUser,
    Path(event_id): Path<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<MessageResponse>> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }

    registry
        .event_repository()
        .delete(DeleteEvent { event_id })
        .await
        .map(|_| Json(MessageResponse::new("Event deleted successfully")))
}
