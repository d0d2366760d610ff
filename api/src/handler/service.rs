use crate::{
    extractor::AuthorizedUser,
    model::{
        service::{
            CreateServiceRequest, ServiceCreatedResponse, ServiceResponse, ServicesResponse,
            UpdateServiceRequest, UpdateServiceRequestWithId,
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
use kernel::model::{id::ServiceId, service::event::DeleteService};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn register_service(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateServiceRequest>,
) -> AppResult<(StatusCode, Json<ServiceCreatedResponse>)> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }
    req.validate(&())?;

    let service_id = registry.service_repository().create(req.into()).await?;
    let service = registry
        .service_repository()
        .find_by_id(service_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("Service not found".into()))?;

    Ok((
        StatusCode::CREATED,
        Json(ServiceCreatedResponse {
            success: true,
            msg: "Service added successfully".into(),
            service: ServiceResponse::from(service),
        }),
    ))
}

pub async fn show_service_list(
    _user: AuthorizedUser,
    Query(query): Query<ListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ServicesResponse>> {
    query.validate(&())?;

    registry
        .service_repository()
        .find_active_all(query.into())
        .await
        .map(ServicesResponse::from)
        .map(Json)
}

pub async fn show_service(
    _user: AuthorizedUser,
    Path(service_id): Path<ServiceId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ServiceResponse>> {
    registry
        .service_repository()
        .find_by_id(service_id)
        .await
        .and_then(|service| match service {
            Some(service) => Ok(Json(service.into())),
            None => Err(AppError::EntityNotFound("Service not found".into())),
        })
}

pub async fn update_service(
    user: AuthorizedUser,
    Path(service_id): Path<ServiceId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateServiceRequest>,
) -> AppResult<Json<MessageResponse>> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }
    req.validate(&())?;

    let update_service = UpdateServiceRequestWithId::new(service_id, req);
    registry
        .service_repository()
        .update(update_service.into())
        .await
        .map(|_| Json(MessageResponse::new("Service updated successfully")))
}

pub async fn delete_service(
    user: AuthorizedUser,
    Path(service_id): Path<ServiceId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<MessageResponse>> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }

    registry
        .service_repository()
        .delete(DeleteService { service_id })
        .await
        .map(|_| Json(MessageResponse::new("Service disabled")))
}
