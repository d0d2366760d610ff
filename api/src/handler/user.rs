use crate::{
    extractor::AuthorizedUser,
    model::{
        user::{
            CreateUserRequest, CurrentUserResponse, UpdateUserPasswordRequest,
            UpdateUserPasswordRequestWithUserId, UpdateUserRoleRequest,
            UpdateUserRoleRequestWithUserId, UserCreatedResponse, UserResponse, UsersResponse,
        },
        MessageResponse,
    },
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{id::UserId, user::event::DeleteUser};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn register_user(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserCreatedResponse>)> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }
    req.validate(&())?;

    let registered_user = registry.user_repository().create(req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(UserCreatedResponse {
            success: true,
            msg: "User added successfully".into(),
            user: UserResponse::from(registered_user),
        }),
    ))
}

pub async fn show_user_list(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<UsersResponse>> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }

    let users: Vec<UserResponse> = registry
        .user_repository()
        .find_all()
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();

    Ok(Json(UsersResponse {
        success: true,
        total: users.len() as i64,
        users,
    }))
}

pub async fn get_current_user(user: AuthorizedUser) -> Json<CurrentUserResponse> {
    Json(CurrentUserResponse {
        success: true,
        user: UserResponse::from(user.user),
    })
}

pub async fn update_user_password(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateUserPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    req.validate(&())?;

    let update_password = UpdateUserPasswordRequestWithUserId::new(user.id(), req);
    registry
        .user_repository()
        .update_password(update_password.into())
        .await
        .map(|_| Json(MessageResponse::new("Password updated successfully")))
}

pub async fn update_user_role(
    user: AuthorizedUser,
    Path(user_id): Path<UserId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateUserRoleRequest>,
) -> AppResult<Json<MessageResponse>> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }

    let update_role = UpdateUserRoleRequestWithUserId::new(user_id, req);
    registry
        .user_repository()
        .update_role(update_role.into())
        .await
        .map(|_| Json(MessageResponse::new("Role updated successfully")))
}

pub async fn delete_user(
    user: AuthorizedUser,
    Path(user_id): Path<UserId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<MessageResponse>> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }

    registry
        .user_repository()
        .delete(DeleteUser { user_id })
        .await
        .map(|_| Json(MessageResponse::new("User disabled")))
}
