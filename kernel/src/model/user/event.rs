use crate::model::{id::UserId, role::Role};
use derive_new::new;

#[derive(Debug, new)]
pub struct CreateUser {
    pub user_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, new)]
pub struct UpdateUserPassword {
    pub user_id: UserId,
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, new)]
pub struct UpdateUserRole {
    pub user_id: UserId,
    pub role: Role,
}

#[derive(Debug, new)]
pub struct DeleteUser {
    pub user_id: UserId,
}
