use axum::{
    routing::{delete, get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::user::{
    delete_user, get_current_user, register_user, show_user_list, update_user_password,
    update_user_role,
};

pub fn build_user_routers() -> Router<AppRegistry> {
    let user_routers = Router::new()
        .route("/", post(register_user))
        .route("/", get(show_user_list))
        .route("/me", get(get_current_user))
        .route("/me/password", put(update_user_password))
        .route("/:user_id/role", put(update_user_role))
        .route("/:user_id", delete(delete_user));

    Router::new().nest("/users", user_routers)
}
