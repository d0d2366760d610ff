use axum::{
    routing::{delete, get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::event::{delete_event, register_event, show_event_list, update_event};

pub fn build_event_routers() -> Router<AppRegistry> {
    let event_routers = Router::new()
        .route("/", post(register_event))
        .route("/", get(show_event_list))
        .route("/:event_id", put(update_event))
        .route("/:event_id", delete(delete_event));

    Router::new().nest("/events", event_routers)
}
