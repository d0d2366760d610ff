use axum::{
    routing::{delete, get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::hotel::{
    delete_hotel, register_hotel, show_hotel, show_hotel_list, show_top_reserved_hotels,
    update_hotel,
};

pub fn build_hotel_routers() -> Router<AppRegistry> {
    let hotel_routers = Router::new()
        .route("/", post(register_hotel))
        .route("/", get(show_hotel_list))
        .route("/top-reserved", get(show_top_reserved_hotels))
        .route("/:hotel_id", get(show_hotel))
        .route("/:hotel_id", put(update_hotel))
        .route("/:hotel_id", delete(delete_hotel));

    Router::new().nest("/hotels", hotel_routers)
}
