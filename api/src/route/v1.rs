use super::{
    auth::build_auth_routers, event::build_event_routers, health::build_health_check_routers,
    hotel::build_hotel_routers, invoice::build_invoice_routers,
    reservation::build_reservation_routers, room::build_room_routers,
    service::build_service_routers, user::build_user_routers,
};
use axum::Router;
use registry::AppRegistry;

pub fn routes() -> Router<AppRegistry> {
    let router = Router::new()
        .merge(build_health_check_routers())
        .merge(build_auth_routers())
        .merge(build_hotel_routers())
        .merge(build_room_routers())
        .merge(build_reservation_routers())
        .merge(build_service_routers())
        .merge(build_invoice_routers())
        .merge(build_event_routers())
        .merge(build_user_routers());
    Router::new().nest("/api/v1", router)
}
