use std::sync::Arc;

use adapter::{
    database::ConnectionPool,
    redis::RedisClient,
    repository::{
        auth::AuthRepositoryImpl, event::EventRepositoryImpl, health::HealthCheckRepositoryImpl,
        hotel::HotelRepositoryImpl, invoice::InvoiceRepositoryImpl,
        reservation::ReservationRepositoryImpl, room::RoomRepositoryImpl,
        service::ServiceRepositoryImpl, user::UserRepositoryImpl,
    },
};
use kernel::repository::{
    auth::AuthRepository, event::EventRepository, health::HealthCheckRepository,
    hotel::HotelRepository, invoice::InvoiceRepository, reservation::ReservationRepository,
    room::RoomRepository, service::ServiceRepository, user::UserRepository,
};
use shared::config::AppConfig;

// 各リポジトリをコンストラクタ注入で束ねる。暗黙のグローバル登録は持たない
#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    hotel_repository: Arc<dyn HotelRepository>,
    room_repository: Arc<dyn RoomRepository>,
    reservation_repository: Arc<dyn ReservationRepository>,
    service_repository: Arc<dyn ServiceRepository>,
    invoice_repository: Arc<dyn InvoiceRepository>,
    event_repository: Arc<dyn EventRepository>,
    user_repository: Arc<dyn UserRepository>,
    auth_repository: Arc<dyn AuthRepository>,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool, redis_client: Arc<RedisClient>, app_config: AppConfig) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let hotel_repository = Arc::new(HotelRepositoryImpl::new(pool.clone()));
        let room_repository = Arc::new(RoomRepositoryImpl::new(pool.clone()));
        let reservation_repository = Arc::new(ReservationRepositoryImpl::new(pool.clone()));
        let service_repository = Arc::new(ServiceRepositoryImpl::new(pool.clone()));
        let invoice_repository = Arc::new(InvoiceRepositoryImpl::new(pool.clone()));
        let event_repository = Arc::new(EventRepositoryImpl::new(pool.clone()));
        let user_repository = Arc::new(UserRepositoryImpl::new(pool.clone()));
        let auth_repository = Arc::new(AuthRepositoryImpl::new(
            pool.clone(),
            redis_client.clone(),
            app_config.auth.ttl,
        ));
        Self {
            health_check_repository,
            hotel_repository,
            room_repository,
            reservation_repository,
            service_repository,
            invoice_repository,
            event_repository,
            user_repository,
            auth_repository,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn hotel_repository(&self) -> Arc<dyn HotelRepository> {
        self.hotel_repository.clone()
    }

    pub fn room_repository(&self) -> Arc<dyn RoomRepository> {
        self.room_repository.clone()
    }

    pub fn reservation_repository(&self) -> Arc<dyn ReservationRepository> {
        self.reservation_repository.clone()
    }

    pub fn service_repository(&self) -> Arc<dyn ServiceRepository> {
        self.service_repository.clone()
    }

    pub fn invoice_repository(&self) -> Arc<dyn InvoiceRepository> {
        self.invoice_repository.clone()
    }

    pub fn event_repository(&self) -> Arc<dyn EventRepository> {
        self.event_repository.clone()
    }

    pub fn user_repository(&self) -> Arc<dyn UserRepository> {
        self.user_repository.clone()
    }

    pub fn auth_repository(&self) -> Arc<dyn AuthRepository> {
        self.auth_repository.clone()
    }
}
