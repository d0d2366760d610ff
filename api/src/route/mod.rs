pub mod auth;
pub mod event;
pub mod health;
pub mod hotel;
pub mod invoice;
pub mod reservation;
pub mod room;
pub mod service;
pub mod user;
pub mod v1;
