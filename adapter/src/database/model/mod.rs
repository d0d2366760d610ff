pub mod event;
pub mod hotel;
pub mod invoice;
pub mod reservation;
pub mod room;
pub mod service;
pub mod user;
