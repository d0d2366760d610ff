use crate::model::id::ServiceId;
use rust_decimal::Decimal;

pub mod event;

#[derive(Debug)]
pub struct Service {
    pub service_id: ServiceId,
    pub name: String,
    pub price: Decimal,
    pub is_active: bool,
}
