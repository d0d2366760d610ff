use crate::model::id::{InvoiceId, ReservationId};
use derive_new::new;

#[derive(Debug, new)]
pub struct GenerateInvoice {
    pub reservation_id: ReservationId,
}

#[derive(Debug, new)]
pub struct PayInvoice {
    pub invoice_id: InvoiceId,
}
