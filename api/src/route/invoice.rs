use axum::{
    routing::{get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::invoice::{
    generate_invoice, monthly_income, pay_invoice, show_invoice_list, total_income,
};

pub fn build_invoice_routers() -> Router<AppRegistry> {
    let invoice_routers = Router::new()
        .route("/", post(generate_invoice))
        .route("/", get(show_invoice_list))
        .route("/stats/income", get(total_income))
        .route("/stats/monthly", get(monthly_income))
        .route("/:invoice_id/pay", put(pay_invoice));

    Router::new().nest("/invoices", invoice_routers)
}
