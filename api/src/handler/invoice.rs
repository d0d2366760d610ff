use crate::{
    extractor::AuthorizedUser,
    model::{
        invoice::{
            GenerateInvoiceRequest, InvoiceCreatedResponse, InvoiceListQuery, InvoiceResponse,
            InvoicesResponse, MonthlyIncomeResponse, TotalIncomeResponse,
        },
        MessageResponse, YearQuery,
    },
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{Datelike, Utc};
use garde::Validate;
use kernel::model::{
    id::InvoiceId,
    invoice::event::{GenerateInvoice, PayInvoice},
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn generate_invoice(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<GenerateInvoiceRequest>,
) -> AppResult<(StatusCode, Json<InvoiceCreatedResponse>)> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }
    req.validate(&())?;

    let invoice_id = registry
        .invoice_repository()
        .create(GenerateInvoice::new(req.reservation_id))
        .await?;
    let invoice = registry
        .invoice_repository()
        .find_by_id(invoice_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("Invoice not found".into()))?;

    Ok((
        StatusCode::CREATED,
        Json(InvoiceCreatedResponse {
            success: true,
            msg: "Invoice generated successfully".into(),
            invoice: InvoiceResponse::from(invoice),
        }),
    ))
}

pub async fn pay_invoice(
    user: AuthorizedUser,
    Path(invoice_id): Path<InvoiceId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<MessageResponse>> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }

    registry
        .invoice_repository()
        .mark_paid(PayInvoice::new(invoice_id))
        .await
        .map(|_| Json(MessageResponse::new("Invoice marked as PAID successfully")))
}

pub async fn show_invoice_list(
    user: AuthorizedUser,
    Query(query): Query<InvoiceListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<InvoicesResponse>> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }
    query.validate(&())?;

    let invoices: Vec<InvoiceResponse> = registry
        .invoice_repository()
        .find_all(query.into())
        .await?
        .into_iter()
        .map(InvoiceResponse::from)
        .collect();

    Ok(Json(InvoicesResponse {
        success: true,
        total: invoices.len() as i64,
        invoices,
    }))
}

// 支払い済み請求書の総額
pub async fn total_income(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<TotalIncomeResponse>> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }

    let total = registry.invoice_repository().total_income().await?;

    Ok(Json(TotalIncomeResponse {
        success: true,
        total_income: total,
    }))
}

// 月別収入。12 要素で返し、支払いの無い月は 0。年の省略時は今年
pub async fn monthly_income(
    user: AuthorizedUser,
    Query(query): Query<YearQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<MonthlyIncomeResponse>> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }
    query.validate(&())?;

    let year = query.year.unwrap_or_else(|| Utc::now().year());
    let income = registry.invoice_repository().monthly_income(year).await?;

    Ok(Json(MonthlyIncomeResponse {
        success: true,
        msg: "Income per month".into(),
        income_per_month: income,
    }))
}
