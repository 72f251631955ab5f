use axum::{extract::Query, response::Json, Extension};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::Role;
use crate::database::manager::DatabaseManager;
use crate::database::models::transaction::TransactionCategory;
use crate::database::repos::TransactionRepo;
use crate::error::ApiError;
use crate::filter::capped_limit;
use crate::middleware::AuthUser;

#[derive(Debug, Deserialize)]
pub struct TransactionsQuery {
    pub category: Option<TransactionCategory>,
    pub limit: Option<i64>,
}

/// GET /api/transactions?category&limit - the church's financial audit trail
pub async fn list(
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<TransactionsQuery>,
) -> Result<Json<Value>, ApiError> {
    auth.require_role(Role::KutayimaAdmin)?;
    let church_id = auth.require_church()?;
    let limit = capped_limit(query.limit);

    let pool = DatabaseManager::pool().await?;
    let transactions = match query.category {
        Some(category) => TransactionRepo::list_category(&pool, church_id, category, limit).await?,
        None => TransactionRepo::list(&pool, church_id, limit).await?,
    };
    Ok(Json(json!({ "success": true, "data": transactions })))
}
