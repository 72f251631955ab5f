/// Shared types used across the codebase
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Polymorphic payer tag. Dues and contributions are owed/recorded by either
/// an individual member or a whole house; matching on this is exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "payer_type", rename_all = "snake_case")]
pub enum PayerType {
    Member,
    House,
}

impl PayerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayerType::Member => "member",
            PayerType::House => "house",
        }
    }
}

/// A concrete payer reference: the tag plus the row it points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayerRef {
    pub id: Uuid,
    pub payer_type: PayerType,
}

impl PayerRef {
    pub fn member(id: Uuid) -> Self {
        Self { id, payer_type: PayerType::Member }
    }

    pub fn house(id: Uuid) -> Self {
        Self { id, payer_type: PayerType::House }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "payment_method", rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
    BankTransfer,
    Upi,
    Other,
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}
