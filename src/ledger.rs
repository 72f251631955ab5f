//! Contribution/dues ledger rules. Pure domain logic only: no IO, no HTTP,
//! no persistence concerns. The services layer wires these rules to the
//! database under row-level locks.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::database::models::{
    AmountType, ContributionMode, DueRecord, EventRow, EventStatus, PayerType,
};

#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    #[error("Amount must be greater than zero")]
    NonPositiveAmount,

    #[error("This event requires a fixed contribution of {expected}")]
    FixedAmountMismatch { expected: Decimal },

    #[error("Contribution is below the minimum of {minimum}")]
    BelowMinimum { minimum: Decimal },

    #[error("Event is not accepting contributions")]
    EventNotActive,

    #[error("Due is already fully paid")]
    AlreadyPaid,

    #[error("Payment of {payment} exceeds the remaining balance of {balance}")]
    OverPayment { payment: Decimal, balance: Decimal },

    #[error("A member or house reference is required")]
    MissingPayer,

    #[error("Event policy has no assessable amount")]
    MissingPolicyAmount,

    #[error("Event total {recorded} diverges from contributor log sum {actual}")]
    AggregateMismatch { recorded: Decimal, actual: Decimal },
}

/// Amount policy of a contribution event.
#[derive(Debug, Clone, Copy)]
pub struct ContributionPolicy {
    pub mode: ContributionMode,
    pub fixed_amount: Option<Decimal>,
    pub minimum_amount: Option<Decimal>,
}

pub fn policy(event: &EventRow) -> ContributionPolicy {
    ContributionPolicy {
        mode: event.contribution_mode,
        fixed_amount: event.fixed_amount,
        minimum_amount: event.minimum_amount,
    }
}

impl ContributionPolicy {
    /// Validate a contribution amount against the event's mode.
    pub fn validate_amount(&self, amount: Decimal) -> Result<(), LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::NonPositiveAmount);
        }
        match self.mode {
            ContributionMode::Fixed => {
                let expected = self.fixed_amount.ok_or(LedgerError::MissingPolicyAmount)?;
                if amount != expected {
                    return Err(LedgerError::FixedAmountMismatch { expected });
                }
            }
            ContributionMode::Variable => {
                if let Some(minimum) = self.minimum_amount {
                    if amount < minimum {
                        return Err(LedgerError::BelowMinimum { minimum });
                    }
                }
            }
        }
        Ok(())
    }
}

pub fn ensure_active(status: EventStatus) -> Result<(), LedgerError> {
    match status {
        EventStatus::Active => Ok(()),
        EventStatus::Closed | EventStatus::Processed => Err(LedgerError::EventNotActive),
    }
}

/// The amount a payer is assessed for at due-processing time.
pub fn assessed_amount(event: &EventRow, default_assessment: Decimal) -> Result<Decimal, LedgerError> {
    match event.amount_type {
        AmountType::PerMember | AmountType::PerHouse => {
            event.fixed_amount.ok_or(LedgerError::MissingPolicyAmount)
        }
        AmountType::Flexible => Ok(event.minimum_amount.unwrap_or(default_assessment)),
    }
}

/// The population a kind of event assesses.
pub fn target_payer_type(amount_type: AmountType) -> PayerType {
    match amount_type {
        AmountType::PerHouse => PayerType::House,
        // Flexible drives address individuals
        AmountType::PerMember | AmountType::Flexible => PayerType::Member,
    }
}

/// Cross-check the event's running total against its contributor log.
pub fn verify_aggregate(recorded: Decimal, actual: Decimal) -> Result<(), LedgerError> {
    if recorded == actual {
        Ok(())
    } else {
        Err(LedgerError::AggregateMismatch { recorded, actual })
    }
}

/// One payer of the target population, as enumerated for the sweep.
#[derive(Debug, Clone)]
pub struct PopulationEntry {
    pub id: Uuid,
    pub name: String,
}

/// A due record to be created for an under-contributed payer. The assessed
/// amount is kept whole; what was already given becomes paid_amount, so the
/// balance is the shortfall.
#[derive(Debug, Clone, PartialEq)]
pub struct DueSeed {
    pub payer_id: Uuid,
    pub payer_name: String,
    pub amount: Decimal,
    pub paid_amount: Decimal,
    pub balance: Decimal,
}

/// Compute the due seeds for every payer whose cumulative contribution falls
/// short of the assessed amount. Payers at or above the assessment yield none.
pub fn shortfalls(
    population: &[PopulationEntry],
    contributed: &std::collections::HashMap<Uuid, Decimal>,
    assessed: Decimal,
) -> Vec<DueSeed> {
    population
        .iter()
        .filter_map(|payer| {
            let given = contributed.get(&payer.id).copied().unwrap_or(Decimal::ZERO);
            if given >= assessed {
                return None;
            }
            Some(DueSeed {
                payer_id: payer.id,
                payer_name: payer.name.clone(),
                amount: assessed,
                paid_amount: given,
                balance: assessed - given,
            })
        })
        .collect()
}

/// Apply a payment to a due record, recomputing balance and paid status.
/// Over-payment is rejected, never clamped: paid_amount can never exceed
/// amount.
pub fn apply_payment(due: &mut DueRecord, payment: Decimal) -> Result<(), LedgerError> {
    if payment <= Decimal::ZERO {
        return Err(LedgerError::NonPositiveAmount);
    }
    if due.is_paid || due.balance <= Decimal::ZERO {
        return Err(LedgerError::AlreadyPaid);
    }
    if payment > due.balance {
        return Err(LedgerError::OverPayment { payment, balance: due.balance });
    }

    due.paid_amount += payment;
    due.balance = due.amount - due.paid_amount;
    due.is_paid = due.balance <= Decimal::ZERO;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;

    fn dec(n: i64) -> Decimal {
        Decimal::new(n, 0)
    }

    fn event(mode: ContributionMode, amount_type: AmountType) -> EventRow {
        EventRow {
            id: Uuid::new_v4(),
            church_id: Uuid::new_v4(),
            amount_type,
            contribution_mode: mode,
            fixed_amount: Some(dec(500)),
            minimum_amount: Some(dec(50)),
            status: EventStatus::Active,
            due_date: None,
            total_collected: Decimal::ZERO,
            total_contributors: 0,
            dues_processed: false,
            label: "Roof Fund".to_string(),
        }
    }

    fn due(amount: i64, paid: i64) -> DueRecord {
        let amount = dec(amount);
        let paid_amount = dec(paid);
        DueRecord {
            id: Uuid::new_v4(),
            church_id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            due_for_id: Uuid::new_v4(),
            due_for_type: PayerType::Member,
            due_for_name: "Thomas".to_string(),
            amount,
            paid_amount,
            balance: amount - paid_amount,
            is_paid: paid_amount >= amount,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn fixed_mode_rejects_any_other_amount() {
        let policy = policy(&event(ContributionMode::Fixed, AmountType::PerMember));
        assert_eq!(
            policy.validate_amount(dec(499)),
            Err(LedgerError::FixedAmountMismatch { expected: dec(500) })
        );
        assert!(policy.validate_amount(dec(500)).is_ok());
    }

    #[test]
    fn variable_mode_enforces_minimum_floor() {
        let policy = policy(&event(ContributionMode::Variable, AmountType::Flexible));
        assert_eq!(
            policy.validate_amount(dec(30)),
            Err(LedgerError::BelowMinimum { minimum: dec(50) })
        );
        assert!(policy.validate_amount(dec(75)).is_ok());
    }

    #[test]
    fn non_positive_amounts_never_validate() {
        let policy = policy(&event(ContributionMode::Variable, AmountType::Flexible));
        assert_eq!(policy.validate_amount(Decimal::ZERO), Err(LedgerError::NonPositiveAmount));
        assert_eq!(policy.validate_amount(dec(-10)), Err(LedgerError::NonPositiveAmount));
    }

    #[test]
    fn contributions_require_active_status() {
        assert!(ensure_active(EventStatus::Active).is_ok());
        assert_eq!(ensure_active(EventStatus::Closed), Err(LedgerError::EventNotActive));
        assert_eq!(ensure_active(EventStatus::Processed), Err(LedgerError::EventNotActive));
    }

    #[test]
    fn assessment_uses_fixed_amount_for_targeted_events() {
        let e = event(ContributionMode::Fixed, AmountType::PerMember);
        assert_eq!(assessed_amount(&e, dec(100)).unwrap(), dec(500));

        let mut no_fixed = event(ContributionMode::Fixed, AmountType::PerHouse);
        no_fixed.fixed_amount = None;
        assert_eq!(assessed_amount(&no_fixed, dec(100)), Err(LedgerError::MissingPolicyAmount));
    }

    #[test]
    fn flexible_assessment_falls_back_to_configured_default() {
        let mut e = event(ContributionMode::Variable, AmountType::Flexible);
        assert_eq!(assessed_amount(&e, dec(100)).unwrap(), dec(50));
        e.minimum_amount = None;
        assert_eq!(assessed_amount(&e, dec(100)).unwrap(), dec(100));
    }

    #[test]
    fn shortfalls_skip_fully_contributed_payers() {
        // Campaign, fixed 500, members M1..M3; M1 contributed in full
        let m1 = Uuid::new_v4();
        let m2 = Uuid::new_v4();
        let m3 = Uuid::new_v4();
        let population = vec![
            PopulationEntry { id: m1, name: "M1".into() },
            PopulationEntry { id: m2, name: "M2".into() },
            PopulationEntry { id: m3, name: "M3".into() },
        ];
        let mut sums = HashMap::new();
        sums.insert(m1, dec(500));

        let seeds = shortfalls(&population, &sums, dec(500));
        assert_eq!(seeds.len(), 2);
        assert!(seeds.iter().all(|s| s.amount == dec(500)));
        assert!(seeds.iter().all(|s| s.paid_amount == Decimal::ZERO));
        assert!(seeds.iter().all(|s| s.balance == dec(500)));
        assert!(seeds.iter().all(|s| s.payer_id != m1));
    }

    #[test]
    fn partial_contributions_reduce_the_shortfall_not_the_assessment() {
        let m = Uuid::new_v4();
        let population = vec![PopulationEntry { id: m, name: "M".into() }];
        let mut sums = HashMap::new();
        // Two contributions of 100 and 150 accumulate toward the assessment
        sums.insert(m, dec(250));

        let seeds = shortfalls(&population, &sums, dec(500));
        assert_eq!(
            seeds,
            vec![DueSeed {
                payer_id: m,
                payer_name: "M".into(),
                amount: dec(500),
                paid_amount: dec(250),
                balance: dec(250),
            }]
        );
    }

    #[test]
    fn over_contribution_yields_no_due() {
        let m = Uuid::new_v4();
        let population = vec![PopulationEntry { id: m, name: "M".into() }];
        let mut sums = HashMap::new();
        sums.insert(m, dec(600));
        assert!(shortfalls(&population, &sums, dec(500)).is_empty());
    }

    #[test]
    fn payments_conserve_the_balance_equation() {
        let mut d = due(500, 0);
        apply_payment(&mut d, dec(200)).unwrap();
        assert_eq!(d.paid_amount, dec(200));
        assert_eq!(d.balance, dec(300));
        assert!(!d.is_paid);
        assert_eq!(d.amount, d.paid_amount + d.balance);

        apply_payment(&mut d, dec(300)).unwrap();
        assert_eq!(d.balance, Decimal::ZERO);
        assert!(d.is_paid);
        assert_eq!(d.amount, d.paid_amount + d.balance);
    }

    #[test]
    fn over_payment_is_rejected_not_clamped() {
        let mut d = due(500, 200);
        let err = apply_payment(&mut d, dec(400)).unwrap_err();
        assert_eq!(err, LedgerError::OverPayment { payment: dec(400), balance: dec(300) });
        // No state change on rejection
        assert_eq!(d.paid_amount, dec(200));
        assert_eq!(d.balance, dec(300));
        assert!(!d.is_paid);
    }

    #[test]
    fn settled_dues_reject_further_payments() {
        let mut d = due(500, 500);
        assert_eq!(apply_payment(&mut d, dec(1)), Err(LedgerError::AlreadyPaid));
    }

    #[test]
    fn aggregate_divergence_is_an_integrity_error() {
        assert!(verify_aggregate(dec(500), dec(500)).is_ok());
        assert_eq!(
            verify_aggregate(dec(500), dec(450)),
            Err(LedgerError::AggregateMismatch { recorded: dec(500), actual: dec(450) })
        );
    }

    #[test]
    fn per_house_events_assess_houses() {
        assert_eq!(target_payer_type(AmountType::PerHouse), PayerType::House);
        assert_eq!(target_payer_type(AmountType::PerMember), PayerType::Member);
        assert_eq!(target_payer_type(AmountType::Flexible), PayerType::Member);
    }
}
