//! Installment plans attached to an order.
//!
//! A plan is stored as JSON on the order. Payments are not tied to a
//! particular installment: the total paid amount is allocated to the plan in
//! due-date order when the schedule is computed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::finance::MAX_AMOUNT;
use crate::types::Money;

/// One planned installment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    pub amount: Money,
    pub due_date: NaiveDate,
}

/// Payment state of a single installment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstallmentState {
    Paid,
    Partial,
    Due,
    Overdue,
}

/// An installment together with how much of it has been covered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallmentStatus {
    pub index: usize,
    pub amount: Money,
    pub due_date: NaiveDate,
    pub paid: Money,
    pub remaining: Money,
    pub state: InstallmentState,
}

/// Validate a plan against the order's net price.
///
/// An empty plan is valid and means the student pays at will.
pub fn validate_plan(
    plan: &[Installment],
    net_price: Money,
    max_installments: i32,
) -> Result<(), CoreError> {
    if plan.is_empty() {
        return Ok(());
    }

    let max = usize::try_from(max_installments).unwrap_or(0);
    if plan.len() > max {
        return Err(CoreError::Validation(format!(
            "At most {max_installments} installments are allowed, got {}",
            plan.len()
        )));
    }

    if let Some(pos) = plan.iter().position(|i| i.amount <= 0) {
        return Err(CoreError::Validation(format!(
            "Installment {} must have a positive amount",
            pos + 1
        )));
    }

    if plan.windows(2).any(|w| w[1].due_date < w[0].due_date) {
        return Err(CoreError::Validation(
            "Installment due dates must be in chronological order".to_string(),
        ));
    }

    let total = plan
        .iter()
        .try_fold(0, |acc: Money, i| acc.checked_add(i.amount))
        .filter(|total| *total <= MAX_AMOUNT)
        .ok_or_else(|| {
            CoreError::Validation(format!("Installments add up to more than {MAX_AMOUNT}"))
        })?;
    if total != net_price {
        return Err(CoreError::Validation(format!(
            "Installments add up to {total} but the order's net price is {net_price}"
        )));
    }

    Ok(())
}

/// Allocate `paid_amount` across the plan and report each installment's state.
pub fn schedule(
    plan: &[Installment],
    paid_amount: Money,
    today: NaiveDate,
) -> Vec<InstallmentStatus> {
    let mut unallocated = paid_amount.max(0);

    plan.iter()
        .enumerate()
        .map(|(index, inst)| {
            let paid = unallocated.min(inst.amount);
            unallocated -= paid;
            let remaining = inst.amount - paid;

            let state = if remaining == 0 {
                InstallmentState::Paid
            } else if inst.due_date < today {
                InstallmentState::Overdue
            } else if paid > 0 {
                InstallmentState::Partial
            } else {
                InstallmentState::Due
            };

            InstallmentStatus {
                index,
                amount: inst.amount,
                due_date: inst.due_date,
                paid,
                remaining,
                state,
            }
        })
        .collect()
}

/// The first installment that is not fully paid.
pub fn next_due(schedule: &[InstallmentStatus]) -> Option<&InstallmentStatus> {
    schedule.iter().find(|s| s.state != InstallmentState::Paid)
}
