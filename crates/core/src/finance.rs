//! Order pricing and payment checks.
//!
//! All amounts are [`Money`] in minor units and all rates are
//! [`BasisPoints`]. Percentages round toward zero, so the company keeps any
//! fractional cent.

use serde::Serialize;

use crate::error::CoreError;
use crate::types::{BasisPoints, Money};

/// 100 % expressed in basis points.
pub const BPS_SCALE: BasisPoints = 10_000;

/// Referral commission applied when neither the referrer nor settings override it.
pub const DEFAULT_REFERRAL_COMMISSION_BPS: BasisPoints = 1_000;

/// Employee profit share applied when neither the employee nor settings override it.
pub const DEFAULT_EMPLOYEE_SHARE_BPS: BasisPoints = 5_000;

/// Upper bound on installments per order when settings do not override it.
pub const DEFAULT_MAX_INSTALLMENTS: i32 = 6;

/// Largest amount accepted for any single money field (10^14 minor units).
/// Sums of a few thousand such values still fit in an `i64`.
pub const MAX_AMOUNT: Money = 100_000_000_000_000;

/// Take `bps` basis points of `amount`, rounding toward zero.
///
/// Computed in `i128`; a result outside `i64` is a validation error.
pub fn apply_bps(amount: Money, bps: BasisPoints) -> Result<Money, CoreError> {
    let scaled = i128::from(amount) * i128::from(bps) / i128::from(BPS_SCALE);
    Money::try_from(scaled).map_err(|_| {
        CoreError::Validation(format!("{bps} basis points of {amount} is out of range"))
    })
}

/// Validate that a rate lies within `0..=10000` basis points.
pub fn validate_bps(field: &str, bps: BasisPoints) -> Result<(), CoreError> {
    if (0..=BPS_SCALE).contains(&bps) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "{field} must be between 0 and {BPS_SCALE} basis points, got {bps}"
        )))
    }
}

pub fn validate_amount_non_negative(field: &str, amount: Money) -> Result<(), CoreError> {
    if amount < 0 {
        return Err(CoreError::Validation(format!(
            "{field} must not be negative"
        )));
    }
    validate_amount_ceiling(field, amount)
}

pub fn validate_amount_positive(field: &str, amount: Money) -> Result<(), CoreError> {
    if amount <= 0 {
        return Err(CoreError::Validation(format!(
            "{field} must be greater than zero"
        )));
    }
    validate_amount_ceiling(field, amount)
}

fn validate_amount_ceiling(field: &str, amount: Money) -> Result<(), CoreError> {
    if amount > MAX_AMOUNT {
        return Err(CoreError::Validation(format!(
            "{field} must not exceed {MAX_AMOUNT}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Pricing
// ---------------------------------------------------------------------------

/// Inputs needed to price an order.
///
/// A `None` rate means the corresponding party is absent, not that the rate
/// is zero.
#[derive(Debug, Clone, Copy)]
pub struct PricingInput {
    pub total_price: Money,
    pub discount: Money,
    pub referrer_rate_bps: Option<BasisPoints>,
    pub employee_rate_bps: Option<BasisPoints>,
}

/// Financial snapshot of an order, persisted alongside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderFinancials {
    pub net_price: Money,
    pub referrer_commission: Money,
    pub employee_share: Money,
    pub company_profit: Money,
}

/// Compute the net price and the commission/profit split of an order.
///
/// The referrer is paid first from the net price; the employee share is taken
/// from what remains.
pub fn price_order(input: PricingInput) -> Result<OrderFinancials, CoreError> {
    validate_amount_non_negative("total_price", input.total_price)?;
    validate_amount_non_negative("discount", input.discount)?;
    if input.discount > input.total_price {
        return Err(CoreError::Validation(format!(
            "discount ({}) cannot exceed total_price ({})",
            input.discount, input.total_price
        )));
    }

    let net_price = input.total_price - input.discount;

    let referrer_commission = match input.referrer_rate_bps {
        Some(bps) => {
            validate_bps("referrer commission rate", bps)?;
            apply_bps(net_price, bps)?
        }
        None => 0,
    };

    let employee_share = match input.employee_rate_bps {
        Some(bps) => {
            validate_bps("employee profit share", bps)?;
            apply_bps(net_price - referrer_commission, bps)?
        }
        None => 0,
    };

    Ok(OrderFinancials {
        net_price,
        referrer_commission,
        employee_share,
        company_profit: net_price - referrer_commission - employee_share,
    })
}

// ---------------------------------------------------------------------------
// Payments
// ---------------------------------------------------------------------------

/// Amount still owed on an order, never negative.
pub fn balance_due(net_price: Money, paid_amount: Money) -> Money {
    (net_price - paid_amount).max(0)
}

/// Validate that what has already been paid still fits under a (new) net price.
pub fn validate_paid_within_net(paid_amount: Money, net_price: Money) -> Result<(), CoreError> {
    if paid_amount > net_price {
        return Err(CoreError::Validation(format!(
            "Order already has {paid_amount} paid, which exceeds the new net price {net_price}"
        )));
    }
    Ok(())
}

/// Validate a new payment against the order's net price.
pub fn validate_payment(
    paid_so_far: Money,
    amount: Money,
    net_price: Money,
) -> Result<(), CoreError> {
    validate_amount_positive("amount", amount)?;
    let remaining = balance_due(net_price, paid_so_far);
    if amount > remaining {
        return Err(CoreError::Validation(format!(
            "Payment of {amount} exceeds the remaining balance of {remaining}"
        )));
    }
    Ok(())
}
