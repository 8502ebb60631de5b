//! Price and discount model
//!
//! All figures are exact decimals; the discount percentage follows the single
//! crate-wide rounding rule in [`crate::money::round_half_up`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::{round_half_up, PERCENTAGE_SCALE};

/// A reduction derived from a former price found on the page.
///
/// Only constructible through [`Discount::between`], so `amount` and
/// `percentage` are non-negative by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discount {
    /// The pre-discount price. Always greater than the current price.
    pub old_price: Decimal,
    /// `old_price − current_price`.
    pub amount: Decimal,
    /// `amount / old_price × 100`, rounded half-up to 2 fractional digits.
    pub percentage: Decimal,
}

impl Discount {
    /// Derive the discount between a former and the current price.
    ///
    /// Returns `None` unless `old_price > current_price`: a page whose
    /// former-price marker is equal to or below the live price carries no
    /// discount rather than a negative one.
    pub fn between(old_price: Decimal, current_price: Decimal) -> Option<Self> {
        if old_price <= current_price {
            return None;
        }

        let amount = old_price - current_price;
        let percentage = round_half_up(
            amount / old_price * Decimal::ONE_HUNDRED,
            PERCENTAGE_SCALE,
        );

        Some(Self {
            old_price,
            amount,
            percentage,
        })
    }
}

/// The price of a product as offered on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    pub current_price: Decimal,
    /// ISO-4217 code, resolved by the site parser (never inferred from
    /// locale punctuation in the markup).
    pub currency: String,
    pub discount: Option<Discount>,
}

impl Price {
    pub fn new(current_price: Decimal, currency: impl Into<String>, discount: Option<Discount>) -> Self {
        Self {
            current_price,
            currency: currency.into(),
            discount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(54.99), dec!(40.99), dec!(14.00), dec!(25.46))]
    #[case(dec!(12.99), dec!(9.99), dec!(3.00), dec!(23.09))]
    #[case(dec!(25.99), dec!(12.99), dec!(13.00), dec!(50.02))]
    #[case(dec!(109.00), dec!(89.90), dec!(19.10), dec!(17.52))]
    #[case(dec!(134.90), dec!(132.90), dec!(2.00), dec!(1.48))]
    fn computes_amount_and_half_up_percentage(
        #[case] old_price: Decimal,
        #[case] current_price: Decimal,
        #[case] amount: Decimal,
        #[case] percentage: Decimal,
    ) {
        let discount = Discount::between(old_price, current_price).unwrap();
        assert_eq!(discount.old_price, old_price);
        assert_eq!(discount.amount, amount);
        assert_eq!(discount.percentage, percentage);
    }

    #[rstest]
    #[case(dec!(9.99), dec!(9.99))]
    #[case(dec!(9.99), dec!(12.99))]
    fn no_discount_when_former_price_is_not_higher(
        #[case] old_price: Decimal,
        #[case] current_price: Decimal,
    ) {
        assert_eq!(Discount::between(old_price, current_price), None);
    }

    #[test]
    fn derived_figures_are_never_negative() {
        use proptest::prelude::*;

        proptest!(|(old in 1u64..1_000_000, current in 0u64..1_000_000)| {
            let old = Decimal::from(old) / Decimal::ONE_HUNDRED;
            let current = Decimal::from(current) / Decimal::ONE_HUNDRED;
            if let Some(discount) = Discount::between(old, current) {
                prop_assert!(discount.amount > Decimal::ZERO);
                prop_assert!(discount.percentage > Decimal::ZERO);
                prop_assert!(discount.percentage <= Decimal::ONE_HUNDRED);
            }
        });
    }
}
