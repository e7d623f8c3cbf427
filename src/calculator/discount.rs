use crate::form::{DiscountKind, DiscountSpec};

use super::validation::parse_discount_value;

/// Amount taken off `subtotal` by `spec`. Never exceeds `subtotal`.
///
/// Percent discounts round down. An empty or malformed value means no
/// discount.
pub fn discount_amount(subtotal: u64, spec: &DiscountSpec) -> u64 {
    let Some(value) = parse_discount_value(&spec.value_raw) else {
        return 0;
    };
    let amount = match spec.kind {
        DiscountKind::Percent => {
            let scaled = u128::from(subtotal) * u128::from(value) / 100;
            u64::try_from(scaled).unwrap_or(u64::MAX)
        }
        DiscountKind::Flat => value.min(subtotal),
    };
    amount.min(subtotal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_rounds_down() {
        assert_eq!(discount_amount(100, &DiscountSpec::percent("33")), 33);
        assert_eq!(discount_amount(10, &DiscountSpec::percent("33")), 3);
        assert_eq!(discount_amount(99, &DiscountSpec::percent("1")), 0);
    }

    #[test]
    fn percent_over_one_hundred_is_capped() {
        assert_eq!(discount_amount(80, &DiscountSpec::percent("250")), 80);
    }

    #[test]
    fn flat_caps_at_subtotal() {
        assert_eq!(discount_amount(50, &DiscountSpec::flat("80")), 50);
        assert_eq!(discount_amount(50, &DiscountSpec::flat("20")), 20);
    }

    #[test]
    fn malformed_values_mean_no_discount() {
        for raw in ["", "-10", "abc", "5%"] {
            assert_eq!(discount_amount(200, &DiscountSpec::flat(raw)), 0, "{raw:?}");
        }
    }

    #[test]
    fn large_values_do_not_overflow() {
        let spec = DiscountSpec::percent(u64::MAX.to_string());
        assert_eq!(discount_amount(u64::MAX, &spec), u64::MAX);
        let spec = DiscountSpec::percent(i64::MAX.to_string());
        assert_eq!(discount_amount(u64::MAX, &spec), u64::MAX);
    }

    #[test]
    fn oversized_flat_discount_caps_at_subtotal() {
        let spec = DiscountSpec::flat("99999999999999999999");
        assert_eq!(discount_amount(500, &spec), 500);
    }
}
