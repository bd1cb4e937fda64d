//! Validation utilities for the StockLens inventory platform

use rust_decimal::Decimal;

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

/// Validate that a SKU is 3-80 alphanumeric/dash/underscore characters
pub fn validate_sku(sku: &str) -> Result<(), &'static str> {
    if sku.len() < 3 || sku.len() > 80 {
        return Err("SKU must be 3-80 characters");
    }
    if !sku
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err("SKU may contain only letters, digits, dashes, and underscores");
    }
    Ok(())
}

/// Validate unit prices at product creation: both positive, price above cost
pub fn validate_pricing(price: Decimal, cost_price: Decimal) -> Result<(), &'static str> {
    if price <= Decimal::ZERO {
        return Err("Price must be positive");
    }
    if cost_price <= Decimal::ZERO {
        return Err("Cost price must be positive");
    }
    if price <= cost_price {
        return Err("Price must be greater than cost price");
    }
    Ok(())
}

/// Validate an organization slug (lowercase alphanumeric and dashes)
pub fn validate_slug(slug: &str) -> Result<(), &'static str> {
    if slug.len() < 2 || slug.len() > 100 {
        return Err("Slug must be 2-100 characters");
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err("Slug may contain only lowercase letters, digits, and dashes");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_email_validation() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("bad").is_err());
        assert!(validate_email("no-at.example.com").is_err());
    }

    #[test]
    fn test_sku_validation() {
        assert!(validate_sku("SKU-001").is_ok());
        assert!(validate_sku("ab").is_err());
        assert!(validate_sku("has space").is_err());
    }

    #[test]
    fn test_pricing_requires_margin() {
        assert!(validate_pricing(dec("10.00"), dec("6.50")).is_ok());
        assert!(validate_pricing(dec("5.00"), dec("5.00")).is_err());
        assert!(validate_pricing(dec("0"), dec("1.00")).is_err());
        assert!(validate_pricing(dec("2.00"), dec("0")).is_err());
    }

    #[test]
    fn test_slug_validation() {
        assert!(validate_slug("acme-corp").is_ok());
        assert!(validate_slug("Acme").is_err());
        assert!(validate_slug("a").is_err());
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_well_formed_skus_pass(sku in "[A-Za-z0-9_-]{3,80}") {
                prop_assert!(validate_sku(&sku).is_ok());
            }

            #[test]
            fn prop_well_formed_slugs_pass(slug in "[a-z0-9-]{2,100}") {
                prop_assert!(validate_slug(&slug).is_ok());
            }

            #[test]
            fn prop_price_must_exceed_cost(price in 1u32..10_000, cost in 1u32..10_000) {
                let result = validate_pricing(Decimal::from(price), Decimal::from(cost));
                prop_assert_eq!(result.is_ok(), price > cost);
            }
        }
    }
}
