//! Fixed-deposit income projection from a nominal annual rate (TNA).

use crate::core::error::EngineError;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use tracing::debug;

pub const DAYS_PER_YEAR: u32 = 365;

/// Pro-rata income for holding `principal` for `days` at `annual_rate_percent`
/// TNA, without compounding:
///
/// `principal * (annual_rate_percent / 100) * days / 365`
pub fn project_yield(
    principal: Decimal,
    annual_rate_percent: f64,
    days: u32,
) -> Result<Decimal, EngineError> {
    if principal.is_sign_negative() && !principal.is_zero() {
        return Err(EngineError::InvalidInput(format!(
            "principal must not be negative, got {principal}"
        )));
    }
    if !annual_rate_percent.is_finite() || annual_rate_percent < 0.0 {
        return Err(EngineError::InvalidInput(format!(
            "annual rate must be a non-negative number, got {annual_rate_percent}"
        )));
    }
    if days == 0 {
        return Err(EngineError::InvalidInput(
            "holding period must be at least one day".to_string(),
        ));
    }

    let rate = Decimal::from_f64(annual_rate_percent).ok_or_else(|| {
        EngineError::InvalidInput(format!("annual rate {annual_rate_percent} is out of range"))
    })?;
    let income = principal
        .checked_mul(rate)
        .and_then(|v| v.checked_mul(Decimal::from(days)))
        .map(|v| v / Decimal::from(100) / Decimal::from(DAYS_PER_YEAR))
        .ok_or_else(|| EngineError::InvalidInput(format!("principal {principal} is too large")))?;

    debug!(%principal, annual_rate_percent, days, %income, "Projected deposit income");
    Ok(income)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thirty_days_at_35_percent() {
        let income = project_yield(Decimal::from(100_000), 35.0, 30).unwrap();
        assert_eq!(income.round_dp(2), Decimal::new(287671, 2));
    }

    #[test]
    fn test_full_year_equals_rate() {
        let income = project_yield(Decimal::from(1000), 40.0, 365).unwrap();
        assert_eq!(income, Decimal::from(400));
    }

    #[test]
    fn test_zero_rate_and_zero_principal() {
        assert_eq!(
            project_yield(Decimal::from(1000), 0.0, 30).unwrap(),
            Decimal::ZERO
        );
        assert_eq!(project_yield(Decimal::ZERO, 30.0, 30).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(
            project_yield(Decimal::from(1000), -1.0, 30),
            Err(EngineError::InvalidInput(_))
        ));
        assert!(matches!(
            project_yield(Decimal::from(1000), f64::NAN, 30),
            Err(EngineError::InvalidInput(_))
        ));
        assert!(matches!(
            project_yield(Decimal::from(1000), 30.0, 0),
            Err(EngineError::InvalidInput(_))
        ));
        assert!(matches!(
            project_yield(Decimal::from(-1000), 30.0, 30),
            Err(EngineError::InvalidInput(_))
        ));
    }
}
