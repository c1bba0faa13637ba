use super::ui;
use crate::core::quote::{RateQuote, RateSnapshot};
use crate::core::source::{RateSource, load_rates};
use crate::core::yields::project_yield;
use anyhow::{Result, anyhow};
use rust_decimal::Decimal;

/// Result of a fixed-deposit projection for one bank.
#[derive(Debug, Clone, PartialEq)]
pub struct DepositProjection {
    pub entity: String,
    pub annual_rate: f64,
    pub principal: Decimal,
    pub days: u32,
    pub income: Decimal,
}

pub async fn run(
    source: &dyn RateSource,
    principal: Decimal,
    bank: Option<&str>,
    days: u32,
) -> Result<()> {
    let pb = ui::new_spinner("Fetching deposit rates...");
    let snapshot = load_rates(source).await;
    pb.finish_and_clear();

    if snapshot.is_empty() {
        println!("{}", ui::no_data("deposit rates"));
        return Ok(());
    }

    let projection = project(&snapshot, principal, bank, days)?;
    println!("{}", display_projection(&projection));
    Ok(())
}

/// Picks the requested bank, or the best rate when none is given, and
/// projects the income.
pub fn project(
    snapshot: &RateSnapshot,
    principal: Decimal,
    bank: Option<&str>,
    days: u32,
) -> Result<DepositProjection> {
    let quote: &RateQuote = match bank {
        Some(name) => snapshot
            .get(name)
            .ok_or_else(|| anyhow!("No deposit rate published for '{name}'"))?,
        None => snapshot
            .best()
            .ok_or_else(|| anyhow!("No deposit rates available"))?,
    };

    let income = project_yield(principal, quote.annual_rate, days)?;
    Ok(DepositProjection {
        entity: quote.entity.clone(),
        annual_rate: quote.annual_rate,
        principal,
        days,
        income,
    })
}

pub fn display_projection(projection: &DepositProjection) -> String {
    format!(
        "{}\n\nBank: {}\nInvestment: AR$ {}\nTNA: {}\nIncome in {} days: {}\nTotal at maturity: AR$ {}",
        ui::style_text("Fixed-term deposit calculator", ui::StyleType::Title),
        projection.entity,
        ui::fmt_ar_decimal(projection.principal),
        ui::fmt_percent(projection.annual_rate),
        projection.days,
        ui::style_text(
            &format!("AR$ {}", ui::fmt_ar_decimal(projection.income)),
            ui::StyleType::TotalValue
        ),
        ui::fmt_ar_decimal(projection.principal + projection.income),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> RateSnapshot {
        RateSnapshot::from_quotes(vec![
            RateQuote {
                entity: "BANCO MACRO".to_string(),
                annual_rate: 28.0,
            },
            RateQuote {
                entity: "BANCO GALICIA".to_string(),
                annual_rate: 35.0,
            },
        ])
    }

    #[test]
    fn test_project_named_bank() {
        let projection =
            project(&snapshot(), Decimal::from(100_000), Some("banco galicia"), 30).unwrap();

        assert_eq!(projection.entity, "BANCO GALICIA");
        assert_eq!(projection.income.round_dp(2), Decimal::new(287671, 2));

        let output = display_projection(&projection);
        assert!(output.contains("AR$ 2.876,71"));
        assert!(output.contains("35,00%"));
        assert!(output.contains("AR$ 102.876,71"));
    }

    #[test]
    fn test_project_defaults_to_best_rate() {
        let projection = project(&snapshot(), Decimal::from(1000), None, 365).unwrap();
        assert_eq!(projection.entity, "BANCO GALICIA");
        assert_eq!(projection.income, Decimal::from(350));
    }

    #[test]
    fn test_unknown_bank_and_bad_days() {
        assert!(project(&snapshot(), Decimal::from(1000), Some("BANCO X"), 30).is_err());

        let err = project(&snapshot(), Decimal::from(1000), None, 0).unwrap_err();
        assert!(err.to_string().contains("invalid input"));
    }
}
