//! Money figures derived from a project's financial entries.

use models::{
    finance::{FinancialEntryType, PortfolioTotals, ProjectFinanceSummary},
    project::{ProjectSnapshot, ProjectWithFinance},
};

/// Sum of all entries of one type
pub fn total_of(project: &ProjectWithFinance, entry_type: FinancialEntryType) -> f64 {
    project
        .financial_entries
        .iter()
        .filter(|e| e.entry_type == entry_type)
        .map(|e| e.amount)
        .sum()
}

/// Margin in percent of `budget`; zero when there is no budget to measure against
pub fn margin_percent(budget: f64, costs: f64) -> f64 {
    if budget > 0.0 {
        (budget - costs) / budget * 100.0
    } else {
        0.0
    }
}

/// Shape a project into the snapshot the advisor reads
pub fn project_snapshot(project: &ProjectWithFinance) -> ProjectSnapshot {
    let costs = total_of(project, FinancialEntryType::Cost);
    let margin = margin_percent(project.budget.unwrap_or(0.0), costs);

    ProjectSnapshot {
        id: project.id.clone(),
        name: project.name.clone(),
        status: project.status,
        estimated_hours: project.estimated_hours,
        actual_hours: project.actual_hours,
        updated_at: project.updated_at,
        budget: project.budget,
        costs,
        margin,
    }
}

/// Finance view of one project.
///
/// The budget is the sum of BUDGET entries when there are any, otherwise the
/// project's own budget field.
pub fn finance_summary(project: &ProjectWithFinance, margin_threshold: f64) -> ProjectFinanceSummary {
    let budget_entries = total_of(project, FinancialEntryType::Budget);
    let budget = if budget_entries != 0.0 {
        budget_entries
    } else {
        project.budget.unwrap_or(0.0)
    };
    let invoiced = total_of(project, FinancialEntryType::InvoiceSent);
    let paid = total_of(project, FinancialEntryType::InvoicePaid);
    let costs = total_of(project, FinancialEntryType::Cost);
    let margin = margin_percent(budget, costs);

    ProjectFinanceSummary {
        project_id: project.id.clone(),
        project_name: project.name.clone(),
        budget,
        invoiced,
        paid,
        costs,
        margin,
        outstanding: invoiced - paid,
        at_risk: margin < margin_threshold,
    }
}

pub fn portfolio_totals(summaries: &[ProjectFinanceSummary]) -> PortfolioTotals {
    let mut totals = summaries
        .iter()
        .fold(PortfolioTotals::default(), |mut acc, s| {
            acc.budget += s.budget;
            acc.invoiced += s.invoiced;
            acc.paid += s.paid;
            acc.costs += s.costs;
            acc
        });
    totals.outstanding = totals.invoiced - totals.paid;
    totals.margin = margin_percent(totals.budget, totals.costs);
    totals
}


#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{test_support::*, *};

    #[test]
    fn test_snapshot_margin_from_costs() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let mut villa = project("p1", Some(380000.0), now);
        entry(&mut villa, FinancialEntryType::Cost, 300000.0, now);
        entry(&mut villa, FinancialEntryType::Cost, 40000.0, now);
        entry(&mut villa, FinancialEntryType::InvoiceSent, 100000.0, now);

        let snapshot = project_snapshot(&villa);
        assert_eq!(snapshot.costs, 340000.0);
        assert!((snapshot.margin - 10.526).abs() < 0.001);
        assert_eq!(snapshot.budget, Some(380000.0));
    }

    #[test]
    fn test_snapshot_without_budget_has_zero_margin() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let mut p = project("p1", None, now);
        entry(&mut p, FinancialEntryType::Cost, 500.0, now);
        let snapshot = project_snapshot(&p);
        assert_eq!(snapshot.margin, 0.0);
        assert!(!snapshot.has_budget());
    }

    #[test]
    fn test_finance_summary_prefers_budget_entries() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let mut p = project("p1", Some(50000.0), now);
        entry(&mut p, FinancialEntryType::Budget, 100000.0, now);
        entry(&mut p, FinancialEntryType::InvoiceSent, 40000.0, now);
        entry(&mut p, FinancialEntryType::InvoicePaid, 25000.0, now);
        entry(&mut p, FinancialEntryType::Cost, 90000.0, now);

        let summary = finance_summary(&p, 15.0);
        assert_eq!(summary.budget, 100000.0);
        assert_eq!(summary.outstanding, 15000.0);
        assert_eq!(summary.margin, 10.0);
        assert!(summary.at_risk);

        let fallback = finance_summary(&project("p2", Some(50000.0), now), 15.0);
        assert_eq!(fallback.budget, 50000.0);
        assert_eq!(fallback.margin, 100.0);
        assert!(!fallback.at_risk);
    }

    #[test]
    fn test_portfolio_totals() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let mut a = project("a", Some(100000.0), now);
        entry(&mut a, FinancialEntryType::Cost, 50000.0, now);
        entry(&mut a, FinancialEntryType::InvoiceSent, 30000.0, now);
        let mut b = project("b", Some(300000.0), now);
        entry(&mut b, FinancialEntryType::Cost, 150000.0, now);
        entry(&mut b, FinancialEntryType::InvoicePaid, 10000.0, now);

        let summaries = vec![finance_summary(&a, 15.0), finance_summary(&b, 15.0)];
        let totals = portfolio_totals(&summaries);
        assert_eq!(totals.budget, 400000.0);
        assert_eq!(totals.costs, 200000.0);
        assert_eq!(totals.outstanding, 20000.0);
        assert_eq!(totals.margin, 50.0);

        assert_eq!(portfolio_totals(&[]), PortfolioTotals::default());
    }
}
