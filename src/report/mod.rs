use serde::Serialize;
use sqlx::sqlite::SqliteConnection;

use crate::store::queries::{self, AccountSide, MonthCashFlow, StatusCount, SupplierTotal};

/// The three fixed reports behind the "Relatórios" option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReportKind {
    CashFlowByMonth,
    PayablesBySupplier,
    StatusBreakdown,
}

impl ReportKind {
    pub const ALL: [ReportKind; 3] = [
        ReportKind::CashFlowByMonth,
        ReportKind::PayablesBySupplier,
        ReportKind::StatusBreakdown,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::CashFlowByMonth => "Fluxo de Caixa por Mês",
            ReportKind::PayablesBySupplier => "Distribuição das Contas a Pagar por Fornecedor",
            ReportKind::StatusBreakdown => "Status das Contas a Pagar e Receber",
        }
    }

    pub fn chart(&self) -> ChartKind {
        match self {
            ReportKind::CashFlowByMonth => ChartKind::Line,
            ReportKind::PayablesBySupplier => ChartKind::Pie,
            ReportKind::StatusBreakdown => ChartKind::GroupedBar,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChartKind {
    Line,
    Pie,
    GroupedBar,
}

/// Month axis with one income and one expense value per month.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CashFlowSeries {
    pub months: Vec<String>,
    pub income: Vec<f64>,
    pub expense: Vec<f64>,
}

/// One pie slice; `share` is the fraction of the grand total in 0..=1.
#[derive(Debug, Clone, Serialize)]
pub struct SupplierShare {
    pub supplier: String,
    pub total: f64,
    pub share: f64,
}

/// One bar group per status, a payables and a receivables count each.
#[derive(Debug, Clone, Serialize)]
pub struct StatusGroup {
    pub status: String,
    pub payables: i64,
    pub receivables: i64,
}

#[derive(Debug, Clone, Serialize)]
pub enum ReportData {
    CashFlow(CashFlowSeries),
    SupplierShares(Vec<SupplierShare>),
    StatusGroups(Vec<StatusGroup>),
}

/// Chart-ready report handed to the renderer.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub title: &'static str,
    pub chart: ChartKind,
    pub data: ReportData,
}

pub async fn build_report(
    conn: &mut SqliteConnection,
    kind: ReportKind,
) -> Result<Report, sqlx::Error> {
    let data = match kind {
        ReportKind::CashFlowByMonth => {
            ReportData::CashFlow(cash_flow_series(queries::monthly_cash_flow(conn).await?))
        }
        ReportKind::PayablesBySupplier => {
            ReportData::SupplierShares(supplier_shares(queries::payables_by_supplier(conn).await?))
        }
        ReportKind::StatusBreakdown => {
            ReportData::StatusGroups(status_groups(queries::status_breakdown(conn).await?))
        }
    };

    Ok(Report {
        title: kind.title(),
        chart: kind.chart(),
        data,
    })
}

fn cash_flow_series(rows: Vec<MonthCashFlow>) -> CashFlowSeries {
    let mut series = CashFlowSeries::default();
    for row in rows {
        series.months.push(row.month);
        series.income.push(row.income);
        series.expense.push(row.expense);
    }
    series
}

fn supplier_shares(rows: Vec<SupplierTotal>) -> Vec<SupplierShare> {
    let grand: f64 = rows.iter().map(|r| r.total).sum();
    rows.into_iter()
        .map(|r| {
            let share = if grand > 0.0 { r.total / grand } else { 0.0 };
            SupplierShare {
                supplier: r.supplier,
                total: r.total,
                share,
            }
        })
        .collect()
}

fn status_groups(rows: Vec<StatusCount>) -> Vec<StatusGroup> {
    use std::collections::BTreeMap;

    let mut merged: BTreeMap<String, (i64, i64)> = BTreeMap::new();
    for row in rows {
        let counts = merged.entry(row.status).or_insert((0, 0));
        match row.side {
            AccountSide::Payable => counts.0 += row.total,
            AccountSide::Receivable => counts.1 += row.total,
        }
    }

    merged
        .into_iter()
        .map(|(status, (payables, receivables))| StatusGroup {
            status,
            payables,
            receivables,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::Connection;

    #[test]
    fn cash_flow_series_keeps_months_aligned() {
        let rows = vec![
            MonthCashFlow {
                month: "2025-01".into(),
                income: 300.0,
                expense: 120.0,
            },
            MonthCashFlow {
                month: "2025-02".into(),
                income: 0.0,
                expense: 80.0,
            },
        ];

        let series = cash_flow_series(rows);
        assert_eq!(series.months, vec!["2025-01", "2025-02"]);
        assert_eq!(series.income, vec![300.0, 0.0]);
        assert_eq!(series.expense, vec![120.0, 80.0]);
    }

    #[test]
    fn supplier_shares_sum_to_one() {
        let rows = vec![
            SupplierTotal {
                supplier: "Alfa".into(),
                total: 750.0,
            },
            SupplierTotal {
                supplier: "Beta".into(),
                total: 250.0,
            },
        ];

        let shares = supplier_shares(rows);
        assert!((shares[0].share - 0.75).abs() < 1e-9);
        assert!((shares[1].share - 0.25).abs() < 1e-9);

        let sum: f64 = shares.iter().map(|s| s.share).sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn supplier_shares_zero_total_has_no_nan() {
        let rows = vec![SupplierTotal {
            supplier: "Alfa".into(),
            total: 0.0,
        }];

        let shares = supplier_shares(rows);
        assert_eq!(shares[0].share, 0.0);
    }

    #[test]
    fn status_groups_fill_missing_side_with_zero() {
        let rows = vec![
            StatusCount {
                side: AccountSide::Payable,
                status: "Pendente".into(),
                total: 3,
            },
            StatusCount {
                side: AccountSide::Receivable,
                status: "Pendente".into(),
                total: 2,
            },
            StatusCount {
                side: AccountSide::Receivable,
                status: "Pago".into(),
                total: 4,
            },
        ];

        let groups = status_groups(rows);
        assert_eq!(groups.len(), 2);

        // BTreeMap ordering: "Pago" before "Pendente"
        assert_eq!(groups[0].status, "Pago");
        assert_eq!(groups[0].payables, 0);
        assert_eq!(groups[0].receivables, 4);

        assert_eq!(groups[1].status, "Pendente");
        assert_eq!(groups[1].payables, 3);
        assert_eq!(groups[1].receivables, 2);
    }

    #[tokio::test]
    async fn all_reports_build_on_an_empty_database() {
        let mut conn = sqlx::sqlite::SqliteConnection::connect("sqlite::memory:")
            .await
            .unwrap();
        crate::store::sample_data::create_schema(&mut conn).await.unwrap();

        for kind in ReportKind::ALL {
            let report = build_report(&mut conn, kind).await.unwrap();
            assert_eq!(report.chart, kind.chart());
            match report.data {
                ReportData::CashFlow(series) => assert!(series.months.is_empty()),
                ReportData::SupplierShares(shares) => assert!(shares.is_empty()),
                ReportData::StatusGroups(groups) => assert!(groups.is_empty()),
            }
        }
    }
}
