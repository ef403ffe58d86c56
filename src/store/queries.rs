use serde::Serialize;
use sqlx::sqlite::SqliteConnection;
use sqlx::Connection;

use super::datatype::{Client, LedgerEntry, Payable, Receivable};

/// One connection per page render, closed by the caller after the fetch.
pub async fn connect(url: &str) -> Result<SqliteConnection, sqlx::Error> {
    SqliteConnection::connect(url).await
}

pub async fn list_clients(conn: &mut SqliteConnection) -> Result<Vec<Client>, sqlx::Error> {
    sqlx::query_as::<_, Client>(
        r#"
        SELECT id, nome AS name, email, telefone AS phone
        FROM clientes
        ORDER BY id
        "#,
    )
    .fetch_all(conn)
    .await
}

pub async fn list_payables(conn: &mut SqliteConnection) -> Result<Vec<Payable>, sqlx::Error> {
    sqlx::query_as::<_, Payable>(
        r#"
        SELECT id, fornecedor AS supplier, valor AS amount, vencimento AS due_date, status
        FROM contas_pagar
        ORDER BY vencimento, id
        "#,
    )
    .fetch_all(conn)
    .await
}

pub async fn list_receivables(conn: &mut SqliteConnection) -> Result<Vec<Receivable>, sqlx::Error> {
    sqlx::query_as::<_, Receivable>(
        r#"
        SELECT id, cliente AS customer, valor AS amount, vencimento AS due_date, status
        FROM contas_receber
        ORDER BY vencimento, id
        "#,
    )
    .fetch_all(conn)
    .await
}

pub async fn list_entries(conn: &mut SqliteConnection) -> Result<Vec<LedgerEntry>, sqlx::Error> {
    sqlx::query_as::<_, LedgerEntry>(
        r#"
        SELECT id, descricao AS description, valor AS amount, tipo AS kind, data AS date
        FROM lancamentos
        ORDER BY data, id
        "#,
    )
    .fetch_all(conn)
    .await
}

/// One row per `YYYY-MM` month that has at least one ledger entry.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct MonthCashFlow {
    pub month: String, // strftime('%Y-%m', data)
    pub income: f64,
    pub expense: f64,
}

pub async fn monthly_cash_flow(
    conn: &mut SqliteConnection,
) -> Result<Vec<MonthCashFlow>, sqlx::Error> {
    sqlx::query_as::<_, MonthCashFlow>(
        r#"
        SELECT strftime('%Y-%m', data) AS month,
               SUM(CASE WHEN tipo = 'Receita' THEN valor ELSE 0.0 END) AS income,
               SUM(CASE WHEN tipo = 'Despesa' THEN valor ELSE 0.0 END) AS expense
        FROM lancamentos
        GROUP BY month
        ORDER BY month
        "#,
    )
    .fetch_all(conn)
    .await
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SupplierTotal {
    pub supplier: String,
    pub total: f64,
}

pub async fn payables_by_supplier(
    conn: &mut SqliteConnection,
) -> Result<Vec<SupplierTotal>, sqlx::Error> {
    sqlx::query_as::<_, SupplierTotal>(
        r#"
        SELECT fornecedor AS supplier, SUM(valor) AS total
        FROM contas_pagar
        GROUP BY fornecedor
        ORDER BY total DESC, fornecedor
        "#,
    )
    .fetch_all(conn)
    .await
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AccountSide {
    Payable,
    Receivable,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusCount {
    pub side: AccountSide,
    pub status: String,
    pub total: i64,
}

#[derive(Debug, sqlx::FromRow)]
struct StatusRow {
    status: String,
    total: i64,
}

/// Per-status counts over both account tables, tagged with the side they
/// came from (payables first, then receivables).
pub async fn status_breakdown(
    conn: &mut SqliteConnection,
) -> Result<Vec<StatusCount>, sqlx::Error> {
    let payables = sqlx::query_as::<_, StatusRow>(
        r#"
        SELECT status, COUNT(*) AS total
        FROM contas_pagar
        GROUP BY status
        ORDER BY status
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    let receivables = sqlx::query_as::<_, StatusRow>(
        r#"
        SELECT status, COUNT(*) AS total
        FROM contas_receber
        GROUP BY status
        ORDER BY status
        "#,
    )
    .fetch_all(conn)
    .await?;

    let mut out = Vec::with_capacity(payables.len() + receivables.len());
    out.extend(payables.into_iter().map(|r| StatusCount {
        side: AccountSide::Payable,
        status: r.status,
        total: r.total,
    }));
    out.extend(receivables.into_iter().map(|r| StatusCount {
        side: AccountSide::Receivable,
        status: r.status,
        total: r.total,
    }));
    Ok(out)
}
