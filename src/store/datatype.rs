use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// `tipo` column of `lancamentos`. The cash-flow query depends on exactly
/// these two values, so the column is decoded into a closed enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum EntryKind {
    Receita,
    Despesa,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Receita => "Receita",
            EntryKind::Despesa => "Despesa",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Client {
    pub id: i64,              // INTEGER PK
    pub name: String,         // nome TEXT
    pub email: Option<String>,
    pub phone: Option<String>, // telefone TEXT
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Payable {
    pub id: i64,
    pub supplier: String,   // fornecedor TEXT
    pub amount: f64,        // valor REAL
    pub due_date: NaiveDate, // vencimento DATE
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Receivable {
    pub id: i64,
    pub customer: String,   // cliente TEXT
    pub amount: f64,        // valor REAL
    pub due_date: NaiveDate, // vencimento DATE
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct LedgerEntry {
    pub id: i64,
    pub description: String, // descricao TEXT
    pub amount: f64,         // valor REAL
    pub kind: EntryKind,     // tipo TEXT
    pub date: NaiveDate,     // data DATE
}
