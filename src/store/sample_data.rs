use sqlx::sqlite::SqliteConnection;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS clientes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    nome TEXT NOT NULL,
    email TEXT,
    telefone TEXT
);

CREATE TABLE IF NOT EXISTS contas_pagar (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    fornecedor TEXT NOT NULL,
    valor REAL NOT NULL,
    vencimento DATE NOT NULL,
    status TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS contas_receber (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    cliente TEXT NOT NULL,
    valor REAL NOT NULL,
    vencimento DATE NOT NULL,
    status TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS lancamentos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    descricao TEXT NOT NULL,
    valor REAL NOT NULL,
    tipo TEXT NOT NULL,
    data DATE NOT NULL
);
"#;

const DEMO_ROWS: &str = r#"
INSERT INTO clientes (nome, email, telefone) VALUES
    ('Ana Souza', 'ana.souza@example.com', '(11) 98801-2233'),
    ('Bruno Lima', 'bruno.lima@example.com', '(21) 97712-8844'),
    ('Carla Mendes', 'carla.mendes@example.com', NULL),
    ('Diego Castro', NULL, '(31) 99655-1020');

INSERT INTO contas_pagar (fornecedor, valor, vencimento, status) VALUES
    ('Alfa Materiais', 1250.00, '2025-01-15', 'Pago'),
    ('Beta Transportes', 830.50, '2025-02-10', 'Pago'),
    ('Alfa Materiais', 990.00, '2025-03-15', 'Pendente'),
    ('Central Energia', 410.75, '2025-03-20', 'Pendente'),
    ('Beta Transportes', 620.00, '2025-04-10', 'Pendente'),
    ('Central Energia', 398.30, '2025-04-22', 'Pago');

INSERT INTO contas_receber (cliente, valor, vencimento, status) VALUES
    ('Ana Souza', 2400.00, '2025-01-30', 'Pago'),
    ('Bruno Lima', 1150.00, '2025-02-28', 'Pago'),
    ('Carla Mendes', 980.00, '2025-03-30', 'Pendente'),
    ('Ana Souza', 1320.00, '2025-04-30', 'Pendente'),
    ('Diego Castro', 760.00, '2025-05-30', 'Pendente');

INSERT INTO lancamentos (descricao, valor, tipo, data) VALUES
    ('Venda de serviços', 5200.00, 'Receita', '2025-01-08'),
    ('Folha de pagamento', 3100.00, 'Despesa', '2025-01-28'),
    ('Venda de serviços', 4750.00, 'Receita', '2025-02-07'),
    ('Aluguel do galpão', 1800.00, 'Despesa', '2025-02-05'),
    ('Venda de produtos', 6100.00, 'Receita', '2025-03-12'),
    ('Folha de pagamento', 3100.00, 'Despesa', '2025-03-28'),
    ('Manutenção de equipamentos', 640.00, 'Despesa', '2025-03-18'),
    ('Venda de produtos', 5400.00, 'Receita', '2025-04-11'),
    ('Folha de pagamento', 3250.00, 'Despesa', '2025-04-28'),
    ('Venda de serviços', 3900.00, 'Receita', '2025-05-09'),
    ('Aluguel do galpão', 1800.00, 'Despesa', '2025-05-05'),
    ('Venda de serviços', 4480.00, 'Receita', '2025-06-10'),
    ('Folha de pagamento', 3250.00, 'Despesa', '2025-06-27');
"#;

pub async fn create_schema(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA).execute(conn).await?;
    Ok(())
}

/// Seeds the demo dataset so the dashboard runs against a fresh working
/// directory. Skipped when `clientes` already has rows.
pub async fn seed_demo(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    let clients: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clientes")
        .fetch_one(&mut *conn)
        .await?;
    if clients > 0 {
        return Ok(());
    }

    sqlx::raw_sql(DEMO_ROWS).execute(conn).await?;
    Ok(())
}
