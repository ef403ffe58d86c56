use crate::report::{self, Report, ReportKind};
use crate::store::datatype::{Client, LedgerEntry, Payable, Receivable};
use crate::store::queries;
use sqlx::Connection;

/// The five fixed sidebar options.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    Clients,
    Payables,
    Receivables,
    Entries,
    Reports,
}

impl Screen {
    pub const ALL: [Screen; 5] = [
        Screen::Clients,
        Screen::Payables,
        Screen::Receivables,
        Screen::Entries,
        Screen::Reports,
    ];

    pub fn menu_label(&self) -> &'static str {
        match self {
            Screen::Clients => "Clientes",
            Screen::Payables => "Contas a Pagar",
            Screen::Receivables => "Contas a Receber",
            Screen::Entries => "Lançamentos",
            Screen::Reports => "Relatórios",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Clients => "Cadastro de Clientes",
            Screen::Payables => "Contas a Pagar",
            Screen::Receivables => "Contas a Receber",
            Screen::Entries => "Lançamentos Financeiros",
            Screen::Reports => "Relatórios Financeiros",
        }
    }

    fn index(&self) -> usize {
        Screen::ALL.iter().position(|s| s == self).unwrap_or(0)
    }
}

/// Rows (or the built report) backing the current page.
pub enum PageData {
    Clients(Vec<Client>),
    Payables(Vec<Payable>),
    Receivables(Vec<Receivable>),
    Entries(Vec<LedgerEntry>),
    Report(Report),
}

pub struct App {
    pub db_url: String,
    pub current_screen: Screen,
    pub selected_report_idx: usize,
    pub page: Option<PageData>,
    pub error: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(db_url: String) -> Self {
        Self {
            db_url,
            current_screen: Screen::Clients,
            selected_report_idx: 0,
            page: None,
            error: None,
            should_quit: false,
        }
    }

    pub fn next_screen(&mut self) {
        let idx = (self.current_screen.index() + 1) % Screen::ALL.len();
        self.current_screen = Screen::ALL[idx];
    }

    pub fn prev_screen(&mut self) {
        let idx = (self.current_screen.index() + Screen::ALL.len() - 1) % Screen::ALL.len();
        self.current_screen = Screen::ALL[idx];
    }

    pub fn next_report(&mut self) {
        self.selected_report_idx = (self.selected_report_idx + 1) % ReportKind::ALL.len();
    }

    pub fn prev_report(&mut self) {
        self.selected_report_idx =
            (self.selected_report_idx + ReportKind::ALL.len() - 1) % ReportKind::ALL.len();
    }

    pub fn report_kind(&self) -> ReportKind {
        ReportKind::ALL[self.selected_report_idx]
    }

    /// Re-fetches the current page through a fresh short-lived connection.
    /// Fetch errors land on the status line instead of aborting the loop.
    pub async fn refresh(&mut self) {
        match self.load_page().await {
            Ok(page) => {
                self.page = Some(page);
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "page load failed");
                self.page = None;
                self.error = Some(format!("db error: {e}"));
            }
        }
    }

    async fn load_page(&self) -> Result<PageData, sqlx::Error> {
        let mut conn = queries::connect(&self.db_url).await?;

        let page = match self.current_screen {
            Screen::Clients => PageData::Clients(queries::list_clients(&mut conn).await?),
            Screen::Payables => PageData::Payables(queries::list_payables(&mut conn).await?),
            Screen::Receivables => {
                PageData::Receivables(queries::list_receivables(&mut conn).await?)
            }
            Screen::Entries => PageData::Entries(queries::list_entries(&mut conn).await?),
            Screen::Reports => {
                PageData::Report(report::build_report(&mut conn, self.report_kind()).await?)
            }
        };

        conn.close().await?;
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screens_cycle_through_all_five_options() {
        let mut app = App::new("sqlite::memory:".to_string());
        assert_eq!(app.current_screen, Screen::Clients);

        for expected in [
            Screen::Payables,
            Screen::Receivables,
            Screen::Entries,
            Screen::Reports,
            Screen::Clients,
        ] {
            app.next_screen();
            assert_eq!(app.current_screen, expected);
        }

        app.prev_screen();
        assert_eq!(app.current_screen, Screen::Reports);
    }

    #[test]
    fn report_selector_wraps() {
        let mut app = App::new("sqlite::memory:".to_string());
        assert_eq!(app.report_kind(), ReportKind::CashFlowByMonth);

        app.prev_report();
        assert_eq!(app.report_kind(), ReportKind::StatusBreakdown);
        app.next_report();
        assert_eq!(app.report_kind(), ReportKind::CashFlowByMonth);
    }

    #[tokio::test]
    async fn refresh_surfaces_errors_on_the_status_line() {
        // nonexistent directory makes the connect fail
        let mut app = App::new("sqlite:///no/such/dir/erp.db".to_string());
        app.refresh().await;

        assert!(app.page.is_none());
        assert!(app.error.as_deref().unwrap_or("").starts_with("db error:"));
    }
}
