// src/tui/ui.rs

use std::error::Error;
use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::Span,
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, List, ListItem,
        Paragraph, Row, Table, Tabs,
    },
    Frame, Terminal,
};

use super::app::{App, PageData, Screen};
use crate::report::{CashFlowSeries, Report, ReportData, ReportKind, StatusGroup, SupplierShare};
use crate::store::datatype::{Client, EntryKind, LedgerEntry, Payable, Receivable};

/// Entry point for the TUI. Called from main.rs.
pub async fn run_tui(db_url: String) -> Result<(), Box<dyn Error>> {
    let mut app = App::new(db_url);
    app.refresh().await;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    loop {
        terminal.draw(|f| ui(f, &app))?;

        if app.should_quit {
            break;
        }

        if event::poll(Duration::from_millis(200))? {
            if let Event::Key(key) = event::read()? {
                if handle_key_event(&mut app, key) {
                    // selection changed: one page load per render
                    app.refresh().await;
                }
            }
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

/// Returns true when the selection changed and the page must be re-fetched.
fn handle_key_event(app: &mut App, key: KeyEvent) -> bool {
    use KeyCode::*;

    if key.kind != KeyEventKind::Press {
        return false;
    }

    match key.code {
        // Quit
        Char('q') => {
            app.should_quit = true;
            false
        }

        // Sidebar selection
        Down | Tab => {
            app.next_screen();
            true
        }
        Up | BackTab => {
            app.prev_screen();
            true
        }

        // Nested report selection on the Relatórios screen
        Right => {
            if app.current_screen == Screen::Reports {
                app.next_report();
                true
            } else {
                false
            }
        }
        Left => {
            if app.current_screen == Screen::Reports {
                app.prev_report();
                true
            } else {
                false
            }
        }

        // Manual reload
        Char('r') => true,

        _ => false,
    }
}

/// Top-level UI layout: header, sidebar + content, footer.
fn ui(f: &mut Frame<'_>, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(0),    // main
            Constraint::Length(1), // footer
        ])
        .split(f.area());

    let header = Paragraph::new(format!("ERP Financeiro - {}", app.current_screen.title()))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(22), // sidebar
            Constraint::Min(0),     // page
        ])
        .split(chunks[1]);

    draw_sidebar(f, main[0], app);

    if let Some(ref msg) = app.error {
        let p = Paragraph::new(msg.as_str())
            .style(Style::default().fg(Color::Red))
            .block(Block::default().title("Erro").borders(Borders::ALL));
        f.render_widget(p, main[1]);
    } else {
        match app.page {
            Some(PageData::Clients(ref rows)) => draw_clients(f, main[1], rows),
            Some(PageData::Payables(ref rows)) => draw_payables(f, main[1], rows),
            Some(PageData::Receivables(ref rows)) => draw_receivables(f, main[1], rows),
            Some(PageData::Entries(ref rows)) => draw_entries(f, main[1], rows),
            Some(PageData::Report(ref report)) => draw_report(f, main[1], app, report),
            None => {
                let p = Paragraph::new("Carregando...")
                    .block(Block::default().borders(Borders::ALL));
                f.render_widget(p, main[1]);
            }
        }
    }

    let footer = Paragraph::new(
        "↑/↓: opção  |  ←/→: relatório (Relatórios)  |  r: atualizar  |  q: sair",
    );
    f.render_widget(footer, chunks[2]);
}

fn draw_sidebar(f: &mut Frame<'_>, area: Rect, app: &App) {
    let items = Screen::ALL.iter().map(|screen| {
        let item = ListItem::new(screen.menu_label());
        if *screen == app.current_screen {
            item.style(Style::default().add_modifier(Modifier::REVERSED))
        } else {
            item
        }
    });

    let list = List::new(items).block(
        Block::default()
            .title("Selecione uma opção")
            .borders(Borders::ALL),
    );
    f.render_widget(list, area);
}

fn draw_clients(f: &mut Frame<'_>, area: Rect, clients: &[Client]) {
    let rows = clients.iter().map(|c| {
        Row::new(vec![
            c.id.to_string(),
            c.name.clone(),
            c.email.clone().unwrap_or_default(),
            c.phone.clone().unwrap_or_default(),
        ])
    });

    let widths = [
        Constraint::Length(6),
        Constraint::Length(24),
        Constraint::Length(30),
        Constraint::Length(18),
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["ID", "Nome", "Email", "Telefone"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().title("Clientes").borders(Borders::ALL));

    f.render_widget(table, area);
}

fn draw_payables(f: &mut Frame<'_>, area: Rect, payables: &[Payable]) {
    let rows = payables.iter().map(|p| {
        Row::new(vec![
            p.id.to_string(),
            p.supplier.clone(),
            format!("{:.2}", p.amount),
            p.due_date.to_string(),
            p.status.clone(),
        ])
    });

    let widths = [
        Constraint::Length(6),
        Constraint::Length(24),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["ID", "Fornecedor", "Valor", "Vencimento", "Status"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().title("Contas a Pagar").borders(Borders::ALL));

    f.render_widget(table, area);
}

fn draw_receivables(f: &mut Frame<'_>, area: Rect, receivables: &[Receivable]) {
    let rows = receivables.iter().map(|r| {
        Row::new(vec![
            r.id.to_string(),
            r.customer.clone(),
            format!("{:.2}", r.amount),
            r.due_date.to_string(),
            r.status.clone(),
        ])
    });

    let widths = [
        Constraint::Length(6),
        Constraint::Length(24),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["ID", "Cliente", "Valor", "Vencimento", "Status"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(
            Block::default()
                .title("Contas a Receber")
                .borders(Borders::ALL),
        );

    f.render_widget(table, area);
}

fn draw_entries(f: &mut Frame<'_>, area: Rect, entries: &[LedgerEntry]) {
    let rows = entries.iter().map(|e| {
        let kind_style = match e.kind {
            EntryKind::Receita => Style::default().fg(Color::Green),
            EntryKind::Despesa => Style::default().fg(Color::Red),
        };
        Row::new(vec![
            Span::raw(e.id.to_string()),
            Span::raw(e.date.to_string()),
            Span::raw(e.description.clone()),
            Span::styled(e.kind.as_str(), kind_style),
            Span::raw(format!("{:.2}", e.amount)),
        ])
    });

    let widths = [
        Constraint::Length(6),
        Constraint::Length(12),
        Constraint::Length(30),
        Constraint::Length(10),
        Constraint::Length(12),
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["ID", "Data", "Descrição", "Tipo", "Valor"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().title("Lançamentos").borders(Borders::ALL));

    f.render_widget(table, area);
}

// Relatórios screen: nested selector on top, the mapped chart below.
fn draw_report(f: &mut Frame<'_>, area: Rect, app: &App, report: &Report) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // report selector
            Constraint::Min(0),    // chart
        ])
        .split(area);

    let titles: Vec<&str> = ReportKind::ALL.iter().map(|k| k.title()).collect();
    let tabs = Tabs::new(titles)
        .select(app.selected_report_idx)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .block(
            Block::default()
                .title("Escolha o relatório")
                .borders(Borders::ALL),
        );
    f.render_widget(tabs, chunks[0]);

    match report.data {
        ReportData::CashFlow(ref series) => draw_cash_flow_chart(f, chunks[1], report, series),
        ReportData::SupplierShares(ref shares) => {
            draw_supplier_shares(f, chunks[1], report, shares)
        }
        ReportData::StatusGroups(ref groups) => draw_status_groups(f, chunks[1], report, groups),
    }
}

fn draw_empty(f: &mut Frame<'_>, area: Rect, title: &str) {
    let p = Paragraph::new("Sem dados para exibir.")
        .block(Block::default().title(title.to_string()).borders(Borders::ALL));
    f.render_widget(p, area);
}

// Line chart: income and expense series over the shared month axis.
fn draw_cash_flow_chart(f: &mut Frame<'_>, area: Rect, report: &Report, series: &CashFlowSeries) {
    if series.months.is_empty() {
        draw_empty(f, area, report.title);
        return;
    }

    let income_points: Vec<(f64, f64)> = series
        .income
        .iter()
        .enumerate()
        .map(|(i, v)| (i as f64, *v))
        .collect();
    let expense_points: Vec<(f64, f64)> = series
        .expense
        .iter()
        .enumerate()
        .map(|(i, v)| (i as f64, *v))
        .collect();

    let max_y = series
        .income
        .iter()
        .chain(series.expense.iter())
        .fold(0.0_f64, |acc, v| acc.max(*v));
    let max_y = if max_y > 0.0 { max_y * 1.1 } else { 1.0 };
    let max_x = series.months.len().saturating_sub(1).max(1) as f64;

    let datasets = vec![
        Dataset::default()
            .name("Receita")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Green))
            .data(&income_points),
        Dataset::default()
            .name("Despesa")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Red))
            .data(&expense_points),
    ];

    let x_labels = month_axis_labels(&series.months);
    let y_labels: Vec<String> = vec![
        "0".to_string(),
        format!("{:.0}", max_y / 2.0),
        format!("{:.0}", max_y),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(report.title.to_string())
                .borders(Borders::ALL),
        )
        .x_axis(
            Axis::default()
                .title("Mês")
                .bounds([0.0, max_x])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title("Valor (R$)")
                .bounds([0.0, max_y])
                .labels(y_labels),
        );

    f.render_widget(chart, area);
}

// First, middle, and last month for the x-axis; short series would repeat
// the same label, so duplicates collapse.
fn month_axis_labels(months: &[String]) -> Vec<String> {
    let mut labels = vec![
        months.first().cloned().unwrap_or_default(),
        months[months.len() / 2].clone(),
        months.last().cloned().unwrap_or_default(),
    ];
    labels.dedup();
    labels
}

// Pie stand-in: totals as bars plus a table with the exact shares.
fn draw_supplier_shares(f: &mut Frame<'_>, area: Rect, report: &Report, shares: &[SupplierShare]) {
    if shares.is_empty() {
        draw_empty(f, area, report.title);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let pairs: Vec<(&str, u64)> = shares
        .iter()
        .map(|s| (s.supplier.as_str(), s.total.round().max(0.0) as u64))
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .title(report.title.to_string())
                .borders(Borders::ALL),
        )
        .bar_width(12)
        .bar_gap(2)
        .bar_style(Style::default().fg(Color::Cyan))
        .data(&pairs[..]);
    f.render_widget(chart, chunks[0]);

    let rows = shares.iter().map(|s| {
        Row::new(vec![
            s.supplier.clone(),
            format!("{:.2}", s.total),
            format!("{:.1}%", s.share * 100.0),
        ])
    });

    let widths = [
        Constraint::Length(24),
        Constraint::Length(12),
        Constraint::Length(8),
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["Fornecedor", "Total", "Fatia"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().title("Participação").borders(Borders::ALL));
    f.render_widget(table, chunks[1]);
}

// Grouped bars: one group per status, payables vs receivables.
fn draw_status_groups(f: &mut Frame<'_>, area: Rect, report: &Report, groups: &[StatusGroup]) {
    if groups.is_empty() {
        draw_empty(f, area, report.title);
        return;
    }

    let mut chart = BarChart::default()
        .block(
            Block::default()
                .title(report.title.to_string())
                .borders(Borders::ALL),
        )
        .bar_width(9)
        .bar_gap(1)
        .group_gap(4);

    for group in groups {
        let bars = [
            Bar::default()
                .value(group.payables.max(0) as u64)
                .label("Pagar".into())
                .style(Style::default().fg(Color::Yellow)),
            Bar::default()
                .value(group.receivables.max(0) as u64)
                .label("Receber".into())
                .style(Style::default().fg(Color::Blue)),
        ];
        chart = chart.data(BarGroup::default().label(group.status.clone().into()).bars(&bars));
    }

    f.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn months(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn month_axis_labels_single_month_shows_one_label() {
        let labels = month_axis_labels(&months(&["2025-01"]));
        assert_eq!(labels, vec!["2025-01"]);
    }

    #[test]
    fn month_axis_labels_two_months_drop_the_duplicate() {
        let labels = month_axis_labels(&months(&["2025-01", "2025-02"]));
        assert_eq!(labels, vec!["2025-01", "2025-02"]);
    }

    #[test]
    fn month_axis_labels_pick_first_middle_last() {
        let labels = month_axis_labels(&months(&[
            "2025-01", "2025-02", "2025-03", "2025-04", "2025-05",
        ]));
        assert_eq!(labels, vec!["2025-01", "2025-03", "2025-05"]);
    }
}
