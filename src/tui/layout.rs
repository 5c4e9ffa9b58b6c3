//! TUI layout and widget rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};

use super::runtime::App;
use super::style;

/// Renders the full TUI frame.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(10),   // charts
            Constraint::Length(6), // status panel
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    render_production(frame, app, charts[0]);
    render_cash_flow(frame, app, charts[1]);

    render_status(frame, app, chunks[2]);
    render_footer(frame, chunks[3]);
}

/// Header bar: preset name, year progress, speed, run state.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let (state_icon, state_label) = if app.is_finished() {
        ("■", "DONE")
    } else if app.paused {
        ("‖", "PAUSED")
    } else {
        ("▶", "RUNNING")
    };

    let header = Line::from(vec![
        Span::styled(
            " PV-ROI-SIM ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            &app.preset_name,
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " │ year {}/{} │ {}ms │ {} {} ",
            app.year,
            app.total_years,
            app.tick_interval_ms(),
            state_icon,
            state_label,
        )),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

/// Yearly production with the full-horizon mean as a reference line.
fn render_production(frame: &mut Frame, app: &App, area: Rect) {
    let Some(outcome) = app.outcome() else {
        frame.render_widget(Block::default().borders(Borders::ALL), area);
        return;
    };
    let points = app.production_points();
    let last_year = outcome.system.horizon_years;
    let x_bounds = style::year_bounds(last_year);
    let mean = outcome.production.mean_kwh;
    let mean_line = [(x_bounds[0], mean), (x_bounds[1], mean)];
    let y_bounds = style::auto_bounds_y(&[points.as_slice(), &mean_line[..]]);

    let datasets = vec![
        Dataset::default()
            .name("kWh")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(style::PRODUCTION_COLOR))
            .data(&points),
        Dataset::default()
            .name(format!("avg {mean:.0}"))
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(style::MEAN_COLOR))
            .data(&mean_line),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(" Energy Production ")
                .borders(Borders::ALL),
        )
        .x_axis(
            Axis::default()
                .title("year")
                .bounds(x_bounds)
                .labels(vec!["1".to_string(), last_year.to_string()]),
        )
        .y_axis(
            Axis::default()
                .title("kWh")
                .bounds(y_bounds)
                .labels(vec![
                    format!("{:.0}", y_bounds[0]),
                    format!("{:.0}", y_bounds[1]),
                ]),
        );
    frame.render_widget(chart, area);
}

/// Cumulative cash flow against the zero line.
fn render_cash_flow(frame: &mut Frame, app: &App, area: Rect) {
    let Some(outcome) = app.outcome() else {
        frame.render_widget(Block::default().borders(Borders::ALL), area);
        return;
    };
    let points = app.cash_flow_points();
    let last_year = outcome.finance.lifetime_years;
    let x_bounds = style::year_bounds(last_year);
    let zero_line = [(x_bounds[0], 0.0), (x_bounds[1], 0.0)];
    let y_bounds = style::auto_bounds_y(&[points.as_slice(), &zero_line[..]]);

    let title = match app.revealed_breakeven() {
        Some(year) => format!(" Cumulative Cash Flow (break-even year {year}) "),
        None => " Cumulative Cash Flow ".to_string(),
    };

    let datasets = vec![
        Dataset::default()
            .name("cash")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(style::CASH_FLOW_COLOR))
            .data(&points),
        Dataset::default()
            .name("break-even")
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(style::ZERO_COLOR))
            .data(&zero_line),
    ];

    let chart = Chart::new(datasets)
        .block(Block::default().title(title).borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .title("year")
                .bounds(x_bounds)
                .labels(vec!["1".to_string(), last_year.to_string()]),
        )
        .y_axis(
            Axis::default()
                .bounds(y_bounds)
                .labels(vec![
                    format!("{:.0}", y_bounds[0]),
                    format!("{:.0}", y_bounds[1]),
                ]),
        );
    frame.render_widget(chart, area);
}

/// Status panel with the latest ledger row and headline figures.
fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let lines = if let Some(outcome) = app.outcome() {
        let roi = &outcome.roi;
        let mut lines = vec![Line::from(format!(
            "  LCOE={:.4}/kWh  production={:.2} kWh/yr  investment={:.2}",
            roi.lcoe_per_kwh,
            outcome.finance.yearly_production_kwh,
            outcome.finance.initial_investment,
        ))];
        match app.revealed_ledger().last() {
            Some(row) => lines.push(Line::from(format!("  {row}"))),
            None => lines.push(Line::from("  Waiting for first year...")),
        }
        if app.is_finished() {
            let verdict = roi.payback_verdict();
            lines.push(Line::from(Span::styled(
                format!("  {verdict}"),
                Style::default()
                    .fg(style::verdict_color(verdict))
                    .add_modifier(Modifier::BOLD),
            )));
        }
        lines
    } else {
        app.errors()
            .iter()
            .map(|e| Line::from(Span::styled(format!("  {e}"), style::ERROR_FG)))
            .collect()
    };

    let block = Block::default().title(" Status ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Footer with keybinding hints.
fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        " q:Quit  Space:Pause  +/-:Speed  1/2/3:Preset  r:Restart  e:End",
        Style::default().fg(style::FOOTER_FG),
    )));
    frame.render_widget(footer, area);
}
