use std::{io, time::Duration};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dailytally_core::service::dto::{Rgba, MEAN_LINE_COLOR, NON_WORKING_COLORS, REGULAR_COLORS};
use dailytally_core::service::dto::{BAR_DATASET_LABEL, MEAN_DATASET_LABEL};
use dailytally_core::{ChartData, DayBar, MonthWindow};
use ratatui::{
    prelude::*,
    widgets::{Axis, Block, BorderType, Borders, Chart, Dataset, Gauge, GraphType, Padding, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::summary::format_amount;

// --- THEME ---
struct Theme {
    primary: Color,
    muted: Color,
    text: Color,
}

const THEME: Theme = Theme {
    primary: Color::Cyan,
    muted: Color::DarkGray,
    text: Color::White,
};

fn rgb(c: Rgba) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

/// Page 0 shows every entry, page `n` shows the n-th month.
pub struct ChartApp {
    pub data: ChartData,
    pub windows: Vec<MonthWindow>,
    pub page: usize,
}

impl ChartApp {
    pub fn new(data: ChartData, windows: Vec<MonthWindow>) -> Self {
        Self { data, windows, page: 0 }
    }

    pub fn next_page(&mut self) {
        if self.page < self.windows.len() {
            self.page += 1;
        }
    }

    pub fn previous_page(&mut self) {
        if self.page > 0 {
            self.page -= 1;
        }
    }

    pub fn title(&self) -> String {
        match self.current_window() {
            Some(w) => w.month.clone(),
            None => "全部".to_string(),
        }
    }

    pub fn current_window(&self) -> Option<&MonthWindow> {
        self.page.checked_sub(1).and_then(|i| self.windows.get(i))
    }

    pub fn current_bars(&self) -> &[DayBar] {
        match self.current_window() {
            Some(w) => &w.bars,
            None => &self.data.bars,
        }
    }
}

pub fn run(data: ChartData, windows: Vec<MonthWindow>) -> Result<()> {
    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = ChartApp::new(data, windows);

    // Main loop
    let res: Result<()> = loop {
        if let Err(e) = terminal.draw(|f| ui(f, &app)) {
            break Err(e.into());
        }

        match event::poll(Duration::from_millis(100)) {
            Ok(true) => {}
            Ok(false) => continue,
            Err(e) => break Err(e.into()),
        }
        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break Ok(()),
                KeyCode::Left | KeyCode::Char('h') => app.previous_page(),
                KeyCode::Right | KeyCode::Char('l') => app.next_page(),
                _ => {}
            },
            Ok(_) => {}
            Err(e) => break Err(e.into()),
        }
    };

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn ui(frame: &mut Frame, app: &ChartApp) {
    let size = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Chart + sidebar
            Constraint::Length(1), // Footer
        ])
        .split(size);

    // --- Header ---
    let header_block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(THEME.muted));

    let header_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(20),
            Constraint::Min(1),
            Constraint::Length(30),
        ])
        .split(main_layout[0]);

    let app_title = Paragraph::new(Span::styled("数据统计可视化", Style::default().fg(THEME.primary).add_modifier(Modifier::BOLD)))
        .block(Block::default().padding(Padding::new(0, 0, 1, 0)));
    frame.render_widget(app_title, header_layout[0]);

    let nav_text = Line::from(vec![
        Span::styled(" < ", Style::default().fg(if app.page > 0 { THEME.text } else { THEME.muted })),
        Span::styled(format!(" {} ", app.title()), Style::default().fg(THEME.text).add_modifier(Modifier::BOLD)),
        Span::styled(" > ", Style::default().fg(if app.page < app.windows.len() { THEME.text } else { THEME.muted })),
    ]);
    let nav = Paragraph::new(nav_text).alignment(Alignment::Right).block(Block::default().padding(Padding::new(0, 0, 1, 0)));
    frame.render_widget(nav, header_layout[2]);
    frame.render_widget(header_block, main_layout[0]);

    // --- Content ---
    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(75),
            Constraint::Length(1),
            Constraint::Percentage(25),
        ])
        .split(main_layout[1]);

    draw_chart(frame, app.current_bars(), app.data.mean, app.data.max_value(), content_chunks[0]);
    draw_info_panel(frame, app, content_chunks[2]);

    // --- Footer ---
    let help = Line::from(vec![
        Span::styled("MONTH: ", Style::default().fg(THEME.muted)),
        Span::styled("←/→ ", Style::default().fg(THEME.text)),
        Span::raw("  "),
        Span::styled("QUIT: ", Style::default().fg(THEME.muted)),
        Span::styled("q", Style::default().fg(THEME.text)),
    ]);
    let footer = Paragraph::new(help).alignment(Alignment::Center).style(Style::default().fg(THEME.muted));
    frame.render_widget(footer, main_layout[2]);
}

/// Picks x-axis labels that fit `width`; all of them when they fit, else the ends and the middle.
fn axis_labels(bars: &[DayBar], width: u16) -> Vec<String> {
    let widest = bars.iter().map(|b| b.label.width()).max().unwrap_or(0) + 1;
    let fits = usize::from(width) / widest.max(1);

    if bars.len() <= fits.max(1) {
        return bars.iter().map(|b| b.label.clone()).collect();
    }
    match bars {
        [] => Vec::new(),
        [only] => vec![only.label.clone()],
        [first, .., last] => {
            let middle = &bars[(bars.len() - 1) / 2];
            vec![first.label.clone(), middle.label.clone(), last.label.clone()]
        }
    }
}

fn draw_chart(frame: &mut Frame, bars: &[DayBar], mean: Option<f64>, peak: u64, area: Rect) {
    let mut regular: Vec<(f64, f64)> = Vec::new();
    let mut non_working: Vec<(f64, f64)> = Vec::new();
    for (i, bar) in bars.iter().enumerate() {
        let point = (i as f64, bar.value as f64);
        if bar.non_working {
            non_working.push(point);
        } else {
            regular.push(point);
        }
    }

    let x_max = (bars.len().max(2) - 1) as f64;
    let mean_line: Vec<(f64, f64)> = match mean {
        Some(m) => vec![(0.0, m), (x_max, m)],
        None => Vec::new(),
    };

    let datasets = vec![
        Dataset::default()
            .name(format!("{} (工作日)", BAR_DATASET_LABEL))
            .marker(symbols::Marker::HalfBlock)
            .graph_type(GraphType::Bar)
            .style(Style::default().fg(rgb(REGULAR_COLORS.border)))
            .data(&regular),
        Dataset::default()
            .name(format!("{} (周末/节假日)", BAR_DATASET_LABEL))
            .marker(symbols::Marker::HalfBlock)
            .graph_type(GraphType::Bar)
            .style(Style::default().fg(rgb(NON_WORKING_COLORS.border)))
            .data(&non_working),
        Dataset::default()
            .name(MEAN_DATASET_LABEL)
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(rgb(MEAN_LINE_COLOR)))
            .data(&mean_line),
    ];

    // Shared across pages so month views stay comparable
    let y_max = (peak as f64 * 1.1).max(1.0);

    let chart_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(THEME.muted))
        .title(format!(" {} ", BAR_DATASET_LABEL));

    let chart = Chart::new(datasets)
        .block(chart_block)
        .x_axis(
            Axis::default()
                .title("日期")
                .style(Style::default().fg(THEME.muted))
                .bounds([0.0, x_max])
                .labels(axis_labels(bars, area.width.saturating_sub(10))),
        )
        .y_axis(
            Axis::default()
                .title("金额")
                .style(Style::default().fg(THEME.muted))
                .bounds([0.0, y_max])
                .labels(vec![
                    "0".to_string(),
                    format_amount((y_max / 2.0) as u64),
                    format_amount(y_max as u64),
                ]),
        );

    frame.render_widget(chart, area);
}

fn draw_info_panel(frame: &mut Frame, app: &ChartApp, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),    // Totals
            Constraint::Length(3), // Non-working share
        ])
        .split(area);

    let mut info_text = vec![
        Line::from(vec![Span::styled("月度总计", Style::default().add_modifier(Modifier::BOLD))]),
        Line::from(""),
    ];
    for (month, total) in app.data.monthly_totals.iter() {
        let highlighted = app.current_window().is_some_and(|w| w.month == month);
        info_text.push(Line::from(vec![
            Span::styled(format!("{}: ", month), Style::default().fg(THEME.muted)),
            Span::styled(
                format!("{} 元", format_amount(total)),
                Style::default().fg(if highlighted { THEME.primary } else { THEME.text }),
            ),
        ]));
    }
    info_text.push(Line::from(""));
    info_text.push(Line::from(vec![
        Span::styled("总计: ", Style::default().fg(THEME.muted)),
        Span::styled(format!("{} 元", format_amount(app.data.total_amount)), Style::default().fg(THEME.text).add_modifier(Modifier::BOLD)),
    ]));
    if let Some(mean) = app.data.mean {
        info_text.push(Line::from(vec![
            Span::styled(format!("{}: ", MEAN_DATASET_LABEL), Style::default().fg(THEME.muted)),
            Span::styled(format!("{:.2}", mean), Style::default().fg(rgb(MEAN_LINE_COLOR))),
        ]));
    }

    let info_block = Paragraph::new(info_text)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded).border_style(Style::default().fg(THEME.muted)).title(" Summary "));
    frame.render_widget(info_block, chunks[0]);

    let bars = app.current_bars();
    let off_days = bars.iter().filter(|b| b.non_working).count();
    let ratio = if bars.is_empty() { 0.0 } else { off_days as f64 / bars.len() as f64 };

    let gauge = Gauge::default()
        .block(Block::default().title(" 周末/节假日 ").borders(Borders::ALL).border_type(BorderType::Rounded).border_style(Style::default().fg(THEME.muted)))
        .gauge_style(Style::default().fg(rgb(NON_WORKING_COLORS.border)))
        .ratio(ratio)
        .label(format!("{}/{}", off_days, bars.len()));
    frame.render_widget(gauge, chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use dailytally_core::{parse, ChartUseCase, Classifier};

    fn app(text: &str) -> ChartApp {
        let classifier = Classifier::default();
        let usecase = ChartUseCase::new(&classifier);
        let data = usecase.build(&parse(text));
        let windows = usecase.month_windows(&data);
        ChartApp::new(data, windows)
    }

    #[test]
    fn test_paging_through_months() {
        let mut app = app("4月7号:1\n5月1号:2\n5月2号:3");
        assert_eq!(app.title(), "全部");
        assert_eq!(app.current_bars().len(), 3);

        app.previous_page();
        assert_eq!(app.page, 0);

        app.next_page();
        assert_eq!(app.title(), "4月");
        assert_eq!(app.current_bars().len(), 1);

        app.next_page();
        app.next_page();
        assert_eq!(app.title(), "5月");
        assert_eq!(app.current_bars().len(), 2);
    }

    #[test]
    fn test_axis_labels_thin_out_when_narrow() {
        let app = app("4月1号:1\n4月2号:2\n4月3号:3\n4月4号:4\n4月5号:5");
        let bars = app.current_bars();

        assert_eq!(axis_labels(bars, 200).len(), 5);
        assert_eq!(axis_labels(bars, 20), vec!["4月1号", "4月3号", "4月5号"]);
    }
}
