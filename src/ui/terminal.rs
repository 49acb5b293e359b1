use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap},
    Terminal,
};

use crate::catalog;
use crate::core::time::now_utc;
use crate::core::types::{Category, Phase};
use crate::core::view::{node_glyph, ViewModel};
use crate::report::{self, ReportFormat};
use crate::ui::app::App;

pub fn run_tui(mut app: App, report_dir: &Path) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| draw(f, &app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char('1') => app.set_phase(Phase::Definition),
                    KeyCode::Char('2') => app.set_phase(Phase::Analysis),
                    KeyCode::Char('3') => app.set_phase(Phase::Mitigation),
                    KeyCode::Char('4') => app.set_phase(Phase::Reporting),
                    KeyCode::Tab => app.next_phase(),
                    KeyCode::Up => app.cursor_up(),
                    KeyCode::Down => app.cursor_down(),
                    KeyCode::Enter | KeyCode::Char(' ') => app.activate_cursor(),
                    KeyCode::Char('w') if app.session.phase() == Phase::Reporting => {
                        match write_report_file(&app, report_dir) {
                            Ok(path) => app.log(format!("Report written to {}", path.display())),
                            Err(err) => app.log(format!("⚠️ Report failed: {err}")),
                        }
                    }
                    KeyCode::Char(c) => {
                        if app.session.phase() == Phase::Analysis {
                            if let Some(category) = category_for_key(c) {
                                app.select_category(category);
                            }
                        }
                    }
                    _ => {}
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn category_for_key(c: char) -> Option<Category> {
    let upper = c.to_ascii_uppercase();
    Category::ALL.into_iter().find(|cat| cat.letter() == upper)
}

fn write_report_file(app: &App, report_dir: &Path) -> Result<PathBuf> {
    let now = now_utc();
    let path = report_dir.join(format!("report-{}.md", now.date_naive()));
    report::write_report(&app.session.view_model(), ReportFormat::Markdown, now, &path)?;
    Ok(path)
}

fn draw(f: &mut ratatui::Frame, app: &App) {
    let vm = app.session.view_model();
    let phase = app.session.phase();

    // The diagram panel is hidden on the reporting screen.
    let constraints: Vec<Constraint> = if phase == Phase::Reporting {
        vec![
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(6),
        ]
    } else {
        vec![
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(8),
            Constraint::Length(6),
        ]
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.size());

    draw_phase_tabs(f, chunks[0], phase);
    draw_score_bar(f, chunks[1], &vm);

    match phase {
        Phase::Definition => draw_definition(f, chunks[2]),
        Phase::Analysis => draw_analysis(f, chunks[2], app, &vm),
        Phase::Mitigation => draw_mitigation(f, chunks[2], app, &vm),
        Phase::Reporting => draw_reporting(f, chunks[2], &vm),
    }

    if phase == Phase::Reporting {
        draw_logs(f, chunks[3], app);
    } else {
        draw_diagram(f, chunks[3], &vm);
        draw_logs(f, chunks[4], app);
    }
}

fn draw_phase_tabs(f: &mut ratatui::Frame, area: Rect, phase: Phase) {
    let mut spans = vec![Span::styled(
        " 🛡️ STRIDE-WORKBENCH ",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];
    for (i, p) in Phase::ALL.iter().enumerate() {
        let style = if *p == phase {
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {} {} ", i + 1, p.label()), style));
        spans.push(Span::raw("|"));
    }
    spans.pop();
    let tabs = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Blue)));
    f.render_widget(tabs, area);
}

fn draw_score_bar(f: &mut ratatui::Frame, area: Rect, vm: &ViewModel) {
    let score = vm.security_score;
    let color = if score == 100 {
        Color::Green
    } else if score > 70 {
        Color::LightGreen
    } else if score > 40 {
        Color::Yellow
    } else {
        Color::Red
    };
    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(format!(
                    " SECURITY POSTURE - {} of {} threats mitigated ",
                    vm.mitigated_count, vm.total
                ))
                .borders(Borders::ALL),
        )
        .gauge_style(Style::default().fg(color))
        .label(format!("{score}/100"))
        .ratio(f64::from(score) / 100.0);
    f.render_widget(gauge, area);
}

fn draw_definition(f: &mut ratatui::Frame, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(
            "Vehicle-to-Cloud Telemetry Architecture",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(
            "The TCU collects sensor data (Speed, GPS, Engine Status) and transmits it via a \
             public cellular network (4G/5G) to a Cloud Gateway, which persists it to a Database.",
        ),
        Line::from(""),
    ];
    for comp in catalog::components() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{}: ", comp.name),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw(comp.description),
        ]));
        lines.push(Line::from(vec![
            Span::raw("   Trust level: "),
            Span::styled(comp.trust_level, Style::default().fg(Color::Cyan)),
            Span::raw(format!("  Controls: {}", comp.security_controls.join(", "))),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press 2 to start threat analysis →",
        Style::default().fg(Color::Green),
    )));

    let panel = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().title(" 📐 ARCHITECTURE DEFINITION ").borders(Borders::ALL));
    f.render_widget(panel, area);
}

fn draw_analysis(f: &mut ratatui::Frame, area: Rect, app: &App, vm: &ViewModel) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(area);

    let active = app.session.active_category();
    let items: Vec<ListItem> = Category::ALL
        .iter()
        .enumerate()
        .map(|(i, cat)| {
            let threat = vm.threats.iter().find(|t| t.category == *cat);
            let impact = threat.map(|t| t.impact.to_string()).unwrap_or_default();
            let selected = active == Some(*cat);
            let style = if selected {
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)
            } else if i == app.cursor {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", cat.letter()), style),
                Span::styled(cat.name(), style),
                Span::styled(format!("  [{impact}]"), Style::default().fg(Color::Red)),
            ]))
        })
        .collect();
    let list = List::new(items).block(
        Block::default()
            .title(" STRIDE CATEGORIES (s/t/r/i/d/e or ↑↓+Enter) ")
            .borders(Borders::ALL),
    );
    f.render_widget(list, halves[0]);

    let detail: Vec<Line> = match &vm.active_threat {
        Some(threat) => vec![
            Line::from(Span::styled(
                format!("{}: {}", threat.id, threat.title),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "ATTACK SCENARIO",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(threat.context.clone()),
            Line::from(""),
            Line::from(Span::styled("DEFINITION", Style::default().fg(Color::Gray))),
            Line::from(threat.definition.clone()),
            Line::from(""),
            Line::from(Span::styled(
                "RECOMMENDED MITIGATION",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(threat.mitigation.clone()),
            Line::from(""),
            Line::from(vec![
                Span::raw("Impact: "),
                Span::styled(threat.impact.to_string(), Style::default().fg(Color::Red)),
                Span::raw(format!(
                    "  Likelihood: {}  CVSS: {:.1}  Vector: {}",
                    threat.likelihood, threat.cvss_score, threat.attack_vector
                )),
            ]),
            Line::from(format!("Controls: {}", threat.security_controls.join(", "))),
            Line::from(format!("Compliance: {}", threat.compliance.join(", "))),
        ],
        None => vec![
            Line::from(""),
            Line::from("🛡️  Select a category from the left to analyze threats."),
        ],
    };
    let panel = Paragraph::new(detail)
        .wrap(Wrap { trim: true })
        .block(Block::default().title(" THREAT DETAIL ").borders(Borders::ALL));
    f.render_widget(panel, halves[1]);
}

fn draw_mitigation(f: &mut ratatui::Frame, area: Rect, app: &App, vm: &ViewModel) {
    let items: Vec<ListItem> = vm
        .threats
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let marker = if t.mitigated { "[x]" } else { "[ ]" };
            let style = if t.mitigated {
                Style::default().fg(Color::Green)
            } else if i == app.cursor {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            let tag = if t.mitigated { " FIXED" } else { "" };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{marker} {}: {}", t.id, t.title), style),
                Span::styled(tag, Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            ]))
        })
        .collect();
    let open = vm.total - vm.mitigated_count;
    let list = List::new(items).block(
        Block::default()
            .title(format!(
                " ✔ VULNERABILITY CHECKLIST ({open} open, Enter/Space to apply fix) "
            ))
            .borders(Borders::ALL),
    );
    f.render_widget(list, area);
}

fn draw_reporting(f: &mut ratatui::Frame, area: Rect, vm: &ViewModel) {
    let mut lines = vec![
        Line::from(Span::styled(
            "Threat Model Assessment Report - Connected Vehicle Telemetry System",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!(
            "Total: {}   Mitigated: {}   High Risk Open: {}   Score: {}%",
            vm.total,
            vm.mitigated_count,
            vm.high_risk_open.len(),
            vm.security_score
        )),
        Line::from(""),
        Line::from(Span::styled(
            "STRIDE Categories Assessment",
            Style::default().fg(Color::Cyan),
        )),
    ];
    for status in &vm.categories {
        let color = if status.score == 100 {
            Color::Green
        } else if status.score >= 70 {
            Color::Yellow
        } else {
            Color::Red
        };
        lines.push(Line::from(vec![
            Span::raw(format!("  {} {:<24}", status.category, status.category.name())),
            Span::styled(format!("{:>3}%", status.score), Style::default().fg(color)),
            Span::raw(format!("  {}/{} mitigated", status.mitigated, status.total)),
        ]));
    }
    lines.push(Line::from(""));
    if vm.high_risk_open.is_empty() {
        lines.push(Line::from(Span::styled(
            "All high-risk threats addressed.",
            Style::default().fg(Color::Green),
        )));
    } else {
        for t in &vm.high_risk_open {
            lines.push(Line::from(Span::styled(
                format!("  ⚠ {}: {} ({} impact, open)", t.id, t.title, t.impact),
                Style::default().fg(Color::Red),
            )));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press w to write the Markdown report",
        Style::default().fg(Color::Green),
    )));

    let panel = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().title(" 📄 SECURITY REPORT ").borders(Borders::ALL));
    f.render_widget(panel, area);
}

fn draw_diagram(f: &mut ratatui::Frame, area: Rect, vm: &ViewModel) {
    let mut lines = Vec::new();

    let mut node_spans = vec![Span::raw(" ")];
    for view in vm.nodes.iter().filter(|n| n.node.id != "attacker") {
        let style = if view.active {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        node_spans.push(Span::styled(
            format!(
                "[{} {}]",
                node_glyph(view.node.node_type),
                view.node.label
            ),
            style,
        ));
        node_spans.push(Span::raw("  "));
    }
    lines.push(Line::from(node_spans));
    lines.push(Line::from(""));

    for view in &vm.links {
        let (color, lock) = if view.attack {
            (Color::Red, " ⚔")
        } else if view.secure {
            (Color::Green, " 🔒")
        } else {
            (Color::DarkGray, "")
        };
        let source = catalog::node_label(&view.link.source);
        let target = catalog::node_label(&view.link.target);
        lines.push(Line::from(Span::styled(
            format!(" {source} ──{}──▶ {target}{lock}", view.link.label),
            Style::default().fg(color),
        )));
    }

    let panel = Paragraph::new(lines).block(
        Block::default()
            .title(" 🗺 DATA FLOW DIAGRAM (green = secured hop, red = active threat) ")
            .borders(Borders::ALL),
    );
    f.render_widget(panel, area);
}

fn draw_logs(f: &mut ratatui::Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .logs
        .iter()
        .rev()
        .take(4)
        .map(|log| {
            ListItem::new(Line::from(vec![
                Span::styled("●", Style::default().fg(Color::Green)),
                Span::raw(" "),
                Span::raw(log.as_str()),
            ]))
        })
        .collect();
    let logs =
        List::new(items).block(Block::default().title(" 📜 SESSION LOG ").borders(Borders::ALL));
    f.render_widget(logs, area);
}
