use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{interview::Severity, session::Phase, App, Toast};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.interview.runtime.phase {
            Phase::Setup => render_setup(self, area, buf),
            Phase::Answering | Phase::Reviewing => render_live(self, area, buf),
            Phase::Completed => render_results(self, area, buf),
        }

        if let Some(message) = &self.busy {
            render_busy_overlay(message, area, buf);
        }
        if let Some(toast) = &self.toast {
            render_toast(toast, area, buf);
        }
    }
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim_italic() -> Style {
    Style::default()
        .add_modifier(Modifier::ITALIC)
        .add_modifier(Modifier::DIM)
}

fn render_setup(app: &App, area: Rect, buf: &mut Buffer) {
    let roles = app.interview.bank().roles();
    let config = &app.interview.config;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(2), // title
            Constraint::Length(1), // role header
            Constraint::Length(roles.len() as u16 + 1),
            Constraint::Length(2), // settings
            Constraint::Min(0),
            Constraint::Length(1), // legend
        ])
        .split(area);

    let title = Paragraph::new(Span::styled(
        "intervu — mock interview practice",
        bold().fg(Color::Magenta),
    ))
    .alignment(Alignment::Center);
    title.render(chunks[0], buf);

    Paragraph::new(Span::styled("Choose your role:", bold())).render(chunks[1], buf);

    let role_lines: Vec<Line> = roles
        .iter()
        .map(|(id, label)| {
            if *id == config.role {
                Line::from(Span::styled(format!("▸ {label}"), bold().fg(Color::Green)))
            } else {
                Line::from(Span::raw(format!("  {label}")))
            }
        })
        .collect();
    Paragraph::new(role_lines).render(chunks[2], buf);

    let settings = Paragraph::new(format!(
        "Difficulty: {} | Duration: {} min | Questions: {} | Company: {}",
        config.difficulty, config.duration_minutes, config.total_questions, config.company_type
    ))
    .style(Style::default().fg(Color::Cyan));
    settings.render(chunks[3], buf);

    let legend = Paragraph::new(Span::styled(
        "(↑/↓) role  (d)ifficulty  (+/-) duration  (t) company  (s)tart  (p)ractice  (esc)ape",
        dim_italic(),
    ));
    legend.render(chunks[5], buf);
}

fn render_live(app: &App, area: Rect, buf: &mut Buffer) {
    let question = &app.question;

    let max_chars_per_line = area
        .width
        .saturating_sub(HORIZONTAL_MARGIN * 2)
        .max(1) as usize;
    let prompt_lines =
        ((question.prompt.width() as f64 / max_chars_per_line as f64).ceil() as u16).max(1);
    let tips_lines = question.tips.len() as u16 + 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1), // header: question number, category, timer
            Constraint::Length(1), // progress
            Constraint::Length(1),
            Constraint::Length(prompt_lines),
            Constraint::Length(1), // time hint
            Constraint::Length(tips_lines),
            Constraint::Min(3),    // answer
            Constraint::Length(1), // status + legend
        ])
        .split(area);

    let header = Line::from(vec![
        Span::styled(question.number_label.clone(), bold()),
        Span::raw("   "),
        Span::styled(
            question.category.clone(),
            Style::default().fg(Color::Magenta),
        ),
        Span::raw("   "),
        Span::styled(format!("⏱ {}", app.timer_label), bold().fg(Color::Yellow)),
    ]);
    Paragraph::new(header).render(chunks[0], buf);

    let progress = Gauge::default()
        .gauge_style(Style::default().fg(Color::Green))
        .percent(app.progress_percent as u16)
        .label(format!("{} · {}%", app.progress_counter, app.progress_percent));
    progress.render(chunks[1], buf);

    let prompt = Paragraph::new(Span::styled(question.prompt.clone(), bold()))
        .wrap(Wrap { trim: true });
    prompt.render(chunks[3], buf);

    Paragraph::new(Span::styled(
        question.time_hint.clone(),
        Style::default().fg(Color::Yellow),
    ))
    .render(chunks[4], buf);

    let mut tip_lines: Vec<Line> = vec![Line::from(Span::styled("Tips:", bold()))];
    tip_lines.extend(
        question
            .tips
            .iter()
            .map(|tip| Line::from(Span::raw(format!("• {tip}")))),
    );
    Paragraph::new(tip_lines)
        .style(Style::default().fg(Color::Cyan))
        .render(chunks[5], buf);

    let answer_title = if app.recording {
        Line::from(vec![
            Span::raw("Your answer "),
            Span::styled("● REC", bold().fg(Color::Red)),
        ])
    } else {
        Line::from("Your answer")
    };
    let answer = Paragraph::new(format!("{}▌", app.answer))
        .block(Block::default().borders(Borders::ALL).title(answer_title))
        .wrap(Wrap { trim: false });
    answer.render(chunks[6], buf);

    let legend = match app.interview.runtime.phase {
        Phase::Reviewing => "(enter/n) next question  (ctrl+r) record  (esc)ape",
        _ => "(enter) submit  (tab) skip  (ctrl+r) record  (esc)ape",
    };
    Paragraph::new(Span::styled(legend, dim_italic())).render(chunks[7], buf);
}

fn render_results(app: &App, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(2), // title
            Constraint::Length(2), // overall
            Constraint::Length(8), // metric bars
            Constraint::Min(0),
            Constraint::Length(1), // legend
        ])
        .split(area);

    let title = Paragraph::new(Span::styled(
        "Interview Results",
        bold().fg(Color::Magenta),
    ))
    .alignment(Alignment::Center);
    title.render(chunks[0], buf);

    match &app.results {
        Some(report) => {
            let overall = Paragraph::new(Span::styled(
                format!("Overall score: {:.1}/10", report.overall),
                bold().fg(Color::Green),
            ))
            .alignment(Alignment::Center);
            overall.render(chunks[1], buf);

            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(2); 4])
                .split(chunks[2]);

            for (row, (label, percent)) in rows.iter().zip(report.metrics()) {
                let cols = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Length(18), Constraint::Min(10)])
                    .split(*row);

                Paragraph::new(Span::styled(label, bold())).render(cols[0], buf);
                Gauge::default()
                    .gauge_style(Style::default().fg(Color::Cyan))
                    .percent(percent as u16)
                    .render(cols[1], buf);
            }
        }
        None => {
            let waiting = Paragraph::new(Span::styled(
                "Crunching the numbers...",
                dim_italic(),
            ))
            .alignment(Alignment::Center);
            waiting.render(chunks[1], buf);
        }
    }

    let legend = Paragraph::new(Span::styled("(r)estart  (esc)ape", dim_italic()));
    legend.render(chunks[4], buf);
}

fn render_busy_overlay(message: &str, area: Rect, buf: &mut Buffer) {
    let width = (message.width() as u16 + 6).min(area.width);
    let overlay = centered_rect(width, 5, area);

    Clear.render(overlay, buf);
    let body = Paragraph::new(vec![
        Line::from(Span::styled(message.to_string(), bold())),
        Line::from(Span::styled("please wait", dim_italic())),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    body.render(overlay, buf);
}

fn render_toast(toast: &Toast, area: Rect, buf: &mut Buffer) {
    if area.height == 0 {
        return;
    }
    let color = match toast.severity {
        Severity::Success => Color::Green,
        Severity::Warning => Color::Yellow,
        Severity::Error => Color::Red,
    };
    let line = Rect::new(area.x, area.y + area.height - 1, area.width, 1);
    Paragraph::new(Span::styled(toast.message.clone(), bold().fg(color)))
        .alignment(Alignment::Center)
        .render(line, buf);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
