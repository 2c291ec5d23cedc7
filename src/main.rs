pub mod bank;
pub mod config;
pub mod interview;
pub mod report;
pub mod runtime;
pub mod session;
pub mod ui;
pub mod util;

use crate::{
    bank::QuestionBank,
    config::{Config, ConfigStore, FileConfigStore},
    interview::{Intent, Interview, RenderCommand, Severity},
    report::ScoreReport,
    runtime::{AppEvent, AppEventSource, CrosstermEventSource, FixedTicker, Runner, Ticker, TICK_RATE_MS},
    session::{Phase, SessionConfig},
};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
};

/// How long a toast notice stays on screen.
const TOAST_TICKS: u64 = 3000 / TICK_RATE_MS;

const COMPANY_TYPES: [&str; 4] = ["tech", "startup", "enterprise", "agency"];

/// terminal mock-interview simulator
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal mock-interview simulator with role-specific question banks, a session countdown, and a simulated scoring summary. Nothing is evaluated for real; it is a rehearsal space."
)]
pub struct Cli {
    /// role to rehearse for (e.g. software-engineer)
    #[clap(short = 'r', long)]
    role: Option<String>,

    /// difficulty of the question set
    #[clap(short = 'd', long, value_enum)]
    difficulty: Option<crate::session::Difficulty>,

    /// session length in minutes
    #[clap(short = 'm', long)]
    duration: Option<u32>,

    /// number of questions to ask per session
    #[clap(short = 'q', long)]
    questions: Option<usize>,

    /// company flavour for the session (cosmetic only)
    #[clap(short = 'c', long)]
    company_type: Option<String>,
}

impl Cli {
    /// Overlay explicit flags on top of the persisted defaults.
    fn apply_to(&self, config: &mut SessionConfig) {
        if let Some(role) = &self.role {
            config.role = role.clone();
        }
        if let Some(difficulty) = self.difficulty {
            config.difficulty = difficulty;
        }
        if let Some(duration) = self.duration {
            config.duration_minutes = duration.max(1);
        }
        if let Some(questions) = self.questions {
            config.total_questions = questions.max(1);
        }
        if let Some(company_type) = &self.company_type {
            config.company_type = company_type.clone();
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub severity: Severity,
    ticks_left: u64,
}

#[derive(Debug, Clone, Default)]
pub struct QuestionView {
    pub prompt: String,
    pub category: String,
    pub number_label: String,
    pub time_hint: String,
    pub tips: Vec<String>,
}

/// Presentation-side state. Everything here is derived from render commands;
/// the controller never reaches into it.
pub struct App {
    pub interview: Interview,
    pub question: QuestionView,
    pub timer_label: String,
    pub progress_percent: u8,
    pub progress_counter: String,
    pub recording: bool,
    pub results: Option<ScoreReport>,
    pub busy: Option<String>,
    pub toast: Option<Toast>,
    pub answer: String,
}

impl App {
    pub fn new(interview: Interview) -> Self {
        let timer_label = interview.timer_label();
        let total = interview.runtime.total_questions;
        Self {
            interview,
            question: QuestionView::default(),
            timer_label,
            progress_percent: 0,
            progress_counter: format!("0/{total}"),
            recording: false,
            results: None,
            busy: None,
            toast: None,
            answer: String::new(),
        }
    }

    pub fn apply_commands(&mut self, commands: Vec<RenderCommand>) {
        for command in commands {
            match command {
                RenderCommand::ShowNotice { message, severity } => {
                    self.toast = Some(Toast {
                        message,
                        severity,
                        ticks_left: TOAST_TICKS,
                    });
                }
                RenderCommand::ShowBusyIndicator(message) => self.busy = Some(message),
                RenderCommand::HideBusyIndicator => self.busy = None,
                RenderCommand::RenderQuestion {
                    prompt,
                    category,
                    number_label,
                    time_hint,
                    tips,
                } => {
                    self.question = QuestionView {
                        prompt,
                        category,
                        number_label,
                        time_hint,
                        tips,
                    };
                    // A fresh question always starts from a clean slate.
                    self.answer.clear();
                    self.results = None;
                }
                RenderCommand::RenderTimer(label) => self.timer_label = label,
                RenderCommand::RenderProgress { percent, counter } => {
                    self.progress_percent = percent;
                    self.progress_counter = counter;
                }
                RenderCommand::RenderRecordingState(recording) => self.recording = recording,
                RenderCommand::RenderCompletionResults(report) => self.results = Some(report),
            }
        }
    }

    pub fn on_tick(&mut self, elapsed_ms: u64) {
        let commands = self.interview.on_tick(elapsed_ms);
        self.apply_commands(commands);

        if let Some(toast) = &mut self.toast {
            if toast.ticks_left == 0 {
                self.toast = None;
            } else {
                toast.ticks_left -= 1;
            }
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let mut session_config: SessionConfig = (&store.load()).into();
    cli.apply_to(&mut session_config);

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let interview = Interview::new(QuestionBank::load(), session_config);
    let mut app = App::new(interview);
    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    // Setup choices carry over to the next run; session state never does.
    let _ = store.save(&Config::from(&app.interview.config));

    result
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());
    run_loop(terminal, app, &runner)
}

fn run_loop<B: Backend, E: AppEventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| ui(app, f))?;

        match runner.step() {
            AppEvent::Tick => app.on_tick(runner.tick_millis()),
            AppEvent::Resize => {}
            AppEvent::Key(key) => {
                if handle_key(app, key) {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}

/// Returns true when the app should exit.
fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    if key.code == KeyCode::Esc {
        return true;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    let commands = match app.interview.runtime.phase {
        Phase::Setup => setup_key(app, key),
        Phase::Answering => answering_key(app, key),
        Phase::Reviewing => reviewing_key(app, key),
        Phase::Completed => completed_key(app, key),
    };
    app.apply_commands(commands);
    false
}

fn setup_key(app: &mut App, key: KeyEvent) -> Vec<RenderCommand> {
    let config = &app.interview.config;
    match key.code {
        KeyCode::Up | KeyCode::Down => {
            let roles: Vec<String> = app
                .interview
                .bank()
                .roles()
                .iter()
                .map(|(id, _)| id.to_string())
                .collect();
            let current = roles
                .iter()
                .position(|id| *id == app.interview.config.role)
                .unwrap_or(0);
            let next = match key.code {
                KeyCode::Up => (current + roles.len() - 1) % roles.len(),
                _ => (current + 1) % roles.len(),
            };
            app.interview.apply(Intent::SelectRole(roles[next].clone()))
        }
        KeyCode::Char('d') => {
            let intent = Intent::ChangeSettings {
                difficulty: config.difficulty.cycled(),
                duration_minutes: config.duration_minutes,
                company_type: config.company_type.clone(),
            };
            app.interview.apply(intent)
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            let intent = Intent::ChangeSettings {
                difficulty: config.difficulty,
                duration_minutes: (config.duration_minutes + 5).min(120),
                company_type: config.company_type.clone(),
            };
            app.interview.apply(intent)
        }
        KeyCode::Char('-') => {
            let intent = Intent::ChangeSettings {
                difficulty: config.difficulty,
                duration_minutes: config.duration_minutes.saturating_sub(5).max(5),
                company_type: config.company_type.clone(),
            };
            app.interview.apply(intent)
        }
        KeyCode::Char('t') => {
            let current = COMPANY_TYPES
                .iter()
                .position(|ct| *ct == config.company_type)
                .unwrap_or(0);
            let intent = Intent::ChangeSettings {
                difficulty: config.difficulty,
                duration_minutes: config.duration_minutes,
                company_type: COMPANY_TYPES[(current + 1) % COMPANY_TYPES.len()].to_string(),
            };
            app.interview.apply(intent)
        }
        KeyCode::Char('p') => app.interview.apply(Intent::EnterPracticeMode),
        KeyCode::Char('s') | KeyCode::Enter => app.interview.apply(Intent::StartInterview),
        _ => vec![],
    }
}

fn answering_key(app: &mut App, key: KeyEvent) -> Vec<RenderCommand> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('r') {
            return toggle_recording(app);
        }
        return vec![];
    }

    match key.code {
        KeyCode::Enter => {
            let answer = app.answer.clone();
            app.interview.apply(Intent::SubmitCurrentAnswer(answer))
        }
        KeyCode::Tab => app.interview.apply(Intent::SkipCurrentQuestion),
        KeyCode::Backspace => {
            app.answer.pop();
            vec![]
        }
        KeyCode::Char(c) => {
            app.answer.push(c);
            vec![]
        }
        _ => vec![],
    }
}

fn reviewing_key(app: &mut App, key: KeyEvent) -> Vec<RenderCommand> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('r') {
        return toggle_recording(app);
    }

    match key.code {
        KeyCode::Enter | KeyCode::Char('n') => {
            app.interview.apply(Intent::AdvanceToNextQuestion)
        }
        _ => vec![],
    }
}

fn completed_key(app: &mut App, key: KeyEvent) -> Vec<RenderCommand> {
    match key.code {
        KeyCode::Char('r') => app.interview.apply(Intent::StartInterview),
        _ => vec![],
    }
}

fn toggle_recording(app: &mut App) -> Vec<RenderCommand> {
    if app.recording {
        app.interview.apply(Intent::EndRecording)
    } else {
        app.interview.apply(Intent::BeginRecording)
    }
}
