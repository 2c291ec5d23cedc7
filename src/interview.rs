use crate::bank::QuestionBank;
use crate::report::ScoreReport;
use crate::session::{Difficulty, Phase, SessionConfig, SessionRuntime};
use crate::util::{format_clock, progress_counter, progress_percent, recommended_minutes};

/// Simulated latency before the first question appears.
pub const PREPARE_DELAY_MS: u64 = 2000;
/// Simulated latency for "analyzing" a submitted answer.
pub const ANALYZE_DELAY_MS: u64 = 1500;
/// Simulated latency before the final score report appears.
pub const FINALIZE_DELAY_MS: u64 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

/// Outward instruction to the presentation layer. Carries no presentation
/// logic; the adapter decides how each command is drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    ShowNotice {
        message: String,
        severity: Severity,
    },
    ShowBusyIndicator(String),
    HideBusyIndicator,
    RenderQuestion {
        prompt: String,
        category: String,
        number_label: String,
        time_hint: String,
        tips: Vec<String>,
    },
    RenderTimer(String),
    RenderProgress {
        percent: u8,
        counter: String,
    },
    RenderRecordingState(bool),
    RenderCompletionResults(ScoreReport),
}

/// User- or system-triggered request into the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    StartInterview,
    EnterPracticeMode,
    BeginRecording,
    EndRecording,
    SkipCurrentQuestion,
    SubmitCurrentAnswer(String),
    AdvanceToNextQuestion,
    ChangeSettings {
        difficulty: Difficulty,
        duration_minutes: u32,
        company_type: String,
    },
    SelectRole(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TaskKind {
    Prepare,
    Analyze,
    Finalize,
}

/// Deferred completion standing in for real work. Once scheduled it always
/// fires; there is no cancellation semantic for these.
#[derive(Debug, Clone)]
struct PendingTask {
    remaining_ms: u64,
    kind: TaskKind,
}

/// The session controller. Owns all mutable session state and the countdown,
/// consumes intents, and emits render commands describing what changed.
#[derive(Debug)]
pub struct Interview {
    bank: QuestionBank,
    pub config: SessionConfig,
    pub runtime: SessionRuntime,
    countdown_armed: bool,
    carry_ms: u64,
    pending: Vec<PendingTask>,
}

fn notice(message: impl Into<String>, severity: Severity) -> RenderCommand {
    RenderCommand::ShowNotice {
        message: message.into(),
        severity,
    }
}

impl Interview {
    pub fn new(bank: QuestionBank, config: SessionConfig) -> Self {
        let runtime = SessionRuntime::new(&config);
        Self {
            bank,
            config,
            runtime,
            countdown_armed: false,
            carry_ms: 0,
            pending: Vec::new(),
        }
    }

    pub fn apply(&mut self, intent: Intent) -> Vec<RenderCommand> {
        match intent {
            Intent::StartInterview => self.start_interview(),
            Intent::EnterPracticeMode => self.enter_practice_mode(),
            Intent::BeginRecording => self.set_recording(true),
            Intent::EndRecording => self.set_recording(false),
            Intent::SkipCurrentQuestion => self.skip_current_question(),
            Intent::SubmitCurrentAnswer(text) => self.submit_current_answer(&text),
            Intent::AdvanceToNextQuestion => self.advance_to_next_question(),
            Intent::ChangeSettings {
                difficulty,
                duration_minutes,
                company_type,
            } => self.change_settings(difficulty, duration_minutes, company_type),
            Intent::SelectRole(role) => self.select_role(role),
        }
    }

    /// Advance simulated work and the countdown by `elapsed_ms`.
    pub fn on_tick(&mut self, elapsed_ms: u64) -> Vec<RenderCommand> {
        let mut commands = self.advance_pending(elapsed_ms);
        commands.extend(self.advance_countdown(elapsed_ms));
        commands
    }

    pub fn timer_label(&self) -> String {
        format_clock(self.runtime.seconds_remaining)
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    // ── Intents ──────────────────────────────────────────────────────

    fn start_interview(&mut self) -> Vec<RenderCommand> {
        // Cancel-before-start: a fresh session must never inherit a running
        // countdown from the previous one.
        self.disarm_countdown();
        self.schedule(TaskKind::Prepare, PREPARE_DELAY_MS);
        vec![RenderCommand::ShowBusyIndicator(
            "Preparing interview session...".to_string(),
        )]
    }

    fn enter_practice_mode(&mut self) -> Vec<RenderCommand> {
        vec![notice("Practice mode enabled. No scoring.", Severity::Warning)]
    }

    fn set_recording(&mut self, recording: bool) -> Vec<RenderCommand> {
        self.runtime.is_recording = recording;
        let message = if recording {
            "Recording started..."
        } else {
            "Recording stopped. Answer captured."
        };
        vec![
            RenderCommand::RenderRecordingState(recording),
            notice(message, Severity::Success),
        ]
    }

    fn skip_current_question(&mut self) -> Vec<RenderCommand> {
        if self.runtime.phase != Phase::Answering {
            return vec![];
        }
        let mut commands = vec![notice("Question skipped", Severity::Warning)];
        commands.extend(self.advance());
        commands
    }

    fn submit_current_answer(&mut self, text: &str) -> Vec<RenderCommand> {
        if self.runtime.phase != Phase::Answering {
            return vec![];
        }
        if text.trim().is_empty() && !self.runtime.is_recording {
            return vec![notice(
                "Please type an answer or record your voice",
                Severity::Error,
            )];
        }
        self.runtime.phase = Phase::Reviewing;
        self.schedule(TaskKind::Analyze, ANALYZE_DELAY_MS);
        vec![RenderCommand::ShowBusyIndicator(
            "Analyzing your answer...".to_string(),
        )]
    }

    fn advance_to_next_question(&mut self) -> Vec<RenderCommand> {
        if self.runtime.phase != Phase::Reviewing {
            return vec![];
        }
        self.advance()
    }

    fn change_settings(
        &mut self,
        difficulty: Difficulty,
        duration_minutes: u32,
        company_type: String,
    ) -> Vec<RenderCommand> {
        if self.runtime.phase != Phase::Setup {
            return vec![notice(
                "Settings are locked while a session is running",
                Severity::Warning,
            )];
        }
        self.config.difficulty = difficulty;
        self.config.duration_minutes = duration_minutes;
        self.config.company_type = company_type;
        self.runtime.seconds_remaining = duration_minutes * 60;
        vec![self.render_timer()]
    }

    fn select_role(&mut self, role: String) -> Vec<RenderCommand> {
        // Last click wins; resolution against the bank happens lazily at
        // question-load time.
        let label = self.bank.role_label(&role).to_string();
        self.config.role = role;
        vec![notice(format!("Role {label} selected"), Severity::Success)]
    }

    // ── Question flow ────────────────────────────────────────────────

    fn advance(&mut self) -> Vec<RenderCommand> {
        self.runtime.current_question += 1;
        if self.runtime.current_question < self.runtime.total_questions {
            self.runtime.phase = Phase::Answering;
            let mut commands = self.load_question();
            commands.push(self.render_progress());
            commands.push(notice(
                format!("Question {} loaded", self.runtime.current_question + 1),
                Severity::Success,
            ));
            commands
        } else {
            self.complete_interview()
        }
    }

    fn load_question(&mut self) -> Vec<RenderCommand> {
        let questions = self
            .bank
            .lookup(&self.config.role, &self.config.difficulty.as_key());
        // The session length is independent of the bank sequence; indices
        // past the end clamp to the last available question.
        let effective = self.runtime.current_question.min(questions.len() - 1);
        let record = &questions[effective];
        let (min, max) = recommended_minutes(record.recommended_secs);

        vec![RenderCommand::RenderQuestion {
            prompt: record.prompt.clone(),
            category: record.category.clone(),
            number_label: format!(
                "Question {}/{}",
                self.runtime.current_question + 1,
                self.runtime.total_questions
            ),
            time_hint: format!("Recommended: {min}-{max} min"),
            tips: record.tips.clone(),
        }]
    }

    fn complete_interview(&mut self) -> Vec<RenderCommand> {
        self.runtime.phase = Phase::Completed;
        self.disarm_countdown();
        self.schedule(TaskKind::Finalize, FINALIZE_DELAY_MS);
        vec![RenderCommand::ShowBusyIndicator(
            "Completing interview and analyzing results...".to_string(),
        )]
    }

    // ── Simulated work ───────────────────────────────────────────────

    fn schedule(&mut self, kind: TaskKind, delay_ms: u64) {
        self.pending.push(PendingTask {
            remaining_ms: delay_ms,
            kind,
        });
    }

    fn advance_pending(&mut self, elapsed_ms: u64) -> Vec<RenderCommand> {
        for task in &mut self.pending {
            task.remaining_ms = task.remaining_ms.saturating_sub(elapsed_ms);
        }

        let mut commands = Vec::new();
        let mut index = 0;
        while index < self.pending.len() {
            if self.pending[index].remaining_ms == 0 {
                let task = self.pending.remove(index);
                commands.extend(self.run_task(task.kind));
            } else {
                index += 1;
            }
        }
        commands
    }

    fn run_task(&mut self, kind: TaskKind) -> Vec<RenderCommand> {
        match kind {
            TaskKind::Prepare => self.finish_preparation(),
            TaskKind::Analyze => self.finish_analysis(),
            TaskKind::Finalize => self.finish_results(),
        }
    }

    fn finish_preparation(&mut self) -> Vec<RenderCommand> {
        self.runtime = SessionRuntime::new(&self.config);
        self.runtime.phase = Phase::Answering;
        self.arm_countdown();

        let mut commands = vec![RenderCommand::HideBusyIndicator, self.render_timer()];
        commands.extend(self.load_question());
        commands.push(self.render_progress());
        commands.push(notice(
            "Interview session started. Good luck!",
            Severity::Success,
        ));
        commands
    }

    fn finish_analysis(&mut self) -> Vec<RenderCommand> {
        vec![
            RenderCommand::HideBusyIndicator,
            notice("Answer submitted", Severity::Success),
            self.render_progress(),
        ]
    }

    fn finish_results(&mut self) -> Vec<RenderCommand> {
        vec![
            RenderCommand::HideBusyIndicator,
            RenderCommand::RenderCompletionResults(ScoreReport::simulated()),
            notice("Interview complete! Review your results.", Severity::Success),
        ]
    }

    // ── Countdown ────────────────────────────────────────────────────

    fn arm_countdown(&mut self) {
        self.countdown_armed = true;
        self.carry_ms = 0;
    }

    fn disarm_countdown(&mut self) {
        self.countdown_armed = false;
        self.carry_ms = 0;
    }

    fn advance_countdown(&mut self, elapsed_ms: u64) -> Vec<RenderCommand> {
        if !self.countdown_armed {
            return vec![];
        }
        self.carry_ms += elapsed_ms;

        let mut commands = Vec::new();
        while self.carry_ms >= 1000 && self.countdown_armed {
            self.carry_ms -= 1000;
            self.runtime.seconds_remaining = self.runtime.seconds_remaining.saturating_sub(1);
            commands.push(self.render_timer());

            if self.runtime.seconds_remaining == 0 {
                // Exhaustion outranks any pending manual action.
                self.disarm_countdown();
                commands.push(notice("Interview time is up!", Severity::Warning));
                commands.extend(self.complete_interview());
            }
        }
        commands
    }

    fn render_timer(&self) -> RenderCommand {
        RenderCommand::RenderTimer(self.timer_label())
    }

    fn render_progress(&self) -> RenderCommand {
        RenderCommand::RenderProgress {
            percent: progress_percent(
                self.runtime.current_question,
                self.runtime.total_questions,
            ),
            counter: progress_counter(
                self.runtime.current_question,
                self.runtime.total_questions,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const TICK_MS: u64 = 100;

    fn interview() -> Interview {
        Interview::new(QuestionBank::load(), SessionConfig::default())
    }

    fn interview_with(config: SessionConfig) -> Interview {
        Interview::new(QuestionBank::load(), config)
    }

    /// Drive `ms` worth of ticks in TICK_MS steps, collecting every command.
    fn run_ticks(interview: &mut Interview, ms: u64) -> Vec<RenderCommand> {
        let mut commands = Vec::new();
        for _ in 0..ms / TICK_MS {
            commands.extend(interview.on_tick(TICK_MS));
        }
        commands
    }

    /// Start a session and tick through the preparation delay.
    fn started(interview: &mut Interview) -> Vec<RenderCommand> {
        interview.apply(Intent::StartInterview);
        run_ticks(interview, PREPARE_DELAY_MS)
    }

    /// Submit an answer and tick through the analysis delay.
    fn submitted(interview: &mut Interview, text: &str) {
        interview.apply(Intent::SubmitCurrentAnswer(text.to_string()));
        run_ticks(interview, ANALYZE_DELAY_MS);
    }

    fn has_notice(commands: &[RenderCommand], severity: Severity) -> bool {
        commands
            .iter()
            .any(|c| matches!(c, RenderCommand::ShowNotice { severity: s, .. } if *s == severity))
    }

    #[test]
    fn test_start_shows_busy_and_defers_the_session() {
        let mut interview = interview();

        let commands = interview.apply(Intent::StartInterview);
        assert_matches!(commands[0], RenderCommand::ShowBusyIndicator(_));
        assert_eq!(interview.runtime.phase, Phase::Setup);

        let commands = run_ticks(&mut interview, PREPARE_DELAY_MS);
        assert_eq!(interview.runtime.phase, Phase::Answering);
        assert!(commands.contains(&RenderCommand::HideBusyIndicator));
        assert!(commands
            .iter()
            .any(|c| matches!(c, RenderCommand::RenderQuestion { .. })));
        assert!(has_notice(&commands, Severity::Success));
    }

    #[test]
    fn test_first_question_render_contents() {
        let mut interview = interview();
        let commands = started(&mut interview);

        let question = commands
            .iter()
            .find(|c| matches!(c, RenderCommand::RenderQuestion { .. }))
            .unwrap();
        assert_matches!(question, RenderCommand::RenderQuestion { number_label, time_hint, tips, .. } => {
            assert_eq!(number_label, "Question 1/3");
            assert!(time_hint.starts_with("Recommended: "));
            assert!(!tips.is_empty());
        });
    }

    #[test]
    fn test_empty_submit_never_changes_phase() {
        let mut interview = interview();
        started(&mut interview);

        let commands = interview.apply(Intent::SubmitCurrentAnswer("   ".to_string()));
        assert_eq!(interview.runtime.phase, Phase::Answering);
        assert_eq!(commands.len(), 1);
        assert!(has_notice(&commands, Severity::Error));
    }

    #[test]
    fn test_submit_with_text_transitions_to_reviewing() {
        let mut interview = interview();
        started(&mut interview);

        let commands = interview.apply(Intent::SubmitCurrentAnswer("anything".to_string()));
        assert_eq!(interview.runtime.phase, Phase::Reviewing);
        assert_matches!(commands[0], RenderCommand::ShowBusyIndicator(_));

        let commands = run_ticks(&mut interview, ANALYZE_DELAY_MS);
        assert!(commands.contains(&RenderCommand::HideBusyIndicator));
        assert!(has_notice(&commands, Severity::Success));
    }

    #[test]
    fn test_empty_submit_while_recording_is_accepted() {
        let mut interview = interview();
        started(&mut interview);

        interview.apply(Intent::BeginRecording);
        interview.apply(Intent::SubmitCurrentAnswer(String::new()));
        assert_eq!(interview.runtime.phase, Phase::Reviewing);
    }

    #[test]
    fn test_double_submit_is_rejected_while_reviewing() {
        let mut interview = interview();
        started(&mut interview);

        interview.apply(Intent::SubmitCurrentAnswer("first".to_string()));
        let commands = interview.apply(Intent::SubmitCurrentAnswer("second".to_string()));
        assert!(commands.is_empty());
    }

    #[test]
    fn test_double_start_keeps_a_single_countdown() {
        let mut interview = interview();

        interview.apply(Intent::StartInterview);
        interview.apply(Intent::StartInterview);
        run_ticks(&mut interview, PREPARE_DELAY_MS);
        assert_eq!(interview.runtime.phase, Phase::Answering);

        let full = interview.config.duration_minutes * 60;
        assert_eq!(interview.runtime.seconds_remaining, full);

        // Five seconds of ticks must decrement by exactly five, not ten.
        run_ticks(&mut interview, 5000);
        assert_eq!(interview.runtime.seconds_remaining, full - 5);
    }

    #[test]
    fn test_countdown_renders_mm_ss() {
        let mut interview = interview();
        started(&mut interview);

        let commands = run_ticks(&mut interview, 1000);
        assert!(commands.contains(&RenderCommand::RenderTimer("29:59".to_string())));
    }

    #[test]
    fn test_advance_past_last_question_completes_with_results() {
        let mut interview = interview_with(SessionConfig {
            total_questions: 1,
            ..SessionConfig::default()
        });
        started(&mut interview);
        submitted(&mut interview, "an answer");

        let commands = interview.apply(Intent::AdvanceToNextQuestion);
        assert_eq!(interview.runtime.phase, Phase::Completed);
        assert_matches!(commands[0], RenderCommand::ShowBusyIndicator(_));

        let commands = run_ticks(&mut interview, FINALIZE_DELAY_MS);
        let results = commands
            .iter()
            .find(|c| matches!(c, RenderCommand::RenderCompletionResults(_)))
            .unwrap();
        assert_matches!(results, RenderCommand::RenderCompletionResults(report) => {
            assert_eq!(report.overall, 7.8);
            assert_eq!(report.technical, 85);
            assert_eq!(report.communication, 75);
            assert_eq!(report.problem_solving, 80);
            assert_eq!(report.confidence, 70);
        });
    }

    #[test]
    fn test_advance_loads_next_question_with_progress() {
        let mut interview = interview();
        started(&mut interview);
        submitted(&mut interview, "an answer");

        let commands = interview.apply(Intent::AdvanceToNextQuestion);
        assert_eq!(interview.runtime.phase, Phase::Answering);
        assert_eq!(interview.runtime.current_question, 1);
        assert!(commands.contains(&RenderCommand::RenderProgress {
            percent: 67,
            counter: "2/3".to_string(),
        }));
    }

    #[test]
    fn test_advance_is_rejected_outside_reviewing() {
        let mut interview = interview();
        started(&mut interview);

        assert!(interview.apply(Intent::AdvanceToNextQuestion).is_empty());
        assert_eq!(interview.runtime.current_question, 0);
    }

    #[test]
    fn test_skip_warns_and_advances() {
        let mut interview = interview();
        started(&mut interview);

        let commands = interview.apply(Intent::SkipCurrentQuestion);
        assert!(has_notice(&commands, Severity::Warning));
        assert_eq!(interview.runtime.current_question, 1);
        assert_eq!(interview.runtime.phase, Phase::Answering);
    }

    #[test]
    fn test_timer_exhaustion_forces_completion() {
        let mut interview = interview();
        started(&mut interview);

        // Pending typed input does not matter once the clock runs out.
        interview.runtime.seconds_remaining = 1;
        let commands = run_ticks(&mut interview, 1000);

        assert_eq!(interview.runtime.phase, Phase::Completed);
        assert!(has_notice(&commands, Severity::Warning));
        assert!(commands
            .iter()
            .any(|c| matches!(c, RenderCommand::ShowBusyIndicator(_))));

        let commands = run_ticks(&mut interview, FINALIZE_DELAY_MS);
        assert!(commands
            .iter()
            .any(|c| matches!(c, RenderCommand::RenderCompletionResults(_))));
    }

    #[test]
    fn test_countdown_stops_after_exhaustion() {
        let mut interview = interview();
        started(&mut interview);

        interview.runtime.seconds_remaining = 1;
        run_ticks(&mut interview, 1000);
        let after = interview.runtime.seconds_remaining;
        run_ticks(&mut interview, 3000);
        assert_eq!(interview.runtime.seconds_remaining, after);
    }

    #[test]
    fn test_question_index_clamps_to_bank_length() {
        // data-scientist/advanced ships a single question; a three-question
        // session must keep re-serving it instead of failing.
        let mut interview = interview_with(SessionConfig {
            role: "data-scientist".to_string(),
            difficulty: Difficulty::Advanced,
            ..SessionConfig::default()
        });
        let commands = started(&mut interview);
        let first_prompt = commands
            .iter()
            .find_map(|c| match c {
                RenderCommand::RenderQuestion { prompt, .. } => Some(prompt.clone()),
                _ => None,
            })
            .unwrap();

        for _ in 0..2 {
            submitted(&mut interview, "an answer");
            let commands = interview.apply(Intent::AdvanceToNextQuestion);
            let prompt = commands.iter().find_map(|c| match c {
                RenderCommand::RenderQuestion { prompt, .. } => Some(prompt.clone()),
                _ => None,
            });
            assert_eq!(prompt, Some(first_prompt.clone()));
        }
        assert_eq!(interview.runtime.current_question, 2);
    }

    #[test]
    fn test_unknown_role_falls_back_on_load() {
        let mut interview = interview_with(SessionConfig {
            role: "astronaut".to_string(),
            ..SessionConfig::default()
        });
        let commands = started(&mut interview);
        assert!(commands
            .iter()
            .any(|c| matches!(c, RenderCommand::RenderQuestion { .. })));
    }

    #[test]
    fn test_settings_update_in_setup_rescales_clock() {
        let mut interview = interview();

        let commands = interview.apply(Intent::ChangeSettings {
            difficulty: Difficulty::Advanced,
            duration_minutes: 45,
            company_type: "startup".to_string(),
        });
        assert_eq!(interview.config.difficulty, Difficulty::Advanced);
        assert_eq!(interview.config.duration_minutes, 45);
        assert_eq!(interview.config.company_type, "startup");
        assert_eq!(interview.runtime.seconds_remaining, 45 * 60);
        assert!(commands.contains(&RenderCommand::RenderTimer("45:00".to_string())));
    }

    #[test]
    fn test_settings_are_locked_mid_session() {
        let mut interview = interview();
        started(&mut interview);
        let before = interview.runtime.seconds_remaining;

        let commands = interview.apply(Intent::ChangeSettings {
            difficulty: Difficulty::Beginner,
            duration_minutes: 5,
            company_type: "startup".to_string(),
        });
        assert!(has_notice(&commands, Severity::Warning));
        assert_eq!(interview.config.duration_minutes, 30);
        assert_eq!(interview.runtime.seconds_remaining, before);
    }

    #[test]
    fn test_select_role_is_last_click_wins() {
        let mut interview = interview();

        interview.apply(Intent::SelectRole("data-scientist".to_string()));
        let commands = interview.apply(Intent::SelectRole("product-manager".to_string()));
        assert_eq!(interview.config.role, "product-manager");
        assert_matches!(&commands[0], RenderCommand::ShowNotice { message, .. } => {
            assert_eq!(message, "Role Product Manager selected");
        });
    }

    #[test]
    fn test_recording_toggle_flips_flag() {
        let mut interview = interview();
        started(&mut interview);

        let commands = interview.apply(Intent::BeginRecording);
        assert!(interview.runtime.is_recording);
        assert!(commands.contains(&RenderCommand::RenderRecordingState(true)));

        let commands = interview.apply(Intent::EndRecording);
        assert!(!interview.runtime.is_recording);
        assert!(commands.contains(&RenderCommand::RenderRecordingState(false)));
    }

    #[test]
    fn test_practice_mode_is_a_notice_only() {
        let mut interview = interview();

        let commands = interview.apply(Intent::EnterPracticeMode);
        assert_eq!(commands.len(), 1);
        assert!(has_notice(&commands, Severity::Warning));
        assert_eq!(interview.runtime.phase, Phase::Setup);
    }

    #[test]
    fn test_restart_after_completion() {
        let mut interview = interview_with(SessionConfig {
            total_questions: 1,
            ..SessionConfig::default()
        });
        started(&mut interview);
        submitted(&mut interview, "an answer");
        interview.apply(Intent::AdvanceToNextQuestion);
        run_ticks(&mut interview, FINALIZE_DELAY_MS);
        assert_eq!(interview.runtime.phase, Phase::Completed);

        started(&mut interview);
        assert_eq!(interview.runtime.phase, Phase::Answering);
        assert_eq!(interview.runtime.current_question, 0);
        assert!(!interview.runtime.is_recording);
    }
}
