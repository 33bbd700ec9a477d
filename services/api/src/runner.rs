use crate::infra::{FilePromptSink, InMemorySessionStore, PromptBuffer};
use clap::{Args, ValueEnum};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use unstuck::config::AppConfig;
use unstuck::diagnosis::report::{render_text, write_ranking_csv};
use unstuck::diagnosis::{
    confidence_pct, Choice, DiagnosisService, PromptSink, QuestionPhase, Registry, SessionAction,
    SessionRecord, SessionStep, SessionStore, TimeBucket, Trouble,
};
use unstuck::error::AppError;

#[derive(Args, Debug, Default)]
pub(crate) struct RunArgs {
    /// Write the generated prompt to this file once the result is shown
    #[arg(long)]
    pub(crate) copy_to: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct DiagnoseArgs {
    /// Main difficulty (ACTION, DECIDE, FOCUS, TIRED, NO_TIME)
    #[arg(long)]
    pub(crate) trouble: Trouble,
    /// Weekday time available (0_15, 30, 60)
    #[arg(long)]
    pub(crate) time: TimeBucket,
    /// One A/B letter per mandatory question, e.g. ABBABAABBA
    #[arg(long)]
    pub(crate) answers: String,
    /// A/B letters for the follow-up questions, required when confidence is low
    #[arg(long)]
    pub(crate) supplementary: Option<String>,
    /// Output format for the report
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
    /// Write the generated prompt to this file
    #[arg(long)]
    pub(crate) copy_to: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
    Csv,
}

pub(crate) fn run_interactive(args: RunArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let registry = Arc::new(Registry::standard()?);
    let store = Arc::new(InMemorySessionStore::default());
    let stdin = io::stdin();
    let stdout = io::stdout();

    match args.copy_to {
        Some(path) => {
            let service = DiagnosisService::new(
                registry,
                store,
                Arc::new(FilePromptSink::new(path)),
                config.diagnosis,
            );
            interact(&service, true, stdin.lock(), stdout.lock())
        }
        None => {
            let service = DiagnosisService::new(
                registry,
                store,
                Arc::new(PromptBuffer::default()),
                config.diagnosis,
            );
            interact(&service, false, stdin.lock(), stdout.lock())
        }
    }
}

pub(crate) fn run_diagnose(args: DiagnoseArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let registry = Arc::new(Registry::standard()?);
    let store = Arc::new(InMemorySessionStore::default());
    let stdout = io::stdout();

    match args.copy_to.clone() {
        Some(path) => {
            let service = DiagnosisService::new(
                registry,
                store,
                Arc::new(FilePromptSink::new(path)),
                config.diagnosis,
            );
            diagnose(&service, &args, true, stdout.lock())
        }
        None => {
            let service = DiagnosisService::new(
                registry,
                store,
                Arc::new(PromptBuffer::default()),
                config.diagnosis,
            );
            diagnose(&service, &args, false, stdout.lock())
        }
    }
}

enum Input {
    Quit,
    Reset,
    Line(String),
}

fn read_input<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<Input> {
    write!(output, "> ")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(Input::Quit);
    }
    let line = line.trim();
    Ok(match line.to_ascii_lowercase().as_str() {
        "q" | "quit" => Input::Quit,
        "r" | "reset" => Input::Reset,
        _ => Input::Line(line.to_string()),
    })
}

fn pick_numbered<T: Copy>(options: &[T], raw: &str) -> Option<T> {
    raw.parse::<usize>()
        .ok()
        .and_then(|number| number.checked_sub(1))
        .and_then(|index| options.get(index).copied())
}

/// Drives one terminal session until the user quits or input ends.
fn interact<S, P, R, W>(
    service: &DiagnosisService<S, P>,
    copy: bool,
    mut input: R,
    mut output: W,
) -> Result<(), AppError>
where
    S: SessionStore + 'static,
    P: PromptSink + 'static,
    R: BufRead,
    W: Write,
{
    let mut record = service.start()?;

    loop {
        let Some(action) = prompt_action(service, &record, copy, &mut input, &mut output)? else {
            service.discard(&record.id)?;
            writeln!(output, "Bye.")?;
            return Ok(());
        };
        record = service.apply(&record.id, action)?;
    }
}

/// Renders the current step and reads input until it maps to an action.
/// `None` means the user asked to leave.
fn prompt_action<S, P, R, W>(
    service: &DiagnosisService<S, P>,
    record: &SessionRecord,
    copy: bool,
    input: &mut R,
    output: &mut W,
) -> Result<Option<SessionAction>, AppError>
where
    S: SessionStore + 'static,
    P: PromptSink + 'static,
    R: BufRead,
    W: Write,
{
    let registry = service.registry();
    let session = &record.session;

    match session.step() {
        SessionStep::Intro => {
            writeln!(output, "Stuck-pattern check")?;
            writeln!(
                output,
                "Answer two context questions and ten quick A/B questions to see what keeps you stuck."
            )?;
            writeln!(output, "Press Enter to start (q to quit, r to start over at any time).")?;
        }
        SessionStep::ContextTrouble => {
            writeln!(output, "\nWhat is your main difficulty right now?")?;
            for (position, trouble) in Trouble::ordered().iter().enumerate() {
                writeln!(output, "  {}) {}", position + 1, trouble.label())?;
            }
        }
        SessionStep::ContextTime => {
            writeln!(output, "\nHow much time do you have on a weekday?")?;
            for (position, bucket) in TimeBucket::ordered().iter().enumerate() {
                writeln!(output, "  {}) {}", position + 1, bucket.label())?;
            }
        }
        SessionStep::CoreQuestions { .. } | SessionStep::SupplementaryQuestions { .. } => {
            if let (Some(question), Some(progress)) =
                (session.current_question(registry), session.progress(registry))
            {
                let phase = match progress.phase {
                    QuestionPhase::Core => "Question",
                    QuestionPhase::Supplementary => "Follow-up",
                };
                let ranking = session.ranking();
                writeln!(
                    output,
                    "\n[{phase} {}/{}] {}",
                    progress.position, progress.total, question.title
                )?;
                if let Some(subtitle) = question.subtitle {
                    writeln!(output, "  ({subtitle})")?;
                }
                writeln!(output, "  A) {}", question.a.label)?;
                writeln!(output, "  B) {}", question.b.label)?;
                writeln!(
                    output,
                    "  leaning: {} / {} ({}%)",
                    registry.profile(ranking.primary().category).name,
                    registry.profile(ranking.secondary().category).name,
                    confidence_pct(ranking.confidence())
                )?;
            }
        }
        SessionStep::Result => {
            let report = service.report(&record.id)?;
            writeln!(output)?;
            write!(output, "{}", render_text(&report))?;
            if copy {
                let notice = service.copy_prompt(&record.id)?;
                writeln!(output, "\n{}", notice.message)?;
            }
            writeln!(output, "\nEnter r to start over, anything else to exit.")?;
        }
    }

    loop {
        let line = match read_input(input, output)? {
            Input::Quit => return Ok(None),
            Input::Reset => return Ok(Some(SessionAction::Reset)),
            Input::Line(line) => line,
        };

        let action = match session.step() {
            SessionStep::Intro => Some(SessionAction::Start),
            SessionStep::ContextTrouble => pick_numbered(&Trouble::ordered(), &line)
                .map(|trouble| SessionAction::SelectTrouble { trouble }),
            SessionStep::ContextTime => pick_numbered(&TimeBucket::ordered(), &line)
                .map(|time| SessionAction::SelectTime { time }),
            SessionStep::CoreQuestions { .. } | SessionStep::SupplementaryQuestions { .. } => line
                .parse::<Choice>()
                .ok()
                .map(|choice| SessionAction::Answer { choice }),
            SessionStep::Result => return Ok(None),
        };

        match action {
            Some(action) => return Ok(Some(action)),
            None => {
                let hint = match session.step() {
                    SessionStep::ContextTrouble => "Please pick a number between 1 and 5.",
                    SessionStep::ContextTime => "Please pick a number between 1 and 3.",
                    _ => "Please answer A or B.",
                };
                writeln!(output, "{hint}")?;
            }
        }
    }
}

fn parse_answers(raw: &str, flag: &str) -> Result<Vec<Choice>, AppError> {
    raw.chars()
        .filter(|letter| !letter.is_whitespace() && *letter != ',')
        .map(|letter| {
            Choice::try_from(letter).map_err(|err| AppError::Usage(format!("{flag}: {err}")))
        })
        .collect()
}

/// Runs a scripted session and writes the report in the requested format.
fn diagnose<S, P, W>(
    service: &DiagnosisService<S, P>,
    args: &DiagnoseArgs,
    copy: bool,
    mut output: W,
) -> Result<(), AppError>
where
    S: SessionStore + 'static,
    P: PromptSink + 'static,
    W: Write,
{
    let core = parse_answers(&args.answers, "--answers")?;
    let supplementary = args
        .supplementary
        .as_deref()
        .map(|raw| parse_answers(raw, "--supplementary"))
        .transpose()?
        .unwrap_or_default();

    let expected = service.registry().core_questions().len();
    if core.len() != expected {
        return Err(AppError::Usage(format!(
            "--answers needs exactly {expected} A/B letters, got {}",
            core.len()
        )));
    }

    let mut record = service.start()?;
    let id = record.id.clone();
    let mut actions = vec![
        SessionAction::Start,
        SessionAction::SelectTrouble {
            trouble: args.trouble,
        },
        SessionAction::SelectTime { time: args.time },
    ];
    actions.extend(core.into_iter().map(|choice| SessionAction::Answer { choice }));

    for action in actions {
        record = service.apply(&id, action)?;
    }

    let asked = record.session.supplementary_ids().to_vec();
    if supplementary.len() != asked.len() {
        let confidence = confidence_pct(record.session.confidence());
        service.discard(&id)?;
        return Err(AppError::Usage(if asked.is_empty() {
            format!("--supplementary is not used: confidence {confidence}% needs no follow-up questions")
        } else {
            format!(
                "confidence {confidence}% is low; --supplementary needs {} A/B letters for {}",
                asked.len(),
                asked.join(", ")
            )
        }));
    }
    for choice in supplementary {
        service.apply(&id, SessionAction::Answer { choice })?;
    }

    let report = service.report(&id)?;
    match args.format {
        OutputFormat::Text => write!(output, "{}", render_text(&report))?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut output, &report).map_err(io::Error::from)?;
            writeln!(output)?;
        }
        OutputFormat::Csv => write_ranking_csv(&report.ranking, &mut output).map_err(io::Error::from)?,
    }

    if copy {
        let notice = service.copy_prompt(&id)?;
        eprintln!("{}", notice.message);
    }
    service.discard(&id)?;
    Ok(())
}
