//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use curriculum_core::{
    Curriculum, QuizSession, check_consistency, grade_selections, lint_curriculum, write_bundle,
};
use curriculum_loader::ContentSource;
use curriculum_shared::{AppConfig, CurriculumError, Language, init_config, load_config};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Curriculum: validate and cross-check multi-language course content.
#[derive(Parser)]
#[command(
    name = "curriculum",
    version,
    about = "Validate, lint, cross-check and export multi-language curriculum content.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Content directory (overrides `defaults.content_dir`).
    #[arg(long, env = "CURRICULUM_CONTENT_DIR", global = true)]
    pub content_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Load and validate curricula (all configured languages by default).
    Validate {
        /// Language(s) to validate.
        #[arg(short, long)]
        lang: Vec<Language>,
    },

    /// Report non-blocking authoring warnings.
    Lint {
        /// Language(s) to lint.
        #[arg(short, long)]
        lang: Vec<Language>,
    },

    /// Check that translations are structurally isomorphic to the reference.
    Check {
        /// Reference language (defaults to `defaults.reference_language`).
        #[arg(long)]
        reference: Option<Language>,

        /// Candidate language(s) (defaults to every other configured language).
        #[arg(long)]
        candidate: Vec<Language>,
    },

    /// Print the module/topic tree of a curriculum.
    Outline {
        /// Language to print.
        #[arg(short, long)]
        lang: Language,

        /// Only print this module.
        #[arg(short, long)]
        module: Option<String>,
    },

    /// Grade a set of answers against a quiz block.
    Quiz {
        /// Curriculum language.
        #[arg(short, long)]
        lang: Language,

        /// Topic containing the quiz.
        #[arg(short, long)]
        topic: String,

        /// Which quiz in the topic (0 = first).
        #[arg(long, default_value_t = 0)]
        block: usize,

        /// Selected option per question, comma-separated (e.g. 0,1,2,0).
        #[arg(long, value_delimiter = ',', required = true)]
        answers: Vec<usize>,
    },

    /// Write a validated curriculum as a JSON bundle for renderers.
    Export {
        /// Language to export.
        #[arg(short, long)]
        lang: Language,

        /// Output file.
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "curriculum=info",
        1 => "curriculum=debug",
        _ => "curriculum=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    if let Command::Config { action } = &cli.command {
        return match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        };
    }

    let config = load_config()?;
    let source = ContentSource::from_config(&config, cli.content_dir.as_deref());

    match cli.command {
        Command::Validate { lang } => cmd_validate(&source, &lang).await,
        Command::Lint { lang } => cmd_lint(&source, &config, &lang).await,
        Command::Check {
            reference,
            candidate,
        } => cmd_check(&source, &config, reference, &candidate).await,
        Command::Outline { lang, module } => cmd_outline(&source, &lang, module.as_deref()).await,
        Command::Quiz {
            lang,
            topic,
            block,
            answers,
        } => cmd_quiz(&source, &lang, &topic, block, &answers).await,
        Command::Export { lang, out } => cmd_export(&source, &lang, &out).await,
        Command::Config { .. } => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Loading with progress
// ---------------------------------------------------------------------------

/// Spinner shown while curricula load.
struct LoadProgress {
    spinner: ProgressBar,
}

impl LoadProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            spinner.set_style(
                style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
            );
        }
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }

    async fn load(&self, source: &ContentSource, lang: &Language) -> Result<Curriculum> {
        self.spinner.set_message(format!("Loading [{lang}] from {}", source.root().display()));
        let curriculum = source.load_curriculum(lang).await?;
        Ok(curriculum)
    }
}

impl Drop for LoadProgress {
    fn drop(&mut self) {
        self.spinner.finish_and_clear();
    }
}

fn languages_or_all(source: &ContentSource, requested: &[Language]) -> Vec<Language> {
    if requested.is_empty() {
        source.languages().to_vec()
    } else {
        requested.to_vec()
    }
}

async fn load_one(source: &ContentSource, lang: &Language) -> Result<Curriculum> {
    LoadProgress::new().load(source, lang).await
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_validate(source: &ContentSource, requested: &[Language]) -> Result<()> {
    let mut failed = 0;

    for lang in languages_or_all(source, requested) {
        match load_one(source, &lang).await {
            Ok(curriculum) => {
                let stats = curriculum.stats();
                println!(
                    "  [{lang}] ok: {} modules, {} topics, {} blocks, {} quizzes ({} questions)",
                    stats.modules, stats.topics, stats.blocks, stats.quizzes, stats.questions
                );
            }
            Err(err) => {
                failed += 1;
                error!(language = %lang, error = %err, "curriculum failed validation");
                println!("  [{lang}] content unavailable: {err}");
            }
        }
    }

    if failed > 0 {
        return Err(eyre!("{failed} curriculum(s) failed validation"));
    }
    Ok(())
}

async fn cmd_lint(source: &ContentSource, config: &AppConfig, requested: &[Language]) -> Result<()> {
    let mut total = 0;

    for lang in languages_or_all(source, requested) {
        let curriculum = load_one(source, &lang).await?;
        let warnings = lint_curriculum(&curriculum, &config.lint);
        total += warnings.len();

        println!("  [{lang}] {} warning(s)", warnings.len());
        for warning in &warnings {
            println!("    - {warning}");
        }
    }

    if total > 0 && config.lint.deny_warnings {
        return Err(eyre!("{total} lint warning(s) with `lint.deny_warnings` enabled"));
    }
    Ok(())
}

async fn cmd_check(
    source: &ContentSource,
    config: &AppConfig,
    reference: Option<Language>,
    candidates: &[Language],
) -> Result<()> {
    let reference = reference.unwrap_or_else(|| config.defaults.reference_language.clone());
    let candidates: Vec<Language> = if candidates.is_empty() {
        source
            .languages()
            .iter()
            .filter(|l| **l != reference)
            .cloned()
            .collect()
    } else {
        candidates.to_vec()
    };

    let base = load_one(source, &reference).await?;
    info!(
        reference = %reference,
        candidates = candidates.len(),
        digest = %base.skeleton_digest(),
        "checking structural consistency"
    );

    let mut total = 0;
    for lang in &candidates {
        let other = load_one(source, lang).await?;
        if base.skeleton_digest() == other.skeleton_digest() {
            println!("  [{reference} → {lang}] consistent");
            continue;
        }

        let report = check_consistency(&base, &other);
        total += report.mismatches.len();
        println!(
            "  [{reference} → {lang}] {} mismatch(es)",
            report.mismatches.len()
        );
        for mismatch in &report.mismatches {
            println!("    - {mismatch}");
        }
    }

    if total > 0 {
        return Err(CurriculumError::StructuralMismatch { count: total }.into());
    }
    Ok(())
}

async fn cmd_outline(source: &ContentSource, lang: &Language, only: Option<&str>) -> Result<()> {
    let curriculum = load_one(source, lang).await?;
    let stats = curriculum.stats();

    let modules = match only {
        Some(id) => vec![
            curriculum
                .module(id)
                .ok_or_else(|| eyre!("no module `{id}` in the [{lang}] curriculum"))?,
        ],
        None => curriculum.modules().iter().collect(),
    };

    println!();
    println!(
        "  [{lang}] {} modules, {} topics, {} blocks, {} characters of text",
        stats.modules, stats.topics, stats.blocks, stats.text_chars
    );
    println!();

    for module in modules {
        let status = if module.is_coming_soon() { "  (coming soon)" } else { "" };
        println!("  {}  {}{status}", module.id(), module.title());
        for topic in module.topics() {
            println!(
                "    ├─ {:<32} {:<40} [{} blocks]",
                topic.id(),
                topic.title(),
                topic.blocks().len()
            );
        }
    }
    for (kind, topic) in curriculum.singletons().filter(|_| only.is_none()) {
        println!(
            "  {kind}  {} ({}, {} blocks)",
            topic.title(),
            topic.id(),
            topic.blocks().len()
        );
    }

    println!();
    println!("  Skeleton digest: {}", curriculum.skeleton_digest());
    println!();
    Ok(())
}

async fn cmd_quiz(
    source: &ContentSource,
    lang: &Language,
    topic_id: &str,
    block: usize,
    answers: &[usize],
) -> Result<()> {
    let curriculum = load_one(source, lang).await?;
    let topic = curriculum
        .topic(topic_id)
        .ok_or_else(|| eyre!("no topic `{topic_id}` in the [{lang}] curriculum"))?
        .topic;
    let quiz = topic
        .blocks()
        .iter()
        .filter_map(|b| b.as_quiz())
        .nth(block)
        .ok_or_else(|| eyre!("topic `{topic_id}` has no quiz #{block}"))?;

    let expected = QuizSession::new(quiz).question_count();
    if answers.len() != expected {
        return Err(eyre!(
            "quiz #{block} in `{topic_id}` has {expected} question(s) but {} answer(s) were given",
            answers.len()
        ));
    }

    let outcome = grade_selections(quiz, answers)?;

    println!();
    for entry in &outcome.review {
        let question = &quiz.questions[entry.question];
        let mark = if entry.is_correct { "✓" } else { "✗" };
        println!("  {mark} {}. {}", entry.question + 1, question.question);
        println!("      answered: {}", question.options[entry.selected]);
        if !entry.is_correct {
            println!("      correct:  {}", question.options[entry.correct_answer]);
        }
    }
    println!();
    println!(
        "  Score: {} ({:.0}%)",
        outcome.score,
        outcome.score.ratio() * 100.0
    );
    println!();
    Ok(())
}

async fn cmd_export(source: &ContentSource, lang: &Language, out: &Path) -> Result<()> {
    let curriculum = load_one(source, lang).await?;
    write_bundle(&curriculum, out)?;
    println!("  [{lang}] exported to {}", out.display());
    Ok(())
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
