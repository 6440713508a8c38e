//! # Stackwiz CLI Entry Point
//!
//! A small instance-launch wizard built on the question widgets.
//!
//! ## Usage
//!
//! ```bash
//! # Run the wizard with the saved theme
//! stackwiz
//!
//! # Switch theme (remembered for next time)
//! stackwiz --theme nord
//!
//! # Write debug logs, filtered by RUST_LOG
//! RUST_LOG=stackwiz=debug stackwiz --log-file /tmp/stackwiz.log
//! ```
//!
//! ## Flow
//!
//! 1. **Region** - single select
//! 2. **Instance types** - multi select
//! 3. **Image** - free text checked against a small catalog
//! 4. **Tags** - key/value editor
//! 5. **Summary** - confirmation; when editing is allowed, Enter on a row
//!    goes back to that step and then returns to the summary
//!
//! Esc or Ctrl+C at any point exits with status 130.

use stackwiz::question::{
    Confirmation, ConfirmationQuestion, KeyValueQuestion, MultiSelectQuestion, PlainTextQuestion,
    QuestionError, QuestionInput, SingleSelectQuestion, Tags,
};
use stackwiz::ui::prompter::{
    install_panic_hook, CrosstermEventReader, EventReader, Prompter, Screen, TerminalScreen,
};
use stackwiz::ui::{Config, Theme};

use anyhow::{Context, Result};
use clap::Parser;
use regex::Regex;
use std::fmt;
use std::fs::File;
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Exit status for a wizard abandoned with Esc or Ctrl+C.
const EXIT_CANCELLED: i32 = 130;

const REGIONS: &[(&str, &str)] = &[
    ("us-east-1", "N. Virginia"),
    ("eu-west-1", "Ireland"),
    ("ap-southeast-2", "Sydney"),
];

const INSTANCE_TYPES: &[(&str, &str, &str)] = &[
    ("t3.micro", "2", "1 GiB"),
    ("t3.small", "2", "2 GiB"),
    ("m5.large", "2", "8 GiB"),
    ("c5.xlarge", "4", "8 GiB"),
];

/// Known image aliases and the ids they resolve to.
const IMAGES: &[(&str, &str)] = &[
    ("ubuntu-24.04", "ami-0e86e20dae9224db8"),
    ("debian-12", "ami-064519b8c76274859"),
    ("amazon-linux-2023", "ami-0ebfd941bbafe70c6"),
];

const DEFAULT_IMAGE: &str = "ubuntu-24.04";

/// Stackwiz - an interactive instance launch wizard
#[derive(Parser, Debug)]
#[command(name = "stackwiz")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Interactive terminal wizard for launch configurations", long_about = None)]
struct Args {
    /// Theme to use; saved as the default for later runs
    #[arg(short, long, value_name = "NAME")]
    theme: Option<String>,

    /// Write logs to this file (level controlled by RUST_LOG, default info)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Show the final summary read-only
    #[arg(long)]
    no_edit: bool,
}

/// The wizard steps, keyed by the row values of the summary table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Region,
    InstanceTypes,
    Image,
    Tags,
}

impl Step {
    const ALL: [Step; 4] = [Step::Region, Step::InstanceTypes, Step::Image, Step::Tags];

    fn key(self) -> &'static str {
        match self {
            Step::Region => "region",
            Step::InstanceTypes => "instance-types",
            Step::Image => "image",
            Step::Tags => "tags",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|step| step.key() == key)
    }
}

/// Answers collected so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct LaunchPlan {
    region: String,
    instance_types: Vec<String>,
    image: String,
    tags: Tags,
}

impl LaunchPlan {
    fn summary(&self, allow_edit: bool) -> QuestionInput {
        let tags = if self.tags.is_empty() {
            "(none)".to_string()
        } else {
            self.tags.to_string()
        };
        QuestionInput::new("Launch with this configuration?")
            .headers(["Setting", "Value"])
            .rows([
                ["Region".to_string(), self.region.clone()],
                ["Instance types".to_string(), self.instance_types.join("\n")],
                ["Image".to_string(), self.image.clone()],
                ["Tags".to_string(), tags],
                ["Key pair".to_string(), "default".to_string()],
            ])
            .row_values([
                Step::Region.key(),
                Step::InstanceTypes.key(),
                Step::Image.key(),
                Step::Tags.key(),
                "",
            ])
            .allow_edit(allow_edit)
    }
}

impl fmt::Display for LaunchPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Region:         {}", self.region)?;
        writeln!(f, "Instance types: {}", self.instance_types.join(", "))?;
        writeln!(f, "Image:          {}", self.image)?;
        write!(f, "Tags:           {}", self.tags)
    }
}

/// Image aliases plus the pattern raw ids must match.
#[derive(Debug, Clone)]
struct ImageCatalog {
    aliases: Vec<(&'static str, &'static str)>,
    id_pattern: Regex,
}

impl ImageCatalog {
    fn new() -> Result<Self> {
        Ok(Self {
            aliases: IMAGES.to_vec(),
            id_pattern: Regex::new(r"^ami-[0-9a-f]{8,17}$")
                .context("Failed to compile image id pattern")?,
        })
    }

    fn is_alias(&self, candidate: &str) -> bool {
        self.aliases.iter().any(|(alias, _)| *alias == candidate)
    }

    fn is_image_id(&self, candidate: &str) -> bool {
        self.id_pattern.is_match(candidate)
    }

    /// Image id for an alias; anything else is returned as given.
    fn resolve(&self, answer: &str) -> String {
        self.aliases
            .iter()
            .find(|(alias, _)| *alias == answer)
            .map_or(answer, |(_, id)| *id)
            .to_string()
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let mut config = Config::load();
    if let Some(name) = &args.theme {
        let theme = Theme::by_name(name).with_context(|| {
            let names: Vec<&str> = Theme::all().iter().map(|t| t.name).collect();
            format!("Unknown theme: {} (available: {})", name, names.join(", "))
        })?;
        config.theme = theme.name.to_string();
        if let Err(err) = config.save() {
            tracing::warn!(error = %format!("{err:#}"), "could not save config");
        }
    }
    let allow_edit = config.allow_edit && !args.no_edit;
    let catalog = ImageCatalog::new()?;

    install_panic_hook();
    let screen = TerminalScreen::enter()?;
    let mut prompter = Prompter::new(screen, CrosstermEventReader, config.theme().clone());

    let outcome = run_wizard(&mut prompter, &catalog, allow_edit);

    prompter.into_screen().leave()?;
    let _ = panic::take_hook();

    match outcome {
        Ok(Some(plan)) => {
            tracing::info!(region = %plan.region, "launch plan confirmed");
            println!("{plan}");
            Ok(())
        }
        Ok(None) => {
            println!("Launch aborted.");
            Ok(())
        }
        Err(QuestionError::UserCancelled) => {
            tracing::info!("wizard cancelled");
            eprintln!("Cancelled.");
            std::process::exit(EXIT_CANCELLED);
        }
        Err(err) => Err(err).context("Wizard failed"),
    }
}

/// Send tracing output to `path`, filtered by `RUST_LOG`.
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
        .context("Failed to install log subscriber")
}

/// Ask every step, then loop on the summary until the user decides.
///
/// `Ok(None)` means the user answered No on the summary.
fn run_wizard<S: Screen, R: EventReader>(
    prompter: &mut Prompter<S, R>,
    catalog: &ImageCatalog,
    allow_edit: bool,
) -> Result<Option<LaunchPlan>, QuestionError> {
    let mut plan = LaunchPlan::default();
    for step in Step::ALL {
        ask_step(prompter, step, &mut plan, catalog)?;
    }

    loop {
        match prompter.ask::<ConfirmationQuestion, ()>(plan.summary(allow_edit))? {
            Confirmation::Yes => return Ok(Some(plan)),
            Confirmation::No => return Ok(None),
            Confirmation::Reconfigure(key) => match Step::from_key(&key) {
                Some(step) => ask_step(prompter, step, &mut plan, catalog)?,
                None => tracing::warn!(key = %key, "summary row maps to no step"),
            },
        }
    }
}

/// Ask one step, seeding it with the current answer.
fn ask_step<S: Screen, R: EventReader>(
    prompter: &mut Prompter<S, R>,
    step: Step,
    plan: &mut LaunchPlan,
    catalog: &ImageCatalog,
) -> Result<(), QuestionError> {
    match step {
        Step::Region => {
            let mut input = QuestionInput::new("Which region?")
                .headers(["Region", "Location"])
                .rows(REGIONS.iter().map(|(code, location)| [*code, *location]))
                .row_values(REGIONS.iter().map(|(code, _)| *code));
            if !plan.region.is_empty() {
                input = input.default_value(plan.region.clone());
            }
            let answer = prompter.ask::<SingleSelectQuestion, ()>(input)?;
            plan.region = answer.unwrap_or_default();
        }
        Step::InstanceTypes => {
            let input = QuestionInput::new("Which instance types?")
                .headers(["Type", "vCPU", "Memory"])
                .rows(
                    INSTANCE_TYPES
                        .iter()
                        .map(|(name, cpu, memory)| [*name, *cpu, *memory]),
                )
                .row_values(INSTANCE_TYPES.iter().map(|(name, _, _)| *name))
                .default_values(plan.instance_types.clone());
            plan.instance_types = prompter.ask::<MultiSelectQuestion, ()>(input)?;
        }
        Step::Image => {
            let current = if plan.image.is_empty() {
                DEFAULT_IMAGE.to_string()
            } else {
                plan.image.clone()
            };
            let input = QuestionInput::new("Which image? (alias or ami-id)")
                .default_value(current)
                .context(catalog.clone())
                .validator(|catalog: &ImageCatalog, candidate: &str| catalog.is_alias(candidate))
                .validator(|catalog: &ImageCatalog, candidate: &str| {
                    catalog.is_image_id(candidate)
                });
            let answer = prompter.ask::<PlainTextQuestion<ImageCatalog>, _>(input)?;
            plan.image = catalog.resolve(&answer);
        }
        Step::Tags => {
            let input: QuestionInput =
                QuestionInput::new("Any tags?").default_value(plan.tags.to_string());
            plan.tags = prompter.ask::<KeyValueQuestion, ()>(input)?;
        }
    }
    tracing::debug!(step = step.key(), "step answered");
    Ok(())
}
