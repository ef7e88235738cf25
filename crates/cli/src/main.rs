use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use plantfacts_core::{InboundRequest, LocaleTable, RequestEnvelope};
use plantfacts_observability::{init_cli_tracing, SkillMetrics};
use plantfacts_skill::{RandomFactPicker, Skill, DEFAULT_USER_AGENT_SUFFIX};

#[derive(Debug, Parser)]
#[command(name = "plantfacts")]
#[command(about = "Plant Facts voice skill CLI")]
struct Cli {
    /// Locale resources file replacing the built-in table.
    #[arg(long, env = "PLANTFACTS_RESOURCES")]
    resources: Option<PathBuf>,

    #[arg(long, env = "PLANTFACTS_USER_AGENT", default_value = DEFAULT_USER_AGENT_SUFFIX)]
    user_agent: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run a request envelope (JSON file, or `-` for stdin) through the skill.
    Invoke { event: PathBuf },
    /// Build a request of the given kind and run it through the skill.
    Simulate {
        #[command(subcommand)]
        request: SimulatedRequest,
        #[arg(long, default_value = "en-US", global = true)]
        locale: String,
    },
    /// List supported locale codes.
    Locales,
    /// Print the fact list of a locale.
    Facts {
        #[arg(long, default_value = "en")]
        locale: String,
    },
}

#[derive(Debug, Subcommand)]
enum SimulatedRequest {
    Launch,
    Intent { name: String },
    End,
}

fn main() -> Result<()> {
    init_cli_tracing("plantfacts_cli");
    let cli = Cli::parse();

    let skill = build_skill(cli.resources.as_deref(), &cli.user_agent)?;
    println!("{}", execute(&skill, cli.command)?);

    Ok(())
}

/// Runs one command and returns what it prints.
fn execute(skill: &Skill, command: Command) -> Result<String> {
    match command {
        Command::Invoke { event } => {
            let raw = read_event(&event)?;
            let envelope: RequestEnvelope =
                serde_json::from_str(&raw).context("event is not a valid request envelope")?;
            render_response(skill, &envelope)
        }
        Command::Simulate { request, locale } => {
            let request = match request {
                SimulatedRequest::Launch => InboundRequest::launch(&locale),
                SimulatedRequest::Intent { name } => InboundRequest::intent(&name, &locale),
                SimulatedRequest::End => InboundRequest::session_ended(&locale),
            };
            render_response(skill, &RequestEnvelope::new(request))
        }
        Command::Locales => Ok(skill.table().locales().join("\n")),
        Command::Facts { locale } => {
            let bundle = skill.table().resolve(Some(&locale));
            Ok(serde_json::to_string_pretty(bundle.facts())?)
        }
    }
}

fn build_skill(resources: Option<&Path>, user_agent: &str) -> Result<Skill> {
    let table = match resources {
        Some(path) => LocaleTable::from_path(path)
            .with_context(|| format!("failed loading locale resources from {}", path.display()))?,
        None => LocaleTable::builtin(),
    };

    Ok(Skill::new(
        Arc::new(table),
        Arc::new(RandomFactPicker),
        SkillMetrics::shared(),
    )
    .with_user_agent_suffix(user_agent))
}

fn read_event(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut raw = String::new();
        io::stdin()
            .read_to_string(&mut raw)
            .context("failed reading event from stdin")?;
        return Ok(raw);
    }

    if !path.exists() {
        bail!("event file {} does not exist", path.display());
    }
    fs::read_to_string(path).with_context(|| format!("failed reading {}", path.display()))
}

fn render_response(skill: &Skill, envelope: &RequestEnvelope) -> Result<String> {
    let response = skill.invoke(envelope);
    Ok(serde_json::to_string_pretty(&response)?)
}
