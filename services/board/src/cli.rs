use crate::infra::{load_catalog, render_card_line, ConsoleNotifier, ConsoleRenderer};
use crate::script::{parse_script, BUILTIN_SCRIPT};
use crate::session::{replay, BoardSession};
use clap::{Args, Parser, Subcommand};
use devjobs::board::{FilterEngine, SortMode};
use devjobs::config::AppConfig;
use devjobs::error::AppError;
use devjobs::telemetry;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "DevJobs Board",
    about = "Filter, sort, and browse the DevJobs listing board from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Filter the listings once and print what remains (default command)
    List(ListArgs),
    /// Replay a scripted board session with live debounce and action timers
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ListArgs {
    /// CSV export to load instead of the built-in listings
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Role to include (repeatable)
    #[arg(long = "role")]
    pub(crate) roles: Vec<String>,
    /// Technology to include, matched as a substring of tags (repeatable)
    #[arg(long = "tech")]
    pub(crate) techs: Vec<String>,
    /// Exact location value
    #[arg(long)]
    pub(crate) location: Option<String>,
    /// Exact experience level
    #[arg(long)]
    pub(crate) experience: Option<String>,
    /// Free-text search across title, company, description, and tags
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Sort option: newest, oldest, salary, or company
    #[arg(long)]
    pub(crate) sort: Option<String>,
    /// Print the board view as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// CSV export to load instead of the built-in listings
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Session script to replay; defaults to a built-in walkthrough
    #[arg(long)]
    pub(crate) script: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry, config.environment)?;

    let command = cli
        .command
        .unwrap_or_else(|| Command::List(ListArgs::default()));

    match command {
        Command::List(args) => run_list(args),
        Command::Demo(args) => run_demo(args, &config).await,
    }
}

pub(crate) fn build_listing(args: &ListArgs) -> Result<FilterEngine, AppError> {
    let records = load_catalog(args.catalog.as_deref())?;
    let mut engine = FilterEngine::new(records);

    for role in &args.roles {
        engine.set_role_selected(role, true);
    }
    for tech in &args.techs {
        engine.set_tech_selected(tech, true);
    }
    if let Some(location) = &args.location {
        engine.set_location(location);
    }
    if let Some(experience) = &args.experience {
        engine.set_experience(experience);
    }
    if let Some(search) = &args.search {
        engine.set_search(search);
    }
    if let Some(sort) = &args.sort {
        let mode = SortMode::from_value(sort);
        if mode.is_none() {
            warn!(sort = %sort, "unrecognized sort option; keeping listing order");
        }
        engine.set_sort_mode(mode);
    }

    Ok(engine)
}

fn run_list(args: ListArgs) -> Result<(), AppError> {
    let engine = build_listing(&args)?;

    if args.json {
        let body = serde_json::to_string_pretty(&engine.view())
            .map_err(|err| AppError::Io(err.into()))?;
        println!("{body}");
        return Ok(());
    }

    let view = engine.view();
    match view.sort_label {
        Some(sort) => println!("{} (sorted: {sort})", view.count_label),
        None => println!("{}", view.count_label),
    }
    match view.empty_state {
        Some(empty) => {
            println!("\n{}", empty.title);
            println!("{}", empty.hint);
        }
        None => {
            for record in engine.visible() {
                println!("- {}", render_card_line(record));
            }
        }
    }

    Ok(())
}

async fn run_demo(args: DemoArgs, config: &AppConfig) -> Result<(), AppError> {
    let DemoArgs { catalog, script } = args;

    let source = match script {
        Some(path) => std::fs::read_to_string(path)?,
        None => BUILTIN_SCRIPT.to_string(),
    };
    let steps = parse_script(&source)?;
    let records = load_catalog(catalog.as_deref())?;

    println!("DevJobs board demo ({} listings)", records.len());
    let renderer = ConsoleRenderer::new(config.board.reveal_plan());
    let notifier = Arc::new(ConsoleNotifier::new(config.board.notification_ttl));
    let session = BoardSession::new(FilterEngine::new(records), renderer, notifier, &config.board);

    let (tx, rx) = mpsc::channel(32);
    let feeder = tokio::spawn(replay(steps, tx));
    let session = session.run(rx).await;
    if let Err(err) = feeder.await {
        warn!(error = %err, "script feeder stopped early");
    }

    info!(
        recomputes = session.recomputes(),
        visible = session.engine().count(),
        "demo complete"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visible_ids(engine: &FilterEngine) -> Vec<String> {
        engine.visible_ids().into_iter().map(|id| id.0.clone()).collect()
    }

    #[test]
    fn list_args_apply_every_criterion() {
        let args = ListArgs {
            roles: vec!["backend".to_string()],
            techs: vec!["Node".to_string()],
            location: Some("remote".to_string()),
            ..ListArgs::default()
        };

        let engine = build_listing(&args).expect("listing builds");
        assert_eq!(visible_ids(&engine), vec!["job-008"]);
    }

    #[test]
    fn list_sort_orders_results() {
        let args = ListArgs {
            sort: Some("salary".to_string()),
            ..ListArgs::default()
        };

        let engine = build_listing(&args).expect("listing builds");
        assert_eq!(visible_ids(&engine).first().map(String::as_str), Some("job-006"));
        assert_eq!(visible_ids(&engine).last().map(String::as_str), Some("job-008"));

        let view = engine.view();
        assert_eq!(view.sort_label, Some("Highest Salary"));
        assert!(!view.filtered);
    }

    #[test]
    fn unknown_sort_keeps_listing_order() {
        let args = ListArgs {
            sort: Some("relevance".to_string()),
            ..ListArgs::default()
        };

        let engine = build_listing(&args).expect("listing builds");
        assert_eq!(visible_ids(&engine).first().map(String::as_str), Some("job-001"));
    }

    #[test]
    fn parses_repeatable_filters() {
        let cli = Cli::try_parse_from([
            "devjobs", "list", "--role", "frontend", "--role", "backend", "--tech", "React",
            "--json",
        ])
        .expect("cli parses");

        match cli.command {
            Some(Command::List(args)) => {
                assert_eq!(args.roles, vec!["frontend", "backend"]);
                assert_eq!(args.techs, vec!["React"]);
                assert!(args.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
