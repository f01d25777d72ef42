use anyhow::{bail, Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use context_browser::{BrowserConfig, ContextBrowser, Modifiers};
use context_protocol::{generation_request_schema, record_details_schema, visible_node_schema};
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Instant;

mod render;

#[derive(Parser)]
#[command(name = "context-tree")]
#[command(about = "Browse, filter and select hierarchical context records", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Browser configuration (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Start from the compact preset: collapsed tree, shorter previews
    #[arg(long, global = true, conflicts_with = "config")]
    compact: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the visible tree
    Tree(TreeArgs),

    /// Match records against a text query
    Filter(FilterArgs),

    /// Print the path from the top-level ancestor down to a record
    Path(PathArgs),

    /// Show one record with a content preview
    Show(ShowArgs),

    /// Build a generation request from selected records
    Request(RequestArgs),

    /// Print the JSON schema of a wire type
    Schema(SchemaArgs),
}

#[derive(Args)]
struct RecordsArg {
    /// Record JSON file (flat or nested); `-` reads stdin
    records: PathBuf,
}

#[derive(Args)]
struct TreeArgs {
    #[command(flatten)]
    input: RecordsArg,

    /// Show only the subtree under this id
    #[arg(long)]
    root: Option<String>,

    /// Activate these ids in order (plain activation: toggle and reroot)
    #[arg(long = "select", value_name = "ID")]
    select: Vec<String>,

    /// Toggle these ids without moving the view
    #[arg(long = "add", value_name = "ID")]
    add: Vec<String>,

    /// Collapse these ids
    #[arg(long = "collapse", value_name = "ID")]
    collapse: Vec<String>,

    /// Filter rows by text
    #[arg(long)]
    query: Option<String>,

    /// Output JSON rows
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct FilterArgs {
    #[command(flatten)]
    input: RecordsArg,

    /// Text to look for in name, title, type and content
    query: String,

    /// Output JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct PathArgs {
    #[command(flatten)]
    input: RecordsArg,

    /// Record id
    id: String,

    /// Output JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ShowArgs {
    #[command(flatten)]
    input: RecordsArg,

    /// Record id
    id: String,

    /// Output JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct RequestArgs {
    #[command(flatten)]
    input: RecordsArg,

    /// Instruction for the generation backend
    #[arg(long)]
    prompt: String,

    /// Selected ids, in selection order (subtrees cascade)
    #[arg(long = "select", value_name = "ID")]
    select: Vec<String>,

    /// Print the plain-text digest of the selection instead
    #[arg(long)]
    digest: bool,
}

#[derive(Args)]
struct SchemaArgs {
    /// Schema of the visible row instead of the generation request
    #[arg(long, conflicts_with = "details")]
    visible_node: bool,

    /// Schema of the record detail view
    #[arg(long)]
    details: bool,
}

#[derive(Serialize)]
struct FilterOutput {
    query: String,
    matches: Vec<String>,
    force_expand: Vec<String>,
}

#[derive(Serialize)]
struct PathEntry {
    id: String,
    name: String,
    depth: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config = load_config(cli.config.as_deref(), cli.compact)?;

    match cli.command {
        Commands::Tree(args) => run_tree(args, config),
        Commands::Filter(args) => run_filter(args, config),
        Commands::Path(args) => run_path(args, config),
        Commands::Show(args) => run_show(args, config),
        Commands::Request(args) => run_request(args, config),
        Commands::Schema(args) => run_schema(args),
    }
}

fn load_config(path: Option<&Path>, compact: bool) -> Result<BrowserConfig> {
    let Some(path) = path else {
        return Ok(if compact {
            BrowserConfig::compact()
        } else {
            BrowserConfig::default()
        });
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    BrowserConfig::from_toml_str(&raw)
        .with_context(|| format!("Invalid config {}", path.display()))
}

fn read_records(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut raw = String::new();
        io::stdin()
            .read_to_string(&mut raw)
            .context("Failed to read records from stdin")?;
        return Ok(raw);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read records {}", path.display()))
}

fn open_browser(input: &RecordsArg, config: BrowserConfig) -> Result<ContextBrowser> {
    let mut browser = ContextBrowser::new(config)?;
    let payload = read_records(&input.records)?;
    let report = browser
        .load_json(&payload)
        .with_context(|| format!("Failed to load records {}", input.records.display()))?;
    if report.skipped > 0 {
        log::warn!("Skipped {} malformed records", report.skipped);
    }
    Ok(browser)
}

/// Feed activations one window apart so repeats are not coalesced away
fn activate_all(browser: &mut ContextBrowser, ids: &[String], modifiers: Modifiers) {
    let window = browser.config().activation_window();
    let mut at = Instant::now();
    for id in ids {
        if !browser.forest().contains(id) {
            log::warn!("Unknown id {id}");
            continue;
        }
        browser.activate_with(id, modifiers, at);
        at += window;
    }
}

fn run_tree(args: TreeArgs, config: BrowserConfig) -> Result<()> {
    let mut browser = open_browser(&args.input, config)?;

    activate_all(&mut browser, &args.select, Modifiers::NONE);
    activate_all(&mut browser, &args.add, Modifiers::SECONDARY);
    if let Some(root) = &args.root {
        browser.set_view_root(root);
    }
    for id in &args.collapse {
        browser.set_expanded(id, false);
    }
    if let Some(query) = &args.query {
        browser.set_query(query);
    }

    let rows = browser.visible_nodes();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print!("{}", render::tree(&rows));
    }
    Ok(())
}

fn run_filter(args: FilterArgs, config: BrowserConfig) -> Result<()> {
    let mut browser = open_browser(&args.input, config)?;
    browser.set_query(&args.query);
    let result = browser.filter_result();

    if args.json {
        let output = FilterOutput {
            query: args.query.clone(),
            matches: result.matches().to_vec(),
            force_expand: result.force_expand().to_vec(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !result.is_active() {
        eprintln!("Empty query: nothing filtered");
    } else {
        for id in result.matches() {
            let name = browser.store().get(id).map_or("", |r| r.display_name());
            println!("{id}\t{name}");
        }
        eprintln!(
            "{} matches, {} ancestors forced open",
            result.matches().len(),
            result.force_expand().len()
        );
    }
    Ok(())
}

fn run_path(args: PathArgs, config: BrowserConfig) -> Result<()> {
    let browser = open_browser(&args.input, config)?;
    let path = browser.forest().path_to(&args.id);
    if path.is_empty() {
        bail!("Unknown record id {}", args.id);
    }

    if args.json {
        let entries: Vec<PathEntry> = path
            .iter()
            .map(|node| PathEntry {
                id: node.id.clone(),
                name: node.name().to_string(),
                depth: node.depth,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        let names: Vec<&str> = path.iter().map(|node| node.name()).collect();
        println!("{}", names.join(" / "));
    }
    Ok(())
}

fn run_show(args: ShowArgs, config: BrowserConfig) -> Result<()> {
    let browser = open_browser(&args.input, config)?;
    let Some(details) = browser.details(&args.id) else {
        bail!("Unknown record id {}", args.id);
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&details)?);
    } else {
        print!("{}", render::details(&details));
    }
    Ok(())
}

fn run_request(args: RequestArgs, config: BrowserConfig) -> Result<()> {
    let mut browser = open_browser(&args.input, config)?;
    activate_all(&mut browser, &args.select, Modifiers::SECONDARY);

    if args.digest {
        println!("{}", browser.selected_digest());
    } else {
        let request = browser.generation_request(&args.prompt);
        println!("{}", serde_json::to_string_pretty(&request)?);
    }
    Ok(())
}

fn run_schema(args: SchemaArgs) -> Result<()> {
    let schema = if args.visible_node {
        visible_node_schema()?
    } else if args.details {
        record_details_schema()?
    } else {
        generation_request_schema()?
    };
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
