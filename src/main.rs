//! Multipage demo driver - Entry Point
//!
//! Opens one document in one pane of an in-memory host, runs the given
//! commands through a session and prints what each did.

use clap::Parser;
use multipage::context::ContextError;
use multipage::layout::clamp_top;
use multipage::{Host, MemoryHost, Multipage, Overlap};
use std::path::PathBuf;
use tracing::info;

/// Page one document across side-by-side panes
#[derive(Parser, Debug)]
#[command(name = "multipage")]
#[command(version)]
#[command(about = "Lay out side-by-side panes as consecutive pages of one document")]
pub struct Args {
    /// Commands to run in order, e.g. "enable 3" status "overlap 0"
    pub commands: Vec<String>,

    /// Number of lines in the demo document
    #[arg(long, default_value_t = 1000)]
    pub lines: usize,

    /// Height of the initial pane in lines
    #[arg(long, default_value_t = 40)]
    pub height: usize,

    /// Top line of the initial pane
    #[arg(long, default_value_t = 1)]
    pub top: usize,

    /// Lines shared between adjacent pages
    #[arg(long)]
    pub overlap: Option<usize>,

    /// Render the context header after each command
    #[arg(long)]
    pub context: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = multipage::config::load_config_with_precedence(args.config.clone())?;
        let merged = multipage::config::merge_config(config_file);
        let with_env = multipage::config::apply_env_overrides(merged)?;
        multipage::config::apply_cli_overrides(with_env, args.overlap.map(Overlap::new))
    };

    multipage::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let mut host = MemoryHost::new();
    let document = host.add_document(args.lines);
    let group = host.add_group();
    let pane = host.open_viewport(group, document, args.height);
    host.set_top_line(pane, clamp_top(args.top, args.lines, args.height))?;

    let mut session = Multipage::from_config(&config);
    if args.context {
        session.setup(Some(Box::new(
            |host: &mut dyn Host| -> Result<(), ContextError> {
                match host.active_viewport() {
                    Some(viewport) => println!("  context from {viewport}"),
                    None => println!("  context from nowhere"),
                }
                Ok(())
            },
        )));
    } else {
        session.setup(None);
    }

    if args.commands.is_empty() {
        println!("{}", session.status(&host)?);
        return Ok(());
    }

    for line in &args.commands {
        let report = session.run_line(&mut host, line)?;
        let events = host.drain_events();
        session.handle_events(&mut host, events);
        println!("> {line}\n{report}");
        session.render_context(&mut host)?;
    }

    Ok(())
}
