use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::{LevelFilter, error, info};
use nodal_model::ModelConfig;
use nodal_netlist::NetlistConfig;

use crate::{script::parse_script, session::Session};

mod script;
mod session;

#[derive(Parser, Debug)]
#[command(
    name = "nodal_cli",
    about = "Replays schematic edits and reports the circuit nodes they form",
    version
)]
struct Args {
    /// Edit script, one command per line. Reads stdin when omitted.
    #[arg(value_name = "SCRIPT")]
    script: Option<PathBuf>,

    /// Print the SPICE deck instead of the node table
    #[arg(long, conflicts_with = "json")]
    netlist: bool,

    /// Print components, wires and nodes as JSON
    #[arg(long)]
    json: bool,

    /// Deck title for --netlist and the `netlist` command
    #[arg(long, default_value = "Circuit")]
    title: String,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let input = match &args.script {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("failed to read stdin")?;
            input
        }
    };

    let commands = parse_script(&input)?;
    info!("running {} command(s)", commands.len());

    let netlist = NetlistConfig {
        title: args.title,
        ..Default::default()
    };
    let mut session = Session::new(ModelConfig::default(), netlist);
    for (line, command) in &commands {
        match session.execute(command) {
            Ok(output) if !output.is_empty() => println!("{}", output.trim_end()),
            Ok(_) => {}
            Err(e) => error!("line {line}: {e}"),
        }
    }
    let model = session.model();
    info!(
        "{} component(s), {} wire(s), {} node(s)",
        model.components().count(),
        model.wires().count(),
        model.nodes().count()
    );

    if args.netlist {
        print!("{}", session.netlist()?);
    } else if args.json {
        println!("{}", session.to_json()?);
    } else {
        print!("{}", session.node_table());
    }
    Ok(())
}
