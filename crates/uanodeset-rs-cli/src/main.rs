// crates/uanodeset-rs-cli/src/main.rs
//! Exports the address space of an OPC UA endpoint to a NodeSet2 XML file.
//!
//! Usage:
//!   uanodeset-export file://plant.json nodes.xml
//!   uanodeset-export plant.json nodes.xml -n 2 -v
//!
//! Log verbosity defaults to `info` and follows `RUST_LOG` when set.

use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;
use uanodeset_rs::{
    AddressSpace, Connector, Credentials, ExportError, ExportOptions, ExportPipeline,
    NamespaceRegistry, SnapshotConnector, tally, traverse,
};

/// Progress is logged every this many nodes.
const PROGRESS_INTERVAL: usize = 1000;

#[derive(Parser, Debug)]
#[command(name = "uanodeset-export")]
#[command(about = "Export Node XML from an OPC UA server", version)]
struct Args {
    /// Complete URL of the OPC UA server
    server_url: String,

    /// Save exported nodes in the specified XML file
    output_file: PathBuf,

    /// Export only the given namespace indices (repeatable)
    #[arg(short = 'n', long = "namespace", value_name = "INDEX")]
    namespaces: Vec<u16>,

    /// Username to connect to the server
    #[arg(short = 'u', long, default_value = "")]
    username: String,

    /// Password to connect to the server
    #[arg(short = 'p', long, default_value = "")]
    password: String,

    /// Also export the values of Variables
    #[arg(short = 'v', long = "values")]
    export_values: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            error!("Exiting ...");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), ExportError> {
    let credentials = Credentials {
        username: args.username,
        password: args.password,
    };

    // 1. Connect
    let session = SnapshotConnector.connect(&args.server_url, &credentials)?;
    info!("Client connected to {}", args.server_url);

    // 2. Namespace table
    let registry = NamespaceRegistry::from_session(&session)?;
    for index in 0..registry.len() {
        if let Some(uri) = u16::try_from(index).ok().and_then(|i| registry.uri(i)) {
            info!("NS{}: {}", index, uri);
        }
    }

    // 3. Collect the hierarchy
    info!("Starting to collect nodes. This may take some time ...");
    let traversal = traverse(
        &session,
        &session.root_node(),
        &mut progress_logger("Nodes collected"),
    );
    info!("All nodes collected");

    // 4. Statistics
    let stats = tally(&session, &traversal.nodes);
    stats.log_summary(&registry);

    // 5. Export
    let options = ExportOptions::default()
        .with_namespaces(args.namespaces)
        .with_values(args.export_values);
    let pipeline = ExportPipeline::new(&session, &registry, options);
    let report = pipeline.run(
        &traversal.nodes,
        &args.output_file,
        &mut progress_logger("Nodes exported"),
    )?;

    info!(
        "Exported {} of {} selected nodes ({} skipped, {} aliases)",
        report.exported,
        report.selected,
        report.skipped.len(),
        report.aliases
    );
    Ok(())
}

fn progress_logger(label: &'static str) -> impl FnMut(usize) {
    move |count| {
        if count % PROGRESS_INTERVAL == 0 {
            info!("{}: {}", label, count);
        }
    }
}
