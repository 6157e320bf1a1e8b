//! `sdser` command-line entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use sdser_tool::{
    decode_packet, encode_call, init_logging, list_commands, load_call, render, OutputFormat,
    ToolConfig, ToolResult,
};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "sdser",
    version,
    about = "Encode and decode serialized SoftDevice BLE packets"
)]
struct Cli {
    /// YAML configuration file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,

    /// Override the configured output format.
    #[arg(long, value_enum)]
    output: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode a call file into a request packet.
    Encode {
        /// Call description (YAML, or JSON with a .json extension).
        #[arg(long, value_name = "FILE")]
        call: PathBuf,

        /// Encode buffer capacity in bytes.
        #[arg(long)]
        capacity: Option<usize>,
    },
    /// Decode a hex response packet.
    Decode {
        /// Call name; inferred from the opcode byte when omitted.
        #[arg(long)]
        command: Option<String>,

        /// Packet bytes in hex.
        hex: String,
    },
    /// List known calls.
    List,
}

fn run(cli: Cli) -> ToolResult<()> {
    let config = ToolConfig::load_or_default(cli.config.as_deref())?;
    init_logging(&config.log_level, cli.verbose)?;
    debug!(?config, "configuration loaded");

    let format = cli.output.unwrap_or(config.output);
    let text = match cli.command {
        Commands::Encode { call, capacity } => {
            let call = load_call(&call)?;
            let encoded = encode_call(&call, capacity.unwrap_or(config.capacity))?;
            render(&encoded, format)?
        }
        Commands::Decode { command, hex } => {
            let reply = decode_packet(command.as_deref(), &hex)?;
            render(&reply, format)?
        }
        Commands::List => render(&list_commands(), format)?,
    };
    println!("{}", text.trim_end());
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
