use clap::{Args, Subcommand};
use std::path::PathBuf;

use misb_klv_decode::DEFAULT_CHUNK_SIZE;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod decode;
pub mod tags;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode KLV packets from a file or stdin.
    Decode(DecodeArgs),
    /// Print the field decode table.
    Tags(TagsArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Decode(args) => decode::run(args, format),
        Command::Tags(args) => tags::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Input file, or `-` for stdin.
    pub input: PathBuf,
    /// Read the whole input and decode it as one buffer.
    #[arg(long)]
    pub one_shot: bool,
    /// Exit with code 60 when any packet was dropped.
    #[arg(long)]
    pub fail_on_drop: bool,
    /// Bytes read per chunk when streaming.
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,
    /// JSON file with decode options (camelCase keys).
    #[arg(long, value_name = "FILE", env = "MISB_KLV_OPTIONS")]
    pub options: Option<PathBuf>,
    /// Keep fields that have no decoded value.
    #[arg(long)]
    pub keep_undefined: bool,
    /// Drop packets whose checksum does not match.
    #[arg(long)]
    pub strict_checksum: bool,
    /// Emit a debug event per decoded field.
    #[arg(long)]
    pub log_key_values: bool,
    /// Emit a warning per dropped packet.
    #[arg(long)]
    pub log_errors: bool,
}

#[derive(Args, Debug, Default)]
pub struct TagsArgs {
    /// Only show this tag.
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=142))]
    pub tag: Option<u8>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
