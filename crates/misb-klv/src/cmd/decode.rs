use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use misb_klv_decode::{decode, DecodeOptions, PacketBatch, PacketReader, ReaderConfig};
use tracing::info;

use crate::cmd::DecodeArgs;
use crate::exit::{decode_error, io_error, CliError, CliResult, DATA_INVALID, SUCCESS, USAGE};
use crate::output::{print_batch, OutputFormat};

#[derive(Debug, Default)]
struct Totals {
    packets: usize,
    dropped: usize,
}

impl Totals {
    fn add(&mut self, batch: &PacketBatch) {
        self.packets += batch.packets.len();
        self.dropped += batch.dropped_count;
    }
}

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let options = resolve_options(&args)?;
    let mut input = open_input(&args.input)?;
    let mut totals = Totals::default();

    if args.one_shot {
        let mut buf = Vec::new();
        input
            .read_to_end(&mut buf)
            .map_err(|err| io_error("failed reading input", err))?;
        let batch = decode(&buf, &options);
        totals.add(&batch);
        print_batch(&batch, format);
    } else {
        let config = ReaderConfig {
            chunk_size: args.chunk_size,
            options,
        };
        for batch in PacketReader::with_config(input, config) {
            let batch = batch.map_err(|err| decode_error("failed reading input", err))?;
            if batch.is_empty() {
                continue;
            }
            totals.add(&batch);
            print_batch(&batch, format);
        }
    }

    info!(
        packets = totals.packets,
        dropped = totals.dropped,
        "decode finished"
    );

    if args.fail_on_drop && totals.dropped > 0 {
        return Err(CliError::new(
            DATA_INVALID,
            format!("{} packet(s) dropped", totals.dropped),
        ));
    }
    Ok(SUCCESS)
}

/// Options file first, then explicit flags on top.
fn resolve_options(args: &DecodeArgs) -> CliResult<DecodeOptions> {
    let mut options = match &args.options {
        Some(path) => load_options(path)?,
        None => DecodeOptions::default(),
    };

    if args.keep_undefined {
        options.remove_undefined_keys = false;
    }
    if args.strict_checksum {
        options.strict_checksum = true;
    }
    if args.log_key_values {
        options.log_key_values = true;
    }
    if args.log_errors {
        options.log_errors = true;
    }
    Ok(options)
}

fn load_options(path: &Path) -> CliResult<DecodeOptions> {
    let text = std::fs::read_to_string(path)
        .map_err(|err| io_error(&format!("failed reading {}", path.display()), err))?;
    serde_json::from_str(&text).map_err(|err| {
        CliError::new(
            USAGE,
            format!("invalid options file {}: {err}", path.display()),
        )
    })
}

fn open_input(path: &Path) -> CliResult<Box<dyn Read>> {
    if path == Path::new("-") {
        return Ok(Box::new(io::stdin().lock()));
    }
    let file = File::open(path)
        .map_err(|err| io_error(&format!("failed opening {}", path.display()), err))?;
    Ok(Box::new(file))
}
