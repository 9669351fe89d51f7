use aivdm::{Decoder, Parser, DEFAULT_REASSEMBLY_TTL_SECS};
use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, Command};
use log::{debug, error, info};
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use std::time::Duration;

const READ_CHUNK_SIZE: usize = 4096;

fn cli() -> Command {
    Command::new("AIS sentence decoder")
        .author(clap::crate_authors!())
        .version(clap::crate_version!())
        .about("Decodes !AIVDM/!AIVDO sentences into one JSON object per message")
        .arg(
            Arg::new("input")
                .value_name("FILE")
                .required(false)
                .value_parser(value_parser!(PathBuf))
                .help("File with one NMEA sentence per line, stdin when omitted"),
        )
        .arg(
            Arg::new("ttl-secs")
                .value_name("ttl-secs")
                .long("ttl-secs")
                .required(false)
                .value_parser(value_parser!(u64))
                .help("Seconds a multi-sentence message may take to fully arrive [default: 10]"),
        )
        .arg(
            Arg::new("skip-unsupported")
                .long("skip-unsupported")
                .action(ArgAction::SetTrue)
                .help("Do not report message types without a decoder"),
        )
        .arg(
            Arg::new("pretty")
                .long("pretty")
                .action(ArgAction::SetTrue)
                .help("Pretty-print the JSON output"),
        )
}

#[derive(Debug, Default)]
struct Stats {
    decoded: usize,
    unsupported: usize,
    rejected: usize,
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .format_timestamp(None)
        .filter_level(log::LevelFilter::Info)
        .parse_env("RUST_LOG")
        .init();

    let matches = cli().get_matches();
    let ttl_secs = matches
        .get_one::<u64>("ttl-secs")
        .copied()
        .unwrap_or(DEFAULT_REASSEMBLY_TTL_SECS);
    let skip_unsupported = matches.get_flag("skip-unsupported");
    let pretty = matches.get_flag("pretty");

    let mut reader: Box<dyn Read> = match matches.get_one::<PathBuf>("input") {
        Some(path) => Box::new(
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
        ),
        None => Box::new(io::stdin().lock()),
    };

    let decoder = Decoder::builder()
        .with_ttl(Duration::from_secs(ttl_secs))
        .build();
    let mut parser = Parser::new(decoder);
    let mut out = BufWriter::new(io::stdout().lock());
    let mut stats = Stats::default();
    let mut buf = [0u8; READ_CHUNK_SIZE];

    loop {
        let n = reader.read(&mut buf).context("Failed to read input")?;
        // A final line without terminator still counts
        let data: &[u8] = if n == 0 { b"\n" } else { &buf[..n] };
        for result in parser.consume(data) {
            match result {
                Ok(msg) => {
                    stats.decoded += 1;
                    if pretty {
                        serde_json::to_writer_pretty(&mut out, &msg)?;
                    } else {
                        serde_json::to_writer(&mut out, &msg)?;
                    }
                    writeln!(out)?;
                },
                Err(err) if err.is_unsupported() => {
                    stats.unsupported += 1;
                    if !skip_unsupported {
                        info!("{}", err);
                    }
                },
                Err(err) => {
                    stats.rejected += 1;
                    debug!("{:?}", err);
                },
            }
        }
        if n == 0 {
            break;
        }
    }
    out.flush()?;

    for err in parser.decoder().sweep() {
        error!("{}", err);
        stats.rejected += 1;
    }
    let pending = parser.decoder().reassembler().pending();
    info!(
        "Decoded {} message(s), {} unsupported, {} rejected, {} incomplete",
        stats.decoded, stats.unsupported, stats.rejected, pending
    );
    Ok(())
}
