use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use feature_tally::{features, FeatureParser, FrequencyStore, LineParser};

mod io_pipe;
use io_pipe::IoPipe;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Count values of a feature property in a GeoJSON-style document.
    ///
    /// The document can have its features either in a top-level `features`
    /// array or in `featureContainer.features`.
    Features {
        /// Property under each feature's `properties` to count.
        #[arg(short, long, default_value = features::DEFAULT_ATTRIBUTE)]
        attribute: String,

        #[command(flatten)]
        io: IoArgs,
    },

    /// Count what follows a `"tag":` marker on lines of a text file.
    Lines {
        // Tag comes after the input path, so spell out IoArgs by hand.
        /// Input file path, use '-' for stdin.
        #[arg(required = true)]
        input: PathBuf,

        /// Tag to look for. It gets wrapped in double quotes unless --raw is
        /// given.
        #[arg(required = true)]
        tag: String,

        /// Match the tag exactly as given, without adding quotes.
        #[arg(long)]
        raw: bool,

        /// Also list counts for every value found.
        #[arg(short = 'H', long)]
        histogram: bool,

        /// Output file path, defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

use Commands::*;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Features { attribute, io } => {
            let io = IoPipe::try_from(io)?;
            let mut store = FrequencyStore::new();
            let mut parser =
                FeatureParser::new(io.source()).with_attribute(attribute);
            parser.parse(&mut store)?;
            io.report(&parser, &store)
        }

        Lines {
            input,
            tag,
            raw,
            histogram,
            output,
        } => {
            let io = IoPipe::try_from(IoArgs {
                input,
                histogram,
                output,
            })?;
            let tag = line_tag(tag, raw);

            let mut store = FrequencyStore::new();
            let mut parser = LineParser::new(io.source());
            parser.parse(&tag, &mut store)?;
            log::info!(
                "{} matching lines, {} distinct values",
                parser.matched(),
                store.len()
            );
            io.report(&parser, &store)
        }
    }
}

/// Tags are matched as JSON-style keys, `user` becomes `"user"`.
fn line_tag(tag: String, raw: bool) -> String {
    if raw {
        tag
    } else {
        format!("\"{tag}\"")
    }
}

/// Input and output options shared by the subcommands.
#[derive(Debug, Args, Clone)]
pub struct IoArgs {
    /// Input file path, use '-' for stdin.
    #[arg(required = true)]
    input: PathBuf,

    /// Also list counts for every value found.
    #[arg(short = 'H', long)]
    histogram: bool,

    /// Output file path, defaults to stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}
