use std::{
    fs::File,
    io::{self, BufReader},
    path::PathBuf,
};

use clap::{Parser, Subcommand, ValueEnum};
use generative::{cursor::Tokenizer, pipeline};
use rand::{rngs::StdRng, SeedableRng};

#[derive(Parser, Debug)]
#[clap(author = "Nick Hu", version, about)]
/// Generator-style lazy pipelines
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Tee the lines of a file and split each into whitespace-separated fields
    Split {
        /// input file
        #[arg(default_value = "z.txt")]
        path: PathBuf,
        /// how lines are cut into fields
        #[arg(long, value_enum, default_value_t)]
        tokenizer: TokenizerArg,
    },
    /// Print a bounded stream of uniform random numbers in [0, 1)
    Random {
        /// how many numbers to print
        #[arg(short = 'n', long, default_value_t = 5)]
        count: usize,
        /// seed for a reproducible stream; drawn from the OS otherwise
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum TokenizerArg {
    /// runs of space, tab, CR and LF
    #[default]
    Ascii,
    /// runs of any Unicode whitespace
    Whitespace,
}

impl From<TokenizerArg> for Tokenizer {
    fn from(arg: TokenizerArg) -> Self {
        match arg {
            TokenizerArg::Ascii => Tokenizer::AsciiFields,
            TokenizerArg::Whitespace => Tokenizer::Whitespace,
        }
    }
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();
    let args = Args::parse();
    let mut out = io::stdout().lock();

    match args.command {
        Command::Split { path, tokenizer } => {
            let tokenizer = Tokenizer::from(tokenizer);
            let file = File::open(&path).inspect_err(|e| {
                tracing::error!("Failed to open {}: {}", path.display(), e);
            })?;
            tracing::debug!("Splitting {} with {:?}", path.display(), tokenizer);
            pipeline::split_report(BufReader::new(file), tokenizer, &mut out)
        }
        Command::Random { count, seed } => {
            let rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            pipeline::random_report(rng, count, &mut out)
        }
    }
}
