use clap::{Parser, Subcommand};
use frameglass::config::{self, Overrides};
use frameglass::pairing::PairingPolicy;
use frameglass::{output, parse, pipeline};
use std::path::PathBuf;
use tracing::Level;

/// Shared flags for commands that pair photos.
#[derive(clap::Args, Clone)]
struct PairingArgs {
    /// Pairing policy (overrides the config file)
    #[arg(long, value_enum)]
    policy: Option<PairingPolicy>,

    /// Seed for random permutations, for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Shuffle the complete frameglass list after pairing (shuffled policy only)
    #[arg(long)]
    final_shuffle: bool,
}

impl PairingArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            pairing_policy: self.policy,
            random_seed: self.seed,
            final_shuffle: self.final_shuffle,
        }
    }
}

#[derive(Parser)]
#[command(name = "frameglass")]
#[command(about = "Group tagged photos into slideshow frameglasses")]
#[command(long_about = "\
Group tagged photos into slideshow frameglasses

Input format:

  3                 # number of photos that follow
  L 2 cat dog       # <L|P> <tag_count> <tags...>
  P 1 sun
  P 1 moon

Output format:

  2                 # number of frameglasses
  0                 # a Landscape on its own
  1 2               # two Portraits together

Photo ids are 0-based positions in the input. With an odd number of
Portraits, one is left out.

Run 'frameglass gen-config' to generate a documented frameglass.toml.")]
#[command(version)]
struct Cli {
    /// Config file (ignored if it does not exist)
    #[arg(long, default_value = config::CONFIG_FILENAME, global = true)]
    config: PathBuf,

    /// Log pipeline details to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse, pair and write the output file
    Build {
        /// Input photo list
        #[arg(long)]
        input: PathBuf,
        /// Output file (replaced if it exists)
        #[arg(long)]
        output: PathBuf,
        #[command(flatten)]
        pairing: PairingArgs,
    },
    /// Validate an input file without writing anything
    Check {
        /// Input photo list
        #[arg(long)]
        input: PathBuf,
    },
    /// Print the frameglasses with their tags as JSON
    Inspect {
        /// Input photo list
        #[arg(long)]
        input: PathBuf,
        #[command(flatten)]
        pairing: PairingArgs,
    },
    /// Print a stock frameglass.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Build {
            input,
            output: output_path,
            pairing,
        } => {
            let run_config = config::load_config(&cli.config, &pairing.overrides())?;
            let summary = pipeline::run(&input, &output_path, &run_config)?;
            output::print_build_output(&summary, run_config.pairing_policy, &output_path);
        }
        Command::Check { input } => {
            println!("==> Checking {}", input.display());
            let photos = parse::parse_file(&input)?;
            output::print_check_output(&photos);
            println!("==> Input is valid");
        }
        Command::Inspect { input, pairing } => {
            let run_config = config::load_config(&cli.config, &pairing.overrides())?;
            let summary = pipeline::preview(&input, &run_config)?;
            println!(
                "{}",
                output::format_inspect_json(&summary, run_config.pairing_policy)?
            );
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Install the stderr log subscriber. Warnings only unless `--verbose`.
fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
