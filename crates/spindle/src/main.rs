use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use spindle::{EntryList, Label, Palette, Session, SessionOptions, generate_colors};

/// Largest wheel `spindle colors` will print.
const MAX_COLOR_COUNT: u64 = 100_000;

#[derive(Parser, Debug)]
#[command(name = "spindle", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Spin a wheel without a window and print each winner
    Spin {
        /// An entry on the wheel; repeat for more (defaults to Option 1..6)
        #[arg(short = 'e', long = "entry")]
        entries: Vec<String>,

        /// How many spins to run
        #[arg(short = 'n', long, default_value_t = 1)]
        times: usize,

        /// Seed for reproducible spins
        #[arg(short = 's', long)]
        seed: Option<u64>,
    },
    /// Print the slice colors generated for a wheel of COUNT entries
    Colors {
        #[arg(value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(0..=MAX_COLOR_COUNT))]
        count: usize,

        /// Use the six primary colors instead of the default palette
        #[arg(long)]
        primary: bool,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Spin {
            entries,
            times,
            seed,
        } => spin(entries, times, seed),
        Commands::Colors { count, primary } => {
            let palette = if primary {
                Palette::primary()
            } else {
                Palette::default()
            };
            for color in generate_colors(&palette, count) {
                println!("{color}");
            }
            Ok(())
        }
    }
}

fn spin(entries: Vec<String>, times: usize, seed: Option<u64>) -> anyhow::Result<()> {
    let mut options = SessionOptions::default();
    if !entries.is_empty() {
        options.entries = EntryList::from_labels(entries.into_iter().map(Label::new))?;
    }

    let rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
    let mut session = Session::with_rng(options, rng);

    for _ in 0..times {
        // nothing to animate, so the spin settles as soon as it starts
        let handle = session.request_spin()?;
        let winner = session.complete_spin(&handle)?;
        println!("{} ({})", winner.label(), winner.color());
    }
    Ok(())
}
