//! Prints the fine owed by a sequence of priorities.
//!
//! ```text
//!     fines 29 29 7 19 17 13 11 5 3 2
//!     echo "13 8 8 5 3 2 0" | fines --raw
//!     RUST_LOG=trace fines --demo
//! ```

use std::error::Error;
use std::io::{self, Read};

use avl_inversions::OrderStatisticTree;
use clap::Parser;
use tracing_subscriber::EnvFilter;

const DEMOS: [(&str, &[i32]); 2] = [
    ("mixed", &[29, 29, 7, 19, 17, 13, 11, 5, 3, 2]),
    ("descending with a tie", &[13, 8, 8, 5, 3, 2, 0]),
];

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
#[clap(allow_negative_numbers = true)]
struct Args {
    /// Priorities in arrival order.
    /// If none are given, whitespace-separated priorities are read from stdin.
    #[clap()]
    priorities: Vec<i32>,

    /// Run the built-in sample sequences instead of reading input
    #[clap(short, long)]
    demo: bool,

    /// Print the inversion count rather than the fine
    #[clap(short, long)]
    raw: bool,
}

fn read_stdin() -> Result<Vec<i32>, Box<dyn Error>> {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    let mut vs = Vec::new();
    for tok in input.split_whitespace() {
        vs.push(tok.parse::<i32>()?);
    }
    Ok(vs)
}

fn report(args: &Args, vs: &[i32]) -> String {
    let tree: OrderStatisticTree = vs.iter().copied().collect();
    tracing::info!(len = tree.len(), height = tree.height(), "tree built");
    if args.raw {
        tree.inversions().to_string()
    } else {
        tree.fines().to_string()
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    if args.demo {
        for (name, vs) in DEMOS.iter() {
            println!("{}: {}", name, report(&args, vs));
        }
        return Ok(());
    }

    let vs = if args.priorities.is_empty() {
        read_stdin()?
    } else {
        args.priorities.clone()
    };

    println!("{}", report(&args, &vs));
    Ok(())
}
