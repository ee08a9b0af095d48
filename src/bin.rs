use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use itertools::Itertools;
use log::info;
use rand::{rngs::SmallRng, Rng, SeedableRng};

use orbitswap::{
    deck::Deck,
    game::{CardGame, GameConfig, GameReport, Verdict},
    render::{render_grid, render_sorted},
    swap::Swap,
    verify::BatchVerifier,
};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        for cause in err.chain().skip(1) {
            eprintln!("  caused by: {cause}");
        }
        std::process::exit(1);
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "orbitswap",
    about = "Find the single card swaps that let every prisoner find their card in half the deck."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Shuffle a deck and analyse it.
    Play(PlayArgs),
    /// Check that every shuffle in a range admits a solving swap.
    Verify(VerifyArgs),
}

#[derive(Args, Debug)]
struct PlayArgs {
    /// Number of cards: 4, 8, 16 or 32.
    #[arg(long, value_name = "N", default_value_t = 8)]
    cards: usize,
    /// Shuffle to play, between 1 and N!. Drawn at random when absent.
    #[arg(long, value_name = "S")]
    seed: Option<u128>,
    /// Do not try every single swap.
    #[arg(long)]
    skip_brute_force: bool,
    /// Do not propose swaps from the orbits.
    #[arg(long)]
    skip_orbits: bool,
    /// Print the shuffled and sorted grids.
    #[arg(long)]
    grid: bool,
}

#[derive(Args, Debug)]
struct VerifyArgs {
    /// Number of cards: 4, 8, 16 or 32.
    #[arg(long, value_name = "N", default_value_t = 4)]
    cards: usize,
    /// First seed to check (defaults to 1).
    #[arg(long, value_name = "S")]
    first: Option<u128>,
    /// Last seed to check (defaults to N!).
    #[arg(long, value_name = "S")]
    last: Option<u128>,
}

fn run() -> Result<()> {
    match Cli::parse().command {
        Command::Play(args) => play(args),
        Command::Verify(args) => verify(args),
    }
}

fn play(args: PlayArgs) -> Result<()> {
    let deck = Deck::new(args.cards).context("invalid deck")?;
    let seed = match args.seed {
        Some(seed) => seed,
        None => {
            let seed = SmallRng::from_entropy().gen_range(1..=deck.seed_count());
            info!("Drew seed {seed}");
            seed
        }
    };
    let config = GameConfig::new(args.cards, seed)
        .with_brute_force(!args.skip_brute_force)
        .with_orbits(!args.skip_orbits);
    let game = CardGame::new(config).context("could not start the game")?;

    println!("A new game has started!");
    println!("-----");
    if args.grid {
        println!("The initial configuration (before swap, seed = {seed}) is given below.");
        println!(
            "{}",
            render_grid(
                game.original_board(),
                Some("Initial mixed up configuration (before swap)")
            )
        );
        println!("The sorted configuration (for reference) is given below.");
        println!(
            "{}",
            render_sorted(deck, Some("Sorted configuration (for reference)"))
        );
    } else {
        println!("Playing {} cards with seed {seed}.", deck.len());
    }

    let report = game
        .play()
        .with_context(|| format!("failed to analyse seed {seed}"))?;
    print_results(&report);
    Ok(())
}

fn swap_list(swaps: &[Swap]) -> String {
    format!("[{}]", swaps.iter().map(|s| format!("'{s}'")).join(", "))
}

fn print_results(report: &GameReport) {
    println!("-----");
    println!("Final results.");

    if let Some(brute_force) = &report.brute_force {
        println!("-");
        if brute_force.is_solvable() {
            println!(
                "The possible swaps (obtained via brute force) are:\n{}.",
                swap_list(&report.solving_swaps())
            );
        } else {
            println!("No swap seems to work in this configuration, according to brute force...");
        }
    }

    if report.proposal.is_some() {
        println!("-");
        println!(
            "Below are some proposed swaps (obtained via orbit investigation):\n{}.",
            swap_list(report.proposed_swaps())
        );
    }

    match report.verdict {
        Some(Verdict::Split(check)) => {
            println!("-");
            println!("The configuration admits an orbit whose length is strictly larger than half of the cards: true.");
            println!(
                "The proposed swaps are contained in the ones proposed by brute force: {}.",
                check.contained
            );
            println!(
                "The proposed swaps match exactly with the one computed via brute force: {}.",
                check.exact
            );
        }
        Some(Verdict::AlreadyStable(stable)) => {
            println!("-");
            println!("The configuration is already stable and requires no swap: {stable}.");
        }
        None => {}
    }
}

fn verify(args: VerifyArgs) -> Result<()> {
    let mut verifier = BatchVerifier::new(args.cards).context("invalid deck")?;
    if args.first.is_some() || args.last.is_some() {
        let all = verifier.seeds();
        verifier = verifier
            .with_seeds(
                args.first.unwrap_or(*all.start()),
                args.last.unwrap_or(*all.end()),
            )
            .context("invalid seed range")?;
    }

    let progress = ProgressBar::new(u64::try_from(verifier.len()).unwrap_or(u64::MAX));
    progress.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] {wide_bar:.cyan/blue} {pos}/{len} {msg}",
        )
        .context("invalid progress template")?
        .progress_chars("=>-"),
    );
    let report = verifier.run(|| progress.inc(1));
    progress.finish_and_clear();
    let report = report.context("verification failed")?;

    let cards = verifier.deck().len();
    match &report.counterexample {
        None => println!(
            "All configurations seem to work: our strategy is valid for {cards} cards! ({} checked)",
            report.checked
        ),
        Some(counterexample) => {
            println!(
                "Mixed configuration {} does not admit a swap that works...",
                counterexample.seed
            );
            println!(
                "Tried {} swaps out of {} possible ones.",
                counterexample.trials, counterexample.max_trials
            );
            println!("Displaying failing configuration below.");
            println!(
                "{}",
                render_grid(
                    &counterexample.board,
                    Some("A counter-example of a failing mix of cards")
                )
            );
        }
    }
    Ok(())
}
