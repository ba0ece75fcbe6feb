//! Tessitura CLI - Command-line interface for the tessitura synthesizer.

mod commands;
mod keymap;
mod score;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tessitura")]
#[command(author, version, about = "Tessitura polyphonic synthesizer CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a single note
    Note(commands::note::NoteArgs),

    /// Resolve a chord notation and play its notes together
    Chord(commands::chord::ChordArgs),

    /// Arpeggiate a chord's notes in a ping-pong pattern
    Arp(commands::arp::ArpArgs),

    /// Drive press/release events from a score file or stdin
    Perform(commands::perform::PerformArgs),

    /// List audio output devices
    Devices(commands::devices::DevicesArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Note(args) => commands::note::run(args),
        Commands::Chord(args) => commands::chord::run(args),
        Commands::Arp(args) => commands::arp::run(args),
        Commands::Perform(args) => commands::perform::run(args),
        Commands::Devices(args) => commands::devices::run(args),
    }
}
