use clap::{
    ArgAction, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use ncmscrape::{cli, config, error};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Log in by scanning a QR code with the mobile app
    Login,

    /// Collect playlists, tracks and artists
    Collect(CollectOptions),

    /// Collect artist profiles, albums and album sales
    Discography(DiscographyOptions),

    /// Show snapshots and exports on disk
    Status,

    /// Inspect or clear the response caches
    Cache(CacheOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct CollectOptions {
    /// Playlist category; can be repeated (default: NCM_CATEGORIES or built-in list)
    #[clap(long = "category", action = ArgAction::Append, num_args = 1)]
    pub categories: Vec<String>,

    /// Discard catalog snapshots and collect every stage again
    #[clap(long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DiscographyOptions {
    /// Artist id; can be repeated (default: NCM_ARTIST_IDS or collected artists)
    #[clap(long = "artist", action = ArgAction::Append, num_args = 1)]
    pub artist_ids: Vec<i64>,

    /// Discard discography snapshots and collect every stage again
    #[clap(long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
#[command(
    about = "Inspect or clear the response caches",
    args_conflicts_with_subcommands = true
)]
pub struct CacheOptions {
    #[command(subcommand)]
    pub command: Option<CacheSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CacheSubcommand {
    /// Remove cached responses (both caches unless one is selected)
    Clear(CacheClearOpts),
}

#[derive(Parser, Debug, Clone)]
pub struct CacheClearOpts {
    /// Clear the playlist tracks cache
    #[clap(long)]
    pub tracks: bool,

    /// Clear the artist detail cache
    #[clap(long)]
    pub artists: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Login => cli::login().await,
        Command::Collect(opt) => cli::collect(opt.categories, opt.force).await,
        Command::Discography(opt) => cli::discography(opt.artist_ids, opt.force).await,
        Command::Status => cli::status().await,
        Command::Cache(opt) => match opt.command {
            Some(CacheSubcommand::Clear(c)) => cli::clear_caches(c.tracks, c.artists).await,
            None => cli::caches().await,
        },
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
