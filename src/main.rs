use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};

use podscout::{
    CachingClient, CountryCode, DiscoveryOptions, DiscoveryOutcome, DiscoveryPreferences,
    NUM_SUGGESTIONS, NoopReporter, ProgressEvent, ProgressReporter, ReqwestClient, SearchResult,
    SharedProgressReporter, SubscribedFeed, default_cache_dir, default_preferences_path,
    device_default_region, discover, read_preferences, read_subscriptions, write_preferences,
};

// Emoji with fallback for terminals without Unicode support
static MICROPHONE: Emoji<'_, '_> = Emoji("🎙️  ", "");
static SEARCH: Emoji<'_, '_> = Emoji("🔍 ", "[~] ");
static GLOBE: Emoji<'_, '_> = Emoji("🌍 ", "[>] ");
static SUCCESS: Emoji<'_, '_> = Emoji("✅ ", "[+] ");
static FAILURE: Emoji<'_, '_> = Emoji("❌ ", "[!] ");
static HIDDEN: Emoji<'_, '_> = Emoji("🙈 ", "[-] ");
static QUESTION: Emoji<'_, '_> = Emoji("❓ ", "[?] ");

/// Discover popular podcasts you are not subscribed to yet
#[derive(Parser, Debug)]
#[command(name = "podscout")]
#[command(about = "Discover popular podcasts from the iTunes top charts")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Country for this run only (two letters, or 99 for the device default)
    #[arg(short = 'C', long)]
    country: Option<CountryCode>,

    /// Maximum number of suggestions
    #[arg(short, long, default_value_t = NUM_SUGGESTIONS)]
    limit: usize,

    /// JSON file listing subscribed feeds ([{"title": ..., "author": ...}])
    #[arg(short, long)]
    subscriptions: Option<PathBuf>,

    /// Print suggestions as JSON
    #[arg(long)]
    json: bool,

    /// Agree to contact the iTunes catalog and remember the choice
    #[arg(short, long)]
    yes: bool,

    /// Quiet mode - suppress progress output
    #[arg(short, long)]
    quiet: bool,

    /// Path of the discovery preferences file
    #[arg(long, env = "PODSCOUT_PREFS")]
    prefs: Option<PathBuf>,

    /// Directory for cached toplist responses
    #[arg(long, env = "PODSCOUT_CACHE_DIR")]
    cache_dir: Option<PathBuf>,

    /// Always fetch from the network, ignoring and not updating the cache
    #[arg(long)]
    no_cache: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Remember a country for discovery (99 resets to the device default)
    Country { code: CountryCode },
    /// Switch discovery off
    Hide,
    /// Switch discovery back on
    Show,
    /// Agree to contact the iTunes catalog
    Confirm,
    /// Print the current discovery preferences
    Status,
}

/// Progress reporter using an indicatif spinner for terminal output
struct SpinnerReporter {
    bar: ProgressBar,
}

impl SpinnerReporter {
    fn new() -> Self {
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());

        let bar = ProgressBar::new_spinner();
        bar.set_style(style);
        bar.enable_steady_tick(std::time::Duration::from_millis(100));

        Self { bar }
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressReporter for SpinnerReporter {
    fn report(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::FetchingToplist { country, url } => {
                self.bar.set_message(format!(
                    "{SEARCH}Fetching top podcasts for {}: {}",
                    country.bold(),
                    url.dimmed()
                ));
            }

            ProgressEvent::FallingBackToRegion {
                failed_country,
                fallback_country,
                error,
            } => {
                self.bar.println(format!(
                    "{GLOBE}{} failed ({}), trying {}",
                    failed_country.yellow(),
                    error.dimmed(),
                    fallback_country.cyan()
                ));
            }

            ProgressEvent::ToplistParsed { entries } => {
                self.bar
                    .set_message(format!("{} podcasts in toplist", entries.to_string().cyan()));
            }

            ProgressEvent::SubscribedFiltered {
                candidates, kept, ..
            } => {
                self.bar.set_message(format!(
                    "{} of {} not subscribed yet",
                    kept.to_string().green(),
                    candidates.to_string().cyan()
                ));
            }
        }
    }
}

fn print_results(results: &[SearchResult]) {
    println!("{SUCCESS}{}\n", "Top podcasts for you".bold().green());
    for (rank, result) in results.iter().enumerate() {
        println!(
            "{:>3}. {}",
            (rank + 1).to_string().cyan(),
            result.title.bold()
        );
        if let Some(author) = &result.author {
            println!("     {}", author.dimmed());
        }
        if let Some(feed_url) = &result.feed_url {
            println!("     {}", feed_url.as_str().blue());
        }
    }
}

fn print_preferences(prefs: &DiscoveryPreferences) {
    let country = match &prefs.country_code {
        CountryCode::Unset => format!("device default ({})", device_default_region()),
        CountryCode::Region(code) => code.clone(),
    };
    println!("Country:      {}", country.cyan());
    println!(
        "Discovery:    {}",
        if prefs.hidden {
            "hidden".yellow()
        } else {
            "shown".green()
        }
    );
    println!(
        "Confirmation: {}",
        if prefs.needs_confirm {
            "pending".yellow()
        } else {
            "given".green()
        }
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let prefs_path = match args.prefs {
        Some(path) => path,
        None => default_preferences_path().context("Failed to locate preferences")?,
    };
    let mut prefs = read_preferences(&prefs_path).context("Failed to load preferences")?;

    if let Some(command) = args.command {
        match command {
            Command::Country { code } => prefs.select_country(code),
            Command::Hide => prefs.set_hidden(true),
            Command::Show => prefs.set_hidden(false),
            Command::Confirm => prefs.confirm(),
            Command::Status => {
                print_preferences(&prefs);
                return Ok(());
            }
        }
        write_preferences(&prefs_path, &prefs).context("Failed to save preferences")?;
        print_preferences(&prefs);
        return Ok(());
    }

    if args.yes && prefs.needs_confirm {
        prefs.confirm();
        write_preferences(&prefs_path, &prefs).context("Failed to save preferences")?;
    }

    let subscribed: Vec<SubscribedFeed> = match &args.subscriptions {
        Some(path) => read_subscriptions(path).context("Failed to load subscriptions")?,
        None => Vec::new(),
    };

    let show_progress = !args.quiet && !args.json;
    if show_progress {
        println!(
            "\n{}{} {}\n",
            MICROPHONE,
            "podscout".bold().magenta(),
            "- Podcast Discovery".dimmed()
        );
    }

    let spinner = show_progress.then(|| Arc::new(SpinnerReporter::new()));
    let reporter: SharedProgressReporter = match &spinner {
        Some(spinner) => spinner.clone(),
        None => NoopReporter::shared(),
    };

    let options = DiscoveryOptions {
        country_override: args.country,
        limit: args.limit,
        ..DiscoveryOptions::default()
    };

    let outcome = if args.no_cache {
        discover(&ReqwestClient::new(), &prefs, &options, &subscribed, &reporter).await
    } else {
        let cache_dir = match args.cache_dir {
            Some(dir) => dir,
            None => default_cache_dir().context("Failed to locate cache directory")?,
        };
        let client = CachingClient::new(ReqwestClient::new(), cache_dir);
        discover(&client, &prefs, &options, &subscribed, &reporter).await
    };

    if let Some(spinner) = &spinner {
        spinner.finish();
    }

    match outcome {
        DiscoveryOutcome::Loaded(results) => {
            if args.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&results).context("Failed to encode results")?
                );
            } else {
                print_results(&results);
            }
        }
        DiscoveryOutcome::NoResults => {
            if args.json {
                println!("[]");
            } else {
                println!("{}", "No results found.".yellow());
            }
        }
        DiscoveryOutcome::Hidden => {
            eprintln!(
                "{HIDDEN}Discovery is hidden. Run {} to show it again.",
                "podscout show".cyan()
            );
        }
        DiscoveryOutcome::NeedsConfirmation => {
            eprintln!(
                "{QUESTION}Suggestions are loaded from the iTunes catalog. Run {} or pass {} to continue.",
                "podscout confirm".cyan(),
                "--yes".cyan()
            );
        }
        DiscoveryOutcome::Failed {
            message,
            no_data_for_region,
        } => {
            eprintln!("{FAILURE}{}", message.red());
            if no_data_for_region {
                eprintln!(
                    "Pick another country with {} and try again.",
                    "podscout country <CODE>".cyan()
                );
            } else {
                eprintln!("Check your connection and try again.");
            }
            std::process::exit(1);
        }
    }

    Ok(())
}
