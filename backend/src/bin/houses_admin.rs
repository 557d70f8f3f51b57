use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use backend::config::Config;
use backend::storage::Store;
use backend::announcements::{self, NewAnnouncement};
use backend::{ledger, seed};

#[derive(Parser)]
#[command(name = "houses-admin", about = "Maintenance commands for the house points data directory")]
struct Cli {
    /// Data directory; defaults to HOUSES_DATA_DIR or the crate's data/ folder
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load the mock houses, captains, members, achievements and announcements
    Seed,
    /// Print the number of rows in every table
    Check,
    /// Add points to a house
    Award(PointsArgs),
    /// Remove points from a house
    Deduct(PointsArgs),
    /// List the latest point transactions, newest first
    Transactions {
        #[arg(long, default_value_t = ledger::RECENT_LIMIT)]
        limit: usize,
    },
    /// Post an announcement as a captain
    Announce {
        #[arg(long)]
        captain: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Delete one of a captain's own announcements
    RemoveAnnouncement {
        #[arg(long)]
        captain: String,
        #[arg(long)]
        id: u64,
    },
    /// Set the image of an announcement; omit --url to clear it
    SetImage {
        #[arg(long)]
        id: u64,
        #[arg(long)]
        url: Option<String>,
    },
}

#[derive(Args)]
struct PointsArgs {
    #[arg(long)]
    house: u64,
    #[arg(long)]
    points: i64,
    #[arg(long)]
    reason: String,
}

fn main() -> Result<()> {
    backend::init_tracing();
    let cli = Cli::parse();

    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => Config::from_env()?.data_dir,
    };
    let store = Store::open_or_create(&data_dir)?;

    match cli.command {
        Command::Seed => {
            let inserted = seed::seed(&store)?;
            println!("Mock data seeding completed ({} new rows)", inserted);
        }
        Command::Check => {
            let counts = store.counts()?;
            println!("=== TABLE CONTENT CHECK ({}) ===", data_dir.display());
            println!("Houses: {}", counts.houses);
            println!("Captains: {}", counts.captains);
            println!("Members: {}", counts.members);
            println!("Achievements: {}", counts.achievements);
            println!("Announcements: {}", counts.announcements);
            println!("Point Transactions: {}", counts.transactions);
        }
        Command::Award(args) => {
            let entry = ledger::award(&store, args.house, args.points, &args.reason)?;
            println!(
                "Successfully added {} points to {} (total {})",
                args.points, entry.house.name, entry.total
            );
        }
        Command::Deduct(args) => {
            let entry = ledger::deduct(&store, args.house, args.points, &args.reason)?;
            println!(
                "Successfully deducted {} points from {} (total {})",
                args.points, entry.house.name, entry.total
            );
        }
        Command::Transactions { limit } => {
            for tx in ledger::recent(&store, limit)? {
                println!(
                    "#{} {} {:+} \"{}\" ({})",
                    tx.id,
                    tx.house_name,
                    tx.points_change,
                    tx.reason,
                    tx.timestamp.to_rfc3339()
                );
            }
        }
        Command::Announce { captain, title, content, image_url } => {
            let ann = announcements::create(
                &store,
                &captain,
                NewAnnouncement { title, content, image_url },
            )?;
            println!("Announcement created successfully (id {})", ann.id);
        }
        Command::RemoveAnnouncement { captain, id } => {
            announcements::remove(&store, &captain, id)?;
            println!("Announcement {} deleted successfully", id);
        }
        Command::SetImage { id, url } => {
            let ann = announcements::set_image(&store, id, url.as_deref())?;
            match ann.image_url {
                Some(url) => println!("Announcement {} image set to {}", id, url),
                None => println!("Announcement {} image cleared", id),
            }
        }
    }
    Ok(())
}
