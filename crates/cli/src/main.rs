//! Atrium admin CLI
//!
//! Manages events, guest lists, and room-block inventory, and triggers
//! allocation runs against a local database.

mod import;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use directories::ProjectDirs;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use atrium_core::{
    AllocationOutcome, Allocator, Database, Event, Guest, RoomBlock, ZoneKey,
};

#[derive(Parser)]
#[command(name = "atrium")]
#[command(about = "Room-block administration for events")]
struct Cli {
    /// Database path (defaults to the platform data directory)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage events
    Event {
        #[command(subcommand)]
        command: EventCommand,
    },

    /// Manage guest lists
    Guest {
        #[command(subcommand)]
        command: GuestCommand,
    },

    /// Manage room-block inventory
    Block {
        #[command(subcommand)]
        command: BlockCommand,
    },

    /// Run the auto-allocator for an event
    Allocate {
        /// Event ID
        event: Uuid,
    },

    /// Manually assign a guest to a (floor, wing) zone
    Assign {
        /// Event ID
        #[arg(long)]
        event: Uuid,

        /// Guest ID
        #[arg(long)]
        guest: Uuid,

        #[arg(long)]
        floor: String,

        #[arg(long)]
        wing: String,
    },

    /// Show an event's activity log
    Log {
        /// Event ID
        event: Uuid,

        /// Number of entries to show
        #[arg(long, default_value = "20")]
        limit: u32,
    },
}

#[derive(Subcommand)]
enum EventCommand {
    /// Create an event
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        venue: Option<String>,

        /// First night, YYYY-MM-DD
        #[arg(long)]
        starts: NaiveDate,

        /// Last night, YYYY-MM-DD
        #[arg(long)]
        ends: NaiveDate,
    },

    /// List all events
    List,
}

#[derive(Subcommand)]
enum GuestCommand {
    /// Add a single guest
    Add {
        #[arg(long)]
        event: Uuid,

        #[arg(long)]
        name: String,

        /// Social group label, e.g. "VIP" or "Bride Side"
        #[arg(long)]
        group: Option<String>,

        /// Proximity request, e.g. "near Alice Moreau"
        #[arg(long)]
        near: Option<String>,
    },

    /// Import guests from a semicolon-separated list file
    /// (one "name; group; proximity" line per guest)
    Import {
        #[arg(long)]
        event: Uuid,

        file: PathBuf,
    },

    /// List an event's guests with their allocations
    List {
        event: Uuid,

        /// Only show guests still awaiting allocation
        #[arg(long)]
        unallocated: bool,
    },

    /// Cancel a guest
    Cancel {
        guest: Uuid,
    },
}

#[derive(Subcommand)]
enum BlockCommand {
    /// Add a room block
    Add {
        #[arg(long)]
        event: Uuid,

        #[arg(long)]
        label: String,

        /// Room count
        #[arg(long)]
        qty: u32,

        #[arg(long)]
        floor: Option<String>,

        #[arg(long)]
        wing: Option<String>,
    },

    /// List an event's room blocks
    List {
        event: Uuid,
    },
}

fn default_db_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let dirs = ProjectDirs::from("io", "atrium", "atrium")
        .ok_or("could not determine a data directory for this platform")?;
    let data_dir = dirs.data_dir();
    std::fs::create_dir_all(data_dir)?;
    Ok(data_dir.join("atrium.db"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let db_path = match cli.db {
        Some(path) => path,
        None => default_db_path()?,
    };
    tracing::info!(path = %db_path.display(), "Opening database");
    let db = Database::open(&db_path)?;

    match cli.command {
        Command::Event { command } => run_event(&db, command)?,
        Command::Guest { command } => run_guest(&db, command)?,
        Command::Block { command } => run_block(&db, command)?,
        Command::Allocate { event } => run_allocate(&db, event)?,
        Command::Assign {
            event,
            guest,
            floor,
            wing,
        } => {
            let allocator = Allocator::new();
            allocator.allocate_manual(&db, event, &[(guest, ZoneKey::new(floor, wing))])?;
            println!("Assigned guest {guest}");
        }
        Command::Log { event, limit } => {
            for entry in db.activity().list_for_event(event, limit)? {
                println!(
                    "{}  [{}]  {}",
                    entry.created_at.format("%Y-%m-%d %H:%M:%S"),
                    entry.actor,
                    entry.message
                );
            }
        }
    }

    Ok(())
}

fn run_event(db: &Database, command: EventCommand) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        EventCommand::Create {
            name,
            venue,
            starts,
            ends,
        } => {
            let mut event = Event::new(name, starts, ends);
            if let Some(venue) = venue {
                event = event.with_venue(venue);
            }
            db.events().create(&event)?;
            println!("Created event {}", event.id);
        }
        EventCommand::List => {
            for event in db.events().list()? {
                println!(
                    "{}  {}  {} to {}  {}",
                    event.id,
                    event.name,
                    event.starts_on,
                    event.ends_on,
                    event.venue.as_deref().unwrap_or("-")
                );
            }
        }
    }
    Ok(())
}

fn run_guest(db: &Database, command: GuestCommand) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        GuestCommand::Add {
            event,
            name,
            group,
            near,
        } => {
            let mut guest = Guest::new(event, name);
            if let Some(label) = group.as_deref() {
                guest = guest.with_group(label);
            }
            if let Some(request) = near {
                guest = guest.with_proximity_request(request);
            }
            db.guests().create(&guest)?;
            println!("Added guest {}", guest.id);
        }
        GuestCommand::Import { event, file } => {
            let contents = std::fs::read_to_string(&file)?;
            let guests = import::parse_guest_lines(event, &contents)?;
            let count = guests.len();
            db.guests().import(&guests)?;
            println!("Imported {count} guests");
        }
        GuestCommand::List { event, unallocated } => {
            let guests = if unallocated {
                db.guests().list_unallocated(event)?
            } else {
                db.guests().list_for_event(event)?
            };
            for guest in guests {
                let zone = guest
                    .allocated_zone()
                    .map(|z| z.to_string())
                    .unwrap_or_else(|| "unallocated".to_string());
                let group = guest
                    .group
                    .as_ref()
                    .map(|g| g.as_label().to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{}  {}  [{}]  {}  {}",
                    guest.id, guest.full_name, group, guest.status, zone
                );
            }
        }
        GuestCommand::Cancel { guest } => {
            db.guests()
                .update_status(guest, atrium_core::GuestStatus::Cancelled)?;
            println!("Cancelled guest {guest}");
        }
    }
    Ok(())
}

fn run_block(db: &Database, command: BlockCommand) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        BlockCommand::Add {
            event,
            label,
            qty,
            floor,
            wing,
        } => {
            let mut block = RoomBlock::new(event, label, qty);
            block.floor = floor;
            block.wing = wing;
            db.room_blocks().create(&block)?;
            println!("Added room block {} ({})", block.id, block.zone_key());
        }
        BlockCommand::List { event } => {
            for block in db.room_blocks().list_for_event(event)? {
                println!(
                    "{}  {}  {}  {} rooms ({} booked)",
                    block.id,
                    block.label,
                    block.zone_key(),
                    block.total_qty,
                    block.booked_qty
                );
            }
        }
    }
    Ok(())
}

fn run_allocate(db: &Database, event: Uuid) -> Result<(), Box<dyn std::error::Error>> {
    let allocator = Allocator::new();
    match allocator.auto_allocate(db, event)? {
        AllocationOutcome::NothingToAllocate => {
            println!("Nothing to allocate: every eligible guest is already placed");
        }
        AllocationOutcome::Allocated {
            assignments,
            zones_considered,
            unplaced,
        } => {
            for assignment in &assignments {
                let name = db
                    .guests()
                    .find_by_id(assignment.guest_id)?
                    .map(|g| g.full_name)
                    .unwrap_or_else(|| assignment.guest_id.to_string());
                println!("{name}  ->  {}", assignment.zone);
            }
            println!(
                "Placed {} guests across {} zones; {} left unallocated",
                assignments.len(),
                zones_considered,
                unplaced
            );
        }
    }
    Ok(())
}
