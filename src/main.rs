use std::collections::HashMap;

use anyhow::Result;
use clap::Parser;
use hostel_finder::backend::{ListingSource, RestListingSource, SnapshotSource};
use hostel_finder::compare::CompareMode;
use hostel_finder::{AppConfig, CompareView, FilterState, HostelSearchScreen, Listing, QuickFilter, SortStrategy};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Hostel Finder - campus hostel search
#[derive(Parser, Debug)]
#[command(name = "hostel-finder", version, about = "Search and compare campus hostels")]
struct Cli {
    /// Sort order: verified_first, lowest_price, most_beds or closest
    #[arg(long, value_parser = str::parse::<SortStrategy>)]
    sort: Option<SortStrategy>,

    /// Quick filter chip to enable (repeatable)
    #[arg(long, value_parser = str::parse::<QuickFilter>)]
    quick: Vec<QuickFilter>,

    /// Saved hostel ids to compare side by side
    #[arg(long, value_delimiter = ',')]
    compare: Vec<String>,

    /// Free-text search
    #[arg(trailing_var_arg = true)]
    query: Vec<String>,
}

impl Cli {
    fn query(&self) -> String {
        self.query.join(" ")
    }
}

/// Split requested ids into saved hostels and everything else
fn saved_ids(listings: &[Listing], requested: &[String]) -> (Vec<String>, Vec<String>) {
    requested.iter().cloned().partition(|id| {
        listings
            .iter()
            .any(|l| &l.id == id && l.is_favourite)
    })
}

/// Prints the selected hostels next to each other
struct TerminalCompareView<'a> {
    listings: HashMap<&'a str, &'a Listing>,
}

impl CompareView for TerminalCompareView<'_> {
    fn open_compare(&mut self, ids: &str) {
        println!("Comparing {}", ids);
        for id in ids.split(',') {
            match self.listings.get(id) {
                Some(listing) => println!(
                    "   {:<30} {:>8.0}-{:<8.0} {:>3} rooms  verified: {}",
                    listing.name,
                    listing.price_range_min,
                    listing.price_range_max,
                    listing.rooms_left(),
                    listing.verified
                ),
                None => println!("   {:<30} (not found)", id),
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🏠 Hostel Finder");

    let args = Cli::parse();
    let config = AppConfig::from_env()?;

    let source: Box<dyn ListingSource> = match &config.snapshot_path {
        Some(path) => {
            let snapshot = SnapshotSource::new(path);
            info!("Reading snapshot {}", snapshot.path().display());
            Box::new(snapshot)
        }
        None => Box::new(RestListingSource::from_config(&config)?),
    };
    info!("Loading listings from {}", source.source_name());

    let mut screen = HostelSearchScreen::new();
    screen
        .refresh(source.as_ref(), config.viewer_id.as_deref())
        .await?;

    screen.set_query(args.query());
    if let Some(sort) = args.sort {
        screen.apply_filters(FilterState {
            sort_by: sort,
            ..Default::default()
        });
    }
    for filter in &args.quick {
        screen.toggle_quick_filter(*filter);
    }

    let active = screen.active_filter_count();
    let visible = screen.visible();
    info!("✅ {} hostels match ({} filters active)\n", visible.len(), active);

    for (i, listing) in visible.iter().enumerate() {
        println!(
            "{}. {} ({:.0}-{:.0}/month){}",
            i + 1,
            listing.name,
            listing.price_range_min,
            listing.price_range_max,
            if listing.verified { " ✔" } else { "" }
        );
        println!("   {}", listing.address);
        println!("   {} rooms left, {}", listing.rooms_left(), listing.distance_from_campus);
        if !listing.amenities.is_empty() {
            let names: Vec<&str> = listing.amenities.iter().map(|a| a.name()).collect();
            println!("   Amenities: {}", names.join(", "));
        }
        if let Some(image) = listing.cover_image() {
            println!("   Photo: {}", image.url);
        }
        println!("   ID: {}", listing.id);
        println!();
    }

    if !args.compare.is_empty() {
        let (saved, unsaved) = saved_ids(screen.listings(), &args.compare);
        for id in &unsaved {
            warn!("{} is not a saved hostel, leaving it out of the comparison", id);
        }

        if screen.toggle_compare_mode() == CompareMode::Normal {
            warn!("Save at least two hostels to compare them");
        }
        for id in &saved {
            if let Some(notice) = screen.toggle_select(id).notice() {
                warn!("{}", notice);
            }
        }

        let mut view = TerminalCompareView {
            listings: screen.listings().iter().map(|l| (l.id.as_str(), l)).collect(),
        };
        if !screen.launch_compare(&mut view) {
            warn!("Pick at least two hostels to compare");
        }
    }

    Ok(())
}
