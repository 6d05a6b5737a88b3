use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use propnest::config::StoreConfig;
use propnest::models::{RecordId, DEFAULT_MAX_PRICE};
use propnest::samples::{sample_properties, AMENITIES};
use propnest::store::{ApperStore, MemoryStore, RecordStore};
use propnest::{ListingType, Property, PropertyDraft, PropertyService, PropertyType, SearchFilters};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Browse and manage property listings", long_about = None)]
struct Cli {
    /// Use the built-in sample listings instead of the hosted store
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search listings
    Search {
        /// Part of the address, case-insensitive
        #[arg(short, long)]
        location: Option<String>,
        #[arg(long, default_value_t = 0)]
        min_price: u64,
        #[arg(long, default_value_t = DEFAULT_MAX_PRICE)]
        max_price: u64,
        #[arg(short = 't', long = "type")]
        property_type: Option<PropertyType>,
        /// Minimum bedrooms
        #[arg(long)]
        bedrooms: Option<String>,
        /// Minimum bathrooms
        #[arg(long)]
        bathrooms: Option<String>,
        #[arg(long, default_value = "sale")]
        listing: ListingType,
        /// Also save the results as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show one listing
    Show { id: RecordId },
    /// Submit a new listing
    Create(ListingEdits),
    /// Edit an existing listing
    Update {
        id: RecordId,
        #[command(flatten)]
        edits: ListingEdits,
    },
    /// Remove a listing
    Delete { id: RecordId },
}

/// Listing fields given on the command line. Unset fields keep their
/// current value on update and the form default on create.
#[derive(Args)]
struct ListingEdits {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    price: Option<String>,
    #[arg(long = "type")]
    property_type: Option<PropertyType>,
    #[arg(long)]
    bedrooms: Option<String>,
    #[arg(long)]
    bathrooms: Option<String>,
    #[arg(long)]
    square_footage: Option<String>,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    listing: Option<ListingType>,
    /// Toggle an amenity tag; repeatable
    #[arg(long = "amenity")]
    amenities: Vec<String>,
    #[arg(long)]
    image: Option<String>,
}

impl ListingEdits {
    fn apply(self, mut draft: PropertyDraft) -> PropertyDraft {
        if let Some(title) = self.title {
            draft.title = title;
        }
        if let Some(price) = self.price {
            draft.price = price;
        }
        if let Some(property_type) = self.property_type {
            draft.property_type = property_type;
        }
        if let Some(bedrooms) = self.bedrooms {
            draft.bedrooms = bedrooms;
        }
        if let Some(bathrooms) = self.bathrooms {
            draft.bathrooms = bathrooms;
        }
        if let Some(square_footage) = self.square_footage {
            draft.square_footage = square_footage;
        }
        if let Some(address) = self.address {
            draft.address = address;
        }
        if let Some(description) = self.description {
            draft.description = description;
        }
        if let Some(listing) = self.listing {
            draft.listing_type = listing;
        }
        for amenity in self.amenities {
            if !AMENITIES.contains(&amenity.as_str()) {
                warn!("'{}' is not one of the standard amenities", amenity);
            }
            draft.toggle_amenity(&amenity);
        }
        if let Some(image) = self.image {
            draft.image = Some(image);
        }
        draft
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    info!("🏠 PropNest listings");

    if cli.offline {
        info!("Using built-in sample listings");
        let service = PropertyService::new(MemoryStore::seeded(&sample_properties()));
        run(&service, cli.command).await
    } else {
        let config = StoreConfig::from_env()?;
        let store = ApperStore::new(config).context("Failed to create record store client")?;
        run(&PropertyService::new(store), cli.command).await
    }
}

async fn run<S: RecordStore>(service: &PropertyService<S>, command: Commands) -> Result<()> {
    match command {
        Commands::Search {
            location,
            min_price,
            max_price,
            property_type,
            bedrooms,
            bathrooms,
            listing,
            output,
        } => {
            let mut filters = SearchFilters::new(listing)
                .location(location.unwrap_or_default())
                .price_range(min_price, max_price)
                .bedrooms_input(bedrooms.as_deref().unwrap_or_default())
                .bathrooms_input(bathrooms.as_deref().unwrap_or_default());
            filters.property_type = property_type;

            let properties = service.search(&filters).await?;
            info!("✅ Found {} properties\n", properties.len());

            for (i, property) in properties.iter().enumerate() {
                print!("{}. ", i + 1);
                print_property(property);
            }

            if let Some(path) = output {
                let json = serde_json::to_string_pretty(&properties)?;
                tokio::fs::write(&path, json)
                    .await
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!("💾 Saved results to {}", path.display());
            }
        }
        Commands::Show { id } => match service.get_by_id(id).await? {
            Some(property) => print_property(&property),
            None => warn!("No property with ID {}", id),
        },
        Commands::Create(edits) => {
            let draft = edits.apply(PropertyDraft::default());
            let property = service.create(&draft).await?;
            info!("Property listed successfully with ID {}", property.id);
            print_property(&property);
        }
        Commands::Update { id, edits } => {
            let existing = service
                .get_by_id(id)
                .await?
                .with_context(|| format!("No property with ID {}", id))?;
            let draft = edits.apply(existing.to_draft());
            let property = service.update(id, &draft).await?;
            info!("Property {} updated", property.id);
            print_property(&property);
        }
        Commands::Delete { id } => {
            if service.delete(id).await? {
                info!("Property {} deleted", id);
            } else {
                warn!("Store reported no result deleting property {}", id);
            }
        }
    }

    Ok(())
}

fn print_property(property: &Property) {
    let kind = match property.listing_type {
        ListingType::Sale => "For Sale",
        ListingType::Rent => "For Rent",
    };
    println!("{} ({}, {})", property.title, property.price_label(), kind);
    println!("   {}", property.address);
    println!(
        "   {} · {} bd · {} ba · {} sqft",
        property.property_type, property.bedrooms, property.bathrooms, property.square_footage
    );
    if let Some(description) = &property.description {
        println!("   {}", description);
    }
    if !property.amenities.is_empty() {
        println!("   Amenities: {}", property.amenities.join(", "));
    }
    println!("   ID: {}", property.id);
    println!();
}
