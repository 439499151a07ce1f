//! Administrative seeding tool: reseed the catalog and optionally clear
//! stale cart rows, outside the API surface.

use std::sync::Arc;

use clap::Parser;
use sea_orm::EntityTrait;
use tokio::sync::mpsc;
use tracing::info;

use ecommart_api as api;
use ecommart_api::entities::CartItem;

#[derive(Debug, Parser)]
#[command(name = "seed", about = "Seed the ecommart catalog")]
struct Args {
    /// Wipe existing products before inserting the fixture set.
    #[arg(long)]
    reset: bool,

    /// Also delete every cart row (fresh demo state).
    #[arg(long)]
    clear_carts: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let cfg = api::config::load_config()?;
    api::config::init_tracing(cfg.log_level(), cfg.log_json);

    let db = api::db::establish_connection(&cfg).await?;
    api::db::run_migrations(&db).await?;
    let db = Arc::new(db);

    let (event_tx, event_rx) = mpsc::channel(64);
    let event_sender = api::events::EventSender::new(event_tx);
    let events_task = tokio::spawn(api::events::process_events(event_rx));

    if args.clear_carts {
        let cleared = CartItem::delete_many().exec(&*db).await?;
        info!("cleared {} cart items", cleared.rows_affected);
    }

    let catalog = api::services::CatalogService::new(db.clone(), event_sender.clone());
    let seeded = if args.reset {
        catalog.reseed().await?
    } else {
        catalog.seed_if_empty().await?
    };

    if seeded == 0 {
        info!("catalog already seeded; pass --reset to reseed");
    } else {
        for product in api::fixtures::products() {
            info!("  - {} (₹{})", product.name, product.price);
        }
        info!("seeded {} products", seeded);
    }

    // Drop every sender clone so the consumer task drains and exits.
    drop(catalog);
    drop(event_sender);
    let _ = events_task.await;
    Ok(())
}
