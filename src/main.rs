//! Starscourge - inventory host
//!
//! Loads the config and item catalog, restores (or seeds) the player's
//! inventory, prints it, and saves it back on exit.
//!
//! Usage: `starscourge [list|kinds|sort <name|kind|value> [desc]|reset] [config.ron]`

use std::fs::OpenOptions;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use starscourge::data::{DataManager, CONFIG_FILE};
use starscourge::game::PlayerSession;
use starscourge::items::{ItemKind, ItemRef, LoadoutSlot};
use starscourge::save;

fn main() -> Result<()> {
    // Log to a file so output stays readable
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("starscourge.log")
        .context("failed to open starscourge.log")?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    )
    .target(env_logger::Target::Pipe(Box::new(log_file)))
    .init();

    log::info!("Starting Starscourge v{}", env!("CARGO_PKG_VERSION"));

    let (args, config_path) = split_args(std::env::args().skip(1));
    let command = args.first().map(String::as_str).unwrap_or("list");

    let data = DataManager::load(&config_path).context("failed to load item data")?;
    let mut session = PlayerSession::new(data.config.clone());

    if command == "reset" {
        save::delete_save(&session.save_path())?;
        println!("Save deleted: {}", session.save_path().display());
        return Ok(());
    }

    let loaded = session.load_or_seed(&data.catalog, &data.resolver())?;
    println!(
        "{} inventory: {} items, {} credits",
        if loaded { "Loaded" } else { "New" },
        session.inventory.len(),
        session.inventory.credits()
    );

    session.activate();

    match command {
        "list" => {
            print_items(session.inventory.items());
            print_loadout(&session);
        }
        "kinds" => {
            for kind in ItemKind::ALL {
                let items = session.inventory.items_of_kind(kind);
                if !items.is_empty() {
                    println!("{} ({})", kind, items.len());
                }
            }
        }
        "sort" => {
            let ascending = args.get(2).map(String::as_str) != Some("desc");
            let sorted = match args.get(1).map(String::as_str) {
                Some("name") | None => session.inventory.sorted_by_name(ascending),
                Some("kind") => session.inventory.sorted_by_kind(ascending),
                Some("value") => session.inventory.sorted_by_value(ascending),
                Some(other) => bail!("unknown sort key '{}'", other),
            };
            print_items(&sorted);
        }
        other => bail!("unknown command '{}'", other),
    }

    session.deactivate();
    session.end().context("failed to save inventory")?;

    log::info!("Starscourge shut down cleanly");
    Ok(())
}

/// Pull the config path (any `.ron` argument) out of the command arguments
fn split_args(args: impl IntoIterator<Item = String>) -> (Vec<String>, PathBuf) {
    let (config_args, args): (Vec<String>, Vec<String>) =
        args.into_iter().partition(|a| a.ends_with(".ron"));
    let config_path = config_args
        .into_iter()
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
    (args, config_path)
}

fn print_items(items: &[ItemRef]) {
    for item in items {
        let attrs: Vec<String> = item
            .attributes()
            .into_iter()
            .map(|(label, value)| format!("{label}: {value}"))
            .collect();
        println!(
            "  [{:<9}] {:<28} {:<26} x{}/{}  {}",
            item.rarity.name(),
            item.name,
            item.kind_name(),
            item.current_stack(),
            item.max_stack(),
            attrs.join(", ")
        );
    }
}

fn print_loadout(session: &PlayerSession) {
    println!("Loadout (power draw {}):", session.loadout.total_power_draw());
    for slot in LoadoutSlot::ALL {
        let name = session.loadout.get(slot).map(|i| i.name.as_str()).unwrap_or("-");
        println!("  {:<16} {}", slot.name(), name);
    }
}
