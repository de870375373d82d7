//! Basic example of Plant blueprints.

use std::sync::atomic::{AtomicU32, Ordering};

use plant::prelude::*;
use tracing_subscriber::EnvFilter;

// === Define your models ===

#[derive(Debug, Default, plant::Model)]
#[plant(default)]
struct Person {
    first_name: String,
    last_name: String,
    email: String,
    member_since: u32,
}

#[derive(Debug, plant::Model)]
#[plant(constructor = "new", params(color, square_foot))]
struct House {
    color: String,
    square_foot: u32,
    #[plant(skip)]
    summary: String,
}

impl House {
    fn new(color: String, square_foot: u32) -> Self {
        Self {
            color,
            square_foot,
            summary: String::new(),
        }
    }
}

static CURRENT_YEAR: AtomicU32 = AtomicU32::new(2024);

// === Group definitions in a blueprint module ===

#[derive(Default)]
struct Fixtures;

impl Blueprint for Fixtures {
    fn setup(&self, plant: &mut Plant) -> Result<()> {
        plant
            // Person: literals, a sequence and a lazy value
            .define_properties_of::<Person>(
                Fields::new()
                    .set("first_name", String::from("Barbara"))
                    .set("last_name", String::from("Smith"))
                    .sequence("email", |n| format!("barbara{n}@example.com"))
                    .lazy("member_since", || CURRENT_YEAR.load(Ordering::Relaxed)),
            )?
            // House: constructor arguments plus a computed field
            .define_construction_of::<House>(
                Fields::new()
                    .set("color", String::from("Red"))
                    .set("square_foot", 3000u32),
            )?
            .after_build::<House>(|house| {
                house.summary = format!("{} house, {} sq ft", house.color, house.square_foot);
                Ok(())
            })?;
        Ok(())
    }
}

fn main() -> Result<()> {
    // Initialize tracing (logging)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("plant_core=debug")),
        )
        .init();

    let plant = Plant::new().with_blueprint(&Fixtures)?;
    tracing::info!(?plant, "Plant ready");

    // Defaults
    let barbara: Person = plant.create()?;
    println!("{barbara:?}");

    // Overrides win over defaults
    let james: Person = plant.create_with(Fields::new().set("first_name", String::from("James")))?;
    println!("{james:?}");

    // Lazy values are read at create time
    CURRENT_YEAR.store(2025, Ordering::Relaxed);
    let newcomer: Person = plant.create()?;
    println!("{newcomer:?}");

    let house: House = plant.create_with(Fields::new().set("color", String::from("Blue")))?;
    println!("{}", house.summary);

    // Mistakes are reported with a hint
    if let Err(err) = plant.create_with::<Person>(Fields::new().set("frist_name", "Jim")) {
        println!("{err}");
    }

    Ok(())
}
