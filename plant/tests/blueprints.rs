use plant::prelude::*;
use plant::testing::init_test_logging;

#[derive(Debug, Default, plant::Model)]
#[plant(default)]
struct Person {
    first_name: String,
    middle_name: Option<String>,
}

#[derive(Debug, plant::Model)]
#[plant(constructor = "new", params(color, square_foot))]
struct House {
    color: String,
    square_foot: u32,
}

impl House {
    fn new(color: String, square_foot: u32) -> Self {
        Self { color, square_foot }
    }
}

#[derive(Default)]
struct PersonBlueprint;

impl Blueprint for PersonBlueprint {
    fn setup(&self, plant: &mut Plant) -> Result<()> {
        plant.define_properties_of::<Person>(
            Fields::new().set("middle_name", Some(String::from("Elaine"))),
        )?;
        Ok(())
    }
}

#[derive(Default)]
struct HouseBlueprint;

impl Blueprint for HouseBlueprint {
    fn setup(&self, plant: &mut Plant) -> Result<()> {
        plant
            .define_construction_of::<House>(
                Fields::new()
                    .set("color", String::from("Red"))
                    .set("square_foot", 3000u32),
            )?
            .after_build::<House>(|house| {
                house.color = house.color.to_uppercase();
                Ok(())
            })?;
        Ok(())
    }
}

plant::blueprint!(PersonBlueprint);
plant::blueprint!(HouseBlueprint);

#[test]
fn registered_blueprints_are_loaded() {
    init_test_logging();
    let plant = Plant::new().with_registered_blueprints().unwrap();

    let person: Person = plant.create().unwrap();
    assert_eq!(person.middle_name.as_deref(), Some("Elaine"));

    let house: House = plant.create().unwrap();
    assert_eq!(house.color, "RED");
    assert_eq!(house.square_foot, 3000);
}

#[test]
fn explicit_blueprint_is_loaded() {
    init_test_logging();
    let plant = Plant::new().with_blueprint(&PersonBlueprint).unwrap();

    assert!(plant.is_defined::<Person>());
    assert!(!plant.is_defined::<House>());
}

#[test]
fn loading_twice_is_a_duplicate_blueprint() {
    init_test_logging();
    let plant = Plant::new().with_blueprint(&PersonBlueprint).unwrap();

    match plant.with_blueprint(&PersonBlueprint) {
        Err(PlantError::DuplicateBlueprint(e)) => {
            assert_eq!(e.existing, Strategy::PropertyInjection);
        }
        Err(other) => panic!("Expected DuplicateBlueprint, got: {other:?}"),
        Ok(_) => panic!("Expected DuplicateBlueprint, got a plant"),
    }
}

#[test]
fn redefinition_overrides_registered_blueprint() {
    init_test_logging();
    let mut plant = Plant::new()
        .allow_redefinition(true)
        .with_registered_blueprints()
        .unwrap();
    plant
        .define_properties_of::<Person>(Fields::new().set("first_name", String::from("Barbara")))
        .unwrap();

    let person: Person = plant.create().unwrap();
    assert_eq!(person.first_name, "Barbara");
    assert_eq!(person.middle_name, None);
}
