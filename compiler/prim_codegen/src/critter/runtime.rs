use prim_ir::{RuntimeFunction, RuntimeLibrary, Type};

/// Sensors returning a reading.
const SENSORS: &[&str] = &[
    "memsize", "defense", "offense", "size", "energy", "pass", "posture", "tag", "smell",
];

/// Actions a critter can take in one turn.
const ACTIONS: &[&str] = &[
    "waitFor", "forward", "backward", "left", "right", "eat", "attack", "grow", "bud", "mate",
];

/// Sensors taking a direction or bound.
const DIRECTED_SENSORS: &[&str] = &["nearby", "ahead", "random"];

/// The operations the critter world exposes to programs.
pub fn runtime() -> RuntimeLibrary {
    let sensors = SENSORS
        .iter()
        .map(|name| RuntimeFunction::new(*name, vec![], Type::Int));
    let actions = ACTIONS
        .iter()
        .map(|name| RuntimeFunction::new(*name, vec![], Type::Void));
    let directed = DIRECTED_SENSORS
        .iter()
        .map(|name| RuntimeFunction::new(*name, vec![Type::Int], Type::Int));

    RuntimeLibrary {
        name: "critter".to_string(),
        functions: sensors
            .chain(actions)
            .chain(std::iter::once(RuntimeFunction::new(
                "serve",
                vec![Type::Int],
                Type::Void,
            )))
            .chain(directed)
            .collect(),
    }
}
