// Fixed menus offered to the user. Order is display order.

pub const PLANETS: [&str; 8] = [
    "Mercury", "Venus", "Earth", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune",
];

pub const ASTRO_MYTH_TOPICS: [&str; 7] = [
    "Mars: The God of War",
    "Venus: The Goddess of Love",
    "The Orion Myth",
    "The Big Dipper and the Great Bear",
    "The Milky Way Galaxy Origin",
    "Halley's Comet in History",
    "The Pleiades (Seven Sisters)",
];

pub const MYSTERY_TOPICS: [(&str, [&str; 4]); 4] = [
    (
        "Galactic Wonders",
        ["Andromeda Galaxy", "Black Holes", "Nebulae", "Galaxy Collisions"],
    ),
    (
        "Unexplained Phenomena",
        [
            "Dark Matter",
            "Dark Energy",
            "The Great Attractor",
            "Fast Radio Bursts (FRBs)",
        ],
    ),
    (
        "The Dark Side of Space",
        [
            "Rogue Planets",
            "Supernovae",
            "Gamma-Ray Bursts",
            "Space-Time Paradoxes",
        ],
    ),
    (
        "Cosmic Curiosities",
        [
            "Pillars of Creation",
            "Life on other planets?",
            "Diamond Planets",
            "The Multiverse Theory",
        ],
    ),
];

pub fn is_planet(name: &str) -> bool {
    PLANETS.contains(&name)
}

/// Planets that can be "closest to Earth".
pub fn neighbour_planets() -> impl Iterator<Item = &'static str> {
    PLANETS.into_iter().filter(|p| *p != "Earth")
}

pub fn mystery_category_of(topic: &str) -> Option<&'static str> {
    MYSTERY_TOPICS
        .iter()
        .find(|(_, topics)| topics.contains(&topic))
        .map(|(category, _)| *category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbours_exclude_earth() {
        let neighbours: Vec<_> = neighbour_planets().collect();
        assert_eq!(neighbours.len(), 7);
        assert!(!neighbours.contains(&"Earth"));
    }

    #[test]
    fn test_mystery_category_lookup() {
        assert_eq!(mystery_category_of("Dark Matter"), Some("Unexplained Phenomena"));
        assert_eq!(mystery_category_of("Saturn"), None);
    }
}
