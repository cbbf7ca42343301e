//! Astronomy and cosmic-mystery topics: planet facts, illustrated myths and
//! illustrated explanations. Each topic area keeps its own slot so loading
//! one never disturbs another.

use crate::core::slot::{lock, LoadSlot, Outcome, SlotView};
use crate::domain::catalog;
use crate::domain::model::{IllustratedText, PlanetInfo};
use crate::domain::ports::ContentProvider;
use crate::utils::error::{CompassError, Result};
use std::sync::{Arc, Mutex};

const PLANET_FAILURE: &str = "Failed to fetch planet data. Please try again.";
const CLOSEST_FAILURE: &str = "Failed to find the closest planet. Please try again later.";
const STORY_FAILURE: &str = "Failed to fetch the story and its visual. Please try again later.";
const MYSTERY_FAILURE: &str =
    "Failed to fetch this cosmic mystery and its visual. Please try again later.";

pub struct TopicExplorer {
    provider: Arc<dyn ContentProvider>,
    planet: Mutex<LoadSlot<String, PlanetInfo>>,
    closest: Mutex<LoadSlot<(), String>>,
    story: Mutex<LoadSlot<String, IllustratedText>>,
    mystery: Mutex<LoadSlot<(String, String), IllustratedText>>,
}

impl TopicExplorer {
    pub fn new(provider: Arc<dyn ContentProvider>) -> Self {
        Self {
            provider,
            planet: Mutex::new(LoadSlot::default()),
            closest: Mutex::new(LoadSlot::default()),
            story: Mutex::new(LoadSlot::default()),
            mystery: Mutex::new(LoadSlot::default()),
        }
    }

    pub async fn select_planet(&self, planet: &str) -> Outcome {
        let ticket = lock(&self.planet).begin(planet.to_string());
        tracing::debug!("Loading planet {} (request #{})", planet, ticket.seq);

        let result = self.provider.planet_info(planet).await;
        lock(&self.planet).settle(&ticket, result, "planet data", PLANET_FAILURE)
    }

    /// Asks which planet is nearest to Earth right now, then loads it.
    pub async fn find_closest_planet(&self) -> Outcome {
        let ticket = lock(&self.closest).begin(());

        let result = self
            .provider
            .closest_planet()
            .await
            .and_then(check_neighbour_planet);
        let planet = result.as_ref().ok().cloned();

        let outcome = lock(&self.closest).settle(&ticket, result, "closest planet", CLOSEST_FAILURE);
        if !outcome.is_committed() {
            return outcome;
        }

        match planet {
            Some(planet) => {
                tracing::info!("Closest planet to Earth: {}", planet);
                self.select_planet(&planet).await
            }
            None => Outcome::Skipped,
        }
    }

    /// Loads a myth and its illustration; both must arrive or neither shows.
    pub async fn select_story(&self, topic: &str) -> Outcome {
        let ticket = lock(&self.story).begin(topic.to_string());
        tracing::debug!("Loading story '{}' (request #{})", topic, ticket.seq);

        let provider = self.provider.as_ref();
        let result = tokio::try_join!(provider.astro_story(topic), provider.topic_image(topic))
            .map(|(text, image)| IllustratedText { text, image });

        lock(&self.story).settle(&ticket, result, "story", STORY_FAILURE)
    }

    pub async fn select_mystery(&self, category: &str, topic: &str) -> Outcome {
        let ticket = lock(&self.mystery).begin((category.to_string(), topic.to_string()));
        tracing::debug!(
            "Loading mystery '{}' in '{}' (request #{})",
            topic,
            category,
            ticket.seq
        );

        let provider = self.provider.as_ref();
        let result = tokio::try_join!(
            provider.cosmic_content(category, topic),
            provider.topic_image(topic)
        )
        .map(|(text, image)| IllustratedText { text, image });

        lock(&self.mystery).settle(&ticket, result, "mystery", MYSTERY_FAILURE)
    }

    pub fn planet(&self) -> SlotView<String, PlanetInfo> {
        lock(&self.planet).snapshot()
    }

    pub fn closest_planet(&self) -> SlotView<(), String> {
        lock(&self.closest).snapshot()
    }

    pub fn story(&self) -> SlotView<String, IllustratedText> {
        lock(&self.story).snapshot()
    }

    pub fn mystery(&self) -> SlotView<(String, String), IllustratedText> {
        lock(&self.mystery).snapshot()
    }
}

fn check_neighbour_planet(planet: String) -> Result<String> {
    if catalog::neighbour_planets().any(|p| p == planet) {
        Ok(planet)
    } else {
        Err(CompassError::malformed(
            "closest planet",
            format!("'{}' is not one of Earth's neighbours", planet),
        ))
    }
}
