#![allow(dead_code)]

use async_trait::async_trait;
use celestial_compass::domain::model::{
    AstrologicalEvent, ChineseZodiacInfo, ChineseZodiacSign, CompatibilityInfo, FactTopic,
    GeneratedImage, Horoscope, PlanetInfo, Timeframe, YinYang, ZodiacInfo, ZodiacSign,
};
use celestial_compass::domain::ports::ContentProvider;
use celestial_compass::utils::error::{CompassError, Result};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

/// Scripted provider. Sign-content calls for a gated sign wait until the
/// gate is opened; operations marked as failing return a 503.
#[derive(Default)]
pub struct StubProvider {
    calls: Mutex<Vec<String>>,
    gates: Mutex<HashMap<String, Arc<Semaphore>>>,
    failing: Mutex<HashSet<&'static str>>,
    compatibility_percentage: Mutex<Option<u8>>,
    closest: Mutex<Option<String>>,
    no_events: Mutex<bool>,
}

impl StubProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Holds every info/horoscope call for `sign` until the returned gate
    /// gets a permit.
    pub fn gate(&self, sign: &str) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        self.gates
            .lock()
            .unwrap()
            .insert(sign.to_string(), gate.clone());
        gate
    }

    pub fn fail(&self, operation: &'static str) {
        self.failing.lock().unwrap().insert(operation);
    }

    pub fn set_compatibility_percentage(&self, percentage: u8) {
        *self.compatibility_percentage.lock().unwrap() = Some(percentage);
    }

    pub fn set_closest_planet(&self, planet: &str) {
        *self.closest.lock().unwrap() = Some(planet.to_string());
    }

    pub fn return_no_events(&self) {
        *self.no_events.lock().unwrap() = true;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, operation: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.split(':').next() == Some(operation))
            .count()
    }

    async fn enter(&self, operation: &'static str, detail: String, gate_key: Option<String>) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{}:{}", operation, detail));

        let gate = gate_key.and_then(|key| self.gates.lock().unwrap().get(&key).cloned());
        if let Some(gate) = gate {
            let _permit = gate.acquire().await.unwrap();
        }

        if self.failing.lock().unwrap().contains(operation) {
            return Err(CompassError::ProviderStatusError {
                operation: operation.to_string(),
                status: 503,
                body: "unavailable".to_string(),
            });
        }
        Ok(())
    }
}

pub fn sample_horoscope(sign: &str, timeframe: Timeframe) -> Horoscope {
    Horoscope {
        love: format!("{} {} love", sign, timeframe),
        career: format!("{} {} career", sign, timeframe),
        health: format!("{} {} health", sign, timeframe),
    }
}

pub fn sample_zodiac_info(sign: ZodiacSign) -> ZodiacInfo {
    ZodiacInfo {
        personality_traits: vec![format!("{} bold", sign), format!("{} loyal", sign)],
        compatibility: format!("{} gets on with everyone", sign),
        ruling_planet: "Mars".to_string(),
        element: "Fire".to_string(),
    }
}

#[async_trait]
impl ContentProvider for StubProvider {
    async fn zodiac_info(&self, sign: ZodiacSign) -> Result<ZodiacInfo> {
        self.enter("zodiac_info", sign.to_string(), Some(sign.to_string()))
            .await?;
        Ok(sample_zodiac_info(sign))
    }

    async fn horoscope(&self, sign: ZodiacSign, timeframe: Timeframe) -> Result<Horoscope> {
        self.enter(
            "horoscope",
            format!("{}:{}", sign, timeframe),
            Some(sign.to_string()),
        )
        .await?;
        Ok(sample_horoscope(sign.as_str(), timeframe))
    }

    async fn compatibility(
        &self,
        first: ZodiacSign,
        second: ZodiacSign,
    ) -> Result<CompatibilityInfo> {
        self.enter("compatibility", format!("{}:{}", first, second), None)
            .await?;
        Ok(CompatibilityInfo {
            percentage: self.compatibility_percentage.lock().unwrap().unwrap_or(82),
            explanation: format!("{} and {} balance each other", first, second),
        })
    }

    async fn chinese_zodiac_info(&self, sign: ChineseZodiacSign) -> Result<ChineseZodiacInfo> {
        self.enter("chinese_zodiac_info", sign.to_string(), Some(sign.to_string()))
            .await?;
        Ok(ChineseZodiacInfo {
            personality_traits: vec![format!("{} patient", sign)],
            compatibility: format!("{} pairs well with the Dragon", sign),
            element: "Wood".to_string(),
            yin_yang: YinYang::Yang,
        })
    }

    async fn chinese_horoscope(
        &self,
        sign: ChineseZodiacSign,
        timeframe: Timeframe,
    ) -> Result<Horoscope> {
        self.enter(
            "chinese_horoscope",
            format!("{}:{}", sign, timeframe),
            Some(sign.to_string()),
        )
        .await?;
        Ok(sample_horoscope(sign.as_str(), timeframe))
    }

    async fn chinese_compatibility(
        &self,
        first: ChineseZodiacSign,
        second: ChineseZodiacSign,
    ) -> Result<CompatibilityInfo> {
        self.enter("chinese_compatibility", format!("{}:{}", first, second), None)
            .await?;
        Ok(CompatibilityInfo {
            percentage: 64,
            explanation: format!("{} and {} learn from each other", first, second),
        })
    }

    async fn planet_info(&self, planet: &str) -> Result<PlanetInfo> {
        self.enter("planet_info", planet.to_string(), None).await?;
        Ok(PlanetInfo {
            name: planet.to_string(),
            mass: "4.87 × 10^24 kg".to_string(),
            diameter: "12,104 km".to_string(),
            distance_from_sun: "108 million km".to_string(),
            fun_facts: vec![format!("{} is bright", planet)],
        })
    }

    async fn closest_planet(&self) -> Result<String> {
        self.enter("closest_planet", String::new(), None).await?;
        Ok(self
            .closest
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| "Venus".to_string()))
    }

    async fn astrological_events(&self) -> Result<Vec<AstrologicalEvent>> {
        self.enter("astrological_events", String::new(), None).await?;
        if *self.no_events.lock().unwrap() {
            return Ok(Vec::new());
        }
        Ok(vec![AstrologicalEvent {
            emoji: "🌕".to_string(),
            title: "Full Moon in Aries".to_string(),
            description: "Emotions run high.".to_string(),
        }])
    }

    async fn daily_fact(&self, topic: FactTopic) -> Result<String> {
        self.enter("daily_fact", topic.as_str().to_string(), None)
            .await?;
        Ok(format!("A fact about {}", topic.as_str()))
    }

    async fn sign_from_birth_data(
        &self,
        birth_date: &str,
        birth_place: &str,
    ) -> Result<ZodiacSign> {
        self.enter(
            "sign_from_birth_data",
            format!("{}@{}", birth_date, birth_place),
            None,
        )
        .await?;
        Ok(ZodiacSign::Leo)
    }

    async fn chinese_sign_from_birth_date(&self, birth_date: &str) -> Result<ChineseZodiacSign> {
        self.enter("chinese_sign_from_birth_date", birth_date.to_string(), None)
            .await?;
        Ok(ChineseZodiacSign::Horse)
    }

    async fn astro_story(&self, topic: &str) -> Result<String> {
        self.enter("astro_story", topic.to_string(), None).await?;
        Ok(format!("Once upon a time, {}", topic))
    }

    async fn cosmic_content(&self, category: &str, topic: &str) -> Result<String> {
        self.enter("cosmic_content", format!("{}/{}", category, topic), None)
            .await?;
        Ok(format!("{} explained", topic))
    }

    async fn topic_image(&self, topic: &str) -> Result<GeneratedImage> {
        self.enter("topic_image", topic.to_string(), None).await?;
        Ok(GeneratedImage {
            data_url: "data:image/png;base64,AAAA".to_string(),
        })
    }
}
