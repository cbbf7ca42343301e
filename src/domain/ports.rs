use crate::domain::model::{
    AstrologicalEvent, ChineseZodiacInfo, ChineseZodiacSign, CompatibilityInfo, FactTopic,
    GeneratedImage, Horoscope, PlanetInfo, Timeframe, ZodiacInfo, ZodiacSign,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Generative content service. Every call either yields the record for its
/// kind or fails; transport details belong to the adapter.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    async fn zodiac_info(&self, sign: ZodiacSign) -> Result<ZodiacInfo>;
    async fn horoscope(&self, sign: ZodiacSign, timeframe: Timeframe) -> Result<Horoscope>;
    async fn compatibility(&self, first: ZodiacSign, second: ZodiacSign)
        -> Result<CompatibilityInfo>;

    async fn chinese_zodiac_info(&self, sign: ChineseZodiacSign) -> Result<ChineseZodiacInfo>;
    async fn chinese_horoscope(
        &self,
        sign: ChineseZodiacSign,
        timeframe: Timeframe,
    ) -> Result<Horoscope>;
    async fn chinese_compatibility(
        &self,
        first: ChineseZodiacSign,
        second: ChineseZodiacSign,
    ) -> Result<CompatibilityInfo>;

    async fn planet_info(&self, planet: &str) -> Result<PlanetInfo>;
    async fn closest_planet(&self) -> Result<String>;
    async fn astrological_events(&self) -> Result<Vec<AstrologicalEvent>>;
    async fn daily_fact(&self, topic: FactTopic) -> Result<String>;

    async fn sign_from_birth_data(&self, birth_date: &str, birth_place: &str)
        -> Result<ZodiacSign>;
    async fn chinese_sign_from_birth_date(&self, birth_date: &str) -> Result<ChineseZodiacSign>;

    async fn astro_story(&self, topic: &str) -> Result<String>;
    async fn cosmic_content(&self, category: &str, topic: &str) -> Result<String>;
    async fn topic_image(&self, topic: &str) -> Result<GeneratedImage>;
}

/// String key/value persistence in the shape of browser local storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}
