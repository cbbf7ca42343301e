//! Content provider backed by the Gemini Generative Language API.
//!
//! Text calls ask for JSON constrained by a response schema and deserialize
//! the returned text into the record for that call. Images come back as
//! inline base64 data and are handed on as `data:` URLs.

use crate::core::ContentProvider;
use crate::domain::catalog;
use crate::domain::model::{
    AstrologicalEvent, ChineseZodiacInfo, ChineseZodiacSign, CompatibilityInfo, FactTopic,
    GeneratedImage, Horoscope, PlanetInfo, Timeframe, ZodiacInfo, ZodiacSign,
};
use crate::utils::error::{CompassError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
const IMAGE_ASPECT_RATIO: &str = "16:9";

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub text_model: String,
    pub image_model: String,
    pub timeout: Duration,
}

pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

#[derive(Deserialize)]
struct FactResponse {
    fact: String,
}

#[derive(Deserialize)]
struct StoryResponse {
    story: String,
}

#[derive(Deserialize)]
struct CosmicContentResponse {
    content: String,
}

#[derive(Deserialize)]
struct WesternSignResponse {
    #[serde(rename = "zodiacSign")]
    zodiac_sign: ZodiacSign,
}

#[derive(Deserialize)]
struct ChineseSignResponse {
    #[serde(rename = "chineseZodiacSign")]
    chinese_zodiac_sign: ChineseZodiacSign,
}

#[derive(Deserialize)]
struct ClosestPlanetResponse {
    #[serde(rename = "planetName")]
    planet_name: String,
}

impl GeminiProvider {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            model
        )
    }

    async fn post(&self, operation: &str, model: &str, body: &Value) -> Result<Value> {
        let url = self.endpoint(model);
        tracing::debug!("Requesting {} from {}", operation, url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("{} response status: {}", operation, status);
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompassError::ProviderStatusError {
                operation: operation.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }

    async fn generate<T: DeserializeOwned>(
        &self,
        operation: &str,
        prompt: String,
        schema: Value,
    ) -> Result<T> {
        let body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": schema,
            },
        });

        let value = self.post(operation, &self.config.text_model, &body).await?;
        let text = response_text(&value)
            .ok_or_else(|| CompassError::malformed(operation, "response has no text parts"))?;

        serde_json::from_str(&text).map_err(|e| CompassError::malformed(operation, e.to_string()))
    }

    async fn generate_image(&self, topic: &str) -> Result<GeneratedImage> {
        let prompt = format!(
            "A breathtaking, cinematic, and artistic digital painting of \"{}\". High detail, fantasy, cosmic, vibrant colors, epic composition.",
            topic
        );
        let body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "responseModalities": ["IMAGE"],
                "imageConfig": { "aspectRatio": IMAGE_ASPECT_RATIO },
            },
        });

        let value = self.post("topic image", &self.config.image_model, &body).await?;
        first_inline_image(&value)
            .ok_or_else(|| CompassError::malformed("topic image", "response has no inline image"))
    }
}

/// Concatenated text parts of the first candidate.
fn response_text(value: &Value) -> Option<String> {
    let parts = value
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()?;

    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();

    (!text.trim().is_empty()).then_some(text)
}

fn first_inline_image(value: &Value) -> Option<GeneratedImage> {
    let candidates = value.get("candidates")?.as_array()?;

    candidates
        .iter()
        .filter_map(|candidate| candidate.get("content")?.get("parts")?.as_array())
        .flatten()
        .find_map(|part| {
            let inline = part.get("inlineData").or_else(|| part.get("inline_data"))?;
            let data = inline.get("data").and_then(Value::as_str)?;
            let mime_type = inline
                .get("mimeType")
                .or_else(|| inline.get("mime_type"))
                .and_then(Value::as_str)
                .unwrap_or("image/png");
            Some(GeneratedImage {
                data_url: format!("data:{};base64,{}", mime_type, data),
            })
        })
}

fn string_prop(description: &str) -> Value {
    json!({ "type": "STRING", "description": description })
}

fn string_list_prop(description: &str) -> Value {
    json!({ "type": "ARRAY", "items": { "type": "STRING" }, "description": description })
}

fn enum_prop<'a>(description: &str, values: impl IntoIterator<Item = &'a str>) -> Value {
    let values: Vec<&str> = values.into_iter().collect();
    json!({ "type": "STRING", "description": description, "enum": values })
}

fn object_schema(properties: Value, required: &[&str]) -> Value {
    json!({ "type": "OBJECT", "properties": properties, "required": required })
}

fn horoscope_schema() -> Value {
    object_schema(
        json!({
            "love": string_prop("Horoscope for love life."),
            "career": string_prop("Horoscope for career and work."),
            "health": string_prop("Horoscope for health and wellness."),
        }),
        &["love", "career", "health"],
    )
}

fn compatibility_schema() -> Value {
    object_schema(
        json!({
            "percentage": { "type": "INTEGER", "description": "A compatibility score from 0 to 100." },
            "explanation": string_prop("A detailed explanation of the compatibility."),
        }),
        &["percentage", "explanation"],
    )
}

fn single_string_schema(field: &str, description: &str) -> Value {
    object_schema(json!({ (field): string_prop(description) }), &[field])
}

#[async_trait]
impl ContentProvider for GeminiProvider {
    async fn zodiac_info(&self, sign: ZodiacSign) -> Result<ZodiacInfo> {
        let schema = object_schema(
            json!({
                "personality_traits": string_list_prop("A list of key personality traits."),
                "compatibility": string_prop("General compatibility with other zodiac signs."),
                "ruling_planet": string_prop("The ruling planet of the sign."),
                "element": string_prop("The element (e.g., Fire, Water) of the sign."),
            }),
            &["personality_traits", "compatibility", "ruling_planet", "element"],
        );
        let prompt = format!(
            "Provide detailed information about the zodiac sign {}. Include key personality traits, general compatibility with other signs, its ruling planet, and element.",
            sign
        );
        self.generate("zodiac info", prompt, schema).await
    }

    async fn horoscope(&self, sign: ZodiacSign, timeframe: Timeframe) -> Result<Horoscope> {
        let prompt = format!(
            "Generate a {} horoscope for the zodiac sign {}. Provide insights on love, career, and health.",
            timeframe.as_str().to_lowercase(),
            sign
        );
        self.generate("horoscope", prompt, horoscope_schema()).await
    }

    async fn compatibility(
        &self,
        first: ZodiacSign,
        second: ZodiacSign,
    ) -> Result<CompatibilityInfo> {
        let prompt = format!(
            "Analyze the compatibility between {} and {}. Provide a compatibility percentage and a detailed explanation of their relationship dynamics, covering strengths and weaknesses.",
            first, second
        );
        self.generate("compatibility", prompt, compatibility_schema())
            .await
    }

    async fn chinese_zodiac_info(&self, sign: ChineseZodiacSign) -> Result<ChineseZodiacInfo> {
        let schema = object_schema(
            json!({
                "personality_traits": string_list_prop("A list of key personality traits."),
                "compatibility": string_prop("General compatibility with other Chinese zodiac signs."),
                "element": string_prop("The fixed element of the sign (e.g., Wood, Fire)."),
                "yin_yang": enum_prop("The Yin or Yang nature of the sign.", ["Yin", "Yang"]),
            }),
            &["personality_traits", "compatibility", "element", "yin_yang"],
        );
        let prompt = format!(
            "Provide detailed information about the Chinese zodiac sign {}. Include key personality traits, general compatibility with other signs, its fixed element, and Yin/Yang nature.",
            sign
        );
        self.generate("chinese zodiac info", prompt, schema).await
    }

    async fn chinese_horoscope(
        &self,
        sign: ChineseZodiacSign,
        timeframe: Timeframe,
    ) -> Result<Horoscope> {
        let prompt = format!(
            "Generate a {} Chinese horoscope for the zodiac sign {}. Provide insights on love, career, and health.",
            timeframe.as_str().to_lowercase(),
            sign
        );
        self.generate("chinese horoscope", prompt, horoscope_schema())
            .await
    }

    async fn chinese_compatibility(
        &self,
        first: ChineseZodiacSign,
        second: ChineseZodiacSign,
    ) -> Result<CompatibilityInfo> {
        let prompt = format!(
            "Analyze the compatibility between the Chinese zodiac signs {} and {}. Provide a compatibility percentage and a detailed explanation of their relationship dynamics, covering strengths and weaknesses.",
            first, second
        );
        self.generate("chinese compatibility", prompt, compatibility_schema())
            .await
    }

    async fn planet_info(&self, planet: &str) -> Result<PlanetInfo> {
        let schema = object_schema(
            json!({
                "name": { "type": "STRING" },
                "mass": string_prop("Mass of the planet (e.g., in kg)."),
                "diameter": string_prop("Diameter of the planet (e.g., in km)."),
                "distance_from_sun": string_prop("Average distance from the Sun (e.g., in km)."),
                "fun_facts": string_list_prop("A list of fun facts about the planet."),
            }),
            &["name", "mass", "diameter", "distance_from_sun", "fun_facts"],
        );
        let prompt = format!(
            "Provide key information about the planet {}. Include its mass, diameter, average distance from the sun, and a list of three fun facts.",
            planet
        );
        self.generate("planet info", prompt, schema).await
    }

    async fn closest_planet(&self) -> Result<String> {
        let options: Vec<&str> = catalog::neighbour_planets().collect();
        let schema = object_schema(
            json!({
                "planetName": enum_prop(
                    "The name of the planet currently closest to Earth.",
                    options.iter().copied(),
                ),
            }),
            &["planetName"],
        );
        let prompt = format!(
            "Based on current astronomical data, which of the following planets is closest to Earth right now? The options are: {}.",
            options.join(", ")
        );
        let response: ClosestPlanetResponse =
            self.generate("closest planet", prompt, schema).await?;
        Ok(response.planet_name)
    }

    async fn astrological_events(&self) -> Result<Vec<AstrologicalEvent>> {
        let schema = json!({
            "type": "ARRAY",
            "items": object_schema(
                json!({
                    "emoji": string_prop("An emoji that represents the event."),
                    "title": string_prop("The title of the astrological event."),
                    "description": string_prop("A brief, user-friendly description of the event's significance."),
                }),
                &["emoji", "title", "description"],
            ),
        });
        let prompt = "Generate a list of 3-5 significant astrological events for today. For each event, provide an appropriate emoji, a title, and a short, user-friendly description. Examples include moon phases, planetary retrogrades, or major aspects between planets.".to_string();
        self.generate("astrological events", prompt, schema).await
    }

    async fn daily_fact(&self, topic: FactTopic) -> Result<String> {
        let prompt = format!(
            "Generate a single, fascinating, and little-known fact about {}. The fact should be concise and easy for a general audience to understand.",
            topic.as_str()
        );
        let schema = single_string_schema("fact", "A fascinating fact about the specified topic.");
        let response: FactResponse = self.generate("daily fact", prompt, schema).await?;
        Ok(response.fact)
    }

    async fn sign_from_birth_data(
        &self,
        birth_date: &str,
        birth_place: &str,
    ) -> Result<ZodiacSign> {
        let schema = object_schema(
            json!({
                "zodiacSign": enum_prop(
                    "The calculated zodiac sign.",
                    ZodiacSign::ALL.into_iter().map(ZodiacSign::as_str),
                ),
            }),
            &["zodiacSign"],
        );
        let prompt = format!(
            "Determine the zodiac sign for a person born on {} in {}.",
            birth_date, birth_place
        );
        let response: WesternSignResponse = self.generate("zodiac sign", prompt, schema).await?;
        Ok(response.zodiac_sign)
    }

    async fn chinese_sign_from_birth_date(&self, birth_date: &str) -> Result<ChineseZodiacSign> {
        let schema = object_schema(
            json!({
                "chineseZodiacSign": enum_prop(
                    "The calculated Chinese zodiac sign.",
                    ChineseZodiacSign::ALL.into_iter().map(ChineseZodiacSign::as_str),
                ),
            }),
            &["chineseZodiacSign"],
        );
        let prompt = format!(
            "Determine the Chinese zodiac sign for a person born on {}.",
            birth_date
        );
        let response: ChineseSignResponse =
            self.generate("chinese zodiac sign", prompt, schema).await?;
        Ok(response.chinese_zodiac_sign)
    }

    async fn astro_story(&self, topic: &str) -> Result<String> {
        let prompt = format!(
            "Generate a fascinating and concise story, myth, or historical account about \"{}\" in astronomy. Keep it engaging for a general audience, formatted with paragraphs.",
            topic
        );
        let schema = single_string_schema(
            "story",
            "A compelling story or myth about the astronomical topic.",
        );
        let response: StoryResponse = self.generate("astro story", prompt, schema).await?;
        Ok(response.story)
    }

    async fn cosmic_content(&self, category: &str, topic: &str) -> Result<String> {
        let prompt = format!(
            "Generate a fascinating and detailed explanation about \"{}\" within the category of \"{}\". The explanation should be engaging for a general audience, well-structured with paragraphs, and easy to understand.",
            topic, category
        );
        let schema = single_string_schema(
            "content",
            "A detailed and engaging explanation of the cosmic topic.",
        );
        let response: CosmicContentResponse =
            self.generate("cosmic content", prompt, schema).await?;
        Ok(response.content)
    }

    async fn topic_image(&self, topic: &str) -> Result<GeneratedImage> {
        self.generate_image(topic).await
    }
}
