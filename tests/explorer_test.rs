mod common;

use anyhow::Result;
use celestial_compass::core::almanac::Almanac;
use celestial_compass::core::explorer::TopicExplorer;
use celestial_compass::domain::catalog;
use celestial_compass::{Outcome, Phase};
use chrono::NaiveDate;
use common::StubProvider;

#[tokio::test]
async fn test_planet_lookup() -> Result<()> {
    let provider = StubProvider::new();
    let explorer = TopicExplorer::new(provider.clone());

    assert_eq!(explorer.select_planet("Venus").await, Outcome::Committed);

    let view = explorer.planet();
    assert_eq!(view.key.as_deref(), Some("Venus"));
    assert_eq!(view.phase, Phase::Ready);
    assert_eq!(view.value.unwrap().diameter, "12,104 km");
    Ok(())
}

#[tokio::test]
async fn test_closest_planet_then_loads_that_planet() -> Result<()> {
    let provider = StubProvider::new();
    provider.set_closest_planet("Mercury");
    let explorer = TopicExplorer::new(provider.clone());

    assert_eq!(explorer.find_closest_planet().await, Outcome::Committed);
    assert_eq!(explorer.closest_planet().value.as_deref(), Some("Mercury"));
    assert_eq!(explorer.planet().key.as_deref(), Some("Mercury"));
    assert_eq!(
        provider.calls(),
        vec!["closest_planet:", "planet_info:Mercury"]
    );
    Ok(())
}

#[tokio::test]
async fn test_closest_planet_must_be_a_neighbour() -> Result<()> {
    let provider = StubProvider::new();
    provider.set_closest_planet("Earth");
    let explorer = TopicExplorer::new(provider.clone());

    let outcome = explorer.find_closest_planet().await;
    assert_eq!(
        outcome,
        Outcome::Failed("Failed to find the closest planet. Please try again later.".to_string())
    );
    assert_eq!(provider.count("planet_info"), 0);
    assert_eq!(explorer.planet().phase, Phase::Idle);
    Ok(())
}

#[tokio::test]
async fn test_story_needs_text_and_image() -> Result<()> {
    let provider = StubProvider::new();
    let explorer = TopicExplorer::new(provider.clone());
    let topic = catalog::ASTRO_MYTH_TOPICS[0];

    assert_eq!(explorer.select_story(topic).await, Outcome::Committed);
    let story = explorer.story().value.unwrap();
    assert_eq!(story.text, format!("Once upon a time, {}", topic));
    assert!(story.image.data_url.starts_with("data:image/png;base64,"));

    provider.fail("topic_image");
    let outcome = explorer.select_story(topic).await;
    assert_eq!(
        outcome,
        Outcome::Failed("Failed to fetch the story and its visual. Please try again later.".to_string())
    );
    assert!(explorer.story().value.is_none());
    Ok(())
}

#[tokio::test]
async fn test_mystery_is_keyed_by_category_and_topic() -> Result<()> {
    let provider = StubProvider::new();
    let explorer = TopicExplorer::new(provider.clone());
    let (category, topics) = catalog::MYSTERY_TOPICS[0];

    assert_eq!(
        explorer.select_mystery(category, topics[1]).await,
        Outcome::Committed
    );
    let view = explorer.mystery();
    assert_eq!(
        view.key,
        Some((category.to_string(), topics[1].to_string()))
    );
    assert_eq!(view.value.unwrap().text, format!("{} explained", topics[1]));

    // Topic areas do not disturb each other.
    assert_eq!(explorer.story().phase, Phase::Idle);
    Ok(())
}

#[tokio::test]
async fn test_daily_facts_join_three_topics_once_per_day() -> Result<()> {
    let provider = StubProvider::new();
    let almanac = Almanac::new(provider.clone());
    let day = NaiveDate::parse_from_str("2026-10-19", "%Y-%m-%d")?;

    assert_eq!(almanac.load_facts_for(day).await, Outcome::Committed);
    let facts = almanac
        .facts()
        .value
        .ok_or_else(|| anyhow::anyhow!("facts were not committed"))?;
    assert_eq!(facts.western, "A fact about western astrology");
    assert_eq!(facts.chinese, "A fact about chinese astrology");
    assert_eq!(facts.astronomy, "A fact about astronomy");
    assert_eq!(provider.count("daily_fact"), 3);

    assert_eq!(almanac.load_facts_for(day).await, Outcome::Skipped);
    assert_eq!(provider.count("daily_fact"), 3);

    let next_day = day.succ_opt().unwrap();
    assert_eq!(almanac.load_facts_for(next_day).await, Outcome::Committed);
    assert_eq!(provider.count("daily_fact"), 6);
    Ok(())
}

#[tokio::test]
async fn test_failed_facts_can_be_retried_the_same_day() -> Result<()> {
    let provider = StubProvider::new();
    provider.fail("daily_fact");
    let almanac = Almanac::new(provider.clone());
    let day = NaiveDate::parse_from_str("2026-01-01", "%Y-%m-%d")?;

    assert!(matches!(almanac.load_facts_for(day).await, Outcome::Failed(_)));
    assert!(almanac.facts().phase.error_message().is_some());
    assert!(matches!(almanac.load_facts_for(day).await, Outcome::Failed(_)));
    Ok(())
}

#[tokio::test]
async fn test_events_must_not_be_empty() -> Result<()> {
    let provider = StubProvider::new();
    let almanac = Almanac::new(provider.clone());
    let day = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();

    assert_eq!(almanac.load_events_for(day).await, Outcome::Committed);
    assert_eq!(almanac.events().value.unwrap()[0].emoji, "🌕");

    let empty = StubProvider::new();
    empty.return_no_events();
    let almanac = Almanac::new(empty.clone());
    assert_eq!(
        almanac.load_events_for(day).await,
        Outcome::Failed("Failed to fetch astrological events. Please try again.".to_string())
    );
    Ok(())
}
