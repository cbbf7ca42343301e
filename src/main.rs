use celestial_compass::config::cli::DEFAULT_CONFIG_FILE;
use celestial_compass::core::discovery::BirthData;
use celestial_compass::core::slot::SlotView;
use celestial_compass::domain::catalog;
use celestial_compass::domain::model::AstrologyMode;
use celestial_compass::domain::system::AstrologySystem;
use celestial_compass::utils::error::{CompassError, ErrorSeverity, Result};
use celestial_compass::utils::{logger, validation::Validate};
use celestial_compass::{
    CliConfig, Command, Compass, CompassConfig, FileStore, GeminiProvider, Outcome, Phase,
    SelectionCoordinator,
};
use clap::Parser;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(3);
        }
    };

    let level = config.logging.level.as_deref();
    if cli.json_logs || config.json_logs() {
        logger::init_json_logger(cli.verbose, level);
    } else {
        logger::init_cli_logger(cli.verbose, level);
    }

    tracing::info!("Starting celestial-compass");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
        tracing::debug!("Resolved config: {:?}", config);
    }

    if let Err(e) = cli.validate().and_then(|_| config.validate()) {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    match run(&cli, &config).await {
        Ok(Outcome::Failed(message)) => {
            tracing::error!("❌ {}", message);
            eprintln!("❌ {}", message);
            std::process::exit(2);
        }
        Ok(_) => {}
        Err(e) => {
            tracing::error!(
                "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 4,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }
}

/// Explicit `--config`, else `celestial-compass.toml` if present, else
/// defaults. `--store` wins over the file.
fn load_config(cli: &CliConfig) -> Result<CompassConfig> {
    let mut config = match &cli.config {
        Some(path) => CompassConfig::from_file(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            CompassConfig::from_file(DEFAULT_CONFIG_FILE)?
        }
        None => CompassConfig::default(),
    };

    if let Some(store) = &cli.store {
        config.store.path = store.clone();
    }
    Ok(config)
}

async fn run(cli: &CliConfig, config: &CompassConfig) -> Result<Outcome> {
    let api_key = match config.api_key() {
        Ok(key) => key,
        Err(e) if cli.command.needs_provider() => return Err(e),
        Err(_) => String::new(),
    };

    let provider = Arc::new(GeminiProvider::new(config.gemini_config_with_key(api_key))?);
    let store = Arc::new(FileStore::open(&config.store.path)?);
    tracing::debug!("Selection store: {}", store.path().display());
    let compass = Compass::new(provider, store, config.wheel_layout());
    let mode = cli.mode.unwrap_or_else(|| compass.mode());

    match &cli.command {
        Command::Mode { mode: Some(new_mode) } => {
            compass.set_mode(*new_mode);
            println!("✅ Astrology mode set to {}", new_mode);
            Ok(Outcome::Committed)
        }
        Command::Mode { mode: None } => {
            println!("Astrology mode: {}", compass.mode());
            Ok(Outcome::Committed)
        }
        Command::Topics => {
            print_topics();
            Ok(Outcome::Committed)
        }
        Command::Restore => {
            let (western, chinese) = compass.restore().await;
            print_selection(&compass.western)?;
            print_selection(&compass.chinese)?;
            Ok(worst_of(western, chinese))
        }
        Command::Planet { name } => {
            if !catalog::is_planet(name) {
                return Err(CompassError::invalid_input(
                    "planet",
                    format!("expected one of {}", catalog::PLANETS.join(", ")),
                ));
            }
            let outcome = compass.explorer.select_planet(name).await;
            print_slot("🪐 Planet", &compass.explorer.planet())?;
            Ok(outcome)
        }
        Command::ClosestPlanet => {
            let outcome = compass.explorer.find_closest_planet().await;
            print_slot("🔭 Closest planet", &compass.explorer.closest_planet())?;
            print_slot("🪐 Planet", &compass.explorer.planet())?;
            Ok(outcome)
        }
        Command::Story { topic } => {
            let outcome = compass.explorer.select_story(topic).await;
            print_slot("📜 Story", &compass.explorer.story())?;
            Ok(outcome)
        }
        Command::Mystery { topic } => {
            let category = catalog::mystery_category_of(topic).ok_or_else(|| {
                CompassError::invalid_input("mystery topic", format!("unknown topic '{}'", topic))
            })?;
            let outcome = compass.explorer.select_mystery(category, topic).await;
            print_slot("🌌 Mystery", &compass.explorer.mystery())?;
            Ok(outcome)
        }
        Command::Facts => {
            let outcome = compass.almanac.load_facts().await;
            print_slot("✨ Today's facts", &compass.almanac.facts())?;
            Ok(outcome)
        }
        Command::Events => {
            let outcome = compass.almanac.load_events().await;
            print_slot("🌙 Today's events", &compass.almanac.events())?;
            Ok(outcome)
        }
        Command::Discover { date, place } => {
            let birth = BirthData {
                date: date.clone(),
                place: place.clone(),
            };
            let outcome = compass.discover_signs(birth).await;
            if outcome == Outcome::Skipped {
                println!("Both a birth date and a birth place are needed.");
            }
            print_slot("🔮 Your signs", &compass.discovery.view())?;
            Ok(outcome)
        }
        command => match mode {
            AstrologyMode::Western => run_sign_command(&compass, config, &compass.western, command).await,
            AstrologyMode::Chinese => run_sign_command(&compass, config, &compass.chinese, command).await,
        },
    }
}

async fn run_sign_command<S: AstrologySystem>(
    compass: &Compass,
    config: &CompassConfig,
    coordinator: &SelectionCoordinator<S>,
    command: &Command,
) -> Result<Outcome> {
    match command {
        Command::Wheel => {
            let layout = config.wheel_layout();
            println!("{} wheel", S::MODE);
            for slot in compass.wheel(coordinator) {
                let marker = if slot.selected { "▶" } else { " " };
                let (left, top) = slot
                    .position
                    .anchor(layout.container_diameter, layout.item_diameter);
                println!(
                    "{} {} {:<12} left={:>7.2} top={:>7.2} {}",
                    marker,
                    slot.symbol,
                    slot.name,
                    left,
                    top,
                    slot.caption.unwrap_or_default()
                );
            }
            Ok(Outcome::Committed)
        }
        Command::Select { sign } => {
            let sign: S::Sign = sign.parse()?;
            let outcome = coordinator.select_sign(sign).await;
            print_selection(coordinator)?;
            Ok(outcome)
        }
        Command::Timeframe { timeframe } => {
            coordinator.set_timeframe(*timeframe);
            println!("✅ {} timeframe set to {}", S::MODE, timeframe);
            Ok(Outcome::Committed)
        }
        Command::Horoscope => {
            let outcome = coordinator.refresh_horoscope().await;
            if outcome == Outcome::Skipped {
                println!("No {} sign selected yet.", S::MODE);
            }
            print_selection(coordinator)?;
            Ok(outcome)
        }
        Command::Compat { first, second } => {
            let first: S::Sign = first.parse()?;
            let second: S::Sign = second.parse()?;
            let outcome = coordinator.check_compatibility(first, second).await;
            let view = coordinator.compatibility();
            if let Some(result) = &view.result {
                println!("💞 {} × {}: {}%", first, second, result.percentage);
                println!("{}", result.explanation);
            }
            Ok(outcome)
        }
        other => Err(CompassError::invalid_input(
            "command",
            format!("{:?} does not apply to a sign", other),
        )),
    }
}

fn print_selection<S: AstrologySystem>(coordinator: &SelectionCoordinator<S>) -> Result<()> {
    let view = coordinator.view();
    match view.selection.sign {
        Some(sign) => println!(
            "{} {} · {} [{}]",
            S::symbol(sign),
            sign,
            view.selection.timeframe,
            phase_label(&view.phase)
        ),
        None => println!("No {} sign selected.", S::MODE),
    }
    if let Some(info) = &view.info {
        println!("{}", serde_json::to_string_pretty(info)?);
    }
    if let Some(horoscope) = &view.horoscope {
        println!("{}", serde_json::to_string_pretty(horoscope)?);
    }
    Ok(())
}

fn print_slot<K, V: Serialize>(title: &str, view: &SlotView<K, V>) -> Result<()> {
    println!("{} [{}]", title, phase_label(&view.phase));
    if let Some(value) = &view.value {
        println!("{}", serde_json::to_string_pretty(value)?);
    }
    Ok(())
}

fn phase_label(phase: &Phase) -> &str {
    match phase {
        Phase::Idle => "idle",
        Phase::Loading => "loading",
        Phase::Ready => "ready",
        Phase::Error(message) => message.as_str(),
    }
}

fn print_topics() {
    println!("📜 Stories");
    for topic in catalog::ASTRO_MYTH_TOPICS {
        println!("  - {}", topic);
    }
    for (category, topics) in catalog::MYSTERY_TOPICS {
        println!("🌌 {}", category);
        for topic in topics {
            println!("  - {}", topic);
        }
    }
}

fn worst_of(first: Outcome, second: Outcome) -> Outcome {
    match (first, second) {
        (failed @ Outcome::Failed(_), _) | (_, failed @ Outcome::Failed(_)) => failed,
        (Outcome::Committed, _) | (_, Outcome::Committed) => Outcome::Committed,
        (first, _) => first,
    }
}
