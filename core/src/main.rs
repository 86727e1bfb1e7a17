//! Wellness Companion
//!
//! An interactive shell over the wellness state core.
//!
//! ## Architecture
//!
//! - Stores: auth and wellness state containers
//! - Storage: persisted key-value blobs in SQLite
//! - AI: remote text completions for motivation, insights, and coaching

use std::io::Write as _;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wellness_companion_core::ai::{CoachSession, CompletionClient, HttpCompletionClient};
use wellness_companion_core::config;
use wellness_companion_core::storage::{KeyValueStore, MemoryStore, SqliteStore};
use wellness_companion_core::stores::{AuthState, AuthStore, MockGoogleAuth, WellnessStore};
use wellness_companion_shared::models::{
    BreakKind, CounterMetric, MoodType, ProfileUpdate, RatingMetric, SleepInput,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing();

    // Load configuration
    let config = config::AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if config::AppConfig::is_production() { "production" } else { "development" },
        "Starting Wellness Companion"
    );

    // Open local storage; --ephemeral keeps everything in memory
    let storage: Arc<dyn KeyValueStore> = if std::env::args().any(|a| a == "--ephemeral") {
        info!("Running with in-memory storage, nothing will persist");
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(SqliteStore::open(&config.storage.path, config.storage.max_connections).await?)
    };

    // Completion client for motivation, insights, and coaching
    let ai: Arc<dyn CompletionClient> = Arc::new(HttpCompletionClient::new(&config.ai.endpoint)?);

    // Wire the stores
    let auth = AuthStore::new(
        storage.clone(),
        Arc::new(MockGoogleAuth::new(Duration::from_millis(
            config.auth.mock_delay_ms,
        ))),
    );
    let wellness = WellnessStore::new(storage, ai.clone())
        .with_watch_delay(Duration::from_millis(config.watch.connect_delay_ms));

    // Hydrate from storage before taking commands
    auth.load().await?;
    wellness.load().await?;

    run_shell(&auth, &wellness, &ai).await
}

/// Initialize tracing/logging
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config::AppConfig::is_production() {
            "wellness_companion_core=info".into()
        } else {
            "wellness_companion_core=debug,sqlx=warn".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config::AppConfig::is_production() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        // Pretty logging for development
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

// ============================================================================
// Shell
// ============================================================================

/// Read commands from stdin until EOF or `quit`
async fn run_shell(
    auth: &AuthStore,
    wellness: &WellnessStore,
    ai: &Arc<dyn CompletionClient>,
) -> Result<()> {
    println!("Wellness Companion (type 'help' for commands)");

    // One coach conversation per shell session, started on first use
    let mut coach: Option<CoachSession> = None;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("wellness> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "quit" | "exit") {
            break;
        }

        if let Err(e) = handle_command(line, auth, wellness, ai, &mut coach).await {
            println!("Error: {e}");
        }
    }

    println!("Goodbye!");
    Ok(())
}

async fn handle_command(
    line: &str,
    auth: &AuthStore,
    wellness: &WellnessStore,
    ai: &Arc<dyn CompletionClient>,
    coach: &mut Option<CoachSession>,
) -> Result<()> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    match parts.as_slice() {
        ["help"] => print_help(),

        ["status"] => print_status(auth, wellness).await,
        ["score"] => print_score(wellness).await,

        ["signin"] => {
            println!("Signing in...");
            match auth.sign_in().await? {
                Some(user) => println!("Signed in as {} <{}>", user.name, user.email),
                None => println!("Sign-in cancelled"),
            }
        }
        ["signout"] => {
            auth.sign_out().await?;
            println!("Signed out");
        }
        ["profile", field, rest @ ..] if !rest.is_empty() => {
            let value = rest.join(" ");
            let update = match *field {
                "name" => ProfileUpdate {
                    name: Some(value),
                    ..ProfileUpdate::default()
                },
                "email" => ProfileUpdate {
                    email: Some(value),
                    ..ProfileUpdate::default()
                },
                "picture" => ProfileUpdate {
                    picture: Some(value),
                    ..ProfileUpdate::default()
                },
                other => bail!("unknown profile field '{other}' (name, email, picture)"),
            };
            match auth.update_profile(update).await? {
                Some(user) => println!("Profile updated: {} <{}>", user.name, user.email),
                None => println!("Sign in first"),
            }
        }

        ["checkin", mood, note @ ..] => {
            let mood = MoodType::from_str(mood).map_err(anyhow::Error::msg)?;
            let note = (!note.is_empty()).then(|| note.join(" "));
            let entry = wellness.save_mood(mood, note).await?;
            let snapshot = wellness.snapshot().await;
            println!(
                "Feeling {} recorded ({} check-ins, {} day streak)",
                entry.mood, snapshot.check_in_count, snapshot.streak_days
            );
        }

        ["track", metric, delta] => {
            let metric = CounterMetric::from_str(metric).map_err(anyhow::Error::msg)?;
            let delta: i32 = delta
                .parse()
                .map_err(|_| anyhow!("delta must be an integer"))?;
            let metrics = wellness.update_metric(metric, delta).await?;
            println!("{} is now {}", metric, metrics.counter(metric));
        }
        ["rate", metric, value] => {
            let metric = RatingMetric::from_str(metric).map_err(anyhow::Error::msg)?;
            let value: u8 = value
                .parse()
                .map_err(|_| anyhow!("value must be 1-5"))?;
            let metrics = wellness.set_rating(metric, value).await?;
            println!("{} is now {}/5", metric, metrics.rating(metric));
        }

        ["sleep", bed, wake, quality] => {
            let quality: u8 = quality
                .parse()
                .map_err(|_| anyhow!("quality must be 1-5"))?;
            let entry = wellness
                .save_sleep(SleepInput {
                    bed_time: bed.to_string(),
                    wake_time: wake.to_string(),
                    quality,
                    date: None,
                })
                .await?;
            println!(
                "Slept {}h ({} to {}), quality {}/5",
                entry.duration, entry.bed_time, entry.wake_time, entry.quality
            );
        }

        ["toilet", kind] => {
            let kind = BreakKind::from_str(kind).map_err(anyhow::Error::msg)?;
            wellness.save_toilet_entry(kind).await?;
            let snapshot = wellness.snapshot().await;
            println!(
                "Logged ({} breaks today)",
                snapshot.today_metrics.toilet_breaks
            );
        }

        ["watch", "connect", name @ ..] if !name.is_empty() => {
            println!("Pairing...");
            let watch = wellness.connect_watch(&name.join(" ")).await?;
            println!(
                "{} connected, battery {}%, first sync done",
                watch.device_name, watch.battery_level
            );
        }
        ["watch", "sync"] => match wellness.sync_watch().await? {
            Some(watch) => println!("{} synced at {}", watch.device_name, watch.last_sync),
            None => println!("No watch connected"),
        },
        ["watch", "disconnect"] => {
            wellness.disconnect_watch().await?;
            println!("Watch disconnected");
        }

        ["motivate", rest @ ..] => {
            let mood = match rest {
                [] => None,
                [mood] => Some(MoodType::from_str(mood).map_err(anyhow::Error::msg)?),
                _ => bail!("usage: motivate [mood]"),
            };
            let message = wellness.generate_motivation(mood).await?;
            println!("{}", message.message);
        }
        ["insight"] => {
            println!("{}", wellness.generate_insight().await);
        }
        ["coach", text @ ..] if !text.is_empty() => {
            let snapshot = wellness.snapshot().await;
            let mood = snapshot.current_mood.as_ref().map(|e| e.mood);
            let session = coach.get_or_insert_with(|| {
                let session = CoachSession::new(ai.clone(), mood);
                if let Some(greeting) = session.history().first() {
                    println!("coach: {}", greeting.content);
                }
                session
            });
            if let Some(reply) = session
                .send(&text.join(" "), mood, &snapshot.today_metrics)
                .await
            {
                println!("coach: {reply}");
            }
        }

        _ => println!("Unknown command, try 'help'"),
    }

    Ok(())
}

// ============================================================================
// Output
// ============================================================================

fn print_help() {
    println!("Commands:");
    println!("  status                      today at a glance");
    println!("  score                       wellness score breakdown");
    println!("  signin | signout            mock Google sign-in");
    println!("  profile <field> <value>     update name, email, or picture");
    println!("  checkin <mood> [note]       amazing, good, okay, low, struggling");
    println!("  track <metric> <delta>      water, sleep, exercise, meals, steps");
    println!("  rate <metric> <1-5>         mood, stress, energy");
    println!("  sleep <bed> <wake> <1-5>    e.g. sleep 22:30 06:45 4");
    println!("  toilet <kind>               bathroom or hydration");
    println!("  watch connect <name>        pair a simulated smartwatch");
    println!("  watch sync | disconnect");
    println!("  motivate [mood]             fresh motivation message");
    println!("  insight                     insight from recent moods");
    println!("  coach <message>             chat with the wellness coach");
    println!("  quit");
}

async fn print_status(auth: &AuthStore, wellness: &WellnessStore) {
    match auth.state().await {
        AuthState::SignedIn(user) => println!("Signed in as {} <{}>", user.name, user.email),
        AuthState::SignedOut => println!("Signed out"),
        AuthState::Loading => println!("Auth state not loaded"),
    }

    let snapshot = wellness.snapshot().await;
    println!(
        "Score {}/100, {} check-ins, {} day streak",
        snapshot.wellness_score(),
        snapshot.check_in_count,
        snapshot.streak_days
    );
    match &snapshot.current_mood {
        Some(entry) => println!("Current mood: {}", entry.mood),
        None => println!("No mood recorded yet"),
    }
    let m = &snapshot.today_metrics;
    println!(
        "Today: {} water, {}h sleep, {}min exercise, {} meals, {} steps",
        m.water, m.sleep, m.exercise, m.meals, m.steps
    );
    match &snapshot.smartwatch {
        Some(watch) if watch.is_connected => println!(
            "Watch: {} ({}%), last sync {}",
            watch.device_name, watch.battery_level, watch.last_sync
        ),
        _ => println!("Watch: not connected"),
    }
    if let Some(message) = &snapshot.today_motivation {
        println!("Motivation: {}", message.message);
    }
}

async fn print_score(wellness: &WellnessStore) {
    let breakdown = wellness.score_breakdown().await;
    println!("Water      {:>5.1} / 12", breakdown.water);
    println!("Sleep      {:>5.1} / 15", breakdown.sleep);
    println!("Exercise   {:>5.1} / 12", breakdown.exercise);
    println!("Meals      {:>5.1} /  8", breakdown.meals);
    println!("Mood       {:>5.1} / 12", breakdown.mood);
    println!("Stress     {:>5.1} /  8", breakdown.stress);
    println!("Energy     {:>5.1} /  8", breakdown.energy);
    println!("Toilet     {:>5.1} /  3", breakdown.toilet_breaks);
    println!("Steps      {:>5.1} / 10", breakdown.steps);
    println!("Heart rate {:>5.1} /  7", breakdown.heart_rate);
    println!("Oxygen     {:>5.1} /  5", breakdown.blood_oxygen);
    println!("Total      {:>5} / 100", breakdown.total);
}
