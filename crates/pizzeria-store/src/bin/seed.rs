//! Seeds demo accounts into the configured store.
//!
//! ## Usage
//! ```text
//! PIZZERIA_MODE=native  cargo run -p pizzeria-store --bin seed
//! PIZZERIA_MODE=browser cargo run -p pizzeria-store --bin seed
//! ```
//! Idempotent: accounts that already exist are skipped (duplicate email).

use pizzeria_core::NewUser;
use pizzeria_store::{DataService, StoreConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn demo_users() -> Vec<NewUser> {
    vec![
        NewUser {
            username: "giuseppe".to_string(),
            first_name: "Giuseppe".to_string(),
            last_name: "Rossi".to_string(),
            email: "giuseppe@pizzeria.example".to_string(),
            age: 34,
            gender: "male".to_string(),
            password: "margherita1".to_string(),
            photo: None,
        },
        NewUser {
            username: "maria".to_string(),
            first_name: "Maria".to_string(),
            last_name: "Bianchi".to_string(),
            email: "maria@pizzeria.example".to_string(),
            age: 28,
            gender: "female".to_string(),
            password: "diavola22".to_string(),
            photo: None,
        },
    ]
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = StoreConfig::from_env();
    info!(
        mode = config.mode.as_str(),
        data_dir = %config.data_dir.display(),
        "Seeding store"
    );

    let service = DataService::new(config);
    service.initialize().await?;

    let mut created = 0usize;
    for user in demo_users() {
        let email = user.email.clone();
        if service.register_user(user).await {
            info!(email = %email, "Demo account created");
            created += 1;
        } else {
            warn!(email = %email, "Demo account skipped (already exists?)");
        }
    }

    info!(created, "Seeding complete");
    Ok(())
}
