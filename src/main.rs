mod commands;
mod config;
mod handlers;
mod models;
mod state;
mod store;
mod tasks;
mod views;
mod voting;

use config::Config;
use log::{error, info, warn};
use serenity::async_trait;
use serenity::model::application::interaction::Interaction;
use serenity::model::gateway::Ready;
use serenity::model::id::GuildId;
use serenity::prelude::*;
use state::AppState;
use std::env;
use std::sync::Arc;
use store::{DataSource, HttpStore, Snapshot};

struct Bot {
    state: AppState,
    guild_id: Option<GuildId>,
}

#[async_trait]
impl EventHandler for Bot {
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let state = self.state.clone();
        let ctx_clone = ctx.clone();

        // Store fetches can be slow; keep them off the gateway task.
        tokio::spawn(async move {
            handlers::handle_interaction(&state, &ctx_clone, interaction).await;
        });
    }

    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("{} is connected!", ready.user.name);

        match commands::register_commands(&ctx, self.guild_id).await {
            Ok(()) => info!("Successfully registered slash commands."),
            Err(why) => error!("Failed to register slash commands: {:?}", why),
        }
    }
}

/// One pass over every data operation, printed as JSON. Used to check store connectivity.
async fn probe(source: &dyn DataSource) -> Result<(), serde_json::Error> {
    let snapshot = Snapshot::load(source).await;
    info!(
        "Probe read {} voters and {} votes",
        snapshot.voters.len(),
        snapshot.votes.len()
    );

    println!("voters:\n{}", serde_json::to_string_pretty(&snapshot.voters)?);
    println!("votes:\n{}", serde_json::to_string_pretty(&snapshot.votes)?);
    println!(
        "voters with status:\n{}",
        serde_json::to_string_pretty(&voting::status_join(&snapshot.voters, &snapshot.votes))?
    );
    println!(
        "vote counts:\n{}",
        serde_json::to_string_pretty(&voting::tally(&snapshot.votes))?
    );
    println!(
        "dashboard stats:\n{}",
        serde_json::to_string_pretty(&voting::dashboard_stats(&snapshot.voters, &snapshot.votes))?
    );

    let repeats = voting::repeat_voters(&snapshot.votes);
    if !repeats.is_empty() {
        warn!("{} voter(s) appear on more than one ballot", repeats.len());
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return;
        }
    };

    let store = match HttpStore::new(&config.store_url, config.request_timeout) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            error!("Failed to build store client: {}", e);
            return;
        }
    };
    info!("Reading from document store at {}", config.store_url);

    if env::args().any(|arg| arg == "--probe") {
        if let Err(e) = probe(store.as_ref()).await {
            error!("Probe failed: {}", e);
        }
        return;
    }

    let token = match config.require_token() {
        Ok(token) => token.to_string(),
        Err(e) => {
            error!("{}", e);
            return;
        }
    };

    let intents = GatewayIntents::GUILDS | GatewayIntents::GUILD_INTEGRATIONS;

    let bot = Bot {
        state: AppState::new(store, config.view_ttl),
        guild_id: config.guild_id.map(GuildId),
    };

    let mut client = match Client::builder(&token, intents).event_handler(bot).await {
        Ok(client) => client,
        Err(why) => {
            error!("Err creating client: {:?}", why);
            return;
        }
    };

    if let Err(why) = client.start().await {
        error!("Client error: {:?}", why);
    }
}
