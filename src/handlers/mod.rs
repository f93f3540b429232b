mod controls;

use crate::state::AppState;
use log::{error, info, warn};
use serenity::model::application::interaction::Interaction;
use serenity::prelude::*;

pub use controls::handle_component;

pub async fn handle_interaction(state: &AppState, ctx: &Context, interaction: Interaction) {
    let result = match interaction {
        Interaction::ApplicationCommand(command) => {
            info!("Received command: {}", command.data.name);
            crate::commands::handle_command(state, ctx, &command).await
        }
        Interaction::MessageComponent(component) => handle_component(state, ctx, &component).await,
        _ => {
            warn!("Unhandled interaction type: {:?}", interaction.kind());
            Ok(())
        }
    };

    if let Err(why) = result {
        error!("Interaction handler error: {:?}", why);
    }
}
