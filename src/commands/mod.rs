pub mod dashboard;

use crate::state::AppState;
use serenity::model::application::command::Command;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::model::id::GuildId;
use serenity::prelude::*;

/// Register the slash commands on one guild (fast to propagate) or globally.
pub async fn register_commands(ctx: &Context, guild_id: Option<GuildId>) -> Result<(), serenity::Error> {
    match guild_id {
        Some(guild_id) => {
            guild_id
                .set_application_commands(&ctx.http, |commands| {
                    commands.create_application_command(|command| dashboard::create_dashboard_command(command))
                })
                .await?;
        }
        None => {
            Command::set_global_application_commands(&ctx.http, |commands| {
                commands.create_application_command(|command| dashboard::create_dashboard_command(command))
            })
            .await?;
        }
    }
    Ok(())
}

pub async fn handle_command(
    state: &AppState,
    ctx: &Context,
    command: &ApplicationCommandInteraction,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    match command.data.name.as_str() {
        "dashboard" => dashboard::handle_dashboard_command(state, ctx, command).await?,
        _ => {
            command
                .create_interaction_response(&ctx.http, |response| {
                    response
                        .kind(InteractionResponseType::ChannelMessageWithSource)
                        .interaction_response_data(|message| message.content("Unknown command").ephemeral(true))
                })
                .await?;
        }
    }

    Ok(())
}
