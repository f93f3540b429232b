use crate::models::{RosterFilter, RosterQuery};
use crate::state::AppState;
use crate::tasks::ViewSession;
use crate::views::discord::{embed_panel, panel_components, MessageSink};
use crate::views::View;
use chrono::Utc;
use log::info;
use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;
use serenity::model::application::interaction::application_command::{
    ApplicationCommandInteraction, CommandDataOption,
};
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

pub fn create_dashboard_command(command: &mut CreateApplicationCommand) -> &mut CreateApplicationCommand {
    command
        .name("dashboard")
        .description("Live election dashboard")
        .create_option(|option| {
            option
                .name("overview")
                .description("Voter, ballot and turnout totals")
                .kind(CommandOptionType::SubCommand)
        })
        .create_option(|option| {
            option
                .name("voters")
                .description("Registered voters and whether they have voted")
                .kind(CommandOptionType::SubCommand)
                .create_sub_option(|sub_option| {
                    sub_option
                        .name("search")
                        .description("Search by name or voter ID")
                        .kind(CommandOptionType::String)
                        .required(false)
                })
                .create_sub_option(|sub_option| {
                    sub_option
                        .name("status")
                        .description("Which voters to list")
                        .kind(CommandOptionType::String)
                        .add_string_choice("All", "all")
                        .add_string_choice("Voted", "voted")
                        .add_string_choice("Not Voted", "not-voted")
                        .required(false)
                })
        })
        .create_option(|option| {
            option
                .name("candidates")
                .description("Candidate profiles and election information")
                .kind(CommandOptionType::SubCommand)
        })
        .create_option(|option| {
            option
                .name("tally")
                .description("Live vote count per candidate")
                .kind(CommandOptionType::SubCommand)
        })
        .create_option(|option| {
            option
                .name("statistics")
                .description("Turnout, standings and charts")
                .kind(CommandOptionType::SubCommand)
        })
        .create_option(|option| {
            option
                .name("voter")
                .description("Look up one voter")
                .kind(CommandOptionType::SubCommand)
                .create_sub_option(|sub_option| {
                    sub_option
                        .name("id")
                        .description("Voter ID")
                        .kind(CommandOptionType::String)
                        .required(true)
                })
        })
}

/// Subcommand arguments that carry a string value, by name.
fn string_args(options: &[CommandDataOption]) -> HashMap<&str, &str> {
    options
        .iter()
        .filter_map(|option| {
            let value = option.value.as_ref()?.as_str()?;
            Some((option.name.as_str(), value))
        })
        .collect()
}

/// Map a subcommand and its arguments to the view it asks for.
pub fn parse_view(name: &str, args: &HashMap<&str, &str>) -> Option<View> {
    match name {
        "overview" => Some(View::Overview),
        "voters" => Some(View::Roster(RosterQuery {
            search: args.get("search").map(|s| s.to_string()),
            filter: args
                .get("status")
                .and_then(|key| RosterFilter::from_key(key))
                .unwrap_or_default(),
        })),
        "candidates" => Some(View::Candidates),
        "tally" => Some(View::Tally),
        "statistics" => Some(View::Statistics),
        "voter" => args.get("id").map(|id| View::Voter(id.trim().to_string())),
        _ => None,
    }
}

pub async fn handle_dashboard_command(
    state: &AppState,
    ctx: &Context,
    command: &ApplicationCommandInteraction,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let subcommand = match command.data.options.first() {
        Some(option) => option,
        None => {
            send_error_response(ctx, command, "No subcommand provided").await?;
            return Ok(());
        }
    };

    let view = match parse_view(&subcommand.name, &string_args(&subcommand.options)) {
        Some(view) => view,
        None => {
            send_error_response(ctx, command, "Unknown subcommand").await?;
            return Ok(());
        }
    };

    match view.refresh_every() {
        Some(every) => open_live_view(state, ctx, command, view, every).await,
        None => send_snapshot(state, ctx, command, view).await,
    }
}

async fn open_live_view(
    state: &AppState,
    ctx: &Context,
    command: &ApplicationCommandInteraction,
    view: View,
    every: std::time::Duration,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let placeholder = view.loading_panel();
    command
        .create_interaction_response(&ctx.http, |response| {
            response
                .kind(InteractionResponseType::ChannelMessageWithSource)
                .interaction_response_data(|message| {
                    message
                        .embed(|e| embed_panel(e, &placeholder))
                        .components(|c| panel_components(c, &placeholder))
                })
        })
        .await?;

    let message = command.get_interaction_response(&ctx.http).await?;
    info!(
        "Starting live {} view in channel {} (message {})",
        view.name(),
        message.channel_id,
        message.id
    );

    let sink = Arc::new(MessageSink::new(Arc::clone(&ctx.http), message.channel_id, message.id));
    let session = Arc::new(ViewSession::new(view, Arc::clone(&state.source), sink));
    state
        .views
        .open(message.id.0, session, every, state.view_ttl)
        .await;
    Ok(())
}

async fn send_snapshot(
    state: &AppState,
    ctx: &Context,
    command: &ApplicationCommandInteraction,
    view: View,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    command
        .create_interaction_response(&ctx.http, |response| {
            response.kind(InteractionResponseType::DeferredChannelMessageWithSource)
        })
        .await?;

    let panel = view.build(state.source.as_ref(), Utc::now()).await;
    command
        .edit_original_interaction_response(&ctx.http, |response| {
            response.embed(|e| embed_panel(e, &panel))
        })
        .await?;
    Ok(())
}

async fn send_error_response(
    ctx: &Context,
    command: &ApplicationCommandInteraction,
    error_message: &str,
) -> Result<(), serenity::Error> {
    command
        .create_interaction_response(&ctx.http, |response| {
            response
                .kind(InteractionResponseType::ChannelMessageWithSource)
                .interaction_response_data(|message| message.content(error_message).ephemeral(true))
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args<'a>(pairs: &[(&'a str, &'a str)]) -> HashMap<&'a str, &'a str> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn voters_subcommand_reads_search_and_status() {
        assert_eq!(
            parse_view("voters", &args(&[("search", "ada"), ("status", "not-voted")])),
            Some(View::Roster(RosterQuery {
                search: Some("ada".into()),
                filter: RosterFilter::NotVoted,
            }))
        );
    }

    #[test]
    fn voters_subcommand_defaults_to_all() {
        assert_eq!(
            parse_view("voters", &args(&[("status", "maybe")])),
            Some(View::Roster(RosterQuery::default()))
        );
    }

    #[test]
    fn voter_lookup_requires_an_id() {
        assert_eq!(parse_view("voter", &args(&[])), None);
        assert_eq!(
            parse_view("voter", &args(&[("id", " 12 ")])),
            Some(View::Voter("12".into()))
        );
    }

    #[test]
    fn unknown_subcommand_is_rejected() {
        assert_eq!(parse_view("poll", &args(&[])), None);
        assert_eq!(parse_view("tally", &args(&[])), Some(View::Tally));
    }
}
