use crate::state::AppState;
use crate::views::{Control, View};
use log::{info, warn};
use serenity::model::application::interaction::message_component::MessageComponentInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::*;

/// Buttons on a live view: refresh now, stop polling, or change the roster filter.
pub async fn handle_component(
    state: &AppState,
    ctx: &Context,
    component: &MessageComponentInteraction,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let custom_id = &component.data.custom_id;
    info!("Received component interaction: {}", custom_id);

    let control = match Control::parse(custom_id) {
        Some(control) => control,
        None => {
            warn!("Unhandled component custom_id: {}", custom_id);
            return reply_ephemeral(ctx, component, "Unknown button action.").await;
        }
    };

    let key = component.message.id.0;
    let session = match state.views.session(key).await {
        Some(session) => session,
        None => {
            return reply_ephemeral(
                ctx,
                component,
                "This view is no longer live. Run /dashboard again to reopen it.",
            )
            .await;
        }
    };

    match control {
        Control::Refresh => {
            acknowledge(ctx, component).await?;
            session.refresh().await;
        }
        Control::Stop => {
            state.views.close(key).await;
            info!("{} live view(s) remain", state.views.len().await);
            component
                .create_interaction_response(&ctx.http, |response| {
                    response
                        .kind(InteractionResponseType::UpdateMessage)
                        .interaction_response_data(|message| message.components(|c| c))
                })
                .await?;
        }
        Control::Filter(filter) => {
            let View::Roster(mut query) = session.view().await else {
                return reply_ephemeral(ctx, component, "Filters only apply to the voter list.").await;
            };
            acknowledge(ctx, component).await?;
            query.filter = filter;
            session.set_view(View::Roster(query)).await;
            session.refresh().await;
        }
    }

    Ok(())
}

async fn acknowledge(
    ctx: &Context,
    component: &MessageComponentInteraction,
) -> Result<(), serenity::Error> {
    component
        .create_interaction_response(&ctx.http, |response| {
            response.kind(InteractionResponseType::DeferredUpdateMessage)
        })
        .await
}

async fn reply_ephemeral(
    ctx: &Context,
    component: &MessageComponentInteraction,
    text: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    component
        .create_interaction_response(&ctx.http, |response| {
            response
                .kind(InteractionResponseType::ChannelMessageWithSource)
                .interaction_response_data(|message| message.content(text).ephemeral(true))
        })
        .await?;
    Ok(())
}
