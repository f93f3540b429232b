use super::{Control, Panel, PanelSink};
use async_trait::async_trait;
use serenity::builder::{CreateComponents, CreateEmbed};
use serenity::http::Http;
use serenity::model::application::component::ButtonStyle;
use serenity::model::id::{ChannelId, MessageId};
use std::sync::Arc;

pub fn embed_panel<'a>(embed: &'a mut CreateEmbed, panel: &Panel) -> &'a mut CreateEmbed {
    embed.title(&panel.title).colour(panel.colour);
    if !panel.description.is_empty() {
        embed.description(&panel.description);
    }
    for field in &panel.fields {
        embed.field(&field.name, &field.value, field.inline);
    }
    if let Some(footer) = &panel.footer {
        embed.footer(|f| f.text(footer));
    }
    embed
}

/// One action row of buttons; an empty control list clears the row.
pub fn panel_components<'a>(components: &'a mut CreateComponents, panel: &Panel) -> &'a mut CreateComponents {
    if panel.controls.is_empty() {
        return components;
    }
    components.create_action_row(|row| {
        for control in &panel.controls {
            let style = match control {
                Control::Refresh => ButtonStyle::Primary,
                Control::Stop => ButtonStyle::Danger,
                Control::Filter(filter) if panel.selected_filter == Some(*filter) => ButtonStyle::Success,
                Control::Filter(_) => ButtonStyle::Secondary,
            };
            row.create_button(|btn| {
                btn.custom_id(control.custom_id())
                    .label(control.label())
                    .style(style)
            });
        }
        row
    })
}

/// A Discord message kept current by editing it in place.
pub struct MessageSink {
    http: Arc<Http>,
    channel_id: ChannelId,
    message_id: MessageId,
}

impl MessageSink {
    pub fn new(http: Arc<Http>, channel_id: ChannelId, message_id: MessageId) -> Self {
        Self {
            http,
            channel_id,
            message_id,
        }
    }
}

#[async_trait]
impl PanelSink for MessageSink {
    async fn publish(&self, panel: &Panel) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.channel_id
            .edit_message(&self.http, self.message_id, |m| {
                m.embed(|e| embed_panel(e, panel))
                    .components(|c| panel_components(c, panel))
            })
            .await?;
        Ok(())
    }

    async fn retire(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.channel_id
            .edit_message(&self.http, self.message_id, |m| m.components(|c| c))
            .await?;
        Ok(())
    }
}
