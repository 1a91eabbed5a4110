use anyhow::{Context as AnyhowContext, Result};
use dotenvy::dotenv;
use log::{error, info, warn};
use serenity::async_trait;
use serenity::model::application::interaction::{Interaction, InteractionResponseType};
use serenity::model::channel::Reaction;
use serenity::model::gateway::Ready;
use serenity::model::guild::Guild;
use serenity::model::id::GuildId;
use serenity::prelude::*;
use std::sync::Arc;

use chulseok::commands::{register_global_commands, register_guild_commands, CommandHandler};
use chulseok::commands::CommandContext;
use chulseok::core::Config;
use chulseok::features::attendance::{AttendanceConfig, AttendanceStore, CheckInProcessor};
use chulseok::features::schedule::{Clock, WeekTracker, WeeklyScheduler};

struct Handler {
    command_handler: Arc<CommandHandler>,
    checkin: CheckInProcessor,
    tracker: WeekTracker,
    store: AttendanceStore,
    guild_id: Option<GuildId>,
}

impl Handler {
    fn new(
        command_handler: CommandHandler,
        checkin: CheckInProcessor,
        tracker: WeekTracker,
        store: AttendanceStore,
        guild_id: Option<GuildId>,
    ) -> Self {
        Handler {
            command_handler: Arc::new(command_handler),
            checkin,
            tracker,
            store,
            guild_id,
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("🎉 {} is connected and ready!", ready.user.name);
        info!("📡 Connected to {} guilds", ready.guilds.len());
        info!("🔗 Gateway session ID: {:?}", ready.session_id);
        info!("🤖 Bot ID: {}", ready.user.id);
        info!("🌐 Gateway version: {}", ready.version);

        // Single-guild bot: the first guild becomes the report/roster guild
        match ready.guilds.first() {
            Some(guild) => {
                self.tracker.set_guild(guild.id).await;
                if ready.guilds.len() > 1 {
                    warn!(
                        "Bot is in {} guilds; attendance tracks only guild {}",
                        ready.guilds.len(),
                        guild.id
                    );
                }
            }
            None => warn!("Bot is not in any guild; the weekly schedule will not run"),
        }

        // Make sure the ledger and totals files exist before any check-in
        if let Err(e) = self.store.ensure_initialized().await {
            error!("❌ Failed to initialize attendance files: {e:#}");
        }

        // Register slash commands - use guild commands for development (instant), global for production
        if let Some(guild_id) = self.guild_id {
            info!("🔧 Development mode: Registering commands for guild {guild_id}");
            if let Err(e) = register_guild_commands(&ctx, guild_id).await {
                error!("❌ Failed to register guild slash commands: {e}");
            } else {
                info!("✅ Successfully registered slash commands for guild {guild_id} (instant update)");
            }
        } else {
            info!("🌍 Production mode: Registering commands globally");
            if let Err(e) = register_global_commands(&ctx).await {
                error!("❌ Failed to register global slash commands: {e}");
            } else {
                info!("✅ Successfully registered slash commands globally (may take up to 1 hour to propagate)");
            }
        }
    }

    async fn guild_create(&self, _ctx: Context, guild: Guild, is_new: bool) {
        if is_new {
            info!("🆕 Joined new guild: {} ({})", guild.name, guild.id);
        } else {
            info!(
                "📥 Guild available: {} ({}) - {} members",
                guild.name, guild.id, guild.member_count
            );
        }
    }

    async fn reaction_add(&self, ctx: Context, reaction: Reaction) {
        let bot_id = ctx.cache.current_user_id();
        match self.checkin.process(&ctx.http, bot_id, &reaction).await {
            Ok(outcome) => {
                log::debug!("Reaction on message {} -> {outcome:?}", reaction.message_id);
            }
            Err(e) => {
                error!("Error processing reaction check-in: {e:#}");
            }
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::ApplicationCommand(command) => {
                if let Err(e) = self
                    .command_handler
                    .handle_slash_command(&ctx, &command)
                    .await
                {
                    error!(
                        "Error handling slash command '{}': {}",
                        command.data.name, e
                    );

                    let error_message =
                        "죄송합니다. 명령어 처리 중 오류가 발생했습니다. 다시 시도해주세요.";

                    // The handler may have failed before or after responding
                    #[allow(clippy::redundant_pattern_matching)]
                    if let Err(_) = command
                        .create_interaction_response(&ctx.http, |response| {
                            response
                                .kind(InteractionResponseType::ChannelMessageWithSource)
                                .interaction_response_data(|message| {
                                    message.content(error_message)
                                })
                        })
                        .await
                    {
                        let _ = command
                            .create_followup_message(&ctx.http, |message| {
                                message.content(error_message)
                            })
                            .await;
                    }
                }
            }
            Interaction::Ping(_) => {
                info!("Ping interaction received - Discord health check");
            }
            _ => {}
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting attendance bot...");

    // The schedule config is required: no channel and emoji table, no bot
    let attendance_path = std::env::var("ATTENDANCE_CONFIG_PATH")
        .unwrap_or_else(|_| "attendance.yaml".to_string());
    let attendance = AttendanceConfig::load(&attendance_path)
        .with_context(|| format!("Attendance config is required at {attendance_path}"))?;
    info!(
        "📄 Loaded attendance config from {attendance_path} (channel {})",
        attendance.channel_id
    );

    let store = AttendanceStore::new(&config.attendance_file, &config.totals_file);
    let clock = Clock::new();
    let tracker = WeekTracker::new();

    let checkin = CheckInProcessor::new(
        store.clone(),
        clock.clone(),
        tracker.clone(),
        attendance.clone(),
    );
    let command_context = CommandContext::new(
        store.clone(),
        clock.clone(),
        tracker.clone(),
        attendance.clone(),
    );
    let command_handler = CommandHandler::new(command_context);

    // Parse guild ID if provided for development mode
    let guild_id = config
        .discord_guild_id
        .as_ref()
        .and_then(|id| id.parse::<u64>().ok())
        .map(GuildId);

    let handler = Handler::new(
        command_handler,
        checkin,
        tracker.clone(),
        store.clone(),
        guild_id,
    );

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::GUILD_MESSAGE_REACTIONS;

    // Build the Discord client with proper gateway configuration
    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| {
            error!("Failed to create Discord client: {e}");
            error!("This could indicate:");
            error!("  - Invalid bot token format");
            error!("  - Network issues reaching Discord API");
            error!("  - Insufficient permissions");
            anyhow::anyhow!("Client creation failed: {}", e)
        })?;

    info!("Bot configured successfully. Connecting to Discord gateway...");

    // Start the weekly rollover scheduler
    let scheduler = WeeklyScheduler::new(clock, store, tracker, attendance);
    let http = client.cache_and_http.http.clone();
    tokio::spawn(async move {
        scheduler.run(http).await;
    });

    // Log gateway connection attempt
    info!("Establishing WebSocket connection to Discord gateway...");
    info!("Gateway intents: {intents:?}");

    if let Err(why) = client.start().await {
        error!("Gateway connection failed: {why:?}");
        error!("This could be due to:");
        error!("  - Invalid bot token");
        error!("  - Network connectivity issues");
        error!("  - Discord API outage");
        error!("  - Missing required permissions");
        return Err(anyhow::anyhow!(
            "Failed to establish gateway connection: {}",
            why
        ));
    }

    Ok(())
}
