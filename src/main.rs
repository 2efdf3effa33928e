//! # Main Entry Point
//!
//! Wires the layers together:
//! - Domain: Configuration, Types and Traits
//! - Infrastructure: Matrix, LLM, Logging
//! - Application: Extraction, Store, Summarizer, Scheduler, Router
//! - Interface: Command Handlers
//!

#![recursion_limit = "256"]

mod application;
mod domain;
mod infrastructure;
mod interface;
mod strings;

use anyhow::{Context, Result};
use clap::Parser;
use matrix_sdk::{
    Client,
    config::SyncSettings,
    room::Room,
    ruma::{
        OwnedRoomOrAliasId,
        events::room::{
            member::{MembershipState, StrippedRoomMemberEvent},
            message::SyncRoomMessageEvent,
        },
    },
};
use std::sync::Arc;
use std::time::Duration;

use crate::application::router::CommandRouter;
use crate::application::scheduler::SummaryScheduler;
use crate::application::store::MessageStore;
use crate::application::summarizer::SummaryService;
use crate::domain::config::{AppConfig, DEFAULT_CONFIG_PATH};
use crate::domain::traits::ChatProvider;
use crate::infrastructure::llm::Client as LlmClient;
use crate::infrastructure::matrix::{self, MatrixPublisher, MatrixService};
use crate::strings::{logs, messages};

/// Collects `[Project]`-tagged room messages and posts periodic summaries.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Load Configuration
    let config = AppConfig::load(&cli.config)?;

    // 2. Logging Setup
    let _guard = infrastructure::logging::init_tracing(&config.system.log_dir)?;
    tracing::info!("{}", logs::STARTING);

    // 3. Summarizer
    let llm = LlmClient::new(config.summarizer.clone());
    llm.validate().context("Invalid summarizer configuration")?;
    let summarizer = Arc::new(SummaryService::new(Arc::new(llm)));

    // 4. Matrix Setup
    let matrix_config = &config.services.matrix;
    let client = Client::builder()
        .homeserver_url(&matrix_config.homeserver)
        .build()
        .await?;

    client
        .matrix_auth()
        .login_username(&matrix_config.username, &matrix_config.password)
        .send()
        .await?;
    tracing::info!("{}", logs::logged_in(&matrix_config.username));

    if let Some(name) = &matrix_config.display_name
        && let Err(e) = client.account().set_display_name(Some(name.as_str())).await
    {
        tracing::warn!("{}", logs::set_display_name_fail(&e.to_string()));
    }

    tracing::info!("{}", logs::joining_room(&matrix_config.room));
    let room_ref = OwnedRoomOrAliasId::try_from(matrix_config.room.as_str())
        .with_context(|| format!("Invalid room id or alias: {}", matrix_config.room))?;
    let room = match client.join_room_by_id_or_alias(&room_ref, &[]).await {
        Ok(room) => room,
        Err(e) => {
            tracing::error!("{}", logs::join_room_fail(&matrix_config.room, &e.to_string()));
            return Err(e.into());
        }
    };
    let room_id = room.room_id().to_owned();
    tracing::info!("{}", logs::join_room_success(room_id.as_str()));

    // 5. Application Components
    let store = Arc::new(MessageStore::new());
    let scheduler = Arc::new(SummaryScheduler::new(
        store.clone(),
        summarizer,
        Arc::new(MatrixPublisher::new(client.clone())),
        room_id.as_str(),
        Duration::from_secs(config.scheduler.interval_secs),
        config.scheduler.drain,
    ));
    let router = Arc::new(CommandRouter::new(store, scheduler.clone()));

    if config.system.startup_message {
        match MatrixService::new(room).send_message(messages::STARTUP).await {
            Ok(_) => tracing::info!("{}", logs::STARTUP_MESSAGE_SENT),
            Err(e) => tracing::warn!("{}", logs::startup_message_fail(&e)),
        }
    }

    // 6. Event Handlers
    let start_time = chrono::Utc::now();
    let loop_router = router.clone();
    let loop_room_id = room_id.clone();

    client.add_event_handler(move |ev: SyncRoomMessageEvent, room: Room| {
        let router = loop_router.clone();
        let monitored = loop_room_id.clone();

        async move {
            let Some(original_msg) = ev.as_original() else {
                return;
            };
            if room.room_id().as_str() != monitored.as_str()
                || original_msg.sender == room.own_user_id()
            {
                return;
            }
            // Ignore history delivered by the initial sync
            if matrix::timestamp(original_msg.origin_server_ts).is_some_and(|ts| ts < start_time) {
                return;
            }

            let inbound = matrix::inbound_message(original_msg, &room);
            let chat = MatrixService::new(room);
            if let Err(e) = router.route(&chat, inbound).await {
                tracing::error!("Failed to route message: {}", e);
            }
        }
    });

    client.add_event_handler(|ev: StrippedRoomMemberEvent, room: Room| async move {
        if ev.content.membership == MembershipState::Invite {
            tracing::info!("{}", logs::invite_received(room.room_id().as_str()));
            if let Err(e) = room.join().await {
                tracing::error!("{}", logs::join_invite_fail(&e.to_string()));
            }
        }
    });

    // 7. Start Loops
    tracing::info!("{}", logs::SYNC_LOOP_START);
    let sync_client = client.clone();
    let mut sync_handle =
        tokio::spawn(async move { sync_client.sync(SyncSettings::default()).await });

    scheduler.start();

    tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            if let Err(e) = signal {
                tracing::error!("{}", logs::shutdown_fail(&e.to_string()));
            }
            tracing::info!("{}", logs::SHUTDOWN);
            sync_handle.abort();
        }
        result = &mut sync_handle => {
            match result {
                Ok(Err(e)) => tracing::error!("{}", logs::sync_loop_fail(&e.to_string())),
                Err(e) => tracing::error!("{}", logs::sync_loop_fail(&e.to_string())),
                Ok(Ok(())) => {}
            }
        }
    }

    scheduler.shutdown().await;
    Ok(())
}
