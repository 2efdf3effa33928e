//! # Matrix Service Adapter
//!
//! Implements the `ChatProvider` trait for a single Matrix room and the `ChannelPublisher`
//! trait for the logged-in client, using the `matrix_sdk`.

use crate::domain::traits::{ChannelPublisher, ChatProvider};
use crate::domain::types::{InboundMessage, SummaryError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use matrix_sdk::Client;
use matrix_sdk::room::Room;
use matrix_sdk::ruma::events::room::message::{
    MessageType, OriginalSyncRoomMessageEvent, RoomMessageEventContent,
};
use matrix_sdk::ruma::{MilliSecondsSinceUnixEpoch, RoomId};

#[derive(Clone)]
pub struct MatrixService {
    room: Room,
}

impl MatrixService {
    pub fn new(room: Room) -> Self {
        Self { room }
    }
}

#[async_trait]
impl ChatProvider for MatrixService {
    fn room_id(&self) -> String {
        self.room.room_id().as_str().to_string()
    }

    async fn send_message(&self, content: &str) -> Result<String, String> {
        tracing::info!("Bot sending message to {}: {}", self.room_id(), content);
        self.room
            .send(RoomMessageEventContent::text_markdown(content))
            .await
            .map(|resp| resp.event_id.to_string())
            .map_err(|e| e.to_string())
    }
}

/// Posts summaries into joined rooms by room id.
#[derive(Clone)]
pub struct MatrixPublisher {
    client: Client,
}

impl MatrixPublisher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ChannelPublisher for MatrixPublisher {
    async fn publish(&self, destination: &str, text: &str) -> Result<(), SummaryError> {
        let room_id = <&RoomId>::try_from(destination)
            .map_err(|e| SummaryError::publication(destination, e.to_string()))?;
        let room = self
            .client
            .get_room(room_id)
            .ok_or_else(|| SummaryError::publication(destination, "room is not known to the client"))?;

        MatrixService::new(room)
            .send_message(text)
            .await
            .map(|_| ())
            .map_err(|e| SummaryError::publication(destination, e))
    }
}

pub fn timestamp(ts: MilliSecondsSinceUnixEpoch) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(i64::from(ts.get()))
}

/// Maps a text message event to the intake record. Non-text messages carry no text.
pub fn inbound_message(ev: &OriginalSyncRoomMessageEvent, room: &Room) -> InboundMessage {
    let text = match &ev.content.msgtype {
        MessageType::Text(content) => Some(content.body.clone()),
        _ => None,
    };
    InboundMessage {
        author: Some(ev.sender.to_string()),
        text,
        timestamp: timestamp(ev.origin_server_ts),
        room_id: Some(room.room_id().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matrix_sdk::ruma::UInt;

    #[test]
    fn test_timestamp_conversion() {
        let ts = MilliSecondsSinceUnixEpoch(UInt::new(1_700_000_000_123).unwrap());
        assert_eq!(timestamp(ts).unwrap().timestamp_millis(), 1_700_000_000_123);

        let ts = MilliSecondsSinceUnixEpoch(UInt::new(1_714_557_600_000).unwrap());
        assert_eq!(
            timestamp(ts).unwrap().to_rfc3339(),
            "2024-05-01T10:00:00+00:00"
        );
    }
}
