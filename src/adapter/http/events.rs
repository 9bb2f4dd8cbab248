use super::error::ApiError;
use super::extract::ApiQuery;
use super::state::AppState;
use crate::domain::event::DomainEvent;
use crate::domain::model::GroupId;
use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::Stream;
use serde::Deserialize;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventQuery {
    group_id: Option<String>,
}

/// Relay the event bus to the client as Server-Sent Events, optionally
/// narrowed to a single group.
pub async fn stream_events(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<EventQuery>,
) -> Result<Sse<impl Stream<Item = Result<Event, axum::Error>>>, ApiError> {
    let group: Option<GroupId> = query.group_id.map(|id| id.parse()).transpose()?;
    let receiver = state.event_bus.subscribe();

    let stream = BroadcastStream::new(receiver).filter_map(move |received| match received {
        Ok(event) if group.is_none_or(|g| event.group_id() == g) => Some(to_sse(&event)),
        Ok(_) => None,
        Err(BroadcastStreamRecvError::Lagged(n)) => {
            tracing::warn!("Event stream lagged by {} events", n);
            None
        }
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

fn to_sse(event: &DomainEvent) -> Result<Event, axum::Error> {
    Event::default().event(event.event_name()).json_data(event)
}
