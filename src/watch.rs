//! Live driver: follow a websocket stream in real time.
//!
//! Text frames go straight into the scene. A fixed-rate ticker advances the
//! scene clock by the wall time elapsed since the previous tick, then flushes
//! draw commands to the trace log and outbound requests to the socket.

use std::time::Duration;

use futures_util::{Sink, SinkExt, Stream, StreamExt};
use scene::Scene;
use serde_json::Value;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::{self, Message};

use crate::{CliError, WatchArgs};

pub async fn run(mut scene: Scene, args: &WatchArgs) -> Result<(), CliError> {
    let (mut stream, _) = connect_async(args.url.as_str())
        .await
        .map_err(|error| CliError::Ws(Box::new(error)))?;
    tracing::info!(url = %args.url, "connected");

    let poller = scene.start_polling(wire::GET_STATE, args.poll_secs.saturating_mul(1000).max(1));
    let outcome = follow(&mut scene, &mut stream, args.tick_ms).await;
    scene.stop_polling(poller);

    if let Err(error) = stream.close(None).await {
        tracing::debug!(%error, "close handshake failed");
    }
    outcome
}

async fn follow<S>(scene: &mut Scene, stream: &mut S, tick_ms: u64) -> Result<(), CliError>
where
    S: Stream<Item = Result<Message, tungstenite::Error>> + Sink<Message, Error = tungstenite::Error> + Unpin,
{
    // The poller's first tick is one interval out; ask for a snapshot now.
    send_all(stream, vec![wire::request(wire::GET_STATE)]).await?;

    let mut ticker = tokio::time::interval(Duration::from_millis(tick_ms.max(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last = Instant::now();

    loop {
        tokio::select! {
            frame = stream.next() => match frame {
                Some(Ok(Message::Text(text))) => ingest(scene, text.as_str()),
                Some(Ok(Message::Close(_))) | None => {
                    tracing::info!("socket closed");
                    return Ok(());
                }
                Some(Ok(_)) => {}
                Some(Err(error)) => return Err(CliError::Ws(Box::new(error))),
            },
            _ = ticker.tick() => {
                let now = Instant::now();
                let elapsed = u64::try_from(now.duration_since(last).as_millis()).unwrap_or(u64::MAX);
                last = now;
                scene.advance(elapsed);
                for command in scene.drain_commands() {
                    tracing::trace!(?command, "draw");
                }
                send_all(stream, scene.drain_outbound()).await?;
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupted");
                return Ok(());
            }
        }
    }
}

fn ingest(scene: &mut Scene, text: &str) {
    match scene.ingest(text) {
        Ok(report) if report.failures > 0 => {
            tracing::warn!(failures = report.failures, "message handlers failed");
        }
        Ok(report) => tracing::trace!(events = report.events, "frame dispatched"),
        Err(error) => tracing::warn!(%error, "dropping undecodable frame"),
    }
}

async fn send_all<S>(sink: &mut S, requests: Vec<Value>) -> Result<(), CliError>
where
    S: Sink<Message, Error = tungstenite::Error> + Unpin,
{
    for request in requests {
        tracing::debug!(%request, "send");
        sink.send(Message::Text(request.to_string().into()))
            .await
            .map_err(|error| CliError::Ws(Box::new(error)))?;
    }
    Ok(())
}
