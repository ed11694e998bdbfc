//! Per-subscriber delivery loop: frames, keep-alives, cancellation.

use std::io;
use std::time::Duration;

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::sse::hub::Subscriber;
use crate::sse::protocol::{connected_frame, KEEPALIVE_FRAME, RETRY_HINT};

/// Stream a subscriber's frames into `writer` until the hub closes the
/// queue, the peer is cancelled, or a write fails. The reconnect hint and
/// a `connected` event go out first; keep-alive comments are written on
/// the given period. The subscription is released before returning.
pub async fn serve<W>(
    mut subscriber: Subscriber,
    mut writer: W,
    keepalive: Duration,
    cancel: CancellationToken,
) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let result = stream_frames(&mut subscriber, &mut writer, keepalive, &cancel).await;
    subscriber.unsubscribe().await;
    result
}

async fn stream_frames<W>(
    subscriber: &mut Subscriber,
    writer: &mut W,
    keepalive: Duration,
    cancel: &CancellationToken,
) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(RETRY_HINT.as_bytes()).await?;
    writer.write_all(connected_frame().as_bytes()).await?;
    writer.flush().await?;

    let mut ticker = tokio::time::interval(keepalive);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // the first tick completes immediately
    ticker.tick().await;

    loop {
        tokio::select! {
            frame = subscriber.recv() => {
                let Some(frame) = frame else {
                    debug!(token = %subscriber.token(), "sse queue closed by hub");
                    return Ok(());
                };
                writer.write_all(frame.as_bytes()).await?;
                writer.flush().await?;
            }
            _ = ticker.tick() => {
                writer.write_all(KEEPALIVE_FRAME.as_bytes()).await?;
                writer.flush().await?;
            }
            _ = cancel.cancelled() => {
                debug!(token = %subscriber.token(), "sse session cancelled");
                return Ok(());
            }
        }
    }
}
