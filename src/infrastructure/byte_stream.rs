use bytes::{Bytes, BytesMut};
use futures::{pin_mut, Stream, StreamExt};

/// Drains an asynchronous byte stream into one contiguous buffer.
///
/// Returns on the first stream error. Used by every adapter that consumes a
/// streamed provider response.
pub async fn drain<S, E>(stream: S) -> Result<Bytes, E>
where
    S: Stream<Item = Result<Bytes, E>>,
{
    pin_mut!(stream);
    let mut buffer = BytesMut::new();

    while let Some(chunk) = stream.next().await {
        buffer.extend_from_slice(&chunk?);
    }

    Ok(buffer.freeze())
}
