use std::io::Write;

use anyhow::{Context, Result};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc::Receiver;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::events::Frame;

/// Write each frame as a plain-text block until cancelled or the gallery exits.
///
/// Writes are async so a stalled consumer only parks this task, and
/// cancellation still ends it mid-write.
pub async fn run<W: AsyncWrite + Unpin>(
    mut frames_rx: Receiver<Frame>,
    mut out: W,
    cancel: CancellationToken,
) -> Result<()> {
    let mut buf = Vec::new();
    loop {
        let frame = tokio::select! {
            _ = cancel.cancelled() => break,
            maybe_frame = frames_rx.recv() => match maybe_frame {
                Some(frame) => frame,
                None => {
                    debug!("frame producer ended");
                    break;
                }
            },
        };

        buf.clear();
        write_frame(&mut buf, &frame).context("failed to format frame")?;
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("shutdown while writing frame");
                break;
            }
            written = async {
                out.write_all(&buf).await?;
                out.flush().await
            } => written.context("failed to write frame")?,
        }
    }
    Ok(())
}

pub fn write_frame<W: Write + ?Sized>(out: &mut W, frame: &Frame) -> std::io::Result<()> {
    let view = &frame.view;
    writeln!(out, "== {} {} ==", view.heading.text1, view.heading.text2)?;
    if let Some(t) = &frame.transition {
        writeln!(
            out,
            "   ~ {} -> {} ({} ms)",
            t.from,
            t.to,
            t.duration.as_millis()
        )?;
    }
    writeln!(out, "   # {}", view.content.title)?;
    if !view.content.description.is_empty() {
        writeln!(out, "   {}", view.content.description)?;
    }
    writeln!(out, "   [{}] {}", view.image.alt, view.image.source)?;
    if let Some(overlay) = &view.overlay {
        writeln!(
            out,
            "   [lightbox] [{}] {}  ({})",
            overlay.alt, overlay.source, overlay.dismiss_label
        )?;
    }
    Ok(())
}
