//! Line-delimited JSON session: one [`Request`] per input line, one
//! [`Response`] per output line.

use casejump_store::KvBackend;
use casejump_verify::ExistenceProbe;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use crate::host::Host;
use crate::popup::PopupSurface;
use crate::request::{Request, Response};

/// Serve requests until `reader` reaches end of input.
pub async fn run_session<B, P, S, R, W>(
    host: &mut Host<B, P, S>,
    reader: R,
    mut writer: W,
) -> anyhow::Result<usize>
where
    B: KvBackend + 'static,
    P: ExistenceProbe,
    S: PopupSurface,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut handled = 0usize;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let response = match serde_json::from_str::<Request>(line) {
            Ok(request) => host.handle(request).await,
            Err(e) => {
                warn!(error = %e, "unreadable request");
                Response::Failed {
                    message: format!("unreadable request: {e}"),
                }
            }
        };
        let mut out = serde_json::to_vec(&response)?;
        out.push(b'\n');
        writer.write_all(&out).await?;
        writer.flush().await?;
        handled += 1;
    }

    debug!(handled, "session ended");
    Ok(handled)
}
