// src/exec/line_reader.rs

//! Incremental line splitting for one output stream.

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

use crate::sink::LineSink;

/// Drain a stream into a sink, one newline-delimited record at a time.
///
/// - Each line is delivered with its terminator (`\n` or `\r\n`) stripped;
///   other surrounding whitespace is preserved.
/// - Lines whose trimmed content is empty are silently discarded. This is
///   intentional filtering, not loss.
/// - A trailing non-empty chunk without a terminator is still delivered once
///   at end-of-stream.
/// - End-of-stream returns `Ok(())`. A read error is returned to the caller
///   (the process runner), not retried; lines delivered before the error have
///   already reached the sink.
pub async fn forward_lines<R, S>(stream: R, sink: &S) -> std::io::Result<()>
where
    R: AsyncRead + Unpin,
    S: LineSink + ?Sized,
{
    let reader = BufReader::new(stream);
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        if !line.trim().is_empty() {
            sink.accept(&line);
        }
    }

    Ok(())
}
