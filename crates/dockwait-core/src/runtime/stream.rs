//! Docker's multiplexed attach stream.
//!
//! Containers without a TTY send log and exec output as frames: one byte
//! stream id (0 stdin, 1 stdout, 2 stderr), three zero bytes, a big-endian
//! u32 length, then the payload. TTY containers send raw bytes.

const HEADER_LEN: usize = 8;

/// Concatenate frame payloads, or return `raw` unchanged if it is not framed.
pub fn demux(raw: &[u8]) -> Vec<u8> {
    if !is_frame_header(raw) {
        return raw.to_vec();
    }
    let mut out = Vec::with_capacity(raw.len());
    let mut rest = raw;
    while !rest.is_empty() {
        if !is_frame_header(rest) {
            // Truncated or garbled tail: keep it rather than drop output.
            out.extend_from_slice(rest);
            break;
        }
        let len = u32::from_be_bytes([rest[4], rest[5], rest[6], rest[7]]) as usize;
        let end = HEADER_LEN.saturating_add(len).min(rest.len());
        out.extend_from_slice(&rest[HEADER_LEN..end]);
        rest = &rest[end..];
    }
    out
}

fn is_frame_header(buf: &[u8]) -> bool {
    buf.len() >= HEADER_LEN && buf[0] <= 2 && buf[1..4] == [0, 0, 0]
}
