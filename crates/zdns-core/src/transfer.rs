//! Chunked streaming copy used by file pushers
//!
//! Every write is sliced to the number of bytes the preceding read returned,
//! so a short final chunk never drags stale buffer bytes along.

use crate::config::CHUNK_SIZE;
use crate::error::{Error, Result};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Copy `reader` to `writer` in [`CHUNK_SIZE`] chunks until end of input
///
/// Returns the number of bytes copied. The writer is flushed but not shut
/// down; closing it is the caller's business.
///
/// # Errors
///
/// - `Error::LocalIo`: reading the source failed
/// - `Error::Protocol`: writing or flushing the destination failed
pub async fn copy_in_chunks<R, W>(reader: &mut R, writer: &mut W) -> Result<u64>
where
    R: AsyncRead + Unpin + ?Sized,
    W: AsyncWrite + Unpin + ?Sized,
{
    let mut buffer = [0u8; CHUNK_SIZE];
    let mut total = 0u64;
    loop {
        let n = reader.read(&mut buffer).await?;
        if n == 0 {
            break;
        }
        writer
            .write_all(&buffer[..n])
            .await
            .map_err(|e| Error::protocol(format!("Write after {} bytes failed: {}", total, e)))?;
        total += n as u64;
    }
    writer
        .flush()
        .await
        .map_err(|e| Error::protocol(format!("Flush failed: {}", e)))?;
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i % 251) as u8).collect()
    }

    async fn copy(data: &[u8]) -> Vec<u8> {
        let mut reader = data;
        let mut out = Vec::new();
        let n = copy_in_chunks(&mut reader, &mut out).await.unwrap();
        assert_eq!(n as usize, data.len());
        out
    }

    #[tokio::test]
    async fn copies_exact_bytes_across_chunk_boundaries() {
        for len in [
            0,
            1,
            CHUNK_SIZE - 1,
            CHUNK_SIZE,
            CHUNK_SIZE + 1,
            CHUNK_SIZE + 17,
            3 * CHUNK_SIZE,
            5 * CHUNK_SIZE + 511,
        ] {
            let data = payload(len);
            assert_eq!(copy(&data).await, data, "length {len}");
        }
    }

    #[tokio::test]
    async fn short_reads_do_not_leak_previous_chunk() {
        // A full chunk of 'A' then a 3-byte read: a writer fed the whole
        // buffer would see 1021 trailing 'A's.
        let full = vec![b'A'; CHUNK_SIZE];
        let mut reader = tokio_test::io::Builder::new()
            .read(&full)
            .read(b"xyz")
            .build();
        let mut out = Vec::new();
        let n = copy_in_chunks(&mut reader, &mut out).await.unwrap();

        assert_eq!(n as usize, CHUNK_SIZE + 3);
        assert_eq!(&out[..CHUNK_SIZE], &full[..]);
        assert_eq!(&out[CHUNK_SIZE..], b"xyz");
    }

    #[tokio::test]
    async fn read_errors_are_local() {
        let mut reader = tokio_test::io::Builder::new()
            .read(b"partial")
            .read_error(std::io::Error::other("disk gone"))
            .build();
        let mut out = Vec::new();
        let err = copy_in_chunks(&mut reader, &mut out).await.unwrap_err();
        assert!(matches!(err, Error::LocalIo(_)), "got {err:?}");
        assert_eq!(out, b"partial");
    }

    #[tokio::test]
    async fn write_errors_are_protocol_failures() {
        let mut reader: &[u8] = b"zone data";
        let mut writer = tokio_test::io::Builder::new()
            .write_error(std::io::Error::other("channel closed"))
            .build();
        let err = copy_in_chunks(&mut reader, &mut writer).await.unwrap_err();
        assert!(matches!(err, Error::Protocol(_)), "got {err:?}");
    }
}
