use bytes::{Bytes, BytesMut};

pub const MPEG_MIME_TYPE: &str = "audio/mpeg";

const ID3V2_HEADER_LEN: usize = 10;
const ID3V2_FOOTER_FLAG: u8 = 0x10;
const ID3V1_TAG_LEN: usize = 128;

/// Encoded audio returned by the speech endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedAudio {
    pub bytes: Bytes,
    pub mime_type: &'static str,
}

impl SynthesizedAudio {
    pub fn mpeg(bytes: Bytes) -> Self {
        Self {
            bytes,
            mime_type: MPEG_MIME_TYPE,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Join independently encoded MP3 streams into one.
///
/// MPEG audio frames are self-delimiting, so the streams are appended as-is
/// without decoding. Only container metadata is dropped at the seams: ID3v2
/// tags after the first stream and ID3v1 trailers before the last one. Each
/// stream keeps its own encoder delay and padding, which can leave a short
/// gap at every boundary.
pub fn concat_mpeg(parts: &[SynthesizedAudio]) -> SynthesizedAudio {
    if let [single] = parts {
        return single.clone();
    }

    let total = parts.iter().map(SynthesizedAudio::len).sum();
    let mut out = BytesMut::with_capacity(total);
    let last = parts.len().saturating_sub(1);

    for (i, part) in parts.iter().enumerate() {
        let mut data: &[u8] = &part.bytes;
        if i > 0 {
            data = strip_id3v2(data);
        }
        if i < last {
            data = strip_id3v1(data);
        }
        out.extend_from_slice(data);
    }

    SynthesizedAudio::mpeg(out.freeze())
}

/// Skip a leading ID3v2 tag, if present and well formed.
fn strip_id3v2(data: &[u8]) -> &[u8] {
    if data.len() < ID3V2_HEADER_LEN || &data[..3] != b"ID3" {
        return data;
    }
    let size_bytes = &data[6..10];
    if size_bytes.iter().any(|b| b & 0x80 != 0) {
        return data;
    }
    // Sizes are stored as 28-bit syncsafe integers.
    let size = size_bytes
        .iter()
        .fold(0usize, |acc, b| (acc << 7) | usize::from(*b));
    let mut tag_len = ID3V2_HEADER_LEN + size;
    if data[5] & ID3V2_FOOTER_FLAG != 0 {
        tag_len += ID3V2_HEADER_LEN;
    }
    data.get(tag_len..).unwrap_or(data)
}

fn strip_id3v1(data: &[u8]) -> &[u8] {
    if data.len() >= ID3V1_TAG_LEN {
        let start = data.len() - ID3V1_TAG_LEN;
        if &data[start..start + 3] == b"TAG" {
            return &data[..start];
        }
    }
    data
}
