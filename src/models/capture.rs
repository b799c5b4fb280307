use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;

/// Raw still frame as produced by a camera device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub data: Bytes,
    pub mime_type: String,
}

/// A frame accepted by the capture controller. `seq` identifies the capture
/// attempt so late results can be matched against the current one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedImage {
    pub seq: u64,
    pub frame: Frame,
}

impl CapturedImage {
    /// Encode as a `data:` URL, the form the emotion service expects.
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.frame.mime_type,
            STANDARD.encode(&self.frame.data)
        )
    }
}
