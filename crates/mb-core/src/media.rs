//! Supported media container types.

use serde::{Deserialize, Serialize};

/// File container type of an ingested item. Discriminants match the server's
/// wire codes, which also index the extension table used for source links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum MediaType {
    Jpeg = 0,
    Png,
    Gif,
    Webp,
    Pdf,
    Bmp,
    Psd,
    Tiff,
    Ogg,
    Webm,
    Mkv,
    Mp4,
    Avi,
    Mov,
    Wmv,
    Flv,
}

impl MediaType {
    /// File extension used when building source file links.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Webp => "webp",
            Self::Pdf => "pdf",
            Self::Bmp => "bmp",
            Self::Psd => "psd",
            Self::Tiff => "tiff",
            Self::Ogg => "ogg",
            Self::Webm => "webm",
            Self::Mkv => "mkv",
            Self::Mp4 => "mp4",
            Self::Avi => "avi",
            Self::Mov => "mov",
            Self::Wmv => "wmv",
            Self::Flv => "flv",
        }
    }

    /// Numeric wire code of this type.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Decode a wire code. Unknown codes yield `None`.
    pub fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0 => Self::Jpeg,
            1 => Self::Png,
            2 => Self::Gif,
            3 => Self::Webp,
            4 => Self::Pdf,
            5 => Self::Bmp,
            6 => Self::Psd,
            7 => Self::Tiff,
            8 => Self::Ogg,
            9 => Self::Webm,
            10 => Self::Mkv,
            11 => Self::Mp4,
            12 => Self::Avi,
            13 => Self::Mov,
            14 => Self::Wmv,
            15 => Self::Flv,
            _ => return None,
        })
    }
}
