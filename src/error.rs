use thiserror::Error;

#[derive(Error, Debug)]
pub enum StegoError {
    /// Represents an out-of-range LSB depth. Exactly one bit per unit must stay untouched,
    /// so only 1 through 7 low bits are addressable
    #[error("num_lsb must be between 1 and 7, got {0}")]
    InvalidLsbCount(u8),

    /// Represents an AES key of unusable length
    #[error("AES key must be 16, 24 or 32 bytes long, got {0}")]
    InvalidKeyLength(usize),

    /// Represents a token key of unusable length, tokens require a full 32-byte key
    #[error("token key must be exactly 32 bytes long, got {0}")]
    InvalidTokenKey(usize),

    /// Represents a carrier shape whose sample count does not match its declared geometry
    #[error("carrier shape {width}x{height}x{channels} does not describe {samples} samples")]
    InvalidCarrierShape {
        width: u32,
        height: u32,
        channels: u8,
        samples: usize,
    },

    /// Represents a truncate request against a geometry-fixed carrier,
    /// dropping pixels would corrupt the image dimensions
    #[error("truncation is not supported for pixel carriers")]
    TruncationUnsupported,

    /// Represents a carrier too small for the requested payload or read
    #[error("carrier can hold {available} bits but {needed} are required")]
    CapacityExceeded { needed: usize, available: usize },

    /// Represents a carrier shape whose bit capacity overflows the platform arithmetic
    #[error("carrier capacity overflows addressable arithmetic")]
    CapacityOverflow,

    /// Represents a blob too large for the 4-byte frame length header
    #[error("blob of {0} bytes exceeds the frame length header range")]
    BlobTooLarge(usize),

    /// Represents a frame whose length header claims more bytes than are present
    #[error("frame claims {claimed} bytes but only {available} are available")]
    FrameTruncated { claimed: usize, available: usize },

    /// Represents a failed AEAD tag or token check, covers both tampering and a wrong key
    #[error("authentication failed: wrong key or corrupted data")]
    AuthenticationFailure,

    /// Represents a failure while producing ciphertext
    #[error("encryption failed")]
    EncryptionFailure,

    /// Represents a carrier media format outside the lossless set
    #[error("media format is not supported: {0}")]
    UnsupportedFormat(String),

    /// Represents an invalid carrier image media, for example a broken PNG file
    #[error("image media is invalid")]
    InvalidImageMedia,

    /// Represents a failure to write a target file
    #[error("write error")]
    WriteError { source: std::io::Error },

    /// Represents all other cases of `std::io::Error`
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}
