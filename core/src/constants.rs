/// Suffix appended to every encrypted file name and stripped on decrypt.
pub const ENC_SUFFIX: &str = ".enc";

/// `ENC_SUFFIX` without the dot, as `Path::extension` reports it.
pub const ENC_EXTENSION: &str = "enc";

/// Mode names accepted by the dispatcher.
pub const MODE_ENCRYPT: &str = "encrypt";
pub const MODE_DECRYPT: &str = "decrypt";

/// Cipher suite identifiers.
pub mod cipher_ids {
    pub const AES256_GCM: u16        = 0x0001;
    pub const CHACHA20_POLY1305: u16 = 0x0002;
}
