pub mod types;
pub mod aead;
pub mod key;
pub mod nonce;

pub use types::*;
pub use aead::*;
pub use key::*;
pub use nonce::*;
