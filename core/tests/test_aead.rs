// # 📂 `tests/test_aead.rs`

// * round-trip (including empty input)
// * fresh nonce per call
// * tamper detection on every bit
// * wrong key / short blob classification

#[cfg(test)]
mod tests {
    use filecrypt_core::crypto::{
        decrypt, decrypt_with, encrypt, encrypt_with, AeadImpl, CipherSuite, CryptoError, KEY_LEN_32,
        MIN_SEALED_BLOB_LEN, NONCE_LEN_12, TAG_LEN,
    };
    use filecrypt_core::types::{ErrorKind, TaskError};
    use proptest::prelude::*;

    const KEY: [u8; KEY_LEN_32] = [0x42; KEY_LEN_32];
    const OTHER_KEY: [u8; KEY_LEN_32] = [0x24; KEY_LEN_32];

    // ------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------
    #[test]
    fn blob_is_nonce_ciphertext_tag() {
        let plaintext = b"hello, batch";
        let blob = encrypt(&KEY, plaintext).unwrap();
        assert_eq!(blob.len(), NONCE_LEN_12 + plaintext.len() + TAG_LEN);

        // Re-open by hand with the raw AEAD to pin the on-disk layout.
        let aead = AeadImpl::new(CipherSuite::Aes256Gcm, &KEY).unwrap();
        let (nonce, sealed) = blob.split_at(NONCE_LEN_12);
        assert_eq!(aead.open(nonce, sealed).unwrap(), plaintext);
    }

    #[test]
    fn empty_plaintext_round_trips() {
        let blob = encrypt(&KEY, b"").unwrap();
        assert_eq!(blob.len(), MIN_SEALED_BLOB_LEN);
        assert_eq!(decrypt(&KEY, &blob).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn chacha_round_trips_with_same_layout() {
        let plaintext = vec![0xABu8; 1000];
        let blob = encrypt_with(CipherSuite::Chacha20Poly1305, &KEY, &plaintext).unwrap();
        assert_eq!(blob.len(), NONCE_LEN_12 + plaintext.len() + TAG_LEN);
        assert_eq!(decrypt_with(CipherSuite::Chacha20Poly1305, &KEY, &blob).unwrap(), plaintext);
    }

    #[test]
    fn suites_do_not_cross_open() {
        let blob = encrypt_with(CipherSuite::Chacha20Poly1305, &KEY, b"payload").unwrap();
        assert_eq!(
            decrypt_with(CipherSuite::Aes256Gcm, &KEY, &blob).unwrap_err(),
            CryptoError::TagMismatch
        );
    }

    // ------------------------------------------------------------
    // Non-determinism
    // ------------------------------------------------------------
    #[test]
    fn same_plaintext_different_blobs() {
        let a = encrypt(&KEY, b"identical").unwrap();
        let b = encrypt(&KEY, b"identical").unwrap();
        assert_ne!(a, b);
        assert_ne!(a[..NONCE_LEN_12], b[..NONCE_LEN_12]);
    }

    // ------------------------------------------------------------
    // Failure classification
    // ------------------------------------------------------------
    #[test]
    fn every_single_bit_flip_is_rejected() {
        let blob = encrypt(&KEY, b"tamper me").unwrap();
        for byte in 0..blob.len() {
            for bit in 0..8 {
                let mut tampered = blob.clone();
                tampered[byte] ^= 1 << bit;
                assert_eq!(
                    decrypt(&KEY, &tampered).unwrap_err(),
                    CryptoError::TagMismatch,
                    "flip at byte {byte} bit {bit} was accepted"
                );
            }
        }
    }

    #[test]
    fn wrong_key_is_authentication_error() {
        let blob = encrypt(&KEY, b"secret").unwrap();
        let err = decrypt(&OTHER_KEY, &blob).unwrap_err();
        assert_eq!(TaskError::from(err).kind(), ErrorKind::Authentication);
    }

    #[test]
    fn shorter_than_nonce_is_malformed() {
        for len in 0..NONCE_LEN_12 {
            let err = decrypt(&KEY, &vec![0u8; len]).unwrap_err();
            assert_eq!(err, CryptoError::Malformed { actual: len, min: NONCE_LEN_12 });
            assert_eq!(TaskError::from(err).kind(), ErrorKind::MalformedInput);
        }
    }

    #[test]
    fn nonce_without_full_tag_fails_authentication() {
        for len in NONCE_LEN_12..MIN_SEALED_BLOB_LEN {
            assert_eq!(decrypt(&KEY, &vec![0u8; len]).unwrap_err(), CryptoError::TagMismatch);
        }
    }

    #[test]
    fn bad_key_length_is_cipher_init_error() {
        let err = encrypt(&[0u8; 31], b"x").unwrap_err();
        assert_eq!(err, CryptoError::InvalidKeyLen { expected: KEY_LEN_32, actual: 31 });
        assert_eq!(TaskError::from(err).kind(), ErrorKind::CipherInit);
    }

    // ------------------------------------------------------------
    // Properties
    // ------------------------------------------------------------
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn round_trip_any_plaintext(plaintext in proptest::collection::vec(any::<u8>(), 0..4096)) {
            let blob = encrypt(&KEY, &plaintext).unwrap();
            prop_assert_eq!(decrypt(&KEY, &blob).unwrap(), plaintext);
        }

        #[test]
        fn wrong_key_never_opens(
            key1 in any::<[u8; 32]>(),
            key2 in any::<[u8; 32]>(),
            plaintext in proptest::collection::vec(any::<u8>(), 0..256),
        ) {
            prop_assume!(key1 != key2);
            let blob = encrypt(&key1, &plaintext).unwrap();
            prop_assert_eq!(decrypt(&key2, &blob).unwrap_err(), CryptoError::TagMismatch);
        }
    }
}
