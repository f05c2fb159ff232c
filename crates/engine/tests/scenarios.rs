use hexsphere_compress::{ratio, Compressor};
use hexsphere_core::{hex, EngineConfig, HexError};
use hexsphere_crypto::hashing::{hash, verify};
use hexsphere_crypto::{EncryptionError, Encryptor};
use hexsphere_engine::{demo, Mode};

#[test]
fn test_hex_decode_odd_length_is_format_error() {
    assert_eq!(hex::decode("abc"), Err(HexError::OddLength { len: 3 }));
}

#[test]
fn test_encrypt_decrypt_sample_message() {
    let encryptor = Encryptor::generate();
    let ciphertext = encryptor.encrypt(b"Hello, HEX-CyberSphere!").unwrap();
    let plaintext = encryptor.decrypt_to_string(&ciphertext).unwrap();
    assert_eq!(plaintext, "Hello, HEX-CyberSphere!");
}

#[test]
fn test_ciphertext_from_other_session_is_rejected_or_garbled() {
    let alice = Encryptor::generate();
    let bob = Encryptor::generate();
    let ciphertext = alice.encrypt(b"for alice only").unwrap();

    match bob.decrypt(&ciphertext) {
        Err(EncryptionError::InvalidPadding { .. }) => {}
        Ok(garbled) => assert_ne!(garbled, b"for alice only"),
        Err(other) => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_sha256_digest_verifies_only_under_sha256() {
    let data = b"HEX-CyberSphere data integrity test";
    let digest = hash(data, "sha256").unwrap();
    assert!(verify(data, &digest, "sha256"));
    assert!(!verify(data, &digest, "sha1"));
}

#[test]
fn test_compression_through_hex_transport() {
    let compressor = Compressor::default();
    let original: Vec<u8> = b"The quick brown fox jumps over the dog. "
        .iter()
        .copied()
        .cycle()
        .take(4096)
        .collect();

    let compressed_hex = compressor.compress(&original).unwrap();
    let compressed = hex::decode(&compressed_hex).unwrap();
    assert!(ratio(&original, &compressed) < 0.1);
    assert_eq!(compressor.decompress(&compressed_hex).unwrap(), original);
    assert_eq!(ratio(b"", &compressed), 0.0);
}

#[test]
fn test_full_demo_run() {
    let mut config = EngineConfig::default();
    config.hashing.benchmark_iterations = 3;

    let mut out = Vec::new();
    demo::run(Mode::All, &config, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("Decrypted: Hello, HEX-CyberSphere!"));
    assert!(text.contains("SHA-512 integrity check: PASSED"));
    assert!(text.contains("Original size: 39936 bytes"));
    assert!(text.contains("Decompression successful: YES"));
}
