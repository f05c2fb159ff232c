//! Sample runs for each engine

use crate::cli::Mode;
use anyhow::{bail, Context, Result};
use hexsphere_compress::{ratio, Compressor};
use hexsphere_core::{hex, EngineConfig};
use hexsphere_crypto::hashing::{self, HashAlgorithm};
use hexsphere_crypto::{Encryptor, IntegrityChecker};
use std::fmt;
use std::io::Write;
use std::time::Instant;
use tracing::info;

pub const ENCRYPTION_SAMPLE: &str = "Hello, HEX-CyberSphere!";
pub const HASHING_SAMPLE: &str = "HEX-CyberSphere data integrity test";
pub const COMPRESSION_PHRASE: &str = "This is a test string for compression. ";

const BANNER: &str = "\
╔════════════════════════════════════════════════╗
║        ⚡ H E X – C Y B E R S P H E R E ⚡        ║
╚════════════════════════════════════════════════╝
     Rust High-Speed Engine
  Encryption | Compression | Hashing
";

/// Run `f` and return its result with the elapsed microseconds
fn timed<T>(f: impl FnOnce() -> T) -> (T, u128) {
    let start = Instant::now();
    let value = f();
    (value, start.elapsed().as_micros())
}

fn pass(ok: bool) -> &'static str {
    if ok {
        "PASSED"
    } else {
        "FAILED"
    }
}

/// Engine health summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthReport {
    pub status: &'static str,
    pub modules: Vec<&'static str>,
}

impl HealthReport {
    pub fn check() -> Self {
        Self {
            status: "Operational",
            modules: vec!["Encryption", "Compression", "Hashing"],
        }
    }
}

impl fmt::Display for HealthReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Engine Health Check:")?;
        writeln!(f, "  Status: {}", self.status)?;
        writeln!(
            f,
            "  Modules: {} ({})",
            self.modules.len(),
            self.modules.join(", ")
        )
    }
}

/// Result of the encryption sample run
#[derive(Debug, Clone)]
pub struct EncryptionReport {
    pub plaintext: String,
    pub ciphertext_hex: String,
    pub decrypted: String,
    pub key_hex: String,
    pub iv_hex: String,
    pub digest_algorithm: HashAlgorithm,
    pub digest_hex: String,
    pub encrypt_us: u128,
    pub decrypt_us: u128,
}

impl EncryptionReport {
    pub fn round_trip_ok(&self) -> bool {
        self.plaintext == self.decrypted
    }
}

impl fmt::Display for EncryptionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Original text: {}", self.plaintext)?;
        writeln!(f, "Key (hex): {}", self.key_hex)?;
        writeln!(f, "IV (hex): {}", self.iv_hex)?;
        writeln!(f, "Encrypted (hex): {}", self.ciphertext_hex)?;
        writeln!(f, "Encryption time: {} microseconds", self.encrypt_us)?;
        writeln!(f, "Decrypted: {}", self.decrypted)?;
        writeln!(f, "Decryption time: {} microseconds", self.decrypt_us)?;
        writeln!(f, "Round trip: {}", pass(self.round_trip_ok()))?;
        writeln!(f, "{} hash: {}", self.digest_algorithm, self.digest_hex)
    }
}

/// Encrypt and decrypt `plaintext` under a fresh session
pub fn run_encryption(plaintext: &str, config: &EngineConfig) -> Result<EncryptionReport> {
    let encryptor = Encryptor::generate();
    let digest_algorithm: HashAlgorithm = config.hashing.default_algorithm.parse()?;

    let (ciphertext_hex, encrypt_us) = timed(|| encryptor.encrypt(plaintext.as_bytes()));
    let ciphertext_hex = ciphertext_hex.context("encryption failed")?;

    let (decrypted, decrypt_us) = timed(|| encryptor.decrypt_to_string(&ciphertext_hex));
    let decrypted = decrypted.context("decryption failed")?;

    let digest_hex = IntegrityChecker::new(digest_algorithm)
        .hash_data(plaintext.as_bytes())
        .to_hex();

    info!(
        plaintext_len = plaintext.len(),
        encrypt_us = encrypt_us as u64,
        decrypt_us = decrypt_us as u64,
        "encryption sample finished"
    );

    Ok(EncryptionReport {
        plaintext: plaintext.to_string(),
        ciphertext_hex,
        decrypted,
        key_hex: encryptor.key().key_hex(),
        iv_hex: encryptor.key().iv_hex(),
        digest_algorithm,
        digest_hex,
        encrypt_us,
        decrypt_us,
    })
}

/// One algorithm's line in the hashing report
#[derive(Debug, Clone)]
pub struct DigestLine {
    pub algorithm: HashAlgorithm,
    pub digest_hex: String,
    pub verified: bool,
    pub average_us: f64,
}

/// Result of the hashing sample run
#[derive(Debug, Clone)]
pub struct HashingReport {
    pub input: String,
    pub iterations: u32,
    pub digests: Vec<DigestLine>,
}

impl HashingReport {
    pub fn all_verified(&self) -> bool {
        self.digests.iter().all(|d| d.verified)
    }
}

impl fmt::Display for HashingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Test data: {}", self.input)?;
        writeln!(f)?;
        for line in &self.digests {
            writeln!(f, "{}: {}", line.algorithm, line.digest_hex)?;
        }
        writeln!(f)?;
        for line in &self.digests {
            writeln!(f, "{} integrity check: {}", line.algorithm, pass(line.verified))?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "Performance benchmarks (average microseconds per hash, {} iterations):",
            self.iterations
        )?;
        for line in &self.digests {
            writeln!(f, "{}: {:.3} μs", line.algorithm, line.average_us)?;
        }
        Ok(())
    }
}

/// Hash, verify and benchmark `input` with every supported algorithm
pub fn run_hashing(input: &str, config: &EngineConfig) -> Result<HashingReport> {
    let iterations = config.hashing.benchmark_iterations;
    let mut digests = Vec::with_capacity(HashAlgorithm::ALL.len());

    for algorithm in HashAlgorithm::ALL {
        let tag = algorithm.as_str();
        let digest_hex = hashing::hash(input.as_bytes(), tag)?;
        let verified = hashing::verify(input.as_bytes(), &digest_hex, tag);
        let average_us = hashing::benchmark(input.as_bytes(), tag, iterations)?;

        digests.push(DigestLine {
            algorithm,
            digest_hex,
            verified,
            average_us,
        });
    }

    info!(
        input_len = input.len(),
        iterations,
        "hashing sample finished"
    );

    Ok(HashingReport {
        input: input.to_string(),
        iterations,
        digests,
    })
}

/// Result of the compression sample run
#[derive(Debug, Clone)]
pub struct CompressionReport {
    pub original_len: usize,
    pub compressed_len: usize,
    pub ratio: f64,
    pub round_trip_ok: bool,
    pub compress_us: u128,
    pub decompress_us: u128,
}

impl fmt::Display for CompressionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Original size: {} bytes", self.original_len)?;
        writeln!(f, "Compressed size: {} bytes", self.compressed_len)?;
        writeln!(f, "Compression ratio: {:.2}", self.ratio)?;
        writeln!(f, "Compression time: {} microseconds", self.compress_us)?;
        writeln!(f, "Decompression successful: {}", if self.round_trip_ok { "YES" } else { "NO" })?;
        writeln!(f, "Decompression time: {} microseconds", self.decompress_us)
    }
}

/// The compression sample: the phrase doubled ten times
pub fn compression_sample() -> Vec<u8> {
    COMPRESSION_PHRASE.repeat(1 << 10).into_bytes()
}

/// Compress and decompress `data` through the hex transport
pub fn run_compression(data: &[u8], config: &EngineConfig) -> Result<CompressionReport> {
    let compressor = Compressor::new(config.compression.clone())?;

    let (compressed, compress_us) = timed(|| compressor.compress_bytes(data));
    let compressed = compressed.context("compression failed")?;
    let compressed_hex = hex::encode(&compressed);

    let (decompressed, decompress_us) = timed(|| compressor.decompress(&compressed_hex));
    let decompressed = decompressed.context("decompression failed")?;

    let report = CompressionReport {
        original_len: data.len(),
        compressed_len: compressed.len(),
        ratio: ratio(data, &compressed),
        round_trip_ok: decompressed == data,
        compress_us,
        decompress_us,
    };

    info!(
        original_len = report.original_len,
        compressed_len = report.compressed_len,
        ratio = report.ratio,
        "compression sample finished"
    );
    Ok(report)
}

/// Print the banner, the health check and the selected sample runs
pub fn run(mode: Mode, config: &EngineConfig, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{BANNER}")?;
    writeln!(out, "{}", HealthReport::check())?;
    writeln!(out, "Processing sample requests...")?;
    writeln!(out)?;

    if mode.includes(Mode::Encrypt) {
        let report = run_encryption(ENCRYPTION_SAMPLE, config)?;
        writeln!(out, "{report}")?;
        if !report.round_trip_ok() {
            bail!("encryption round trip mismatch");
        }
    }

    if mode.includes(Mode::Hash) {
        let report = run_hashing(HASHING_SAMPLE, config)?;
        writeln!(out, "{report}")?;
        if !report.all_verified() {
            bail!("integrity verification failed");
        }
    }

    if mode.includes(Mode::Compress) {
        let data = compression_sample();
        let report = run_compression(&data, config)?;
        writeln!(out, "{report}")?;
        if !report.round_trip_ok {
            bail!("compression round trip mismatch");
        }
    }

    writeln!(out, "All operations completed successfully!")?;
    Ok(())
}
