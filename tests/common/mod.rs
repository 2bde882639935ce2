use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tracing_subscriber::fmt::MakeWriter;
use trading_mentor::config::{GeminiConfig, MentorConfig};

#[allow(dead_code)]
pub const TEST_MODEL: &str = "gemini-test";

#[allow(dead_code)]
pub const GENERATE_PATH: &str = "/v1beta/models/gemini-test:generateContent";

/// Gemini config pointing at a mock server
#[allow(dead_code)]
pub fn gemini_config(api_base: &str) -> GeminiConfig {
    GeminiConfig {
        model: TEST_MODEL.to_string(),
        api_base: Some(api_base.to_string()),
        ..GeminiConfig::default()
    }
}

/// Mentor config with a short, predictable persona
#[allow(dead_code)]
pub fn mentor_config() -> MentorConfig {
    MentorConfig {
        system_instruction: "You are a trading mentor.".to_string(),
        temperature: 0.5,
        greeting: None,
    }
}

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}

/// Buffer a `tracing_subscriber::fmt` subscriber writes into
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

#[allow(dead_code)]
impl LogCapture {
    /// Install an ERROR-level subscriber writing into this buffer for the
    /// current thread
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::ERROR)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
