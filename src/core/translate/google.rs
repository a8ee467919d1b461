use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde_json::Value;

use crate::{config::TranslatorConfig, core::translate::Translate};

/// The public Google Translate web endpoint (`client=gtx`).
pub struct GoogleTranslator {
    agent: ureq::Agent,
    endpoint: String,
    delay: Duration,
}

impl GoogleTranslator {
    pub fn from_config(config: &TranslatorConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(config.timeout_secs))
            .timeout_read(Duration::from_secs(config.timeout_secs))
            .build();
        Self {
            agent,
            endpoint: config.endpoint.clone(),
            delay: Duration::from_millis(config.delay_ms),
        }
    }
}

impl Translate for GoogleTranslator {
    fn name(&self) -> &'static str {
        "google"
    }

    fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> Result<String> {
        let body = self
            .agent
            .get(&self.endpoint)
            .query("client", "gtx")
            .query("sl", source_lang)
            .query("tl", target_lang)
            .query("dt", "t")
            .query("q", text)
            .call()
            .with_context(|| format!("Request to {} failed", self.endpoint))?
            .into_string()
            .context("Failed to read translation response")?;
        parse_response(&body)
    }

    fn pause(&self) -> Duration {
        self.delay
    }
}

/// The response is `[[["Hallo","Hello",...], ...], ...]`: the first array
/// holds one segment per sentence, each starting with the translated text.
fn parse_response(body: &str) -> Result<String> {
    let value: Value = serde_json::from_str(body).context("Translation response is not JSON")?;
    let Some(segments) = value.get(0).and_then(Value::as_array) else {
        bail!("Unexpected translation response shape");
    };
    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();
    if translated.is_empty() {
        bail!("Translation response contained no text");
    }
    Ok(translated)
}
