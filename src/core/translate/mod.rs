//! Translation of pending locale entries through a provider.
//!
//! A provider failure affects only the entry being translated: it stays
//! pending and is listed in [`FillStats::failed`].

mod google;

use std::{thread, time::Duration};

use anyhow::Result;
use enum_dispatch::enum_dispatch;
use serde::Serialize;

pub use google::GoogleTranslator;

use crate::{
    config::{ProviderKind, TranslatorConfig},
    core::{
        Progress, ProgressFn, Stage,
        locale::{LocaleStore, LocaleTree, PendingMarker},
    },
};

#[enum_dispatch]
pub trait Translate {
    fn name(&self) -> &'static str;

    /// Translate one text. Errors are reported per call.
    fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> Result<String>;

    /// Pause to take between two calls.
    fn pause(&self) -> Duration {
        Duration::ZERO
    }
}

#[enum_dispatch(Translate)]
pub enum Translator {
    Google(GoogleTranslator),
    Identity(IdentityTranslator),
}

impl Translator {
    pub fn from_config(config: &TranslatorConfig) -> Self {
        match config.provider {
            ProviderKind::Google => GoogleTranslator::from_config(config).into(),
            ProviderKind::Identity => IdentityTranslator.into(),
        }
    }
}

/// Returns the text unchanged. Used for dry runs and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTranslator;

impl Translate for IdentityTranslator {
    fn name(&self) -> &'static str {
        "identity"
    }

    fn translate(&self, text: &str, _source_lang: &str, _target_lang: &str) -> Result<String> {
        Ok(text.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedEntry {
    pub key: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FillStats {
    pub lang: String,
    pub translated: usize,
    pub failed: Vec<FailedEntry>,
}

/// Replace every pending leaf of `tree` with its translation.
///
/// The marker is stripped before the provider sees the text. The source
/// language is never translated.
pub fn fill_translations<T: Translate + ?Sized>(
    tree: &LocaleTree,
    source_lang: &str,
    target_lang: &str,
    marker: &PendingMarker,
    translator: &T,
    progress: Option<&ProgressFn<'_>>,
) -> (LocaleTree, FillStats) {
    let mut filled = tree.clone();
    let mut stats = FillStats {
        lang: target_lang.to_string(),
        ..Default::default()
    };
    if target_lang == source_lang {
        return (filled, stats);
    }

    let total = tree
        .text_entries()
        .iter()
        .filter(|(_, value)| marker.is_pending(value))
        .count();
    let mut done = 0;

    filled.for_each_text_mut(&mut |key, value| {
        if !marker.is_pending(value) {
            return;
        }
        if done > 0 {
            let pause = translator.pause();
            if !pause.is_zero() {
                thread::sleep(pause);
            }
        }

        let text = marker.strip(value).to_string();
        match translator.translate(&text, source_lang, target_lang) {
            Ok(translated) if !translated.trim().is_empty() => {
                *value = translated;
                stats.translated += 1;
            }
            Ok(_) => fail(&mut stats, key, "provider returned an empty translation"),
            Err(e) => fail(&mut stats, key, &format!("{:#}", e)),
        }

        done += 1;
        if let Some(report) = progress {
            report(Progress::new(Stage::Translate, done, total));
        }
    });

    (filled, stats)
}

fn fail(stats: &mut FillStats, key: &str, error: &str) {
    tracing::warn!("{}: could not translate '{}': {}", stats.lang, key, error);
    stats.failed.push(FailedEntry {
        key: key.to_string(),
        error: error.to_string(),
    });
}

/// Translate one language file in place. The file is only rewritten when
/// at least one entry was translated.
pub fn translate_language<T: Translate + ?Sized>(
    store: &LocaleStore,
    source_lang: &str,
    target_lang: &str,
    translator: &T,
    progress: Option<&ProgressFn<'_>>,
) -> Result<FillStats> {
    let tree = store.load(target_lang)?;
    let (filled, stats) = fill_translations(
        &tree,
        source_lang,
        target_lang,
        store.marker(),
        translator,
        progress,
    );
    if stats.translated > 0 {
        store.save(target_lang, &filled)?;
    }
    tracing::info!(
        "{}: {} translated, {} failed ({})",
        target_lang,
        stats.translated,
        stats.failed.len(),
        translator.name()
    );
    Ok(stats)
}
