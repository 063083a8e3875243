// Local NLLB-200 translator (Turkish -> English) via ONNX.
//
// Runs facebook's nllb-200-distilled-600M entirely on the local CPU — no API
// calls, no rate limits. The model is an encoder-decoder: one encoder pass
// over the source tokens, then a greedy decoder loop that emits one English
// token per step until end-of-sequence.
//
// NLLB's sequence conventions:
//   source:  [src_lang] tokens </s>
//   decoder: starts from [</s> tgt_lang], generates until </s>
//
// Model: Xenova/nllb-200-distilled-600M (quantized ONNX export)

use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use async_trait::async_trait;
use ort::session::Session;
use ort::value::Tensor;
use tokenizers::Tokenizer;
use tracing::debug;

use super::traits::Translator;

/// NLLB language tag for the source language.
const SRC_LANG: &str = "tur_Latn";

/// NLLB language tag forced as the decoder's first real token.
const TGT_LANG: &str = "eng_Latn";

/// End-of-sequence token. Also the decoder's start token.
const EOS_TOKEN: &str = "</s>";

/// Upper bound on generated tokens — keeps the greedy loop finite even if
/// the model never emits end-of-sequence.
const MAX_TARGET_TOKENS: usize = 128;

/// Local ONNX translator. Holds both model sessions and the tokenizer
/// behind Arc so inference can be offloaded to spawn_blocking without
/// blocking the async runtime.
///
/// Architecture mirrors the usual ort setup: Arc<Mutex<Session>> because
/// Session::run takes &mut self, Arc<Tokenizer> for shared ownership.
pub struct NllbTranslator {
    encoder: Arc<Mutex<Session>>,
    decoder: Arc<Mutex<Session>>,
    tokenizer: Arc<Tokenizer>,
}

impl NllbTranslator {
    /// Load the encoder, decoder, and tokenizer from the given directory.
    ///
    /// Expects the three files checked by `download::model_files_present`.
    /// Call `download::download_model()` first if they don't exist.
    pub fn load(model_dir: &Path) -> Result<Self> {
        let encoder_path = model_dir.join(super::download::ENCODER_FILE);
        let decoder_path = model_dir.join(super::download::DECODER_FILE);
        let tokenizer_path = model_dir.join(super::download::TOKENIZER_FILE);

        for path in [&encoder_path, &decoder_path, &tokenizer_path] {
            if !path.exists() {
                anyhow::bail!(
                    "Translation model file not found: {}\nRun `tonal download-model` to download it.",
                    path.display()
                );
            }
        }

        let encoder = Session::builder()
            .context("Failed to create ONNX session builder")?
            .commit_from_file(&encoder_path)
            .with_context(|| format!("Failed to load encoder from {}", encoder_path.display()))?;

        let decoder = Session::builder()
            .context("Failed to create ONNX session builder")?
            .commit_from_file(&decoder_path)
            .with_context(|| format!("Failed to load decoder from {}", decoder_path.display()))?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow::anyhow!("Failed to load tokenizer: {}", e))?;

        debug!("Loaded NLLB translation model from {}", model_dir.display());

        Ok(Self {
            encoder: Arc::new(Mutex::new(encoder)),
            decoder: Arc::new(Mutex::new(decoder)),
            tokenizer: Arc::new(tokenizer),
        })
    }
}

#[async_trait]
impl Translator for NllbTranslator {
    async fn translate(&self, text: &str) -> Result<String> {
        let encoder = Arc::clone(&self.encoder);
        let decoder = Arc::clone(&self.decoder);
        let tokenizer = Arc::clone(&self.tokenizer);
        let text = text.to_string();

        // All CPU-bound work (tokenization + both model passes) runs on a
        // blocking thread so the async runtime stays responsive.
        tokio::task::spawn_blocking(move || translate_sync(&encoder, &decoder, &tokenizer, &text))
            .await
            .context("spawn_blocking panicked")?
    }
}

/// Synchronous translation — tokenize, encode once, greedy-decode.
fn translate_sync(
    encoder: &Arc<Mutex<Session>>,
    decoder: &Arc<Mutex<Session>>,
    tokenizer: &Arc<Tokenizer>,
    text: &str,
) -> Result<String> {
    let special_id = |token: &str| -> Result<i64> {
        tokenizer
            .token_to_id(token)
            .map(i64::from)
            .ok_or_else(|| anyhow::anyhow!("Tokenizer has no id for token {token:?}"))
    };
    let src_lang_id = special_id(SRC_LANG)?;
    let tgt_lang_id = special_id(TGT_LANG)?;
    let eos_id = special_id(EOS_TOKEN)?;

    // Build the source sequence by hand: [src_lang] tokens </s>. Encoding
    // without special tokens keeps the framing explicit.
    let encoding = tokenizer
        .encode(text, false)
        .map_err(|e| anyhow::anyhow!("Tokenization failed: {}", e))?;

    let mut input_ids: Vec<i64> = Vec::with_capacity(encoding.get_ids().len() + 2);
    input_ids.push(src_lang_id);
    input_ids.extend(encoding.get_ids().iter().map(|&id| i64::from(id)));
    input_ids.push(eos_id);

    let src_len = input_ids.len();
    let attention_mask: Vec<i64> = vec![1; src_len];

    // One encoder pass over the source tokens.
    let (hidden_states, hidden_dim) = {
        let mut encoder = encoder
            .lock()
            .map_err(|e| anyhow::anyhow!("Encoder session lock poisoned: {}", e))?;

        let input_ids_tensor = Tensor::from_array(([1_i64, src_len as i64], input_ids))
            .context("Failed to create input_ids tensor")?;
        let attention_mask_tensor =
            Tensor::from_array(([1_i64, src_len as i64], attention_mask.clone()))
                .context("Failed to create attention_mask tensor")?;

        let outputs = encoder
            .run(ort::inputs! {
                "input_ids" => input_ids_tensor,
                "attention_mask" => attention_mask_tensor
            })
            .context("Encoder ONNX inference failed")?;

        let (shape, data) = outputs[0]
            .try_extract_tensor::<f32>()
            .context("Failed to extract encoder output tensor")?;

        (data.to_vec(), shape[2] as usize)
    };

    // Greedy decoder loop. The decoder re-reads the whole generated prefix
    // each step; fine at comment length, and it keeps the loop stateless.
    let mut generated: Vec<i64> = vec![eos_id, tgt_lang_id];

    for _ in 0..MAX_TARGET_TOKENS {
        let next_id = {
            let mut decoder = decoder
                .lock()
                .map_err(|e| anyhow::anyhow!("Decoder session lock poisoned: {}", e))?;

            let decoder_ids_tensor =
                Tensor::from_array(([1_i64, generated.len() as i64], generated.clone()))
                    .context("Failed to create decoder input_ids tensor")?;
            let encoder_mask_tensor =
                Tensor::from_array(([1_i64, src_len as i64], attention_mask.clone()))
                    .context("Failed to create encoder_attention_mask tensor")?;
            let hidden_tensor = Tensor::from_array((
                [1_i64, src_len as i64, hidden_dim as i64],
                hidden_states.clone(),
            ))
            .context("Failed to create encoder_hidden_states tensor")?;

            let outputs = decoder
                .run(ort::inputs! {
                    "input_ids" => decoder_ids_tensor,
                    "encoder_attention_mask" => encoder_mask_tensor,
                    "encoder_hidden_states" => hidden_tensor
                })
                .context("Decoder ONNX inference failed")?;

            // logits: [1, generated_len, vocab] — argmax over the last step
            let (shape, logits) = outputs[0]
                .try_extract_tensor::<f32>()
                .context("Failed to extract decoder logits")?;

            let vocab_size = shape[2] as usize;
            let last_step = &logits[logits.len() - vocab_size..];
            argmax(last_step) as i64
        };

        if next_id == eos_id {
            break;
        }
        generated.push(next_id);
    }

    // Skip the [</s> tgt_lang] prefix; decode with special tokens stripped.
    let output_ids: Vec<u32> = generated[2..].iter().map(|&id| id as u32).collect();
    let translated = tokenizer
        .decode(&output_ids, true)
        .map_err(|e| anyhow::anyhow!("Detokenization failed: {}", e))?;

    debug!(
        src_tokens = src_len,
        out_tokens = output_ids.len(),
        "Translated text"
    );

    Ok(translated.trim().to_string())
}

/// Index of the largest value. Ties resolve to the first occurrence.
fn argmax(values: &[f32]) -> usize {
    let mut best = 0;
    let mut best_val = f32::NEG_INFINITY;
    for (i, &v) in values.iter().enumerate() {
        if v > best_val {
            best = i;
            best_val = v;
        }
    }
    best
}
