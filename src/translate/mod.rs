// Turkish-to-English translation — trait-based, served by a local ONNX model.
//
// The scoring prompt is written in English; the local completion model is
// English-only. The Translator trait is the seam: NllbTranslator implements
// it with NLLB-200, and a different model can slot in without touching the
// scoring pipeline.

pub mod download;
pub mod nllb;
pub mod traits;
