//! MiniLM sentence encoder built on the Candle ML framework.
//!
//! The encoder is a frozen pretrained BERT tower: token embeddings pass
//! through the transformer, the hidden states are mean-pooled under the
//! attention mask, and the pooled vector is L2-normalized. Pooling is
//! mask-aware so that padding introduced by batching never leaks into the
//! result — splitting a batch must produce identical embeddings.

use super::config::MiniLmConfig;
use super::tokenizer::TokenizerHandle;
use super::traits::Embedder;
use crate::error::EmbeddingError;
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config, DTYPE};
use serde::Deserialize;
use tracing::info;

/// Subset of the upstream `config.json` checked against [`MiniLmConfig`]
/// before the weights are loaded.
#[derive(Deserialize)]
struct ConfigProbe {
    hidden_size: usize,
}

/// MiniLM embedding model.
///
/// Loaded once per process (see [`SharedEncoder`](super::SharedEncoder))
/// and shared read-only afterwards; encoding is deterministic given fixed
/// weights.
pub struct MiniLmEmbedder {
    model: BertModel,
    tokenizer: TokenizerHandle,
    config: MiniLmConfig,
    device: Device,
}

impl MiniLmEmbedder {
    /// Creates an encoder from raw artifact bytes: safetensors weights,
    /// the upstream `config.json`, and the serialized tokenizer.
    ///
    /// # Errors
    ///
    /// Returns [`EmbeddingError::InvalidConfig`] if `config.json` does not
    /// parse or disagrees with `config`, [`EmbeddingError::ModelLoad`] if
    /// the weights cannot be loaded, and tokenizer errors from
    /// [`TokenizerHandle::from_bytes`].
    pub fn from_bytes(
        model_bytes: Vec<u8>,
        config_bytes: &[u8],
        tokenizer_bytes: Vec<u8>,
        config: MiniLmConfig,
    ) -> Result<Self, EmbeddingError> {
        info!("Loading embedding model '{}'", config.model_id);
        info!(
            "Model bytes length: {} bytes ({:.2}MB)",
            model_bytes.len(),
            model_bytes.len() as f64 / 1_000_000.0
        );

        let probe: ConfigProbe = serde_json::from_slice(config_bytes).map_err(|e| {
            EmbeddingError::InvalidConfig(format!("Failed to parse model config: {}", e))
        })?;
        if probe.hidden_size != config.hidden_size {
            return Err(EmbeddingError::InvalidConfig(format!(
                "Model config hidden_size {} does not match expected {}",
                probe.hidden_size, config.hidden_size
            )));
        }

        let model_config: Config = serde_json::from_slice(config_bytes).map_err(|e| {
            EmbeddingError::InvalidConfig(format!("Failed to parse model config: {}", e))
        })?;

        let device = Self::select_device();
        let vb = VarBuilder::from_buffered_safetensors(model_bytes, DTYPE, &device)
            .map_err(|e| EmbeddingError::ModelLoad(format!("Failed to read safetensors: {}", e)))?;
        let model = BertModel::load(vb, &model_config)
            .map_err(|e| EmbeddingError::ModelLoad(format!("Failed to create BertModel: {}", e)))?;

        let tokenizer = TokenizerHandle::from_bytes(tokenizer_bytes, config.max_sequence_tokens)?;

        info!("Model loaded, embedding dimension {}", config.hidden_size);
        Ok(Self {
            model,
            tokenizer,
            config,
            device,
        })
    }

    /// Returns a reference to the config.
    pub fn config(&self) -> &MiniLmConfig {
        &self.config
    }

    /// Selects the best available compute device: CUDA, then Metal, then
    /// CPU.
    pub fn select_device() -> Device {
        if let Ok(cuda) = Device::new_cuda(0) {
            info!("Using CUDA GPU");
            return cuda;
        }
        if let Ok(metal) = Device::new_metal(0) {
            info!("Using Metal GPU");
            return metal;
        }
        info!("Using CPU");
        Device::Cpu
    }

    /// Runs the transformer over a `[batch, seq]` id/mask pair and pools
    /// to `[batch, hidden]`.
    fn forward_pooled(&self, input_ids: &Tensor, mask: &Tensor) -> Result<Tensor, EmbeddingError> {
        let type_ids = input_ids.zeros_like().map_err(|e| {
            EmbeddingError::TensorCreation(format!("Failed to create type ids: {}", e))
        })?;

        let hidden = self
            .model
            .forward(input_ids, &type_ids, Some(mask))
            .map_err(|e| EmbeddingError::InferenceFailed(format!("Forward pass failed: {}", e)))?;

        let pooled = Self::masked_mean_pool(&hidden, mask)?;
        if self.config.normalize_embeddings {
            Self::normalize_l2(&pooled)
        } else {
            Ok(pooled)
        }
    }

    /// Mean pooling over the token dimension, weighted by the attention
    /// mask so padded positions contribute nothing.
    fn masked_mean_pool(hidden: &Tensor, mask: &Tensor) -> Result<Tensor, EmbeddingError> {
        let infer = |e: candle_core::Error| {
            EmbeddingError::InferenceFailed(format!("Failed to pool: {}", e))
        };

        // [batch, seq] -> [batch, seq, 1]
        let mask_f = mask.to_dtype(DType::F32).map_err(infer)?.unsqueeze(2).map_err(infer)?;
        // [batch, seq, hidden] * [batch, seq, 1] -> summed [batch, hidden]
        let summed = hidden.broadcast_mul(&mask_f).map_err(infer)?.sum(1).map_err(infer)?;
        // Token counts per sequence, [batch, 1]; never zero because every
        // encoding carries at least the special tokens
        let counts = mask_f.sum(1).map_err(infer)?;
        summed.broadcast_div(&counts).map_err(infer)
    }

    /// L2 normalization to unit vectors.
    fn normalize_l2(v: &Tensor) -> Result<Tensor, EmbeddingError> {
        let infer = |e: candle_core::Error| {
            EmbeddingError::InferenceFailed(format!("Failed to normalize: {}", e))
        };
        let norms = v
            .sqr()
            .map_err(infer)?
            .sum_keepdim(1)
            .map_err(infer)?
            .sqrt()
            .map_err(infer)?;
        v.broadcast_div(&norms).map_err(infer)
    }
}

impl Embedder for MiniLmEmbedder {
    fn model_id(&self) -> &str {
        &self.config.model_id
    }

    fn embedding_dim(&self) -> usize {
        self.config.hidden_size
    }

    fn max_sequence_length(&self) -> usize {
        self.config.max_sequence_tokens
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let ids = self.tokenizer.tokenize(text)?;
        let len = ids.len();

        let input_ids = Tensor::from_vec(ids, (1, len), &self.device).map_err(|e| {
            EmbeddingError::TensorCreation(format!("Failed to create input tensor: {}", e))
        })?;
        let mask = Tensor::ones((1, len), DType::U32, &self.device).map_err(|e| {
            EmbeddingError::TensorCreation(format!("Failed to create mask tensor: {}", e))
        })?;

        let pooled = self.forward_pooled(&input_ids, &mask)?;
        pooled
            .squeeze(0)
            .and_then(|v| v.to_vec1::<f32>())
            .map_err(|e| {
                EmbeddingError::InferenceFailed(format!("Failed to extract embedding: {}", e))
            })
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let token_ids: Vec<Vec<u32>> = texts
            .iter()
            .map(|t| self.tokenizer.tokenize(t))
            .collect::<Result<_, _>>()?;

        let batch = token_ids.len();
        let max_len = token_ids.iter().map(|ids| ids.len()).max().unwrap_or(0);

        // Pad with the BERT pad token (0) and record real positions in the
        // attention mask
        let mut flat_ids = Vec::with_capacity(batch * max_len);
        let mut flat_mask = Vec::with_capacity(batch * max_len);
        for ids in &token_ids {
            flat_ids.extend_from_slice(ids);
            flat_ids.extend(std::iter::repeat(0u32).take(max_len - ids.len()));
            flat_mask.extend(std::iter::repeat(1u32).take(ids.len()));
            flat_mask.extend(std::iter::repeat(0u32).take(max_len - ids.len()));
        }

        let input_ids = Tensor::from_vec(flat_ids, (batch, max_len), &self.device).map_err(|e| {
            EmbeddingError::TensorCreation(format!("Failed to create batch tensor: {}", e))
        })?;
        let mask = Tensor::from_vec(flat_mask, (batch, max_len), &self.device).map_err(|e| {
            EmbeddingError::TensorCreation(format!("Failed to create mask tensor: {}", e))
        })?;

        let pooled = self.forward_pooled(&input_ids, &mask)?;
        pooled.to_vec2::<f32>().map_err(|e| {
            EmbeddingError::InferenceFailed(format!("Failed to extract embeddings: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Upstream config.json for all-MiniLM-L6-v2.
    const MINILM_CONFIG_JSON: &str = r#"{
        "architectures": ["BertModel"],
        "attention_probs_dropout_prob": 0.1,
        "hidden_act": "gelu",
        "hidden_dropout_prob": 0.1,
        "hidden_size": 384,
        "initializer_range": 0.02,
        "intermediate_size": 1536,
        "layer_norm_eps": 1e-12,
        "max_position_embeddings": 512,
        "model_type": "bert",
        "num_attention_heads": 12,
        "num_hidden_layers": 6,
        "pad_token_id": 0,
        "position_embedding_type": "absolute",
        "type_vocab_size": 2,
        "vocab_size": 30522
    }"#;

    #[test]
    fn test_model_load_invalid_bytes() {
        let result = MiniLmEmbedder::from_bytes(
            vec![1, 2, 3],
            MINILM_CONFIG_JSON.as_bytes(),
            vec![],
            MiniLmConfig::default(),
        );
        assert!(matches!(result, Err(EmbeddingError::ModelLoad(_))));
    }

    #[test]
    fn test_model_load_invalid_config() {
        let result = MiniLmEmbedder::from_bytes(
            vec![1, 2, 3],
            b"not json",
            vec![],
            MiniLmConfig::default(),
        );
        assert!(matches!(result, Err(EmbeddingError::InvalidConfig(_))));
    }

    #[test]
    fn test_model_load_dimension_disagreement() {
        let config = MiniLmConfig {
            hidden_size: 512,
            ..MiniLmConfig::default()
        };
        let result =
            MiniLmEmbedder::from_bytes(vec![1, 2, 3], MINILM_CONFIG_JSON.as_bytes(), vec![], config);
        assert!(matches!(result, Err(EmbeddingError::InvalidConfig(_))));
    }
}
