//! Maximal marginal relevance selection.
//!
//! MMR greedily picks candidates maximizing
//! `lambda * relevance - (1 - lambda) * max_similarity_to_selected`,
//! balancing relevance to the query against redundancy with what was
//! already picked. `lambda = 1.0` reduces to pure relevance ranking,
//! `lambda = 0.0` to pure diversity.

use super::cosine_similarity;

/// Default relevance/diversity trade-off.
pub const DEFAULT_LAMBDA: f64 = 0.5;

/// Knobs for [`VectorStore::retrieve`](super::VectorStore::retrieve).
#[derive(Debug, Clone, Copy)]
pub struct MmrOptions {
    /// Relevance/diversity trade-off, in `[0.0, 1.0]`.
    pub lambda: f64,
    /// Candidate pool size; `None` means a pool of exactly `k`.
    pub fetch_k: Option<usize>,
}

impl Default for MmrOptions {
    fn default() -> Self {
        Self {
            lambda: DEFAULT_LAMBDA,
            fetch_k: None,
        }
    }
}

/// A candidate entering MMR selection: its query relevance and embedding,
/// tagged with the caller's payload.
pub(crate) struct Candidate<'a, T> {
    pub relevance: f64,
    pub embedding: &'a [f64],
    pub payload: T,
}

/// Selects up to `k` candidates in MMR order, consuming the pool.
pub(crate) fn select<T>(mut candidates: Vec<Candidate<'_, T>>, k: usize, lambda: f64) -> Vec<T> {
    let n = candidates.len().min(k);
    let mut selected_embeddings: Vec<&[f64]> = Vec::with_capacity(n);
    let mut output = Vec::with_capacity(n);

    for _ in 0..n {
        let mut best_idx = 0;
        let mut best_mmr = f64::NEG_INFINITY;

        for (i, candidate) in candidates.iter().enumerate() {
            let max_sim_to_selected = if selected_embeddings.is_empty() {
                0.0
            } else {
                selected_embeddings
                    .iter()
                    .map(|emb| cosine_similarity(candidate.embedding, emb))
                    .fold(f64::NEG_INFINITY, f64::max)
            };

            let mmr = lambda * candidate.relevance - (1.0 - lambda) * max_sim_to_selected;
            if mmr > best_mmr {
                best_mmr = mmr;
                best_idx = i;
            }
        }

        let chosen = candidates.swap_remove(best_idx);
        selected_embeddings.push(chosen.embedding);
        output.push(chosen.payload);
    }

    output
}
