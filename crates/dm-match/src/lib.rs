pub mod diff;
pub mod embed;
pub mod matcher;
pub mod similarity;

pub use embed::{EmbeddingProvider, HashingEmbedder};
pub use matcher::{match_documents, MatchResult, SentenceMatch};
pub use similarity::{cosine_similarity, similarity_matrix};
