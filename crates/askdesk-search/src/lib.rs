//! # AskDesk Search
//!
//! Everything between the raw dataset and a ranked fuzzy hit:
//! - **Normalizer** — lowercasing + whole-word domain synonym rewriting
//! - **Records** — the dataset flattened into one searchable record per entry
//! - **Index** — threshold-gated fuzzy matching (strict for answers, lenient
//!   for suggestions), scores in [0, 1] where lower is better
//! - **Store** — process-wide snapshot holder with atomic swap on replace
//!
//! ```text
//! Dataset feed → DatasetStore::replace
//!                  ├── flatten → Vec<SearchRecord>
//!                  ├── build strict + lenient FuzzyIndex
//!                  └── swap Arc<IndexSnapshot>   (readers never see a half-built index)
//! ```

pub mod fetch;
pub mod index;
pub mod normalize;
pub mod record;
pub mod store;

pub use index::{FuzzyIndex, SearchHit};
pub use normalize::QueryNormalizer;
pub use record::{RecordKind, RecordPayload, SearchRecord};
pub use store::{DatasetStore, IndexSnapshot};
