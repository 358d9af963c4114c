// Host-side session for text comparison
// Persists the two inputs, memoizes comparisons and drops stale results

mod session;
mod store;

pub use session::{CompareSession, ComparisonRequest, Computed, Generation};
pub use store::{InputStore, JsonFileStore, MemoryStore, StoredInputs, MODIFIED_KEY, ORIGINAL_KEY};
