use anyhow::{Context, Result};
use compare_diff::{DiffConfig, DiffResult};
use log::{debug, trace};

use crate::store::{InputStore, StoredInputs, MODIFIED_KEY, ORIGINAL_KEY};

/// Identifies one state of the inputs and config; newer states compare greater
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Everything needed to run one comparison, detached from the session
#[derive(Debug, Clone)]
pub struct ComparisonRequest {
    pub generation: Generation,
    pub inputs: StoredInputs,
    pub config: DiffConfig,
}

impl ComparisonRequest {
    /// Run the comparison. This is pure and may happen anywhere.
    pub fn run(self) -> Computed {
        let result = self
            .config
            .recompute(&self.inputs.original, &self.inputs.modified);
        Computed {
            generation: self.generation,
            inputs: self.inputs,
            config: self.config,
            result,
        }
    }
}

/// A finished comparison and the state it was computed from
#[derive(Debug, Clone)]
pub struct Computed {
    pub generation: Generation,
    pub inputs: StoredInputs,
    pub config: DiffConfig,
    pub result: DiffResult,
}

impl Computed {
    fn matches(&self, inputs: &StoredInputs, config: &DiffConfig) -> bool {
        self.inputs == *inputs && self.config == *config
    }
}

/// The host side of a comparison: persisted inputs, memoized results and
/// latest-wins delivery.
pub struct CompareSession<S: InputStore> {
    store: S,
    config: DiffConfig,
    inputs: StoredInputs,
    generation: Generation,
    latest: Option<Computed>,
    recomputes: usize,
}

impl<S: InputStore> CompareSession<S> {
    /// Open a session, restoring the last persisted inputs
    pub fn open(store: S, config: DiffConfig) -> Result<Self> {
        let inputs = StoredInputs::load(&store).context("Failed to restore comparison inputs")?;
        debug!(
            "Restored inputs of {} and {} bytes",
            inputs.original.len(),
            inputs.modified.len()
        );

        Ok(Self {
            store,
            config,
            inputs,
            generation: Generation::default(),
            latest: None,
            recomputes: 0,
        })
    }

    /// Replace and persist the original text
    pub fn set_original(&mut self, text: impl Into<String>) -> Result<Generation> {
        let text = text.into();
        self.store
            .store(ORIGINAL_KEY, &text)
            .context("Failed to persist original text")?;
        self.inputs.original = text;
        Ok(self.bump())
    }

    /// Replace and persist the modified text
    pub fn set_modified(&mut self, text: impl Into<String>) -> Result<Generation> {
        let text = text.into();
        self.store
            .store(MODIFIED_KEY, &text)
            .context("Failed to persist modified text")?;
        self.inputs.modified = text;
        Ok(self.bump())
    }

    /// Reset both inputs to empty text and persist them
    pub fn clear_all(&mut self) -> Result<Generation> {
        let cleared = StoredInputs::default();
        cleared
            .save(&mut self.store)
            .context("Failed to persist cleared inputs")?;
        self.inputs = cleared;
        Ok(self.bump())
    }

    /// Replace the diff configuration
    pub fn set_config(&mut self, config: DiffConfig) -> Generation {
        self.config = config;
        self.bump()
    }

    /// Snapshot the current state for a comparison run elsewhere
    pub fn request(&self) -> ComparisonRequest {
        ComparisonRequest {
            generation: self.generation,
            inputs: self.inputs.clone(),
            config: self.config.clone(),
        }
    }

    /// Hand back a finished comparison.
    ///
    /// Returns false and drops the result when the inputs changed after the
    /// request was taken.
    pub fn deliver(&mut self, computed: Computed) -> bool {
        if computed.generation != self.generation {
            debug!(
                "Dropping stale result of {:?}, current is {:?}",
                computed.generation, self.generation
            );
            return false;
        }

        self.latest = Some(computed);
        true
    }

    /// Get an up-to-date result, recomputing only when the inputs or the
    /// config differ from the last accepted result
    pub fn refresh(&mut self) -> &DiffResult {
        let current = match self.latest.take() {
            Some(mut computed) if computed.matches(&self.inputs, &self.config) => {
                trace!("Inputs unchanged, reusing result of {:?}", computed.generation);
                computed.generation = self.generation;
                computed
            }
            _ => {
                self.recomputes += 1;
                self.request().run()
            }
        };

        &self.latest.insert(current).result
    }

    /// The most recently accepted result, if any
    pub fn latest(&self) -> Option<&DiffResult> {
        self.latest.as_ref().map(|computed| &computed.result)
    }

    /// Check if the latest accepted result belongs to the current inputs
    pub fn is_current(&self) -> bool {
        self.latest
            .as_ref()
            .is_some_and(|computed| computed.generation == self.generation)
    }

    /// How many times `refresh` actually ran a comparison
    pub fn recompute_count(&self) -> usize {
        self.recomputes
    }

    pub fn inputs(&self) -> &StoredInputs {
        &self.inputs
    }

    pub fn config(&self) -> &DiffConfig {
        &self.config
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Get the backing store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Close the session, returning the store
    pub fn into_store(self) -> S {
        self.store
    }

    fn bump(&mut self) -> Generation {
        self.generation = self.generation.next();
        self.generation
    }
}
