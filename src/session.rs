use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use crate::dashboard::Dashboard;
use crate::data::filter::{FilterError, FilterSelection};
use crate::data::loader::{load_file, LoadError};
use crate::data::model::CanonicalDataset;

// ---------------------------------------------------------------------------
// Dataset cache
// ---------------------------------------------------------------------------

/// Identity of the backing file. A change in any field means the cached
/// dataset is stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSignature {
    pub path: PathBuf,
    pub len: u64,
    pub modified: Option<SystemTime>,
}

impl SourceSignature {
    pub fn of(path: &Path) -> Result<Self, LoadError> {
        let meta = std::fs::metadata(path).map_err(|e| LoadError::DataUnavailable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            len: meta.len(),
            modified: meta.modified().ok(),
        })
    }
}

/// Memoizes the canonical dataset per source signature.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entry: Option<(SourceSignature, Arc<CanonicalDataset>)>,
    loads: usize,
}

impl DatasetCache {
    /// Return the cached dataset, reloading if the source changed since.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<CanonicalDataset>, LoadError> {
        let signature = SourceSignature::of(path)?;
        if let Some((cached, dataset)) = &self.entry {
            if *cached == signature {
                log::debug!("dataset cache hit for {}", path.display());
                return Ok(Arc::clone(dataset));
            }
            log::info!("{} changed on disk, reloading", path.display());
        }

        let dataset = Arc::new(load_file(path)?);
        self.entry = Some((signature, Arc::clone(&dataset)));
        self.loads += 1;
        Ok(dataset)
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// How many times the source has actually been read.
    pub fn load_count(&self) -> usize {
        self.loads
    }
}

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// Everything one dashboard session owns: its source, the cached dataset
/// and the sidebar selection.
#[derive(Debug)]
pub struct Session {
    source: PathBuf,
    cache: DatasetCache,
    selection: Option<FilterSelection>,
}

impl Session {
    pub fn open(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            cache: DatasetCache::default(),
            selection: None,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// The canonical dataset, loaded on first use.
    pub fn dataset(&mut self) -> Result<Arc<CanonicalDataset>, LoadError> {
        self.cache.get_or_load(&self.source)
    }

    pub fn cache(&self) -> &DatasetCache {
        &self.cache
    }

    /// Drop the cached dataset; the next access rereads the source.
    pub fn invalidate(&mut self) {
        self.cache.invalidate();
    }

    /// Set both dropdowns. The country must be one of the two options.
    pub fn select(&mut self, industry: impl Into<String>, country: &str) -> Result<(), FilterError> {
        self.selection = Some(FilterSelection::new(industry, country)?);
        Ok(())
    }

    /// Current selection, defaulting to the first option of each dropdown.
    pub fn selection(&mut self) -> Result<FilterSelection, LoadError> {
        if let Some(sel) = &self.selection {
            return Ok(sel.clone());
        }
        let dataset = self.dataset()?;
        Ok(FilterSelection::default_for(&dataset))
    }

    /// Assemble every panel for the current selection.
    pub fn dashboard(&mut self, cutoff_year: i32) -> Result<Dashboard, LoadError> {
        let dataset = self.dataset()?;
        let selection = self.selection()?;
        Ok(Dashboard::build(&dataset, &selection, cutoff_year))
    }
}
