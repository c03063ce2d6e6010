//! Audio bus names by index.
//!
//! The editor keeps its live bus layout in an `AudioBusLayout` resource
//! (`default_bus_layout.tres`). [`BusLayout`] reads that file; hosts that
//! already hold the layout in memory can use [`StaticBuses`].

use std::{collections::BTreeMap, io::ErrorKind, path::Path};

use crate::{Error, Result};

/// Name of bus 0, which always exists.
pub const MASTER_BUS: &str = "Master";

/// Highest bus index read from a layout file.
const MAX_BUS_INDEX: usize = 4095;

/// Anything that can list audio buses by index.
pub trait AudioBusSource {
    /// Number of buses, including the master bus.
    fn bus_count(&self) -> usize;

    /// Name of the bus at `index`, if there is one.
    fn bus_name(&self, index: usize) -> Option<String>;
}

/// Read every bus from `source`, keyed by index.
pub fn read_buses(source: &dyn AudioBusSource) -> BTreeMap<usize, String> {
    (0..source.bus_count())
        .filter_map(|index| source.bus_name(index).map(|name| (index, name)))
        .collect()
}

/// A fixed, in-memory bus list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticBuses(pub Vec<String>);

impl StaticBuses {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }
}

impl AudioBusSource for StaticBuses {
    fn bus_count(&self) -> usize {
        self.0.len()
    }

    fn bus_name(&self, index: usize) -> Option<String> {
        self.0.get(index).cloned()
    }
}

/// Bus layout parsed from an `AudioBusLayout` text resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusLayout {
    names: BTreeMap<usize, String>,
}

impl Default for BusLayout {
    fn default() -> Self {
        Self {
            names: BTreeMap::from([(0, MASTER_BUS.to_string())]),
        }
    }
}

impl BusLayout {
    /// Load a layout file. A missing file is the default, master-only layout.
    pub fn open(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Self::parse_str(&content)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no bus layout, using master bus only");
                Ok(Self::default())
            }
            Err(source) => Err(Box::new(Error::Io {
                path: path.to_path_buf(),
                source,
            })),
        }
    }

    /// Parse `bus/<index>/name = &"<Name>"` entries out of a layout resource.
    pub fn parse_str(content: &str) -> Self {
        let mut layout = Self::default();
        for line in content.lines() {
            let Some((key, value)) = line.trim().split_once('=') else {
                continue;
            };
            let Some(index) = bus_name_index(key.trim()) else {
                continue;
            };
            let name = value.trim().trim_start_matches('&').trim_matches('"');
            layout.names.insert(index, name.to_string());
        }
        layout
    }
}

impl AudioBusSource for BusLayout {
    fn bus_count(&self) -> usize {
        self.names
            .keys()
            .next_back()
            .and_then(|last| last.checked_add(1))
            .unwrap_or(0)
    }

    fn bus_name(&self, index: usize) -> Option<String> {
        if index >= self.bus_count() {
            return None;
        }
        Some(
            self.names
                .get(&index)
                .cloned()
                .unwrap_or_else(|| format!("Bus {}", index)),
        )
    }
}

/// Index of a `bus/<index>/name` key.
fn bus_name_index(key: &str) -> Option<usize> {
    let rest = key.strip_prefix("bus/")?;
    let (index, field) = rest.split_once('/')?;
    if field != "name" {
        return None;
    }
    let index: usize = index.parse().ok()?;
    if index > MAX_BUS_INDEX {
        tracing::warn!(key, max = MAX_BUS_INDEX, "bus index out of range, ignored");
        return None;
    }
    Some(index)
}
