//! Region store standing in for the page DOM.
//!
//! Every mounted region holds its current markup and the global version at
//! which it last changed. The browser shell asks for regions newer than the
//! version it has already applied.

use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionUpdate {
    pub id: String,
    pub html: String,
}

#[derive(Debug, Clone, Default)]
struct Region {
    html: String,
    version: u64,
}

#[derive(Debug, Default)]
pub struct View {
    regions: BTreeMap<String, Region>,
    version: u64,
}

impl View {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount every region id, empty.
    pub fn with_regions<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut view = Self::new();
        for id in ids {
            view.regions.insert(id.into(), Region::default());
        }
        view
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn is_mounted(&self, id: &str) -> bool {
        self.regions.contains_key(id)
    }

    /// Replace a region's markup wholesale.
    ///
    /// Unknown regions are skipped and `false` is returned. Identical markup
    /// does not bump the version.
    pub fn replace(&mut self, id: &str, html: String) -> bool {
        let Some(region) = self.regions.get_mut(id) else {
            return false;
        };
        if region.html != html {
            self.version += 1;
            region.html = html;
            region.version = self.version;
        }
        true
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.regions.get(id).map(|r| r.html.as_str())
    }

    pub fn changed_since(&self, since: u64) -> Vec<RegionUpdate> {
        self.regions
            .iter()
            .filter(|(_, r)| r.version > since)
            .map(|(id, r)| RegionUpdate {
                id: id.clone(),
                html: r.html.clone(),
            })
            .collect()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.regions.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_region_is_skipped() {
        let mut view = View::with_regions(["a"]);
        assert!(!view.replace("missing", "x".into()));
        assert_eq!(view.version(), 0);
    }

    #[test]
    fn changed_since_reports_only_newer_regions() {
        let mut view = View::with_regions(["a", "b"]);
        view.replace("a", "one".into());
        let seen = view.version();
        view.replace("b", "two".into());
        let updates = view.changed_since(seen);
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].id, "b");
        assert_eq!(view.changed_since(0).len(), 2);
    }

    #[test]
    fn identical_markup_keeps_version() {
        let mut view = View::with_regions(["a"]);
        view.replace("a", "same".into());
        let v = view.version();
        view.replace("a", "same".into());
        assert_eq!(view.version(), v);
    }
}
