use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Package -> class -> output path (relative to the output root, `/`-separated).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentTree {
    packages: BTreeMap<String, BTreeMap<String, String>>,
}

impl ContentTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a class location; a later entry for the same class replaces the earlier one.
    pub fn insert(
        &mut self,
        package: impl Into<String>,
        class_name: impl Into<String>,
        output_path: impl Into<String>,
    ) -> Option<String> {
        self.packages
            .entry(package.into())
            .or_default()
            .insert(class_name.into(), output_path.into())
    }

    pub fn get(&self, package: &str, class_name: &str) -> Option<&str> {
        self.packages
            .get(package)
            .and_then(|classes| classes.get(class_name))
            .map(String::as_str)
    }

    pub fn package_count(&self) -> usize {
        self.packages.len()
    }

    pub fn len(&self) -> usize {
        self.packages.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<(String, String, String)> for ContentTree {
    fn from_iter<I: IntoIterator<Item = (String, String, String)>>(iter: I) -> Self {
        let mut tree = ContentTree::new();
        for (package, class_name, output_path) in iter {
            tree.insert(package, class_name, output_path);
        }
        tree
    }
}
