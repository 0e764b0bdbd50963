//! Selecting which assets the service worker must cache.

use std::collections::BTreeSet;

use regex::Regex;
use serde::Deserialize;

use crate::graph::BundleGraph;
use crate::models::Asset;
use crate::project::to_project_path;

/// One entry of the `filesToCache` configuration.
///
/// A bare string selects exactly the assets whose project path matches it. The structured
/// form can additionally pull in the matched assets' dependency closure.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FileSelector {
  /// Select only the assets matching this project path.
  Path(String),
  /// Select matching assets, optionally together with their dependency closure.
  #[serde(rename_all = "camelCase")]
  WithOptions {
    /// Project path the selector matches against.
    file: String,
    /// Also select every asset transitively reachable from each match.
    #[serde(default)]
    include_children: bool,
  },
}

impl FileSelector {
  /// The path this selector matches against.
  pub fn file(&self) -> &str {
    match self {
      Self::Path(file) => file,
      Self::WithOptions { file, .. } => file,
    }
  }

  /// Whether matched assets bring their dependency closure along.
  pub fn include_children(&self) -> bool {
    match self {
      Self::Path(_) => false,
      Self::WithOptions {
        include_children, ..
      } => *include_children,
    }
  }
}

/// Ordered, identifier-keyed set of selected assets.
///
/// Membership is by asset identifier; iteration yields assets in insertion order, which
/// follows configuration order and then graph traversal order.
#[derive(Debug, Default, Clone)]
pub struct SelectedAssets {
  ids: BTreeSet<String>,
  assets: Vec<Asset>,
}

impl SelectedAssets {
  /// Insert an asset, returning `true` when it was not already selected.
  pub fn insert(&mut self, asset: &Asset) -> bool {
    if self.ids.insert(asset.id.clone()) {
      self.assets.push(asset.clone());
      true
    } else {
      false
    }
  }

  /// Whether an asset with this identifier has been selected.
  pub fn contains_id(&self, id: &str) -> bool {
    self.ids.contains(id)
  }

  /// Iterate the selected assets in insertion order.
  pub fn iter(&self) -> impl Iterator<Item = &Asset> {
    self.assets.iter()
  }

  /// Number of selected assets.
  pub fn len(&self) -> usize {
    self.assets.len()
  }

  /// Whether nothing has been selected.
  pub fn is_empty(&self) -> bool {
    self.assets.is_empty()
  }
}

fn external_reference_patterns() -> &'static [Regex] {
  use std::sync::OnceLock;

  static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
  PATTERNS
    .get_or_init(|| {
      vec![
        Regex::new(r"(?i)^https?://").expect("invalid http(s) regex"),
        Regex::new(r"(?i)^data:").expect("invalid data URI regex"),
        Regex::new(r"(?i)^mailto:").expect("invalid mailto regex"),
      ]
    })
    .as_slice()
}

/// External URLs and data URIs can never equal a project-relative path, so selectors
/// naming them are skipped without scanning the asset graph.
fn is_external_reference(value: &str) -> bool {
  external_reference_patterns()
    .iter()
    .any(|pattern| pattern.is_match(value))
}

/// Compute the closed set of assets the service worker must cache.
///
/// An absent `config` selects every asset in the graph. Otherwise each selector is
/// resolved in configuration order: assets whose normalised project path equals the
/// selector's path exactly are selected, and selectors with `includeChildren` also select
/// every asset reachable from each match via forward dependency edges. A selector
/// matching nothing is silently a no-op.
///
/// The traversal is read-only and holds no state between calls; selecting twice with the
/// same inputs yields the same set.
pub fn select_assets<G: BundleGraph>(
  graph: &G,
  config: Option<&[FileSelector]>,
  project_root: &str,
) -> SelectedAssets {
  let mut selected = SelectedAssets::default();

  let Some(selectors) = config else {
    graph.for_each_asset(&mut |asset| {
      selected.insert(asset);
    });
    return selected;
  };

  for selector in selectors {
    if is_external_reference(selector.file()) {
      continue;
    }

    let target = to_project_path(project_root, selector.file());
    let mut matches = Vec::new();
    graph.for_each_asset(&mut |asset| {
      if to_project_path(project_root, &asset.file_path) == target {
        matches.push(asset.clone());
      }
    });

    for asset in &matches {
      selected.insert(asset);
      if selector.include_children() {
        graph.for_each_descendant(&asset.id, &mut |child| {
          selected.insert(child);
        });
      }
    }
  }

  selected
}
