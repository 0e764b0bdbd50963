//! Read-only views over the host bundler's asset and bundle graphs.
//!
//! The plugin never owns the graph it inspects. [`BundleGraph`] is the seam between the
//! decision logic and whichever host supplies the data; [`MemoryBundleGraph`] is an
//! immutable snapshot implementation used by the tests and the `sw-precache` inspector so
//! both run the exact code path the host glue runs.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::ControlFlow;

use serde::{Deserialize, Serialize};

use crate::models::{Asset, Bundle, Dependency};

/// Read-only view of a finalized bundle graph.
///
/// All traversals visit nodes in the host's graph order, which fixes the order of the
/// resulting manifest. Implementations must be cycle-safe: a traversal visits each node
/// at most once.
pub trait BundleGraph {
  /// Visit every asset in the graph, in traversal order.
  fn for_each_asset(&self, visit: &mut dyn FnMut(&Asset));

  /// Visit every bundle in the graph, in traversal order.
  fn for_each_bundle(&self, visit: &mut dyn FnMut(&Bundle));

  /// Visit every asset reachable from `root_id` via forward dependency edges.
  ///
  /// The root itself is not visited, and no asset is visited twice even when the
  /// underlying edges form a cycle.
  fn for_each_descendant(&self, root_id: &str, visit: &mut dyn FnMut(&Asset));

  /// Look up an asset by its identifier.
  fn asset_by_id(&self, id: &str) -> Option<&Asset>;

  /// Whether `asset` is referenced by code carried in `bundle`.
  ///
  /// This is the cross-bundle relation: an asset can be referenced by a bundle without
  /// being packaged as any of that bundle's entries.
  fn is_asset_referenced(&self, bundle: &Bundle, asset: &Asset) -> bool;

  /// Visit the dependencies recorded on `bundle` until the visitor breaks.
  fn try_for_each_dependency(
    &self,
    bundle: &Bundle,
    visit: &mut dyn FnMut(&Dependency) -> ControlFlow<()>,
  ) -> ControlFlow<()> {
    for dependency in &bundle.dependencies {
      visit(dependency)?;
    }
    ControlFlow::Continue(())
  }

  /// Resolve the primary entry asset of `bundle`, when it has one.
  fn main_entry(&self, bundle: &Bundle) -> Option<&Asset> {
    bundle
      .main_entry_id
      .as_deref()
      .and_then(|id| self.asset_by_id(id))
  }
}

/// Serializable snapshot of a finalized bundle graph.
///
/// This is the wire form consumed by [`MemoryBundleGraph`]: hosts (and test fixtures)
/// describe assets, bundles, forward dependency edges and the cross-bundle reference
/// relation as flat lists of identifier pairs.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphSnapshot {
  /// Assets in graph traversal order.
  #[serde(default)]
  pub assets: Vec<Asset>,
  /// Bundles in graph traversal order.
  #[serde(default)]
  pub bundles: Vec<Bundle>,
  /// Forward dependency edges between assets, as `[from, to]` identifier pairs.
  #[serde(default)]
  pub edges: Vec<(String, String)>,
  /// Cross-bundle reference relation, as `[bundle, asset]` identifier pairs.
  #[serde(default)]
  pub references: Vec<(String, String)>,
}

/// Immutable in-memory [`BundleGraph`] built from a [`GraphSnapshot`].
#[derive(Debug, Default)]
pub struct MemoryBundleGraph {
  assets: Vec<Asset>,
  bundles: Vec<Bundle>,
  asset_index: BTreeMap<String, usize>,
  children: BTreeMap<String, Vec<String>>,
  references: BTreeMap<String, BTreeSet<String>>,
}

impl MemoryBundleGraph {
  /// Index a snapshot into a queryable graph.
  pub fn new(snapshot: GraphSnapshot) -> Self {
    let asset_index = snapshot
      .assets
      .iter()
      .enumerate()
      .map(|(index, asset)| (asset.id.clone(), index))
      .collect();

    let mut children: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (from, to) in snapshot.edges {
      children.entry(from).or_default().push(to);
    }

    let mut references: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for (bundle_id, asset_id) in snapshot.references {
      references.entry(bundle_id).or_default().insert(asset_id);
    }

    Self {
      assets: snapshot.assets,
      bundles: snapshot.bundles,
      asset_index,
      children,
      references,
    }
  }

  /// Parse a JSON snapshot and index it.
  pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
    serde_json::from_str(text).map(Self::new)
  }

  /// Look up a bundle by its identifier.
  pub fn bundle_by_id(&self, id: &str) -> Option<&Bundle> {
    self.bundles.iter().find(|bundle| bundle.id == id)
  }
}

impl BundleGraph for MemoryBundleGraph {
  fn for_each_asset(&self, visit: &mut dyn FnMut(&Asset)) {
    for asset in &self.assets {
      visit(asset);
    }
  }

  fn for_each_bundle(&self, visit: &mut dyn FnMut(&Bundle)) {
    for bundle in &self.bundles {
      visit(bundle);
    }
  }

  fn for_each_descendant(&self, root_id: &str, visit: &mut dyn FnMut(&Asset)) {
    let mut visited: BTreeSet<&str> = BTreeSet::new();
    visited.insert(root_id);

    // Depth-first in recorded edge order; `visited` keeps cyclic graphs terminating.
    let mut stack: Vec<&str> = Vec::new();
    push_children(&self.children, root_id, &mut stack);

    while let Some(id) = stack.pop() {
      if !visited.insert(id) {
        continue;
      }
      if let Some(asset) = self.asset_by_id(id) {
        visit(asset);
      }
      push_children(&self.children, id, &mut stack);
    }
  }

  fn asset_by_id(&self, id: &str) -> Option<&Asset> {
    self
      .asset_index
      .get(id)
      .and_then(|&index| self.assets.get(index))
  }

  fn is_asset_referenced(&self, bundle: &Bundle, asset: &Asset) -> bool {
    self
      .references
      .get(&bundle.id)
      .is_some_and(|assets| assets.contains(&asset.id))
  }
}

fn push_children<'a>(
  children: &'a BTreeMap<String, Vec<String>>,
  id: &str,
  stack: &mut Vec<&'a str>,
) {
  if let Some(next) = children.get(id) {
    for child in next.iter().rev() {
      stack.push(child);
    }
  }
}
