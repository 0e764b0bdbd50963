//! Deciding which output bundles belong in the precache manifest.

use crate::graph::BundleGraph;
use crate::models::Bundle;
use crate::selection::SelectedAssets;

/// Join a target's public URL with a bundle file name.
///
/// The result always uses forward slashes and exactly one separator between the two
/// parts, so manifests are stable regardless of how the host spelled its public URL.
pub fn url_join(public_url: &str, name: &str) -> String {
  let base = public_url.trim_end_matches('/');
  let name = name.replace('\\', "/");
  let name = name.trim_start_matches('/');
  if base.is_empty() {
    format!("/{name}")
  } else {
    format!("{base}/{name}")
  }
}

/// Collect the ordered list of bundle URLs the service worker should precache.
///
/// Bundles are visited in graph traversal order, which fixes the manifest order. Inline
/// bundles are never listed, and neither is the service worker's own bundle
/// (`self_bundle_id`). A bundle with a main entry is listed only when that entry asset
/// was selected; a shared bundle is listed when any selected asset is referenced by it.
pub fn collect_manifest<G: BundleGraph>(
  graph: &G,
  selected: &SelectedAssets,
  self_bundle_id: &str,
) -> Vec<String> {
  let mut manifest = Vec::new();

  graph.for_each_bundle(&mut |bundle| {
    if bundle.is_inline() || bundle.id == self_bundle_id {
      return;
    }
    if is_relevant(graph, selected, bundle) {
      manifest.push(url_join(&bundle.public_url, &bundle.name));
    }
  });

  manifest
}

/// A main-entry bundle represents a page; it is cached only when its own entry asset was
/// selected. A shared bundle has no owner entry, so it is cached when any selected asset
/// depends on code it carries.
fn is_relevant<G: BundleGraph>(graph: &G, selected: &SelectedAssets, bundle: &Bundle) -> bool {
  match graph.main_entry(bundle) {
    Some(entry) => selected.contains_id(&entry.id),
    None => selected
      .iter()
      .any(|asset| graph.is_asset_referenced(bundle, asset)),
  }
}
