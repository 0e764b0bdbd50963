//! Data structures describing the host bundler's finalized output graph.

use serde::{Deserialize, Serialize};

/// A single source module as seen by the bundler.
///
/// Identity is by [`id`](Asset::id) equality. Two assets may share a file path across
/// bundling contexts, so the path is a comparison key for user configuration but never an
/// identity key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
  /// Unique identifier assigned by the host bundler.
  pub id: String,
  /// Path of the source file that produced the asset.
  pub file_path: String,
}

/// An import edge recorded on a bundle.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
  /// Import specifier as written in the source module.
  pub specifier: String,
  /// Asset the specifier resolved to within the bundle, when the host resolved it.
  #[serde(default)]
  pub resolved_asset_id: Option<String>,
  /// Whether the host excluded the dependency from the build.
  #[serde(default)]
  pub skipped: bool,
}

/// How a bundle is delivered relative to its parent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BundleBehavior {
  /// Shipped as a separate file.
  #[default]
  Standalone,
  /// Embedded into the referencing bundle instead of shipped separately.
  Inline,
  /// Shipped as a separate file that never shares assets with siblings.
  Isolated,
}

/// Execution context a bundle targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BundleContext {
  /// An ordinary page bundle.
  #[default]
  Browser,
  /// A service-worker entry bundle.
  ServiceWorker,
  /// A dedicated or shared web worker bundle.
  WebWorker,
  /// A bundle targeting a Node-style runtime.
  Node,
}

/// A packaged output artifact grouping one or more assets.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
  /// Unique identifier assigned by the host bundler.
  pub id: String,
  /// Output file name, joined onto the public URL for manifest entries.
  pub name: String,
  /// Public URL prefix of the target this bundle belongs to.
  pub public_url: String,
  /// Delivery behavior tag.
  #[serde(default)]
  pub behavior: BundleBehavior,
  /// Execution context the bundle targets.
  #[serde(default)]
  pub context: BundleContext,
  /// Identifier of the primary entry asset; absent for shared bundles.
  #[serde(default)]
  pub main_entry_id: Option<String>,
  /// Opaque content-hash reference used as the build version token.
  #[serde(default)]
  pub hash_reference: String,
  /// Identifiers of the assets packaged into this bundle, in packaging order.
  #[serde(default)]
  pub asset_ids: Vec<String>,
  /// Import edges recorded for the bundle's contents.
  #[serde(default)]
  pub dependencies: Vec<Dependency>,
}

impl Bundle {
  /// Whether the bundle is embedded into another bundle rather than shipped on its own.
  pub fn is_inline(&self) -> bool {
    self.behavior == BundleBehavior::Inline
  }
}

/// Generated source handed back to the host bundler for injection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeAsset {
  /// Path the generated module is attributed to.
  pub file_path: String,
  /// Generated source text.
  pub code: String,
  /// Whether the host should treat the module as a bundle entry.
  pub is_entry: bool,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn bundle_defaults_cover_optional_snapshot_fields() {
    let bundle: Bundle =
      serde_json::from_str(r#"{"id": "b1", "name": "index.html", "publicUrl": "/"}"#)
        .expect("minimal bundle should deserialize");

    assert_eq!(bundle.behavior, BundleBehavior::Standalone);
    assert_eq!(bundle.context, BundleContext::Browser);
    assert!(bundle.main_entry_id.is_none());
    assert!(bundle.hash_reference.is_empty());
    assert!(!bundle.is_inline());
  }

  #[test]
  fn behavior_and_context_use_host_tag_spelling() {
    let bundle: Bundle = serde_json::from_str(
      r#"{
        "id": "sw",
        "name": "sw.js",
        "publicUrl": "/",
        "behavior": "inline",
        "context": "service-worker"
      }"#,
    )
    .expect("tagged bundle should deserialize");

    assert!(bundle.is_inline());
    assert_eq!(bundle.context, BundleContext::ServiceWorker);
  }
}
