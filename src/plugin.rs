//! The runtime plugin hook: inject the install script into service-worker bundles.
//!
//! This is the glue between the host bundler's plugin contract and the decision logic in
//! [`selection`](crate::selection) and [`manifest`](crate::manifest). It makes no
//! decisions of its own beyond the two gates the host contract requires: the bundle must
//! target the service-worker context, and it must actually import the runtime
//! registration helper.

use std::ops::ControlFlow;
use std::path::Path;

use anyhow::{Context, Result};

use crate::codegen::{RUNTIME_SPECIFIER, render_install_script};
use crate::config::RuntimeConfig;
use crate::graph::BundleGraph;
use crate::manifest::collect_manifest;
use crate::models::{Asset, Bundle, BundleContext, RuntimeAsset};
use crate::selection::select_assets;

/// Build-level options supplied by the host bundler.
#[derive(Debug, Clone)]
pub struct PluginOptions {
  /// Project root used to normalise asset paths and discover configuration.
  pub project_root: String,
}

/// Runtime plugin that injects the precache install script into service-worker bundles.
///
/// The plugin holds no state: every build recomputes the manifest from the finalized
/// graph snapshot it is handed.
#[derive(Debug, Default)]
pub struct ServiceWorkerRuntime;

impl ServiceWorkerRuntime {
  /// Apply the runtime to a finalized bundle, discovering configuration from the
  /// project root.
  pub fn apply<G: BundleGraph>(
    &self,
    graph: &G,
    bundle: &Bundle,
    options: &PluginOptions,
  ) -> Result<Vec<RuntimeAsset>> {
    let config = RuntimeConfig::discover(Path::new(&options.project_root))
      .context("failed to load service worker cache configuration")?;
    self.apply_with_config(graph, bundle, options, &config)
  }

  /// Apply the runtime with an already-loaded configuration.
  ///
  /// Non-service-worker bundles, and service workers that do not import the
  /// [`RUNTIME_SPECIFIER`] helper, produce no output.
  pub fn apply_with_config<G: BundleGraph>(
    &self,
    graph: &G,
    bundle: &Bundle,
    options: &PluginOptions,
    config: &RuntimeConfig,
  ) -> Result<Vec<RuntimeAsset>> {
    if bundle.context != BundleContext::ServiceWorker {
      return Ok(Vec::new());
    }

    let Some(runtime_asset) = resolve_runtime_import(graph, bundle) else {
      return Ok(Vec::new());
    };

    let selected = select_assets(graph, config.files_to_cache.as_deref(), &options.project_root);
    let manifest = collect_manifest(graph, &selected, &bundle.id);
    let code = render_install_script(&manifest, &bundle.hash_reference)
      .context("failed to render the install script")?;

    Ok(vec![RuntimeAsset {
      file_path: runtime_asset.file_path.clone(),
      code,
      is_entry: true,
    }])
  }
}

/// Find the asset the service-worker bundle resolved the runtime helper import to.
///
/// The generated module is attributed to that asset's path so the host splices it into
/// the right place. Skipped dependencies are ignored, matching hosts that drop imports
/// eliminated during tree shaking.
fn resolve_runtime_import<'a, G: BundleGraph>(graph: &'a G, bundle: &Bundle) -> Option<&'a Asset> {
  let mut resolved = None;
  graph.try_for_each_dependency(bundle, &mut |dependency| {
    if dependency.specifier == RUNTIME_SPECIFIER && !dependency.skipped {
      resolved = dependency
        .resolved_asset_id
        .as_deref()
        .and_then(|id| graph.asset_by_id(id));
      ControlFlow::Break(())
    } else {
      ControlFlow::Continue(())
    }
  });
  resolved
}
