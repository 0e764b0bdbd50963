//! Rendering the generated install script for the service-worker bundle.

/// Import specifier of the runtime registration helper package.
///
/// The service-worker entry must import this package for the plugin to inject anything;
/// the generated script calls its `_register` export.
pub const RUNTIME_SPECIFIER: &str = "sw-precache-runtime";

/// Render the install script embedding the manifest and the build version token.
///
/// Both values are embedded as JSON, which is valid JavaScript literal syntax, so URL
/// strings and version tokens never need manual escaping.
pub fn render_install_script(
  manifest: &[String],
  version: &str,
) -> Result<String, serde_json::Error> {
  let manifest_literal = serde_json::to_string(manifest)?;
  let version_literal = serde_json::to_string(version)?;

  Ok(format!(
    r#"import {{_register}} from '{specifier}';
const manifest = {manifest};
const version = {version};
_register(manifest, version);
"#,
    specifier = RUNTIME_SPECIFIER,
    manifest = manifest_literal,
    version = version_literal,
  ))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn embeds_the_manifest_and_version_as_json_literals() {
    let manifest = vec!["/a.html".to_string(), "/static/a.1f2e3d.js".to_string()];
    let code = render_install_script(&manifest, "7f3a9c").expect("script should render");

    assert!(code.starts_with("import {_register} from 'sw-precache-runtime';\n"));
    assert!(code.contains(r#"const manifest = ["/a.html","/static/a.1f2e3d.js"];"#));
    assert!(code.contains(r#"const version = "7f3a9c";"#));
    assert!(code.ends_with("_register(manifest, version);\n"));
  }

  #[test]
  fn an_empty_manifest_still_registers() {
    let code = render_install_script(&[], "v1").expect("script should render");

    assert!(code.contains("const manifest = [];"));
  }

  #[test]
  fn url_quoting_is_handled_by_the_json_encoder() {
    let manifest = vec![r#"/odd "name".js"#.to_string()];
    let code = render_install_script(&manifest, "v1").expect("script should render");

    assert!(code.contains(r#"["/odd \"name\".js"]"#));
  }
}
