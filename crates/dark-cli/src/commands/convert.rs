//! Convert commands - turn a Grafana dashboard export into Dark YAML
//!
//! Both commands share the same flow: the whole document is converted in
//! memory and the destination is only written once conversion succeeded.

use std::path::Path;

use dark_convert::{ConvertOptions, Converter};
use dark_core::ManifestOptions;

use crate::display::{self, Verbosity};
use crate::error::Result;
use crate::util::{open_input, output_label, write_output};

/// `convert-yaml`: write the dashboard model alone
pub fn yaml(input: &Path, output: Option<&Path>, verbosity: Verbosity) -> Result<()> {
    run(input, output, ConvertOptions::default(), verbosity)
}

/// `convert-k8s-manifest`: wrap the dashboard in a `GrafanaDashboard` resource
pub fn manifest(
    name: &str,
    folder: &str,
    namespace: Option<&str>,
    input: &Path,
    output: Option<&Path>,
    verbosity: Verbosity,
) -> Result<()> {
    let mut options = ManifestOptions::new(name, folder);
    if let Some(namespace) = namespace {
        options = options.with_namespace(namespace);
    }

    // Fail on missing options before touching the input
    options.validate()?;

    run(input, output, ConvertOptions::manifest(options), verbosity)
}

fn run(
    input: &Path,
    output: Option<&Path>,
    options: ConvertOptions,
    verbosity: Verbosity,
) -> Result<()> {
    tracing::debug!(input = %input.display(), "converting dashboard");

    let reader = open_input(input)?;
    let mut buffer = Vec::new();
    let conversion = Converter::new(options).convert(reader, &mut buffer)?;

    write_output(output, &buffer)?;

    display::print_report(
        &conversion,
        &input.display().to_string(),
        &output_label(output),
        verbosity,
    );

    Ok(())
}
