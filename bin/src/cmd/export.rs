//! Export command implementation.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::{AllocationArgs, InputArgs, prepare};

/// Write every row of the allocation table to `output`.
pub(crate) fn run(inputs: &InputArgs, params: &AllocationArgs, output: &Path) -> Result<()> {
    let config = params.config()?;
    let (pipeline, derived) = prepare(inputs)?;
    let table = pipeline.allocate(&derived, &config)?;

    let file = File::create(output)
        .with_context(|| format!("creating output file '{}'", output.display()))?;
    let mut writer = BufWriter::new(file);
    table.write_csv(&mut writer)?;
    writer.flush()?;

    info!(rows = table.height(), path = %output.display(), "allocation table written");
    Ok(())
}
