//! Report path and write helpers shared by commands.

use anyhow::{Context, Result};
use kanjifont_spec::{GenerationReport, PipelineConfig};
use std::fs;
use std::path::PathBuf;

/// Where the report for `config` goes: `<output_dir>/<font_name>.report.json`.
pub(crate) fn report_path(config: &PipelineConfig) -> PathBuf {
    config
        .output_dir
        .join(GenerationReport::filename(&config.font_name))
}

/// Writes `report` next to the config's artifacts and returns its path.
pub(crate) fn write_report(report: &GenerationReport, config: &PipelineConfig) -> Result<PathBuf> {
    let path = report_path(config);
    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            config.output_dir.display()
        )
    })?;
    let json = report
        .to_json_pretty()
        .context("Failed to serialize report")?;
    fs::write(&path, json)
        .with_context(|| format!("Failed to write report to: {}", path.display()))?;
    Ok(path)
}

/// Version string recorded in reports.
pub(crate) fn tool_version() -> String {
    format!("kanjifont v{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kanjifont_spec::ReportBuilder;

    #[test]
    fn test_report_written_next_to_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig::new("a.ttf")
            .with_font_name("k12")
            .with_output_dir(dir.path().join("out"));
        let report = ReportBuilder::new(config.clone(), tool_version()).build();

        let path = write_report(&report, &config).unwrap();
        assert_eq!(path, dir.path().join("out").join("k12.report.json"));
        let parsed = GenerationReport::from_json(&fs::read_to_string(&path).unwrap()).unwrap();
        assert!(parsed.ok);
        assert_eq!(parsed.config.font_name, "k12");
    }
}
