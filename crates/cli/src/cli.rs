//! CLI definitions and command dispatch.

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{ArgAction, Parser, ValueEnum};
use log::info;

use monospacifier_core::{
    ProcessOptions, RenameRule, ReportFormat, WidthStatistic, config::DEFAULT_LINK_SUFFIX,
    process_fonts, render,
};

#[derive(Parser)]
#[command(name = "monospacifier")]
#[command(about = "Stretch variable-width fonts to the cell width of monospace reference fonts")]
pub struct Cli {
    /// Monospace fonts whose cell width the inputs are stretched to
    #[arg(long, required = true, num_args = 1..)]
    pub references: Vec<PathBuf>,

    /// Variable-width fonts to monospacify
    #[arg(long, required = true, num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    /// Output directory, created if missing
    #[arg(long, default_value = ".")]
    pub save_to: PathBuf,

    /// Also write each reference font extended with the monospacified glyphs
    #[arg(long)]
    pub merge: bool,

    /// Copy the reference's vertical metrics into the monospacified fonts
    #[arg(long)]
    pub copy_metrics: bool,

    /// Substring replacement applied to generated names (repeatable)
    #[arg(
        long = "rename",
        num_args = 2,
        value_names = ["FROM", "TO"],
        action = ArgAction::Append
    )]
    pub renames: Vec<String>,

    /// How the width of an input font is measured
    #[arg(long, value_enum, default_value_t = Statistic::Average)]
    pub input_width: Statistic,

    /// How the cell width of a reference font is measured
    #[arg(long, value_enum, default_value_t = Statistic::MostCommon)]
    pub reference_width: Statistic,

    /// Summary format printed once all fonts are written
    #[arg(long, value_enum, default_value_t = Report::Table)]
    pub report: Report,

    /// Appended to every output link in the table report
    #[arg(long, default_value = DEFAULT_LINK_SUFFIX)]
    pub link_suffix: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Statistic {
    Average,
    Median,
    MostCommon,
}

impl From<Statistic> for WidthStatistic {
    fn from(value: Statistic) -> Self {
        match value {
            Statistic::Average => WidthStatistic::Average,
            Statistic::Median => WidthStatistic::Median,
            Statistic::MostCommon => WidthStatistic::MostCommon,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Report {
    Table,
    Plain,
}

impl From<Report> for ReportFormat {
    fn from(value: Report) -> Self {
        match value {
            Report::Table => ReportFormat::Table,
            Report::Plain => ReportFormat::Plain,
        }
    }
}

impl Cli {
    pub fn options(&self) -> ProcessOptions {
        ProcessOptions {
            save_to: self.save_to.clone(),
            merge: self.merge,
            copy_metrics: self.copy_metrics,
            renames: self
                .renames
                .chunks_exact(2)
                .map(|pair| RenameRule::new(&pair[0], &pair[1]))
                .collect(),
            input_width: self.input_width.into(),
            reference_width: self.reference_width.into(),
        }
    }

    /// Process every reference/input pair, print the report, and fail if any
    /// pair failed.
    pub fn run(self) -> Result<()> {
        let options = self.options();
        let mut records = Vec::new();
        let mut failures = 0usize;

        for result in process_fonts(&self.references, &self.inputs, &options) {
            match result {
                Ok(record) => records.push(record),
                Err(_) => failures += 1,
            }
        }

        info!("Wrote {} fonts to {}", records.len(), options.save_to.display());
        print!("{}", render(&records, self.report.into(), &self.link_suffix));

        if failures > 0 {
            bail!("{failures} font(s) could not be processed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["monospacifier", "--references", "a.ttf", "--inputs", "b.ttf", "c.ttf"]);
        assert_eq!(cli.references, vec![PathBuf::from("a.ttf")]);
        assert_eq!(cli.inputs, vec![PathBuf::from("b.ttf"), PathBuf::from("c.ttf")]);
        assert_eq!(cli.save_to, PathBuf::from("."));
        assert!(!cli.merge);
        assert!(!cli.copy_metrics);
        assert_eq!(cli.input_width, Statistic::Average);
        assert_eq!(cli.reference_width, Statistic::MostCommon);
        assert_eq!(cli.report, Report::Table);
        assert_eq!(cli.link_suffix, "?raw=true");
    }

    #[test]
    fn test_renames_are_paired() {
        let cli = parse(&[
            "monospacifier",
            "--references",
            "a.ttf",
            "--inputs",
            "b.ttf",
            "--rename",
            "Foo",
            "Bar",
            "--rename",
            "Mono",
            "M",
        ]);
        let options = cli.options();
        assert_eq!(options.renames, vec![RenameRule::new("Foo", "Bar"), RenameRule::new("Mono", "M")]);
    }

    #[test]
    fn test_statistics_and_report() {
        let cli = parse(&[
            "monospacifier",
            "--references",
            "a.ttf",
            "--inputs",
            "b.ttf",
            "--input-width",
            "median",
            "--reference-width",
            "average",
            "--report",
            "plain",
            "--merge",
            "--copy-metrics",
            "--save-to",
            "out",
        ]);
        assert_eq!(cli.report, Report::Plain);
        let options = cli.options();
        assert_eq!(options.input_width, WidthStatistic::Median);
        assert_eq!(options.reference_width, WidthStatistic::Average);
        assert!(options.merge && options.copy_metrics);
        assert_eq!(options.save_to, PathBuf::from("out"));
    }

    #[test]
    fn test_missing_inputs_is_an_error() {
        assert!(Cli::try_parse_from(["monospacifier", "--references", "a.ttf"]).is_err());
    }

    #[test]
    fn test_rename_needs_two_values() {
        let result = Cli::try_parse_from([
            "monospacifier",
            "--references",
            "a.ttf",
            "--inputs",
            "b.ttf",
            "--rename",
            "Foo",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_statistic_is_an_error() {
        let result = Cli::try_parse_from([
            "monospacifier",
            "--references",
            "a.ttf",
            "--inputs",
            "b.ttf",
            "--input-width",
            "mode",
        ]);
        assert!(result.is_err());
    }
}
