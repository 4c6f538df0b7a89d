//! The batch pipeline: every input font against every reference font.

use std::{
    path::{Path, PathBuf},
    slice,
};

use log::{error, info};
use thiserror::Error;

use crate::{
    Error, Result,
    font::Font,
    font_scaler::FontScaler,
    naming::{OutputNames, RenameRule},
    scaler::{GlyphScaler, StretchingGlyphScaler},
    stats::WidthStatistic,
};

/// Settings of a [`process_fonts`] run.
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    /// Directory all fonts are written to.
    pub save_to: PathBuf,
    /// Also write the reference font extended with each monospacified font.
    pub merge: bool,
    /// Copy the reference's vertical metrics into each monospacified font.
    pub copy_metrics: bool,
    pub renames: Vec<RenameRule>,
    /// How an input font's source width is measured.
    pub input_width: WidthStatistic,
    /// How a reference font's cell width is measured.
    pub reference_width: WidthStatistic,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            save_to: PathBuf::from("."),
            merge: false,
            copy_metrics: false,
            renames: Vec::new(),
            input_width: WidthStatistic::Average,
            reference_width: WidthStatistic::MostCommon,
        }
    }
}

/// One font written by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    /// Family name of the reference font.
    pub reference_name: String,
    /// Family name of the input font.
    pub input_name: String,
    pub output_path: PathBuf,
}

/// A reference font, or one reference/input pair, that could not be processed.
#[derive(Debug, Error)]
#[error("{}: {error}", pair_label(reference, input))]
pub struct PairFailure {
    pub reference: PathBuf,
    /// `None` when the reference font itself failed.
    pub input: Option<PathBuf>,
    #[source]
    pub error: Error,
}

fn pair_label(reference: &Path, input: &Option<PathBuf>) -> String {
    match input {
        Some(input) => format!("{} + {}", reference.display(), input.display()),
        None => reference.display().to_string(),
    }
}

/// Write `fallback` stretched to the reference's cell width into `save_to`.
///
/// The font takes the reference's em size, loses every name record except its
/// legal strings, and is named after both fonts. Returns the written path.
pub fn make_monospace(
    reference: &Font,
    fallback: &Font,
    scaler: &impl GlyphScaler,
    save_to: &Path,
    copy_metrics: bool,
    renames: &[RenameRule],
) -> Result<PathBuf> {
    let names = OutputNames::monospacified(fallback, reference, renames);
    let destination = save_to.join(names.file_name());

    let mut font = FontScaler::from_font(fallback);
    font.rename(&names)?;
    font.set_units_per_em(reference.units_per_em())?;
    font.scale_glyphs(scaler)?;
    if copy_metrics {
        font.copy_metrics(reference)?;
    }
    font.write(&destination)?;

    info!("Wrote {}", destination.display());
    Ok(destination)
}

/// Write `reference` extended with the glyphs it lacks from `fallback`.
///
/// Returns the written path.
pub fn merge_fonts(
    reference: &Font,
    fallback: &Font,
    save_to: &Path,
    renames: &[RenameRule],
) -> Result<PathBuf> {
    let names = OutputNames::extended(reference, fallback, renames);
    let destination = save_to.join(names.file_name());

    let mut font = FontScaler::from_font(reference);
    font.rename(&names)?;
    font.merge_glyphs_from(fallback)?;
    font.write(&destination)?;

    info!("Wrote {}", destination.display());
    Ok(destination)
}

/// Monospacify every input for every reference.
///
/// Pairs are processed one at a time as the returned iterator is advanced. A
/// failing pair yields a [`PairFailure`] and processing moves on to the next
/// pair; a reference that cannot be opened yields one failure and its inputs
/// are skipped.
pub fn process_fonts<'a>(
    references: &'a [PathBuf],
    inputs: &'a [PathBuf],
    options: &'a ProcessOptions,
) -> ProcessFonts<'a> {
    ProcessFonts { references: references.iter(), inputs, options, current: None }
}

struct CurrentReference {
    font: Font,
    cell_width: u32,
    next_input: usize,
}

/// Iterator returned by [`process_fonts`].
pub struct ProcessFonts<'a> {
    references: slice::Iter<'a, PathBuf>,
    inputs: &'a [PathBuf],
    options: &'a ProcessOptions,
    current: Option<CurrentReference>,
}

impl ProcessFonts<'_> {
    fn open_reference(&self, path: &Path) -> Result<CurrentReference> {
        let font = Font::open(path)?;
        let cell_width = font.width(self.options.reference_width, None)?;
        info!("For reference font {} (cell width {cell_width}):", font.family_name());
        Ok(CurrentReference { font, cell_width, next_input: 0 })
    }

    fn process_pair(&self, reference: &CurrentReference, input: &Path) -> Result<ResultRecord> {
        let options = self.options;
        let fallback = Font::open(input)?;
        info!("- Monospacifying {}", fallback.family_name());

        let source_width =
            fallback.width(options.input_width, Some(reference.font.units_per_em()))?;
        let scaler = StretchingGlyphScaler::new(reference.cell_width, source_width)?;

        let mut output_path = make_monospace(
            &reference.font,
            &fallback,
            &scaler,
            &options.save_to,
            options.copy_metrics,
            &options.renames,
        )?;

        if options.merge {
            let monospacified = Font::open(&output_path)?;
            info!("- Merging with {}", monospacified.family_name());
            output_path =
                merge_fonts(&reference.font, &monospacified, &options.save_to, &options.renames)?;
        }

        Ok(ResultRecord {
            reference_name: reference.font.family_name().to_string(),
            input_name: fallback.family_name().to_string(),
            output_path,
        })
    }
}

impl Iterator for ProcessFonts<'_> {
    type Item = std::result::Result<ResultRecord, PairFailure>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let inputs = self.inputs;
            if let Some(reference) = self.current.take() {
                if let Some(input) = inputs.get(reference.next_input) {
                    let result = self.process_pair(&reference, input).map_err(|error| {
                        let failure = PairFailure {
                            reference: reference.font.path().to_path_buf(),
                            input: Some(input.clone()),
                            error,
                        };
                        error!("{failure}");
                        failure
                    });
                    self.current =
                        Some(CurrentReference { next_input: reference.next_input + 1, ..reference });
                    return Some(result);
                }
                continue;
            }

            let path = self.references.next()?;
            match self.open_reference(path) {
                Ok(reference) => self.current = Some(reference),
                Err(error) => {
                    let failure = PairFailure { reference: path.clone(), input: None, error };
                    error!("{failure}");
                    return Some(Err(failure));
                }
            }
        }
    }
}
