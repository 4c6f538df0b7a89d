//! maxp table merging

use read_fonts::{FontRef, TableProvider};
use write_fonts::tables::maxp::Maxp;

use crate::{MergeError, Result};

/// Merged maxp: the larger of each limit, except hinting storage which
/// follows the base font (donor instructions are stripped).
pub fn merge_maxp(base: &FontRef, donor: &FontRef, total_glyphs: u16) -> Result<Maxp> {
    let base_maxp = base.maxp().map_err(|_| MergeError::MissingTable("maxp"))?;
    let donor_maxp = donor.maxp().map_err(|_| MergeError::MissingTable("maxp"))?;

    let max = |a: Option<u16>, b: Option<u16>| Some(a.unwrap_or(0).max(b.unwrap_or(0)));

    Ok(Maxp {
        num_glyphs: total_glyphs,
        max_points: max(base_maxp.max_points(), donor_maxp.max_points()),
        max_contours: max(base_maxp.max_contours(), donor_maxp.max_contours()),
        max_composite_points: max(
            base_maxp.max_composite_points(),
            donor_maxp.max_composite_points(),
        ),
        max_composite_contours: max(
            base_maxp.max_composite_contours(),
            donor_maxp.max_composite_contours(),
        ),
        max_zones: Some(base_maxp.max_zones().unwrap_or(1)),
        max_twilight_points: base_maxp.max_twilight_points(),
        max_storage: base_maxp.max_storage(),
        max_function_defs: base_maxp.max_function_defs(),
        max_instruction_defs: base_maxp.max_instruction_defs(),
        max_stack_elements: base_maxp.max_stack_elements(),
        max_size_of_instructions: base_maxp.max_size_of_instructions(),
        max_component_elements: max(
            base_maxp.max_component_elements(),
            donor_maxp.max_component_elements(),
        ),
        max_component_depth: max(
            base_maxp.max_component_depth(),
            donor_maxp.max_component_depth(),
        ),
    })
}
