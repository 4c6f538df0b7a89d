//! hhea table merging

use read_fonts::{FontRef, TableProvider};
use write_fonts::{from_obj::ToOwnedTable, tables::hhea::Hhea};

use crate::{MergeError, Result};

/// The base font's hhea, widened to cover the donor's extents.
///
/// Vertical metrics always come from the base font.
pub fn merge_hhea(base: &FontRef, donor: &FontRef, num_h_metrics: u16) -> Result<Hhea> {
    let base_hhea = base.hhea().map_err(|_| MergeError::MissingTable("hhea"))?;
    let donor_hhea = donor.hhea().map_err(|_| MergeError::MissingTable("hhea"))?;

    let mut hhea: Hhea = base_hhea.to_owned_table();
    hhea.advance_width_max = font_types::UfWord::new(
        base_hhea.advance_width_max().to_u16().max(donor_hhea.advance_width_max().to_u16()),
    );
    hhea.min_left_side_bearing = font_types::FWord::new(
        base_hhea.min_left_side_bearing().to_i16().min(donor_hhea.min_left_side_bearing().to_i16()),
    );
    hhea.min_right_side_bearing = font_types::FWord::new(
        base_hhea
            .min_right_side_bearing()
            .to_i16()
            .min(donor_hhea.min_right_side_bearing().to_i16()),
    );
    hhea.x_max_extent = font_types::FWord::new(
        base_hhea.x_max_extent().to_i16().max(donor_hhea.x_max_extent().to_i16()),
    );
    hhea.number_of_h_metrics = num_h_metrics;

    Ok(hhea)
}
