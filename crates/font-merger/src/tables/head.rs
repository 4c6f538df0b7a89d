//! head table merging

use read_fonts::{FontRef, TableProvider};
use write_fonts::{
    from_obj::ToOwnedTable,
    tables::{head::Head, loca::LocaFormat},
};

use crate::{MergeError, Result};

/// The base font's head, with the bounding box extended by the donor's.
pub fn merge_head(base: &FontRef, donor: &FontRef, loca_format: LocaFormat) -> Result<Head> {
    let base_head = base.head().map_err(|_| MergeError::MissingTable("head"))?;
    let donor_head = donor.head().map_err(|_| MergeError::MissingTable("head"))?;

    let mut head: Head = base_head.to_owned_table();
    head.x_min = base_head.x_min().min(donor_head.x_min());
    head.y_min = base_head.y_min().min(donor_head.y_min());
    head.x_max = base_head.x_max().max(donor_head.x_max());
    head.y_max = base_head.y_max().max(donor_head.y_max());
    head.index_to_loc_format = match loca_format {
        LocaFormat::Short => 0,
        LocaFormat::Long => 1,
    };

    Ok(head)
}
