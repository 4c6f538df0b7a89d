//! post table merging

use read_fonts::{FontRef, TableProvider};
use write_fonts::tables::post::Post;

use crate::{MergeError, Result};

/// A version 3.0 post table carrying the base font's values.
///
/// Glyph names are not kept: the donor's glyph names may clash with the base's.
pub fn merge_post(base: &FontRef) -> Result<Post> {
    let post = base.post().map_err(|_| MergeError::MissingTable("post"))?;
    let mut new_post = Post::new(
        post.italic_angle(),
        post.underline_position(),
        post.underline_thickness(),
        post.is_fixed_pitch(),
        post.min_mem_type42(),
        post.max_mem_type42(),
        post.min_mem_type1(),
        post.max_mem_type1(),
    );
    new_post.version = font_types::Version16Dot16::VERSION_3_0;
    Ok(new_post)
}
