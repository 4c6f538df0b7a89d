//! Configuration constants for monospacifier output.

use monospacifier_font_ops::{NAME_ID_COPYRIGHT, NAME_ID_LICENSE, NAME_ID_LICENSE_URL};

/// Joins input and reference PostScript names of a monospacified font.
pub const MONOSPACIFIED_POSTSCRIPT_JOINER: &str = "_monospacified_for_";

/// Joins input and reference family / full names of a monospacified font.
pub const MONOSPACIFIED_NAME_JOINER: &str = " monospacified for ";

/// Joins reference and input PostScript names of a merged font.
pub const EXTENDED_POSTSCRIPT_JOINER: &str = "_extended_with_";

/// Joins reference and input family / full names of a merged font.
pub const EXTENDED_NAME_JOINER: &str = " extended with ";

/// Extension of every font written.
pub const OUTPUT_EXTENSION: &str = "ttf";

/// Name IDs copied from the source font when names are rewritten.
pub const KEEP_NAME_IDS: [u16; 3] = [NAME_ID_COPYRIGHT, NAME_ID_LICENSE, NAME_ID_LICENSE_URL];

/// Subfamily written when the source font has none.
pub const DEFAULT_SUBFAMILY: &str = "Regular";

/// Pattern removed from font names before they are combined.
pub const NAME_CLEANUP_PATTERN: &str = r"(?i)(.monospacified.for.*|-Regular|-Math)";

/// Appended to output paths in the markdown report.
pub const DEFAULT_LINK_SUFFIX: &str = "?raw=true";

/// Column headers of the markdown report.
pub const REPORT_HEADERS: [&str; 2] = ["Programming font", "Monospacified fallback fonts"];

/// Number of distinct widths logged after a font is scaled.
pub const HISTOGRAM_SIZE: usize = 10;
