//! Output font names.

use std::sync::OnceLock;

use regex::Regex;

use crate::{
    config::{
        EXTENDED_NAME_JOINER, EXTENDED_POSTSCRIPT_JOINER, MONOSPACIFIED_NAME_JOINER,
        MONOSPACIFIED_POSTSCRIPT_JOINER, NAME_CLEANUP_PATTERN, OUTPUT_EXTENSION,
    },
    font::Font,
};

/// A literal substring replacement applied to cleaned-up names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameRule {
    pub from: String,
    pub to: String,
}

impl RenameRule {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self { from: from.into(), to: to.into() }
    }

    pub fn apply(&self, name: &str) -> String {
        if self.from.is_empty() { name.to_string() } else { name.replace(&self.from, &self.to) }
    }
}

/// Strip style and provenance suffixes from `name`, then apply `renames` in order.
pub fn cleanup_font_name(name: &str, renames: &[RenameRule]) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(NAME_CLEANUP_PATTERN).expect("name cleanup pattern is valid")
    });

    let cleaned = re.replace_all(name, "").into_owned();
    renames.iter().fold(cleaned, |name, rule| rule.apply(&name))
}

/// Names given to a font written by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputNames {
    pub postscript_name: String,
    pub family_name: String,
    pub full_name: String,
}

impl OutputNames {
    /// Names of `fallback` stretched to the cell width of `reference`.
    pub fn monospacified(fallback: &Font, reference: &Font, renames: &[RenameRule]) -> Self {
        Self::combine(
            fallback,
            reference,
            MONOSPACIFIED_POSTSCRIPT_JOINER,
            MONOSPACIFIED_NAME_JOINER,
            renames,
        )
    }

    /// Names of `reference` extended with the glyphs of `fallback`.
    pub fn extended(reference: &Font, fallback: &Font, renames: &[RenameRule]) -> Self {
        Self::combine(reference, fallback, EXTENDED_POSTSCRIPT_JOINER, EXTENDED_NAME_JOINER, renames)
    }

    fn combine(
        first: &Font,
        second: &Font,
        postscript_joiner: &str,
        name_joiner: &str,
        renames: &[RenameRule],
    ) -> Self {
        let clean = |name: &str| cleanup_font_name(name, renames);
        Self {
            postscript_name: format!(
                "{}{postscript_joiner}{}",
                clean(first.postscript_name()),
                clean(second.postscript_name())
            ),
            family_name: format!(
                "{}{name_joiner}{}",
                clean(first.family_name()),
                clean(second.family_name())
            ),
            full_name: format!(
                "{}{name_joiner}{}",
                clean(first.full_name()),
                clean(second.full_name())
            ),
        }
    }

    /// File name the font is saved under.
    pub fn file_name(&self) -> String {
        format!("{}.{OUTPUT_EXTENSION}", self.postscript_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleanup_strips_suffixes() {
        assert_eq!(cleanup_font_name("Foo-Regular.monospacified.for.Bar-Math", &[]), "Foo");
        assert_eq!(cleanup_font_name("Symbola-Regular", &[]), "Symbola");
        assert_eq!(cleanup_font_name("STIXGeneral-Math", &[]), "STIXGeneral");
        assert_eq!(cleanup_font_name("Symbola monospacified for Ubuntu Mono", &[]), "Symbola");
        assert_eq!(cleanup_font_name("Symbola_monospacified_for_UbuntuMono", &[]), "Symbola");
    }

    #[test]
    fn test_cleanup_applies_renames_in_order() {
        let renames = [RenameRule::new("Foo", "Baz")];
        assert_eq!(cleanup_font_name("FooBar", &renames), "BazBar");

        let renames = [RenameRule::new("A", "B"), RenameRule::new("B", "C")];
        assert_eq!(cleanup_font_name("A", &renames), "C");
    }

    #[test]
    fn test_cleanup_is_idempotent() {
        for name in ["DejaVu Sans Mono", "Foo-Regular.monospacified.for.Bar", "XITS-Math", ""] {
            let once = cleanup_font_name(name, &[]);
            assert_eq!(cleanup_font_name(&once, &[]), once);
        }
    }

    #[test]
    fn test_empty_rename_is_ignored() {
        assert_eq!(RenameRule::new("", "x").apply("abc"), "abc");
    }
}
