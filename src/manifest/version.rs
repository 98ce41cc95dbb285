use std::cmp::Ordering;

/// Marker that turns an exact pin into a caret range.
pub const RANGE_MARKER: char = '^';

/// A version specifier as declared in a dependency group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionSpecifier {
    pub ranged: bool,
    /// Dot-separated components; `None` marks a component that is not a number.
    pub components: Vec<Option<u64>>,
}

impl VersionSpecifier {
    pub fn parse(specifier: &str) -> Self {
        let ranged = is_ranged(specifier);
        let digits = specifier.strip_prefix(RANGE_MARKER).unwrap_or(specifier);

        Self {
            ranged,
            components: digits.split('.').map(Self::parse_component).collect(),
        }
    }

    fn parse_component(part: &str) -> Option<u64> {
        let trimmed = part.trim();
        if trimmed.is_empty() {
            return Some(0);
        }
        match trimmed.parse::<u64>() {
            Ok(n) => Some(n),
            // Too many digits for u64: still a number, and larger than any that fits.
            Err(_) if trimmed.bytes().all(|b| b.is_ascii_digit()) => Some(u64::MAX),
            Err(_) => None,
        }
    }

    pub fn is_exact(&self) -> bool {
        !self.ranged
    }
}

/// Whether a specifier carries the range marker.
pub fn is_ranged(specifier: &str) -> bool {
    specifier.starts_with(RANGE_MARKER)
}

/// Outcome of comparing two specifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    FirstLarger,
    SecondLarger,
    /// Equal, or not orderable. Callers leave both sides untouched.
    Tie,
}

impl Verdict {
    fn from_ordering(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Greater => Verdict::FirstLarger,
            Ordering::Less => Verdict::SecondLarger,
            Ordering::Equal => Verdict::Tie,
        }
    }
}

pub struct VersionComparator;

impl VersionComparator {
    /// Decide which of two specifiers is larger.
    ///
    /// An exact pin always beats a range, whatever the digits say. Specifiers of the
    /// same kind are compared component by component; missing trailing components
    /// count as zero and components that are not numbers are skipped.
    pub fn compare(first: &str, second: &str) -> Verdict {
        let a = VersionSpecifier::parse(first);
        let b = VersionSpecifier::parse(second);

        match (a.is_exact(), b.is_exact()) {
            (true, false) => return Verdict::FirstLarger,
            (false, true) => return Verdict::SecondLarger,
            _ => {}
        }

        let len = a.components.len().max(b.components.len());
        for i in 0..len {
            let av = a.components.get(i).copied().unwrap_or(Some(0));
            let bv = b.components.get(i).copied().unwrap_or(Some(0));

            if let (Some(av), Some(bv)) = (av, bv) {
                match av.cmp(&bv) {
                    Ordering::Equal => continue,
                    other => return Verdict::from_ordering(other),
                }
            }
        }

        Verdict::Tie
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_beats_range_with_same_digits() {
        assert_eq!(
            VersionComparator::compare("^1.2.3", "1.2.3"),
            Verdict::SecondLarger
        );
        assert_eq!(
            VersionComparator::compare("1.2.3", "^1.2.3"),
            Verdict::FirstLarger
        );
    }

    #[test]
    fn test_exact_beats_range_with_higher_digits() {
        assert_eq!(
            VersionComparator::compare("^9.0.0", "1.0.0"),
            Verdict::SecondLarger
        );
        assert_eq!(
            VersionComparator::compare("0.0.1", "^5.0.0"),
            Verdict::FirstLarger
        );
    }

    #[test]
    fn test_same_kind_ordering() {
        assert_eq!(
            VersionComparator::compare("^2.1.0", "^2.0.9"),
            Verdict::FirstLarger
        );
        assert_eq!(
            VersionComparator::compare("^2.0.9", "^2.1.0"),
            Verdict::SecondLarger
        );
        assert_eq!(
            VersionComparator::compare("3.0.0", "2.99.99"),
            Verdict::FirstLarger
        );
    }

    #[test]
    fn test_equal_is_tie() {
        assert_eq!(VersionComparator::compare("^1.0.0", "^1.0.0"), Verdict::Tie);
        assert_eq!(VersionComparator::compare("4.2.0", "4.2.0"), Verdict::Tie);
    }

    #[test]
    fn test_missing_components_count_as_zero() {
        assert_eq!(VersionComparator::compare("^1.0.0", "^1"), Verdict::Tie);
        assert_eq!(
            VersionComparator::compare("^1.0.1", "^1"),
            Verdict::FirstLarger
        );
        assert_eq!(
            VersionComparator::compare("^1", "^1.0.1"),
            Verdict::SecondLarger
        );
    }

    #[test]
    fn test_malformed_components_are_skipped() {
        assert_eq!(VersionComparator::compare("latest", "next"), Verdict::Tie);
        assert_eq!(
            VersionComparator::compare("^1.x.3", "^1.0.2"),
            Verdict::FirstLarger
        );
        assert_eq!(
            VersionComparator::compare("^1.0.0-beta", "^1.0.0"),
            Verdict::Tie
        );
    }

    #[test]
    fn test_oversized_components_saturate() {
        assert_eq!(
            VersionComparator::compare("^1.2.99999999999999999999", "^1.2.3"),
            Verdict::FirstLarger
        );
        assert_eq!(
            VersionComparator::compare("1.2.3", "1.2.99999999999999999999"),
            Verdict::SecondLarger
        );
        assert_eq!(
            VersionSpecifier::parse("^1.99999999999999999999").components,
            vec![Some(1), Some(u64::MAX)]
        );
    }

    #[test]
    fn test_parse_specifier() {
        let spec = VersionSpecifier::parse("^1.4.2");
        assert!(spec.ranged);
        assert_eq!(spec.components, vec![Some(1), Some(4), Some(2)]);

        let exact = VersionSpecifier::parse("3.0.x");
        assert!(exact.is_exact());
        assert_eq!(exact.components, vec![Some(3), Some(0), None]);
    }
}
