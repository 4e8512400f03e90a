use super::domain::{JobRecord, SortMode};
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Reorders `visible` (positions into `records`) in place for `mode`.
///
/// Salary and company orderings are stable: equal keys keep the order they
/// had before the call.
pub fn sort_visible(records: &[JobRecord], visible: &mut [usize], mode: SortMode) {
    match mode {
        // No posting date exists, so "newest" flips whatever is on screen.
        SortMode::Newest => visible.reverse(),
        SortMode::Oldest => visible.sort_by_key(|&idx| records[idx].original_index),
        SortMode::Salary => {
            visible.sort_by(|&a, &b| records[b].salary_floor().cmp(&records[a].salary_floor()))
        }
        SortMode::Company => {
            visible.sort_by(|&a, &b| compare_names(&records[a].company, &records[b].company))
        }
    }
}

/// Dictionary-style comparison. Names compare on their base letters first,
/// ignoring case and accents, so "École" files under E. Names equal on base
/// letters put the unaccented spelling first, then lowercase before uppercase.
pub fn compare_names(left: &str, right: &str) -> Ordering {
    base_letters(left)
        .cmp(base_letters(right))
        .then_with(|| folded(left).cmp(folded(right)))
        .then_with(|| {
            left.nfd()
                .zip(right.nfd())
                .find(|(l, r)| l != r)
                .map_or(Ordering::Equal, |(l, r)| {
                    l.is_uppercase().cmp(&r.is_uppercase())
                })
        })
}

fn base_letters(name: &str) -> impl Iterator<Item = char> + '_ {
    name.nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .flat_map(char::to_lowercase)
}

// Decomposed and lowercased, marks kept: "ecole" < "école".
fn folded(name: &str) -> impl Iterator<Item = char> + '_ {
    name.nfd().flat_map(char::to_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_compare_without_regard_to_case() {
        assert_eq!(compare_names("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_names("Zeta", "alpha"), Ordering::Greater);
        assert_eq!(compare_names("DataFlow", "DataFlow"), Ordering::Equal);
    }

    #[test]
    fn lowercase_precedes_uppercase_on_case_only_differences() {
        assert_eq!(compare_names("acme", "Acme"), Ordering::Less);
        assert_eq!(compare_names("Acme", "acme"), Ordering::Greater);
    }

    #[test]
    fn shorter_prefix_sorts_first() {
        assert_eq!(compare_names("Tech", "TechCorp"), Ordering::Less);
    }

    #[test]
    fn accented_initials_file_under_their_base_letter() {
        assert_eq!(compare_names("École Tech", "Zeta Labs"), Ordering::Less);
        assert_eq!(compare_names("École Tech", "Beta"), Ordering::Greater);
        assert_eq!(compare_names("Ørsted", "Pixel"), Ordering::Greater);
        assert_eq!(compare_names("Müller", "Mueller"), Ordering::Greater);
    }

    #[test]
    fn unaccented_spelling_precedes_accented_one() {
        assert_eq!(compare_names("ecole", "école"), Ordering::Less);
        assert_eq!(compare_names("École", "école"), Ordering::Greater);
    }
}
