use crate::counts::Restrictions;
use crate::models::{ConflictReport, CountGroups};

/// Find tracks contributing to more than one restriction.
///
/// A title counted twice inside one violation group means the same track fed
/// that group's count more than once; every occurrence after the first is
/// collected under the group's key. Entries from different collections that
/// share a key string are merged under that key. The result is a
/// manual-review flag only and never blocks report generation.
pub fn find_conflicts(restrictions: &Restrictions) -> ConflictReport {
    let mut report = ConflictReport::new();
    for collection in [
        &restrictions.artist_totals,
        &restrictions.album_totals,
        &restrictions.artist_runs,
        &restrictions.album_runs,
    ] {
        collect_repeats(collection, &mut report);
    }
    report
}

fn collect_repeats(collection: &CountGroups, report: &mut ConflictReport) {
    for group in collection.iter() {
        let mut seen: Vec<&str> = Vec::new();
        for title in &group.tracks {
            if seen.contains(&title.as_str()) {
                report.add(&group.key, title.clone());
            } else {
                seen.push(title);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups(entries: &[(&str, &[&str])]) -> CountGroups {
        let mut groups = CountGroups::new();
        for (key, tracks) in entries {
            let tracks: Vec<String> = tracks.iter().map(|t| t.to_string()).collect();
            groups.insert(key.to_string(), tracks.len(), tracks);
        }
        groups
    }

    #[test]
    fn duplicate_title_within_a_group_is_reported() {
        let restrictions = Restrictions {
            artist_totals: groups(&[("Hank", &["T1", "T2", "T1", "T3", "T1"])]),
            ..Default::default()
        };
        let report = find_conflicts(&restrictions);
        let (key, titles) = report.iter().next().unwrap();
        assert_eq!(key, "Hank");
        // every occurrence after the first
        assert_eq!(titles, ["T1", "T1"]);
    }

    #[test]
    fn unique_titles_produce_no_conflicts() {
        let restrictions = Restrictions {
            artist_totals: groups(&[("Hank", &["T1", "T2", "T3", "T4", "T5"])]),
            album_runs: groups(&[("Greatest", &["A", "B", "C"])]),
            ..Default::default()
        };
        assert!(find_conflicts(&restrictions).is_empty());
    }

    #[test]
    fn shared_key_across_collections_merges_into_one_entry() {
        // one string acting as artist in one collection, album in another
        let restrictions = Restrictions {
            artist_totals: groups(&[("Nilsson", &["One", "Two", "One", "Three", "Four"])]),
            album_totals: groups(&[("Nilsson", &["Coconut", "Coconut", "Five", "Six"])]),
            ..Default::default()
        };
        let report = find_conflicts(&restrictions);
        assert_eq!(report.iter().count(), 1);
        let (_, titles) = report.iter().next().unwrap();
        assert_eq!(titles, ["One", "Coconut"]);
    }

    #[test]
    fn empty_restrictions_yield_empty_report() {
        assert!(find_conflicts(&Restrictions::default()).is_empty());
    }
}
