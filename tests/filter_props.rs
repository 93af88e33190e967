use godepgraph::filter::{FilterConfig, FilterEngine};
use godepgraph::graph::{normalize_vendor, Package};
use godepgraph::rewrite::{PrefixRules, RewriteConfig, Rewriter};
use proptest::prelude::*;

fn pkg(path: &str) -> Package {
    Package { import_path: path.to_string(), ..Package::default() }
}

proptest! {
    // Anything starting with an excluded prefix is hidden, whatever follows it
    #[test]
    fn excluded_prefix_hides_every_extension(prefix in "[a-z./]{1,12}", rest in "[a-z./]{0,12}") {
        let f = FilterEngine::new(FilterConfig {
            ignored_prefixes: vec![prefix.clone()],
            ..FilterConfig::default()
        });
        let path = format!("{prefix}{rest}");
        prop_assert!(!f.is_visible(&pkg(&path)));
    }

    // With an allow-list, visibility implies a matching allow-list entry
    #[test]
    fn allow_list_is_necessary(only in "[a-z]{1,4}", path in "[a-z]{1,8}") {
        let f = FilterEngine::new(FilterConfig {
            only_prefixes: vec![only.clone()],
            ..FilterConfig::default()
        });
        prop_assert_eq!(f.is_visible(&pkg(&path)), path.starts_with(&only));
    }

    // The chosen rewrite rule is a prefix of the input and no longer rule also matches
    #[test]
    fn longest_match_is_maximal(
        rules in proptest::collection::vec(("[ab/]{0,4}", "[xy]{0,3}"), 0..6),
        input in "[ab/]{0,8}",
    ) {
        let table: PrefixRules = rules.iter().map(|(p, r)| (p.as_str(), r.as_str())).collect();
        match table.longest_match(&input) {
            Some((prefix, _)) => {
                prop_assert!(input.starts_with(prefix));
                for (p, _) in &rules {
                    prop_assert!(!(input.starts_with(p.as_str()) && p.len() > prefix.len()));
                }
            }
            None => prop_assert!(rules.iter().all(|(p, _)| !input.starts_with(p.as_str()))),
        }
    }

    // Without rules, names pass through untouched
    #[test]
    fn no_rules_is_identity(input in ".*") {
        prop_assert_eq!(Rewriter::new(RewriteConfig::default()).rewrite_name(&input), input);
    }

    // Normalizing a vendored path is idempotent and never yields a vendor segment
    #[test]
    fn normalize_vendor_is_idempotent(head in "[a-z/]{0,10}", tail in "[a-z]{1,5}(/[a-z]{1,5}){0,2}") {
        let vendored = format!("{head}vendor/{tail}");
        let once = normalize_vendor(&vendored);
        prop_assert_eq!(once, tail.as_str());
        prop_assert_eq!(normalize_vendor(once), once);
    }
}
