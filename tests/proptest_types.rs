//! Property-based tests for the graph and diff invariants.

use cfn_tools::diff::{compare, ChangeType};
use cfn_tools::graph::{extract_references, sub_placeholders, Graph};
use cfn_tools::model::{Document, Mapping, Scalar};
use proptest::prelude::*;

fn scalar() -> impl Strategy<Value = Document> {
    prop_oneof![
        Just(Document::null()),
        any::<bool>().prop_map(Document::from),
        any::<i64>().prop_map(Document::from),
        (-1.0e6f64..1.0e6).prop_map(|f| Document::Scalar(Scalar::Float(f))),
        Just(Document::Scalar(Scalar::Float(f64::NAN))),
        "[a-zA-Z0-9 ]{0,12}".prop_map(Document::from),
    ]
}

fn document() -> impl Strategy<Value = Document> {
    scalar().prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Document::from),
            prop::collection::vec(("[a-z]{1,6}", inner), 0..6)
                .prop_map(|entries| Document::from(entries.into_iter().collect::<Mapping>())),
        ]
    })
}

/// Templates whose resources only depend on resources declared before them.
fn acyclic_template() -> impl Strategy<Value = Document> {
    prop::collection::vec(prop::collection::vec(any::<prop::sample::Index>(), 0..3), 1..8).prop_map(
        |deps| {
            let mut resources = Mapping::new();
            for (i, picks) in deps.iter().enumerate() {
                let mut body = Mapping::new();
                body.insert("Type".to_string(), Document::from("AWS::SNS::Topic"));
                if i > 0 {
                    let names: Vec<Document> = picks
                        .iter()
                        .map(|pick| Document::from(format!("R{}", pick.index(i))))
                        .collect();
                    body.insert("DependsOn".to_string(), Document::from(names));
                }
                resources.insert(format!("R{i}"), Document::from(body));
            }
            let mut template = Mapping::new();
            template.insert("Resources".to_string(), Document::from(resources));
            Document::from(template)
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn compare_with_self_is_unchanged(doc in document()) {
        let diff = compare(&doc, &doc);
        prop_assert!(diff.is_unchanged());
        prop_assert_eq!(diff.summary().total_changes(), 0);
    }

    #[test]
    fn aggregate_matches_leaves(old in document(), new in document()) {
        let diff = compare(&old, &new);
        let summary = diff.summary();

        prop_assert_eq!(diff.change_type() == ChangeType::Unchanged, !summary.has_changes());
        prop_assert_eq!(
            diff.change_type() == ChangeType::Added,
            summary.added > 0 && summary.removed == 0 && summary.changed == 0
        );
        prop_assert_eq!(
            diff.change_type() == ChangeType::Removed,
            summary.removed > 0 && summary.added == 0 && summary.changed == 0
        );
        prop_assert_eq!(old == new, diff.is_unchanged());
    }

    #[test]
    fn reference_extraction_is_deterministic(doc in document()) {
        prop_assert_eq!(extract_references(&doc), extract_references(&doc));
    }

    #[test]
    fn ordering_is_topological(template in acyclic_template()) {
        let graph = Graph::build(&template).unwrap();
        let ordered = graph.ordered_entities();
        prop_assert_eq!(ordered.len(), graph.len());

        for (from, to) in graph.edges() {
            let from_pos = ordered.iter().position(|e| *e == from).unwrap();
            let to_pos = ordered.iter().position(|e| *e == to).unwrap();
            prop_assert!(to_pos < from_pos, "{} must precede {}", to, from);
        }
    }

    #[test]
    fn escaped_sub_placeholders_are_literal(name in "[A-Za-z][A-Za-z0-9:.]{0,20}") {
        let template = format!("${{!{name}}}");
        prop_assert!(sub_placeholders(&template).is_empty());

        let mut sub = Mapping::new();
        sub.insert("Fn::Sub".to_string(), Document::from(template));
        prop_assert!(extract_references(&Document::from(sub)).is_empty());
    }
}
