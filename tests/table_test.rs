mod common;

use assert2::check;
use common::{all_table, functions_table, read_fixture};
use doxy_search::{
    EmptyQueryPolicy, IndexEntry, MalformedIndexError, QueryOptions, SearchIndexTable, Target,
};
use rstest::rstest;

fn labels<'a>(entries: impl IntoIterator<Item = &'a IndexEntry>) -> Vec<&'a str> {
    entries.into_iter().map(|e| e.label.as_str()).collect()
}

fn two_entry_table() -> SearchIndexTable {
    SearchIndexTable::from_entries(
        vec![
            IndexEntry::new(
                "Feature",
                vec![Target::page("classvara_1_1feature_1_1Feature.html")],
            ),
            IndexEntry::new(
                "FeatureModel",
                vec![Target::page("classvara_1_1feature_1_1FeatureModel.html")],
            ),
        ],
        QueryOptions::default(),
    )
    .unwrap()
}

// --- Loading ---

/// Test: Every loaded entry satisfies the label/target invariants.
#[rstest]
fn loaded_entries_have_labels_and_targets(all_table: SearchIndexTable) {
    check!(all_table.len() == 9);
    check!(all_table.target_count() == 16);
    for entry in all_table.entries() {
        check!(!entry.label.is_empty());
        check!(!entry.targets.is_empty(), "{} has no targets", entry.label);
    }
}

/// Test: Targets keep their generated order.
#[rstest]
fn targets_keep_generated_order(all_table: SearchIndexTable) {
    let feature = &all_table.entries()[0];
    check!(feature.label == "Feature");
    check!(feature.targets.len() == 5);

    check!(feature.targets[0].page_reference == "classvara_1_1feature_1_1Feature.html");
    check!(feature.targets[0].anchor_id.is_none());
    check!(feature.targets[0].description.as_deref() == Some("vara::feature::Feature"));

    check!(feature.targets[1].anchor_id.as_deref() == Some("a6183f9010934775da88eb302ddced566"));
    check!(
        feature.targets[1].description.as_deref()
            == Some("vara::feature::Feature::Feature(std::string Name)")
    );
    check!(
        feature.targets[2].description.as_deref()
            == Some("vara::feature::Feature::Feature(const Feature &)=delete")
    );
}

/// Test: File entries have no description; escaped scopes are decoded.
#[rstest]
fn descriptions_are_normalized(all_table: SearchIndexTable) {
    let header = all_table.find_exact("Feature.h").next().unwrap();
    check!(header.targets[0].page_reference == "Feature_8h.html");
    check!(header.targets[0].description.is_none());

    let edge_set = all_table.find_exact("FeatureEdgeSetTy").next().unwrap();
    check!(
        edge_set.targets[0].description.as_deref()
            == Some("llvm::GraphWriter< vara::feature::FeatureModel * >")
    );
}

/// Test: Non-breaking space entities in descriptions are decoded.
#[rstest]
fn numeric_entities_decoded(functions_table: SearchIndexTable) {
    let set = functions_table.find_exact("set").next().unwrap();
    check!(set.targets.len() == 4);
    let description = set.targets[0].description.as_deref().unwrap();
    check!(description.ends_with("$:\u{a0}CMakeLists.txt"));
}

/// Test: A record without targets aborts the whole load.
#[test]
fn empty_targets_rejected() {
    let raw = "var searchData=[['feature_119',['Feature',['../a.html',1,'']]],['featuremodel_128',['FeatureModel']]];";
    let err = SearchIndexTable::load(raw).unwrap_err();
    check!(
        err == MalformedIndexError::EmptyTargets {
            record: 1,
            label: "FeatureModel".to_string()
        }
    );
}

#[rstest]
#[case("[['k',['',['../a.html',1,'']]]]")]
#[case("[['k',[]]]")]
fn missing_label_rejected(#[case] raw: &str) {
    check!(SearchIndexTable::load(raw).unwrap_err() == MalformedIndexError::MissingLabel { record: 0 });
}

/// Test: A truncated file reports a syntax error instead of a partial table.
#[test]
fn truncated_file_rejected() {
    let raw = read_fixture("all_5.js");
    let truncated = &raw[..raw.len() / 2];
    check!(matches!(
        SearchIndexTable::load(truncated),
        Err(MalformedIndexError::Syntax { .. })
    ));
}

#[test]
fn empty_array_loads_empty_table() {
    let table = SearchIndexTable::load("var searchData=\n[\n];\n").unwrap();
    check!(table.is_empty());
    check!(table.query("").to_vec().is_empty());
}

// --- Querying ---

/// Test: The two-entry example from the data model.
#[test]
fn feature_and_feature_model_example() {
    let table = two_entry_table();
    check!(labels(&table.query("feature")) == ["Feature", "FeatureModel"]);
    check!(labels(&table.query("Model")) == ["FeatureModel"]);
}

/// Test: An empty query returns the full table in original order.
#[rstest]
fn empty_query_returns_everything(all_table: SearchIndexTable) {
    let all: Vec<_> = all_table.entries().iter().collect();
    check!(all_table.query("").to_vec() == all);
}

/// Test: The empty-query policy can be switched off.
#[rstest]
fn empty_query_policy_nothing(all_table: SearchIndexTable) {
    let table = all_table.with_options(QueryOptions {
        empty_query: EmptyQueryPolicy::Nothing,
        ..QueryOptions::default()
    });
    check!(table.query("").to_vec().is_empty());
    check!(table.query("map").to_vec().len() == 2);
}

#[rstest]
#[case("FEATURE", "feature")]
#[case("MapTy", "mapty")]
#[case("Feature.CPP", "feature.cpp")]
fn query_ignores_case(all_table: SearchIndexTable, #[case] upper: &str, #[case] lower: &str) {
    check!(all_table.query(upper).to_vec() == all_table.query(lower).to_vec());
}

#[rstest]
#[case("feature", 9)]
#[case("map", 2)]
#[case(".h", 1)]
#[case("_tree", 1)]
#[case("model", 0)]
fn substring_match_counts(
    all_table: SearchIndexTable,
    #[case] text: &str,
    #[case] expected: usize,
) {
    check!(all_table.query(text).to_vec().len() == expected);
}

/// Test: Prefix queries only match label starts.
#[rstest]
fn prefix_queries(functions_table: SearchIndexTable) {
    check!(labels(&functions_table.query_prefix("setcom")) == ["setCommit", "setCommitImpl"]);
    check!(functions_table.query_prefix("commit").to_vec().is_empty());
    check!(labels(&functions_table.query("commit")) == ["setCommit", "setCommitImpl"]);
}

/// Test: Querying an entry's exact label finds that entry.
#[rstest]
fn exact_label_query_finds_entry(all_table: SearchIndexTable) {
    for entry in all_table.entries() {
        let found = all_table.query(&entry.label).to_vec();
        check!(found.contains(&entry), "{} not found by its own label", entry.label);
    }
}

/// Test: A query can be iterated repeatedly.
#[rstest]
fn query_can_be_restarted(all_table: SearchIndexTable) {
    let query = all_table.query("featuremap");
    let first: Vec<_> = query.iter().collect();
    let second: Vec<_> = (&query).into_iter().collect();
    check!(first == second);
    check!(labels(first) == ["FeatureMapIterator", "FeatureMapTy"]);
}

/// Test: Suggestions for a misspelled label.
#[rstest]
fn suggestions_for_typo(functions_table: SearchIndexTable) {
    check!(functions_table.query("setCategroy").to_vec().is_empty());
    let suggestions = functions_table.suggest("setCategroy", 3);
    check!(!suggestions.is_empty());
    check!(suggestions[0].label == "setCategory");
}

/// Test: Readers on several threads see the same results.
#[rstest]
fn concurrent_readers(all_table: SearchIndexTable) {
    let expected = labels(&all_table.query("feature"));
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| labels(&all_table.query("FEATURE"))))
            .collect();
        for handle in handles {
            check!(handle.join().unwrap() == expected);
        }
    });
}

// --- Complete generated shards ---

/// Test: Unabridged generator output loads with every record intact.
#[rstest]
#[case("all_5.js", 46, 96)]
#[case("functions_f.js", 26, 48)]
fn complete_shards_load(#[case] name: &str, #[case] entries: usize, #[case] targets: usize) {
    let raw = std::fs::read_to_string(common::project_root().join("tests/fixtures/full").join(name))
        .unwrap();
    let table = SearchIndexTable::load(&raw).unwrap();
    check!(table.len() == entries);
    check!(table.target_count() == targets);
    for entry in table.entries() {
        check!(!entry.label.is_empty());
        check!(!entry.targets.is_empty(), "{} has no targets", entry.label);
    }
}

/// Test: Queries over a complete shard, including an entity-escaped label.
#[test]
fn complete_shard_queries() {
    let raw = std::fs::read_to_string(common::project_root().join("tests/fixtures/full/all_5.js"))
        .unwrap();
    let table = SearchIndexTable::load(&raw).unwrap();

    check!(labels(&table.query_prefix("fk_")) == ["FK_BINARY", "FK_NUMERIC", "FK_ROOT", "FK_UNKNOWN"]);
    check!(
        labels(&table.query("TreeNode"))
            == ["FeatureTreeNode", "FeatureTreeNode.h", "FeatureTreeNodeVariantTy"]
    );
    check!(
        table
            .find_exact("FeatureModelTransaction< vara::feature::detail::ModifyTransactionMode >")
            .count()
            == 1
    );
}
