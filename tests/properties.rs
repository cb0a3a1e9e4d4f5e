//! Property tests for table equality and diffing.

use dbcompare::prelude::*;
use proptest::prelude::*;
use proptest::sample::subsequence;

const TYPES: &[&str] = &["int", "bigint", "varchar", "nvarchar", "bit", "decimal", "datetime2"];
const SCHEMAS: &[&str] = &["dbo", "sales"];

fn column_strategy(name: String) -> impl Strategy<Value = Column> {
    (
        proptest::sample::select(TYPES),
        -1i32..=8000,
        0i32..=38,
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(move |(data_type, max_length, precision, nullable, identity)| Column {
            name: name.clone(),
            data_type: data_type.to_string(),
            system_type: data_type.to_string(),
            max_length,
            precision,
            nullable,
            identity,
        })
}

fn columns_strategy() -> impl Strategy<Value = Vec<Column>> {
    proptest::collection::btree_set("[a-z][a-z0-9_]{0,7}", 0..8).prop_flat_map(|names| {
        names
            .into_iter()
            .map(column_strategy)
            .collect::<Vec<_>>()
    })
}

fn table_strategy() -> impl Strategy<Value = Table> {
    (
        proptest::sample::select(SCHEMAS),
        any::<bool>(),
        columns_strategy(),
    )
        .prop_map(|(schema, ansi_nulls, columns)| {
            Table::new(schema, ansi_nulls).with_columns(ColumnCollection::new(columns).unwrap())
        })
}

fn columns_of(table: &Table) -> Vec<Column> {
    table.columns.as_ref().unwrap().iter().cloned().collect()
}

proptest! {
    #[test]
    fn equality_is_reflexive_and_diff_of_self_is_empty(table in table_strategy()) {
        prop_assert_eq!(&table, &table.clone());
        prop_assert_eq!(table.diff(&table).unwrap(), "");
    }

    #[test]
    fn equality_is_symmetric(a in table_strategy(), b in table_strategy()) {
        prop_assert_eq!(a == b, b == a);
    }

    #[test]
    fn equal_tables_have_empty_diffs(a in table_strategy(), b in table_strategy()) {
        if a == b {
            prop_assert_eq!(a.diff(&b).unwrap(), "");
            prop_assert_eq!(a.fingerprint(), b.fingerprint());
        }
    }

    #[test]
    fn destination_order_is_irrelevant(table in table_strategy(), seed in any::<u64>()) {
        let mut shuffled = columns_of(&table);
        let len = shuffled.len();
        if len > 1 {
            shuffled.rotate_left((seed as usize) % len);
        }
        let reordered = Table::new(table.schema.clone(), table.uses_ansi_nulls)
            .with_columns(ColumnCollection::new(shuffled).unwrap());

        prop_assert_eq!(table.diff(&reordered).unwrap(), "");
        prop_assert_eq!(&table, &reordered);
    }

    #[test]
    fn dropping_destination_columns_yields_one_addition_each(
        (table, kept) in table_strategy().prop_flat_map(|table| {
            let columns = columns_of(&table);
            let len = columns.len();
            (Just(table), subsequence(columns, 0..=len))
        })
    ) {
        let destination = Table::new(table.schema.clone(), table.uses_ansi_nulls)
            .with_columns(ColumnCollection::new(kept.clone()).unwrap());

        let changes = table.column_changes(&destination).unwrap();
        let source_len = table.columns.as_ref().unwrap().len();
        prop_assert_eq!(changes.len(), source_len - kept.len());
        prop_assert!(changes.iter().all(|c| c.action() == ColumnAction::Add));
    }

    #[test]
    fn removals_mirror_additions(a in table_strategy(), b in table_strategy()) {
        let forward = a.column_changes(&b).unwrap();
        let backward = b.column_changes(&a).unwrap();

        let mut added: Vec<&str> = forward
            .iter()
            .filter(|c| c.action() == ColumnAction::Add)
            .map(ColumnChange::column_name)
            .collect();
        let mut removed: Vec<&str> = backward
            .iter()
            .filter(|c| c.action() == ColumnAction::Remove)
            .map(ColumnChange::column_name)
            .collect();
        added.sort_unstable();
        removed.sort_unstable();
        prop_assert_eq!(added, removed);
    }
}
