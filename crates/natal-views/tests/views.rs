//! Integration tests for the view transforms.

use std::sync::Arc;

use natal_model::{BalancedDataset, ModelError};
use natal_views::{
    CellValue, ColumnDescriptor, ViewError, prepare_cigarettes, prepare_crosstab,
    prepare_pairwise, prepare_univariate,
};
use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};

/// Minimal record-schema collection for the transform tests.
struct Rows {
    father_age: Vec<i64>,
    birth_month: Vec<i64>,
    cigarettes: Vec<[Option<i64>; 3]>,
    delivery_method: Vec<Option<i64>>,
    assisted_vent: Vec<Option<&'static str>>,
}

impl Rows {
    fn new(len: usize) -> Self {
        Self {
            father_age: (0..len as i64).map(|i| 30 + i).collect(),
            birth_month: (0..len as i64).map(|i| 1 + i % 12).collect(),
            cigarettes: vec![[Some(0), Some(0), Some(0)]; len],
            delivery_method: vec![Some(1); len],
            assisted_vent: vec![Some("N"); len],
        }
    }

    fn frame(&self) -> DataFrame {
        let cig = |idx: usize| -> Vec<Option<i64>> {
            self.cigarettes.iter().map(|counts| counts[idx]).collect()
        };
        DataFrame::new(vec![
            Series::new("father_age".into(), self.father_age.clone()).into_column(),
            Series::new("birth_month".into(), self.birth_month.clone()).into_column(),
            Series::new("num_cig_3".into(), cig(0)).into_column(),
            Series::new("num_cig_6".into(), cig(1)).into_column(),
            Series::new("num_cig_9".into(), cig(2)).into_column(),
            Series::new("delivery_method".into(), self.delivery_method.clone()).into_column(),
            Series::new("assisted_vent".into(), self.assisted_vent.clone()).into_column(),
        ])
        .unwrap()
    }
}

fn dataset(case: &Rows, control: &Rows) -> BalancedDataset {
    BalancedDataset::new(case.frame(), control.frame())
}

fn strings(df: &DataFrame, name: &str) -> Vec<String> {
    df.column(name)
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|value| value.unwrap_or_default().to_string())
        .collect()
}

fn floats(df: &DataFrame, name: &str) -> Vec<f64> {
    df.column(name)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .flatten()
        .collect()
}

fn text(value: &str) -> CellValue {
    CellValue::Text(value.to_string())
}

// === Univariate ===

#[test]
fn univariate_labels_case_rows_first() {
    let ds = dataset(&Rows::new(2), &Rows::new(3));
    let df = prepare_univariate(&ds, "father_age").unwrap();

    assert_eq!(df.width(), 2);
    assert_eq!(df.height(), 5);
    assert_eq!(
        strings(&df, "group"),
        vec!["case", "case", "control", "control", "control"]
    );
    let ages: Vec<i64> = df
        .column("father_age")
        .unwrap()
        .i64()
        .unwrap()
        .into_iter()
        .flatten()
        .collect();
    assert_eq!(ages, vec![30, 31, 30, 31, 32]);
}

#[test]
fn univariate_rejects_unknown_feature() {
    let ds = dataset(&Rows::new(1), &Rows::new(1));
    let err = prepare_univariate(&ds, "num_cig_3").unwrap_err();
    assert!(matches!(
        err,
        ViewError::Model(ModelError::UnknownFeature { ref name }) if name == "num_cig_3"
    ));
}

// === Pairwise ===

#[test]
fn pairwise_projects_both_features() {
    let ds = dataset(&Rows::new(2), &Rows::new(2));
    let df = prepare_pairwise(&ds, "father_age", "birth_month").unwrap();
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    assert_eq!(names, vec!["father_age", "birth_month", "group"]);
    assert_eq!(df.height(), 4);
    assert_eq!(strings(&df, "group")[0], "case");
}

#[test]
fn pairwise_allows_same_feature_twice() {
    let ds = dataset(&Rows::new(2), &Rows::new(1));
    let df = prepare_pairwise(&ds, "birth_month", "birth_month").unwrap();
    assert_eq!(df.height(), 3);
    assert!(df.column("birth_month").is_ok());
}

#[test]
fn pairwise_rejects_either_unknown_feature() {
    let ds = dataset(&Rows::new(1), &Rows::new(1));
    assert!(prepare_pairwise(&ds, "father_age", "height").is_err());
    assert!(prepare_pairwise(&ds, "height", "father_age").is_err());
}

// === Repeated measures ===

#[test]
fn reshaper_excludes_record_with_one_unknown_trimester() {
    let mut case = Rows::new(2);
    case.cigarettes = vec![[Some(5), Some(8), Some(150)], [Some(1), Some(2), Some(3)]];
    let ds = dataset(&case, &Rows::new(0));

    let df = prepare_cigarettes(&ds, false).unwrap();
    assert_eq!(df.height(), 3);
    assert_eq!(floats(&df, "value"), vec![1.0, 2.0, 3.0]);
    assert_eq!(strings(&df, "period"), vec!["first", "second", "third"]);
    assert_eq!(strings(&df, "group"), vec!["case", "case", "case"]);
}

#[test]
fn reshaper_emits_three_rows_per_surviving_record() {
    let mut case = Rows::new(3);
    case.cigarettes = vec![
        [Some(1), Some(2), Some(3)],
        [None, Some(2), Some(3)],
        [Some(4), Some(5), Some(6)],
    ];
    let mut control = Rows::new(2);
    control.cigarettes = vec![[Some(10), Some(0), Some(99)], [Some(100), Some(0), Some(0)]];
    let ds = dataset(&case, &control);

    let df = prepare_cigarettes(&ds, false).unwrap();
    // Two case records and one control record survive.
    assert_eq!(df.height(), 9);
    assert_eq!(
        floats(&df, "value"),
        vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0, 10.0, 0.0, 99.0]
    );
    assert_eq!(
        strings(&df, "period"),
        vec!["first", "first", "second", "second", "third", "third", "first", "second", "third"]
    );
    let groups = strings(&df, "group");
    assert_eq!(groups.iter().filter(|g| *g == "case").count(), 6);
    assert_eq!(groups.iter().filter(|g| *g == "control").count(), 3);
}

#[test]
fn reshaper_log_scale_matches_external_log10() {
    let mut case = Rows::new(3);
    case.cigarettes = vec![
        [Some(1), Some(10), Some(20)],
        [Some(0), Some(5), Some(99)],
        [Some(3), Some(3), Some(3)],
    ];
    let mut control = Rows::new(1);
    control.cigarettes = vec![[Some(7), Some(70), Some(0)]];
    let ds = dataset(&case, &control);

    let linear = floats(&prepare_cigarettes(&ds, false).unwrap(), "value");
    let log = floats(&prepare_cigarettes(&ds, true).unwrap(), "value");
    assert_eq!(linear.len(), log.len());
    for (lin, lg) in linear.iter().zip(&log) {
        assert_eq!(lin.log10(), *lg);
        assert!(!lg.is_nan());
    }
    assert!(log.contains(&f64::NEG_INFINITY));
}

// === Cross-tabulation ===

/// Case vent flags Y, N, U, Y; control flags N, N.
fn vent_dataset() -> BalancedDataset {
    let mut case = Rows::new(4);
    case.assisted_vent = vec![Some("Y"), Some("N"), Some("U"), Some("Y")];
    let mut control = Rows::new(2);
    control.assisted_vent = vec![Some("N"), Some("N")];
    dataset(&case, &control)
}

#[test]
fn crosstab_counts_single_flag() {
    let table = prepare_crosstab(&vent_dataset(), &["assisted_vent"])
        .unwrap()
        .unwrap();

    // Ascending raw order: N, U, Y.
    let expected = [("No", 1, 2), ("Unknown", 1, 0), ("Yes", 2, 0)];
    assert_eq!(table.rows.len(), expected.len());
    for (row, (label, dead, alive)) in table.rows.iter().zip(expected) {
        assert_eq!(row.get("Assisted by ven"), Some(&text(label)));
        assert_eq!(row.get("Dead"), Some(&CellValue::Count(dead)));
        assert_eq!(row.get("Alive"), Some(&CellValue::Count(alive)));
    }
    assert_eq!(
        table.columns,
        vec![
            ColumnDescriptor {
                name: "Assisted by ven".to_string(),
                id: "Assisted by ven".to_string()
            },
            ColumnDescriptor {
                name: "Dead".to_string(),
                id: "Dead".to_string()
            },
            ColumnDescriptor {
                name: "Alive".to_string(),
                id: "Alive".to_string()
            },
        ]
    );
}

#[test]
fn crosstab_rows_snapshot() {
    let table = prepare_crosstab(&vent_dataset(), &["assisted_vent"])
        .unwrap()
        .unwrap();
    insta::assert_json_snapshot!(table.rows, @r#"
    [
      {
        "Alive": 2,
        "Assisted by ven": "No",
        "Dead": 1
      },
      {
        "Alive": 0,
        "Assisted by ven": "Unknown",
        "Dead": 1
      },
      {
        "Alive": 0,
        "Assisted by ven": "Yes",
        "Dead": 2
      }
    ]
    "#);
}

#[test]
fn crosstab_multi_key_sorts_by_raw_tuple_and_fills_zero() {
    let mut case = Rows::new(4);
    case.delivery_method = vec![Some(9), Some(2), Some(1), Some(2)];
    case.assisted_vent = vec![Some("Y"), Some("N"), Some("Y"), Some("N")];
    let mut control = Rows::new(3);
    control.delivery_method = vec![Some(1), Some(1), None];
    control.assisted_vent = vec![Some("N"), Some("Y"), Some("N")];
    let ds = dataset(&case, &control);

    let table = prepare_crosstab(&ds, &["delivery_method", "assisted_vent"])
        .unwrap()
        .unwrap();

    let expected = [
        ("Natural", "No", 0, 1),
        ("Natural", "Yes", 1, 1),
        ("Cesarean", "No", 2, 0),
        ("Unknown", "Yes", 1, 0),
    ];
    assert_eq!(table.rows.len(), expected.len());
    for (row, (method, vent, dead, alive)) in table.rows.iter().zip(expected) {
        assert_eq!(row.get("Delivery method"), Some(&text(method)));
        assert_eq!(row.get("Assisted by ven"), Some(&text(vent)));
        assert_eq!(row.get("Dead"), Some(&CellValue::Count(dead)));
        assert_eq!(row.get("Alive"), Some(&CellValue::Count(alive)));
    }
    let names: Vec<&str> = table.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Delivery method", "Assisted by ven", "Dead", "Alive"]
    );
}

#[test]
fn crosstab_counts_sum_to_grouped_rows() {
    let ds = vent_dataset();
    let table = prepare_crosstab(&ds, &["assisted_vent", "delivery_method"])
        .unwrap()
        .unwrap();
    let total: u64 = table
        .rows
        .iter()
        .flat_map(|row| [row.get("Dead"), row.get("Alive")])
        .map(|cell| match cell {
            Some(CellValue::Count(count)) => *count,
            _ => panic!("missing count cell"),
        })
        .sum();
    assert_eq!(total, (ds.case_count() + ds.control_count()) as u64);
}

#[test]
fn crosstab_empty_selection_is_none() {
    let ds = vent_dataset();
    let empty: [&str; 0] = [];
    assert!(prepare_crosstab(&ds, &empty).unwrap().is_none());
}

#[test]
fn crosstab_rejects_unknown_field() {
    let ds = vent_dataset();
    let err = prepare_crosstab(&ds, &["assisted_vent", "father_age"]).unwrap_err();
    assert!(matches!(
        err,
        ViewError::Model(ModelError::UnknownField { ref name }) if name == "father_age"
    ));
}

#[test]
fn crosstab_frame_follows_descriptor_order() {
    let table = prepare_crosstab(&vent_dataset(), &["assisted_vent"])
        .unwrap()
        .unwrap();
    let df = table.to_frame().unwrap();
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    assert_eq!(names, vec!["Assisted by ven", "Dead", "Alive"]);
    let dead: Vec<u64> = df
        .column("Dead")
        .unwrap()
        .u64()
        .unwrap()
        .into_iter()
        .flatten()
        .collect();
    assert_eq!(dead, vec![1, 1, 2]);
}

// === Shared dataset ===

#[test]
fn transforms_share_dataset_across_threads() {
    let ds = Arc::new(vent_dataset());
    let before = ds.case().clone();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ds = Arc::clone(&ds);
                scope.spawn(move || {
                    let uni = prepare_univariate(&ds, "father_age").unwrap();
                    let bad = prepare_univariate(&ds, "nope");
                    let table = prepare_crosstab(&ds, &["assisted_vent"]).unwrap();
                    (uni.height(), bad.is_err(), table.map(|t| t.rows.len()))
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), (6, true, Some(3)));
        }
    });
    assert!(ds.case().equals(&before));
}
