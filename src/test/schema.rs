use crate::error::Error;
use crate::schema::{Schema, SchemaProblem};
use crate::{Compound, List, NbtFile, Tag, Value};

fn table(columns: &[(&str, i32)]) -> Value {
    let mut c = Compound::new();
    for (name, v) in columns {
        c.insert(*name, Value::Int(*v));
    }
    Value::Compound(c)
}

fn file_with(tables: Vec<(&str, Value)>) -> NbtFile {
    let mut root = Compound::new();
    for (name, value) in tables {
        root.insert(name, value);
    }
    NbtFile::new(root)
}

#[test]
fn matching_document_passes() {
    let schema = Schema::new()
        .table("a", ["x", "y"])
        .table("b", ["z"]);
    let file = file_with(vec![
        ("a", table(&[("x", 1), ("y", 2)])),
        ("b", table(&[("z", 3)])),
    ]);

    assert!(schema.check(&file, "level.dat").is_ok());
}

#[test]
fn missing_and_extraneous_tables_are_both_reported() {
    let schema = Schema::new()
        .table("a", ["x", "y"])
        .table("b", ["z"]);
    let file = file_with(vec![
        ("a", table(&[("x", 1), ("y", 2)])),
        ("c", table(&[("w", 4)])),
    ]);

    let err = schema.check(&file, "save/level.dat").unwrap_err();
    let report = match err {
        Error::Schema(report) => report,
        other => panic!("expected schema error, got {:?}", other),
    };

    assert_eq!(report.path.to_str(), Some("save/level.dat"));
    assert!(report.contains(&SchemaProblem::MissingTable("b".to_string())));
    assert!(report.contains(&SchemaProblem::ExtraTable("c".to_string())));
    assert_eq!(report.problems.len(), 2);
}

#[test]
fn missing_and_extraneous_columns_are_both_reported() {
    let schema = Schema::new().table("a", ["x", "y"]);
    let file = file_with(vec![("a", table(&[("x", 1), ("z", 3)]))]);

    let err = schema.check(&file, "p").unwrap_err();
    let report = match err {
        Error::Schema(report) => report,
        other => panic!("expected schema error, got {:?}", other),
    };

    assert!(report.contains(&SchemaProblem::MissingColumn {
        table: "a".to_string(),
        column: "y".to_string(),
    }));
    assert!(report.contains(&SchemaProblem::ExtraColumn {
        table: "a".to_string(),
        column: "z".to_string(),
    }));
    assert_eq!(report.problems.len(), 2);
}

#[test]
fn row_shaped_tables_take_columns_from_the_first_row() {
    let row = match table(&[("x", 1), ("y", 2)]) {
        Value::Compound(c) => c,
        _ => unreachable!(),
    };
    let rows = List::new(Tag::Compound, vec![Value::Compound(row)]).unwrap();

    let schema = Schema::new().table("a", ["x", "y"]);
    let file = file_with(vec![("a", Value::List(rows))]);

    assert!(schema.check(&file, "p").is_ok());
}

#[test]
fn scalar_table_has_no_columns() {
    let schema = Schema::new().table("a", ["x"]);
    let file = file_with(vec![("a", Value::Int(1))]);

    let err = schema.check(&file, "p").unwrap_err();
    let report = match err {
        Error::Schema(report) => report,
        other => panic!("expected schema error, got {:?}", other),
    };

    assert!(report.contains(&SchemaProblem::MissingColumn {
        table: "a".to_string(),
        column: "x".to_string(),
    }));
}

#[test]
fn report_display_names_path_and_every_problem() {
    let schema = Schema::new()
        .table("a", ["x", "y"])
        .table("b", ["z"]);
    let file = file_with(vec![
        ("a", table(&[("x", 1), ("y", 2)])),
        ("c", table(&[("w", 4)])),
    ]);

    let msg = schema.check(&file, "world/level.dat").unwrap_err().to_string();
    assert!(msg.contains("world/level.dat"));
    assert!(msg.contains("missing table 'b'"));
    assert!(msg.contains("unexpected table 'c'"));
}
