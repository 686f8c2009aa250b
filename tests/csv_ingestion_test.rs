// ABOUTME: Tests for CSV ingestion engine row handling and header validation
// ABOUTME: Covers name assembly, metric bounds, test_type priority, sentinels, and row numbering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::NaiveDate;
use ringside_core::models::{Gender, MetricValue};
use ringside_intelligence::{ColumnMapping, CsvIngestionEngine, MetricColumn, StructureWarning};
use uuid::Uuid;

fn engine() -> CsvIngestionEngine {
    CsvIngestionEngine::new(ColumnMapping::default())
}

#[test]
fn test_basic_row_becomes_event() {
    let csv = "Date,Athlete,CMJ Height (cm),CMJ RSI,Body Mass (kg)\n05/03/2024,Jo Bloggs,32.5,1.4,61.2\n";
    let outcome = engine().process(csv, None);

    assert!(outcome.errors.is_empty());
    assert_eq!(outcome.events.len(), 1);
    let event = &outcome.events[0];
    assert_eq!(event.row, 2);
    assert_eq!(event.event_date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    assert_eq!(event.athlete_name.as_deref(), Some("Jo Bloggs"));
    assert_eq!(event.metrics["height_cm"].as_f64(), Some(32.5));
    assert_eq!(event.metrics["rsi"].as_f64(), Some(1.4));
    assert_eq!(event.metrics["body_mass_kg"].as_f64(), Some(61.2));
    assert_eq!(event.metrics["test_type"].as_text(), Some("CMJ"));
}

#[test]
fn test_byte_order_mark_ignored() {
    let csv = "\u{feff}Date,Athlete,CMJ Height (cm)\n01/03/2024,Jo,30\n";
    let outcome = engine().process(csv, None);
    assert_eq!(outcome.events.len(), 1);
    assert!(engine().validate_structure(csv).iter().all(|w| !w.is_blocking()));
}

#[test]
fn test_first_populated_column_sets_test_type() {
    let mapping = ColumnMapping {
        metric_columns: [
            ("SJ Height".to_owned(), MetricColumn::new("SJ", "sj_height_cm")),
            ("CMJ Height".to_owned(), MetricColumn::new("CMJ", "height_cm")),
        ]
        .into_iter()
        .collect(),
        ..ColumnMapping::default()
    };
    let csv = "Date,Athlete,SJ Height,CMJ Height\n01/03/2024,Jo,,30\n02/03/2024,Jo,28,31\n";
    let outcome = CsvIngestionEngine::new(mapping).process(csv, None);

    assert_eq!(outcome.events[0].metrics["test_type"].as_text(), Some("CMJ"));
    assert!(!outcome.events[0].metrics.contains_key("sj_height_cm"));
    assert_eq!(outcome.events[1].metrics["test_type"].as_text(), Some("SJ"));
    assert_eq!(outcome.events[1].metrics.len(), 3);
}

#[test]
fn test_bad_metric_cells_dropped_silently() {
    let csv = "\
Date,Athlete,CMJ Height (cm),CMJ RSI,Body Mass (kg)
01/03/2024,Jo,600,1.2,350
02/03/2024,Jo,abc,N/A,-
03/03/2024,Jo,-5,na,70
";
    let outcome = engine().process(csv, None);

    // Row 2 keeps RSI only; rows 3 and 4 have no usable metric and are skipped
    assert!(outcome.errors.is_empty());
    assert_eq!(outcome.events.len(), 1);
    let event = &outcome.events[0];
    assert!(!event.metrics.contains_key("height_cm"));
    assert!(!event.metrics.contains_key("body_mass_kg"));
    assert_eq!(event.metrics["rsi"].as_f64(), Some(1.2));
}

#[test]
fn test_metric_and_mass_range_edges() {
    let csv = "\
Date,Athlete,CMJ Height (cm),CMJ RSI,Body Mass (kg)
01/03/2024,Jo,0,1.0,300
02/03/2024,Jo,500,1.0,300.1
03/03/2024,Jo,500.01,1.0,70
04/03/2024,Jo,-0.01,1.0,0
";
    let outcome = engine().process(csv, None);
    assert!(outcome.errors.is_empty());
    assert_eq!(outcome.events.len(), 4);

    // (height kept, body mass kept) per row
    let expected = [
        (Some(0.0), Some(300.0)),
        (Some(500.0), None),
        (None, Some(70.0)),
        (None, Some(0.0)),
    ];
    for (event, (height, mass)) in outcome.events.iter().zip(expected) {
        assert_eq!(
            event.metrics.get("height_cm").and_then(MetricValue::as_f64),
            height,
            "row {}",
            event.row
        );
        assert_eq!(
            event.metrics.get("body_mass_kg").and_then(MetricValue::as_f64),
            mass,
            "row {}",
            event.row
        );
    }
}

#[test]
fn test_row_errors_carry_row_numbers() {
    let csv = "\
Date,Athlete,CMJ Height (cm)
01/03/2024,Jo,30
,Jo,31
03/13/2024,Jo,32
05.03.2024,Jo,33
";
    let outcome = engine().process(csv, None);

    assert_eq!(outcome.events.len(), 2);
    assert_eq!(outcome.events[1].row, 5);
    assert_eq!(outcome.errors.len(), 2);
    assert_eq!(outcome.errors[0].row, 3);
    assert_eq!(outcome.errors[0].reason, "Missing required date column: Date");
    assert_eq!(outcome.errors[1].row, 4);
    assert_eq!(
        outcome.errors[1].reason,
        "Invalid date format: 03/13/2024. Expected DD/MM/YYYY"
    );
}

#[test]
fn test_names_from_first_and_surname_columns() {
    let mapping = ColumnMapping {
        athlete_column: None,
        first_name_column: Some("First".to_owned()),
        surname_column: Some("Last".to_owned()),
        ..ColumnMapping::default()
    };
    let csv = "Date,First,Last,CMJ Height (cm)\n01/03/2024,Jo,Bloggs,30\n01/03/2024,Sam,,31\n01/03/2024,,,32\n";
    let outcome = CsvIngestionEngine::new(mapping).process(csv, None);

    let names: Vec<Option<&str>> = outcome
        .events
        .iter()
        .map(|e| e.athlete_name.as_deref())
        .collect();
    assert_eq!(names, vec![Some("Jo Bloggs"), Some("Sam"), None]);
}

#[test]
fn test_names_are_sanitized_and_truncated() {
    let long = "x".repeat(150);
    let csv = format!(
        "Date,Athlete,CMJ Height (cm)\n01/03/2024,<b>Jo</b> Bloggs,30\n01/03/2024,{long},31\n"
    );
    let outcome = engine().process(&csv, None);

    assert_eq!(outcome.events[0].athlete_name.as_deref(), Some("Jo Bloggs"));
    assert_eq!(
        outcome.events[1].athlete_name.as_ref().map(|n| n.chars().count()),
        Some(100)
    );
}

#[test]
fn test_override_replaces_names() {
    let athlete_id = Uuid::new_v4();
    let csv = "Date,Athlete,CMJ Height (cm)\n01/03/2024,Jo,30\n";
    let outcome = engine().process(csv, Some(athlete_id));

    assert_eq!(outcome.events[0].athlete_id, Some(athlete_id));
    assert!(outcome.events[0].athlete_name.is_none());
}

#[test]
fn test_gender_column() {
    let mapping = ColumnMapping {
        gender_column: Some("Sex".to_owned()),
        ..ColumnMapping::default()
    };
    let csv = "Date,Athlete,Sex,CMJ Height (cm)\n01/03/2024,Jo,Female,30\n01/03/2024,Sam,x,31\n";
    let outcome = CsvIngestionEngine::new(mapping).process(csv, None);

    assert_eq!(outcome.events[0].gender, Some(Gender::Female));
    assert_eq!(outcome.events[1].gender, None);

    // Without a mapped column the cell is ignored
    let outcome = engine().process(csv, None);
    assert_eq!(outcome.events[0].gender, None);
}

#[test]
fn test_validate_structure_warnings() {
    let warnings = engine().validate_structure("Athlete,Jump\nJo,30\n");
    assert_eq!(warnings.len(), 3);
    assert_eq!(
        warnings[0],
        StructureWarning::MissingDateColumn("Date".to_owned())
    );
    assert!(matches!(warnings[1], StructureWarning::NoMetricColumns(_)));
    assert_eq!(
        warnings[2].to_string(),
        "Missing body mass column: Body Mass (kg) (optional)"
    );

    let warnings =
        engine().validate_structure("Date,Body Mass (kg),CMJ RSI\n01/03/2024,70,1.2\n");
    assert!(warnings.is_empty());
}
