use devjobs::board::{CatalogError, FilterEngine, JobCatalog};
use std::io::Write;

const CATALOG_CSV: &str = "\
id,title,company,description,tags,role,location,experience,salary
fe-1,Senior Frontend Developer,TechCorp,Build interfaces in React,\"React, JavaScript ,CSS\",frontend,remote,senior,$120k - $160k
,Backend Engineer,DataFlow,Design APIs,Python,backend,san-francisco,mid,$110k - $140k
";

#[test]
fn csv_rows_become_indexed_records() {
    let records = JobCatalog::from_reader(CATALOG_CSV.as_bytes()).expect("catalog parses");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id.0, "fe-1");
    assert_eq!(records[0].tags, vec!["React", "JavaScript", "CSS"]);
    assert_eq!(records[0].salary_floor(), 120);
    assert_eq!(records[1].id.0, "job-002");
    assert_eq!(records[1].original_index, 1);
    assert_eq!(records[1].experience_level, "mid");
}

#[test]
fn imported_records_feed_the_engine() {
    let records = JobCatalog::from_reader(CATALOG_CSV.as_bytes()).expect("catalog parses");
    let mut engine = FilterEngine::new(records);

    engine.set_tech_selected("Script", true);

    assert_eq!(engine.count(), 1);
    assert_eq!(engine.visible()[0].company, "TechCorp");
}

#[test]
fn missing_required_column_is_a_csv_error() {
    let csv = "id,title,company\nx,Engineer,Acme\n";
    let err = JobCatalog::from_reader(csv.as_bytes()).expect_err("role column required");
    assert!(matches!(err, CatalogError::Csv(_)));
}

#[test]
fn loads_catalog_from_disk() {
    let path = std::env::temp_dir().join(format!("devjobs-catalog-{}.csv", std::process::id()));
    {
        let mut file = std::fs::File::create(&path).expect("create temp catalog");
        file.write_all(CATALOG_CSV.as_bytes())
            .expect("write temp catalog");
    }

    let records = JobCatalog::from_path(&path).expect("catalog loads from disk");
    std::fs::remove_file(&path).ok();

    assert_eq!(records.len(), 2);
}

#[test]
fn missing_file_reports_path() {
    let err = JobCatalog::from_path("/nonexistent/devjobs.csv").expect_err("missing file");
    assert!(matches!(err, CatalogError::Open { .. }));
    assert!(err.to_string().contains("/nonexistent/devjobs.csv"));
}
