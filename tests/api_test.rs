use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use caselytics::domain::RawCase;
use caselytics::etl::transform::transform;
use caselytics::server::{create_server, AppState};
use caselytics::storage::CaseStore;
use serde_json::Value;
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

fn raw(
    case_number: &str,
    case_type: &str,
    practice_area: &str,
    status: &str,
    outcome: &str,
    settlement: f64,
    resolution_date: &str,
) -> RawCase {
    RawCase {
        case_number: case_number.to_string(),
        case_type: case_type.to_string(),
        filing_date: "2023-01-01".to_string(),
        resolution_date: resolution_date.to_string(),
        status: status.to_string(),
        practice_area: practice_area.to_string(),
        attorney_id: 1,
        settlement_amount: settlement,
        outcome: outcome.to_string(),
    }
}

/// Seed a database with four known cases and return the router over it.
fn seeded_app() -> Result<(TempDir, axum::Router)> {
    let dir = tempdir()?;
    let db_path = dir.path().join("cases.db");

    let mut store = CaseStore::open(&db_path)?;
    store.init_schema()?;
    let records = [
        raw("CASE-2023-0001", "Personal Injury", "Civil Litigation", "Active", "Success", 8_000.0, "2023-02-10"),
        raw("CASE-2023-0002", "Personal Injury", "Civil Litigation", "Resolved", "Settled", 60_000.0, "2023-04-11"),
        raw("CASE-2023-0003", "Family Law", "Family Law", "Active", "Pending", 12_000.0, "2023-03-02"),
        raw("CASE-2023-0004", "Corporate", "Corporate Law", "Resolved", "Success", 110_000.0, "2023-05-01"),
    ]
    .iter()
    .map(transform)
    .collect::<caselytics::error::Result<Vec<_>>>()?;
    store.replace_all(&records)?;

    let app = create_server(AppState::new(db_path));
    Ok((dir, app))
}

async fn get_json(app: &axum::Router, uri: &str) -> Result<(StatusCode, Value)> {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty())?)
        .await?;
    let status = response.status();
    let bytes = hyper::body::to_bytes(response.into_body()).await?;
    let json = serde_json::from_slice(&bytes)?;
    Ok((status, json))
}

#[tokio::test]
async fn health_reports_ok() -> Result<()> {
    let (_dir, app) = seeded_app()?;
    let (status, body) = get_json(&app, "/health").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    Ok(())
}

#[tokio::test]
async fn unfiltered_stats_cover_every_row() -> Result<()> {
    let (_dir, app) = seeded_app()?;
    let (status, body) = get_json(&app, "/api/cases/stats").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_cases"], 4);
    assert_eq!(body["active_cases"], 2);
    // durations: 40, 100, 60, 120; successes: 2 of 4
    assert_eq!(body["avg_resolution_days"], 80.0);
    assert_eq!(body["success_rate"], 0.5);
    Ok(())
}

#[tokio::test]
async fn case_type_filter_restricts_every_endpoint() -> Result<()> {
    let (_dir, app) = seeded_app()?;

    let (_, stats) = get_json(&app, "/api/cases/stats?caseType=Personal%20Injury").await?;
    assert_eq!(stats["total_cases"], 2);

    let (_, by_type) = get_json(&app, "/api/cases/by-type?caseType=Personal%20Injury").await?;
    let rows = by_type.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["case_type"], "Personal Injury");
    assert_eq!(rows[0]["count"], 2);

    let (_, times) = get_json(&app, "/api/cases/resolution-times?caseType=Personal%20Injury").await?;
    let rows = times.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["practice_area"], "Civil Litigation");
    assert_eq!(rows[0]["min_days"], 40);
    assert_eq!(rows[0]["max_days"], 100);
    Ok(())
}

#[tokio::test]
async fn filters_combine_with_and() -> Result<()> {
    let (_dir, app) = seeded_app()?;
    let (_, stats) =
        get_json(&app, "/api/cases/stats?caseType=Personal%20Injury&status=Active").await?;
    assert_eq!(stats["total_cases"], 1);
    assert_eq!(stats["success_rate"], 1.0);
    Ok(())
}

#[tokio::test]
async fn search_term_matches_single_case_number() -> Result<()> {
    let (_dir, app) = seeded_app()?;
    let (_, stats) = get_json(&app, "/api/cases/stats?searchTerm=CASE-2023-0001").await?;
    assert_eq!(stats["total_cases"], 1);
    Ok(())
}

#[tokio::test]
async fn search_term_spans_type_and_practice_area() -> Result<()> {
    let (_dir, app) = seeded_app()?;
    // "Law" hits practice areas (Family Law, Corporate Law) and the
    // Family Law case type; the OR-block still matches two distinct rows.
    let (_, stats) = get_json(&app, "/api/cases/stats?searchTerm=Law").await?;
    assert_eq!(stats["total_cases"], 2);
    Ok(())
}

#[tokio::test]
async fn empty_filter_values_match_everything() -> Result<()> {
    let (_dir, app) = seeded_app()?;
    let (_, stats) =
        get_json(&app, "/api/cases/stats?caseType=&practiceArea=&status=&searchTerm=").await?;
    assert_eq!(stats["total_cases"], 4);
    Ok(())
}

#[tokio::test]
async fn by_type_is_sorted_by_count_descending() -> Result<()> {
    let (_dir, app) = seeded_app()?;
    let (_, body) = get_json(&app, "/api/cases/by-type").await?;
    let rows = body.as_array().unwrap();
    assert_eq!(rows[0]["case_type"], "Personal Injury");
    assert_eq!(rows[0]["count"], 2);
    let counts: Vec<i64> = rows.iter().map(|r| r["count"].as_i64().unwrap()).collect();
    assert!(counts.windows(2).all(|w| w[0] >= w[1]));
    Ok(())
}

#[tokio::test]
async fn missing_table_yields_generic_error_payload() -> Result<()> {
    let dir = tempdir()?;
    // No schema was ever created at this path
    let app = create_server(AppState::new(dir.path().join("empty.db")));

    for uri in [
        "/api/cases/stats",
        "/api/cases/by-type",
        "/api/cases/resolution-times",
    ] {
        let (status, body) = get_json(&app, uri).await?;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("cases"));
    }
    Ok(())
}
