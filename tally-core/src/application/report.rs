// tally-core/src/application/report.rs

use std::io::Write;
use tracing::{info, instrument};

use crate::application::ports::renderer::{Section, TableRenderer};
use crate::application::runner::{run_query, truncate};
use crate::domain::report::Report;
use crate::domain::table::ResultTable;
use crate::error::TallyError;
use crate::ports::connector::Connector;

#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome {
    pub name: String,
    pub total_rows: usize,
    pub displayed_rows: usize,
}

#[derive(Debug, Default)]
pub struct ReportOutcome {
    pub queries: Vec<QueryOutcome>,
}

/// Renders a table, cut to `limit` rows when given.
pub fn render_result(
    name: &str,
    description: Option<&str>,
    table: &ResultTable,
    limit: Option<usize>,
    renderer: &dyn TableRenderer,
) -> Result<(String, usize), TallyError> {
    let truncated = limit.map(|n| truncate(table, n));
    let shown = truncated.as_ref().unwrap_or(table);

    let rendered = renderer.render(&Section {
        name,
        description,
        table: shown,
        total_rows: table.len(),
    })?;
    Ok((rendered, shown.len()))
}

/// Runs every query of the report in order on one connection,
/// writing each rendered result as soon as it is available.
/// Stops at the first failing query, leaving the document unfinished.
#[instrument(skip_all, fields(report = %report.name))]
pub fn run_report(
    connector: &dyn Connector,
    report: &Report,
    renderer: &dyn TableRenderer,
    out: &mut dyn Write,
) -> Result<ReportOutcome, TallyError> {
    info!(queries = report.queries.len(), "📊 Running report");

    let framing = renderer.framing();
    out.write_all(framing.open.as_bytes())?;

    let mut outcome = ReportOutcome::default();
    for (idx, entry) in report.queries.iter().enumerate() {
        let table = run_query(connector, &entry.sql)?;
        let (rendered, displayed_rows) = render_result(
            &entry.name,
            entry.description.as_deref(),
            &table,
            entry.limit,
            renderer,
        )?;

        if idx > 0 {
            out.write_all(framing.separator.as_bytes())?;
        }
        out.write_all(rendered.trim_end().as_bytes())?;

        outcome.queries.push(QueryOutcome {
            name: entry.name.clone(),
            total_rows: table.len(),
            displayed_rows,
        });
    }

    out.write_all(framing.close.as_bytes())?;
    out.flush()?;
    Ok(outcome)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::application::test_support::payments_fixture;
    use crate::domain::report::{ReportQuery, payments_report};
    use crate::domain::table::Value;
    use crate::infrastructure::render::{JsonRenderer, TextRenderer};
    use anyhow::Result;

    fn outcome_of(name: &str, outcome: &ReportOutcome) -> QueryOutcome {
        outcome
            .queries
            .iter()
            .find(|q| q.name == name)
            .cloned()
            .unwrap()
    }

    fn customer_numbers(table: &ResultTable) -> Vec<i64> {
        let mut ids: Vec<i64> = table
            .column("customerNumber")
            .unwrap()
            .filter_map(Value::as_i64)
            .collect();
        ids.sort_unstable();
        ids
    }

    #[test]
    fn test_payments_report_runs_every_query() -> Result<()> {
        let connector = payments_fixture()?;
        let mut out = Vec::new();

        let outcome = run_report(&connector, &payments_report(), &TextRenderer, &mut out)?;
        let text = String::from_utf8(out)?;

        assert_eq!(outcome.queries.len(), 8);
        // 7 countries in the fixture: under the display limit of 10
        assert_eq!(outcome_of("customers_by_country", &outcome).total_rows, 7);
        assert_eq!(outcome_of("customers_by_country", &outcome).displayed_rows, 7);
        assert_eq!(outcome_of("payment_summary", &outcome).total_rows, 6);
        assert_eq!(outcome_of("payment_summary_2004", &outcome).total_rows, 6);
        assert_eq!(outcome_of("payments_over_fifty_thousand", &outcome).total_rows, 2);
        assert_eq!(outcome_of("multiple_large_payments", &outcome).total_rows, 3);
        assert_eq!(outcome_of("lowest_duplicate_spender", &outcome).total_rows, 1);

        assert!(text.contains("▶ customers_by_country"));
        assert!(text.contains("▶ lowest_duplicate_spender"));
        assert!(text.contains("customer_count"));
        Ok(())
    }

    #[test]
    fn test_having_average_filter() -> Result<()> {
        let connector = payments_fixture()?;
        let report = payments_report();
        let table = run_query(&connector, &report.query("payments_over_fifty_thousand")?.sql)?;

        assert_eq!(customer_numbers(&table), vec![124, 141]);
        for row in table.rows() {
            assert!(row.get("avg_purchase").and_then(Value::as_f64).unwrap() > 50000.0);
        }
        Ok(())
    }

    #[test]
    fn test_lowest_duplicate_spender() -> Result<()> {
        let connector = payments_fixture()?;
        let report = payments_report();

        let qualifying = run_query(&connector, &report.query("multiple_large_payments")?.sql)?;
        assert_eq!(customer_numbers(&qualifying), vec![124, 141, 151]);

        let lowest = run_query(&connector, &report.query("lowest_duplicate_spender")?.sql)?;
        assert_eq!(lowest.len(), 1);
        let row = lowest.row(0).unwrap();
        assert_eq!(row.get("customerNumber"), Some(&Value::Integer(151)));
        assert_eq!(row.get("number_payments"), Some(&Value::Integer(2)));
        assert_eq!(row.get("total_spent"), Some(&Value::Integer(105000)));
        Ok(())
    }

    #[test]
    fn test_payment_summary_aggregates() -> Result<()> {
        let connector = payments_fixture()?;
        let report = payments_report();
        let table = run_query(&connector, &report.query("payment_summary")?.sql)?;

        assert_eq!(
            table.columns(),
            [
                "customerNumber",
                "number_payments",
                "min_purchase",
                "max_purchase",
                "avg_purchase",
                "total_spent"
            ]
        );
        let row = table
            .rows()
            .find(|r| r.get("customerNumber") == Some(&Value::Integer(114)))
            .unwrap();
        assert_eq!(row.get("number_payments"), Some(&Value::Integer(4)));
        assert_eq!(row.get("min_purchase"), Some(&Value::Integer(7565)));
        assert_eq!(row.get("max_purchase"), Some(&Value::Integer(82261)));
        assert_eq!(row.get("total_spent"), Some(&Value::Integer(180584)));
        assert_eq!(row.get("avg_purchase"), Some(&Value::Real(45146.0)));
        Ok(())
    }

    #[test]
    fn test_display_limit_truncates_output_only() -> Result<()> {
        let connector = payments_fixture()?;
        let report = Report {
            name: "limited".into(),
            description: None,
            queries: vec![ReportQuery {
                name: "all_payments".into(),
                description: None,
                sql: "SELECT customerNumber, amount FROM payments".into(),
                limit: Some(10),
            }],
        };

        let mut out = Vec::new();
        let outcome = run_report(&connector, &report, &TextRenderer, &mut out)?;
        let q = outcome_of("all_payments", &outcome);
        assert_eq!(q.total_rows, 17);
        assert_eq!(q.displayed_rows, 10);
        assert!(String::from_utf8(out)?.contains("(10 of 17 rows)"));
        Ok(())
    }

    #[test]
    fn test_report_stops_at_first_failure() -> Result<()> {
        let connector = payments_fixture()?;
        let ok = |name: &str| ReportQuery {
            name: name.into(),
            description: None,
            sql: "SELECT COUNT(*) AS n FROM customers".into(),
            limit: None,
        };
        let report = Report {
            name: "broken".into(),
            description: None,
            queries: vec![
                ok("first"),
                ReportQuery {
                    name: "bad".into(),
                    description: None,
                    sql: "SELECT nope FROM customers".into(),
                    limit: None,
                },
                ok("never_runs"),
            ],
        };

        let mut out = Vec::new();
        let err = run_report(&connector, &report, &TextRenderer, &mut out).unwrap_err();
        assert!(err.is_query());

        let text = String::from_utf8(out)?;
        assert!(text.contains("▶ first"));
        assert!(!text.contains("▶ bad"));
        assert!(!text.contains("never_runs"));
        Ok(())
    }

    #[test]
    fn test_json_report_sections() -> Result<()> {
        let connector = payments_fixture()?;
        let report = payments_report().only("lowest_duplicate_spender")?;

        let mut out = Vec::new();
        run_report(&connector, &report, &JsonRenderer, &mut out)?;

        let parsed: serde_json::Value = serde_json::from_slice(&out)?;
        assert_eq!(parsed.as_array().map(Vec::len), Some(1));
        let section = &parsed[0];
        assert_eq!(section["name"], "lowest_duplicate_spender");
        assert_eq!(section["total_rows"], 1);
        assert_eq!(section["rows"][0]["customerNumber"], 151);
        assert_eq!(section["rows"][0]["total_spent"], 105000);
        Ok(())
    }

    #[test]
    fn test_json_report_is_one_document() -> Result<()> {
        let connector = payments_fixture()?;
        let report = payments_report();

        let mut out = Vec::new();
        run_report(&connector, &report, &JsonRenderer, &mut out)?;

        let parsed: serde_json::Value = serde_json::from_slice(&out)?;
        let sections = parsed.as_array().unwrap();
        assert_eq!(sections.len(), report.queries.len());
        let names: Vec<&str> = sections.iter().filter_map(|s| s["name"].as_str()).collect();
        let expected: Vec<&str> = report.queries.iter().map(|q| q.name.as_str()).collect();
        assert_eq!(names, expected);
        Ok(())
    }

    #[test]
    fn test_text_sections_are_separated_by_a_blank_line() -> Result<()> {
        let connector = payments_fixture()?;
        let count = |name: &str| ReportQuery {
            name: name.into(),
            description: None,
            sql: "SELECT COUNT(*) AS n FROM customers".into(),
            limit: None,
        };
        let report = Report {
            name: "pair".into(),
            description: None,
            queries: vec![count("first"), count("second")],
        };

        let mut out = Vec::new();
        run_report(&connector, &report, &TextRenderer, &mut out)?;

        let text = String::from_utf8(out)?;
        assert!(text.contains("(1 row)\n\n▶ second"), "{text}");
        assert!(text.ends_with("(1 row)\n"));
        Ok(())
    }
}
