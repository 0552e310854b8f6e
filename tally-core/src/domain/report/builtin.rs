// tally-core/src/domain/report/builtin.rs
//
// The payments report: customer counts per country, then per-customer
// payment aggregates narrowed step by step with WHERE / HAVING / ORDER BY.

use super::definition::{Report, ReportQuery};

pub const PAYMENTS_REPORT: &str = "payments";

// Countries are capped for readability.
const COUNTRY_DISPLAY_LIMIT: usize = 10;

const CUSTOMERS_BY_COUNTRY: &str = "
SELECT country, COUNT(*)
FROM customers
GROUP BY country
;";

const CUSTOMERS_BY_COUNTRY_POSITIONAL: &str = "
SELECT country, COUNT(*)
FROM customers
GROUP BY 1
;";

const CUSTOMERS_BY_COUNTRY_ALIASED: &str = "
SELECT country, COUNT(*) AS customer_count
FROM customers
GROUP BY country
;";

const PAYMENT_SUMMARY: &str = "
SELECT
   customerNumber,
   COUNT(*) AS number_payments,
   MIN(CAST(amount AS INTEGER)) AS min_purchase,
   MAX(CAST(amount AS INTEGER)) AS max_purchase,
   AVG(CAST(amount AS INTEGER)) AS avg_purchase,
   SUM(CAST(amount AS INTEGER)) AS total_spent
FROM payments
GROUP BY customerNumber
;";

const PAYMENT_SUMMARY_2004: &str = "
SELECT
   customerNumber,
   COUNT(*) AS number_payments,
   MIN(CAST(amount AS INTEGER)) AS min_purchase,
   MAX(CAST(amount AS INTEGER)) AS max_purchase,
   AVG(CAST(amount AS INTEGER)) AS avg_purchase,
   SUM(CAST(amount AS INTEGER)) AS total_spent
FROM payments
WHERE strftime('%Y', paymentDate) = '2004'
GROUP BY customerNumber
;";

const PAYMENTS_OVER_FIFTY_THOUSAND: &str = "
SELECT
   customerNumber,
   COUNT(*) AS number_payments,
   MIN(CAST(amount AS INTEGER)) AS min_purchase,
   MAX(CAST(amount AS INTEGER)) AS max_purchase,
   AVG(CAST(amount AS INTEGER)) AS avg_purchase,
   SUM(CAST(amount AS INTEGER)) AS total_spent
FROM payments
GROUP BY customerNumber
HAVING avg_purchase > 50000
;";

const MULTIPLE_LARGE_PAYMENTS: &str = "
SELECT
   customerNumber,
   COUNT(*) AS number_payments,
   MIN(CAST(amount AS INTEGER)) AS min_purchase,
   MAX(CAST(amount AS INTEGER)) AS max_purchase,
   AVG(CAST(amount AS INTEGER)) AS avg_purchase,
   SUM(CAST(amount AS INTEGER)) AS total_spent
FROM payments
WHERE amount > 50000
GROUP BY customerNumber
HAVING number_payments >= 2
;";

const LOWEST_DUPLICATE_SPENDER: &str = "
SELECT
   customerNumber,
   COUNT(*) AS number_payments,
   MIN(CAST(amount AS INTEGER)) AS min_purchase,
   MAX(CAST(amount AS INTEGER)) AS max_purchase,
   AVG(CAST(amount AS INTEGER)) AS avg_purchase,
   SUM(CAST(amount AS INTEGER)) AS total_spent
FROM payments
WHERE amount > 50000
GROUP BY customerNumber
HAVING number_payments >= 2
ORDER BY total_spent
LIMIT 1
;";

fn entry(name: &str, description: &str, sql: &str, limit: Option<usize>) -> ReportQuery {
    ReportQuery {
        name: name.to_string(),
        description: Some(description.to_string()),
        sql: sql.trim().to_string(),
        limit,
    }
}

/// The built-in payments report over the `customers` and `payments` tables.
pub fn payments_report() -> Report {
    Report {
        name: PAYMENTS_REPORT.to_string(),
        description: Some("Customer and payment aggregates".to_string()),
        queries: vec![
            entry(
                "customers_by_country",
                "Number of customers per country",
                CUSTOMERS_BY_COUNTRY,
                Some(COUNTRY_DISPLAY_LIMIT),
            ),
            entry(
                "customers_by_country_positional",
                "Same grouping, by column position",
                CUSTOMERS_BY_COUNTRY_POSITIONAL,
                Some(COUNTRY_DISPLAY_LIMIT),
            ),
            entry(
                "customers_by_country_aliased",
                "Same grouping, with an aliased count",
                CUSTOMERS_BY_COUNTRY_ALIASED,
                Some(COUNTRY_DISPLAY_LIMIT),
            ),
            entry(
                "payment_summary",
                "Payment statistics per customer",
                PAYMENT_SUMMARY,
                None,
            ),
            entry(
                "payment_summary_2004",
                "Payment statistics per customer, 2004 only",
                PAYMENT_SUMMARY_2004,
                None,
            ),
            entry(
                "payments_over_fifty_thousand",
                "Customers whose average payment exceeds 50000",
                PAYMENTS_OVER_FIFTY_THOUSAND,
                None,
            ),
            entry(
                "multiple_large_payments",
                "Customers with at least two payments over 50000",
                MULTIPLE_LARGE_PAYMENTS,
                None,
            ),
            entry(
                "lowest_duplicate_spender",
                "Smallest total among customers with two payments over 50000",
                LOWEST_DUPLICATE_SPENDER,
                None,
            ),
        ],
    }
}
