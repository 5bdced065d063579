use finbaba_core::{classify, Category, Polarity};
use finbaba_ingest::{extract, ingest, IngestError, StatementFormat};

#[test]
fn test_csv_salary_and_groceries() {
    let csv = "Date,Description,Amount,Type\n\
               2025-06-01,Salary,5200,credit\n\
               2025-06-03,Grocery Store,150,debit\n";

    let ingested = ingest(csv.as_bytes(), StatementFormat::Csv).unwrap();
    let txns = &ingested.transactions;
    assert_eq!(txns.len(), 2);

    assert_eq!(txns[0].amount(), 5200.0);
    assert_eq!(txns[0].polarity(), Polarity::Credit);
    assert_eq!(txns[0].category(), Category::Other);

    assert_eq!(txns[1].amount(), 150.0);
    assert_eq!(txns[1].polarity(), Polarity::Debit);
    assert_eq!(txns[1].category(), Category::FoodAndDining);

    let summary = &ingested.summary;
    assert_eq!(summary.monthly_income, 5200.0);
    assert_eq!(summary.monthly_spending, 150.0);
    assert_eq!(summary.total_balance, 5050.0);
    assert_eq!(summary.category_totals[&Category::FoodAndDining], 150.0);
}

#[test]
fn test_keyword_classification() {
    assert_eq!(classify("Uber Ride"), Category::Transportation);
    assert_eq!(classify("Doctor Visit"), Category::Healthcare);
    assert_eq!(classify("Random Store XYZ"), Category::Other);
}

#[test]
fn test_all_debit_statement_has_zero_savings_rate() {
    let csv = "Date,Description,Amount\n\
               2025-02-01,Rent,-1400\n\
               2025-02-03,Chevron,-52.10\n\
               2025-02-07,Sushi Bar,-38.00\n";

    let summary = ingest(csv.as_bytes(), StatementFormat::Csv).unwrap().summary;
    assert_eq!(summary.monthly_income, 0.0);

    let savings = &summary.insights[0];
    assert!(!savings.available);
    assert!(savings.message.contains("0.0%"));
    assert!(summary.total_balance.is_finite());
}

#[test]
fn test_statement_text_line() {
    let txns = extract(
        b"06/01/2025 Coffee Shop -$4.50",
        StatementFormat::StatementText,
    )
    .unwrap();
    assert_eq!(txns.len(), 1);
    assert_eq!(txns[0].amount(), 4.5);
    assert_eq!(txns[0].polarity(), Polarity::Debit);
    assert_eq!(txns[0].category(), Category::FoodAndDining);
}

#[test]
fn test_one_malformed_row_in_five() {
    let csv = "Date,Description,Amount\n\
               2025-04-01,Target,-61.20\n\
               2025-04-02,,abc\n\
               2025-04-03,Spotify,-9.99\n\
               2025-04-04,Paycheck,2300.00\n\
               2025-04-05,Water Utility,-44.00\n";

    let txns = extract(csv.as_bytes(), StatementFormat::Csv).unwrap();
    assert_eq!(txns.len(), 4);
    assert!(txns.iter().all(|t| t.amount() >= 0.0));
}

#[test]
fn test_summary_invariants_hold() {
    let csv = "Date,Description,Amount\n\
               2025-01-15,Employer Payroll,3200.00\n\
               2025-01-16,Whole Foods,-120.35\n\
               2025-02-01,Apartment Rent,-1500.00\n\
               2025-03-09,Lyft,-17.80\n\
               2025-04-22,CVS,-8.49\n\
               2025-05-30,Xbox Live,-14.99\n\
               2025-06-02,Refund Amazon,25.00\n\
               2025-07-04,Fireworks,-60.00\n";

    let ingested = ingest(csv.as_bytes(), StatementFormat::Csv).unwrap();
    let summary = &ingested.summary;

    assert_eq!(
        summary.total_balance,
        summary.monthly_income - summary.monthly_spending
    );
    let category_sum: f64 = summary.category_totals.values().sum();
    assert!((category_sum - summary.monthly_spending).abs() < 1e-9);
    assert!(ingested.transactions.iter().all(|t| t.amount() >= 0.0));

    // July counts toward totals but not toward the Jan..Jun trend
    assert_eq!(summary.category_totals[&Category::Other], 60.0);
    assert_eq!(summary.monthly_trend.len(), 6);
    let trend_spending: f64 = summary.monthly_trend.iter().map(|t| t.spending).sum();
    assert!((summary.monthly_spending - trend_spending - 60.0).abs() < 1e-9);

    let again = ingest(csv.as_bytes(), StatementFormat::Csv).unwrap();
    assert_eq!(&again.summary, summary);
}

#[test]
fn test_unreadable_input_fails_whole_ingestion() {
    let err = ingest(b"\x00\x01 not a workbook", StatementFormat::Spreadsheet).unwrap_err();
    assert!(matches!(err, IngestError::UnreadableInput { .. }));
}
