use expense_charts::{
    aggregate_by_category, build_series, Amount, ChartSet, Ledger, PatternFormatter,
    SeriesOrder, TransactionDate, TransactionKind,
};
use rust_decimal::Decimal;

const LEDGER: &str = r#"{
    "incomes": [
        {"_id": "i1", "title": "Pay", "amount": 100, "date": "2024-01-01", "category": "salary"},
        {"_id": "i2", "title": "Bonus", "amount": 50, "date": "2024-01-02", "category": "salary"},
        {"_id": "i3", "title": "Interest", "amount": 30, "date": "2024-01-03", "category": "bank"}
    ],
    "expenses": [
        {"_id": "e1", "title": "Food", "amount": "₹1,200.50", "date": "2024-01-02", "category": "groceries"},
        {"_id": "e2", "title": "Lottery", "amount": 20, "date": "2024-01-04", "category": "lottery"},
        {"_id": "e3", "title": "Misc", "amount": 5, "date": "2024-01-05"}
    ]
}"#;

fn amount(n: i64) -> Amount {
    Amount::new(Decimal::from(n))
}

#[test]
fn totals_per_category() {
    let ledger = Ledger::from_json(LEDGER).unwrap();
    let totals = aggregate_by_category(ledger.incomes());
    let keys: Vec<&str> = totals.keys().map(|k| k.as_str()).collect();
    assert_eq!(keys, vec!["salary", "bank"]);
    assert_eq!(totals.get("salary"), Some(amount(150)));
    assert_eq!(totals.get("bank"), Some(amount(30)));
    assert_eq!(totals.total(), amount(180));
}

#[test]
fn unrecognized_and_missing_categories_are_kept_apart() {
    let ledger = Ledger::from_json(LEDGER).unwrap();
    let totals = aggregate_by_category(ledger.expenses());
    assert_eq!(totals.len(), 3);
    assert_eq!(totals.uncategorized(), Some(amount(5)));
    let unknown: Vec<&str> = totals
        .unknown_keys(TransactionKind::Expense)
        .into_iter()
        .map(|k| k.as_str())
        .collect();
    assert_eq!(unknown, vec!["lottery"]);
}

#[test]
fn series_labels_follow_the_formatter() {
    let ledger = Ledger::from_json(LEDGER).unwrap();
    let series = build_series(&ledger.incomes()[..2], &PatternFormatter::default());
    assert_eq!(series.labels(), &["1 Jan 2024", "2 Jan 2024"]);
    assert_eq!(series.values(), &[amount(100), amount(50)]);

    let iso = |d: &TransactionDate| d.value().format("%Y-%m-%d").to_string();
    let series = build_series(ledger.incomes(), &iso);
    assert_eq!(series.labels()[2], "2024-01-03");
}

#[test]
fn aggregation_is_repeatable() {
    let ledger = Ledger::from_json(LEDGER).unwrap();
    let first = aggregate_by_category(ledger.expenses());
    let second = aggregate_by_category(ledger.expenses());
    assert_eq!(first, second);
    let formatter = PatternFormatter::default();
    assert_eq!(
        build_series(ledger.expenses(), &formatter),
        build_series(ledger.expenses(), &formatter)
    );
}

#[test]
fn chart_set_payload() {
    let ledger = Ledger::from_json(LEDGER).unwrap();
    let charts = ChartSet::assemble(&ledger, &PatternFormatter::default(), SeriesOrder::Input);
    let value = serde_json::to_value(&charts).unwrap();

    assert_eq!(value["line"]["type"], "line");
    assert_eq!(value["line"]["data"]["labels"].as_array().unwrap().len(), 3);
    assert_eq!(
        value["line"]["data"]["datasets"][1]["data"],
        serde_json::json!([1200.5, 20.0, 5.0])
    );
    assert_eq!(
        value["expense_bars"]["data"]["labels"],
        serde_json::json!(["groceries", "lottery", "uncategorized"])
    );
    assert_eq!(
        value["income_bars"]["data"]["datasets"][0]["data"],
        serde_json::json!([150.0, 30.0])
    );
}

#[test]
fn negative_amounts_are_rejected() {
    let json = r#"[{"title": "Refund", "amount": -10, "date": "2024-01-01", "type": "expense"}]"#;
    let err = Ledger::from_json(json).unwrap_err();
    assert!(err.to_string().contains("negative"));
}
