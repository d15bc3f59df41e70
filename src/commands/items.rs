use crate::args::ReportArgs;
use crate::commands::{plural, Out};
use crate::item::{item_views, ItemView};
use crate::model::Ledger;
use crate::output::{Rows, Tabular};
use crate::{Config, Result};
use serde::Serialize;

/// The list rows, incomes first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ItemList(Vec<ItemView>);

impl Tabular for ItemList {
    fn headers(&self) -> Vec<&'static str> {
        vec![
            "kind",
            "date",
            "title",
            "category",
            "amount",
            "icon",
            "description",
        ]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.0
            .iter()
            .map(|v| {
                vec![
                    v.kind.to_string(),
                    v.date.clone(),
                    v.title.clone(),
                    v.category.clone(),
                    v.amount.clone(),
                    v.icon.unwrap_or_default().to_string(),
                    v.description.clone().unwrap_or_default(),
                ]
            })
            .collect()
    }
}

/// Lists the records of the ledger at `args.input()` the way the income and expense pages do.
pub async fn items(config: Config, args: ReportArgs) -> Result<Out<Rows>> {
    let ledger = Ledger::load(args.input()).await?;
    let list = ItemList(
        args.kind()
            .kinds()
            .into_iter()
            .flat_map(|kind| {
                item_views(
                    ledger.records(kind),
                    kind,
                    config.formatter(),
                    config.currency_symbol(),
                )
            })
            .collect(),
    );
    let message = format!("Listed {}", plural(list.0.len(), "item", "items"));
    Ok(Out::new(message, Rows::render(args.format(), &list)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::{KindFilter, OutputFormat};
    use crate::model::icons;
    use crate::test::{expense, income};
    use crate::utils;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_items_command() {
        let dir = TempDir::new().unwrap();
        let ledger = Ledger::new(
            vec![income(60000, 15, "salary").with_description("Pay | January")],
            vec![expense(250, 16, "tv")],
        )
        .unwrap();
        let input = dir.path().join("ledger.json");
        utils::write(&input, serde_json::to_string(&ledger).unwrap())
            .await
            .unwrap();
        let config = Config::load(dir.path()).await.unwrap();

        let out = items(
            config,
            ReportArgs::new(&input, KindFilter::Both, OutputFormat::Table),
        )
        .await
        .unwrap();

        assert_eq!(out.message(), "Listed 2 items");
        let table = out.structure().unwrap().to_string();
        assert!(table.contains(&format!(
            "| income | 15 Jan 2024 | income on the 15 | salary | ₹60,000.00 | {} | Pay \\| January |",
            icons::MONEY
        )));
        assert!(table.contains(&format!(
            "| expense | 16 Jan 2024 | expense on the 16 | tv | ₹250.00 | {} |  |",
            icons::TV
        )));
    }

    #[tokio::test]
    async fn test_items_json_for_one_kind() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("ledger.json");
        utils::write(
            &input,
            r#"[
                {"_id": "a1", "title": "Rent", "amount": 900, "date": "2024-02-01",
                 "category": "lottery", "type": "expense"},
                {"_id": "b2", "title": "Pay", "amount": 1000, "date": "2024-02-01",
                 "category": "salary", "type": "income"}
            ]"#,
        )
        .await
        .unwrap();
        let config = Config::load(dir.path()).await.unwrap();

        let out = items(
            config,
            ReportArgs::new(&input, KindFilter::Expense, OutputFormat::Json),
        )
        .await
        .unwrap();

        assert_eq!(out.message(), "Listed 1 item");
        match out.structure().unwrap() {
            Rows::Json(v) => {
                assert_eq!(v[0]["id"], "a1");
                assert_eq!(v[0]["amount"], "₹900.00");
                assert!(v[0].get("icon").is_none());
            }
            other => panic!("expected JSON, got {other:?}"),
        }
    }
}
