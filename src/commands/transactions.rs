use crate::args::AddTransactionArgs;
use crate::commands::Out;
use crate::views::{ListView, StatsView, TransactionRow};
use crate::{App, Result};

/// The most recent transactions, newest first.
pub async fn list_transactions(app: &App) -> Result<Out<ListView<TransactionRow>>> {
    let panel = app.admin_panel().await?;
    Ok(Out::new(
        format!("{} transaction(s) recorded", app.transactions().len()),
        panel.transactions,
    ))
}

/// Fills the transaction form from `args` and submits it. Without a date the form keeps its
/// default of today.
pub async fn add_transaction(app: &mut App, args: &AddTransactionArgs) -> Result<Out<StatsView>> {
    let form = app.transaction_form_mut();
    form.category = args.category;
    form.amount = args.amount.clone();
    form.description = args.description.clone();
    if let Some(date) = &args.date {
        form.date = date.clone();
    }
    app.submit_transaction().await
}

pub async fn delete_transaction(app: &mut App, id: &str) -> Result<Out<usize>> {
    app.delete_transaction(id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;
    use crate::test::TestEnv;
    use crate::views::NO_TRANSACTIONS;

    fn args(category: Category, amount: &str, description: &str) -> AddTransactionArgs {
        AddTransactionArgs {
            category,
            amount: amount.into(),
            description: description.into(),
            date: Some("2025-06-01".into()),
        }
    }

    #[tokio::test]
    async fn test_add_and_list() {
        let env = TestEnv::new().await;
        let mut app = env.admin_app().await;
        let out = list_transactions(&app).await.unwrap();
        assert_eq!(out.structure().unwrap().placeholder(), Some(NO_TRANSACTIONS));

        add_transaction(&mut app, &args(Category::Income, "100", "Gel Nails x3"))
            .await
            .unwrap();
        let out = add_transaction(&mut app, &args(Category::Expense, "15.50", "Supplies"))
            .await
            .unwrap();
        assert_eq!(out.structure().unwrap().balance, "84.50€");

        let out = list_transactions(&app).await.unwrap();
        let rows = out.structure().unwrap().rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].description, "Supplies");
        assert_eq!(rows[0].date, "June 1, 2025");
        assert_eq!(rows[1].amount, "+100.00€");
    }

    #[tokio::test]
    async fn test_add_defaults_date_to_today() {
        let env = TestEnv::new().await;
        let mut app = env.admin_app().await;
        let add = AddTransactionArgs {
            date: None,
            ..args(Category::Income, "20", "Manicure")
        };
        add_transaction(&mut app, &add).await.unwrap();
        assert_eq!(
            app.transactions()[0].date(),
            chrono::Local::now().date_naive()
        );
    }

    #[tokio::test]
    async fn test_list_requires_admin() {
        let env = TestEnv::new().await;
        let app = env.app().await;
        assert!(list_transactions(&app).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_unknown() {
        let env = TestEnv::new().await;
        let mut app = env.admin_app().await;
        let out = delete_transaction(&mut app, "missing").await.unwrap();
        assert_eq!(out.message(), "No transaction with id 'missing'");
    }
}
