mod common;

use common::{add_account, book_with_account, date};
use finance_core::core::services::{
    JournalService, LedgerService, NewExpense, NewIncome, NewTransfer,
};
use finance_core::domain::FinanceBook;

#[test]
fn cash_scenario_expense_income_transfer() {
    // Account "Cash" with an opening balance of 100.
    let (mut book, cash) = book_with_account("My Cash", 100.0);
    let expense_cat = book.expense_categories[0].id;
    let income_cat = book.income_categories[0].id;

    JournalService::add_expense(
        &mut book,
        NewExpense {
            title: "Groceries".into(),
            amount: 30.0,
            category_id: expense_cat,
            account_id: cash,
            date: date(2025, 5, 2),
            ..NewExpense::default()
        },
    )
    .unwrap();
    assert_eq!(LedgerService::balance_of(&book, cash), 70.0);

    JournalService::add_income(
        &mut book,
        NewIncome {
            title: "Refund".into(),
            amount: 50.0,
            category_id: income_cat,
            account_id: cash,
            date: date(2025, 5, 3),
            ..NewIncome::default()
        },
    )
    .unwrap();
    assert_eq!(LedgerService::balance_of(&book, cash), 120.0);

    let bank = add_account(&mut book, "My Bank", 0.0);
    JournalService::add_transfer(
        &mut book,
        NewTransfer {
            from_account_id: cash,
            to_account_id: bank,
            amount: 20.0,
            date: date(2025, 5, 4),
            notes: None,
        },
    )
    .unwrap();
    assert_eq!(LedgerService::balance_of(&book, cash), 100.0);
    assert_eq!(LedgerService::balance_of(&book, bank), 20.0);
    assert_eq!(LedgerService::net_worth(&book), 120.0);
}

#[test]
fn net_worth_law_holds_for_mixed_sequences() {
    // net worth == sum of initial balances + incomes - expenses, with every
    // transfer cancelling out.
    let (mut book, checking) = book_with_account("Checking", 250.0);
    let savings = add_account(&mut book, "Savings", 1000.0);
    let expense_cat = book.expense_categories[1].id;
    let income_cat = book.income_categories[0].id;

    let incomes = [1200.0, 35.5];
    let expenses = [90.25, 14.75, 300.0];
    for (i, amount) in incomes.iter().enumerate() {
        JournalService::add_income(
            &mut book,
            NewIncome {
                title: format!("Income {i}"),
                amount: *amount,
                category_id: income_cat,
                account_id: checking,
                date: date(2025, 6, 1 + i as u32),
                ..NewIncome::default()
            },
        )
        .unwrap();
    }
    for (i, amount) in expenses.iter().enumerate() {
        JournalService::add_expense(
            &mut book,
            NewExpense {
                title: format!("Expense {i}"),
                amount: *amount,
                category_id: expense_cat,
                account_id: savings,
                date: date(2025, 6, 10 + i as u32),
                ..NewExpense::default()
            },
        )
        .unwrap();
    }
    for amount in [10.0, 400.0, 3.33] {
        JournalService::add_transfer(
            &mut book,
            NewTransfer {
                from_account_id: checking,
                to_account_id: savings,
                amount,
                date: date(2025, 6, 20),
                notes: None,
            },
        )
        .unwrap();
    }

    let expected = 250.0 + 1000.0 + incomes.iter().sum::<f64>() - expenses.iter().sum::<f64>();
    assert!((LedgerService::net_worth(&book) - expected).abs() < 1e-9);
}

#[test]
fn balances_rescan_after_deletes() {
    let (mut book, cash) = book_with_account("Cash 2", 40.0);
    let expense_cat = book.expense_categories[0].id;
    let id = JournalService::add_expense(
        &mut book,
        NewExpense {
            title: "Taxi".into(),
            amount: 15.0,
            category_id: expense_cat,
            account_id: cash,
            date: date(2025, 1, 10),
            ..NewExpense::default()
        },
    )
    .unwrap();
    assert_eq!(LedgerService::balance_of(&book, cash), 25.0);

    JournalService::delete_expense(&mut book, id).unwrap();
    assert_eq!(LedgerService::balance_of(&book, cash), 40.0);
}

#[test]
fn fresh_book_net_worth_is_default_account_initial_balance() {
    let book = FinanceBook::new();
    assert_eq!(LedgerService::net_worth(&book), 0.0);
    let default_account = book.accounts.iter().find(|a| a.is_default).unwrap();
    assert_eq!(
        LedgerService::balance_of(&book, default_account.id),
        default_account.initial_balance
    );
}
