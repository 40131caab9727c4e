#![allow(dead_code)]

use chrono::NaiveDate;
use finance_core::core::services::AccountService;
use finance_core::domain::{Account, AccountKind, FinanceBook};
use uuid::Uuid;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// A seeded book plus one extra named account with the given opening balance.
pub fn book_with_account(name: &str, initial_balance: f64) -> (FinanceBook, Uuid) {
    let mut book = FinanceBook::new();
    let account = Account::new(name, AccountKind::Bank, "USD").with_initial_balance(initial_balance);
    let id = AccountService::add(&mut book, account).unwrap();
    (book, id)
}

pub fn add_account(book: &mut FinanceBook, name: &str, initial_balance: f64) -> Uuid {
    let account = Account::new(name, AccountKind::Bank, "USD").with_initial_balance(initial_balance);
    AccountService::add(book, account).unwrap()
}
