use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::book::FinanceBook;
use crate::domain::frequency::Frequency;
use crate::domain::installment::{Installment, PaymentRecord, PaymentStatus};
use crate::errors::{EngineError, EngineResult};

use super::ensure_amount;

/// Installment plans and their append-only payment sub-ledger.
pub struct InstallmentService;

#[derive(Debug, Default, Clone)]
pub struct NewInstallment {
    pub title: String,
    pub total_amount: f64,
    pub installment_amount: f64,
    pub total_installments: u32,
    pub frequency: Option<Frequency>,
    pub linked_account_id: Option<Uuid>,
    pub start_date: NaiveDate,
}

/// Partial update for an installment plan. `None` fields are left untouched.
#[derive(Debug, Default, Clone)]
pub struct InstallmentPatch {
    pub title: Option<String>,
    pub total_amount: Option<f64>,
    pub installment_amount: Option<f64>,
    pub total_installments: Option<u32>,
    pub frequency: Option<Frequency>,
    pub linked_account_id: Option<Option<Uuid>>,
    pub next_payment_date: Option<NaiveDate>,
}

#[derive(Debug, Default, Clone)]
pub struct PaymentInput {
    pub amount: f64,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct PaymentMeta {
    pub account_id: Option<Uuid>,
    pub payment_method: Option<String>,
}

impl InstallmentService {
    pub fn add_installment(book: &mut FinanceBook, input: NewInstallment) -> EngineResult<Uuid> {
        ensure_amount(input.total_amount)?;
        ensure_amount(input.installment_amount)?;
        if let Some(account_id) = input.linked_account_id {
            if book.account(account_id).is_none() {
                return Err(EngineError::unknown("account", account_id));
            }
        }
        let frequency = input.frequency.unwrap_or(Frequency::Monthly);
        let mut plan = Installment {
            id: Uuid::new_v4(),
            title: input.title,
            total_amount: input.total_amount,
            paid_amount: 0.0,
            installment_amount: input.installment_amount,
            total_installments: input.total_installments,
            paid_installments: 0,
            frequency,
            linked_account_id: input.linked_account_id,
            start_date: input.start_date,
            next_payment_date: input.start_date,
            status: Default::default(),
            payments: Vec::new(),
        };
        plan.recompute_status(Self::today());
        let id = plan.id;
        book.installments.push(plan);
        book.touch();
        Ok(id)
    }

    pub fn update_installment(
        book: &mut FinanceBook,
        id: Uuid,
        patch: InstallmentPatch,
    ) -> EngineResult<()> {
        if let Some(total) = patch.total_amount {
            ensure_amount(total)?;
        }
        if let Some(per_period) = patch.installment_amount {
            ensure_amount(per_period)?;
        }
        let plan = book
            .installment_mut(id)
            .ok_or(EngineError::unknown("installment", id))?;
        if let Some(title) = patch.title {
            plan.title = title;
        }
        if let Some(total) = patch.total_amount {
            plan.total_amount = total;
        }
        if let Some(per_period) = patch.installment_amount {
            plan.installment_amount = per_period;
        }
        if let Some(count) = patch.total_installments {
            plan.total_installments = count;
        }
        if let Some(frequency) = patch.frequency {
            plan.frequency = frequency;
        }
        if let Some(linked) = patch.linked_account_id {
            plan.linked_account_id = linked;
        }
        if let Some(next) = patch.next_payment_date {
            plan.next_payment_date = next;
        }
        plan.recompute_status(Self::today());
        book.touch();
        Ok(())
    }

    /// Records a payment: appends a positive audit record, bumps the paid
    /// total and count, and advances the schedule by one frequency period.
    pub fn add_payment(
        book: &mut FinanceBook,
        installment_id: Uuid,
        input: PaymentInput,
        meta: PaymentMeta,
    ) -> EngineResult<Uuid> {
        let amount = ensure_amount(input.amount)?;
        let plan = book
            .installment_mut(installment_id)
            .ok_or(EngineError::unknown("installment", installment_id))?;
        let record = PaymentRecord {
            id: Uuid::new_v4(),
            amount,
            date: input.date,
            status: PaymentStatus::Completed,
            notes: input.notes,
            account_id: meta.account_id,
            method: meta.payment_method,
        };
        let record_id = record.id;
        plan.payments.push(record);
        plan.paid_amount += amount;
        plan.paid_installments += 1;
        plan.next_payment_date = plan.frequency.next_date(plan.next_payment_date);
        plan.recompute_status(Self::today());
        book.touch();
        Ok(record_id)
    }

    /// Records a refund: appends a negative audit record and lowers the paid
    /// total, floored at zero. Deliberately asymmetric with payments: the
    /// installment count and schedule are not rolled back.
    pub fn add_refund(
        book: &mut FinanceBook,
        installment_id: Uuid,
        amount: f64,
        reason: Option<String>,
        account_id: Option<Uuid>,
    ) -> EngineResult<Uuid> {
        let amount = ensure_amount(amount)?;
        let plan = book
            .installment_mut(installment_id)
            .ok_or(EngineError::unknown("installment", installment_id))?;
        if amount > plan.paid_amount {
            return Err(EngineError::InsufficientInstallmentPaid {
                requested: amount,
                available: plan.paid_amount,
            });
        }
        let record = PaymentRecord {
            id: Uuid::new_v4(),
            amount: -amount,
            date: Self::today(),
            status: PaymentStatus::Refunded,
            notes: reason,
            account_id,
            method: None,
        };
        let record_id = record.id;
        plan.payments.push(record);
        plan.paid_amount = (plan.paid_amount - amount).max(0.0);
        plan.recompute_status(Self::today());
        book.touch();
        Ok(record_id)
    }

    pub fn remove_installment(book: &mut FinanceBook, id: Uuid) -> EngineResult<()> {
        let before = book.installments.len();
        book.installments.retain(|plan| plan.id != id);
        if book.installments.len() == before {
            return Err(EngineError::unknown("installment", id));
        }
        book.touch();
        Ok(())
    }

    /// Re-derives every plan's status against `today`. Hosts call this on
    /// startup and day rollover so overdue detection stays current.
    pub fn refresh_statuses(book: &mut FinanceBook, today: NaiveDate) {
        for plan in &mut book.installments {
            plan.recompute_status(today);
        }
    }

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::installment::InstallmentStatus;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn plan_book() -> (FinanceBook, Uuid) {
        let mut book = FinanceBook::new();
        let id = InstallmentService::add_installment(
            &mut book,
            NewInstallment {
                title: "Laptop".into(),
                total_amount: 1200.0,
                installment_amount: 100.0,
                total_installments: 12,
                frequency: Some(Frequency::Monthly),
                start_date: date(2030, 1, 15),
                ..NewInstallment::default()
            },
        )
        .unwrap();
        (book, id)
    }

    #[test]
    fn payment_advances_count_total_and_schedule() {
        let (mut book, id) = plan_book();
        {
            let plan = book.installment_mut(id).unwrap();
            plan.paid_amount = 300.0;
            plan.paid_installments = 3;
        }
        InstallmentService::add_payment(
            &mut book,
            id,
            PaymentInput {
                amount: 100.0,
                date: date(2030, 4, 15),
                notes: None,
            },
            PaymentMeta::default(),
        )
        .unwrap();
        let plan = book.installment(id).unwrap();
        assert_eq!(plan.paid_amount, 400.0);
        assert_eq!(plan.paid_installments, 4);
        assert_eq!(plan.next_payment_date, date(2030, 2, 15));
        assert_eq!(plan.payments.len(), 1);
    }

    #[test]
    fn partial_payments_are_allowed() {
        let (mut book, id) = plan_book();
        InstallmentService::add_payment(
            &mut book,
            id,
            PaymentInput {
                amount: 40.0,
                date: date(2030, 1, 20),
                notes: Some("half now".into()),
            },
            PaymentMeta::default(),
        )
        .unwrap();
        let plan = book.installment(id).unwrap();
        assert_eq!(plan.paid_amount, 40.0);
        assert_eq!(plan.paid_installments, 1);
    }

    #[test]
    fn refund_is_asymmetric_with_payment() {
        // Refunds lower the paid total only. The count and the schedule keep
        // the values the payment set.
        let (mut book, id) = plan_book();
        InstallmentService::add_payment(
            &mut book,
            id,
            PaymentInput {
                amount: 100.0,
                date: date(2030, 1, 15),
                notes: None,
            },
            PaymentMeta::default(),
        )
        .unwrap();
        let advanced_date = book.installment(id).unwrap().next_payment_date;

        InstallmentService::add_refund(&mut book, id, 60.0, Some("overcharge".into()), None)
            .unwrap();
        let plan = book.installment(id).unwrap();
        assert_eq!(plan.paid_amount, 40.0);
        assert_eq!(plan.paid_installments, 1, "count must not roll back");
        assert_eq!(plan.next_payment_date, advanced_date, "schedule must not roll back");
        assert_eq!(plan.payments.len(), 2);
        assert_eq!(plan.payments[1].amount, -60.0);
        assert_eq!(plan.payments[1].status, PaymentStatus::Refunded);
    }

    #[test]
    fn refund_beyond_paid_amount_is_rejected_unchanged() {
        let (mut book, id) = plan_book();
        InstallmentService::add_payment(
            &mut book,
            id,
            PaymentInput {
                amount: 50.0,
                date: date(2030, 1, 15),
                notes: None,
            },
            PaymentMeta::default(),
        )
        .unwrap();
        let snapshot = book.installment(id).unwrap().clone();

        let err = InstallmentService::add_refund(&mut book, id, 50.01, None, None)
            .expect_err("refund must be rejected");
        assert!(matches!(err, EngineError::InsufficientInstallmentPaid { .. }));
        assert_eq!(book.installment(id).unwrap(), &snapshot);

        // Rejection is idempotent.
        let err = InstallmentService::add_refund(&mut book, id, 50.01, None, None)
            .expect_err("still rejected");
        assert!(matches!(err, EngineError::InsufficientInstallmentPaid { .. }));
        assert_eq!(book.installment(id).unwrap(), &snapshot);
    }

    #[test]
    fn completion_wins_over_overdue() {
        let (mut book, id) = plan_book();
        {
            let plan = book.installment_mut(id).unwrap();
            plan.paid_amount = 1200.0;
            plan.next_payment_date = date(2020, 1, 1);
            plan.recompute_status(date(2030, 6, 1));
        }
        assert_eq!(book.installment(id).unwrap().status, InstallmentStatus::Completed);
    }

    #[test]
    fn past_due_plan_is_overdue() {
        let (mut book, id) = plan_book();
        InstallmentService::refresh_statuses(&mut book, date(2031, 1, 1));
        assert_eq!(book.installment(id).unwrap().status, InstallmentStatus::Overdue);
    }
}
