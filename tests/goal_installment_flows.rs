mod common;

use common::date;
use finance_core::core::services::{
    GoalService, InstallmentService, NewInstallment, PaymentInput, PaymentMeta,
};
use finance_core::domain::{
    FinanceBook, FinancialGoal, Frequency, GoalStatus, InstallmentStatus,
};

#[test]
fn goal_completion_signal_fires_once_across_crossings() {
    let mut book = FinanceBook::new();
    let mut goal = FinancialGoal::new("House deposit", 1000.0, "USD");
    goal.current_amount = 950.0;
    let goal_id = GoalService::add_goal(&mut book, goal).unwrap();

    let first = GoalService::add_contribution(&mut book, goal_id, 100.0, None).unwrap();
    assert_eq!(first.new_amount, 1050.0);
    assert!(first.completed_now, "first crossing must signal");
    assert_eq!(book.goal(goal_id).unwrap().status, GoalStatus::Completed);
    assert!(book.celebrated_goals.contains(&goal_id));

    let second = GoalService::add_contribution(&mut book, goal_id, 200.0, None).unwrap();
    assert!(!second.completed_now, "second crossing must stay silent");
    assert_eq!(book.celebrated_goals.len(), 1);
}

#[test]
fn celebration_survives_snapshot_reload() {
    let mut book = FinanceBook::new();
    let goal_id =
        GoalService::add_goal(&mut book, FinancialGoal::new("Trip", 100.0, "USD")).unwrap();
    GoalService::add_contribution(&mut book, goal_id, 150.0, None).unwrap();

    let doc = finance_core::core::snapshot::export(&book);
    let mut reloaded = FinanceBook::new();
    finance_core::core::snapshot::import(&mut reloaded, doc).unwrap();

    assert!(GoalService::is_celebrated(&reloaded, goal_id));
    // Dipping below target and climbing back must not re-fire after reload.
    GoalService::add_withdrawal(&mut reloaded, goal_id, 100.0, None).unwrap();
    let outcome = GoalService::add_contribution(&mut reloaded, goal_id, 100.0, None).unwrap();
    assert!(!outcome.completed_now);
}

#[test]
fn installment_scenario_fourth_payment() {
    let mut book = FinanceBook::new();
    let id = InstallmentService::add_installment(
        &mut book,
        NewInstallment {
            title: "Phone".into(),
            total_amount: 1200.0,
            installment_amount: 100.0,
            total_installments: 12,
            frequency: Some(Frequency::Monthly),
            start_date: date(2030, 1, 10),
            ..NewInstallment::default()
        },
    )
    .unwrap();
    {
        let plan = book.installment_mut(id).unwrap();
        plan.paid_amount = 300.0;
        plan.paid_installments = 3;
        plan.next_payment_date = date(2030, 4, 10);
    }

    InstallmentService::add_payment(
        &mut book,
        id,
        PaymentInput {
            amount: 100.0,
            date: date(2030, 4, 10),
            notes: None,
        },
        PaymentMeta::default(),
    )
    .unwrap();

    let plan = book.installment(id).unwrap();
    assert_eq!(plan.paid_amount, 400.0);
    assert_eq!(plan.paid_installments, 4);
    assert_eq!(plan.next_payment_date, date(2030, 5, 10));
    assert_eq!(plan.status, InstallmentStatus::Active);
}

#[test]
fn refund_keeps_schedule_and_count() {
    // The asymmetry is deliberate: refunds adjust money, not the schedule.
    let mut book = FinanceBook::new();
    let id = InstallmentService::add_installment(
        &mut book,
        NewInstallment {
            title: "Sofa".into(),
            total_amount: 600.0,
            installment_amount: 200.0,
            total_installments: 3,
            frequency: Some(Frequency::Monthly),
            start_date: date(2030, 2, 1),
            ..NewInstallment::default()
        },
    )
    .unwrap();
    InstallmentService::add_payment(
        &mut book,
        id,
        PaymentInput {
            amount: 200.0,
            date: date(2030, 2, 1),
            notes: None,
        },
        PaymentMeta::default(),
    )
    .unwrap();

    InstallmentService::add_refund(&mut book, id, 200.0, Some("returned".into()), None).unwrap();
    let plan = book.installment(id).unwrap();
    assert_eq!(plan.paid_amount, 0.0);
    assert_eq!(plan.paid_installments, 1);
    assert_eq!(plan.next_payment_date, date(2030, 3, 1));
    assert_eq!(plan.payments.len(), 2);
}

#[test]
fn full_payoff_completes_the_plan() {
    let mut book = FinanceBook::new();
    let id = InstallmentService::add_installment(
        &mut book,
        NewInstallment {
            title: "Bike".into(),
            total_amount: 300.0,
            installment_amount: 150.0,
            total_installments: 2,
            frequency: Some(Frequency::Weekly),
            start_date: date(2030, 3, 1),
            ..NewInstallment::default()
        },
    )
    .unwrap();
    for week in 0..2 {
        InstallmentService::add_payment(
            &mut book,
            id,
            PaymentInput {
                amount: 150.0,
                date: date(2030, 3, 1 + week * 7),
                notes: None,
            },
            PaymentMeta::default(),
        )
        .unwrap();
    }
    assert_eq!(book.installment(id).unwrap().status, InstallmentStatus::Completed);
}
