use uuid::Uuid;

use crate::domain::book::FinanceBook;
use crate::domain::goal::{Contribution, FinancialGoal, GoalPriority, GoalStatus};
use crate::errors::{EngineError, EngineResult};

use super::ensure_amount;

/// Goal lifecycle and the append-only contribution sub-ledger.
pub struct GoalService;

/// Result of applying a contribution or withdrawal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContributionOutcome {
    pub contribution_id: Uuid,
    pub new_amount: f64,
    /// True exactly once per goal: the mutation that first pushes
    /// `current_amount` past the target. Callers use it to trigger the
    /// celebration notification.
    pub completed_now: bool,
}

/// Partial update for a goal. `None` fields are left untouched.
#[derive(Debug, Default, Clone)]
pub struct GoalPatch {
    pub title: Option<String>,
    pub target_amount: Option<f64>,
    pub currency: Option<String>,
    pub category: Option<String>,
    pub priority: Option<GoalPriority>,
    pub deadline: Option<Option<chrono::NaiveDate>>,
}

impl GoalService {
    pub fn add_goal(book: &mut FinanceBook, goal: FinancialGoal) -> EngineResult<Uuid> {
        ensure_amount(goal.target_amount)?;
        let id = goal.id;
        book.goals.push(goal);
        book.touch();
        Ok(id)
    }

    /// Applies a partial update. Lowering the target below the current
    /// amount runs the same one-shot completion detection a contribution
    /// does.
    pub fn update_goal(book: &mut FinanceBook, id: Uuid, patch: GoalPatch) -> EngineResult<bool> {
        if let Some(target) = patch.target_amount {
            ensure_amount(target)?;
        }
        let goal = book.goal_mut(id).ok_or(EngineError::unknown("goal", id))?;
        if let Some(title) = patch.title {
            goal.title = title;
        }
        if let Some(target) = patch.target_amount {
            goal.target_amount = target;
        }
        if let Some(currency) = patch.currency {
            goal.currency = currency;
        }
        if let Some(category) = patch.category {
            goal.category = category;
        }
        if let Some(priority) = patch.priority {
            goal.priority = priority;
        }
        if let Some(deadline) = patch.deadline {
            goal.deadline = deadline;
        }
        let completed_now = Self::detect_completion(book, id);
        book.touch();
        Ok(completed_now)
    }

    /// Appends a positive contribution and bumps the running total. The
    /// contribution record and `current_amount` move in lock-step; the
    /// record is never mutated or removed again.
    pub fn add_contribution(
        book: &mut FinanceBook,
        goal_id: Uuid,
        amount: f64,
        notes: Option<String>,
    ) -> EngineResult<ContributionOutcome> {
        let amount = ensure_amount(amount)?;
        let goal = book
            .goal_mut(goal_id)
            .ok_or(EngineError::unknown("goal", goal_id))?;
        let contribution = Contribution::new(amount, notes);
        let contribution_id = contribution.id;
        goal.contributions.push(contribution);
        goal.current_amount += amount;
        let new_amount = goal.current_amount;
        let completed_now = Self::detect_completion(book, goal_id);
        book.touch();
        Ok(ContributionOutcome {
            contribution_id,
            new_amount,
            completed_now,
        })
    }

    /// A withdrawal is a contribution with a negated amount. Withdrawing
    /// more than the current balance is rejected with state unchanged.
    pub fn add_withdrawal(
        book: &mut FinanceBook,
        goal_id: Uuid,
        amount: f64,
        reason: Option<String>,
    ) -> EngineResult<ContributionOutcome> {
        let amount = ensure_amount(amount)?;
        let goal = book
            .goal_mut(goal_id)
            .ok_or(EngineError::unknown("goal", goal_id))?;
        if amount > goal.current_amount {
            return Err(EngineError::InsufficientGoalBalance {
                requested: amount,
                available: goal.current_amount,
            });
        }
        let contribution = Contribution::new(-amount, reason);
        let contribution_id = contribution.id;
        goal.contributions.push(contribution);
        goal.current_amount -= amount;
        let new_amount = goal.current_amount;
        book.touch();
        Ok(ContributionOutcome {
            contribution_id,
            new_amount,
            // Withdrawals never complete a goal, and completion is monotonic.
            completed_now: false,
        })
    }

    pub fn remove_goal(book: &mut FinanceBook, id: Uuid) -> EngineResult<()> {
        let before = book.goals.len();
        book.goals.retain(|goal| goal.id != id);
        if book.goals.len() == before {
            return Err(EngineError::unknown("goal", id));
        }
        book.touch();
        Ok(())
    }

    /// True once the goal's completion has been celebrated.
    pub fn is_celebrated(book: &FinanceBook, id: Uuid) -> bool {
        book.celebrated_goals.contains(&id)
    }

    /// One-shot crossing detection: flips status to completed and records
    /// the goal in the persisted celebrated set the first time the target is
    /// reached. Returns true only on that first crossing.
    fn detect_completion(book: &mut FinanceBook, goal_id: Uuid) -> bool {
        let Some(goal) = book.goal_mut(goal_id) else {
            return false;
        };
        if !goal.is_complete() {
            return false;
        }
        goal.status = GoalStatus::Completed;
        if book.celebrated_goals.insert(goal_id) {
            tracing::info!(goal = %goal_id, "goal reached its target");
            true
        } else {
            false
        }
    }
}
