//! Property-based tests for the journal entry validation gate.

use ledgerly_shared::types::{AccountId, JournalEntryId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::entry::JournalEntryLine;
use super::error::LedgerError;
use super::validation::validate_lines;

/// Strategy to generate a valid positive amount (0.01 to 1,000,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a negative amount.
fn negative_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(-cents, 2))
}

/// Strategy to generate a set of positive amounts.
fn amounts(max_len: usize) -> impl Strategy<Value = Vec<Decimal>> {
    prop::collection::vec(positive_amount(), 1..=max_len)
}

fn debit(amount: Decimal) -> JournalEntryLine {
    JournalEntryLine::debit(AccountId::new(), amount)
}

fn credit(amount: Decimal) -> JournalEntryLine {
    JournalEntryLine::credit(AccountId::new(), amount)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Any split of debits offset by a single credit of their sum is accepted,
    /// and the reported totals match.
    #[test]
    fn prop_balanced_split_accepted(debits in amounts(8)) {
        let total: Decimal = debits.iter().copied().sum();
        let mut lines: Vec<JournalEntryLine> = debits.iter().copied().map(debit).collect();
        lines.push(credit(total));

        let totals = validate_lines(JournalEntryId::new(), &lines);
        prop_assert!(totals.is_ok(), "balanced lines rejected: {:?}", totals);
        let totals = totals.unwrap();
        prop_assert_eq!(totals.total_debit, total);
        prop_assert_eq!(totals.total_credit, total);
        prop_assert!(totals.is_balanced);
    }

    /// Any difference between debit and credit totals is rejected with
    /// both sums reported.
    #[test]
    fn prop_unbalanced_rejected(a in positive_amount(), b in positive_amount()) {
        prop_assume!(a != b);
        let result = validate_lines(JournalEntryId::new(), &[debit(a), credit(b)]);
        match result {
            Err(LedgerError::UnbalancedEntry { debit, credit, .. }) => {
                prop_assert_eq!(debit, a);
                prop_assert_eq!(credit, b);
            }
            other => prop_assert!(false, "expected UnbalancedEntry, got {:?}", other),
        }
    }

    /// A negative amount on either side is rejected regardless of balance.
    #[test]
    fn prop_negative_amount_rejected(neg in negative_amount(), on_debit in any::<bool>()) {
        let lines = if on_debit {
            vec![debit(neg), credit(neg)]
        } else {
            vec![credit(neg), debit(neg)]
        };
        let result = validate_lines(JournalEntryId::new(), &lines);
        prop_assert!(
            matches!(result, Err(LedgerError::NegativeAmount { line: 0 })),
            "negative amount should be rejected, got: {:?}",
            result
        );
    }

    /// Lines that are all on one side are rejected.
    #[test]
    fn prop_single_sided_rejected(values in prop::collection::vec(positive_amount(), 2..6), debits in any::<bool>()) {
        let lines: Vec<JournalEntryLine> = values
            .into_iter()
            .map(|v| if debits { debit(v) } else { credit(v) })
            .collect();
        let result = validate_lines(JournalEntryId::new(), &lines);
        prop_assert!(
            matches!(result, Err(LedgerError::SingleSided)),
            "single-sided lines should be rejected, got: {:?}",
            result
        );
    }

    /// A single line never passes, whatever its amount.
    #[test]
    fn prop_single_line_rejected(amount in positive_amount()) {
        let result = validate_lines(JournalEntryId::new(), &[debit(amount)]);
        prop_assert!(matches!(result, Err(LedgerError::InsufficientLines)));
    }
}
