//! The validation gate every journal entry passes before it is posted.

use ledgerly_shared::types::JournalEntryId;
use rust_decimal::Decimal;

use super::entry::JournalEntryLine;
use super::error::LedgerError;
use super::types::EntryTotals;

/// Validates journal lines for posting.
///
/// Rules, checked in order:
/// 1. At least two lines
/// 2. No negative amounts
/// 3. No line with both a debit and a credit
/// 4. No line with neither
/// 5. At least one debit and one credit line
/// 6. Total debits equal total credits
///
/// # Errors
///
/// Returns the first rule violated.
pub fn validate_lines(
    entry: JournalEntryId,
    lines: &[JournalEntryLine],
) -> Result<EntryTotals, LedgerError> {
    if lines.len() < 2 {
        return Err(LedgerError::InsufficientLines);
    }

    let mut total_debit = Decimal::ZERO;
    let mut total_credit = Decimal::ZERO;
    let mut has_debit = false;
    let mut has_credit = false;

    for (index, line) in lines.iter().enumerate() {
        if line.debit < Decimal::ZERO || line.credit < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount { line: index });
        }

        match (line.debit.is_zero(), line.credit.is_zero()) {
            (false, false) => return Err(LedgerError::LineHasBothSides { line: index }),
            (true, true) => return Err(LedgerError::ZeroAmountLine { line: index }),
            (false, true) => {
                total_debit += line.debit;
                has_debit = true;
            }
            (true, false) => {
                total_credit += line.credit;
                has_credit = true;
            }
        }
    }

    if !has_debit || !has_credit {
        return Err(LedgerError::SingleSided);
    }

    let totals = EntryTotals::new(total_debit, total_credit);
    if !totals.is_balanced {
        return Err(LedgerError::UnbalancedEntry {
            entry,
            debit: total_debit,
            credit: total_credit,
        });
    }

    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use ledgerly_shared::types::AccountId;

    fn debit(amount: Decimal) -> JournalEntryLine {
        JournalEntryLine::debit(AccountId::new(), amount)
    }

    fn credit(amount: Decimal) -> JournalEntryLine {
        JournalEntryLine::credit(AccountId::new(), amount)
    }

    #[test]
    fn test_balanced_lines() {
        let totals =
            validate_lines(JournalEntryId::new(), &[debit(dec!(100.00)), credit(dec!(100.00))])
                .unwrap();
        assert_eq!(totals.total_debit, dec!(100.00));
        assert_eq!(totals.total_credit, dec!(100.00));
    }

    #[test]
    fn test_unbalanced_lines() {
        assert!(matches!(
            validate_lines(JournalEntryId::new(), &[debit(dec!(100.00)), credit(dec!(50.00))]),
            Err(LedgerError::UnbalancedEntry { .. })
        ));
    }

    #[test]
    fn test_insufficient_lines() {
        assert!(matches!(
            validate_lines(JournalEntryId::new(), &[]),
            Err(LedgerError::InsufficientLines)
        ));
        assert!(matches!(
            validate_lines(JournalEntryId::new(), &[debit(dec!(1))]),
            Err(LedgerError::InsufficientLines)
        ));
    }

    #[test]
    fn test_single_sided() {
        assert!(matches!(
            validate_lines(JournalEntryId::new(), &[debit(dec!(100)), debit(dec!(50))]),
            Err(LedgerError::SingleSided)
        ));
    }

    #[test]
    fn test_line_with_both_sides() {
        let mut both = debit(dec!(10));
        both.credit = dec!(10);
        assert!(matches!(
            validate_lines(JournalEntryId::new(), &[credit(dec!(10)), both]),
            Err(LedgerError::LineHasBothSides { line: 1 })
        ));
    }

    #[test]
    fn test_zero_line() {
        assert!(matches!(
            validate_lines(
                JournalEntryId::new(),
                &[debit(dec!(10)), credit(dec!(10)), debit(Decimal::ZERO)]
            ),
            Err(LedgerError::ZeroAmountLine { line: 2 })
        ));
    }

    #[test]
    fn test_negative_amount() {
        assert!(matches!(
            validate_lines(JournalEntryId::new(), &[debit(dec!(-10)), credit(dec!(-10))]),
            Err(LedgerError::NegativeAmount { line: 0 })
        ));
    }
}
