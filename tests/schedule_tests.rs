use credit_simulator::{compute, compute_with, CreditPlan, CreditTerms, NumberFormat, Rounding};
use pretty_assertions::assert_eq;

// ===========================================================================
// Schedule shape
// ===========================================================================

#[test]
fn test_length_matches_installment_count() {
    for count in [1, 2, 3, 6, 12, 24, 36] {
        let sched = compute(2_500_000., count, 2.1).unwrap();
        assert_eq!(sched.len(), count as usize);

        let numbers: Vec<u32> = sched.iter().map(|inst| inst.number).collect();
        assert_eq!(numbers, (1..=count).collect::<Vec<_>>());
    }
}

#[test]
fn test_last_balance_is_zero() {
    for (principal, count) in [(1_000_000., 7), (333_333., 9), (1_999_999., 36), (50., 48)] {
        let sched = compute(principal, count, 2.9).unwrap();
        assert_eq!(sched.last().map(|inst| inst.balance), Some(0.));
    }
}

#[test]
fn test_balance_strictly_decreases() {
    let sched = compute(3_600_000., 12, 1.5).unwrap();
    for pair in sched.windows(2) {
        assert!(pair[1].balance < pair[0].balance);
    }
}

#[test]
fn test_interest_declines_from_third_installment() {
    let sched = compute(3_600_000., 12, 1.5).unwrap();

    // first installment is capital only
    assert_eq!(sched[0].interest, 0.);
    assert_eq!(sched[0].payment, 300_000.);

    // 3.6M * 1.5% + 3.3M * 1.5%
    assert_eq!(sched[1].interest, 103_500.);
    // 3.3M * 1.5%
    assert_eq!(sched[2].interest, 49_500.);

    for pair in sched[2..].windows(2) {
        assert!(pair[1].interest <= pair[0].interest);
    }
    // 300k * 1.5%
    assert_eq!(sched[11].interest, 4_500.);
}

#[test]
fn test_repeated_calls_agree() {
    let first = compute(1_234_567., 11, 2.75).unwrap();
    let second = compute(1_234_567., 11, 2.75).unwrap();
    assert_eq!(first, second);
}

// ===========================================================================
// Rounding modes
// ===========================================================================

#[test]
fn test_rounding_modes_agree_on_even_splits() {
    let legacy = compute(900_000., 3, 3.).unwrap();
    let reconciled =
        compute_with(&CreditTerms::new(900_000., 3, 3.).with_rounding(Rounding::Reconciled))
            .unwrap();
    assert_eq!(legacy, reconciled);
}

#[test]
fn test_reconciled_capital_sums_to_principal() {
    let terms = CreditTerms::new(100_000., 7, 2.).with_rounding(Rounding::Reconciled);
    let plan = CreditPlan::new(terms).unwrap();

    let capital: f64 = plan.installments().iter().map(|inst| inst.capital).sum();
    assert_eq!(capital, 100_000.);
    assert_eq!(plan.total_paid(), 100_000. + plan.total_interest());
}

// ===========================================================================
// Boundary parsing feeds the calculator
// ===========================================================================

#[test]
fn test_parsed_input_matches_numeric_input() {
    let es = NumberFormat::es();
    let principal = es.parse("1.000.000").unwrap();
    let rate = es.parse("2").unwrap();

    let sched = compute(principal, 2, rate).unwrap();
    let rendered: Vec<String> = sched.iter().map(|inst| es.format_amount(inst.payment)).collect();
    assert_eq!(rendered, vec!["500.000", "530.000"]);
}
