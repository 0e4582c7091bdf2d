use crate::error::SimulatorError;
use log::{trace, warn};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the computed amounts are brought to whole currency units.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Rounding {
    /// Each column is rounded on its own. Rounded columns may not add up.
    #[default]
    Legacy,
    /// Capital is rounded on the cumulative amount so that capital plus
    /// interest equals the payment and the balances chain exactly.
    Reconciled,
}

/// Upper bound on `CreditTerms::installments`, one hundred years of monthly payments.
pub const MAX_INSTALLMENTS: u32 = 1200;

#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CreditTerms {
    pub principal: f64,
    pub installments: u32,
    pub monthly_rate_pct: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rounding: Rounding,
}

impl CreditTerms {
    pub fn new(principal: f64, installments: u32, monthly_rate_pct: f64) -> Self {
        Self {
            principal,
            installments,
            monthly_rate_pct,
            rounding: Rounding::Legacy,
        }
    }

    pub fn with_rounding(self, rounding: Rounding) -> Self {
        Self { rounding, ..self }
    }

    pub fn validate(&self) -> Result<(), SimulatorError> {
        if !self.principal.is_finite() {
            return Err(SimulatorError::invalid("principal", "must be a finite number"));
        }
        if self.principal <= 0. {
            return Err(SimulatorError::invalid("principal", "must be greater than zero"));
        }
        if self.installments < 1 {
            return Err(SimulatorError::invalid("installments", "must be at least 1"));
        }
        if self.installments > MAX_INSTALLMENTS {
            return Err(SimulatorError::invalid(
                "installments",
                &format!("must be at most {}", MAX_INSTALLMENTS),
            ));
        }
        if !self.monthly_rate_pct.is_finite() {
            return Err(SimulatorError::invalid(
                "monthly_rate_pct",
                "must be a finite number",
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Installment {
    pub number: u32,
    pub payment: f64,
    pub capital: f64,
    pub interest: f64,
    pub balance: f64,
}

impl Installment {
    pub fn new(number: u32, payment: f64, capital: f64, interest: f64, balance: f64) -> Self {
        Self {
            number,
            payment,
            capital,
            interest,
            balance,
        }
    }
}

impl fmt::Display for Installment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "installment {}, payment ${:.0}, capital ${:.0}, interest ${:.0}, balance ${:.0}",
            self.number, self.payment, self.capital, self.interest, self.balance
        )
    }
}

/// Validated terms together with their installment schedule.
#[derive(PartialEq, Debug)]
pub struct CreditPlan {
    terms: CreditTerms,
    scheduled: Vec<Installment>,
}

impl CreditPlan {
    pub fn new(terms: CreditTerms) -> Result<Self, SimulatorError> {
        Ok(Self {
            scheduled: compute_with(&terms)?,
            terms,
        })
    }

    pub fn terms(&self) -> &CreditTerms {
        &self.terms
    }

    pub fn installments(&self) -> &[Installment] {
        &self.scheduled
    }

    pub fn installment_count(&self) -> usize {
        self.scheduled.len()
    }

    /// 1-based lookup.
    pub fn installment(&self, number: usize) -> Option<&Installment> {
        number
            .checked_sub(1)
            .and_then(|idx| self.scheduled.get(idx))
    }

    pub fn installment_info(&self, number: usize) -> String {
        match self.installment(number) {
            Some(inst) => inst.to_string(),
            None => "No installment information.".to_string(),
        }
    }

    pub fn total_paid(&self) -> f64 {
        self.scheduled.iter().map(|inst| inst.payment).sum()
    }

    pub fn total_interest(&self) -> f64 {
        self.scheduled.iter().map(|inst| inst.interest).sum()
    }

    pub fn show_plan(&self) {
        for inst in &self.scheduled {
            println!("{}", inst);
        }
    }
}

/// Computes the schedule with independently rounded columns.
///
/// `monthly_rate_pct` is a percentage (2.5 means 2.5% per month). A negative
/// rate is accepted and produces negative interest.
pub fn compute(
    principal: f64,
    installments: u32,
    monthly_rate_pct: f64,
) -> Result<Vec<Installment>, SimulatorError> {
    compute_with(&CreditTerms::new(principal, installments, monthly_rate_pct))
}

pub fn compute_with(terms: &CreditTerms) -> Result<Vec<Installment>, SimulatorError> {
    terms.validate()?;
    if terms.monthly_rate_pct < 0. {
        warn!(
            "negative monthly rate {}%, interest will be negative",
            terms.monthly_rate_pct
        );
    }
    Ok(build_schedule(terms))
}

// rounds to whole units, never returning -0
fn round(amt: f64) -> f64 {
    let rounded = amt.round();
    if rounded == 0. {
        0.
    } else {
        rounded
    }
}

fn build_schedule(terms: &CreditTerms) -> Vec<Installment> {
    let principal = terms.principal;
    let count = terms.installments;
    let rate = terms.monthly_rate_pct / 100.;

    if count == 1 {
        let amount = round(principal);
        return vec![Installment::new(1, amount, amount, 0., 0.)];
    }

    let capital_share = principal / f64::from(count);
    let mut balance = principal; // unrounded running balance
    let mut paid_capital = 0.; // rounded cumulative capital, reconciled mode only
    let mut sched = Vec::with_capacity(count as usize);

    for number in 1..=count {
        let interest = match number {
            // first statement carries no accrued interest
            1 => 0.,
            // months one and two are billed together
            2 => principal * rate + (principal - capital_share) * rate,
            _ => balance * rate,
        };

        balance -= capital_share;
        trace!(
            "installment {}, interest {}, capital {}, balance {}",
            number,
            interest,
            capital_share,
            balance
        );

        let inst = match terms.rounding {
            Rounding::Legacy => Installment::new(
                number,
                round(capital_share + interest),
                round(capital_share),
                round(interest),
                round(balance),
            ),
            Rounding::Reconciled => {
                // the last period settles the rounded principal exactly
                let cumulative = if number == count {
                    round(principal)
                } else {
                    round(capital_share * f64::from(number))
                };
                let capital = cumulative - paid_capital;
                paid_capital = cumulative;
                let interest = round(interest);
                Installment::new(
                    number,
                    capital + interest,
                    capital,
                    interest,
                    round(principal) - cumulative,
                )
            }
        };
        sched.push(inst);
    }
    sched
}
