use crate::error::SimulatorError;

/// Thousands-grouped amounts at the input and output boundary.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct NumberFormat {
    pub thousands: char,
    pub decimal: char,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::es()
    }
}

impl NumberFormat {
    /// `1.234.567,5`
    pub fn es() -> Self {
        Self {
            thousands: '.',
            decimal: ',',
        }
    }

    /// `1,234,567.5`
    pub fn en() -> Self {
        Self {
            thousands: ',',
            decimal: '.',
        }
    }

    /// Rounds to whole units and groups the digits by three.
    pub fn format_amount(&self, value: f64) -> String {
        let rounded = value.round();
        let digits = format!("{:.0}", rounded.abs());

        let grouped = group_thousands(&digits, self.thousands);
        if rounded < 0. {
            format!("-{}", grouped)
        } else {
            grouped
        }
    }

    /// Reads user-entered text, accepting thousands separators only where
    /// `format_amount` would put them.
    pub fn parse(&self, text: &str) -> Result<f64, SimulatorError> {
        let err = |reason: &str| SimulatorError::ParseNumber {
            input: text.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(err("empty input"));
        }

        let (sign, body) = match trimmed.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        if body.starts_with(['+', '-']) {
            return Err(err("repeated sign"));
        }
        let (int_part, frac_part) = match body.split_once(self.decimal) {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (body, None),
        };

        if int_part.contains(self.thousands) {
            let mut groups = int_part.split(self.thousands);
            let lead_ok = groups
                .next()
                .is_some_and(|g| (1..=3).contains(&g.len()));
            if !lead_ok || !groups.all(|g| g.len() == 3) {
                return Err(err("misplaced thousands separator"));
            }
        }

        let mut normalized = String::with_capacity(trimmed.len());
        normalized.push_str(sign);
        normalized.extend(int_part.chars().filter(|&ch| ch != self.thousands));
        if let Some(frac) = frac_part {
            normalized.push('.');
            normalized.push_str(frac);
        }

        let value: f64 = normalized.parse().map_err(|e| err(&format!("{}", e)))?;
        if !value.is_finite() {
            return Err(err("not a finite number"));
        }
        Ok(value)
    }
}

fn group_thousands(digits: &str, sep: char) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let len = digits.len();
    for (idx, ch) in digits.chars().enumerate() {
        let pos_from_end = len - idx;
        out.push(ch);
        if pos_from_end > 1 && pos_from_end % 3 == 1 {
            out.push(sep);
        }
    }
    out
}
