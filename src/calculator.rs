//! Estimated one-rep max (Epley): `weight * (1 + reps / 30)`.

use web_sys::{Document, HtmlInputElement};

use crate::dom::{query, Listener};
use crate::error::ClientError;

/// Parses the numeric prefix of `input` the way `parseFloat` does:
/// leading whitespace is skipped and trailing garbage ignored.
pub fn parse_leading_float(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let digits = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let int_digits = digits(end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits(end + 1);
        if frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+') | Some(b'-')) {
            exp += 1;
        }
        let exp_digits = digits(exp);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }

    s[..end].parse().ok()
}

pub fn estimate_one_rep_max(weight: f64, reps: f64) -> Option<f64> {
    let usable = |v: f64| v.is_finite() && v > 0.0;
    (usable(weight) && usable(reps)).then(|| weight * (1.0 + reps / 30.0))
}

/// One decimal place, ties rounded up.
///
/// `{:.1}` breaks exact ties to even. A positive value sits exactly on a tie
/// only when its fraction is .25 or .75, so those are nudged one ulp up first.
pub fn format_estimate(value: f64) -> String {
    let on_tie = value > 0.0 && (value * 4.0).fract() == 0.0 && (value * 2.0).fract() != 0.0;
    if on_tie {
        format!("{:.1}", f64::from_bits(value.to_bits() + 1))
    } else {
        format!("{:.1}", value)
    }
}

/// New text for the output field, or `None` to leave it as it is.
pub fn recompute(reps: &str, weight: &str) -> Option<String> {
    let reps = parse_leading_float(reps)?;
    let weight = parse_leading_float(weight)?;
    estimate_one_rep_max(weight, reps).map(format_estimate)
}

/// Keeps the estimate field in sync while both inputs are attached.
/// Dropping the handle detaches both listeners.
pub struct DerivedFieldCalculator {
    _listeners: [Listener; 2],
}

impl DerivedFieldCalculator {
    pub fn attach(
        reps: HtmlInputElement,
        weight: HtmlInputElement,
        output: HtmlInputElement,
    ) -> Result<Self, ClientError> {
        let update = {
            let reps = reps.clone();
            let weight = weight.clone();
            move || {
                if let Some(value) = recompute(&reps.value(), &weight.value()) {
                    output.set_value(&value);
                }
            }
        };
        let on_reps = {
            let update = update.clone();
            Listener::new(&reps, "input", move |_| update())?
        };
        let on_weight = Listener::new(&weight, "input", move |_| update())?;
        Ok(Self {
            _listeners: [on_reps, on_weight],
        })
    }

    /// Looks the three fields up; `Ok(None)` when any of them is not on this page.
    pub fn attach_by_selectors(
        document: &Document,
        reps_selector: &str,
        weight_selector: &str,
        output_selector: &str,
    ) -> Result<Option<Self>, ClientError> {
        let reps = query::<HtmlInputElement>(document, reps_selector);
        let weight = query::<HtmlInputElement>(document, weight_selector);
        let output = query::<HtmlInputElement>(document, output_selector);
        match (reps, weight, output) {
            (Some(reps), Some(weight), Some(output)) => Self::attach(reps, weight, output).map(Some),
            _ => {
                log::debug!("[Calculator] fields not present, skipping");
                Ok(None)
            }
        }
    }
}
