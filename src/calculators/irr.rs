//! Internal Rate of Return (IRR) calculation
//!
//! Used for the money-weighted return of a premium schedule against its
//! maturity payout.

const MIN_RATE: f64 = -0.99;
const MAX_RATE: f64 = 10.0;

/// Calculate the Internal Rate of Return (IRR) for a series of cash flows
/// using the Newton-Raphson method.
///
/// # Arguments
/// * `cashflows` - Cash flows at equally spaced periods (positive = inflow, negative = outflow)
/// * `periods_per_year` - Number of periods per year (1 for annual premiums)
///
/// # Returns
/// * `Option<f64>` - Annual IRR as a decimal (e.g., 0.05 for 5%), or None if no solution found
pub fn calculate_irr(cashflows: &[f64], periods_per_year: u32) -> Option<f64> {
    if cashflows.is_empty() || periods_per_year == 0 {
        return None;
    }

    if cashflows.iter().all(|&cf| cf.abs() < 1e-10) {
        return Some(0.0);
    }

    // An IRR needs at least one sign change
    let has_positive = cashflows.iter().any(|&cf| cf > 1e-10);
    let has_negative = cashflows.iter().any(|&cf| cf < -1e-10);
    if !has_positive || !has_negative {
        return None;
    }

    let mut rate = 0.05 / periods_per_year as f64;
    let tolerance = 1e-10;
    let max_iterations = 1000;
    // NPV residual accepted at a root, relative to the gross cash flow
    let npv_tolerance = 1e-8 * cashflows.iter().map(|cf| cf.abs()).sum::<f64>();

    for _ in 0..max_iterations {
        let (npv, dnpv) = npv_and_derivative(cashflows, rate);

        if dnpv.abs() < 1e-20 {
            return calculate_irr_bisection(cashflows, periods_per_year);
        }

        let new_rate = (rate - npv / dnpv).clamp(MIN_RATE, MAX_RATE);

        if (new_rate - rate).abs() < tolerance {
            // A step stalled on a clamp bound is not a root
            let pinned = new_rate <= MIN_RATE || new_rate >= MAX_RATE;
            if !pinned && npv_at_rate(cashflows, new_rate).abs() <= npv_tolerance {
                return Some(annualize(new_rate, periods_per_year));
            }
            break;
        }

        rate = new_rate;
    }

    calculate_irr_bisection(cashflows, periods_per_year)
}

fn annualize(periodic_rate: f64, periods_per_year: u32) -> f64 {
    (1.0 + periodic_rate).powi(periods_per_year as i32) - 1.0
}

/// NPV and its derivative with respect to rate
fn npv_and_derivative(cashflows: &[f64], rate: f64) -> (f64, f64) {
    let mut npv = 0.0;
    let mut dnpv = 0.0;

    for (t, &cf) in cashflows.iter().enumerate() {
        npv += cf / (1.0 + rate).powi(t as i32);
        if t > 0 {
            dnpv -= (t as f64) * cf / (1.0 + rate).powi(t as i32 + 1);
        }
    }

    (npv, dnpv)
}

/// Fallback IRR calculation using bisection
fn calculate_irr_bisection(cashflows: &[f64], periods_per_year: u32) -> Option<f64> {
    let mut low = MIN_RATE;
    let mut high = MAX_RATE;
    let tolerance = 1e-10;

    let mut npv_low = npv_at_rate(cashflows, low);
    if npv_low * npv_at_rate(cashflows, high) > 0.0 {
        return None;
    }

    for _ in 0..1000 {
        let mid = (low + high) / 2.0;
        let npv_mid = npv_at_rate(cashflows, mid);

        if npv_mid.abs() < tolerance || (high - low) / 2.0 < tolerance {
            return Some(annualize(mid, periods_per_year));
        }

        if npv_mid * npv_low < 0.0 {
            high = mid;
        } else {
            low = mid;
            npv_low = npv_mid;
        }
    }

    None
}

fn npv_at_rate(cashflows: &[f64], rate: f64) -> f64 {
    cashflows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / (1.0 + rate).powi(t as i32))
        .sum()
}

/// Annual cash flows of a premium schedule: pay at the start of each year,
/// receive the maturity payout at the end of the term
pub fn premium_schedule_cashflows(premium_amount: f64, term: u32, maturity: f64) -> Vec<f64> {
    let mut cashflows = vec![-premium_amount; term as usize];
    cashflows.push(maturity);
    cashflows
}
