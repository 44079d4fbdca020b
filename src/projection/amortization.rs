//! Level-payment loan amortization

/// Round to whole cents, halves away from zero
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Monthly payment for a loan, rounded to cents.
///
/// `apr` is the annual rate in percent. A zero rate repays the principal
/// straight-line; a non-positive term has no payments and returns 0.
///
/// payment = P * r * (1+r)^n / ((1+r)^n - 1), with r = apr/100/12, n = term_years*12
pub fn amortized_payment(principal: f64, apr: f64, term_years: f64) -> f64 {
    let monthly_rate = apr / 100.0 / 12.0;
    let total_payments = term_years * 12.0;

    if total_payments <= 0.0 {
        return 0.0;
    }
    if monthly_rate == 0.0 {
        return round_cents(principal / total_payments);
    }

    let growth = (1.0 + monthly_rate).powf(total_payments);
    let payment = principal * monthly_rate * growth / (growth - 1.0);

    if payment.is_finite() {
        round_cents(payment)
    } else {
        0.0
    }
}
