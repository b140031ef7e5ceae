//! Tick placement and tick label formatting

/// Tick positions at 1/2/5 x 10^k steps covering `[lo, hi]`
pub fn linear_ticks(lo: f64, hi: f64, target: usize) -> Vec<f64> {
    let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
    let span = hi - lo;
    if !span.is_finite() || span <= 0.0 {
        return vec![lo];
    }

    let step = nice_step(span / target.max(1) as f64);
    let tol = step * 1e-9;
    let first = (lo / step - 1e-9).ceil() * step;

    let mut ticks = Vec::new();
    let mut k = 0;
    loop {
        let v = first + k as f64 * step;
        if v > hi + tol {
            break;
        }
        ticks.push(if v.abs() < tol { 0.0 } else { v });
        k += 1;
    }
    ticks
}

fn nice_step(raw: f64) -> f64 {
    let mag = 10f64.powf(raw.log10().floor());
    let norm = raw / mag;
    let nice = if norm < 1.5 {
        1.0
    } else if norm < 3.0 {
        2.0
    } else if norm < 7.0 {
        5.0
    } else {
        10.0
    };
    nice * mag
}

/// Decade ticks (as exponents) for a log axis spanning `[lo, hi]`, both > 0
pub fn log_ticks(lo: f64, hi: f64) -> Vec<i32> {
    let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
    if lo <= 0.0 || !lo.is_finite() || !hi.is_finite() {
        return Vec::new();
    }
    let e0 = (lo.log10() - 1e-9).ceil() as i32;
    let e1 = (hi.log10() + 1e-9).floor() as i32;
    let stride = if e1 - e0 > 8 { 2 } else { 1 };
    (e0..=e1).step_by(stride).collect()
}

/// Label for a linear tick, with as many decimals as the step needs
pub fn format_linear_tick(value: f64, step: f64) -> String {
    if value != 0.0 && value.abs() >= 1e5 {
        return format!("{:.0e}", value);
    }
    let decimals = if step >= 1.0 || step <= 0.0 {
        0
    } else {
        (-step.log10().floor()) as usize
    };
    format!("{:.*}", decimals, value)
}

/// Label for a decade tick
pub fn format_log_tick(exponent: i32) -> String {
    if (0..=3).contains(&exponent) {
        format!("{}", 10i64.pow(exponent as u32))
    } else {
        format!("1e{}", exponent)
    }
}
